use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use throng_data::sim::Sim;

const JOINTS: [&str; 8] = [
    "hips", "spine", "chest", "neck", "head", "l_arm", "r_arm", "l_leg",
];

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sim Sampling");

    group.bench_function("Forward (1000 frames x 8 joints)", |b| {
        b.iter(|| {
            let mut sim = Sim::new("agent_1", "soldier");
            for frame in 0..1000 {
                for joint in JOINTS {
                    sim.add_sample(frame, joint, [frame as f32; 3], [1.0; 3]).unwrap();
                }
            }
            black_box(sim.frame_range());
        });
    });

    // Every joint first seen late, then filled backward.
    group.bench_function("Backward (1000 frames x 8 joints)", |b| {
        b.iter(|| {
            let mut sim = Sim::new("agent_1", "soldier");
            for frame in (0..1000).rev() {
                for joint in JOINTS {
                    sim.add_sample(frame, joint, [frame as f32; 3], [1.0; 3]).unwrap();
                }
            }
            black_box(sim.frame_range());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
