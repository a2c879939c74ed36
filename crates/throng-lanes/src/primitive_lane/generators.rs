// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::f32::consts::{PI, TAU};
use throng_core::math::Vec3;
use throng_core::scene::MeshDescription;

/// A capped cylinder centred on the origin, along Y.
pub(super) fn cylinder(radius: f32, length: f32, segments: u32) -> MeshDescription {
    let half = length * 0.5;
    let mut mesh = MeshDescription::default();

    // Side: two rings sharing radial normals.
    for segment in 0..=segments {
        let theta = TAU * (segment as f32 / segments as f32);
        let (sin, cos) = theta.sin_cos();
        let normal = Vec3::new(cos, 0.0, sin);
        for y in [-half, half] {
            mesh.positions.push(Vec3::new(radius * cos, y, radius * sin));
            mesh.normals.push(normal);
        }
    }
    for segment in 0..segments {
        let bottom = segment * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        mesh.indices
            .extend_from_slice(&[bottom, top, next_bottom, next_bottom, top, next_top]);
    }

    // Caps: a fan around a centre vertex, with flat normals.
    for (y, normal) in [(half, Vec3::Y), (-half, -Vec3::Y)] {
        let centre = mesh.positions.len() as u32;
        mesh.positions.push(Vec3::new(0.0, y, 0.0));
        mesh.normals.push(normal);
        for segment in 0..segments {
            let theta = TAU * (segment as f32 / segments as f32);
            let (sin, cos) = theta.sin_cos();
            mesh.positions.push(Vec3::new(radius * cos, y, radius * sin));
            mesh.normals.push(normal);
        }
        for segment in 0..segments {
            let current = centre + 1 + segment;
            let next = centre + 1 + (segment + 1) % segments;
            if y > 0.0 {
                mesh.indices.extend_from_slice(&[centre, next, current]);
            } else {
                mesh.indices.extend_from_slice(&[centre, current, next]);
            }
        }
    }

    mesh
}

/// A UV sphere centred on the origin.
pub(super) fn sphere(radius: f32, segments: u32, rings: u32) -> MeshDescription {
    let mut mesh = MeshDescription::default();

    for ring in 0..=rings {
        let phi = PI * (ring as f32 / rings as f32);
        let y = radius * phi.cos();
        let ring_radius = radius * phi.sin();

        for segment in 0..=segments {
            let theta = TAU * (segment as f32 / segments as f32);
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            mesh.positions.push(Vec3::new(x, y, z));
            mesh.normals.push(Vec3::new(x / radius, y / radius, z / radius));
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            mesh.indices.extend_from_slice(&[current, next, current + 1]);
            mesh.indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    mesh
}

/// An axis-aligned box centred on the origin, with one quad per face.
pub(super) fn cuboid(size: [f32; 3]) -> MeshDescription {
    let [hx, hy, hz] = size.map(|s| s * 0.5);
    let faces = [
        (Vec3::Z, [(-hx, -hy, hz), (hx, -hy, hz), (hx, hy, hz), (-hx, hy, hz)]),
        (-Vec3::Z, [(hx, -hy, -hz), (-hx, -hy, -hz), (-hx, hy, -hz), (hx, hy, -hz)]),
        (Vec3::X, [(hx, -hy, hz), (hx, -hy, -hz), (hx, hy, -hz), (hx, hy, hz)]),
        (-Vec3::X, [(-hx, -hy, -hz), (-hx, -hy, hz), (-hx, hy, hz), (-hx, hy, -hz)]),
        (Vec3::Y, [(-hx, hy, hz), (hx, hy, hz), (hx, hy, -hz), (-hx, hy, -hz)]),
        (-Vec3::Y, [(-hx, -hy, -hz), (hx, -hy, -hz), (hx, -hy, hz), (-hx, -hy, hz)]),
    ];

    let mut mesh = MeshDescription::default();
    for (normal, corners) in faces {
        let base = mesh.positions.len() as u32;
        for (x, y, z) in corners {
            mesh.positions.push(Vec3::new(x, y, z));
            mesh.normals.push(normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}
