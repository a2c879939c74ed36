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

// Throng Sandbox
// Imports a small demo crowd into an in-memory scene.

use anyhow::Result;
use std::sync::Arc;
use throng_agents::{AgentInstance, BuildConfig, CrowdAgent};
use throng_core::description::{
    Geometry, GeometryOption, Influence, Joint, Material, Primitive, PrimitiveShape, SkinWeights,
    Variable,
};
use throng_core::math::{Rgb, Vec3};
use throng_core::scene::MeshDescription;
use throng_data::description::{Description, DescriptionBuilder};
use throng_infra::{MemoryScene, OpKind, SceneOp};

const AGENTS_PER_TYPE: usize = 12;

/// A flat strip of `rows` quads stacked along Y.
fn strip(rows: u32) -> MeshDescription {
    let mut mesh = MeshDescription::default();
    for row in 0..=rows {
        let y = row as f32 * 0.25;
        mesh.positions.push(Vec3::new(-0.2, y, 0.0));
        mesh.positions.push(Vec3::new(0.2, y, 0.0));
        mesh.normals.extend([Vec3::Z, Vec3::Z]);
    }
    for row in 0..rows {
        let a = row * 2;
        mesh.indices.extend([a, a + 1, a + 3, a, a + 3, a + 2]);
    }
    mesh
}

/// Lower half of the strip follows the hips, the upper half the spine.
fn strip_weights(rows: u32) -> SkinWeights {
    let vertices = (rows as usize + 1) * 2;
    let weights = (0..vertices)
        .map(|v| {
            let up = v as f32 / (vertices - 1) as f32;
            vec![
                Influence {
                    deformer: 0,
                    weight: 1.0 - up,
                },
                Influence {
                    deformer: 1,
                    weight: up,
                },
            ]
        })
        .collect();
    SkinWeights {
        deformers: vec!["hips".to_string(), "spine".to_string()],
        weights,
    }
}

fn joint(name: &str, parent: &str, y: f32, shape: Option<PrimitiveShape>) -> Joint {
    let mut joint = Joint::new(name, "");
    joint.parent = parent.to_string();
    joint.translate = vec![0.0, y, 0.0];
    joint.primitive = shape.map(|shape| Primitive::new(name, shape));
    joint
}

fn describe(agent_type: &str, uniform: Rgb) -> Result<Arc<Description>> {
    let mut body = Geometry::new("body", "geo/body.obj", 0);
    body.skin = Some(strip_weights(8));

    let mut builder = DescriptionBuilder::new(agent_type)
        .cdl(format!("{agent_type}.cdl"))
        .scale_var("height");
    builder
        .add_joint(joint("hips", "", 1.0, Some(PrimitiveShape::TUBE)))
        .add_joint(joint("spine", "hips", 0.5, Some(PrimitiveShape::TUBE)))
        .add_joint(joint(
            "head",
            "spine",
            0.6,
            Some(PrimitiveShape::Sphere { radius: 0.15 }),
        ))
        .add_material(Material::new("skin", 1).with_color_map("maps/skin.tif"));

    let mut cloth = Material::new(format!("{agent_type}Cloth"), 2);
    cloth.diffuse.color = uniform;
    builder
        .add_material(cloth)
        .add_variable(Variable::new("height", 0.9, 1.1, 1.0))
        .add_variable(Variable::new("hat", 0.0, 2.0, 0.0))
        .add_geometry(body);

    for (id, name) in [(1, "helmet"), (2, "cap"), (3, "hood")] {
        let mut hat = Geometry::new(name, format!("geo/{name}.obj"), id);
        hat.material = 2;
        hat.attach = Some("head".to_string());
        builder.add_geometry(hat);
    }
    builder.add_option(GeometryOption::new("hat", "hat", vec![1, 2, 3]))?;
    Ok(Arc::new(builder.finish()?))
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => BuildConfig::from_file(path)?,
        None => BuildConfig::default(),
    };

    let mut scene = MemoryScene::new();
    scene.add_mesh_file("geo/body.obj", vec![("body".to_string(), strip(8))]);
    for hat in ["helmet", "cap", "hood"] {
        scene.add_mesh_file(format!("geo/{hat}.obj"), vec![(hat.to_string(), strip(1))]);
    }

    let types = [
        describe("soldier", Rgb::new(0.3, 0.6, 0.4))?,
        describe("civilian", Rgb::new(0.6, 0.3, 0.8))?,
    ];
    let agents: Vec<AgentInstance> = types
        .iter()
        .flat_map(|description| {
            (0..AGENTS_PER_TYPE).map(move |i| {
                AgentInstance::new(description.clone(), i.to_string())
                    .with_variable("hat", (i % 3) as f32)
                    .with_variable("height", 0.9 + 0.02 * (i % 10) as f32)
            })
        })
        .collect();

    let mut crowd = CrowdAgent::new(config);
    let roots = crowd.build_all(&mut scene, &agents)?;
    let stats = crowd.cleanup(&mut scene)?;

    log::info!(
        "Built {} agents: {} imports, {} shaders, {} scene nodes",
        roots.len(),
        scene.count(OpKind::Import),
        scene.count_where(SceneOp::is_shader_creation),
        scene.node_count()
    );
    log::info!("{stats}");
    Ok(())
}
