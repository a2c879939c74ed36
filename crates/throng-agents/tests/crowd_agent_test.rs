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

use anyhow::Result;
use std::sync::Arc;
use throng_agents::{AgentInstance, BuildConfig, CrowdAgent, SkinType};
use throng_core::description::{
    Geometry, GeometryOption, Influence, Joint, Material, Primitive, PrimitiveShape, SkinWeights,
    Variable,
};
use throng_core::math::Vec3;
use throng_core::scene::{AttrValue, MeshDescription, NodeHandle, NodeKind, SceneGraph};
use throng_data::description::{Description, DescriptionBuilder};
use throng_infra::{MemoryScene, OpKind, SceneOp};

// --- Fixtures ---

fn two_triangles() -> MeshDescription {
    MeshDescription {
        positions: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ],
        normals: vec![Vec3::Z; 6],
        indices: vec![0, 1, 2, 3, 4, 5],
    }
}

fn scene() -> MemoryScene {
    let mut scene = MemoryScene::new();
    for (file, object) in [
        ("geo/body.obj", "body"),
        ("geo/hat.obj", "hat"),
        ("geo/cap.obj", "cap"),
    ] {
        scene.add_mesh_file(file, vec![(object.to_string(), two_triangles())]);
    }
    scene
}

fn joint(name: &str, parent: &str, primitive: Option<PrimitiveShape>) -> Joint {
    let mut joint = Joint::new(name, "");
    joint.parent = parent.to_string();
    joint.translate = vec![0.0, 1.0, 0.0];
    joint.primitive = primitive.map(|shape| Primitive::new(name, shape));
    joint
}

fn body(material: u32) -> Geometry {
    let mut body = Geometry::new("body", "geo/body.obj", 0);
    body.material = material;
    let influence = |deformer| vec![Influence {
        deformer,
        weight: 1.0,
    }];
    body.skin = Some(SkinWeights {
        deformers: vec!["hips".to_string(), "spine".to_string()],
        weights: vec![
            influence(0),
            influence(0),
            influence(0),
            influence(1),
            influence(1),
            influence(1),
        ],
    });
    body
}

fn hat(name: &str, file: &str, id: u32) -> Geometry {
    let mut hat = Geometry::new(name, file, id);
    hat.material = 2;
    hat.attach = Some("head".to_string());
    hat
}

fn soldier_with_body(body: Geometry) -> Result<Arc<Description>> {
    let mut builder = DescriptionBuilder::new("soldier").scale_var("height");
    builder
        .add_joint(joint("hips", "", Some(PrimitiveShape::TUBE)))
        .add_joint(joint("spine", "hips", Some(PrimitiveShape::SPHERE)))
        .add_joint(joint("head", "spine", None))
        .add_material(Material::new("skin", 1).with_color_map("maps/skin.tif"))
        .add_material(Material::new("cloth", 2))
        .add_variable(Variable::new("hat_var", 0.0, 1.0, 0.0))
        .add_variable(Variable::new("height", 0.5, 2.0, 1.0))
        .add_geometry(body)
        .add_geometry(hat("helmet", "geo/hat.obj", 1))
        .add_geometry(hat("cap", "geo/cap.obj", 2));
    builder.add_option(GeometryOption::new("hat", "hat_var", vec![1, 2]))?;
    Ok(Arc::new(builder.finish()?))
}

fn soldier() -> Result<Arc<Description>> {
    soldier_with_body(body(1))
}

fn named(scene: &MemoryScene, nodes: &[NodeHandle], name: &str) -> Option<NodeHandle> {
    nodes
        .iter()
        .copied()
        .find(|n| scene.get(*n).is_some_and(|node| node.name == name))
}

// --- Tests ---

#[test]
fn test_second_agent_reuses_every_master() -> Result<()> {
    // --- 1. SETUP ---
    let description = soldier()?;
    let mut scene = scene();
    let mut crowd = CrowdAgent::new(BuildConfig::default());

    // --- 2. FIRST AGENT ---
    crowd.build(&mut scene, &AgentInstance::new(description.clone(), "1"))?;
    assert_eq!(scene.count(OpKind::Import), 2);
    assert_eq!(scene.count_where(SceneOp::is_shader_creation), 2);
    assert_eq!(scene.count(OpKind::CreateMesh), 2);

    // --- 3. SECOND AGENT ---
    scene.clear_journal();
    let second = AgentInstance::new(description.clone(), "2").with_variable("height", 1.5);
    let root = crowd.build(&mut scene, &second)?;

    assert_eq!(scene.count(OpKind::Import), 0);
    assert_eq!(scene.count_where(SceneOp::is_shader_creation), 0);
    assert_eq!(scene.count(OpKind::CreateMesh), 0);
    assert_eq!(
        scene.attribute(&root.attr("scale")),
        Some(&AttrValue::Float3([1.5; 3]))
    );

    // --- 4. A DIFFERENT VARIANT ---
    scene.clear_journal();
    let third = AgentInstance::new(description, "3").with_variable("hat_var", 1.0);
    crowd.build(&mut scene, &third)?;
    assert_eq!(scene.count(OpKind::Import), 1);
    assert_eq!(scene.count_where(SceneOp::is_shader_creation), 0);

    let stats = crowd.cleanup(&mut scene)?;
    assert_eq!(stats.geometry.masters, 3);
    assert_eq!(stats.primitives.masters, 2);
    assert_eq!(stats.materials.masters, 2);
    assert_eq!(stats.clusters.masters, 1);
    assert_eq!(stats.deferred_shading, 6);
    Ok(())
}

#[test]
fn test_agent_subtree_layout() -> Result<()> {
    // --- 1. SETUP ---
    let mut scene = scene();
    let mut crowd = CrowdAgent::new(BuildConfig::default());
    let agent = AgentInstance::new(soldier()?, "1");

    // --- 2. ACTION ---
    let root = crowd.build(&mut scene, &agent)?;

    // --- 3. ASSERT ---
    assert_eq!(scene.get(root).map(|n| n.name.as_str()), Some("soldier_1"));
    let children = scene.list_children(&root)?;
    assert_eq!(children.len(), 2);
    let hips = named(&scene, &children, "hips").expect("root joint under the agent");
    let geometry = named(&scene, &children, "geometry").expect("geometry group");
    assert_eq!(
        scene.attribute(&hips.attr("translate")),
        Some(&AttrValue::Float3([0.0, 1.0, 0.0]))
    );

    let joints = scene.list_descendants(&root, Some(NodeKind::Joint))?;
    assert_eq!(joints.len(), 3);
    let head = named(&scene, &joints, "head").expect("head joint");
    let spine = named(&scene, &joints, "spine").expect("spine joint");
    assert!(named(&scene, &scene.list_children(&hips)?, "hipsPrimitive").is_some());
    assert!(named(&scene, &scene.list_children(&spine)?, "spinePrimitive").is_some());

    // The helmet follows the head rigidly, shaded with the cloth material.
    let helmet_shapes = scene.list_descendants(&head, Some(NodeKind::Mesh))?;
    assert_eq!(helmet_shapes.len(), 1);
    assert_eq!(
        scene.shading_group_of(helmet_shapes[0]),
        Some(scene.find_node("clothSG")?)
    );

    // The body is smooth-skinned to the skeleton.
    let body_shapes = scene.list_descendants(&geometry, Some(NodeKind::Mesh))?;
    assert_eq!(body_shapes.len(), 1);
    assert_eq!(
        scene.shading_group_of(body_shapes[0]),
        Some(scene.find_node("skinSG")?)
    );
    let cluster = scene.find_node("bodySkin")?;
    assert!(scene.is_connected(
        &cluster.attr("outputGeometry[0]"),
        &body_shapes[0].attr("inMesh")
    ));
    assert!(scene.is_connected(&hips.attr("worldMatrix"), &cluster.attr("matrix[0]")));
    assert!(scene.is_connected(&spine.attr("worldMatrix"), &cluster.attr("matrix[1]")));
    assert_eq!(
        scene.attribute(&cluster.attr("weightList[0].weights[0]")),
        Some(&AttrValue::Float(1.0))
    );

    // --- 4. CLEANUP ---
    crowd.cleanup(&mut scene)?;
    assert!(scene.find_node("geometryMasters").is_err());
    assert!(scene.find_node("bodyWeightHolder").is_err());
    assert!(scene.contains(root));
    assert!(scene.contains(body_shapes[0]));
    assert_eq!(scene.count(OpKind::AssignShadingGroup), 3);
    Ok(())
}

#[test]
fn test_chunked_parts_follow_their_joints() -> Result<()> {
    let mut scene = scene();
    let config = BuildConfig {
        skin_type: SkinType::Chunked,
        instance_primitives: false,
        ..Default::default()
    };
    let mut crowd = CrowdAgent::new(config);
    let description = soldier()?;

    let roots = crowd.build_all(
        &mut scene,
        &[
            AgentInstance::new(description.clone(), "1"),
            AgentInstance::new(description, "2"),
        ],
    )?;
    assert_eq!(roots.len(), 2);
    assert_eq!(crowd.built(), 2);
    assert_eq!(scene.count(OpKind::SplitMesh), 2);
    assert!(scene.find_node("bodySkin").is_err());

    let joints = scene.list_descendants(&roots[0], Some(NodeKind::Joint))?;
    for joint in ["hips", "spine"] {
        let handle = named(&scene, &joints, joint).expect("joint");
        let chunk = format!("body_{joint}");
        let bound = scene
            .list_children(&handle)?
            .iter()
            .any(|c| scene.get(*c).is_some_and(|n| n.name.starts_with(&chunk)));
        assert!(bound, "chunk '{chunk}' should be parented under its joint");
    }

    let stats = crowd.cleanup(&mut scene)?;
    assert_eq!(stats.deferred_shading, 0);
    assert_eq!(stats.geometry.masters, 2);
    Ok(())
}

#[test]
fn test_errors_name_the_agent_and_key() -> Result<()> {
    let mut scene = scene();
    let mut crowd = CrowdAgent::new(BuildConfig::default());
    let agent = AgentInstance::new(soldier_with_body(body(9))?, "4");

    let err = crowd.build(&mut scene, &agent).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("'body' of agent '4' (soldier)"), "{message}");
    assert!(message.contains("key 'geo/body.obj'"), "{message}");
    assert!(message.contains("Unknown material '9'"), "{message}");
    Ok(())
}

#[test]
fn test_host_failure_stops_the_build() -> Result<()> {
    let mut scene = scene();
    let mut crowd = CrowdAgent::new(BuildConfig::default());
    let agent = AgentInstance::new(soldier()?, "1");

    scene.fail_next(OpKind::Import);
    assert!(crowd.build(&mut scene, &agent).is_err());
    assert_eq!(crowd.built(), 0);
    assert_eq!(crowd.stats().geometry.masters, 0);

    crowd.build(&mut scene, &agent)?;
    assert_eq!(crowd.stats().geometry.masters, 2);
    Ok(())
}
