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

use throng_agents::build_cache::BuildCache;
use throng_agents::config::{BuildConfig, SkinType};
use throng_core::description::{
    Geometry, Influence, Material, Primitive, PrimitiveShape, SkinWeights,
};
use throng_core::error::CrowdError;
use throng_core::math::Vec3;
use throng_core::scene::{
    AttrValue, MeshDescription, NodeKind, ReparentOptions, SceneGraph, SceneResult,
};
use throng_infra::{MemoryScene, OpKind, SceneOp};

// --- Fixtures ---

/// Two disjoint triangles: vertices 0..3 follow `hips`, 3..6 follow `spine`.
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
    scene.add_mesh_file("geo/body.obj", vec![("body".to_string(), two_triangles())]);
    scene.add_mesh_file("geo/hat.obj", vec![("hat".to_string(), two_triangles())]);
    scene
}

fn skinned_body() -> Geometry {
    let mut body = Geometry::new("body", "geo/body.obj", 0);
    let hips = Influence {
        deformer: 0,
        weight: 1.0,
    };
    let spine = Influence {
        deformer: 1,
        weight: 1.0,
    };
    body.skin = Some(SkinWeights {
        deformers: vec!["hips".to_string(), "spine".to_string()],
        weights: vec![
            vec![hips],
            vec![hips],
            vec![hips],
            vec![spine],
            vec![spine],
            vec![spine],
        ],
    });
    body
}

fn chunked() -> BuildConfig {
    BuildConfig {
        skin_type: SkinType::Chunked,
        ..Default::default()
    }
}

// --- Geometry ---

#[test]
fn test_equal_geometry_keys_import_once() -> SceneResult<()> {
    // --- 1. SETUP ---
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let target = scene.create_empty_group("target")?;
    let body = skinned_body();

    // --- 2. ACTION ---
    // Smooth binding shares the master across agent types.
    let first = cache.import_geometry(&mut scene, &body, "soldier", &target).unwrap();
    let second = cache.import_geometry(&mut scene, &body, "civilian", &target).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(scene.count(OpKind::Import), 1);
    assert_eq!(scene.count(OpKind::Duplicate), 2);
    assert_eq!(scene.count(OpKind::SoftenEdges), 1);
    assert_ne!(first.root, second.root);
    assert_eq!(scene.list_children(&target)?, vec![first.root, second.root]);

    let stats = cache.stats();
    assert_eq!(stats.geometry.masters, 1);
    assert_eq!((stats.geometry.hits, stats.geometry.misses), (1, 1));
    Ok(())
}

#[test]
fn test_chunked_binding_keeps_one_master_per_type() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(chunked());
    let target = scene.create_empty_group("target")?;
    let body = skinned_body();

    let copy = cache.import_geometry(&mut scene, &body, "soldier", &target).unwrap();
    cache.import_geometry(&mut scene, &body, "soldier", &target).unwrap();
    cache.import_geometry(&mut scene, &body, "civilian", &target).unwrap();

    assert_eq!(scene.count(OpKind::Import), 2);
    assert_eq!(scene.count(OpKind::SplitMesh), 4);
    assert_eq!(cache.stats().geometry.masters, 2);

    // The emptied source object, then one part per deformer.
    let deformers: Vec<_> = copy.parts.iter().map(|p| p.deformer.as_deref()).collect();
    assert_eq!(deformers, vec![None, Some("hips"), Some("spine")]);
    for part in &copy.parts[1..] {
        let shape = scene.get(part.shapes[0]).unwrap();
        assert_eq!(shape.mesh.as_ref().map(|m| m.triangle_count()), Some(1));
    }
    Ok(())
}

#[test]
fn test_attached_geometry_is_never_chunked() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(chunked());
    let target = scene.create_empty_group("target")?;
    let mut hat = skinned_body();
    hat.file = "geo/hat.obj".into();
    hat.attach = Some("head".to_string());

    let copy = cache.import_geometry(&mut scene, &hat, "soldier", &target).unwrap();

    assert_eq!(scene.count(OpKind::SplitMesh), 0);
    assert_eq!(copy.parts.len(), 1);
    assert!(!cache.is_skinnable(&hat));
    Ok(())
}

#[test]
fn test_failed_import_is_not_cached() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let target = scene.create_empty_group("target")?;
    let body = skinned_body();

    scene.fail_next(OpKind::Import);
    let err = cache
        .import_geometry(&mut scene, &body, "soldier", &target)
        .unwrap_err();
    assert!(matches!(err, CrowdError::Host(_)));
    assert_eq!(cache.stats().geometry.masters, 0);

    cache.import_geometry(&mut scene, &body, "soldier", &target).unwrap();
    assert_eq!(scene.count(OpKind::Import), 1);
    assert_eq!(cache.stats().geometry.masters, 1);
    Ok(())
}

#[test]
fn test_failed_soften_leaves_no_master_behind() -> SceneResult<()> {
    // --- 1. SETUP ---
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let target = scene.create_empty_group("target")?;
    let body = skinned_body();

    // --- 2. ACTION ---
    scene.fail_next(OpKind::SoftenEdges);
    let err = cache
        .import_geometry(&mut scene, &body, "soldier", &target)
        .unwrap_err();
    let failed = scene
        .journal()
        .iter()
        .find_map(|op| match op {
            SceneOp::Import { group, .. } => Some(*group),
            _ => None,
        })
        .unwrap();
    cache.import_geometry(&mut scene, &body, "soldier", &target).unwrap();
    cache.cleanup(&mut scene).unwrap();

    // --- 3. ASSERT ---
    assert!(matches!(err, CrowdError::Host(_)));
    assert_eq!(scene.count(OpKind::Import), 2);
    assert!(!scene.contains(failed));
    Ok(())
}

#[test]
fn test_chunked_import_merges_file_objects() -> SceneResult<()> {
    let mut scene = scene();
    let halves = two_triangles();
    let half = |range: std::ops::Range<usize>| MeshDescription {
        positions: halves.positions[range.clone()].to_vec(),
        normals: halves.normals[range].to_vec(),
        indices: vec![0, 1, 2],
    };
    scene.add_mesh_file(
        "geo/split.obj",
        vec![
            ("lower".to_string(), half(0..3)),
            ("upper".to_string(), half(3..6)),
        ],
    );
    let mut cache = BuildCache::new(chunked());
    let target = scene.create_empty_group("target")?;
    let mut body = skinned_body();
    body.file = "geo/split.obj".into();

    let copy = cache.import_geometry(&mut scene, &body, "soldier", &target).unwrap();

    // Weights of the second object land in its own chunk.
    assert_eq!(scene.count(OpKind::SplitMesh), 2);
    let deformers: Vec<_> = copy.parts.iter().map(|p| p.deformer.as_deref()).collect();
    assert_eq!(deformers, vec![None, Some("hips"), Some("spine")]);
    for part in &copy.parts[1..] {
        let shape = scene.get(part.shapes[0]).unwrap();
        assert_eq!(shape.mesh.as_ref().map(|m| m.triangle_count()), Some(1));
    }
    Ok(())
}

// --- Materials ---

#[test]
fn test_materials_share_by_color_map() {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());

    let cloth = Material::new("cloth", 1).with_color_map("maps/cloth.tif");
    let cloth_dirty = Material::new("clothDirty", 2).with_color_map("maps/cloth.tif");
    let a = cache.build_material(&mut scene, &cloth).unwrap();
    let b = cache.build_material(&mut scene, &cloth_dirty).unwrap();

    assert_eq!(a, b);
    assert_eq!(scene.count_where(SceneOp::is_shader_creation), 1);
}

#[test]
fn test_untextured_materials_are_separated_by_id() {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());

    let a = cache.build_material(&mut scene, &Material::new("skin", 1)).unwrap();
    let b = cache.build_material(&mut scene, &Material::new("skin", 2)).unwrap();
    let again = cache.build_material(&mut scene, &Material::new("skinCopy", 1)).unwrap();

    assert_ne!(a, b);
    assert_eq!(a, again);
    assert_eq!(scene.count_where(SceneOp::is_shader_creation), 2);
    assert_eq!(cache.stats().materials.hits, 1);
}

#[test]
fn test_textured_material_network() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let group = cache
        .build_material(&mut scene, &Material::new("cloth", 1).with_color_map("maps/cloth.tif"))
        .unwrap();

    let shader = scene.find_node("cloth")?;
    let file = scene.find_node("clothFile")?;
    let place = scene.find_node("clothPlace")?;
    assert_eq!(scene.get(group).unwrap().kind, NodeKind::ShadingGroup);

    assert!(scene.is_connected(&shader.attr("outColor"), &group.attr("surfaceShader")));
    assert!(scene.is_connected(&file.attr("outColor"), &shader.attr("color")));
    assert!(scene.is_connected(&place.attr("outUV"), &file.attr("uv")));
    assert!(scene.is_connected(&place.attr("outUvFilterSize"), &file.attr("uvFilterSize")));
    assert_eq!(
        scene
            .connections()
            .iter()
            .filter(|(src, dst)| src.node == place && dst.node == file)
            .count(),
        18
    );

    let shader_list = scene.find_node(":defaultShaderList1")?;
    let texture_list = scene.find_node(":defaultTextureList1")?;
    let utility_list = scene.find_node(":defaultRenderUtilityList1")?;
    assert!(scene.is_connected(&shader.attr("message"), &shader_list.attr("s[0]")));
    assert!(scene.is_connected(&file.attr("message"), &texture_list.attr("tx[0]")));
    assert!(scene.is_connected(&place.attr("message"), &utility_list.attr("u[0]")));

    assert_eq!(
        scene.attribute(&file.attr("fileTextureName")),
        Some(&AttrValue::String("maps/cloth.tif".to_string()))
    );
    // A color map replaces the diffuse color.
    assert_eq!(scene.attribute(&shader.attr("color")), None);
    assert!(scene.attribute(&shader.attr("specularRollOff")).is_some());
    Ok(())
}

// --- Primitives ---

#[test]
fn test_instanced_primitives_defer_shading_to_cleanup() -> SceneResult<()> {
    // --- 1. SETUP ---
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let primitive = Primitive::new("spine", PrimitiveShape::TUBE);

    // --- 2. ACTION ---
    let copies: Vec<_> = (0..5)
        .map(|i| {
            cache
                .build_primitive(&mut scene, "soldier", &primitive, &format!("spine{i}"), true)
                .unwrap()
        })
        .collect();

    // --- 3. ASSERT ---
    assert_eq!(scene.count(OpKind::CreateMesh), 1);
    let instancing = scene.count_where(|op| {
        matches!(op, SceneOp::Reparent { options, .. }
            if *options == ReparentOptions::INSTANCE_NO_CONNECTIONS)
    });
    assert_eq!(instancing, 5);
    assert_eq!(scene.count(OpKind::AssignShadingGroup), 0);
    assert_eq!(cache.pending_shading().len(), 5);

    let master = scene.find_node("soldier_spine")?;
    let master_shape = scene.list_children(&master)?[0];
    for copy in &copies {
        assert!(scene.get(*copy).unwrap().is_root());
        assert_eq!(scene.list_children(copy)?, vec![master_shape]);
    }
    let group = scene.find_node("msvPrimitives")?;
    assert_eq!(
        scene.attribute(&group.attr("visibility")),
        Some(&AttrValue::Bool(false))
    );

    // --- 4. CLEANUP ---
    let stats = cache.cleanup(&mut scene).unwrap();
    assert_eq!(stats.deferred_shading, 5);
    assert_eq!(scene.count(OpKind::AssignShadingGroup), 1);
    let assigned = scene.journal().iter().find_map(|op| match op {
        SceneOp::AssignShadingGroup { members, .. } => Some(members.clone()),
        _ => None,
    });
    assert_eq!(assigned, Some(vec![master_shape]));
    // Instances still share the hidden master.
    assert!(scene.contains(group));
    Ok(())
}

#[test]
fn test_copied_primitives_keep_their_shading() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let primitive = Primitive::new("head", PrimitiveShape::SPHERE);

    let copy = cache
        .build_primitive(&mut scene, "soldier", &primitive, "headPrimitive", false)
        .unwrap();
    let shape = scene.list_children(&copy)?[0];
    let default_group = scene.find_node("initialShadingGroup")?;
    assert_eq!(scene.shading_group_of(shape), Some(default_group));
    assert!(cache.pending_shading().is_empty());

    let group = scene.find_node("msvPrimitives")?;
    cache.cleanup(&mut scene).unwrap();
    assert_eq!(scene.count(OpKind::AssignShadingGroup), 0);
    assert!(!scene.contains(group));
    assert!(scene.contains(copy));
    assert_eq!(scene.get(copy).unwrap().name, "headPrimitive");
    Ok(())
}

#[test]
fn test_invalid_primitive_is_an_integrity_error() {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let primitive = Primitive::new("head", PrimitiveShape::Sphere { radius: -1.0 });

    let err = cache
        .build_primitive(&mut scene, "soldier", &primitive, "head", true)
        .unwrap_err();
    assert!(matches!(err, CrowdError::ModelIntegrity(_)));
    assert_eq!(scene.count(OpKind::CreateMesh), 0);
    assert_eq!(cache.stats().primitives.masters, 0);
}

// --- Clusters ---

#[test]
fn test_cluster_weights_are_snapshotted() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let body = skinned_body();
    let first = scene.create_node(NodeKind::SkinCluster, "bodySkin")?;
    let second = scene.create_node(NodeKind::SkinCluster, "bodySkin")?;

    cache.set_cluster_weights(&mut scene, &body, &first).unwrap();
    let uploads = scene.count(OpKind::SetAttribute);
    cache.set_cluster_weights(&mut scene, &body, &second).unwrap();

    // Only the two normalizeWeights toggles on the second cluster.
    assert_eq!(scene.count(OpKind::SetAttribute) - uploads, 2);
    for cluster in [first, second] {
        assert_eq!(
            scene.attribute(&cluster.attr("weightList[4].weights[1]")),
            Some(&AttrValue::Float(1.0))
        );
        assert_eq!(
            scene.attribute(&cluster.attr("normalizeWeights")),
            Some(&AttrValue::Int(1))
        );
    }
    assert!(scene.connections().is_empty());

    let holder = scene.find_node("bodyWeightHolder")?;
    cache.cleanup(&mut scene).unwrap();
    assert!(!scene.contains(holder));
    assert!(scene.contains(second));
    Ok(())
}

#[test]
fn test_failed_snapshot_removes_the_holder() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let body = skinned_body();
    let cluster = scene.create_node(NodeKind::SkinCluster, "bodySkin")?;

    scene.fail_next(OpKind::Disconnect);
    let err = cache
        .set_cluster_weights(&mut scene, &body, &cluster)
        .unwrap_err();
    assert!(matches!(err, CrowdError::Host(_)));
    assert!(scene.find_node("bodyWeightHolder").is_err());
    assert!(scene.connections().is_empty());
    assert_eq!(cache.stats().clusters.masters, 0);

    cache.set_cluster_weights(&mut scene, &body, &cluster).unwrap();
    assert!(scene.find_node("bodyWeightHolder").is_ok());
    assert_eq!(cache.stats().clusters.masters, 1);
    Ok(())
}

#[test]
fn test_cleanup_removes_geometry_masters() -> SceneResult<()> {
    let mut scene = scene();
    let mut cache = BuildCache::new(BuildConfig::default());
    let target = scene.create_empty_group("target")?;
    let copy = cache
        .import_geometry(&mut scene, &skinned_body(), "soldier", &target)
        .unwrap();
    let masters = scene.find_node("geometryMasters")?;

    let stats = cache.cleanup(&mut scene).unwrap();

    assert!(!scene.contains(masters));
    assert!(scene.contains(copy.root));
    assert_eq!(stats.geometry.masters, 1);
    assert!(scene.find_node("msvPrimitives").is_err());
    Ok(())
}
