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

//! The build-cache engine.
//!
//! Every expensive scene construct (imported geometry, primitive mesh,
//! shading network, skin weight table) is built once per import pass as a
//! *master*, stored under a content key, and replicated for later agents.
//! Masters live in hidden holding groups that [`BuildCache::cleanup`]
//! removes at the end of the pass.

mod keys;
mod master;
mod stats;

pub use keys::*;
pub use master::*;
pub use stats::*;

use crate::config::{BuildConfig, SkinType};
use throng_core::description::{Geometry, Material, Primitive};
use throng_core::error::{CrowdError, CrowdResult};
use throng_core::scene::{
    AttrValue, ConnectOptions, DuplicateOptions, ImportOptions, NodeHandle, NodeKind,
    ReparentOptions, SceneGraph,
};
use throng_data::cache::MasterCache;
use throng_lanes::primitive_lane::build_mesh;
use throng_lanes::shading_lane::{
    plan_material, DefaultList, ShadingPlan, DEFAULT_RENDER_UTILITY_LIST, DEFAULT_SHADER_LIST,
    DEFAULT_TEXTURE_LIST, PLACEMENT_CONNECTIONS,
};
use throng_lanes::skin_lane::{partition_chunks, weight_list_entries};

/// Owns the master caches and holding groups of one import pass.
///
/// The engine is created at the start of a pass and consumed by
/// [`cleanup`](BuildCache::cleanup) at its end; masters are never shared
/// between passes.
#[derive(Debug)]
pub struct BuildCache {
    config: BuildConfig,
    geometry: MasterCache<GeometryKey, GeometryMaster>,
    primitives: MasterCache<PrimitiveKey, NodeHandle>,
    materials: MasterCache<MaterialKey, NodeHandle>,
    clusters: MasterCache<ClusterKey, NodeHandle>,
    masters_group: Option<NodeHandle>,
    primitive_group: Option<NodeHandle>,
    pending_shading: Vec<NodeHandle>,
}

impl BuildCache {
    /// Creates an empty engine.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            geometry: MasterCache::new(),
            primitives: MasterCache::new(),
            materials: MasterCache::new(),
            clusters: MasterCache::new(),
            masters_group: None,
            primitive_group: None,
            pending_shading: Vec::new(),
        }
    }

    /// Returns the configuration of the pass.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Returns the primitive instances whose shading is applied at cleanup.
    pub fn pending_shading(&self) -> &[NodeHandle] {
        &self.pending_shading
    }

    /// Returns `true` if copies of `geometry` must accept a skin cluster.
    pub fn is_skinnable(&self, geometry: &Geometry) -> bool {
        self.config.skin_type == SkinType::Smooth
            && !geometry.is_attached()
            && !geometry.weights().is_empty()
    }

    /// Returns the current statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            geometry: CacheCounts::of(&self.geometry),
            primitives: CacheCounts::of(&self.primitives),
            materials: CacheCounts::of(&self.materials),
            clusters: CacheCounts::of(&self.clusters),
            deferred_shading: self.pending_shading.len(),
        }
    }

    /// Gives an agent its own copy of a geometry, under `target`.
    ///
    /// The file is imported once per key; every call then copies the master
    /// exactly once.
    ///
    /// # Errors
    /// Host failures are returned unchanged. Nothing is cached for a key
    /// whose master failed to build.
    pub fn import_geometry<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        geometry: &Geometry,
        agent_type: &str,
        target: &NodeHandle,
    ) -> CrowdResult<GeometryCopy> {
        let key = GeometryKey::new(agent_type, &geometry.file, self.config.skin_type);

        if self.geometry.get(&key).is_some() {
            log::debug!("Geometry master '{key}' reused for '{}'", geometry.name);
        } else {
            let master = self.build_geometry_master(scene, geometry)?;
            log::info!("Geometry master '{key}' created");
            self.geometry.put(key.clone(), master);
        }

        let skinnable = self.is_skinnable(geometry);
        let master = self.geometry.peek(&key).ok_or_else(|| {
            CrowdError::ModelIntegrity(format!("geometry master '{key}' is missing"))
        })?;
        Ok(master.copy(scene, target, &geometry.name, skinnable)?)
    }

    fn build_geometry_master<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        geometry: &Geometry,
    ) -> CrowdResult<GeometryMaster> {
        let holder = self.masters_group(scene)?;
        // Skin weights index vertices across the whole file.
        let chunked = self.config.skin_type == SkinType::Chunked
            && !geometry.is_attached()
            && !geometry.weights().is_empty();
        let options = if chunked {
            ImportOptions::merged(&geometry.name)
        } else {
            ImportOptions::grouped(&geometry.name)
        };
        let group = scene.import_mesh_file(&geometry.file, &options)?;
        adopt(scene, &group, &holder)?;

        let meshes = scene.list_descendants(&group, Some(NodeKind::Mesh))?;
        for mesh in &meshes {
            scene.soften_edges(mesh, self.config.soft_edge_angle)?;
        }

        let mut chunk_deformers = vec![None; scene.list_children(&group)?.len()];
        if chunked {
            let source = match meshes.as_slice() {
                [source] => source,
                _ => {
                    return Err(CrowdError::ModelIntegrity(format!(
                        "geometry '{}' has weights but '{}' holds {} meshes after merging",
                        geometry.name,
                        geometry.file.display(),
                        meshes.len()
                    )))
                }
            };
            for chunk in partition_chunks(geometry.weights(), geometry.deformers()) {
                let name = format!("{}_{}", geometry.name, chunk.name);
                scene.split_mesh(source, &name, &chunk.vertices)?;
                chunk_deformers.push(Some(chunk.name));
            }
        }

        Ok(GeometryMaster {
            group,
            chunk_deformers,
        })
    }

    /// Builds the primitive of a joint and returns the agent's copy, at the
    /// world root and named `name`.
    ///
    /// With `instance`, the copy is a new transform sharing the master's
    /// shapes. Shared shapes carry no shading of their own; they are
    /// assigned the default shading group in one operation at cleanup.
    ///
    /// # Errors
    /// Returns [`CrowdError::ModelIntegrity`] for a primitive with invalid
    /// dimensions, and host failures unchanged.
    pub fn build_primitive<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        agent_type: &str,
        primitive: &Primitive,
        name: &str,
        instance: bool,
    ) -> CrowdResult<NodeHandle> {
        let key = PrimitiveKey::new(agent_type, &primitive.joint);

        let master = match self.primitives.get(&key).copied() {
            Some(master) => {
                log::debug!("Primitive master '{key}' reused");
                master
            }
            None => {
                let mesh = build_mesh(primitive)
                    .map_err(|err| CrowdError::ModelIntegrity(err.to_string()))?;
                let holder = self.primitive_group(scene)?;
                let master = scene.create_mesh(primitive.shape.kind_name(), &mesh)?;
                adopt(scene, &master, &holder)?;
                let master = scene.rename(&master, &key.to_string())?;
                log::info!("Primitive master '{key}' created");
                self.primitives.put(key, master);
                master
            }
        };

        let copy = if instance {
            let copy = scene.duplicate(&master, DuplicateOptions::PARENT_ONLY)?;
            scene.reparent(&copy, None, ReparentOptions::RELATIVE)?;
            for shape in scene.list_descendants(&master, Some(NodeKind::Mesh))? {
                scene.reparent(&shape, Some(&copy), ReparentOptions::INSTANCE_NO_CONNECTIONS)?;
            }
            self.pending_shading.push(copy);
            copy
        } else {
            let copy = scene.duplicate(&master, DuplicateOptions::FULL)?;
            scene.reparent(&copy, None, ReparentOptions::RELATIVE)?;
            copy
        };
        Ok(scene.rename(&copy, name)?)
    }

    /// Returns the shading group of a material, building its network on the
    /// first request.
    pub fn build_material<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        material: &Material,
    ) -> CrowdResult<NodeHandle> {
        let key = MaterialKey::from(material);
        if let Some(group) = self.materials.get(&key).copied() {
            log::debug!("Shading group for '{key}' reused by material '{}'", material.name);
            return Ok(group);
        }

        let plan = plan_material(material, self.config.shader_kind);
        let group = build_shading_network(scene, &plan)?;
        log::info!("Shading group '{}' created for '{key}'", plan.group_node);
        self.materials.put(key, group);
        Ok(group)
    }

    /// Fills the weight list of a skin cluster bound to a copy of `geometry`.
    ///
    /// The first cluster of a file gets its weights set one by one and a
    /// holder node keeps a snapshot of them. Later clusters copy the
    /// snapshot with a single connection that is broken right away.
    pub fn set_cluster_weights<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        geometry: &Geometry,
        cluster: &NodeHandle,
    ) -> CrowdResult<()> {
        let key = ClusterKey::new(&geometry.file);
        let normalize = cluster.attr("normalizeWeights");
        scene.set_attribute(&normalize, AttrValue::Int(0))?;

        match self.clusters.get(&key).copied() {
            Some(holder) => {
                let src = holder.attr("weightList");
                let dst = cluster.attr("weightList");
                scene.connect_attribute(&src, &dst, ConnectOptions::default())?;
                scene.disconnect_attribute(&src, &dst)?;
                log::debug!("Skin weights of '{key}' copied from holder");
            }
            None => {
                for (attr, weight) in weight_list_entries(geometry.weights()) {
                    scene.set_attribute(&cluster.attr(attr), AttrValue::Float(weight))?;
                }
                let holder = scene
                    .create_node(NodeKind::SkinCluster, &format!("{}WeightHolder", geometry.name))?;
                let src = cluster.attr("weightList");
                let dst = holder.attr("weightList");
                let snapshot = scene
                    .connect_attribute(&src, &dst, ConnectOptions::default())
                    .and_then(|()| scene.disconnect_attribute(&src, &dst));
                if let Err(err) = snapshot {
                    discard(scene, &holder);
                    return Err(err.into());
                }
                log::info!("Skin weights of '{key}' uploaded");
                self.clusters.put(key, holder);
            }
        }

        scene.set_attribute(&normalize, AttrValue::Int(1))?;
        Ok(())
    }

    /// Ends the pass: resolves deferred shading, then removes the holding
    /// groups and weight holders.
    ///
    /// The primitive group is kept when instances share its shapes.
    pub fn cleanup<S: SceneGraph + ?Sized>(self, scene: &mut S) -> CrowdResult<CacheStats> {
        let stats = self.stats();

        match self.primitive_group {
            Some(group) if !self.pending_shading.is_empty() => {
                let shapes = scene.list_descendants(&group, Some(NodeKind::Mesh))?;
                let shading_group = scene.find_node(&self.config.default_shading_group)?;
                scene.assign_shading_group(&shapes, &shading_group)?;
            }
            Some(group) => scene.delete(&group)?,
            None => {}
        }
        if let Some(group) = self.masters_group {
            scene.delete(&group)?;
        }
        for holder in self.clusters.masters() {
            scene.delete(holder)?;
        }

        log::info!("Crowd import pass finished:\n{stats}");
        Ok(stats)
    }

    fn masters_group<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) -> CrowdResult<NodeHandle> {
        if let Some(group) = self.masters_group {
            return Ok(group);
        }
        let group = scene.create_empty_group(&self.config.geometry_masters_group)?;
        self.masters_group = Some(group);
        Ok(group)
    }

    fn primitive_group<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
    ) -> CrowdResult<NodeHandle> {
        if let Some(group) = self.primitive_group {
            return Ok(group);
        }
        let group = scene.create_empty_group(&self.config.primitive_group)?;
        scene.set_attribute(&group.attr("visibility"), AttrValue::Bool(false))?;
        self.primitive_group = Some(group);
        Ok(group)
    }
}

/// Creates the nodes of a shading plan and returns its shading group.
fn build_shading_network<S: SceneGraph + ?Sized>(
    scene: &mut S,
    plan: &ShadingPlan,
) -> CrowdResult<NodeHandle> {
    let shader = scene.create_node(NodeKind::Shader(plan.kind), &plan.shader_node)?;
    register(scene, &shader, DEFAULT_SHADER_LIST)?;
    let group = scene.create_node(NodeKind::ShadingGroup, &plan.group_node)?;
    scene.connect_attribute(
        &shader.attr("outColor"),
        &group.attr("surfaceShader"),
        ConnectOptions::FORCE,
    )?;
    for (attr, value) in &plan.shader_attributes {
        scene.set_attribute(&shader.attr(*attr), value.clone())?;
    }

    if let Some(texture) = &plan.texture {
        let file = scene.create_node(NodeKind::FileTexture, &texture.file_node)?;
        register(scene, &file, DEFAULT_TEXTURE_LIST)?;
        let place = scene.create_node(NodeKind::Place2dTexture, &texture.place_node)?;
        register(scene, &place, DEFAULT_RENDER_UTILITY_LIST)?;

        for (src, dst) in PLACEMENT_CONNECTIONS {
            scene.connect_attribute(&place.attr(src), &file.attr(dst), ConnectOptions::FORCE)?;
        }
        scene.connect_attribute(
            &file.attr("outColor"),
            &shader.attr("color"),
            ConnectOptions::FORCE,
        )?;
        scene.set_attribute(
            &file.attr("fileTextureName"),
            AttrValue::String(texture.path.clone()),
        )?;
    }
    Ok(group)
}

/// Appends a node's `message` to a default list.
fn register<S: SceneGraph + ?Sized>(
    scene: &mut S,
    node: &NodeHandle,
    list: DefaultList,
) -> CrowdResult<()> {
    let list_node = scene.find_node(list.node)?;
    scene.connect_attribute(
        &node.attr("message"),
        &list_node.attr(list.attr),
        ConnectOptions::NEXT_AVAILABLE,
    )?;
    Ok(())
}

/// Moves a freshly created master under its holding group, deleting it if
/// the move fails so nothing is left at the world root.
fn adopt<S: SceneGraph + ?Sized>(
    scene: &mut S,
    node: &NodeHandle,
    holder: &NodeHandle,
) -> CrowdResult<()> {
    if let Err(err) = scene.reparent(node, Some(holder), ReparentOptions::RELATIVE) {
        discard(scene, node);
        return Err(err.into());
    }
    Ok(())
}

/// Deletes a node left over by a failed step. The original error wins.
fn discard<S: SceneGraph + ?Sized>(scene: &mut S, node: &NodeHandle) {
    if let Err(err) = scene.delete(node) {
        log::warn!("Could not remove {node} after a failed step: {err}");
    }
}
