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

use super::AgentInstance;
use crate::build_cache::{BuildCache, CacheStats, GeometryCopy, GeometryKey};
use crate::config::BuildConfig;
use anyhow::{anyhow, Context, Result};
use std::collections::{HashMap, HashSet};
use throng_core::description::{Geometry, VariableSource};
use throng_core::scene::{
    AttrValue, ConnectOptions, NodeHandle, NodeKind, ReparentOptions, SceneGraph,
};
use throng_data::description::Description;

/// Builds agents of any type into a host scene, sharing one build cache
/// across the whole import pass.
#[derive(Debug)]
pub struct CrowdAgent {
    cache: BuildCache,
    built: usize,
}

impl CrowdAgent {
    /// Starts an import pass.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            cache: BuildCache::new(config),
            built: 0,
        }
    }

    /// Returns the configuration of the pass.
    pub fn config(&self) -> &BuildConfig {
        self.cache.config()
    }

    /// Returns the cache statistics so far.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Returns the number of agents built so far.
    pub fn built(&self) -> usize {
        self.built
    }

    /// Builds one agent and returns its top-level group.
    ///
    /// The subtree holds the skeleton, the joint primitives and a `geometry`
    /// group with the agent's resolved geometry, shaded and bound.
    pub fn build<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        agent: &AgentInstance,
    ) -> Result<NodeHandle> {
        let description = agent.description();
        let name = agent.name();
        let agent_type = description.agent_type();

        let root = scene
            .create_empty_group(&name)
            .with_context(|| format!("Failed to create the group of agent '{name}'"))?;
        if let Some(var) = description.scale_var() {
            let scale = agent.variable_value(var);
            scene.set_attribute(&root.attr("scale"), AttrValue::Float3([scale; 3]))?;
        }

        let joints = self
            .build_skeleton(scene, description, &root)
            .with_context(|| format!("Failed to build the skeleton of agent '{name}'"))?;
        self.build_primitives(scene, description, &joints)
            .with_context(|| format!("Failed to build the primitives of agent '{name}'"))?;

        let geometry_group = scene.create_empty_group("geometry")?;
        scene.reparent(&geometry_group, Some(&root), ReparentOptions::RELATIVE)?;

        let mut seen = HashSet::new();
        for geometry in description.geo_db().resolve(agent) {
            let geometry = geometry.with_context(|| {
                format!("Failed to resolve the geometry of agent '{name}' ({agent_type})")
            })?;
            if !seen.insert(geometry.id) {
                continue;
            }
            self.build_geometry(scene, description, geometry, &geometry_group, &joints)
                .with_context(|| {
                    let key =
                        GeometryKey::new(agent_type, &geometry.file, self.config().skin_type);
                    format!(
                        "Failed to build geometry '{}' of agent '{}' ({agent_type}), key '{key}'",
                        geometry.name,
                        agent.id()
                    )
                })?;
        }

        self.built += 1;
        log::debug!("Agent '{name}' built");
        Ok(root)
    }

    /// Builds every agent in order, stopping at the first failure.
    pub fn build_all<'a, S, I>(&mut self, scene: &mut S, agents: I) -> Result<Vec<NodeHandle>>
    where
        S: SceneGraph + ?Sized,
        I: IntoIterator<Item = &'a AgentInstance>,
    {
        let mut roots = Vec::new();
        for agent in agents {
            roots.push(self.build(scene, agent)?);
        }
        Ok(roots)
    }

    /// Ends the pass and returns its statistics.
    pub fn cleanup<S: SceneGraph + ?Sized>(self, scene: &mut S) -> Result<CacheStats> {
        let built = self.built;
        self.cache
            .cleanup(scene)
            .with_context(|| format!("Failed to clean up after building {built} agents"))
    }

    fn build_skeleton<S: SceneGraph + ?Sized>(
        &self,
        scene: &mut S,
        description: &Description,
        root: &NodeHandle,
    ) -> Result<HashMap<String, NodeHandle>> {
        let mut joints = HashMap::with_capacity(description.joints().len());
        for joint in description.joints() {
            let node = scene.create_node(NodeKind::Joint, &joint.name)?;
            let parent = if joint.is_root() {
                *root
            } else {
                *joints
                    .get(&joint.parent)
                    .ok_or_else(|| anyhow!("joint '{}' has no parent '{}'", joint.name, joint.parent))?
            };
            scene.reparent(&node, Some(&parent), ReparentOptions::RELATIVE)?;
            scene.set_attribute(
                &node.attr("translate"),
                AttrValue::Float3(joint.rest_translation()),
            )?;
            joints.insert(joint.name.clone(), node);
        }
        Ok(joints)
    }

    fn build_primitives<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        description: &Description,
        joints: &HashMap<String, NodeHandle>,
    ) -> Result<()> {
        let instance = self.config().instance_primitives;
        for joint in description.joints() {
            let Some(primitive) = &joint.primitive else {
                continue;
            };
            let name = format!("{}Primitive", joint.name);
            let node = self
                .cache
                .build_primitive(scene, description.agent_type(), primitive, &name, instance)
                .with_context(|| {
                    format!("Failed to build primitive '{}_{}'", joint.agent_type, joint.name)
                })?;
            let parent = joint_handle(joints, &joint.name)?;
            scene.reparent(&node, Some(&parent), ReparentOptions::RELATIVE)?;
        }
        Ok(())
    }

    fn build_geometry<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        description: &Description,
        geometry: &Geometry,
        target: &NodeHandle,
        joints: &HashMap<String, NodeHandle>,
    ) -> Result<()> {
        let copy = self
            .cache
            .import_geometry(scene, geometry, description.agent_type(), target)?;

        let material = description.material_by_id(geometry.material)?;
        let shading_group = self.cache.build_material(scene, material).with_context(|| {
            format!("Failed to build material '{}'", material.name)
        })?;
        let shapes: Vec<NodeHandle> = copy.shapes().copied().collect();
        if !shapes.is_empty() {
            scene.assign_shading_group(&shapes, &shading_group)?;
        }

        if let Some(attach) = &geometry.attach {
            let joint = joint_handle(joints, attach)?;
            scene.reparent(&copy.root, Some(&joint), ReparentOptions::RELATIVE)?;
            return Ok(());
        }

        for part in &copy.parts {
            let Some(deformer) = &part.deformer else {
                continue;
            };
            match joints.get(deformer) {
                Some(joint) => {
                    scene.reparent(&part.transform, Some(joint), ReparentOptions::RELATIVE)?;
                }
                None => log::warn!(
                    "Chunk '{deformer}' of geometry '{}' has no joint, left unbound",
                    geometry.name
                ),
            }
        }

        if self.cache.is_skinnable(geometry) {
            self.bind_skin(scene, geometry, &copy, joints)?;
        }
        Ok(())
    }

    fn bind_skin<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
        geometry: &Geometry,
        copy: &GeometryCopy,
        joints: &HashMap<String, NodeHandle>,
    ) -> Result<()> {
        let cluster = scene.create_node(NodeKind::SkinCluster, &format!("{}Skin", geometry.name))?;
        for (index, deformer) in geometry.deformers().iter().enumerate() {
            let joint = joint_handle(joints, deformer)?;
            scene.connect_attribute(
                &joint.attr("worldMatrix"),
                &cluster.attr(format!("matrix[{index}]")),
                ConnectOptions::default(),
            )?;
        }
        for (index, shape) in copy.shapes().enumerate() {
            scene.connect_attribute(
                &cluster.attr(format!("outputGeometry[{index}]")),
                &shape.attr("inMesh"),
                ConnectOptions::FORCE,
            )?;
        }
        self.cache
            .set_cluster_weights(scene, geometry, &cluster)
            .with_context(|| format!("Failed to set the skin weights of '{}'", geometry.name))?;
        Ok(())
    }
}

fn joint_handle(joints: &HashMap<String, NodeHandle>, name: &str) -> Result<NodeHandle> {
    joints
        .get(name)
        .copied()
        .ok_or_else(|| anyhow!("unknown joint '{name}'"))
}
