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

use super::Description;
use crate::geodb::GeoDbBuilder;
use std::collections::HashMap;
use std::path::PathBuf;
use throng_core::description::{Action, Geometry, GeometryOption, Joint, Material, Variable};
use throng_core::error::{CrowdError, CrowdResult};

/// Accumulates the records of one agent type, then freezes them.
#[derive(Debug)]
pub struct DescriptionBuilder {
    agent_type: String,
    cdl: Option<PathBuf>,
    scale_var: Option<String>,
    geo_db: GeoDbBuilder,
    materials: Vec<Material>,
    joints: Vec<Joint>,
    actions: HashMap<String, Action>,
    variables: HashMap<String, Variable>,
}

impl DescriptionBuilder {
    /// Starts a description for the given agent type.
    pub fn new(agent_type: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            cdl: None,
            scale_var: None,
            geo_db: GeoDbBuilder::new(),
            materials: Vec::new(),
            joints: Vec::new(),
            actions: HashMap::new(),
            variables: HashMap::new(),
        }
    }

    /// Records the file the description is read from.
    pub fn cdl(mut self, path: impl Into<PathBuf>) -> Self {
        self.cdl = Some(path.into());
        self
    }

    /// Sets the variable that scales the whole agent.
    pub fn scale_var(mut self, name: impl Into<String>) -> Self {
        self.scale_var = Some(name.into());
        self
    }

    /// Adds a material. A material with the same id replaces the previous one.
    pub fn add_material(&mut self, material: Material) -> &mut Self {
        match self.materials.iter_mut().find(|m| m.id == material.id) {
            Some(existing) => *existing = material,
            None => self.materials.push(material),
        }
        self
    }

    /// Adds a geometry to the registry.
    pub fn add_geometry(&mut self, geometry: Geometry) -> &mut Self {
        self.geo_db.add_geometry(geometry);
        self
    }

    /// Adds an option slot over geometries already added.
    pub fn add_option(&mut self, option: GeometryOption) -> CrowdResult<&mut Self> {
        self.geo_db.add_option(option)?;
        Ok(self)
    }

    /// Adds a joint, taking ownership of it for this agent type.
    ///
    /// The parent is a name resolved by [`finish`](Self::finish), so it may be
    /// added later.
    pub fn add_joint(&mut self, mut joint: Joint) -> &mut Self {
        joint.agent_type = self.agent_type.clone();
        self.joints.push(joint);
        self
    }

    /// Adds an action, replacing one with the same name.
    pub fn add_action(&mut self, action: Action) -> &mut Self {
        self.actions.insert(action.name.clone(), action);
        self
    }

    /// Adds a variable, replacing one with the same name.
    pub fn add_variable(&mut self, variable: Variable) -> &mut Self {
        self.variables.insert(variable.name.clone(), variable);
        self
    }

    /// Returns a geometry added so far, by name.
    pub fn geometry_by_name(&self, name: &str) -> Option<&Geometry> {
        self.geo_db.geometry_by_name(name)
    }

    /// Validates the skeleton and freezes the description.
    ///
    /// Joints are reordered so that every parent precedes its children;
    /// siblings keep their insertion order.
    ///
    /// # Errors
    /// Returns [`CrowdError::ModelIntegrity`] if a joint name is used twice, if
    /// a joint's parent is never declared, or if the parents form a cycle.
    pub fn finish(mut self) -> CrowdResult<Description> {
        let mut declared = HashMap::with_capacity(self.joints.len());
        for (index, joint) in self.joints.iter().enumerate() {
            if declared.insert(joint.name.as_str(), index).is_some() {
                return Err(CrowdError::ModelIntegrity(format!(
                    "joint '{}' of '{}' is declared twice",
                    joint.name, self.agent_type
                )));
            }
        }
        for joint in self.joints.iter().filter(|j| !j.is_root()) {
            if !declared.contains_key(joint.parent.as_str()) {
                return Err(CrowdError::ModelIntegrity(format!(
                    "joint '{}' of '{}' has undeclared parent '{}'",
                    joint.name, self.agent_type, joint.parent
                )));
            }
        }

        let order = parents_first(&self.joints, &declared).ok_or_else(|| {
            CrowdError::ModelIntegrity(format!(
                "joints of '{}' have a parent cycle",
                self.agent_type
            ))
        })?;
        let mut slots: Vec<Option<Joint>> = self.joints.drain(..).map(Some).collect();
        self.joints = order.into_iter().filter_map(|i| slots[i].take()).collect();
        let joint_index: HashMap<String, usize> = self
            .joints
            .iter()
            .enumerate()
            .map(|(index, joint)| (joint.name.clone(), index))
            .collect();

        log::debug!(
            "Description '{}' built: {} materials, {} joints",
            self.agent_type,
            self.materials.len(),
            self.joints.len()
        );

        Ok(Description {
            agent_type: self.agent_type,
            cdl: self.cdl,
            scale_var: self.scale_var,
            geo_db: self.geo_db.finish(),
            materials: self.materials,
            joints: self.joints,
            joint_index,
            actions: self.actions,
            variables: self.variables,
        })
    }
}

/// Orders joint indices so parents come before children. Returns `None` if
/// some joints are never reached from a root, which means a cycle.
fn parents_first(joints: &[Joint], declared: &HashMap<&str, usize>) -> Option<Vec<usize>> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); joints.len()];
    let mut stack = Vec::new();
    for (index, joint) in joints.iter().enumerate() {
        match declared.get(joint.parent.as_str()) {
            Some(&parent) if !joint.is_root() => children[parent].push(index),
            _ => stack.push(index),
        }
    }

    stack.reverse();
    let mut order = Vec::with_capacity(joints.len());
    while let Some(index) = stack.pop() {
        order.push(index);
        stack.extend(children[index].iter().rev());
    }
    (order.len() == joints.len()).then_some(order)
}
