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

//! The agent-type description aggregate.
//!
//! A [`Description`] is built once per agent type by a [`DescriptionBuilder`]
//! and then shared read-only, usually behind an `Arc`, by every agent of
//! that type.

mod builder;

pub use builder::*;

use crate::geodb::GeoDb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use throng_core::description::{Action, Joint, Material, MaterialId, Variable};
use throng_core::error::{CrowdError, CrowdResult, LookupKind};

/// Everything known about one agent type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    pub(crate) agent_type: String,
    pub(crate) cdl: Option<PathBuf>,
    pub(crate) scale_var: Option<String>,
    pub(crate) geo_db: GeoDb,
    pub(crate) materials: Vec<Material>,
    pub(crate) joints: Vec<Joint>,
    pub(crate) joint_index: HashMap<String, usize>,
    pub(crate) actions: HashMap<String, Action>,
    pub(crate) variables: HashMap<String, Variable>,
}

impl Description {
    /// Returns the agent type name.
    pub fn agent_type(&self) -> &str {
        &self.agent_type
    }

    /// Returns the path of the file the description was read from.
    pub fn cdl(&self) -> Option<&Path> {
        self.cdl.as_deref()
    }

    /// Returns the variable that scales the whole agent.
    pub fn scale_var(&self) -> Option<&str> {
        self.scale_var.as_deref()
    }

    /// Returns the geometry registry.
    pub fn geo_db(&self) -> &GeoDb {
        &self.geo_db
    }

    /// Returns the materials in declaration order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Returns the material with the given id.
    pub fn material_by_id(&self, id: MaterialId) -> CrowdResult<&Material> {
        self.materials
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| CrowdError::unknown(LookupKind::Material, id.to_string()))
    }

    /// Returns the joints, parents before children.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Returns the joint with the given name.
    pub fn joint(&self, name: &str) -> CrowdResult<&Joint> {
        self.joint_index
            .get(name)
            .map(|index| &self.joints[*index])
            .ok_or_else(|| CrowdError::unknown(LookupKind::Joint, name))
    }

    /// Returns the variable with the given name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Returns all variables by name.
    pub fn variables(&self) -> &HashMap<String, Variable> {
        &self.variables
    }

    /// Returns the action with the given name.
    pub fn action(&self, name: &str) -> CrowdResult<&Action> {
        self.actions
            .get(name)
            .ok_or_else(|| CrowdError::unknown(LookupKind::Action, name))
    }

    /// Returns all actions by name.
    pub fn actions(&self) -> &HashMap<String, Action> {
        &self.actions
    }
}
