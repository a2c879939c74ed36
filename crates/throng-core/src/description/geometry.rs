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

//! Defines geometry records and the option slots that choose between them.

use super::MaterialId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Numeric identifier of a geometry within its agent type.
pub type GeometryId = u32;

/// A single deformer influence on a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    /// Index into [`SkinWeights::deformers`].
    pub deformer: usize,
    /// Weight of the influence.
    pub weight: f32,
}

/// Per-vertex skinning weights of a geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinWeights {
    /// Names of the joints that deform the mesh.
    pub deformers: Vec<String>,
    /// One influence list per vertex, in vertex order.
    pub weights: Vec<Vec<Influence>>,
}

/// A mesh of an agent type, loaded from a file on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Name, unique within the agent type.
    pub name: String,
    /// Path of the source mesh file.
    pub file: PathBuf,
    /// Identifier, unique within the agent type.
    pub id: GeometryId,
    /// The material applied to the whole mesh.
    pub material: MaterialId,
    /// Skinning weights, when the mesh is deformed by the skeleton.
    pub skin: Option<SkinWeights>,
    /// Name of the joint the mesh is rigidly attached to, if any.
    pub attach: Option<String>,
}

impl Geometry {
    /// Creates a geometry with the default material and no skinning.
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>, id: GeometryId) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            id,
            material: 1,
            skin: None,
            attach: None,
        }
    }

    /// Returns the deformer names, or an empty slice without skinning.
    pub fn deformers(&self) -> &[String] {
        self.skin.as_ref().map_or(&[], |s| s.deformers.as_slice())
    }

    /// Returns the per-vertex weights, or an empty slice without skinning.
    pub fn weights(&self) -> &[Vec<Influence>] {
        self.skin.as_ref().map_or(&[], |s| s.weights.as_slice())
    }

    /// Returns `true` if the geometry is bound directly to a joint instead of
    /// being skinned.
    pub fn is_attached(&self) -> bool {
        self.attach.is_some()
    }
}

/// A named slot that is filled by one of several candidate geometries,
/// depending on the value of a per-agent variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryOption {
    /// Name of the slot.
    pub name: String,
    /// The variable whose value picks a candidate.
    pub var: String,
    /// Candidate geometry ids, indexed by the variable value.
    pub inputs: Vec<GeometryId>,
}

impl GeometryOption {
    /// Creates an option slot.
    pub fn new(name: impl Into<String>, var: impl Into<String>, inputs: Vec<GeometryId>) -> Self {
        Self {
            name: name.into(),
            var: var.into(),
            inputs,
        }
    }
}
