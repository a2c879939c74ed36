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

//! Content keys of the four build caches.
//!
//! Each key spells out what makes two constructs interchangeable, so keys of
//! different caches cannot collide.

use crate::config::SkinType;
use std::fmt;
use std::path::{Path, PathBuf};
use throng_core::description::{Material, MaterialId};

/// Key of a geometry master.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKey {
    /// Smooth binding: the imported file is the same for every agent type.
    Shared {
        /// Source mesh file.
        file: PathBuf,
    },
    /// Chunked binding: each agent type splits the mesh its own way.
    PerType {
        /// Agent type that owns the split.
        agent_type: String,
        /// Source mesh file.
        file: PathBuf,
    },
}

impl GeometryKey {
    /// Builds the key of a file for an agent type under a binding.
    pub fn new(agent_type: &str, file: &Path, skin_type: SkinType) -> Self {
        match skin_type {
            SkinType::Smooth => GeometryKey::Shared {
                file: file.to_path_buf(),
            },
            SkinType::Chunked => GeometryKey::PerType {
                agent_type: agent_type.to_string(),
                file: file.to_path_buf(),
            },
        }
    }
}

impl fmt::Display for GeometryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryKey::Shared { file } => write!(f, "{}", file.display()),
            GeometryKey::PerType { agent_type, file } => {
                write!(f, "{agent_type}_{}", file.display())
            }
        }
    }
}

/// Key of a primitive master: one per joint of an agent type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimitiveKey {
    /// Agent type owning the joint.
    pub agent_type: String,
    /// Joint owning the primitive.
    pub joint: String,
}

impl PrimitiveKey {
    /// Builds the key of a joint's primitive.
    pub fn new(agent_type: &str, joint: &str) -> Self {
        Self {
            agent_type: agent_type.to_string(),
            joint: joint.to_string(),
        }
    }
}

impl fmt::Display for PrimitiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.agent_type, self.joint)
    }
}

/// Key of a shading group.
///
/// Only a color map makes shading vary between uses, so materials without
/// one are identified by id alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MaterialKey {
    /// A textured material, by color map path.
    ColorMap(String),
    /// An untextured material, by id.
    Id(MaterialId),
}

impl From<&Material> for MaterialKey {
    fn from(material: &Material) -> Self {
        match &material.color_map {
            Some(path) => MaterialKey::ColorMap(path.clone()),
            None => MaterialKey::Id(material.id),
        }
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialKey::ColorMap(path) => f.write_str(path),
            MaterialKey::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Key of a cached skin weight table: one per mesh file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterKey {
    /// Source mesh file.
    pub file: PathBuf,
}

impl ClusterKey {
    /// Builds the key of a mesh file.
    pub fn new(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
        }
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())
    }
}
