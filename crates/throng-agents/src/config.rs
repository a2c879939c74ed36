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

//! Configuration of a crowd import pass.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use throng_core::scene::ShaderKind;

/// How agent geometry is bound to its skeleton.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    /// One smooth skin cluster per geometry. Geometry is identical for every
    /// agent type using the same file.
    #[default]
    Smooth,
    /// The mesh is split into rigid pieces, one per dominant deformer. The
    /// split depends on the agent type.
    Chunked,
}

/// Options of one import pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Skin binding used for every geometry.
    pub skin_type: SkinType,
    /// Instance primitive shapes instead of copying them. Shading of the
    /// instances is applied once, at cleanup.
    pub instance_primitives: bool,
    /// Shader model of created materials.
    pub shader_kind: ShaderKind,
    /// Shading group assigned to instanced primitives at cleanup.
    pub default_shading_group: String,
    /// Name of the group holding geometry masters during the pass.
    pub geometry_masters_group: String,
    /// Name of the hidden group holding primitive masters.
    pub primitive_group: String,
    /// Edges under this angle, in degrees, get smoothed normals on import.
    pub soft_edge_angle: f32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            skin_type: SkinType::Smooth,
            instance_primitives: true,
            shader_kind: ShaderKind::Blinn,
            default_shading_group: "initialShadingGroup".to_string(),
            geometry_masters_group: "geometryMasters".to_string(),
            primitive_group: "msvPrimitives".to_string(),
            soft_edge_angle: 180.0,
        }
    }
}

impl BuildConfig {
    /// Parses a configuration from RON. Missing fields take their default.
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Parses a configuration from JSON. Missing fields take their default.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads a configuration file, picking the format from the extension
    /// (`.ron` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read build config '{}'", path.display()))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron(&text)
                .with_context(|| format!("Invalid RON in '{}'", path.display()))?,
            Some("json") => Self::from_json(&text)
                .with_context(|| format!("Invalid JSON in '{}'", path.display()))?,
            _ => bail!(
                "Unsupported build config format '{}', expected .ron or .json",
                path.display()
            ),
        };
        log::debug!("Loaded build config from '{}': {config:?}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty JSON.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write '{}'", path.as_ref().display()))?;
        Ok(())
    }
}
