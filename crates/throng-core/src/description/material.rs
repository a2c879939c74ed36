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

//! Defines the surface material record of an agent type.

use crate::math::{ColorSpace, Rgb};
use serde::{Deserialize, Serialize};

/// Numeric identifier of a material within its agent type.
pub type MaterialId = u32;

/// One color input of a material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorChannel {
    /// The constant color triple.
    pub color: Rgb,
    /// Per-component variable names that may override the constant.
    pub vars: [Option<String>; 3],
    /// The space the triple is expressed in.
    pub space: ColorSpace,
}

impl ColorChannel {
    /// Creates a channel with a constant color and no variable overrides.
    pub fn constant(color: Rgb) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

/// The shading description of a piece of agent geometry.
///
/// Only the presence of [`color_map`](Material::color_map) introduces
/// per-use shading variation; all other parameters are constant for a given
/// [`id`](Material::id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name, also used to name the host shader.
    pub name: String,
    /// Identifier referenced by [`Geometry::material`](super::Geometry::material).
    pub id: MaterialId,
    /// Optional path of the color texture.
    pub color_map: Option<String>,
    /// Specular color.
    pub specular: ColorChannel,
    /// Ambient color.
    pub ambient: ColorChannel,
    /// Diffuse color.
    pub diffuse: ColorChannel,
    /// Roughness scalar.
    pub roughness: f32,
    /// Variable that may override [`roughness`](Material::roughness).
    pub roughness_var: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: 0,
            color_map: None,
            specular: ColorChannel::default(),
            ambient: ColorChannel::default(),
            diffuse: ColorChannel::default(),
            roughness: 0.02,
            roughness_var: None,
        }
    }
}

impl Material {
    /// Creates a material with default shading parameters.
    pub fn new(name: impl Into<String>, id: MaterialId) -> Self {
        Self {
            name: name.into(),
            id,
            ..Default::default()
        }
    }

    /// Sets the color map, returning the modified material.
    pub fn with_color_map(mut self, path: impl Into<String>) -> Self {
        self.color_map = Some(path.into());
        self
    }
}
