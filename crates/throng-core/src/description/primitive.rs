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

//! Defines the procedural shapes attached to skeleton joints.

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// The closed set of procedural shapes, each with its own size payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrimitiveShape {
    /// A capped cylinder.
    Tube {
        /// Radius of the cross-section.
        radius: f32,
        /// Length along the primitive axis.
        length: f32,
    },
    /// A sphere.
    Sphere {
        /// Radius of the sphere.
        radius: f32,
    },
    /// An axis-aligned box.
    Box {
        /// Extent along X, Y and Z.
        size: [f32; 3],
    },
    /// A flat cylinder.
    Disc {
        /// Radius of the disc.
        radius: f32,
        /// Thickness along the primitive axis.
        length: f32,
    },
}

impl PrimitiveShape {
    /// A unit tube.
    pub const TUBE: Self = PrimitiveShape::Tube {
        radius: 1.0,
        length: 1.0,
    };
    /// A unit sphere.
    pub const SPHERE: Self = PrimitiveShape::Sphere { radius: 1.0 };
    /// A unit box.
    pub const BOX: Self = PrimitiveShape::Box {
        size: [1.0, 1.0, 1.0],
    };
    /// A unit disc.
    pub const DISC: Self = PrimitiveShape::Disc {
        radius: 1.0,
        length: 1.0,
    };

    /// Returns the lowercase name of the shape.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PrimitiveShape::Tube { .. } => "tube",
            PrimitiveShape::Sphere { .. } => "sphere",
            PrimitiveShape::Box { .. } => "box",
            PrimitiveShape::Disc { .. } => "disc",
        }
    }
}

/// A procedural shape owned by a joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Name of the owning joint.
    pub joint: String,
    /// Local rotation in degrees.
    pub rotate: Vec3,
    /// Which local axes the shape is aligned to.
    pub axis: [bool; 3],
    /// Local offset of the shape's centre.
    pub centre: Vec3,
    /// The shape and its size.
    pub shape: PrimitiveShape,
}

impl Primitive {
    /// Creates a primitive with no rotation or offset, aligned to Y.
    pub fn new(joint: impl Into<String>, shape: PrimitiveShape) -> Self {
        Self {
            joint: joint.into(),
            rotate: Vec3::ZERO,
            axis: [false, true, false],
            centre: Vec3::ZERO,
            shape,
        }
    }

    /// Returns the index of the first enabled axis, defaulting to Y.
    pub fn main_axis(&self) -> usize {
        self.axis.iter().position(|enabled| *enabled).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_axis() {
        let mut prim = Primitive::new("neck", PrimitiveShape::TUBE);
        assert_eq!(prim.main_axis(), 1);
        prim.axis = [true, false, true];
        assert_eq!(prim.main_axis(), 0);
        prim.axis = [false; 3];
        assert_eq!(prim.main_axis(), 1);
    }

    #[test]
    fn test_shape_serializes_with_tag() {
        let text = ron::to_string(&PrimitiveShape::Sphere { radius: 2.0 }).unwrap();
        let back: PrimitiveShape = ron::from_str(&text).unwrap();
        assert_eq!(back.kind_name(), "sphere");
    }
}
