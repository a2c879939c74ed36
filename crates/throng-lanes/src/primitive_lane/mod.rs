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

//! Builds the procedural meshes of joint primitives.
//!
//! Every shape is generated around the origin with its length along +Y, then
//! turned onto the primitive's main axis, rotated by its local rotation and
//! moved to its centre.

mod generators;

use thiserror::Error;
use throng_core::description::{Primitive, PrimitiveShape};
use throng_core::math::Vec3;
use throng_core::scene::MeshDescription;

/// Number of segments around the circumference of round shapes.
pub const SEGMENTS: u32 = 16;
/// Number of rings from pole to pole of a sphere.
pub const RINGS: u32 = 8;

/// Errors raised when a primitive cannot be turned into a mesh.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// A size parameter is zero, negative, infinite or NaN.
    #[error("{shape} primitive of joint '{joint}' has invalid {param}: {value}")]
    InvalidDimension {
        /// The shape kind.
        shape: &'static str,
        /// The owning joint.
        joint: String,
        /// The offending parameter.
        param: &'static str,
        /// The offending value.
        value: f32,
    },
    /// The rotation or centre is not finite.
    #[error("primitive of joint '{0}' has a non-finite placement")]
    InvalidPlacement(String),
}

/// Builds the mesh of a primitive, in the local space of its joint.
///
/// # Errors
/// Returns [`MeshError`] for non-positive or non-finite dimensions and for a
/// non-finite rotation or centre.
pub fn build_mesh(primitive: &Primitive) -> Result<MeshDescription, MeshError> {
    validate(primitive)?;

    let mut mesh = match primitive.shape {
        PrimitiveShape::Tube { radius, length } | PrimitiveShape::Disc { radius, length } => {
            generators::cylinder(radius, length, SEGMENTS)
        }
        PrimitiveShape::Sphere { radius } => generators::sphere(radius, SEGMENTS, RINGS),
        PrimitiveShape::Box { size } => generators::cuboid(size),
    };

    let align = axis_alignment(primitive.main_axis());
    let rotate = primitive.rotate;
    let centre = primitive.centre;
    mesh.transform(
        |p| align(p).rotate_euler_degrees(rotate) + centre,
        |n| align(n).rotate_euler_degrees(rotate).normalize(),
    );
    Ok(mesh)
}

fn validate(primitive: &Primitive) -> Result<(), MeshError> {
    let shape = primitive.shape.kind_name();
    let check = |param: &'static str, value: f32| {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(MeshError::InvalidDimension {
                shape,
                joint: primitive.joint.clone(),
                param,
                value,
            })
        }
    };

    match primitive.shape {
        PrimitiveShape::Tube { radius, length } | PrimitiveShape::Disc { radius, length } => {
            check("radius", radius)?;
            check("length", length)?;
        }
        PrimitiveShape::Sphere { radius } => check("radius", radius)?,
        PrimitiveShape::Box { size } => {
            check("size.x", size[0])?;
            check("size.y", size[1])?;
            check("size.z", size[2])?;
        }
    }

    let placement = primitive.rotate.to_array().into_iter().chain(primitive.centre.to_array());
    if placement.into_iter().all(f32::is_finite) {
        Ok(())
    } else {
        Err(MeshError::InvalidPlacement(primitive.joint.clone()))
    }
}

/// Maps the generators' +Y length axis onto the given local axis.
fn axis_alignment(axis: usize) -> fn(Vec3) -> Vec3 {
    match axis {
        0 => |v: Vec3| Vec3::new(v.y, -v.x, v.z),
        2 => |v: Vec3| Vec3::new(v.x, -v.z, v.y),
        _ => |v: Vec3| v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn extent(mesh: &MeshDescription) -> Vec3 {
        let (lo, hi) = mesh.bounds().unwrap();
        hi - lo
    }

    #[test]
    fn test_tube_is_along_y_by_default() {
        let prim = Primitive::new(
            "spine",
            PrimitiveShape::Tube {
                radius: 0.5,
                length: 4.0,
            },
        );
        let mesh = build_mesh(&prim).unwrap();
        let size = extent(&mesh);
        assert_relative_eq!(size.y, 4.0, epsilon = 1e-5);
        assert_relative_eq!(size.x, 1.0, epsilon = 1e-5);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_main_axis_turns_the_shape() {
        let mut prim = Primitive::new(
            "arm",
            PrimitiveShape::Tube {
                radius: 0.5,
                length: 4.0,
            },
        );
        prim.axis = [true, false, false];
        let size = extent(&build_mesh(&prim).unwrap());
        assert_relative_eq!(size.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(size.y, 1.0, epsilon = 1e-5);

        prim.axis = [false, false, true];
        let size = extent(&build_mesh(&prim).unwrap());
        assert_relative_eq!(size.z, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_box_size_and_centre() {
        let mut prim = Primitive::new("hips", PrimitiveShape::Box { size: [2.0, 3.0, 4.0] });
        prim.centre = Vec3::new(10.0, 0.0, 0.0);
        let mesh = build_mesh(&prim).unwrap();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_relative_eq!(lo.x, 9.0, epsilon = 1e-5);
        assert_relative_eq!(hi.x, 11.0, epsilon = 1e-5);
        assert_relative_eq!(hi.y - lo.y, 3.0, epsilon = 1e-5);
        assert_relative_eq!(hi.z - lo.z, 4.0, epsilon = 1e-5);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let prim = Primitive::new("head", PrimitiveShape::Sphere { radius: 2.0 });
        let mesh = build_mesh(&prim).unwrap();
        for p in &mesh.positions {
            assert_relative_eq!(p.length(), 2.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_rotation_is_applied() {
        let mut prim = Primitive::new(
            "leg",
            PrimitiveShape::Tube {
                radius: 0.1,
                length: 2.0,
            },
        );
        prim.rotate = Vec3::new(0.0, 0.0, 90.0);
        let size = extent(&build_mesh(&prim).unwrap());
        assert_relative_eq!(size.x, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        let prim = Primitive::new("neck", PrimitiveShape::Sphere { radius: 0.0 });
        assert!(matches!(
            build_mesh(&prim),
            Err(MeshError::InvalidDimension { param: "radius", .. })
        ));

        let prim = Primitive::new(
            "neck",
            PrimitiveShape::Disc {
                radius: 1.0,
                length: f32::NAN,
            },
        );
        let err = build_mesh(&prim).unwrap_err();
        assert!(err.to_string().contains("length"));

        let mut prim = Primitive::new("neck", PrimitiveShape::BOX);
        prim.centre = Vec3::new(f32::INFINITY, 0.0, 0.0);
        assert_eq!(
            build_mesh(&prim),
            Err(MeshError::InvalidPlacement("neck".to_string()))
        );
    }
}
