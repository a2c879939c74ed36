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

//! Defines the host-independent description of a triangle mesh.

use crate::math::Vec3;

/// A triangle mesh handed to [`SceneGraph::create_mesh`](super::SceneGraph::create_mesh).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshDescription {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals, one per position.
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
}

impl MeshDescription {
    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Maps every position and every normal through the given functions.
    pub fn transform(&mut self, position: impl Fn(Vec3) -> Vec3, normal: impl Fn(Vec3) -> Vec3) {
        for p in &mut self.positions {
            *p = position(*p);
        }
        for n in &mut self.normals {
            *n = normal(*n);
        }
    }

    /// Returns the component-wise minimum and maximum of the positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| {
            (
                Vec3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vec3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}
