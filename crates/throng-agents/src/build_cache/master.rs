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

use throng_core::scene::{
    DuplicateOptions, NodeHandle, NodeKind, ReparentOptions, SceneGraph, SceneResult,
};

/// An imported geometry kept hidden in the masters group, and the chunk
/// layout of its top-level objects.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryMaster {
    /// The group the file was imported into.
    pub group: NodeHandle,
    /// For each child of `group`, in order, the deformer driving it when the
    /// mesh was chunked.
    pub chunk_deformers: Vec<Option<String>>,
}

/// One top-level object of a geometry copy.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryPart {
    /// The object's transform.
    pub transform: NodeHandle,
    /// The mesh shapes below the transform.
    pub shapes: Vec<NodeHandle>,
    /// The deformer the part follows rigidly, for chunked binding.
    pub deformer: Option<String>,
}

/// A copy of a geometry master, owned by one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCopy {
    /// The copied group.
    pub root: NodeHandle,
    /// Its top-level objects.
    pub parts: Vec<GeometryPart>,
}

impl GeometryCopy {
    /// Iterates over every shape of the copy.
    pub fn shapes(&self) -> impl Iterator<Item = &NodeHandle> {
        self.parts.iter().flat_map(|p| p.shapes.iter())
    }
}

impl GeometryMaster {
    /// Copies the master under `parent` and names the copy `name`.
    ///
    /// A skinnable copy keeps its upstream connections so a deformer can be
    /// bound to it; other copies are plain.
    pub fn copy<S: SceneGraph + ?Sized>(
        &self,
        scene: &mut S,
        parent: &NodeHandle,
        name: &str,
        skinnable: bool,
    ) -> SceneResult<GeometryCopy> {
        let options = if skinnable {
            DuplicateOptions::FULL
        } else {
            DuplicateOptions::SHALLOW
        };
        let root = scene.duplicate(&self.group, options)?;
        scene.reparent(&root, Some(parent), ReparentOptions::RELATIVE)?;
        let root = scene.rename(&root, name)?;

        let mut parts = Vec::new();
        for (index, transform) in scene.list_children(&root)?.into_iter().enumerate() {
            let shapes = scene.list_descendants(&transform, Some(NodeKind::Mesh))?;
            let deformer = self.chunk_deformers.get(index).cloned().flatten();
            parts.push(GeometryPart {
                transform,
                shapes,
                deformer,
            });
        }
        Ok(GeometryCopy { root, parts })
    }
}
