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

//! The contract between the crowd importer and the host scene graph.
//!
//! The host is treated as an opaque, imperative service: every call is
//! blocking, applied in order, and has side effects that cannot be safely
//! retried. Concrete hosts live in other crates (see `throng-infra`).

mod error;
mod handle;
mod mesh;
mod options;

pub use error::*;
pub use handle::*;
pub use mesh::*;
pub use options::*;

use std::path::Path;

/// The operations the importer needs from a host scene graph.
///
/// Handles returned by one call stay valid until the node is deleted, even
/// across renames and reparenting.
pub trait SceneGraph {
    /// Creates an empty transform at the world root.
    fn create_empty_group(&mut self, name: &str) -> SceneResult<NodeHandle>;

    /// Creates a dependency node (shader, texture, deformer, ...) or a joint.
    fn create_node(&mut self, kind: NodeKind, name: &str) -> SceneResult<NodeHandle>;

    /// Creates a polygon mesh from a description, returning its transform.
    fn create_mesh(&mut self, name: &str, mesh: &MeshDescription) -> SceneResult<NodeHandle>;

    /// Imports a mesh file under a new top-level group and returns that group.
    fn import_mesh_file(&mut self, path: &Path, options: &ImportOptions)
        -> SceneResult<NodeHandle>;

    /// Duplicates a node next to the original.
    fn duplicate(&mut self, node: &NodeHandle, options: DuplicateOptions)
        -> SceneResult<NodeHandle>;

    /// Moves a node under a new parent, or under the world root if `parent` is `None`.
    fn reparent(
        &mut self,
        node: &NodeHandle,
        parent: Option<&NodeHandle>,
        options: ReparentOptions,
    ) -> SceneResult<NodeHandle>;

    /// Connects two attributes.
    fn connect_attribute(
        &mut self,
        src: &AttrPath,
        dst: &AttrPath,
        options: ConnectOptions,
    ) -> SceneResult<()>;

    /// Breaks a connection made by [`connect_attribute`](SceneGraph::connect_attribute).
    fn disconnect_attribute(&mut self, src: &AttrPath, dst: &AttrPath) -> SceneResult<()>;

    /// Sets the value of an attribute.
    fn set_attribute(&mut self, target: &AttrPath, value: AttrValue) -> SceneResult<()>;

    /// Renames a node.
    fn rename(&mut self, node: &NodeHandle, new_name: &str) -> SceneResult<NodeHandle>;

    /// Deletes a node and everything below it.
    fn delete(&mut self, node: &NodeHandle) -> SceneResult<()>;

    /// Returns the direct children of a node.
    fn list_children(&self, node: &NodeHandle) -> SceneResult<Vec<NodeHandle>>;

    /// Returns every node below `node`, optionally filtered by kind.
    fn list_descendants(
        &self,
        node: &NodeHandle,
        kind: Option<NodeKind>,
    ) -> SceneResult<Vec<NodeHandle>>;

    /// Looks up a node by its name.
    fn find_node(&self, name: &str) -> SceneResult<NodeHandle>;

    /// Smooths the normals of a mesh for edges under `angle` degrees.
    fn soften_edges(&mut self, mesh: &NodeHandle, angle: f32) -> SceneResult<()>;

    /// Moves the faces touching `vertices` out of a mesh shape into a new mesh,
    /// returning the new transform, which is placed next to the source's.
    fn split_mesh(
        &mut self,
        mesh: &NodeHandle,
        name: &str,
        vertices: &[usize],
    ) -> SceneResult<NodeHandle>;

    /// Makes `members` render with the given shading group, in one operation.
    fn assign_shading_group(
        &mut self,
        members: &[NodeHandle],
        group: &NodeHandle,
    ) -> SceneResult<()>;
}
