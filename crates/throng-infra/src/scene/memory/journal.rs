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

use std::path::PathBuf;
use throng_core::scene::{
    AttrPath, ConnectOptions, DuplicateOptions, NodeHandle, NodeKind, ReparentOptions,
};

/// One operation received by a [`MemoryScene`](super::MemoryScene), in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOp {
    /// `create_empty_group`.
    CreateGroup {
        /// The created group.
        node: NodeHandle,
        /// Requested name.
        name: String,
    },
    /// `create_node`.
    CreateNode {
        /// The created node.
        node: NodeHandle,
        /// Its kind.
        kind: NodeKind,
    },
    /// `create_mesh`.
    CreateMesh {
        /// The created transform.
        node: NodeHandle,
        /// Number of triangles of the mesh.
        triangles: usize,
    },
    /// `import_mesh_file`.
    Import {
        /// The imported file.
        path: PathBuf,
        /// The created group.
        group: NodeHandle,
    },
    /// `duplicate`.
    Duplicate {
        /// The copied node.
        source: NodeHandle,
        /// The copy.
        copy: NodeHandle,
        /// Options of the call.
        options: DuplicateOptions,
    },
    /// `reparent`.
    Reparent {
        /// The moved or instanced node.
        node: NodeHandle,
        /// The new parent, `None` for the world root.
        parent: Option<NodeHandle>,
        /// Options of the call.
        options: ReparentOptions,
    },
    /// `connect_attribute`.
    Connect {
        /// Source attribute.
        src: AttrPath,
        /// Destination attribute, after resolving `next_available`.
        dst: AttrPath,
        /// Options of the call.
        options: ConnectOptions,
    },
    /// `disconnect_attribute`.
    Disconnect {
        /// Source attribute.
        src: AttrPath,
        /// Destination attribute.
        dst: AttrPath,
    },
    /// `set_attribute`.
    SetAttribute {
        /// The written attribute.
        target: AttrPath,
    },
    /// `rename`.
    Rename {
        /// The renamed node.
        node: NodeHandle,
        /// Its new name.
        name: String,
    },
    /// `delete`.
    Delete {
        /// The deleted node.
        node: NodeHandle,
    },
    /// `soften_edges`.
    SoftenEdges {
        /// The mesh shape.
        mesh: NodeHandle,
    },
    /// `split_mesh`.
    SplitMesh {
        /// The source mesh shape.
        mesh: NodeHandle,
        /// The new transform.
        chunk: NodeHandle,
    },
    /// `assign_shading_group`.
    AssignShadingGroup {
        /// The assigned nodes.
        members: Vec<NodeHandle>,
        /// The shading group.
        group: NodeHandle,
    },
}

/// The kind of a [`SceneOp`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// [`SceneOp::CreateGroup`].
    CreateGroup,
    /// [`SceneOp::CreateNode`].
    CreateNode,
    /// [`SceneOp::CreateMesh`].
    CreateMesh,
    /// [`SceneOp::Import`].
    Import,
    /// [`SceneOp::Duplicate`].
    Duplicate,
    /// [`SceneOp::Reparent`].
    Reparent,
    /// [`SceneOp::Connect`].
    Connect,
    /// [`SceneOp::Disconnect`].
    Disconnect,
    /// [`SceneOp::SetAttribute`].
    SetAttribute,
    /// [`SceneOp::Rename`].
    Rename,
    /// [`SceneOp::Delete`].
    Delete,
    /// [`SceneOp::SoftenEdges`].
    SoftenEdges,
    /// [`SceneOp::SplitMesh`].
    SplitMesh,
    /// [`SceneOp::AssignShadingGroup`].
    AssignShadingGroup,
}

impl SceneOp {
    /// Returns the kind of the operation.
    pub fn kind(&self) -> OpKind {
        match self {
            SceneOp::CreateGroup { .. } => OpKind::CreateGroup,
            SceneOp::CreateNode { .. } => OpKind::CreateNode,
            SceneOp::CreateMesh { .. } => OpKind::CreateMesh,
            SceneOp::Import { .. } => OpKind::Import,
            SceneOp::Duplicate { .. } => OpKind::Duplicate,
            SceneOp::Reparent { .. } => OpKind::Reparent,
            SceneOp::Connect { .. } => OpKind::Connect,
            SceneOp::Disconnect { .. } => OpKind::Disconnect,
            SceneOp::SetAttribute { .. } => OpKind::SetAttribute,
            SceneOp::Rename { .. } => OpKind::Rename,
            SceneOp::Delete { .. } => OpKind::Delete,
            SceneOp::SoftenEdges { .. } => OpKind::SoftenEdges,
            SceneOp::SplitMesh { .. } => OpKind::SplitMesh,
            SceneOp::AssignShadingGroup { .. } => OpKind::AssignShadingGroup,
        }
    }

    /// Returns `true` for the creation of a surface shader.
    pub fn is_shader_creation(&self) -> bool {
        matches!(
            self,
            SceneOp::CreateNode {
                kind: NodeKind::Shader(_),
                ..
            }
        )
    }
}
