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

//! Option structs for the scene operations that take flags.

/// Options for [`SceneGraph::import_mesh_file`](super::SceneGraph::import_mesh_file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Name of the group the imported nodes are placed under.
    pub group_name: String,
    /// Merge every object of the file into a single mesh.
    pub merge_objects: bool,
}

impl ImportOptions {
    /// Imports into a group with the given name, keeping objects separate.
    pub fn grouped(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            merge_objects: false,
        }
    }

    /// Imports into a group with the given name, as a single merged mesh.
    pub fn merged(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            merge_objects: true,
        }
    }
}

/// Options for [`SceneGraph::duplicate`](super::SceneGraph::duplicate).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateOptions {
    /// Copy only the node itself, none of its children or shapes.
    pub parent_only: bool,
    /// Also copy incoming connections and upstream history.
    pub full_copy: bool,
}

impl DuplicateOptions {
    /// A copy of the node without its children.
    pub const PARENT_ONLY: Self = Self {
        parent_only: true,
        full_copy: false,
    };
    /// A copy of the node, its children and their connections.
    pub const FULL: Self = Self {
        parent_only: false,
        full_copy: true,
    };
    /// A copy of the node and its children, without connections.
    pub const SHALLOW: Self = Self {
        parent_only: false,
        full_copy: false,
    };
}

/// Options for [`SceneGraph::reparent`](super::SceneGraph::reparent).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReparentOptions {
    /// Keep the local transform instead of the world transform.
    pub relative: bool,
    /// Add `parent` as an additional parent instead of moving the node.
    pub add_object: bool,
    /// Do not carry shading and other connections over to the new path.
    pub no_connections: bool,
}

impl ReparentOptions {
    /// Moves the node, keeping its local transform.
    pub const RELATIVE: Self = Self {
        relative: true,
        add_object: false,
        no_connections: false,
    };
    /// Instances the node under an additional parent, without connections.
    pub const INSTANCE_NO_CONNECTIONS: Self = Self {
        relative: true,
        add_object: true,
        no_connections: true,
    };
}

/// Options for [`SceneGraph::connect_attribute`](super::SceneGraph::connect_attribute).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Replace any existing incoming connection of the destination.
    pub force: bool,
    /// Connect into the next free element of a destination array.
    pub next_available: bool,
}

impl ConnectOptions {
    /// Forces the connection.
    pub const FORCE: Self = Self {
        force: true,
        next_available: false,
    };
    /// Appends to the destination array.
    pub const NEXT_AVAILABLE: Self = Self {
        force: false,
        next_available: true,
    };
}
