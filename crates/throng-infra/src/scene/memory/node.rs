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

use std::collections::BTreeMap;
use throng_core::scene::{AttrValue, MeshDescription, NodeHandle, NodeKind};

/// A node of a [`MemoryScene`](super::MemoryScene).
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Unique name of the node.
    pub name: String,
    /// What the node is.
    pub kind: NodeKind,
    /// Parents of the node; empty at the world root. An instanced node has
    /// several.
    pub parents: Vec<NodeHandle>,
    /// Children, in insertion order.
    pub children: Vec<NodeHandle>,
    /// Attribute values set so far.
    pub attributes: BTreeMap<String, AttrValue>,
    /// Geometry of a mesh shape.
    pub mesh: Option<MeshDescription>,
    /// Members of a shading group.
    pub members: Vec<NodeHandle>,
}

impl SceneNode {
    pub(super) fn new(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            parents: Vec::new(),
            children: Vec::new(),
            attributes: BTreeMap::new(),
            mesh: None,
            members: Vec::new(),
        }
    }

    /// Returns `true` if the node sits directly under the world root.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if the node has more than one parent.
    pub fn is_instanced(&self) -> bool {
        self.parents.len() > 1
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, attr: &str) -> Option<&AttrValue> {
        self.attributes.get(attr)
    }
}
