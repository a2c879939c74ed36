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

//! Defines node handles, attribute paths, and attribute values.

use std::fmt;

/// An opaque, stable reference to a node of the host scene.
///
/// The value is assigned by the host; callers only compare and copy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Wraps a host-assigned id.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the host-assigned id.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Builds the path of an attribute of this node.
    #[inline]
    pub fn attr(self, attr: impl Into<String>) -> AttrPath {
        AttrPath {
            node: self,
            attr: attr.into(),
        }
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Addresses one attribute of one node, e.g. `weightList[3].weights`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    /// The node owning the attribute.
    pub node: NodeHandle,
    /// The attribute name, possibly with array indices.
    pub attr: String,
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.attr)
    }
}

/// A value that can be stored on an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A scalar.
    Float(f32),
    /// A triple, e.g. a color or a translation.
    Float3([f32; 3]),
    /// A list of scalars.
    FloatArray(Vec<f32>),
    /// A string.
    String(String),
}

/// The kinds of nodes the importer creates or queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A transform (group).
    Transform,
    /// A polygon mesh shape.
    Mesh,
    /// A skeleton joint.
    Joint,
    /// A surface shader.
    Shader(ShaderKind),
    /// A shading group (renderable set).
    ShadingGroup,
    /// A file texture.
    FileTexture,
    /// A 2D texture placement.
    Place2dTexture,
    /// A skin deformer.
    SkinCluster,
    /// A default list that registers shading nodes with the renderer.
    DefaultList,
}

impl NodeKind {
    /// Returns `true` for shape nodes.
    pub fn is_shape(self) -> bool {
        matches!(self, NodeKind::Mesh)
    }

    /// Returns the host type name of the node kind.
    pub fn type_name(self) -> &'static str {
        match self {
            NodeKind::Transform => "transform",
            NodeKind::Mesh => "mesh",
            NodeKind::Joint => "joint",
            NodeKind::Shader(kind) => kind.type_name(),
            NodeKind::ShadingGroup => "shadingEngine",
            NodeKind::FileTexture => "file",
            NodeKind::Place2dTexture => "place2dTexture",
            NodeKind::SkinCluster => "skinCluster",
            NodeKind::DefaultList => "defaultList",
        }
    }
}

/// The surface shader models the importer knows how to configure.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderKind {
    /// Blinn shading, with specular color and roll-off.
    #[default]
    Blinn,
    /// Lambert shading, diffuse only.
    Lambert,
}

impl ShaderKind {
    /// Returns the host type name of the shader.
    pub fn type_name(self) -> &'static str {
        match self {
            ShaderKind::Blinn => "blinn",
            ShaderKind::Lambert => "lambert",
        }
    }
}
