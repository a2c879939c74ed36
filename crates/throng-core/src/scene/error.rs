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

use std::fmt;

/// A convenience alias for results of host scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// An error reported by the host scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The node does not exist (or no longer exists).
    NodeNotFound(String),
    /// The attribute does not exist on the node.
    AttributeNotFound(String),
    /// The operation is not valid for the given arguments.
    InvalidOperation(String),
    /// An error originating from the host implementation itself.
    Backend(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NodeNotFound(node) => write!(f, "Node not found: {node}"),
            SceneError::AttributeNotFound(attr) => write!(f, "Attribute not found: {attr}"),
            SceneError::InvalidOperation(msg) => write!(f, "Invalid scene operation: {msg}"),
            SceneError::Backend(msg) => write!(f, "Host scene error: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}
