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

//! Defines the error taxonomy for description lookups and agent construction.

use crate::scene::SceneError;
use std::fmt;

/// A convenience alias for results carrying a [`CrowdError`].
pub type CrowdResult<T> = Result<T, CrowdError>;

/// The kind of record an unknown name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// A geometry, by name or numeric id.
    Geometry,
    /// A material, by numeric id.
    Material,
    /// A joint, by name.
    Joint,
    /// A variable, by name.
    Variable,
    /// An action, by name.
    Action,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupKind::Geometry => "geometry",
            LookupKind::Material => "material",
            LookupKind::Joint => "joint",
            LookupKind::Variable => "variable",
            LookupKind::Action => "action",
        };
        f.write_str(name)
    }
}

/// An error raised while reading a description or building an agent from it.
#[derive(Debug)]
pub enum CrowdError {
    /// A name or id that is not part of the description.
    UnknownName {
        /// The kind of record that was searched.
        kind: LookupKind,
        /// The name (or stringified id) that was not found.
        name: String,
    },
    /// The description is malformed in a way that cannot be recovered from.
    ModelIntegrity(String),
    /// An index fell outside the range it is allowed to address.
    Bounds {
        /// What was being indexed.
        context: String,
        /// The offending index.
        index: i64,
        /// The number of addressable elements.
        len: usize,
    },
    /// The host scene rejected an operation.
    Host(SceneError),
}

impl CrowdError {
    /// Convenience constructor for a failed lookup.
    pub fn unknown(kind: LookupKind, name: impl Into<String>) -> Self {
        CrowdError::UnknownName {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for CrowdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrowdError::UnknownName { kind, name } => write!(f, "Unknown {kind} '{name}'"),
            CrowdError::ModelIntegrity(msg) => write!(f, "Malformed agent description: {msg}"),
            CrowdError::Bounds {
                context,
                index,
                len,
            } => write!(f, "Index {index} out of bounds for {context} (len {len})"),
            CrowdError::Host(err) => write!(f, "Host scene operation failed: {err}"),
        }
    }
}

impl std::error::Error for CrowdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrowdError::Host(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SceneError> for CrowdError {
    fn from(err: SceneError) -> Self {
        CrowdError::Host(err)
    }
}
