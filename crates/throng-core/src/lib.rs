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

//! # Throng Core
//!
//! Foundational crate containing the agent description records, the contract
//! with the host scene graph, and the error taxonomy shared by every other
//! crate of the workspace.

#![warn(missing_docs)]

pub mod description;
pub mod error;
pub mod math;
pub mod scene;

pub use error::{CrowdError, CrowdResult};
pub use scene::{NodeHandle, SceneGraph};
