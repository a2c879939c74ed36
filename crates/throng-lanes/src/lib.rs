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

//! # Throng Lanes
//!
//! Pure computations on the build hot path. Nothing in this crate touches the
//! host scene; the build cache feeds these results into it.
//!
//! - [`primitive_lane`]: procedural meshes for joint primitives.
//! - [`shading_lane`]: the attribute plan of a material's shading network.
//! - [`skin_lane`]: chunk partitioning and weight-list layout for skinning.

#![warn(missing_docs)]

pub mod primitive_lane;
pub mod shading_lane;
pub mod skin_lane;
