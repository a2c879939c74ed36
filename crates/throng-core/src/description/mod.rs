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

//! Provides the passive records that describe one agent *type*.
//!
//! Every agent of a crowd is an instance of a type, and every record in this
//! module belongs to exactly one type. The records are filled once by a
//! description reader and are read-only afterwards, which is what allows the
//! build cache to share host-scene work between agents.
//!
//! The key components are:
//! - [`Material`] and [`Geometry`]: what an agent looks like.
//! - [`GeometryOption`]: a slot that one of several geometries may fill.
//! - [`Joint`] and [`Primitive`]: the skeleton and its procedural shapes.
//! - [`Variable`], [`Curve`] and [`Action`]: the per-agent knobs and animation.

mod action;
mod geometry;
mod joint;
mod material;
mod naming;
mod primitive;
mod variable;

pub use action::*;
pub use geometry::*;
pub use joint::*;
pub use material::*;
pub use naming::*;
pub use primitive::*;
pub use variable::*;
