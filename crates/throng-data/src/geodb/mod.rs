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

//! The per-type geometry registry and the resolver that turns its option
//! slots into concrete geometry for one agent.
//!
//! A [`GeoDbBuilder`] accumulates geometries and options while a description
//! is read; [`GeoDbBuilder::finish`] freezes it into a [`GeoDb`], which is only
//! ever read afterwards.

mod builder;
mod db;
mod resolver;

pub use builder::*;
pub use db::*;
pub use resolver::*;

use serde::{Deserialize, Serialize};
use throng_core::description::{GeometryId, GeometryOption};

/// A value of the merged name map: a geometry reachable directly by name, or
/// an option slot standing in for its candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Optioned {
    /// A geometry, by id.
    Geometry(GeometryId),
    /// An option slot.
    Option(GeometryOption),
}

/// One entry of the merged name map, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionedEntry {
    /// The name the entry is registered under.
    pub name: String,
    /// The geometry or option slot.
    pub item: Optioned,
}
