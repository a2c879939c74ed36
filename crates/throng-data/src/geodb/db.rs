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

use super::{GeometryIter, OptionedEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use throng_core::description::{Geometry, GeometryId, VariableSource};

/// The frozen geometry registry of one agent type.
///
/// Geometries are stored once; the by-id table, the by-name map and the
/// merged optioned map all index into the same storage, so lookups through
/// either key return the same object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoDb {
    pub(super) geometries: Vec<Geometry>,
    pub(super) by_id: Vec<Option<usize>>,
    pub(super) by_name: HashMap<String, usize>,
    pub(super) optioned: Vec<OptionedEntry>,
}

impl GeoDb {
    /// Returns the geometry registered under `id`.
    pub fn geometry_by_id(&self, id: GeometryId) -> Option<&Geometry> {
        let slot = *self.by_id.get(id as usize)?;
        slot.map(|index| &self.geometries[index])
    }

    /// Returns the geometry registered under `name`.
    pub fn geometry_by_name(&self, name: &str) -> Option<&Geometry> {
        self.by_name.get(name).map(|index| &self.geometries[*index])
    }

    /// Returns the merged name map, in registration order.
    pub fn optioned(&self) -> &[OptionedEntry] {
        &self.optioned
    }

    /// Returns the length of the dense by-id table.
    pub fn id_capacity(&self) -> usize {
        self.by_id.len()
    }

    /// Returns the number of geometries reachable by name.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no geometry was registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Resolves the option slots against an agent's variables.
    ///
    /// The returned iterator yields one geometry per entry of the optioned
    /// map and is consumed by a single agent build.
    pub fn resolve<'a, V>(&'a self, vars: &'a V) -> GeometryIter<'a, V>
    where
        V: VariableSource + ?Sized,
    {
        GeometryIter::new(self, vars)
    }
}
