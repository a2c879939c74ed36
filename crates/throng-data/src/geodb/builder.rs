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

use super::{GeoDb, Optioned, OptionedEntry};
use throng_core::description::{Geometry, GeometryOption};
use throng_core::error::{CrowdError, CrowdResult, LookupKind};

/// Accumulates geometries and option slots while a description is read.
#[derive(Debug, Default)]
pub struct GeoDbBuilder {
    db: GeoDb,
}

impl GeoDbBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a geometry under its id and its name.
    ///
    /// The by-id table grows as needed. The geometry also becomes directly
    /// reachable in the optioned map until an option claims it.
    pub fn add_geometry(&mut self, geometry: Geometry) -> &mut Self {
        let id = geometry.id as usize;
        let name = geometry.name.clone();
        let index = self.db.geometries.len();
        self.db.geometries.push(geometry);

        if id >= self.db.by_id.len() {
            self.db.by_id.resize(id + 1, None);
        }
        self.db.by_id[id] = Some(index);
        self.db.by_name.insert(name.clone(), index);
        self.upsert(name, Optioned::Geometry(id as u32));
        self
    }

    /// Registers an option slot.
    ///
    /// Every candidate that is currently directly reachable by name in the
    /// optioned map is removed from it; candidates already claimed by another
    /// option stay with that option.
    ///
    /// # Errors
    /// Returns [`CrowdError::UnknownName`] if a candidate id was never registered.
    pub fn add_option(&mut self, option: GeometryOption) -> CrowdResult<&mut Self> {
        let mut candidates = Vec::with_capacity(option.inputs.len());
        for id in &option.inputs {
            let geometry = self
                .db
                .geometry_by_id(*id)
                .ok_or_else(|| CrowdError::unknown(LookupKind::Geometry, id.to_string()))?;
            candidates.push(geometry.name.clone());
        }

        self.db.optioned.retain(|entry| {
            !(matches!(entry.item, Optioned::Geometry(_)) && candidates.contains(&entry.name))
        });

        let name = option.name.clone();
        self.upsert(name, Optioned::Option(option));
        Ok(self)
    }

    /// Returns a geometry registered so far, by name.
    pub fn geometry_by_name(&self, name: &str) -> Option<&Geometry> {
        self.db.geometry_by_name(name)
    }

    /// Freezes the registry.
    pub fn finish(self) -> GeoDb {
        self.db
    }

    fn upsert(&mut self, name: String, item: Optioned) {
        match self.db.optioned.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.item = item,
            None => self.db.optioned.push(OptionedEntry { name, item }),
        }
    }
}
