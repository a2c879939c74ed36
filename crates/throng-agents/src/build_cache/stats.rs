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
use throng_data::cache::MasterCache;

/// Lookup counters of one cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheCounts {
    /// Lookups that found a master.
    pub hits: u64,
    /// Lookups that had to build one.
    pub misses: u64,
    /// Masters registered.
    pub masters: usize,
}

impl CacheCounts {
    pub(crate) fn of<K: Eq + std::hash::Hash, M>(cache: &MasterCache<K, M>) -> Self {
        Self {
            hits: cache.hits(),
            misses: cache.misses(),
            masters: cache.len(),
        }
    }
}

impl fmt::Display for CacheCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} masters, {} hits, {} misses",
            self.masters, self.hits, self.misses
        )
    }
}

/// Statistics of one import pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Geometry masters.
    pub geometry: CacheCounts,
    /// Primitive masters.
    pub primitives: CacheCounts,
    /// Shading groups.
    pub materials: CacheCounts,
    /// Skin weight holders.
    pub clusters: CacheCounts,
    /// Primitive instances whose shading was deferred to cleanup.
    pub deferred_shading: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "geometry: {}", self.geometry)?;
        writeln!(f, "primitives: {}", self.primitives)?;
        writeln!(f, "materials: {}", self.materials)?;
        writeln!(f, "clusters: {}", self.clusters)?;
        write!(f, "deferred shading: {} instances", self.deferred_shading)
    }
}
