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

//! A generic, type-safe storage for scene masters.

use std::collections::HashMap;
use std::hash::Hash;

/// An in-memory cache mapping a content key `K` to a master `M`.
///
/// Masters are the first fully-built copy of a scene construct; later agents
/// replicate them instead of building again. The key type encodes what makes
/// two constructs interchangeable, so keys from different caches cannot be
/// mixed up.
#[derive(Debug)]
pub struct MasterCache<K, M> {
    storage: HashMap<K, M>,
    hits: u64,
    misses: u64,
}

impl<K, M> Default for MasterCache<K, M> {
    fn default() -> Self {
        Self {
            storage: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Eq + Hash, M> MasterCache<K, M> {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the master for `key`, counting the hit or miss.
    ///
    /// A `None` is the normal signal that the master must be built.
    pub fn get(&mut self, key: &K) -> Option<&M> {
        let found = self.storage.get(key);
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Returns the master for `key` without touching the statistics.
    pub fn peek(&self, key: &K) -> Option<&M> {
        self.storage.get(key)
    }

    /// Registers a fully-built master under `key`.
    ///
    /// Returns the master previously stored under the same key, if any.
    pub fn put(&mut self, key: K, master: M) -> Option<M> {
        self.storage.insert(key, master)
    }

    /// Returns the number of registered masters.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if no master was registered.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterates over the registered masters.
    pub fn masters(&self) -> impl Iterator<Item = &M> {
        self.storage.values()
    }

    /// Returns the number of lookups that found a master.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns the number of lookups that found nothing.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
