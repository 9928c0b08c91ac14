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

//! Point-in-time copies of a store's decoded values.

use beacon_core::MetricId;
use std::collections::hash_map;
use std::collections::HashMap;

/// A read-only copy of one store's metric values, taken at a single point in
/// time. Holding a snapshot never blocks or aliases the live engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<V> {
    entries: HashMap<MetricId, V>,
}

impl<V> Snapshot<V> {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns `true` if the snapshot holds no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of values in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the value recorded for `id`, if any.
    pub fn get(&self, id: &MetricId) -> Option<&V> {
        self.entries.get(id)
    }

    /// Looks up a value by category and name.
    pub fn get_by_name(&self, category: &str, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(id, _)| id.category() == category && id.name() == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if a value was recorded for `id`.
    pub fn contains(&self, id: &MetricId) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterates over the identifiers and values, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, MetricId, V> {
        self.entries.iter()
    }

    /// Consumes the snapshot and returns the underlying map.
    pub fn into_inner(self) -> HashMap<MetricId, V> {
        self.entries
    }

    pub(crate) fn insert(&mut self, id: MetricId, value: V) {
        self.entries.insert(id, value);
    }
}

impl<V> Default for Snapshot<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(MetricId, V)> for Snapshot<V> {
    fn from_iter<I: IntoIterator<Item = (MetricId, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<V> IntoIterator for Snapshot<V> {
    type Item = (MetricId, V);
    type IntoIter = hash_map::IntoIter<MetricId, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Snapshot<V> {
    type Item = (&'a MetricId, &'a V);
    type IntoIter = hash_map::Iter<'a, MetricId, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
