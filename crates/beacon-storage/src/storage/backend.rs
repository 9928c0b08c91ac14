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

//! Type-erased storage engine interface.

use beacon_core::Lifetime;
use serde_json::Value;
use std::fmt::Debug;

/// Type-erased view of a storage engine, used by ping assembly and lifecycle
/// hooks that work across every value type at once.
pub trait StorageEngine: Send + Sync + Debug + 'static {
    /// The metric type this engine stores (e.g., "uuid").
    fn metric_type(&self) -> &'static str;

    /// Snapshot a store across all lifetimes as a JSON object keyed by metric
    /// identifier, clearing its ping-lifetime data if `clear_store` is set.
    ///
    /// Returns `None` when the store holds no decodable values.
    fn snapshot_as_json(&self, store: &str, clear_store: bool) -> Option<Value>;

    /// Remove every store's data for the given lifetime.
    fn clear_all(&self, lifetime: Lifetime);

    /// Check whether any lifetime holds entries for the store.
    fn has_data(&self, store: &str) -> bool;

    /// Remove all data from the engine.
    fn clear_all_stores(&self) {
        for lifetime in Lifetime::ALL {
            self.clear_all(lifetime);
        }
    }
}
