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

//! The generic storage engine behind every scalar metric type.

use crate::config::StorageConfig;
use crate::storage::backend::StorageEngine;
use crate::storage::snapshot::Snapshot;
use beacon_core::{Lifetime, MetricId, ValueCodec};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

/// Raw values of a single store, keyed by metric identifier.
type StoreData = HashMap<MetricId, Value>;

/// Every store holding data for one lifetime.
type LifetimeData = HashMap<String, StoreData>;

/// The live two-level map: lifetime -> store -> identifier -> raw value.
#[derive(Debug, Default)]
struct EngineState {
    lifetimes: [LifetimeData; 3],
}

impl EngineState {
    fn lifetime(&self, lifetime: Lifetime) -> &LifetimeData {
        &self.lifetimes[lifetime.index()]
    }

    fn lifetime_mut(&mut self, lifetime: Lifetime) -> &mut LifetimeData {
        &mut self.lifetimes[lifetime.index()]
    }
}

/// Thread-safe storage for single-valued metrics of one type.
///
/// Values are kept in their raw, storage-neutral form and partitioned first
/// by [`Lifetime`] and then by store name, so clearing one lifetime never
/// touches another and snapshotting a store never scans unrelated stores.
///
/// Every operation runs under a single engine-wide lock:
/// - a `record` into several stores is observed by a snapshot either entirely
///   or not at all;
/// - a snapshot with `clear_store` copies and clears in the same critical
///   section, so no concurrent record is lost or duplicated.
pub struct ScalarStorageEngine<C: ValueCodec> {
    state: Mutex<EngineState>,
    config: StorageConfig,
    _codec: PhantomData<fn() -> C>,
}

impl<C: ValueCodec> ScalarStorageEngine<C> {
    /// Creates an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    /// Creates an empty engine with the given configuration.
    pub fn with_config(config: StorageConfig) -> Self {
        Self {
            state: Mutex::new(EngineState::default()),
            config,
            _codec: PhantomData,
        }
    }

    /// Record `value` for `(category, name)` in every store of `stores`.
    ///
    /// Recording an identifier that already has a value in a store overwrites
    /// it. An empty `stores` is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty; identifiers are validated by the typed
    /// metric APIs before they reach storage.
    pub fn record<S: AsRef<str>>(
        &self,
        stores: &[S],
        category: &str,
        name: &str,
        lifetime: Lifetime,
        value: C::Value,
    ) {
        let id = MetricId::new(category, name);
        if stores.is_empty() {
            log::trace!("[{}] No stores to record {} into", C::METRIC_TYPE, id);
            return;
        }

        let raw = match C::encode(&value) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!(
                    "[{}] Failed to encode value for {}: {}",
                    C::METRIC_TYPE,
                    id,
                    e
                );
                return;
            }
        };

        self.write_raw(stores, id, lifetime, raw);
    }

    /// Record an already-serialized value, bypassing the codec.
    ///
    /// Intended for restoring data persisted by a previous run. The raw value
    /// is not checked here; if it does not decode, it is dropped from
    /// snapshots like any other malformed entry.
    pub fn record_raw<S: AsRef<str>>(
        &self,
        stores: &[S],
        category: &str,
        name: &str,
        lifetime: Lifetime,
        raw: Value,
    ) {
        let id = MetricId::new(category, name);
        if stores.is_empty() {
            log::trace!("[{}] No stores to restore {} into", C::METRIC_TYPE, id);
            return;
        }
        self.write_raw(stores, id, lifetime, raw);
    }

    /// Record a value derived from the one already stored.
    ///
    /// For each store, `combine` receives the current value (`None` if there
    /// is none or it does not decode) and the new `value`; its result is
    /// stored. The read and write happen under the same lock as `record`.
    /// A store named more than once is updated once. Every new value is
    /// computed before any store is written, so a panicking `combine` or a
    /// failed encode leaves the affected stores unchanged.
    pub fn record_with<S, F>(
        &self,
        stores: &[S],
        category: &str,
        name: &str,
        lifetime: Lifetime,
        value: C::Value,
        combine: F,
    ) where
        S: AsRef<str>,
        F: Fn(Option<C::Value>, &C::Value) -> C::Value,
    {
        let id = MetricId::new(category, name);
        if stores.is_empty() {
            log::trace!("[{}] No stores to record {} into", C::METRIC_TYPE, id);
            return;
        }

        let capacity = self.config.initial_store_capacity;
        let mut state = self.lock_state();
        let partition = state.lifetime_mut(lifetime);

        // Compute every store's new value before writing any of them, so a
        // panicking `combine` leaves all stores untouched.
        let mut updates: Vec<(&str, Value)> = Vec::with_capacity(stores.len());
        for store in unique_stores(stores) {
            let current = partition
                .get(store)
                .and_then(|data| data.get(&id))
                .and_then(C::decode);
            match C::encode(&combine(current, &value)) {
                Ok(raw) => updates.push((store, raw)),
                Err(e) => log::warn!(
                    "[{}] Failed to encode combined value for {} in '{}': {}",
                    C::METRIC_TYPE,
                    id,
                    store,
                    e
                ),
            }
        }

        for (store, raw) in updates {
            partition
                .entry(store.to_string())
                .or_insert_with(|| HashMap::with_capacity(capacity))
                .insert(id.clone(), raw);
        }
    }

    /// Take a snapshot of one store for one lifetime.
    ///
    /// Entries whose stored value does not decode are omitted. If
    /// `clear_store` is set, the store's partition for `lifetime` is removed
    /// in the same critical section as the copy. An unknown store yields an
    /// empty snapshot.
    pub fn snapshot(
        &self,
        store: &str,
        lifetime: Lifetime,
        clear_store: bool,
    ) -> Snapshot<C::Value> {
        let raw = {
            let mut state = self.lock_state();
            let partition = state.lifetime_mut(lifetime);
            if clear_store {
                partition.remove(store)
            } else {
                partition.get(store).cloned()
            }
        };

        if clear_store {
            log::debug!(
                "[{}] Cleared {} lifetime data of store '{}'",
                C::METRIC_TYPE,
                lifetime,
                store
            );
        }

        let mut snapshot = Snapshot::new();
        if let Some(raw) = raw {
            self.decode_into(&mut snapshot, store, raw);
        }
        snapshot
    }

    /// Take a snapshot of one store merged across every lifetime, as sent in
    /// a ping.
    ///
    /// Lifetimes are merged from the longest-lived to the shortest-lived, so
    /// a ping-lifetime value shadows a longer-lived value with the same
    /// identifier. If `clear_store` is set, only the ping-lifetime partition
    /// of the store is removed, in the same critical section as the copy.
    pub fn snapshot_for_ping(&self, store: &str, clear_store: bool) -> Snapshot<C::Value> {
        let raw: Vec<StoreData> = {
            let mut state = self.lock_state();
            let mut raw: Vec<StoreData> = Lifetime::ALL
                .iter()
                .filter(|lifetime| **lifetime != Lifetime::Ping)
                .filter_map(|lifetime| state.lifetime(*lifetime).get(store).cloned())
                .collect();
            let ping = state.lifetime_mut(Lifetime::Ping);
            let ping_data = if clear_store {
                ping.remove(store)
            } else {
                ping.get(store).cloned()
            };
            raw.extend(ping_data);
            raw
        };

        let mut snapshot = Snapshot::new();
        for store_data in raw {
            self.decode_into(&mut snapshot, store, store_data);
        }
        snapshot
    }

    /// Render the merged ping snapshot of a store as a JSON object keyed by
    /// metric identifier. Returns `None` if there is nothing to report.
    pub fn snapshot_as_json(&self, store: &str, clear_store: bool) -> Option<Value> {
        let snapshot = self.snapshot_for_ping(store, clear_store);
        if snapshot.is_empty() {
            return None;
        }

        let mut object = Map::with_capacity(snapshot.len());
        for (id, value) in &snapshot {
            match C::encode(value) {
                Ok(raw) => {
                    object.insert(id.identifier(), raw);
                }
                Err(e) => log::warn!(
                    "[{}] Failed to encode {} for payload: {}",
                    C::METRIC_TYPE,
                    id,
                    e
                ),
            }
        }
        Some(Value::Object(object))
    }

    /// Remove every store's data for `lifetime`.
    pub fn clear_all(&self, lifetime: Lifetime) {
        let removed = {
            let mut state = self.lock_state();
            let partition = state.lifetime_mut(lifetime);
            let removed = partition.len();
            partition.clear();
            removed
        };
        log::debug!(
            "[{}] Cleared {} lifetime data from {} store(s)",
            C::METRIC_TYPE,
            lifetime,
            removed
        );
    }

    /// Returns `true` if any lifetime holds entries for `store`.
    pub fn has_data(&self, store: &str) -> bool {
        let state = self.lock_state();
        Lifetime::ALL.iter().any(|lifetime| {
            state
                .lifetime(*lifetime)
                .get(store)
                .is_some_and(|data| !data.is_empty())
        })
    }

    /// Returns the names of the stores currently holding data for `lifetime`.
    pub fn store_names(&self, lifetime: Lifetime) -> Vec<String> {
        let state = self.lock_state();
        let mut names: Vec<String> = state
            .lifetime(lifetime)
            .iter()
            .filter(|(_, data)| !data.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    fn write_raw<S: AsRef<str>>(
        &self,
        stores: &[S],
        id: MetricId,
        lifetime: Lifetime,
        raw: Value,
    ) {
        let capacity = self.config.initial_store_capacity;
        let mut state = self.lock_state();
        let partition = state.lifetime_mut(lifetime);
        for store in unique_stores(stores) {
            partition
                .entry(store.to_string())
                .or_insert_with(|| HashMap::with_capacity(capacity))
                .insert(id.clone(), raw.clone());
        }
    }

    fn decode_into(&self, snapshot: &mut Snapshot<C::Value>, store: &str, raw: StoreData) {
        for (id, value) in raw {
            match C::decode(&value) {
                Some(decoded) => snapshot.insert(id, decoded),
                None if self.config.warn_on_malformed => log::warn!(
                    "[{}] Dropping malformed value for {} in store '{}'",
                    C::METRIC_TYPE,
                    id,
                    store
                ),
                None => log::debug!(
                    "[{}] Dropping malformed value for {} in store '{}'",
                    C::METRIC_TYPE,
                    id,
                    store
                ),
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            log::error!("[{}] Storage lock was poisoned, recovering", C::METRIC_TYPE);
            poisoned.into_inner()
        })
    }
}

/// Store names in first-seen order with repeats removed; `stores` is a set.
fn unique_stores<S: AsRef<str>>(stores: &[S]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(stores.len());
    stores
        .iter()
        .map(AsRef::as_ref)
        .filter(|store| seen.insert(*store))
        .collect()
}

impl<C: ValueCodec> Default for ScalarStorageEngine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ValueCodec> fmt::Debug for ScalarStorageEngine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarStorageEngine")
            .field("metric_type", &C::METRIC_TYPE)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: ValueCodec> StorageEngine for ScalarStorageEngine<C> {
    fn metric_type(&self) -> &'static str {
        C::METRIC_TYPE
    }

    fn snapshot_as_json(&self, store: &str, clear_store: bool) -> Option<Value> {
        ScalarStorageEngine::snapshot_as_json(self, store, clear_store)
    }

    fn clear_all(&self, lifetime: Lifetime) {
        ScalarStorageEngine::clear_all(self, lifetime)
    }

    fn has_data(&self, store: &str) -> bool {
        ScalarStorageEngine::has_data(self, store)
    }
}
