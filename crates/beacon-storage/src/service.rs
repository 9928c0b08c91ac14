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

//! Service owning one storage engine per metric type.

use crate::config::StorageConfig;
use crate::engines::{
    BooleanStorageEngine, CounterStorageEngine, StringStorageEngine, UuidStorageEngine,
};
use crate::storage::StorageEngine;
use beacon_core::Lifetime;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Owns the storage engines for the lifetime of the application.
///
/// Construct one `StorageService` at startup and hand out its engines (or a
/// clone of the `Arc<StorageService>`) to the metric APIs and to ping
/// assembly. Each engine carries its own lock, so engines of different types
/// never contend with each other.
#[derive(Debug)]
pub struct StorageService {
    config: StorageConfig,
    uuids: Arc<UuidStorageEngine>,
    strings: Arc<StringStorageEngine>,
    booleans: Arc<BooleanStorageEngine>,
    counters: Arc<CounterStorageEngine>,
}

impl StorageService {
    /// Creates a service with empty engines built from `config`.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            uuids: Arc::new(UuidStorageEngine::with_config(config.clone())),
            strings: Arc::new(StringStorageEngine::with_config(config.clone())),
            booleans: Arc::new(BooleanStorageEngine::with_config(config.clone())),
            counters: Arc::new(CounterStorageEngine::with_config(config.clone())),
            config,
        }
    }

    /// Returns the configuration the engines were built with.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the UUID engine.
    pub fn uuids(&self) -> &Arc<UuidStorageEngine> {
        &self.uuids
    }

    /// Returns the string engine.
    pub fn strings(&self) -> &Arc<StringStorageEngine> {
        &self.strings
    }

    /// Returns the boolean engine.
    pub fn booleans(&self) -> &Arc<BooleanStorageEngine> {
        &self.booleans
    }

    /// Returns the counter engine.
    pub fn counters(&self) -> &Arc<CounterStorageEngine> {
        &self.counters
    }

    /// Returns every engine behind its type-erased interface.
    pub fn engines(&self) -> Vec<Arc<dyn StorageEngine>> {
        let engines: [Arc<dyn StorageEngine>; 4] = [
            self.uuids.clone(),
            self.strings.clone(),
            self.booleans.clone(),
            self.counters.clone(),
        ];
        Vec::from(engines)
    }

    /// Collect the contents of `store` from every engine, as sent in a ping.
    ///
    /// The result maps each metric type to its engine's JSON snapshot, e.g.
    /// `{"uuid": {"telemetry.client_id": "..."}}`. Engines without data for
    /// the store are left out; `None` means no engine had anything to report.
    /// With `clear_store`, every engine drops its ping-lifetime data for the
    /// store.
    pub fn collect(&self, store: &str, clear_store: bool) -> Option<Value> {
        let mut payload = Map::new();
        for engine in self.engines() {
            if let Some(section) = engine.snapshot_as_json(store, clear_store) {
                payload.insert(engine.metric_type().to_string(), section);
            }
        }

        if payload.is_empty() {
            log::debug!("Nothing to collect for store '{}'", store);
            None
        } else {
            Some(Value::Object(payload))
        }
    }

    /// Returns `true` if any engine holds data for `store`.
    pub fn has_data(&self, store: &str) -> bool {
        self.engines().iter().any(|engine| engine.has_data(store))
    }

    /// Drops application-lifetime data. Call once when the application starts.
    pub fn on_restart(&self) {
        log::info!("Clearing application lifetime metrics on restart");
        self.clear_lifetime(Lifetime::Application);
    }

    /// Drops user- and application-lifetime data, e.g. after the user opts
    /// out of data collection or resets their identity.
    pub fn reset_user_data(&self) {
        log::info!("Clearing user and application lifetime metrics");
        self.clear_lifetime(Lifetime::User);
        self.clear_lifetime(Lifetime::Application);
    }

    /// Drops every stored value of every lifetime.
    pub fn clear_all_stores(&self) {
        for engine in self.engines() {
            engine.clear_all_stores();
        }
    }

    fn clear_lifetime(&self, lifetime: Lifetime) {
        for engine in self.engines() {
            engine.clear_all(lifetime);
        }
    }
}

impl Default for StorageService {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_service_creation() {
        let service = StorageService::default();
        assert_eq!(service.engines().len(), 4);
        assert!(!service.has_data("metrics"));
        assert!(service.collect("metrics", false).is_none());
    }

    #[test]
    fn test_collect_groups_by_metric_type() {
        let service = StorageService::default();
        let client_id = Uuid::new_v4();

        service.uuids().record(
            &["metrics"],
            "telemetry",
            "client_id",
            Lifetime::User,
            client_id,
        );
        service
            .strings()
            .record(&["metrics"], "app", "channel", Lifetime::Application, "beta".into());
        service
            .counters()
            .add(&["metrics"], "net", "requests", Lifetime::Ping, 3);

        let payload = service.collect("metrics", true).unwrap();
        assert_eq!(
            payload,
            json!({
                "uuid": { "telemetry.client_id": client_id.hyphenated().to_string() },
                "string": { "app.channel": "beta" },
                "counter": { "net.requests": 3 },
            })
        );

        // The ping-lifetime counter is gone, the longer-lived values remain.
        let next = service.collect("metrics", false).unwrap();
        assert!(next.get("counter").is_none());
        assert!(next.get("uuid").is_some());
        assert!(next.get("string").is_some());
    }

    #[test]
    fn test_lifecycle_hooks() {
        let service = StorageService::default();
        let stores = ["metrics"];
        service
            .booleans()
            .record(&stores, "ui", "dark_mode", Lifetime::User, true);
        service
            .strings()
            .record(&stores, "app", "session", Lifetime::Application, "s1".into());
        service
            .counters()
            .add(&stores, "net", "requests", Lifetime::Ping, 1);

        service.on_restart();
        assert!(service
            .strings()
            .snapshot("metrics", Lifetime::Application, false)
            .is_empty());
        assert!(service.has_data("metrics"));

        service.reset_user_data();
        assert!(service
            .booleans()
            .snapshot("metrics", Lifetime::User, false)
            .is_empty());
        // Ping data is untouched by user resets.
        assert_eq!(
            service
                .counters()
                .snapshot("metrics", Lifetime::Ping, false)
                .get_by_name("net", "requests"),
            Some(&1)
        );

        service.clear_all_stores();
        assert!(!service.has_data("metrics"));
    }
}
