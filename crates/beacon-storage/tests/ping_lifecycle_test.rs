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

use beacon_core::{Lifetime, MetricId};
use beacon_storage::{StorageConfig, StorageService, StringStorageEngine, UuidStorageEngine};
use serde_json::Value;
use uuid::Uuid;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_ping_clear_leaves_other_stores_intact() {
    init_logging();
    // --- 1. ARRANGE ---
    let engine = UuidStorageEngine::new();
    let click_id = Uuid::new_v4();
    engine.record(
        &["metrics", "events"],
        "ui",
        "click_id",
        Lifetime::Ping,
        click_id,
    );

    // --- 2. ACT ---
    let sent = engine.snapshot("metrics", Lifetime::Ping, true);

    // --- 3. ASSERT ---
    let expected_id = MetricId::new("ui", "click_id");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent.get(&expected_id), Some(&click_id));

    assert!(
        engine.snapshot("metrics", Lifetime::Ping, false).is_empty(),
        "The sent store should be empty after a clearing snapshot"
    );
    assert_eq!(
        engine.snapshot("events", Lifetime::Ping, false).get(&expected_id),
        Some(&click_id),
        "Other stores must keep their copy"
    );
}

#[test]
fn test_recording_is_isolated_per_store() {
    init_logging();
    let engine = StringStorageEngine::new();
    engine.record(&["metrics"], "app", "channel", Lifetime::Ping, "beta".into());

    for lifetime in Lifetime::ALL {
        assert!(engine.snapshot("events", lifetime, false).is_empty());
    }
}

#[test]
fn test_ping_clear_keeps_longer_lifetimes() {
    init_logging();
    let engine = StringStorageEngine::new();
    let stores = ["metrics"];
    engine.record(&stores, "app", "channel", Lifetime::Ping, "ping".into());
    engine.record(&stores, "app", "channel", Lifetime::Application, "app".into());
    engine.record(&stores, "app", "channel", Lifetime::User, "user".into());

    let sent = engine.snapshot("metrics", Lifetime::Ping, true);
    assert_eq!(sent.get_by_name("app", "channel"), Some(&"ping".to_string()));

    assert_eq!(
        engine
            .snapshot("metrics", Lifetime::Application, false)
            .get_by_name("app", "channel"),
        Some(&"app".to_string())
    );
    assert_eq!(
        engine
            .snapshot("metrics", Lifetime::User, false)
            .get_by_name("app", "channel"),
        Some(&"user".to_string())
    );
}

#[test]
fn test_last_write_wins() {
    init_logging();
    let engine = UuidStorageEngine::new();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    engine.record(&["metrics"], "ui", "click_id", Lifetime::Ping, first);
    engine.record(&["metrics"], "ui", "click_id", Lifetime::Ping, second);

    let snapshot = engine.snapshot("metrics", Lifetime::Ping, false);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get_by_name("ui", "click_id"), Some(&second));
}

#[test]
fn test_corrupted_uuid_is_omitted() {
    init_logging();
    let engine = UuidStorageEngine::with_config(StorageConfig {
        warn_on_malformed: true,
        ..StorageConfig::default()
    });
    let good = Uuid::new_v4();
    engine.record(&["metrics"], "ui", "good_id", Lifetime::Ping, good);
    engine.record(&["metrics"], "ui", "bad_id", Lifetime::Ping, Uuid::new_v4());

    // Simulate the stored representation being corrupted.
    engine.record_raw(
        &["metrics"],
        "ui",
        "bad_id",
        Lifetime::Ping,
        Value::from("definitely-not-a-uuid"),
    );

    let snapshot = engine.snapshot("metrics", Lifetime::Ping, false);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get_by_name("ui", "good_id"), Some(&good));
    assert!(!snapshot.contains(&MetricId::new("ui", "bad_id")));

    let json = engine.snapshot_as_json("metrics", false).unwrap();
    assert!(json.get("ui.bad_id").is_none());
}

#[test]
fn test_empty_store_snapshot_is_empty() {
    init_logging();
    let engine = UuidStorageEngine::new();
    for lifetime in Lifetime::ALL {
        assert!(engine.snapshot("never-used", lifetime, false).is_empty());
        assert!(engine.snapshot("never-used", lifetime, true).is_empty());
    }
    assert!(engine.snapshot_as_json("never-used", true).is_none());
}

#[test]
fn test_restored_values_survive_restart_until_reset() {
    init_logging();
    let service = StorageService::default();
    let client_id = Uuid::new_v4();

    // A persistence layer restores the previous run's values.
    service.uuids().record_raw(
        &["baseline"],
        "telemetry",
        "client_id",
        Lifetime::User,
        Value::from(client_id.hyphenated().to_string()),
    );
    service.strings().record_raw(
        &["baseline"],
        "app",
        "session",
        Lifetime::Application,
        Value::from("previous"),
    );

    service.on_restart();

    let payload = service.collect("baseline", true).unwrap();
    assert_eq!(
        payload["uuid"]["telemetry.client_id"],
        Value::from(client_id.hyphenated().to_string())
    );
    assert!(payload.get("string").is_none());

    service.reset_user_data();
    assert!(service.collect("baseline", false).is_none());
}
