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

//! Storage for UUID metrics.

use crate::storage::ScalarStorageEngine;
use beacon_core::{StorageResult, ValueCodec};
use serde_json::Value;
use uuid::Uuid;

/// Length of the canonical hyphenated form, e.g.
/// `67e55044-10b1-426f-9247-bb680e5fe0c8`.
const HYPHENATED_LEN: usize = 36;

/// Stores UUIDs as their canonical, lowercase hyphenated string.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidCodec;

impl ValueCodec for UuidCodec {
    type Value = Uuid;
    const METRIC_TYPE: &'static str = "uuid";

    fn encode(value: &Uuid) -> StorageResult<Value> {
        Ok(Value::String(value.hyphenated().to_string()))
    }

    fn decode(raw: &Value) -> Option<Uuid> {
        let s = raw.as_str()?;
        // Only the hyphenated form is canonical; reject simple, braced and URN.
        if s.len() != HYPHENATED_LEN {
            return None;
        }
        Uuid::try_parse(s).ok()
    }
}

/// The storage engine for UUID metrics.
pub type UuidStorageEngine = ScalarStorageEngine<UuidCodec>;

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::Lifetime;

    const SAMPLE: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[test]
    fn test_decode_accepts_canonical_form() {
        let expected = Uuid::try_parse(SAMPLE).unwrap();
        assert_eq!(UuidCodec::decode(&Value::from(SAMPLE)), Some(expected));
        assert_eq!(
            UuidCodec::decode(&Value::from(SAMPLE.to_uppercase())),
            Some(expected)
        );
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        for raw in [
            Value::from("not-a-uuid"),
            Value::from("67e5504410b1426f9247bb680e5fe0c8"),
            Value::from("{67e55044-10b1-426f-9247-bb680e5fe0c8}"),
            Value::from("67e55044-10b1-426f-9247-bb680e5fe0cz"),
            Value::from(42),
            Value::Null,
        ] {
            assert_eq!(UuidCodec::decode(&raw), None, "accepted {raw}");
        }
    }

    #[test]
    fn test_encode_is_lowercase_hyphenated() {
        let id = Uuid::try_parse(&SAMPLE.to_uppercase()).unwrap();
        assert_eq!(UuidCodec::encode(&id).unwrap(), Value::from(SAMPLE));
    }

    #[test]
    fn test_record_uuid_into_multiple_stores() {
        let engine = UuidStorageEngine::new();
        let value = Uuid::new_v4();
        engine.record(
            &["metrics", "baseline"],
            "telemetry",
            "client_id",
            Lifetime::User,
            value,
        );

        for store in ["metrics", "baseline"] {
            let snapshot = engine.snapshot(store, Lifetime::User, false);
            assert_eq!(snapshot.get_by_name("telemetry", "client_id"), Some(&value));
        }
    }
}
