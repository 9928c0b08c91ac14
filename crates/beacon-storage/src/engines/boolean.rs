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

//! Storage for boolean metrics.

use crate::storage::ScalarStorageEngine;
use beacon_core::{StorageResult, ValueCodec};
use serde_json::Value;

/// Stores booleans as JSON booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl ValueCodec for BooleanCodec {
    type Value = bool;
    const METRIC_TYPE: &'static str = "boolean";

    fn encode(value: &bool) -> StorageResult<Value> {
        Ok(Value::Bool(*value))
    }

    fn decode(raw: &Value) -> Option<bool> {
        raw.as_bool()
    }
}

/// The storage engine for boolean metrics.
pub type BooleanStorageEngine = ScalarStorageEngine<BooleanCodec>;

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::Lifetime;

    #[test]
    fn test_string_booleans_are_not_coerced() {
        assert_eq!(BooleanCodec::decode(&Value::Bool(false)), Some(false));
        assert_eq!(BooleanCodec::decode(&Value::from("true")), None);
        assert_eq!(BooleanCodec::decode(&Value::from(1)), None);
    }

    #[test]
    fn test_false_is_a_recorded_value() {
        let engine = BooleanStorageEngine::new();
        engine.record(&["metrics"], "ui", "dark_mode", Lifetime::Ping, false);

        let snapshot = engine.snapshot("metrics", Lifetime::Ping, true);
        assert_eq!(snapshot.get_by_name("ui", "dark_mode"), Some(&false));
    }
}
