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

//! Storage for string metrics.

use crate::storage::ScalarStorageEngine;
use beacon_core::{StorageResult, ValueCodec};
use serde_json::Value;

/// Stores strings as JSON strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl ValueCodec for StringCodec {
    type Value = String;
    const METRIC_TYPE: &'static str = "string";

    fn encode(value: &String) -> StorageResult<Value> {
        Ok(Value::String(value.clone()))
    }

    fn decode(raw: &Value) -> Option<String> {
        raw.as_str().map(str::to_string)
    }
}

/// The storage engine for string metrics.
pub type StringStorageEngine = ScalarStorageEngine<StringCodec>;
