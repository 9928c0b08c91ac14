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

//! Storage for counter metrics.
//!
//! Counters reuse the scalar engine: `record` sets the count outright, while
//! [`add`](ScalarStorageEngine::add) accumulates into whatever is already
//! stored in each store.

use crate::storage::ScalarStorageEngine;
use beacon_core::{Lifetime, StorageResult, ValueCodec};
use serde_json::Value;

/// Stores counts as JSON integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterCodec;

impl ValueCodec for CounterCodec {
    type Value = i64;
    const METRIC_TYPE: &'static str = "counter";

    fn encode(value: &i64) -> StorageResult<Value> {
        Ok(Value::from(*value))
    }

    fn decode(raw: &Value) -> Option<i64> {
        raw.as_i64()
    }
}

/// The storage engine for counter metrics.
pub type CounterStorageEngine = ScalarStorageEngine<CounterCodec>;

impl ScalarStorageEngine<CounterCodec> {
    /// Add `amount` to the counter in every store of `stores`.
    ///
    /// A missing or malformed stored count starts from zero. The sum
    /// saturates at `i64::MAX`.
    pub fn add<S: AsRef<str>>(
        &self,
        stores: &[S],
        category: &str,
        name: &str,
        lifetime: Lifetime,
        amount: i64,
    ) {
        self.record_with(stores, category, name, lifetime, amount, |current, amount| {
            current.unwrap_or(0).saturating_add(*amount)
        });
    }
}
