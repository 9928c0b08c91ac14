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

//! The contract for converting typed metric values to and from storage.

use super::metrics::StorageResult;
use serde_json::Value;
use std::fmt::Debug;

/// Converts a typed metric value to the storage-neutral representation held
/// by the engines, and back.
///
/// Storage engines are generic over a codec rather than over the value type
/// directly, so one value type may have several encodings and the codec is
/// always chosen explicitly when an engine is specialized.
pub trait ValueCodec: Send + Sync + 'static {
    /// The typed value recorded by callers and returned in snapshots.
    type Value: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// The name of the metric type, used as the section key in collected
    /// payloads (e.g., "uuid", "string").
    const METRIC_TYPE: &'static str;

    /// Converts a value to its raw storage representation.
    ///
    /// Values reaching the engine have been validated upstream, so a failure
    /// here only results in the value not being written.
    fn encode(value: &Self::Value) -> StorageResult<Value>;

    /// Converts a raw stored value back into a typed value.
    ///
    /// Must be total: any malformed input yields `None`, never a panic.
    fn decode(raw: &Value) -> Option<Self::Value>;
}
