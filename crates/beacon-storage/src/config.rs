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

//! Configuration shared by the storage engines.

/// Configuration for the storage engines and the service that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Number of entries reserved up front when a store partition is first
    /// created for a lifetime.
    pub initial_store_capacity: usize,
    /// Log stored values that fail to decode at `warn` instead of `debug`.
    /// The values are dropped from snapshots either way.
    pub warn_on_malformed: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            initial_store_capacity: 16,
            warn_on_malformed: false,
        }
    }
}
