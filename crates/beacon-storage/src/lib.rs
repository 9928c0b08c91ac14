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

//! # Beacon Storage
//!
//! In-memory storage engines for recorded metrics. Values are partitioned by
//! [`Lifetime`](beacon_core::Lifetime) and by store, and snapshotted (and
//! optionally cleared) atomically when a ping is assembled.

#![warn(missing_docs)]

pub mod config;
pub mod engines;
pub mod service;
pub mod storage;

pub use config::StorageConfig;
pub use engines::{
    BooleanStorageEngine, CounterStorageEngine, StringStorageEngine, UuidStorageEngine,
};
pub use service::StorageService;
pub use storage::{ScalarStorageEngine, Snapshot, StorageEngine};
