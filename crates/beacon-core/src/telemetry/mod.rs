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

//! Provides the foundational traits and data structures for metric storage.
//!
//! This module defines the "common language" spoken between the typed metric
//! APIs, the storage engines and ping assembly. It contains the abstract
//! "what" of metric storage, while `beacon-storage` provides the engines that
//! actually hold recorded values.

pub mod codec;
pub mod lifetime;
pub mod metrics;

pub use self::codec::ValueCodec;
pub use self::lifetime::Lifetime;
pub use self::metrics::{MetricId, StorageError, StorageResult};
