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

//! Typed specializations of the scalar storage engine, one per metric type.
//!
//! Each specialization is a codec plus a type alias; recording forwards
//! straight into [`ScalarStorageEngine`](crate::storage::ScalarStorageEngine)
//! without further validation.

pub mod boolean;
pub mod counter;
pub mod string;
pub mod uuid;

pub use self::boolean::{BooleanCodec, BooleanStorageEngine};
pub use self::counter::{CounterCodec, CounterStorageEngine};
pub use self::string::{StringCodec, StringStorageEngine};
pub use self::uuid::{UuidCodec, UuidStorageEngine};
