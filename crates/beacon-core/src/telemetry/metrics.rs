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

//! Abstract definitions for metric identity and storage errors.

use std::fmt::{self, Display};

/// A unique, structured identifier for a metric.
///
/// A `MetricId` is composed of a category and a name. It is unique within a
/// single (lifetime, store) partition of a storage engine and never changes
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricId {
    category: String,
    name: String,
}

impl MetricId {
    /// Creates a new `MetricId` from a category and a name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty. Identifiers are validated by the typed
    /// metric APIs before they reach storage, so an empty name is a caller
    /// bug. Use [`MetricId::try_new`] to get a `Result` instead.
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        match Self::try_new(category, name) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates a new `MetricId`, rejecting an empty name.
    ///
    /// The category may be empty, in which case the payload identifier is the
    /// bare name.
    pub fn try_new(category: impl Into<String>, name: impl Into<String>) -> StorageResult<Self> {
        let category = category.into();
        let name = name.into();
        if name.is_empty() {
            return Err(StorageError::InvalidIdentifier { category, name });
        }
        Ok(Self { category, name })
    }

    /// The broad category of the metric (e.g., "ui", "browser").
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The specific name of the metric within its category.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identifier used as a key in serialized payloads
    /// (`"category.name"`, or `"name"` when the category is empty).
    pub fn identifier(&self) -> String {
        self.to_string()
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.category, self.name)
        }
    }
}

/// A specialized `Result` type for storage-related operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// An error that can occur within the metric storage system.
///
/// Data-shape problems inside the engines (undecodable stored values, unknown
/// stores) are absorbed and never surface as a `StorageError`; these variants
/// describe caller misuse and codec failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A metric identifier was constructed with an empty name.
    #[error("Invalid metric identifier: category '{category}', name '{name}'")]
    InvalidIdentifier {
        /// The category that was supplied.
        category: String,
        /// The (empty) name that was supplied.
        name: String,
    },
    /// A string could not be parsed into a [`Lifetime`](super::Lifetime).
    #[error("Unknown lifetime: {0}")]
    InvalidLifetime(String),
    /// A value could not be converted to its storage representation.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
