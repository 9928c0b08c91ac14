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

//! Retention classes for recorded metric data.

use super::metrics::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Controls when a recorded metric value is evicted from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// Cleared every time the store it belongs to is snapshotted for sending.
    Ping,
    /// Lives as long as the application process; cleared on restart.
    Application,
    /// Survives restarts until the user explicitly resets their data.
    User,
}

impl Lifetime {
    /// All lifetimes, ordered from the longest-lived to the shortest-lived.
    pub const ALL: [Lifetime; 3] = [Lifetime::User, Lifetime::Application, Lifetime::Ping];

    /// Returns a stable, dense index usable for per-lifetime arrays.
    pub const fn index(self) -> usize {
        match self {
            Lifetime::Ping => 0,
            Lifetime::Application => 1,
            Lifetime::User => 2,
        }
    }

    /// Returns the lowercase name of the lifetime.
    pub const fn as_str(self) -> &'static str {
        match self {
            Lifetime::Ping => "ping",
            Lifetime::Application => "application",
            Lifetime::User => "user",
        }
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifetime {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ping" => Ok(Lifetime::Ping),
            "application" => Ok(Lifetime::Application),
            "user" => Ok(Lifetime::User),
            _ => Err(StorageError::InvalidLifetime(s.to_string())),
        }
    }
}
