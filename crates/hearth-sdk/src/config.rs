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

//! Serializable application configuration.

use anyhow::Context as _;
use hearth_core::Version;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration applied by
/// [`ApplicationBuilder::with_config`](crate::ApplicationBuilder::with_config).
///
/// Every field is optional in the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// The application name.
    pub name: Option<String>,
    /// The unique application id. Defaults to the name.
    pub id: Option<String>,
    /// The application version, written as `major.minor.patch[-pre]`.
    pub version: Option<Version>,
    /// How long an iteration that found no work sleeps, in milliseconds.
    pub idle_sleep_ms: u64,
    /// Whether the built-in default provider is registered.
    pub default_providers: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: None,
            id: None,
            version: None,
            idle_sleep_ms: 1,
            default_providers: true,
        }
    }
}

impl ApplicationConfig {
    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse the application configuration")
    }

    /// The idle sleep quantum.
    pub fn idle_sleep(&self) -> Duration {
        Duration::from_millis(self.idle_sleep_ms)
    }
}
