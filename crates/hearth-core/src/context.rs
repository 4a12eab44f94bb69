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

//! The base contract every application context implements.

use crate::application::ApplicationBase;
use crate::provider::ProviderId;
use anyhow::Result;

/// A facility instance addressed by a stable kind string.
///
/// Contexts are owned by the resolved application context and shared with
/// the code that uses them, so the lifecycle hooks take `&self`.
/// Implementations keep any per-run state behind interior mutability.
pub trait Context: Send + Sync {
    /// The kind this context occupies. At most one context per kind exists
    /// in a resolved application.
    fn kind(&self) -> &str;

    /// Whether the context provides real functionality.
    fn is_available(&self) -> bool {
        true
    }

    /// The provider that produced this context, if any.
    ///
    /// This is an identifier only; it never keeps the provider alive.
    fn provider(&self) -> Option<ProviderId> {
        None
    }

    /// Called once per run, after every provider has been initialised.
    fn initialise(&self, _app: &dyn ApplicationBase) -> Result<()> {
        Ok(())
    }

    /// Called once per run during teardown, only if initialisation completed.
    fn cleanup(&self, _app: &dyn ApplicationBase) -> Result<()> {
        Ok(())
    }
}
