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

use super::DefaultContextProvider;
use anyhow::Result;
use hearth_core::{kinds, ApplicationBase, Context, ProviderId, SystemTimeContext};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime};

/// The system wall clock, plus the uptime of the current run.
#[derive(Debug, Default)]
pub struct ClockContext {
    started: Mutex<Option<Instant>>,
}

impl ClockContext {
    /// Creates a clock. Uptime is reported once the application initialises it.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Context for ClockContext {
    fn kind(&self) -> &str {
        kinds::SYSTEM_TIME
    }

    fn provider(&self) -> Option<ProviderId> {
        Some(ProviderId::of::<DefaultContextProvider>())
    }

    fn initialise(&self, _app: &dyn ApplicationBase) -> Result<()> {
        *self.started.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        Ok(())
    }

    fn cleanup(&self, _app: &dyn ApplicationBase) -> Result<()> {
        *self.started.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

impl SystemTimeContext for ClockContext {
    fn now(&self) -> Option<SystemTime> {
        Some(SystemTime::now())
    }

    fn uptime(&self) -> Option<Duration> {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|started| started.elapsed())
    }
}
