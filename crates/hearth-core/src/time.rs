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

//! The system time capability.

use crate::capability::{kinds, Capability, FallbackCapability};
use crate::context::Context;
use crate::unavailable::UnavailableSystemTimeContext;
use std::time::{Duration, SystemTime};

/// Wall-clock and run-relative time.
pub trait SystemTimeContext: Context {
    /// The current wall-clock time, or `None` when no clock is available.
    fn now(&self) -> Option<SystemTime>;

    /// Time elapsed since the context was initialised for the current run.
    fn uptime(&self) -> Option<Duration>;
}

/// Capability marker for [`SystemTimeContext`].
pub struct SystemClock;

impl Capability for SystemClock {
    const KIND: &'static str = kinds::SYSTEM_TIME;
    type Object = dyn SystemTimeContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

impl FallbackCapability for SystemClock {
    fn unavailable() -> Box<Self::Object> {
        Box::new(UnavailableSystemTimeContext)
    }
}
