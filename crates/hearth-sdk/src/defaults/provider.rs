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

use super::{ClockContext, QueueDispatcher, SinkLoggingContext};
use hearth_core::{ContextProvider, ContextRequest, Dispatcher, Logging, SystemClock};
use std::any::Any;

/// Produces the contexts every application can rely on without platform
/// support: a queue dispatcher, facade-backed logging and a system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultContextProvider;

impl ContextProvider for DefaultContextProvider {
    fn provide(&self, request: &mut ContextRequest) {
        request
            .provide::<Dispatcher>(|| Box::new(QueueDispatcher::new()))
            .provide::<Logging>(|| Box::new(SinkLoggingContext::new()))
            .provide::<SystemClock>(|| Box::new(ClockContext::new()));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
