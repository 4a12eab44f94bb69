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

//! The dispatcher capability: the one context every application needs.

use crate::capability::{kinds, Capability};
use crate::context::Context;
use anyhow::Result;

/// A unit of deferred work queued on a dispatcher.
pub type DispatchJob = Box<dyn FnOnce() -> Result<()> + Send>;

/// Drains pending application work once per loop iteration.
pub trait DispatcherContext: Context {
    /// Queues a job to run on the application's own execution unit.
    fn post(&self, job: DispatchJob);

    /// The number of jobs waiting to run.
    fn pending(&self) -> usize;

    /// Runs the work that is pending when the call starts and returns how
    /// many jobs ran. Work queued while draining waits for the next call.
    ///
    /// The first failing job aborts the drain and its error is returned.
    fn process(&self) -> Result<usize>;
}

/// Capability marker for [`DispatcherContext`].
pub struct Dispatcher;

impl Capability for Dispatcher {
    const KIND: &'static str = kinds::DISPATCHER;
    type Object = dyn DispatcherContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}
