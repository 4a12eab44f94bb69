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

//! The logging capability and the sink contract it writes through.

mod entry;
mod sink;

pub use entry::LogEntry;
pub use sink::LogSink;

use crate::capability::{kinds, Capability, FallbackCapability};
use crate::context::Context;
use crate::unavailable::UnavailableLoggingContext;
use std::path::Path;

/// Structured application logging.
///
/// The context owns a set of [`LogSink`]s. It initialises them with the
/// application start time, forwards every entry and attached file to each
/// of them, and cleans them up when the application stops.
pub trait LoggingContext: Context {
    /// Records an entry in every sink.
    fn log(&self, entry: LogEntry);

    /// Attaches a file (crash dump, capture, ...) to every sink.
    fn add_file(&self, path: &Path);

    /// Adds a sink. Only possible while the application is being built.
    fn add_sink(&mut self, sink: Box<dyn LogSink>);

    /// The number of sinks currently attached.
    fn sink_count(&self) -> usize;
}

/// Capability marker for [`LoggingContext`].
pub struct Logging;

impl Capability for Logging {
    const KIND: &'static str = kinds::LOGGING;
    type Object = dyn LoggingContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

impl FallbackCapability for Logging {
    fn unavailable() -> Box<Self::Object> {
        Box::new(UnavailableLoggingContext)
    }
}
