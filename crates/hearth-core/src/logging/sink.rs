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

use super::LogEntry;
use crate::application::ApplicationInfo;
use anyhow::Result;
use std::path::Path;
use std::time::SystemTime;

/// A destination for log entries (console, file, remote collector, ...).
///
/// Sinks are driven by a [`LoggingContext`](super::LoggingContext) and are
/// only ever touched by one thread at a time.
pub trait LogSink: Send {
    /// Prepares the sink for `app`, using `timestamp` as the start of the log.
    fn initialise(&mut self, app: &ApplicationInfo, timestamp: SystemTime) -> Result<()>;

    /// Flushes and releases the sink.
    fn cleanup(&mut self) -> Result<()>;

    /// Records one entry.
    fn add_entry(&mut self, entry: &LogEntry);

    /// Attaches the file at `path`.
    fn add_file(&mut self, path: &Path);
}
