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
use anyhow::{Context as _, Result};
use hearth_core::{
    kinds, ApplicationBase, ApplicationInfo, Context, LogEntry, LogSink, LoggingContext,
    ProviderId,
};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

/// Forwards entries into the `log` facade under the `hearth` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn initialise(&mut self, app: &ApplicationInfo, timestamp: SystemTime) -> Result<()> {
        log::info!(target: "hearth", "Log started for {app} at {timestamp:?}");
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        log::logger().flush();
        Ok(())
    }

    fn add_entry(&mut self, entry: &LogEntry) {
        log::log!(
            target: "hearth",
            entry.level,
            "[{}] {}",
            entry.context,
            entry.message
        );
    }

    fn add_file(&mut self, path: &Path) {
        log::info!(target: "hearth", "File attached to the log: {}", path.display());
    }
}

/// A logging context that fans entries out to a list of sinks.
pub struct SinkLoggingContext {
    sinks: Mutex<Vec<Box<dyn LogSink>>>,
}

impl SinkLoggingContext {
    /// Creates a context writing to a [`FacadeSink`].
    pub fn new() -> Self {
        Self::with_sinks(vec![Box::new(FacadeSink)])
    }

    /// Creates a context writing to `sinks`.
    pub fn with_sinks(sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self {
            sinks: Mutex::new(sinks),
        }
    }

    fn sinks(&self) -> std::sync::MutexGuard<'_, Vec<Box<dyn LogSink>>> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SinkLoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Context for SinkLoggingContext {
    fn kind(&self) -> &str {
        kinds::LOGGING
    }

    fn provider(&self) -> Option<ProviderId> {
        Some(ProviderId::of::<DefaultContextProvider>())
    }

    fn initialise(&self, app: &dyn ApplicationBase) -> Result<()> {
        let started = SystemTime::now();
        for sink in self.sinks().iter_mut() {
            sink.initialise(app.info(), started)
                .context("Failed to initialise a log sink")?;
        }
        Ok(())
    }

    fn cleanup(&self, _app: &dyn ApplicationBase) -> Result<()> {
        let mut first_error = None;
        for sink in self.sinks().iter_mut() {
            if let Err(e) = sink.cleanup() {
                if first_error.is_some() {
                    log::error!("Additional log sink cleanup failure: {e:#}");
                } else {
                    first_error = Some(e.context("Failed to clean up a log sink"));
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl LoggingContext for SinkLoggingContext {
    fn log(&self, entry: LogEntry) {
        for sink in self.sinks().iter_mut() {
            sink.add_entry(&entry);
        }
    }

    fn add_file(&self, path: &Path) {
        for sink in self.sinks().iter_mut() {
            sink.add_file(path);
        }
    }

    fn add_sink(&mut self, sink: Box<dyn LogSink>) {
        self.sinks
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    fn sink_count(&self) -> usize {
        self.sinks().len()
    }
}

impl std::fmt::Debug for SinkLoggingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkLoggingContext")
            .field("sinks", &self.sink_count())
            .finish()
    }
}
