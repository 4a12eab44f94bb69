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

//! Reference host: resolves the default capabilities, reports what it found
//! and runs for a fixed number of iterations.
//!
//! Usage: `hearth-runtime [config.json]`

use anyhow::{Context as _, Result};
use hearth_sdk::prelude::*;
use hearth_sdk::{application_metadata, LogEntry};
use std::sync::atomic::{AtomicUsize, Ordering};

const ITERATIONS: usize = 100;

fn load_config() -> Result<ApplicationConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(ApplicationConfig::default());
    };

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read the configuration file '{path}'"))?;
    ApplicationConfig::from_json_str(&json)
}

fn report(app: &Application) {
    let context = app.context();
    log::info!("Resolved {} contexts:", context.len());
    for resolved in context.contexts() {
        let provider = resolved.provider().map_or("none", |id| id.name());
        log::info!(
            "  {:<16} available: {:<5} provider: {provider}",
            resolved.kind(),
            resolved.is_available()
        );
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut app = ApplicationBuilder::new()
        .with_metadata(application_metadata!())
        .with_config(&config)
        .build()?;

    report(&app);

    app.on(ApplicationEvent::Started, |app| {
        app.context().logging().log(LogEntry::new(
            log::Level::Info,
            "runtime",
            format!("{} started", app.info()),
        ));
        app.context().dispatcher().post(Box::new(|| {
            log::info!("Hello from the dispatcher.");
            Ok(())
        }));
        Ok(())
    });

    let iterations = AtomicUsize::new(0);
    app.on(ApplicationEvent::Iteration, move |app| {
        if iterations.fetch_add(1, Ordering::Relaxed) + 1 >= ITERATIONS {
            app.stop();
        }
        Ok(())
    });

    app.on(ApplicationEvent::Stopping, |app| {
        if let Some(uptime) = app.context().system_time().uptime() {
            log::info!("Ran for {uptime:?}");
        }
        Ok(())
    });

    app.run()?;
    Ok(())
}
