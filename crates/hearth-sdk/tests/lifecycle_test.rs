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

mod common;

use common::{Faults, Journal, PlatformProvider};
use hearth_sdk::prelude::*;
use hearth_sdk::{LifecycleStage, Screen};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn platform_app(journal: &Journal, faults: Faults, context_faults: Faults) -> Application {
    let mut platform = PlatformProvider::new(journal);
    platform.faults = faults;
    platform.context_faults = context_faults;

    ApplicationBuilder::new()
        .with_name("lifecycle-test")
        .with_idle_sleep(Duration::ZERO)
        .with_provider(platform)
        .with_default_providers()
        .build()
        .unwrap()
}

fn record_events(app: &mut Application, journal: &Journal) {
    for (event, name) in [
        (ApplicationEvent::Starting, "event:starting"),
        (ApplicationEvent::Started, "event:started"),
        (ApplicationEvent::Iteration, "event:iteration"),
        (ApplicationEvent::Stopping, "event:stopping"),
        (ApplicationEvent::Stopped, "event:stopped"),
    ] {
        let journal = journal.clone();
        app.on(event, move |_| {
            journal.record(name);
            Ok(())
        });
    }
}

fn stop_after(app: &mut Application, iterations: usize) {
    let seen = AtomicUsize::new(0);
    app.on(ApplicationEvent::Iteration, move |app| {
        if seen.fetch_add(1, Ordering::SeqCst) + 1 == iterations {
            app.stop();
        }
        Ok(())
    });
}

#[test]
fn test_events_fire_in_lifecycle_order() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = ApplicationBuilder::new()
        .with_name("lifecycle-test")
        .with_idle_sleep(Duration::ZERO)
        .with_default_providers()
        .build()
        .unwrap();
    record_events(&mut app, &journal);
    stop_after(&mut app, 3);

    // --- ACT ---
    let result = app.run();

    // --- ASSERT ---
    assert!(result.is_ok(), "run failed: {result:?}");
    assert_eq!(
        journal.entries(),
        vec![
            "event:starting",
            "event:started",
            "event:iteration",
            "event:iteration",
            "event:iteration",
            "event:stopping",
            "event:stopped",
        ]
    );
    assert_eq!(app.state(), ApplicationState::Stopped);
}

#[test]
fn test_hooks_run_in_resolution_order_and_reverse() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut platform = PlatformProvider::new(&journal);
    platform.ignore_if_unused = true;
    let mut app = ApplicationBuilder::new()
        .with_name("lifecycle-test")
        .with_provider(platform)
        .with_default_providers()
        .with_capability::<Screen>()
        .build()
        .unwrap();
    record_events(&mut app, &journal);
    stop_after(&mut app, 1);

    // --- ACT ---
    app.run().unwrap();

    // --- ASSERT ---
    assert_eq!(
        journal.entries(),
        vec![
            "platform:attach",
            "event:starting",
            "platform:initialise",
            "screen:initialise",
            "dispatcher:initialise",
            "event:started",
            "event:iteration",
            "event:stopping",
            "dispatcher:cleanup",
            "screen:cleanup",
            "platform:cleanup",
            "event:stopped",
            "platform:detach",
        ]
    );
}

#[test]
fn test_stop_takes_effect_within_one_iteration() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = platform_app(&journal, Faults::default(), Faults::default());
    let iterations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&iterations);
    app.on(ApplicationEvent::Started, |app| {
        app.stop();
        Ok(())
    });
    app.on(ApplicationEvent::Iteration, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    // --- ACT ---
    app.run().unwrap();

    // --- ASSERT ---
    assert_eq!(iterations.load(Ordering::SeqCst), 0);
}

#[test]
fn test_run_is_rejected_while_not_stopped() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = platform_app(&journal, Faults::default(), Faults::default());
    let observed = Arc::new(Mutex::new(Vec::new()));
    for event in [ApplicationEvent::Started, ApplicationEvent::Stopped] {
        let observed = Arc::clone(&observed);
        app.on(event, move |app| {
            match app.run() {
                Err(ApplicationError::NotStopped { state }) => observed.lock().unwrap().push(state),
                other => panic!("nested run should be rejected, got {other:?}"),
            }
            app.stop();
            Ok(())
        });
    }

    // --- ACT ---
    let result = app.run();

    // --- ASSERT ---
    assert!(result.is_ok());
    assert_eq!(
        *observed.lock().unwrap(),
        vec![ApplicationState::Running, ApplicationState::Stopping]
    );
    assert_eq!(
        journal
            .entries()
            .iter()
            .filter(|e| *e == "platform:attach")
            .count(),
        1
    );
}

#[test]
fn test_initialise_fault_skips_cleanup_but_still_detaches() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let faults = Faults {
        initialise: true,
        ..Faults::default()
    };
    let mut app = platform_app(&journal, Faults::default(), faults);
    record_events(&mut app, &journal);

    // --- ACT ---
    let result = app.run();

    // --- ASSERT ---
    let error = result.unwrap_err();
    assert_eq!(error.stage(), Some(LifecycleStage::Initialise));
    assert!(journal.contains("dispatcher:initialise"));
    assert!(!journal.contains("dispatcher:cleanup"));
    assert!(!journal.contains("platform:cleanup"));
    assert!(!journal.contains("event:started"));
    assert!(journal.contains("event:stopped"));
    assert!(journal.contains("platform:detach"));
    assert_eq!(app.state(), ApplicationState::Stopped);
}

#[test]
fn test_cleanup_fault_does_not_prevent_detach() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let context_faults = Faults {
        cleanup: true,
        ..Faults::default()
    };
    let mut app = platform_app(&journal, Faults::default(), context_faults);
    stop_after(&mut app, 1);

    // --- ACT ---
    let result = app.run();

    // --- ASSERT ---
    assert_eq!(result.unwrap_err().stage(), Some(LifecycleStage::Cleanup));
    assert!(journal.contains("platform:cleanup"));
    assert!(journal.contains("platform:detach"));
}

#[test]
fn test_panicking_handler_still_tears_down() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = platform_app(&journal, Faults::default(), Faults::default());
    record_events(&mut app, &journal);
    app.on(ApplicationEvent::Started, |_| panic!("handler panicked"));

    // --- ACT ---
    let unwound = std::panic::catch_unwind(AssertUnwindSafe(|| app.run())).is_err();

    // --- ASSERT ---
    assert!(unwound);
    assert!(journal.contains("platform:cleanup"));
    assert!(journal.contains("event:stopped"));
    assert!(journal.contains("platform:detach"));
    assert!(!journal.contains("event:stopping"));
    assert_eq!(app.state(), ApplicationState::Stopped);

    // The application is usable again once the unwind has torn it down.
    let mut rerun = platform_app(&journal, Faults::default(), Faults::default());
    stop_after(&mut rerun, 1);
    assert!(rerun.run().is_ok());
}

#[test]
fn test_original_fault_wins_over_teardown_faults() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let faults = Faults {
        detach: true,
        ..Faults::default()
    };
    let mut app = platform_app(&journal, faults, Faults::default());
    app.on(ApplicationEvent::Started, |_| anyhow::bail!("handler failed"));

    // --- ACT ---
    let result = app.run();

    // --- ASSERT ---
    let error = result.unwrap_err();
    assert_eq!(error.stage(), Some(LifecycleStage::Started));
    assert!(error.to_string().contains("handler failed"));
    assert!(journal.contains("platform:cleanup"));
    assert!(journal.contains("platform:detach"));
}

#[test]
fn test_dispatch_fault_ends_the_loop() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = platform_app(&journal, Faults::default(), Faults::default());
    record_events(&mut app, &journal);
    app.on(ApplicationEvent::Started, |app| {
        app.context()
            .dispatcher()
            .post(Box::new(|| -> anyhow::Result<()> { anyhow::bail!("job failed") }));
        Ok(())
    });

    // --- ACT ---
    let result = app.run();

    // --- ASSERT ---
    assert_eq!(result.unwrap_err().stage(), Some(LifecycleStage::Dispatch));
    assert!(!journal.contains("event:iteration"));
    assert!(!journal.contains("event:stopping"));
    assert!(journal.contains("event:stopped"));
}

#[test]
fn test_posted_jobs_run_on_the_loop() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = platform_app(&journal, Faults::default(), Faults::default());
    let job_journal = journal.clone();
    app.on(ApplicationEvent::Started, move |app| {
        let job_journal = job_journal.clone();
        app.context().dispatcher().post(Box::new(move || {
            job_journal.record("job");
            Ok(())
        }));
        Ok(())
    });
    stop_after(&mut app, 1);

    // --- ACT ---
    app.run().unwrap();

    // --- ASSERT ---
    assert!(journal.contains("job"));
}

#[test]
fn test_stop_handle_stops_from_another_thread() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let app = platform_app(&journal, Faults::default(), Faults::default());
    let handle = app.stop_handle();

    // --- ACT ---
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        handle.stop();
    });
    let result = app.run();
    stopper.join().unwrap();

    // --- ASSERT ---
    assert!(result.is_ok());
    assert_eq!(app.state(), ApplicationState::Stopped);
}

#[test]
fn test_application_can_run_again_after_stopping() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = platform_app(&journal, Faults::default(), Faults::default());
    stop_after(&mut app, 1);
    app.on(ApplicationEvent::Started, |app| {
        app.stop();
        Ok(())
    });

    // --- ACT ---
    app.run().unwrap();
    app.run().unwrap();

    // --- ASSERT ---
    assert_eq!(
        journal
            .entries()
            .iter()
            .filter(|e| *e == "platform:detach")
            .count(),
        2
    );
}

#[test]
fn test_clock_reports_uptime_only_while_running() {
    // --- ARRANGE ---
    let journal = Journal::default();
    let mut app = platform_app(&journal, Faults::default(), Faults::default());
    let during = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&during);
    app.on(ApplicationEvent::Started, move |app| {
        *slot.lock().unwrap() = app.context().system_time().uptime();
        app.stop();
        Ok(())
    });

    // --- ACT ---
    app.run().unwrap();

    // --- ASSERT ---
    assert!(during.lock().unwrap().is_some());
    assert!(app.context().system_time().uptime().is_none());
}
