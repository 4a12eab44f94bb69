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

//! The application lifecycle: start, run loop, stop and teardown.

use crate::context::ApplicationContext;
use hearth_core::{
    ApplicationBase, ApplicationError, ApplicationEvent, ApplicationInfo, ApplicationState,
    LifecycleStage,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A handler subscribed to an [`ApplicationEvent`].
pub type EventHandler = Box<dyn Fn(&Application) -> anyhow::Result<()> + Send + Sync>;

/// A cloneable handle that requests an application to stop.
///
/// Shares the run flag of the application it came from, so it can be moved
/// to other threads while `run` blocks.
#[derive(Debug, Clone)]
pub struct StopHandle {
    should_run: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests the loop to exit after its current iteration.
    pub fn stop(&self) {
        self.should_run.store(false, Ordering::Release);
    }
}

/// A built application: its identity, its resolved contexts and the state
/// machine that drives them.
///
/// `run` blocks the calling thread until [`stop`](Application::stop) is
/// requested, then tears everything down. An application can be run again
/// once it is back in [`ApplicationState::Stopped`].
pub struct Application {
    info: ApplicationInfo,
    context: ApplicationContext,
    state: AtomicU8,
    should_run: Arc<AtomicBool>,
    handlers: HashMap<ApplicationEvent, Vec<EventHandler>>,
    idle_sleep: Duration,
}

impl Application {
    /// Wraps a resolved context. Usually called through
    /// [`ApplicationBuilder::build`](crate::ApplicationBuilder::build).
    pub fn new(info: ApplicationInfo, context: ApplicationContext) -> Self {
        Self {
            info,
            context,
            state: AtomicU8::new(ApplicationState::Stopped.as_u8()),
            should_run: Arc::new(AtomicBool::new(false)),
            handlers: HashMap::new(),
            idle_sleep: Duration::from_millis(1),
        }
    }

    /// Sets how long an iteration that found no work sleeps.
    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    /// Subscribes `handler` to `event`. Handlers fire in subscription order.
    pub fn on<F>(&mut self, event: ApplicationEvent, handler: F) -> &mut Self
    where
        F: Fn(&Application) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handlers.entry(event).or_default().push(Box::new(handler));
        self
    }

    /// The application identity.
    pub fn info(&self) -> &ApplicationInfo {
        &self.info
    }

    /// The current lifecycle state.
    pub fn state(&self) -> ApplicationState {
        ApplicationState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Requests the loop to exit after its current iteration. Has no effect
    /// on an application that is not running.
    pub fn stop(&self) {
        log::debug!("Stop requested for {}", self.info);
        self.should_run.store(false, Ordering::Release);
    }

    /// The resolved contexts.
    pub fn context(&self) -> &ApplicationContext {
        &self.context
    }

    /// A handle that can stop this application from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            should_run: Arc::clone(&self.should_run),
        }
    }

    /// Runs the application until it is stopped.
    ///
    /// Fails immediately with [`ApplicationError::NotStopped`] if the
    /// application is not stopped, including when called from one of its own
    /// event handlers. Any fault raised during start-up or the loop still
    /// goes through the full teardown before it is returned.
    pub fn run(&self) -> Result<(), ApplicationError> {
        if let Err(raw) = self.state.compare_exchange(
            ApplicationState::Stopped.as_u8(),
            ApplicationState::Starting.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            return Err(ApplicationError::NotStopped {
                state: ApplicationState::from_u8(raw),
            });
        }

        log::info!("Starting {}...", self.info);

        let mut guard = RunGuard {
            app: self,
            initialised: false,
            torn_down: false,
        };
        let outcome = self.start_and_loop(&mut guard.initialised);
        let teardown = guard.teardown();
        drop(guard);

        log::info!("{} stopped.", self.info);

        match (outcome, teardown) {
            (Err(fault), Err(teardown_fault)) => {
                log::error!("Teardown after a fault also failed: {teardown_fault}");
                Err(fault)
            }
            (Err(fault), Ok(())) => Err(fault),
            (Ok(()), teardown) => teardown,
        }
    }

    fn start_and_loop(&self, initialised: &mut bool) -> Result<(), ApplicationError> {
        self.should_run.store(true, Ordering::Release);

        for provider in self.context.providers() {
            log::debug!("Attaching provider {}", provider.id());
            provider
                .attach(self)
                .map_err(|e| ApplicationError::fault(LifecycleStage::Attach, e))?;
        }

        self.fire(ApplicationEvent::Starting)?;
        self.context.initialise(self)?;
        *initialised = true;

        self.set_state(ApplicationState::Running);
        log::info!("{} is running.", self.info);
        self.fire(ApplicationEvent::Started)?;

        let dispatcher = self.context.dispatcher();
        while self.should_run.load(Ordering::Acquire) {
            let drained = dispatcher
                .process()
                .map_err(|e| ApplicationError::fault(LifecycleStage::Dispatch, e))?;
            log::trace!("Dispatcher drained {drained} jobs");

            self.fire(ApplicationEvent::Iteration)?;

            std::thread::yield_now();
            if drained == 0 && !self.idle_sleep.is_zero() {
                std::thread::sleep(self.idle_sleep);
            }
        }

        self.set_state(ApplicationState::Stopping);
        log::info!("Stopping {}...", self.info);
        self.fire(ApplicationEvent::Stopping)
    }

    /// Every step is attempted regardless of earlier faults. The first fault
    /// is returned and later ones are logged.
    fn teardown(&self, initialised: bool) -> Result<(), ApplicationError> {
        self.set_state(ApplicationState::Stopping);
        self.should_run.store(false, Ordering::Release);

        let mut first_fault = None;

        if initialised {
            if let Err(fault) = self.context.cleanup(self) {
                first_fault = Some(fault);
            }
        }

        if let Err(fault) = self.fire(ApplicationEvent::Stopped) {
            keep_first(&mut first_fault, fault);
        }

        for provider in self.context.providers() {
            log::debug!("Detaching provider {}", provider.id());
            if let Err(e) = provider.detach(self) {
                keep_first(&mut first_fault, ApplicationError::fault(LifecycleStage::Detach, e));
            }
        }

        first_fault.map_or(Ok(()), Err)
    }

    fn fire(&self, event: ApplicationEvent) -> Result<(), ApplicationError> {
        let Some(handlers) = self.handlers.get(&event) else {
            return Ok(());
        };

        let stage = stage_of(event);
        for handler in handlers {
            handler(self).map_err(|e| ApplicationError::fault(stage, e))?;
        }
        Ok(())
    }

    fn set_state(&self, state: ApplicationState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }
}

impl ApplicationBase for Application {
    fn info(&self) -> &ApplicationInfo {
        Application::info(self)
    }

    fn state(&self) -> ApplicationState {
        Application::state(self)
    }

    fn stop(&self) {
        Application::stop(self)
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("info", &self.info)
            .field("state", &self.state())
            .field("context", &self.context)
            .finish()
    }
}

/// Tears the application down when `run` unwinds before reaching its own
/// teardown, and always leaves the state at [`ApplicationState::Stopped`].
struct RunGuard<'a> {
    app: &'a Application,
    initialised: bool,
    torn_down: bool,
}

impl RunGuard<'_> {
    fn teardown(&mut self) -> Result<(), ApplicationError> {
        self.torn_down = true;
        self.app.teardown(self.initialised)
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.torn_down {
            log::error!("{} unwound out of its run loop, tearing down", self.app.info);
            if let Err(fault) = self.app.teardown(self.initialised) {
                log::error!("Teardown during unwind failed: {fault}");
            }
        }
        self.app.set_state(ApplicationState::Stopped);
    }
}

fn stage_of(event: ApplicationEvent) -> LifecycleStage {
    match event {
        ApplicationEvent::Starting => LifecycleStage::Starting,
        ApplicationEvent::Started => LifecycleStage::Started,
        ApplicationEvent::Iteration => LifecycleStage::Iteration,
        ApplicationEvent::Stopping => LifecycleStage::Stopping,
        ApplicationEvent::Stopped => LifecycleStage::Stopped,
    }
}

fn keep_first(first_fault: &mut Option<ApplicationError>, fault: ApplicationError) {
    if first_fault.is_some() {
        log::error!("Additional teardown fault: {fault}");
    } else {
        *first_fault = Some(fault);
    }
}
