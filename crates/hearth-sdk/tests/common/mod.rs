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

//! Fake providers and contexts shared by the integration tests.

#![allow(dead_code)]

use anyhow::Result;
use hearth_sdk::defaults::QueueDispatcher;
use hearth_sdk::{
    kinds, ApplicationBase, AudioDeviceInfo, AudioPlayback, AudioPlaybackContext, Capability,
    Context, ContextProvider, ContextRequest, DispatchJob, Dispatcher, DispatcherContext,
    DisplayContext, DisplayInfo, ProviderId, Screen,
};
use std::any::Any;
use std::sync::{Arc, Mutex};

/// An ordered record of lifecycle calls, shared between fakes and tests.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.0.lock().unwrap().iter().any(|e| e == entry)
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.lock().unwrap().iter().position(|e| e == entry)
    }
}

/// Which hooks of a fake should fail.
#[derive(Clone, Copy, Default)]
pub struct Faults {
    pub attach: bool,
    pub initialise: bool,
    pub cleanup: bool,
    pub detach: bool,
}

fn hook(journal: &Journal, who: &str, name: &str, fail: bool) -> Result<()> {
    journal.record(format!("{who}:{name}"));
    if fail {
        anyhow::bail!("{who} failed to {name}");
    }
    Ok(())
}

// --- CONTEXTS ---

/// A dispatcher that records its hooks and delegates work to a queue.
pub struct TestDispatcher {
    journal: Journal,
    faults: Faults,
    queue: QueueDispatcher,
}

impl TestDispatcher {
    pub fn new(journal: Journal) -> Self {
        Self::with_faults(journal, Faults::default())
    }

    pub fn with_faults(journal: Journal, faults: Faults) -> Self {
        Self {
            journal,
            faults,
            queue: QueueDispatcher::new(),
        }
    }
}

impl Context for TestDispatcher {
    fn kind(&self) -> &str {
        kinds::DISPATCHER
    }

    fn provider(&self) -> Option<ProviderId> {
        Some(ProviderId::of::<PlatformProvider>())
    }

    fn initialise(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "dispatcher", "initialise", self.faults.initialise)
    }

    fn cleanup(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "dispatcher", "cleanup", self.faults.cleanup)
    }
}

impl DispatcherContext for TestDispatcher {
    fn post(&self, job: DispatchJob) {
        self.queue.post(job);
    }

    fn pending(&self) -> usize {
        self.queue.pending()
    }

    fn process(&self) -> Result<usize> {
        self.queue.process()
    }
}

/// A display context reporting a fixed set of displays.
pub struct TestScreen {
    pub journal: Journal,
    pub faults: Faults,
    pub displays: Vec<DisplayInfo>,
}

impl TestScreen {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            faults: Faults::default(),
            displays: vec![DisplayInfo {
                name: "primary".to_string(),
                width: 1920,
                height: 1080,
                refresh_rate_hz: Some(60),
            }],
        }
    }
}

impl Context for TestScreen {
    fn kind(&self) -> &str {
        kinds::DISPLAY
    }

    fn provider(&self) -> Option<ProviderId> {
        Some(ProviderId::of::<PlatformProvider>())
    }

    fn initialise(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "screen", "initialise", self.faults.initialise)
    }

    fn cleanup(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "screen", "cleanup", self.faults.cleanup)
    }
}

impl DisplayContext for TestScreen {
    fn displays(&self) -> Vec<DisplayInfo> {
        self.displays.clone()
    }
}

/// A second capability claiming the display kind, to provoke conflicts.
pub struct LegacyScreen;

impl Capability for LegacyScreen {
    const KIND: &'static str = kinds::DISPLAY;
    type Object = dyn DisplayContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

/// A playback context with one stereo device.
pub struct TestSpeakers;

impl Context for TestSpeakers {
    fn kind(&self) -> &str {
        kinds::AUDIO_PLAYBACK
    }
}

impl AudioPlaybackContext for TestSpeakers {
    fn devices(&self) -> Vec<AudioDeviceInfo> {
        vec![AudioDeviceInfo {
            name: "speakers".to_string(),
            channels: 2,
            sample_rate: 48_000,
        }]
    }
}

// --- PROVIDERS ---

/// Produces a dispatcher and a screen, and records its own hooks.
pub struct PlatformProvider {
    pub journal: Journal,
    pub faults: Faults,
    pub context_faults: Faults,
    pub ignore_if_unused: bool,
}

impl PlatformProvider {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            faults: Faults::default(),
            context_faults: Faults::default(),
            ignore_if_unused: false,
        }
    }
}

impl ContextProvider for PlatformProvider {
    fn ignore_if_unused(&self) -> bool {
        self.ignore_if_unused
    }

    fn provide(&self, request: &mut ContextRequest) {
        request
            .provide::<Dispatcher>(|| {
                Box::new(TestDispatcher::with_faults(
                    self.journal.clone(),
                    self.context_faults,
                ))
            })
            .provide::<Screen>(|| {
                let mut screen = TestScreen::new(self.journal.clone());
                screen.faults = self.context_faults;
                Box::new(screen)
            });
    }

    fn attach(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "platform", "attach", self.faults.attach)
    }

    fn detach(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "platform", "detach", self.faults.detach)
    }

    fn initialise(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "platform", "initialise", self.faults.initialise)
    }

    fn cleanup(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "platform", "cleanup", self.faults.cleanup)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Produces audio playback only, and is dropped unless something uses it.
pub struct AudioProvider {
    pub journal: Journal,
}

impl ContextProvider for AudioProvider {
    fn ignore_if_unused(&self) -> bool {
        true
    }

    fn provide(&self, request: &mut ContextRequest) {
        request.provide::<AudioPlayback>(|| Box::new(TestSpeakers));
    }

    fn attach(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "audio", "attach", false)
    }

    fn detach(&self, _app: &dyn ApplicationBase) -> Result<()> {
        hook(&self.journal, "audio", "detach", false)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
