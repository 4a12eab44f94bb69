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

//! # Hearth Core
//!
//! Foundational crate containing the contracts every Hearth application is
//! assembled from: contexts, the providers that produce them, the well-known
//! capability interfaces and the lifecycle vocabulary shared with the host.

#![warn(missing_docs)]

pub mod application;
pub mod audio;
pub mod capability;
pub mod context;
pub mod dispatcher;
pub mod display;
pub mod error;
pub mod input;
pub mod logging;
pub mod provider;
pub mod time;
pub mod unavailable;
pub mod version;

pub use application::{ApplicationBase, ApplicationEvent, ApplicationInfo, ApplicationState};
pub use audio::{
    AudioCapture, AudioCaptureContext, AudioContextGroup, AudioDeviceInfo, AudioPlayback,
    AudioPlaybackContext,
};
pub use capability::{kinds, Capability, CapabilityId, FallbackCapability};
pub use context::Context;
pub use dispatcher::{DispatchJob, Dispatcher, DispatcherContext};
pub use display::{DisplayContext, DisplayInfo, Screen};
pub use error::{ApplicationError, BuildError, ContextError, LifecycleStage};
pub use input::{InputDeviceInfo, Keyboard, KeyboardInputContext, Mouse, MouseInputContext};
pub use logging::{LogEntry, LogSink, Logging, LoggingContext};
pub use provider::{ContextProvider, ContextRequest, ProviderId};
pub use time::{SystemClock, SystemTimeContext};
pub use version::{ParseVersionError, Version};
