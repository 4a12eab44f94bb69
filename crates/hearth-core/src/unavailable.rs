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

//! Explicit "unavailable" stand-ins for the well-known optional capabilities.
//!
//! A stand-in always reports itself unavailable, has no provider, and has
//! no-op lifecycle hooks. The builder installs one for every well-known kind
//! nothing else claimed, so looking a well-known capability up never misses.

use crate::audio::{AudioCaptureContext, AudioDeviceInfo, AudioPlaybackContext};
use crate::capability::kinds;
use crate::context::Context;
use crate::display::{DisplayContext, DisplayInfo};
use crate::input::{InputDeviceInfo, KeyboardInputContext, MouseInputContext};
use crate::logging::{LogEntry, LogSink, LoggingContext};
use crate::time::SystemTimeContext;
use std::path::Path;
use std::time::{Duration, SystemTime};

macro_rules! unavailable_context {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl Context for $name {
            fn kind(&self) -> &str {
                $kind
            }

            fn is_available(&self) -> bool {
                false
            }
        }
    };
}

unavailable_context!(
    /// Discards every entry and sink.
    UnavailableLoggingContext,
    kinds::LOGGING
);
unavailable_context!(
    /// Reports no clock.
    UnavailableSystemTimeContext,
    kinds::SYSTEM_TIME
);
unavailable_context!(
    /// Reports no displays.
    UnavailableDisplayContext,
    kinds::DISPLAY
);
unavailable_context!(
    /// Reports no keyboards.
    UnavailableKeyboardInputContext,
    kinds::KEYBOARD_INPUT
);
unavailable_context!(
    /// Reports no mice.
    UnavailableMouseInputContext,
    kinds::MOUSE_INPUT
);
unavailable_context!(
    /// Reports no playback devices.
    UnavailableAudioPlaybackContext,
    kinds::AUDIO_PLAYBACK
);
unavailable_context!(
    /// Reports no capture devices.
    UnavailableAudioCaptureContext,
    kinds::AUDIO_CAPTURE
);

impl LoggingContext for UnavailableLoggingContext {
    fn log(&self, _entry: LogEntry) {}

    fn add_file(&self, _path: &Path) {}

    fn add_sink(&mut self, _sink: Box<dyn LogSink>) {
        log::debug!("Logging is unavailable, dropping the added sink.");
    }

    fn sink_count(&self) -> usize {
        0
    }
}

impl SystemTimeContext for UnavailableSystemTimeContext {
    fn now(&self) -> Option<SystemTime> {
        None
    }

    fn uptime(&self) -> Option<Duration> {
        None
    }
}

impl DisplayContext for UnavailableDisplayContext {
    fn displays(&self) -> Vec<DisplayInfo> {
        Vec::new()
    }
}

impl KeyboardInputContext for UnavailableKeyboardInputContext {
    fn devices(&self) -> Vec<InputDeviceInfo> {
        Vec::new()
    }
}

impl MouseInputContext for UnavailableMouseInputContext {
    fn devices(&self) -> Vec<InputDeviceInfo> {
        Vec::new()
    }
}

impl AudioPlaybackContext for UnavailableAudioPlaybackContext {
    fn devices(&self) -> Vec<AudioDeviceInfo> {
        Vec::new()
    }
}

impl AudioCaptureContext for UnavailableAudioCaptureContext {
    fn devices(&self) -> Vec<AudioDeviceInfo> {
        Vec::new()
    }
}
