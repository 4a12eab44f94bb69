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

//! Audio playback and capture capabilities, and the group combining them.

use crate::capability::{kinds, Capability, FallbackCapability};
use crate::context::Context;
use crate::unavailable::{UnavailableAudioCaptureContext, UnavailableAudioPlaybackContext};
use std::sync::Arc;

/// Describes one audio endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDeviceInfo {
    /// The name reported by the platform.
    pub name: String,
    /// The number of channels (e.g., 2 for stereo).
    pub channels: u16,
    /// The number of samples per second (e.g., 44100 Hz).
    pub sample_rate: u32,
}

/// Access to audio output endpoints.
pub trait AudioPlaybackContext: Context {
    /// Every playback device currently attached.
    fn devices(&self) -> Vec<AudioDeviceInfo>;
}

/// Access to audio input endpoints.
pub trait AudioCaptureContext: Context {
    /// Every capture device currently attached.
    fn devices(&self) -> Vec<AudioDeviceInfo>;
}

/// Capability marker for [`AudioPlaybackContext`].
pub struct AudioPlayback;

impl Capability for AudioPlayback {
    const KIND: &'static str = kinds::AUDIO_PLAYBACK;
    type Object = dyn AudioPlaybackContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

impl FallbackCapability for AudioPlayback {
    fn unavailable() -> Box<Self::Object> {
        Box::new(UnavailableAudioPlaybackContext)
    }
}

/// Capability marker for [`AudioCaptureContext`].
pub struct AudioCapture;

impl Capability for AudioCapture {
    const KIND: &'static str = kinds::AUDIO_CAPTURE;
    type Object = dyn AudioCaptureContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

impl FallbackCapability for AudioCapture {
    fn unavailable() -> Box<Self::Object> {
        Box::new(UnavailableAudioCaptureContext)
    }
}

/// The application's audio facilities, playback and capture together.
#[derive(Clone)]
pub struct AudioContextGroup {
    playback: Arc<dyn AudioPlaybackContext>,
    capture: Arc<dyn AudioCaptureContext>,
}

impl AudioContextGroup {
    /// Groups a playback and a capture context.
    pub fn new(
        playback: Arc<dyn AudioPlaybackContext>,
        capture: Arc<dyn AudioCaptureContext>,
    ) -> Self {
        Self { playback, capture }
    }

    /// The playback member.
    pub fn playback(&self) -> &Arc<dyn AudioPlaybackContext> {
        &self.playback
    }

    /// The capture member.
    pub fn capture(&self) -> &Arc<dyn AudioCaptureContext> {
        &self.capture
    }

    /// `true` when at least one member is available.
    pub fn is_available(&self) -> bool {
        self.playback.is_available() || self.capture.is_available()
    }
}

impl std::fmt::Debug for AudioContextGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioContextGroup")
            .field("playback_available", &self.playback.is_available())
            .field("capture_available", &self.capture.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Speakers;

    impl Context for Speakers {
        fn kind(&self) -> &str {
            kinds::AUDIO_PLAYBACK
        }
    }

    impl AudioPlaybackContext for Speakers {
        fn devices(&self) -> Vec<AudioDeviceInfo> {
            vec![AudioDeviceInfo {
                name: "Speakers".to_string(),
                channels: 2,
                sample_rate: 48_000,
            }]
        }
    }

    #[test]
    fn test_group_of_stand_ins_is_unavailable() {
        let group = AudioContextGroup::new(
            Arc::from(AudioPlayback::unavailable()),
            Arc::from(AudioCapture::unavailable()),
        );
        assert!(!group.is_available());
        assert!(group.playback().devices().is_empty());
        assert!(group.capture().devices().is_empty());
    }

    #[test]
    fn test_group_is_available_with_one_real_member() {
        let group = AudioContextGroup::new(
            Arc::new(Speakers),
            Arc::from(AudioCapture::unavailable()),
        );
        assert!(group.is_available());
        assert_eq!(group.playback().devices()[0].channels, 2);
    }
}
