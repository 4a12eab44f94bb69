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

//! Capability markers and the well-known context kinds.
//!
//! A capability marker is a zero-sized type that names one capability
//! interface (for example [`Dispatcher`](crate::Dispatcher) names
//! `dyn DispatcherContext`). Providers are asked for capabilities by marker,
//! and the resolved application context is indexed by marker, so type
//! information is only consulted when a provider attempts production.

use crate::context::Context;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The stable kind strings of the capability slots known to the host.
pub mod kinds {
    /// The mandatory dispatcher slot.
    pub const DISPATCHER: &str = "dispatcher";
    /// The logging slot.
    pub const LOGGING: &str = "logging";
    /// The system time slot.
    pub const SYSTEM_TIME: &str = "system-time";
    /// The display slot.
    pub const DISPLAY: &str = "display";
    /// The keyboard input slot.
    pub const KEYBOARD_INPUT: &str = "keyboard-input";
    /// The mouse input slot.
    pub const MOUSE_INPUT: &str = "mouse-input";
    /// The audio playback slot.
    pub const AUDIO_PLAYBACK: &str = "audio-playback";
    /// The audio capture slot.
    pub const AUDIO_CAPTURE: &str = "audio-capture";

    /// Every optional slot that a built application is guaranteed to resolve,
    /// either to a real context or to an unavailable stand-in.
    pub const WELL_KNOWN_OPTIONAL: [&str; 7] = [
        LOGGING,
        SYSTEM_TIME,
        DISPLAY,
        KEYBOARD_INPUT,
        MOUSE_INPUT,
        AUDIO_PLAYBACK,
        AUDIO_CAPTURE,
    ];
}

/// Names one capability interface.
///
/// # Example
///
/// ```rust
/// use hearth_core::{Capability, Context};
///
/// pub trait WeatherContext: Context {
///     fn temperature(&self) -> f32;
/// }
///
/// pub struct Weather;
///
/// impl Capability for Weather {
///     const KIND: &'static str = "weather";
///     type Object = dyn WeatherContext;
///
///     fn as_context(object: &Self::Object) -> &dyn Context {
///         object
///     }
/// }
/// ```
pub trait Capability: 'static {
    /// The kind that contexts of this capability normally occupy.
    const KIND: &'static str;

    /// The interface type contexts of this capability are used through.
    type Object: ?Sized + Context + 'static;

    /// Views a context of this capability through the base [`Context`] contract.
    fn as_context(object: &Self::Object) -> &dyn Context;
}

/// A capability that has an explicit "unavailable" stand-in.
pub trait FallbackCapability: Capability {
    /// Creates the stand-in. It must always report itself unavailable.
    fn unavailable() -> Box<Self::Object>;
}

/// Identifies a capability marker at runtime.
#[derive(Clone, Copy)]
pub struct CapabilityId {
    type_id: TypeId,
    name: &'static str,
}

impl CapabilityId {
    /// Returns the identifier of the capability marker `C`.
    #[must_use]
    pub fn of<C: Capability>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// The type name of the capability marker.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for CapabilityId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CapabilityId {}

impl Hash for CapabilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityId").field(&self.name).finish()
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dispatcher, Logging};
    use std::collections::HashSet;

    #[test]
    fn test_ids_compare_by_marker_type() {
        assert_eq!(CapabilityId::of::<Dispatcher>(), CapabilityId::of::<Dispatcher>());
        assert_ne!(CapabilityId::of::<Dispatcher>(), CapabilityId::of::<Logging>());

        let set: HashSet<_> = [
            CapabilityId::of::<Logging>(),
            CapabilityId::of::<Logging>(),
            CapabilityId::of::<Dispatcher>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_uses_marker_name() {
        let id = CapabilityId::of::<Dispatcher>();
        assert!(id.to_string().ends_with("Dispatcher"));
    }

    #[test]
    fn test_well_known_kinds_are_distinct() {
        let mut all: HashSet<&str> = kinds::WELL_KNOWN_OPTIONAL.into_iter().collect();
        assert_eq!(all.len(), 7);
        assert!(all.insert(kinds::DISPATCHER));
        assert_eq!(Dispatcher::KIND, kinds::DISPATCHER);
    }
}
