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

//! Keyboard and mouse input capabilities.

use crate::capability::{kinds, Capability, FallbackCapability};
use crate::context::Context;
use crate::unavailable::{UnavailableKeyboardInputContext, UnavailableMouseInputContext};

/// Describes one input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceInfo {
    /// A platform-assigned identifier, stable for the lifetime of the device.
    pub id: u32,
    /// The name reported by the platform.
    pub name: String,
}

/// Access to keyboard devices.
pub trait KeyboardInputContext: Context {
    /// Every keyboard currently attached.
    fn devices(&self) -> Vec<InputDeviceInfo>;
}

/// Access to mouse devices.
pub trait MouseInputContext: Context {
    /// Every mouse currently attached.
    fn devices(&self) -> Vec<InputDeviceInfo>;
}

/// Capability marker for [`KeyboardInputContext`].
pub struct Keyboard;

impl Capability for Keyboard {
    const KIND: &'static str = kinds::KEYBOARD_INPUT;
    type Object = dyn KeyboardInputContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

impl FallbackCapability for Keyboard {
    fn unavailable() -> Box<Self::Object> {
        Box::new(UnavailableKeyboardInputContext)
    }
}

/// Capability marker for [`MouseInputContext`].
pub struct Mouse;

impl Capability for Mouse {
    const KIND: &'static str = kinds::MOUSE_INPUT;
    type Object = dyn MouseInputContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

impl FallbackCapability for Mouse {
    fn unavailable() -> Box<Self::Object> {
        Box::new(UnavailableMouseInputContext)
    }
}
