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

//! The display capability.

use crate::capability::{kinds, Capability, FallbackCapability};
use crate::context::Context;
use crate::unavailable::UnavailableDisplayContext;

/// Describes one connected display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    /// The name reported by the platform.
    pub name: String,
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
    /// Refresh rate, when the platform reports one.
    pub refresh_rate_hz: Option<u32>,
}

/// Access to the displays attached to the host.
pub trait DisplayContext: Context {
    /// Every display currently attached. Empty when unavailable.
    fn displays(&self) -> Vec<DisplayInfo>;
}

/// Capability marker for [`DisplayContext`].
pub struct Screen;

impl Capability for Screen {
    const KIND: &'static str = kinds::DISPLAY;
    type Object = dyn DisplayContext;

    fn as_context(object: &Self::Object) -> &dyn Context {
        object
    }
}

impl FallbackCapability for Screen {
    fn unavailable() -> Box<Self::Object> {
        Box::new(UnavailableDisplayContext)
    }
}
