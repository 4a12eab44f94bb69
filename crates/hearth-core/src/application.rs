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

//! Application identity and lifecycle vocabulary shared by contexts,
//! providers and the host.

use crate::version::Version;
use std::fmt;

/// The lifecycle state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(u8)]
pub enum ApplicationState {
    /// Not running. Both the initial and the terminal state.
    #[default]
    Stopped = 0,
    /// Providers are being attached and contexts initialised.
    Starting = 1,
    /// The run loop is active.
    Running = 2,
    /// The run loop has exited and teardown is in progress.
    Stopping = 3,
}

impl ApplicationState {
    /// Converts the state to its raw representation, for atomic storage.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a raw representation back into a state.
    ///
    /// Unknown values map to [`ApplicationState::Stopped`].
    #[must_use]
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Starting,
            2 => Self::Running,
            3 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// The observable lifecycle events, in the order a normal run fires them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationEvent {
    /// Fired after the providers were attached, before initialisation.
    Starting,
    /// Fired once everything is initialised, right before the loop starts.
    Started,
    /// Fired once per loop iteration, after the dispatcher drained its work.
    Iteration,
    /// Fired once the loop observed the stop request.
    Stopping,
    /// Fired during teardown, after contexts were cleaned up.
    Stopped,
}

/// The identity of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    id: String,
    name: String,
    version: Version,
}

impl ApplicationInfo {
    /// Creates a new identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version,
        }
    }

    /// The unique id of the application.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The human readable name of the application.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version of the application.
    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl fmt::Display for ApplicationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) v{}", self.name, self.id, self.version)
    }
}

/// The view of a running application handed to context and provider hooks.
pub trait ApplicationBase: Send + Sync {
    /// The identity of the application.
    fn info(&self) -> &ApplicationInfo;

    /// The current lifecycle state.
    fn state(&self) -> ApplicationState;

    /// Requests the run loop to exit. Never blocks.
    fn stop(&self);
}
