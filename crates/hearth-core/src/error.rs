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

//! Defines the hierarchy of error types for building and running applications.

use crate::application::ApplicationState;
use crate::capability::CapabilityId;
use crate::version::ParseVersionError;
use std::fmt;

/// A configuration error detected while building an application.
///
/// Every variant is fatal: a build that reports one produces no application.
#[derive(Debug)]
pub enum BuildError {
    /// A scalar identity field (name, id or version) was set twice.
    IdentityAlreadySet {
        /// The field that was set twice.
        field: &'static str,
    },
    /// A scalar identity field could not be inferred from any source.
    IdentityUnresolved {
        /// The field that could not be inferred.
        field: &'static str,
    },
    /// A version string from configuration or metadata could not be parsed.
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Why it was rejected.
        reason: ParseVersionError,
    },
    /// A kind is already occupied by a context of a different capability.
    IncompatibleContext {
        /// The contested kind.
        kind: String,
        /// The capability already registered under the kind.
        existing: CapabilityId,
        /// The capability that tried to claim the kind.
        requested: CapabilityId,
    },
    /// No available provider could produce a required capability.
    CapabilityUnavailable {
        /// The capability that could not be produced.
        capability: CapabilityId,
    },
    /// An "unavailable" stand-in reported itself as available.
    StandInAvailable {
        /// The capability whose stand-in misbehaved.
        capability: CapabilityId,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::IdentityAlreadySet { field } => {
                write!(f, "The application {field} has already been set")
            }
            BuildError::IdentityUnresolved { field } => {
                write!(f, "The application {field} could not be inferred")
            }
            BuildError::InvalidVersion { value, reason } => {
                write!(f, "Invalid application version '{value}': {reason}")
            }
            BuildError::IncompatibleContext {
                kind,
                existing,
                requested,
            } => write!(
                f,
                "Kind '{kind}' is already provided by {existing}, cannot register {requested}"
            ),
            BuildError::CapabilityUnavailable { capability } => {
                write!(f, "No provider could produce the capability {capability}")
            }
            BuildError::StandInAvailable { capability } => write!(
                f,
                "The unavailable stand-in for {capability} reports itself as available"
            ),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::InvalidVersion { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// An error from a typed lookup on a resolved application context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No context was resolved for the capability.
    Missing {
        /// The capability that was looked up.
        capability: CapabilityId,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Missing { capability } => {
                write!(f, "No context of the capability {capability} is available")
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// The point of the lifecycle a fault came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStage {
    /// A provider `attach` hook.
    Attach,
    /// A `Starting` event handler.
    Starting,
    /// A provider or context `initialise` hook.
    Initialise,
    /// A `Started` event handler.
    Started,
    /// The dispatcher drain.
    Dispatch,
    /// An `Iteration` event handler.
    Iteration,
    /// A `Stopping` event handler.
    Stopping,
    /// A context or provider `cleanup` hook.
    Cleanup,
    /// A `Stopped` event handler.
    Stopped,
    /// A provider `detach` hook.
    Detach,
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleStage::Attach => "attach",
            LifecycleStage::Starting => "starting",
            LifecycleStage::Initialise => "initialise",
            LifecycleStage::Started => "started",
            LifecycleStage::Dispatch => "dispatch",
            LifecycleStage::Iteration => "iteration",
            LifecycleStage::Stopping => "stopping",
            LifecycleStage::Cleanup => "cleanup",
            LifecycleStage::Stopped => "stopped",
            LifecycleStage::Detach => "detach",
        };
        f.write_str(name)
    }
}

/// An error reported by `Application::run`.
#[derive(Debug)]
pub enum ApplicationError {
    /// `run` was called while the application was not stopped.
    /// Nothing was changed.
    NotStopped {
        /// The state observed at the time of the call.
        state: ApplicationState,
    },
    /// A hook or event handler faulted. Teardown was still attempted.
    Fault {
        /// Where the fault was raised.
        stage: LifecycleStage,
        /// The fault itself.
        source: anyhow::Error,
    },
}

impl ApplicationError {
    /// Wraps a hook fault raised at `stage`.
    pub fn fault(stage: LifecycleStage, source: anyhow::Error) -> Self {
        ApplicationError::Fault { stage, source }
    }

    /// The stage a fault came from, or `None` for caller errors.
    #[must_use]
    pub fn stage(&self) -> Option<LifecycleStage> {
        match self {
            ApplicationError::NotStopped { .. } => None,
            ApplicationError::Fault { stage, .. } => Some(*stage),
        }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationError::NotStopped { state } => write!(
                f,
                "The application is {state} and cannot be started again until it has fully stopped"
            ),
            ApplicationError::Fault { stage, source } => {
                write!(f, "Application fault during {stage}: {source}")
            }
        }
    }
}

impl std::error::Error for ApplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplicationError::NotStopped { .. } => None,
            ApplicationError::Fault { source, .. } => {
                let source: &(dyn std::error::Error + 'static) = source.as_ref();
                Some(source)
            }
        }
    }
}
