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

//! The public-facing SDK for building Hearth applications.
//!
//! An application is assembled by an [`ApplicationBuilder`] from a set of
//! [`ContextProvider`]s and explicit contexts. Building resolves every
//! capability the application needs into an immutable [`ApplicationContext`]
//! and returns an [`Application`], whose `run` drives the
//! start, loop, stop and teardown sequence.

mod slot;

pub mod application;
pub mod builder;
pub mod config;
pub mod context;
pub mod defaults;
pub mod metadata;

pub use application::{Application, EventHandler, StopHandle};
pub use builder::ApplicationBuilder;
pub use config::ApplicationConfig;
pub use context::ApplicationContext;
pub use defaults::DefaultContextProvider;
pub use metadata::ApplicationMetadata;

pub use hearth_core::*;

/// Everything needed to build, run and extend an application.
pub mod prelude {
    pub use crate::{
        Application, ApplicationBuilder, ApplicationConfig, ApplicationContext,
        ApplicationMetadata, DefaultContextProvider, StopHandle,
    };
    pub use hearth_core::{
        kinds, ApplicationBase, ApplicationError, ApplicationEvent, ApplicationInfo,
        ApplicationState, BuildError, Capability, Context, ContextProvider, ContextRequest,
        DispatcherContext, FallbackCapability, LoggingContext, SystemTimeContext, Version,
    };
}
