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

//! Context providers and the request they answer.

use crate::application::ApplicationBase;
use crate::capability::{Capability, CapabilityId};
use anyhow::Result;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a provider by its concrete type.
///
/// Contexts store this instead of a reference to the provider that produced
/// them; the host resolves it back to the provider when it needs to.
#[derive(Clone, Copy)]
pub struct ProviderId {
    type_id: TypeId,
    name: &'static str,
}

impl ProviderId {
    /// Returns the identifier of the provider type `P`.
    #[must_use]
    pub fn of<P: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            name: std::any::type_name::<P>(),
        }
    }

    /// The type name of the provider.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ProviderId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ProviderId {}

impl Hash for ProviderId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderId").field(&self.name).finish()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A single production attempt for one capability.
///
/// Providers inspect the request and fill it with [`provide`](Self::provide)
/// when they can produce the requested capability. Leaving the request empty
/// is a decline.
pub struct ContextRequest {
    capability: CapabilityId,
    produced: Option<Box<dyn Any + Send + Sync>>,
}

impl ContextRequest {
    /// Creates an empty request for the capability `C`.
    #[must_use]
    pub fn new<C: Capability>() -> Self {
        Self {
            capability: CapabilityId::of::<C>(),
            produced: None,
        }
    }

    /// The capability being requested.
    #[must_use]
    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// Returns `true` if this request asks for the capability `C`.
    #[must_use]
    pub fn is<C: Capability>(&self) -> bool {
        self.capability == CapabilityId::of::<C>()
    }

    /// Returns `true` once a provider has produced a context.
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        self.produced.is_some()
    }

    /// Fulfils the request with a context of capability `C`.
    ///
    /// `produce` only runs when the request asks for `C` and has not been
    /// fulfilled yet, so a provider can chain one call per capability it
    /// supports.
    pub fn provide<C: Capability>(&mut self, produce: impl FnOnce() -> Box<C::Object>) -> &mut Self {
        if self.produced.is_none() && self.is::<C>() {
            self.produced = Some(Box::new(produce()));
        }
        self
    }

    /// Like [`provide`](Self::provide), but `produce` may still decline by
    /// returning `None` (for example when no device is present).
    pub fn try_provide<C: Capability>(
        &mut self,
        produce: impl FnOnce() -> Option<Box<C::Object>>,
    ) -> &mut Self {
        if self.produced.is_none() && self.is::<C>() {
            if let Some(context) = produce() {
                self.produced = Some(Box::new(context));
            }
        }
        self
    }

    /// Extracts the produced context, if the request was fulfilled for `C`.
    #[must_use]
    pub fn into_context<C: Capability>(self) -> Option<Box<C::Object>> {
        self.produced?
            .downcast::<Box<C::Object>>()
            .ok()
            .map(|context| *context)
    }
}

/// A factory able to produce zero or more kinds of contexts on request.
///
/// Identity is the concrete provider type: a builder keeps at most one
/// provider of any given type.
pub trait ContextProvider: Send + Sync + 'static {
    /// The identity of this provider.
    fn id(&self) -> ProviderId {
        ProviderId::of::<Self>()
    }

    /// If `true`, the provider is dropped from the built application unless
    /// one of its contexts was accepted.
    fn ignore_if_unused(&self) -> bool {
        false
    }

    /// Attempts to produce the capability the `request` asks for.
    fn provide(&self, request: &mut ContextRequest);

    /// Called when an application that uses this provider starts running,
    /// before any event fires.
    fn attach(&self, _app: &dyn ApplicationBase) -> Result<()> {
        Ok(())
    }

    /// Called last during teardown, whatever happened before.
    fn detach(&self, _app: &dyn ApplicationBase) -> Result<()> {
        Ok(())
    }

    /// Called before any context is initialised.
    fn initialise(&self, _app: &dyn ApplicationBase) -> Result<()> {
        Ok(())
    }

    /// Called after every context has been cleaned up.
    fn cleanup(&self, _app: &dyn ApplicationBase) -> Result<()> {
        Ok(())
    }

    /// Allows downcasting to the concrete provider type.
    fn as_any(&self) -> &dyn Any;

    /// Allows mutable downcasting to the concrete provider type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{DispatchJob, Dispatcher, DispatcherContext};
    use crate::logging::Logging;
    use crate::context::Context;

    struct NullDispatcher;

    impl Context for NullDispatcher {
        fn kind(&self) -> &str {
            crate::kinds::DISPATCHER
        }
    }

    impl DispatcherContext for NullDispatcher {
        fn post(&self, _job: DispatchJob) {}

        fn pending(&self) -> usize {
            0
        }

        fn process(&self) -> Result<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_request_is_fulfilled_only_for_matching_capability() {
        let mut request = ContextRequest::new::<Logging>();
        request.provide::<Dispatcher>(|| Box::new(NullDispatcher));

        assert!(!request.is_fulfilled());
        assert!(request.into_context::<Logging>().is_none());
    }

    #[test]
    fn test_request_round_trips_the_produced_context() {
        let mut request = ContextRequest::new::<Dispatcher>();
        request.provide::<Dispatcher>(|| Box::new(NullDispatcher));

        assert!(request.is_fulfilled());
        let context = request.into_context::<Dispatcher>().unwrap();
        assert_eq!(context.kind(), crate::kinds::DISPATCHER);
    }

    #[test]
    fn test_first_production_wins() {
        let mut request = ContextRequest::new::<Dispatcher>();
        let mut second_called = false;
        request
            .provide::<Dispatcher>(|| Box::new(NullDispatcher))
            .provide::<Dispatcher>(|| {
                second_called = true;
                Box::new(NullDispatcher)
            });

        assert!(!second_called);
    }

    #[test]
    fn test_try_provide_can_decline() {
        let mut request = ContextRequest::new::<Dispatcher>();
        request.try_provide::<Dispatcher>(|| None);
        assert!(!request.is_fulfilled());
    }

    #[test]
    fn test_provider_id_is_the_concrete_type() {
        struct A;
        struct B;
        assert_eq!(ProviderId::of::<A>(), ProviderId::of::<A>());
        assert_ne!(ProviderId::of::<A>(), ProviderId::of::<B>());
        assert!(ProviderId::of::<A>().name().ends_with("A"));
    }
}
