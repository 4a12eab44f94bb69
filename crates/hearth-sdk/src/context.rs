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

//! The frozen, queryable set of resolved contexts.

use crate::slot::{downcast, ResolvedContext};
use hearth_core::{
    ApplicationBase, ApplicationError, AudioCapture, AudioContextGroup, AudioPlayback, BuildError,
    Capability, CapabilityId, Context, ContextError, ContextProvider, Dispatcher,
    DispatcherContext, LifecycleStage, Logging, LoggingContext, SystemClock, SystemTimeContext,
};
use std::collections::HashMap;
use std::sync::Arc;

/// The resolved contexts of an application and the providers it uses.
///
/// Built once by [`ApplicationBuilder`](crate::ApplicationBuilder) and never
/// modified afterwards. Contexts are indexed both by kind and by the
/// capability they were registered under, so typed lookups are a map hit.
pub struct ApplicationContext {
    providers: Vec<Arc<dyn ContextProvider>>,
    contexts: Vec<Arc<dyn ResolvedContext>>,
    kinds: HashMap<String, usize>,
    capabilities: HashMap<CapabilityId, usize>,
    dispatcher: Arc<dyn DispatcherContext>,
    logging: Arc<dyn LoggingContext>,
    system_time: Arc<dyn SystemTimeContext>,
    audio: AudioContextGroup,
}

impl ApplicationContext {
    /// Freezes the resolved providers and contexts, in resolution order.
    pub(crate) fn new(
        providers: Vec<Arc<dyn ContextProvider>>,
        contexts: Vec<Arc<dyn ResolvedContext>>,
    ) -> Result<Self, BuildError> {
        let mut kinds = HashMap::with_capacity(contexts.len());
        let mut capabilities = HashMap::with_capacity(contexts.len());
        for (index, slot) in contexts.iter().enumerate() {
            kinds.insert(slot.context().kind().to_owned(), index);
            capabilities.entry(slot.capability()).or_insert(index);
        }

        let dispatcher = resolve::<Dispatcher>(&capabilities, &contexts)?;
        let logging = resolve::<Logging>(&capabilities, &contexts)?;
        let system_time = resolve::<SystemClock>(&capabilities, &contexts)?;
        let audio = AudioContextGroup::new(
            resolve::<AudioPlayback>(&capabilities, &contexts)?,
            resolve::<AudioCapture>(&capabilities, &contexts)?,
        );

        Ok(Self {
            providers,
            contexts,
            kinds,
            capabilities,
            dispatcher,
            logging,
            system_time,
            audio,
        })
    }

    /// The providers in use, in registration order.
    pub fn providers(&self) -> &[Arc<dyn ContextProvider>] {
        &self.providers
    }

    /// Every resolved context, in resolution order.
    pub fn contexts(&self) -> impl Iterator<Item = &dyn Context> + '_ {
        self.contexts.iter().map(|slot| slot.context())
    }

    /// The number of resolved contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Always `false` for a built application: the dispatcher is mandatory.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Returns `true` if a context occupies `kind`.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Returns the context occupying `kind`, if any.
    pub fn get_kind(&self, kind: &str) -> Option<&dyn Context> {
        self.kinds
            .get(kind)
            .map(|&index| self.contexts[index].context())
    }

    /// Returns the context registered under the capability `C`, if any.
    pub fn get<C: Capability>(&self) -> Option<Arc<C::Object>> {
        self.capabilities
            .get(&CapabilityId::of::<C>())
            .and_then(|&index| downcast::<C>(&*self.contexts[index]))
    }

    /// Like [`get`](Self::get), but reports a missing capability as an error.
    pub fn require<C: Capability>(&self) -> Result<Arc<C::Object>, ContextError> {
        self.get::<C>().ok_or(ContextError::Missing {
            capability: CapabilityId::of::<C>(),
        })
    }

    /// The application's dispatcher.
    pub fn dispatcher(&self) -> &Arc<dyn DispatcherContext> {
        &self.dispatcher
    }

    /// The application's logging context (possibly the unavailable stand-in).
    pub fn logging(&self) -> &Arc<dyn LoggingContext> {
        &self.logging
    }

    /// The application's clock (possibly the unavailable stand-in).
    pub fn system_time(&self) -> &Arc<dyn SystemTimeContext> {
        &self.system_time
    }

    /// The application's audio facilities.
    pub fn audio(&self) -> &AudioContextGroup {
        &self.audio
    }

    /// Initialises providers, then contexts, each in resolution order.
    /// Stops at the first fault.
    pub(crate) fn initialise(&self, app: &dyn ApplicationBase) -> Result<(), ApplicationError> {
        for provider in &self.providers {
            log::debug!("Initialising provider {}", provider.id());
            provider
                .initialise(app)
                .map_err(|e| ApplicationError::fault(LifecycleStage::Initialise, e))?;
        }

        for context in self.contexts() {
            log::debug!("Initialising context '{}'", context.kind());
            context
                .initialise(app)
                .map_err(|e| ApplicationError::fault(LifecycleStage::Initialise, e))?;
        }

        Ok(())
    }

    /// Cleans contexts up, then providers, each in reverse resolution order.
    ///
    /// Every hook is attempted. The first fault is returned; later ones are
    /// logged.
    pub(crate) fn cleanup(&self, app: &dyn ApplicationBase) -> Result<(), ApplicationError> {
        let mut first_fault = None;

        for slot in self.contexts.iter().rev() {
            let context = slot.context();
            log::debug!("Cleaning up context '{}'", context.kind());
            if let Err(e) = context.cleanup(app) {
                record_fault(&mut first_fault, e);
            }
        }

        for provider in self.providers.iter().rev() {
            log::debug!("Cleaning up provider {}", provider.id());
            if let Err(e) = provider.cleanup(app) {
                record_fault(&mut first_fault, e);
            }
        }

        first_fault.map_or(Ok(()), Err)
    }
}

fn resolve<C: Capability>(
    capabilities: &HashMap<CapabilityId, usize>,
    contexts: &[Arc<dyn ResolvedContext>],
) -> Result<Arc<C::Object>, BuildError> {
    capabilities
        .get(&CapabilityId::of::<C>())
        .and_then(|&index| downcast::<C>(&*contexts[index]))
        .ok_or(BuildError::CapabilityUnavailable {
            capability: CapabilityId::of::<C>(),
        })
}

fn record_fault(first_fault: &mut Option<ApplicationError>, error: anyhow::Error) {
    if first_fault.is_some() {
        log::error!("Additional cleanup fault: {error:#}");
    } else {
        *first_fault = Some(ApplicationError::fault(LifecycleStage::Cleanup, error));
    }
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<&str> = self.contexts().map(|c| c.kind()).collect();
        let providers: Vec<&str> = self.providers.iter().map(|p| p.id().name()).collect();
        f.debug_struct("ApplicationContext")
            .field("contexts", &kinds)
            .field("providers", &providers)
            .finish()
    }
}
