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

//! Assembles an application from providers and context requests.
//!
//! The builder accumulates providers and contexts, then [`build`] runs the
//! resolution protocol in a fixed order:
//!
//! 1. identity defaults (name, id, version) are filled in from metadata;
//! 2. the required pass resolves every mandatory capability or fails;
//! 3. the default pass asks the providers for commonly wanted capabilities;
//! 4. the fallback pass installs an unavailable stand-in for every
//!    well-known kind that is still free;
//! 5. the providers in use are selected and everything is frozen into an
//!    [`ApplicationContext`].
//!
//! Builder operations that can fail record the first error and turn every
//! later fallible operation into a no-op; [`build`] then reports it. A failed
//! build never produces an application.
//!
//! [`build`]: ApplicationBuilder::build

use crate::application::Application;
use crate::config::ApplicationConfig;
use crate::context::ApplicationContext;
use crate::defaults::DefaultContextProvider;
use crate::metadata::{executable_name, ApplicationMetadata};
use crate::slot::{Staged, StagedContext};
use hearth_core::{
    ApplicationInfo, AudioCapture, AudioPlayback, BuildError, Capability, CapabilityId,
    ContextProvider, ContextRequest, Dispatcher, FallbackCapability, Keyboard, Logging, Mouse,
    ProviderId, Screen, SystemClock, Version,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

type ResolveStep = fn(&mut ApplicationBuilder) -> Result<(), BuildError>;

/// The capabilities each pass of [`ApplicationBuilder::build`] visits.
#[derive(Clone)]
struct ResolutionPlan {
    required: Vec<(CapabilityId, ResolveStep)>,
    defaults: Vec<(CapabilityId, ResolveStep)>,
    fallbacks: Vec<(CapabilityId, ResolveStep)>,
}

impl ResolutionPlan {
    fn push(steps: &mut Vec<(CapabilityId, ResolveStep)>, capability: CapabilityId, step: ResolveStep) {
        if !steps.iter().any(|(existing, _)| *existing == capability) {
            steps.push((capability, step));
        }
    }
}

impl Default for ResolutionPlan {
    fn default() -> Self {
        let mut plan = Self {
            required: Vec::new(),
            defaults: Vec::new(),
            fallbacks: Vec::new(),
        };

        Self::push(&mut plan.required, CapabilityId::of::<Dispatcher>(), required_step::<Dispatcher>);

        Self::push(&mut plan.defaults, CapabilityId::of::<Logging>(), default_step::<Logging>);
        Self::push(&mut plan.defaults, CapabilityId::of::<SystemClock>(), default_step::<SystemClock>);

        Self::push(&mut plan.fallbacks, CapabilityId::of::<Logging>(), fallback_step::<Logging>);
        Self::push(&mut plan.fallbacks, CapabilityId::of::<Screen>(), fallback_step::<Screen>);
        Self::push(&mut plan.fallbacks, CapabilityId::of::<Keyboard>(), fallback_step::<Keyboard>);
        Self::push(&mut plan.fallbacks, CapabilityId::of::<Mouse>(), fallback_step::<Mouse>);
        Self::push(&mut plan.fallbacks, CapabilityId::of::<AudioPlayback>(), fallback_step::<AudioPlayback>);
        Self::push(&mut plan.fallbacks, CapabilityId::of::<AudioCapture>(), fallback_step::<AudioCapture>);
        Self::push(&mut plan.fallbacks, CapabilityId::of::<SystemClock>(), fallback_step::<SystemClock>);

        plan
    }
}

fn required_step<C: Capability>(builder: &mut ApplicationBuilder) -> Result<(), BuildError> {
    if builder.has_context(C::KIND) {
        return Ok(());
    }
    builder.resolve::<C>(|_| {}, true)
}

fn default_step<C: Capability>(builder: &mut ApplicationBuilder) -> Result<(), BuildError> {
    if builder.has_context(C::KIND) {
        return Ok(());
    }
    builder.resolve::<C>(|_| {}, false)
}

fn fallback_step<C: FallbackCapability>(builder: &mut ApplicationBuilder) -> Result<(), BuildError> {
    builder.install_unavailable::<C>()
}

/// A builder for [`Application`]s.
///
/// # Example
///
/// ```rust
/// use hearth_sdk::prelude::*;
///
/// let app = ApplicationBuilder::new()
///     .with_name("demo")
///     .with_default_providers()
///     .build()
///     .expect("the default provider supplies a dispatcher");
///
/// assert_eq!(app.info().name(), "demo");
/// assert!(app.context().has_kind(kinds::DISPLAY));
/// assert!(!app.context().audio().is_available());
/// ```
pub struct ApplicationBuilder {
    name: Option<String>,
    id: Option<String>,
    version: Option<Version>,
    metadata: Option<ApplicationMetadata>,
    idle_sleep: Duration,
    providers: Vec<Box<dyn ContextProvider>>,
    used_providers: HashSet<ProviderId>,
    contexts: Vec<Box<dyn StagedContext>>,
    kinds: HashMap<String, usize>,
    plan: ResolutionPlan,
    error: Option<BuildError>,
}

impl ApplicationBuilder {
    /// Creates an empty builder with the standard resolution plan.
    pub fn new() -> Self {
        Self {
            name: None,
            id: None,
            version: None,
            metadata: None,
            idle_sleep: ApplicationConfig::default().idle_sleep(),
            providers: Vec::new(),
            used_providers: HashSet::new(),
            contexts: Vec::new(),
            kinds: HashMap::new(),
            plan: ResolutionPlan::default(),
            error: None,
        }
    }

    // --- Identity ---

    /// Sets the application name. May only be set once.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.apply(|builder| set_once(&mut builder.name, name, "name"))
    }

    /// Sets the unique application id. May only be set once.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.apply(|builder| set_once(&mut builder.id, id, "id"))
    }

    /// Sets the application version. May only be set once.
    pub fn with_version(self, version: Version) -> Self {
        self.apply(|builder| set_once(&mut builder.version, version, "version"))
    }

    /// Supplies build metadata used for any identity field left unset.
    ///
    /// See [`application_metadata!`](crate::application_metadata).
    pub fn with_metadata(mut self, metadata: ApplicationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Applies a configuration: identity fields (set-once rules apply), loop
    /// pacing, and the default providers when enabled.
    pub fn with_config(mut self, config: &ApplicationConfig) -> Self {
        if let Some(name) = &config.name {
            self = self.with_name(name.clone());
        }
        if let Some(id) = &config.id {
            self = self.with_id(id.clone());
        }
        if let Some(version) = &config.version {
            self = self.with_version(version.clone());
        }
        self.idle_sleep = config.idle_sleep();
        if config.default_providers {
            self = self.with_default_providers();
        }
        self
    }

    /// Sets how long the run loop sleeps when an iteration found no work.
    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    // --- Providers ---

    /// Adds a provider. A provider of a type that is already registered is
    /// ignored.
    pub fn with_provider<P: ContextProvider>(mut self, provider: P) -> Self {
        self.add_provider(Box::new(provider));
        self
    }

    /// Adds a provider and customises the registered instance of its type.
    pub fn with_provider_customised<P: ContextProvider>(
        mut self,
        provider: P,
        customise: impl FnOnce(&mut P),
    ) -> Self {
        let index = self.add_provider(Box::new(provider));
        if let Some(registered) = self.providers[index].as_any_mut().downcast_mut::<P>() {
            customise(registered);
        }
        self
    }

    /// Adds a default-constructed provider of type `P`.
    pub fn with_default_provider<P: ContextProvider + Default>(self) -> Self {
        self.with_provider(P::default())
    }

    /// Adds the built-in [`DefaultContextProvider`].
    pub fn with_default_providers(self) -> Self {
        self.with_default_provider::<DefaultContextProvider>()
    }

    /// Applies `customise` to every registered provider of type `P`.
    pub fn customise_providers<P: ContextProvider>(mut self, mut customise: impl FnMut(&mut P)) -> Self {
        for provider in &mut self.providers {
            if let Some(typed) = provider.as_any_mut().downcast_mut::<P>() {
                customise(typed);
            }
        }
        self
    }

    // --- Contexts ---

    /// Registers an already constructed context of capability `C` under its
    /// kind.
    ///
    /// Fails if the kind is occupied by a context of another capability. If
    /// it is occupied by one of the same capability, the existing context is
    /// kept.
    pub fn with_context<C: Capability>(self, context: Box<C::Object>) -> Self {
        self.apply(|builder| builder.insert_context::<C>(context))
    }

    /// Asks the providers, in registration order, for a context of
    /// capability `C`. Fails if none of them can produce one.
    pub fn with_capability<C: Capability>(self) -> Self {
        self.with_capability_customised::<C>(|_| {})
    }

    /// Like [`with_capability`](Self::with_capability), then customises the
    /// context. If the kind was already resolved for `C`, the existing
    /// context is customised instead of adding a duplicate.
    pub fn with_capability_customised<C: Capability>(
        self,
        customise: impl FnOnce(&mut C::Object),
    ) -> Self {
        self.apply(|builder| builder.resolve::<C>(customise, true))
    }

    /// Like [`with_capability`](Self::with_capability), but does nothing if
    /// no provider can produce `C`.
    pub fn try_with_capability<C: Capability>(self) -> Self {
        self.try_with_capability_customised::<C>(|_| {})
    }

    /// Like [`with_capability_customised`](Self::with_capability_customised),
    /// but does nothing if no provider can produce `C`.
    pub fn try_with_capability_customised<C: Capability>(
        self,
        customise: impl FnOnce(&mut C::Object),
    ) -> Self {
        self.apply(|builder| builder.resolve::<C>(customise, false))
    }

    /// Installs the unavailable stand-in for `C` if its kind is still free.
    pub fn with_unavailable<C: FallbackCapability>(self) -> Self {
        self.apply(|builder| builder.install_unavailable::<C>())
    }

    /// Applies `customise` to every registered context of capability `C`.
    pub fn customise_contexts<C: Capability>(mut self, mut customise: impl FnMut(&mut C::Object)) -> Self {
        for slot in &mut self.contexts {
            if let Some(staged) = slot.as_any_mut().downcast_mut::<Staged<C>>() {
                customise(&mut *staged.object);
            }
        }
        self
    }

    /// Returns `true` if a context occupies `kind`.
    pub fn has_context(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    // --- Resolution plan ---

    /// Makes `C` mandatory: the build fails if no provider can produce it.
    pub fn require<C: Capability>(mut self) -> Self {
        ResolutionPlan::push(&mut self.plan.required, CapabilityId::of::<C>(), required_step::<C>);
        self
    }

    /// Asks the providers for `C` during the default pass, if still unresolved.
    pub fn prefer<C: Capability>(mut self) -> Self {
        ResolutionPlan::push(&mut self.plan.defaults, CapabilityId::of::<C>(), default_step::<C>);
        self
    }

    /// Installs the stand-in for `C` during the fallback pass, if still
    /// unresolved.
    pub fn fallback<C: FallbackCapability>(mut self) -> Self {
        ResolutionPlan::push(&mut self.plan.fallbacks, CapabilityId::of::<C>(), fallback_step::<C>);
        self
    }

    // --- Build ---

    /// Runs the resolution protocol and builds an [`Application`].
    pub fn build(self) -> Result<Application, BuildError> {
        let idle_sleep = self.idle_sleep;
        self.build_with(|info, context| Application::new(info, context).with_idle_sleep(idle_sleep))
    }

    /// Runs the resolution protocol and hands the result to `construct`.
    pub fn build_with<A>(
        mut self,
        construct: impl FnOnce(ApplicationInfo, ApplicationContext) -> A,
    ) -> Result<A, BuildError> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }

        let info = self.resolve_identity()?;
        log::info!("Building application {info}...");

        let plan = std::mem::take(&mut self.plan);
        for (capability, step) in &plan.required {
            log::debug!("Required pass: {capability}");
            step(&mut self)?;
        }
        for (capability, step) in &plan.defaults {
            log::debug!("Default pass: {capability}");
            step(&mut self)?;
        }
        for (capability, step) in &plan.fallbacks {
            log::debug!("Fallback pass: {capability}");
            step(&mut self)?;
        }

        let providers = self.application_providers();
        let contexts = self
            .contexts
            .into_iter()
            .map(|slot| slot.freeze())
            .collect();
        let context = ApplicationContext::new(providers, contexts)?;

        log::info!(
            "Resolved {} contexts from {} providers.",
            context.len(),
            context.providers().len()
        );

        Ok(construct(info, context))
    }

    // --- Internals ---

    fn apply(mut self, operation: impl FnOnce(&mut Self) -> Result<(), BuildError>) -> Self {
        if self.error.is_none() {
            if let Err(error) = operation(&mut self) {
                log::debug!("Builder operation failed: {error}");
                self.error = Some(error);
            }
        }
        self
    }

    fn add_provider(&mut self, provider: Box<dyn ContextProvider>) -> usize {
        let id = provider.id();
        if let Some(index) = self.providers.iter().position(|existing| existing.id() == id) {
            log::debug!("Provider {id} is already registered, ignoring the new instance.");
            return index;
        }

        log::debug!("Registered provider {id}");
        self.providers.push(provider);
        self.providers.len() - 1
    }

    fn produce<C: Capability>(&self) -> Option<(ProviderId, Box<C::Object>)> {
        self.providers.iter().find_map(|provider| {
            let mut request = ContextRequest::new::<C>();
            provider.provide(&mut request);
            request
                .into_context::<C>()
                .map(|context| (provider.id(), context))
        })
    }

    fn resolve<C: Capability>(
        &mut self,
        customise: impl FnOnce(&mut C::Object),
        required: bool,
    ) -> Result<(), BuildError> {
        let capability = CapabilityId::of::<C>();
        let Some((producer, mut context)) = self.produce::<C>() else {
            if required {
                return Err(BuildError::CapabilityUnavailable { capability });
            }
            log::debug!("No provider offers {capability}, skipping.");
            return Ok(());
        };

        let kind = C::as_context(&*context).kind().to_owned();
        match self.kinds.get(&kind).copied() {
            None => {
                customise(&mut *context);
                log::debug!("Resolved '{kind}' from {producer}");
                self.used_providers.insert(producer);
                self.register::<C>(kind, context);
                Ok(())
            }
            Some(index) => {
                let existing = &mut self.contexts[index];
                let existing_capability = existing.capability();
                match existing.as_any_mut().downcast_mut::<Staged<C>>() {
                    Some(staged) => {
                        log::debug!("Kind '{kind}' is already resolved, customising it instead.");
                        customise(&mut *staged.object);
                        Ok(())
                    }
                    None => Err(BuildError::IncompatibleContext {
                        kind,
                        existing: existing_capability,
                        requested: capability,
                    }),
                }
            }
        }
    }

    fn insert_context<C: Capability>(&mut self, context: Box<C::Object>) -> Result<(), BuildError> {
        let kind = C::as_context(&*context).kind().to_owned();
        if let Some(&index) = self.kinds.get(&kind) {
            let existing = self.contexts[index].capability();
            let requested = CapabilityId::of::<C>();
            if existing != requested {
                return Err(BuildError::IncompatibleContext {
                    kind,
                    existing,
                    requested,
                });
            }
            log::debug!("Kind '{kind}' is already provided by {existing}, keeping the existing context.");
            return Ok(());
        }

        self.register::<C>(kind, context);
        Ok(())
    }

    fn install_unavailable<C: FallbackCapability>(&mut self) -> Result<(), BuildError> {
        if self.has_context(C::KIND) {
            return Ok(());
        }

        let stand_in = C::unavailable();
        if C::as_context(&*stand_in).is_available() {
            return Err(BuildError::StandInAvailable {
                capability: CapabilityId::of::<C>(),
            });
        }

        log::debug!("Installing the unavailable stand-in for '{}'", C::KIND);
        self.insert_context::<C>(stand_in)
    }

    fn register<C: Capability>(&mut self, kind: String, context: Box<C::Object>) {
        if let Some(provider) = C::as_context(&*context).provider() {
            self.used_providers.insert(provider);
        }
        self.kinds.insert(kind, self.contexts.len());
        self.contexts.push(Box::new(Staged::<C>::new(context)));
    }

    fn resolve_identity(&mut self) -> Result<ApplicationInfo, BuildError> {
        let metadata = self.metadata.take();

        let name = match self.name.take() {
            Some(name) => name,
            None => metadata
                .as_ref()
                .map(|metadata| metadata.name().to_owned())
                .or_else(executable_name)
                .ok_or(BuildError::IdentityUnresolved { field: "name" })?,
        };
        let id = self.id.take().unwrap_or_else(|| name.clone());
        let version = match (self.version.take(), metadata) {
            (Some(version), _) => version,
            (None, Some(metadata)) => metadata.version()?,
            (None, None) => {
                log::debug!("No application version set, using {}", Version::default());
                Version::default()
            }
        };

        Ok(ApplicationInfo::new(id, name, version))
    }

    fn application_providers(&mut self) -> Vec<Arc<dyn ContextProvider>> {
        let used = std::mem::take(&mut self.used_providers);
        std::mem::take(&mut self.providers)
            .into_iter()
            .filter(|provider| {
                let keep = !provider.ignore_if_unused() || used.contains(&provider.id());
                if !keep {
                    log::debug!("Dropping unused provider {}", provider.id());
                }
                keep
            })
            .map(Arc::from)
            .collect()
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<(), BuildError> {
    if slot.is_some() {
        return Err(BuildError::IdentityAlreadySet { field });
    }
    *slot = Some(value);
    Ok(())
}
