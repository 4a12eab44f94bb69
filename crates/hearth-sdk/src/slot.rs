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

//! Type-erased storage for contexts, before and after resolution.
//!
//! A context is stored together with the capability it was registered
//! under. While the builder stages it, the slot owns it uniquely so it can
//! be customised in place; freezing turns the slot into a shared,
//! read-only one that typed lookups downcast back to its capability.

use hearth_core::{Capability, CapabilityId, Context};
use std::any::Any;
use std::sync::Arc;

/// A context owned by the builder.
pub(crate) trait StagedContext: Send + Sync {
    fn capability(&self) -> CapabilityId;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn freeze(self: Box<Self>) -> Arc<dyn ResolvedContext>;
}

/// A context owned by a resolved application context.
pub(crate) trait ResolvedContext: Send + Sync {
    fn capability(&self) -> CapabilityId;

    fn context(&self) -> &dyn Context;

    fn as_any(&self) -> &dyn Any;
}

pub(crate) struct Staged<C: Capability> {
    pub(crate) object: Box<C::Object>,
}

impl<C: Capability> Staged<C> {
    pub(crate) fn new(object: Box<C::Object>) -> Self {
        Self { object }
    }
}

impl<C: Capability> StagedContext for Staged<C> {
    fn capability(&self) -> CapabilityId {
        CapabilityId::of::<C>()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn freeze(self: Box<Self>) -> Arc<dyn ResolvedContext> {
        Arc::new(Resolved::<C> {
            object: Arc::from(self.object),
        })
    }
}

pub(crate) struct Resolved<C: Capability> {
    pub(crate) object: Arc<C::Object>,
}

impl<C: Capability> ResolvedContext for Resolved<C> {
    fn capability(&self) -> CapabilityId {
        CapabilityId::of::<C>()
    }

    fn context(&self) -> &dyn Context {
        C::as_context(&*self.object)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Returns the typed handle stored in `slot` if it was registered under `C`.
pub(crate) fn downcast<C: Capability>(slot: &dyn ResolvedContext) -> Option<Arc<C::Object>> {
    slot.as_any()
        .downcast_ref::<Resolved<C>>()
        .map(|resolved| Arc::clone(&resolved.object))
}
