//! # Strategy Finders
//!
//! Per-request resolvers producing the concrete strategy instance for each
//! family. All finders apply the same precedence, highest first:
//!
//! 1. explicit override inherited through the controller configuration chain
//! 2. convention-guessed class for (script path, model)
//! 3. the controller chain's `application_*` default (or the family base)
//! 4. the generic base built on the providers of the model's mode
//!
//! Results are memoized per [`FinderContext`] — one evaluation context per
//! request — and recomputed only in a new context or after a clear.

pub mod authorizer_finder;
pub mod controller_finder;
pub mod decorator_finder;
pub mod paginator_finder;
pub mod servicer_finder;

pub use controller_finder::ControllerResolution;

use crate::dispatch::request::RequestContext;
use crate::engine::Engine;
use crate::error::Result;
use crate::registry::ModelClass;
use crate::strategies::{Authorizer, Decorator, Paginator, Servicer};
use dashmap::DashMap;
use std::sync::Arc;

/// Memoizing resolution context for one request.
pub struct FinderContext {
    script_path: String,
    controller_name: String,
    decorators: DashMap<String, Arc<dyn Decorator>>,
    servicers: DashMap<String, Arc<dyn Servicer>>,
    authorizers: DashMap<String, Arc<dyn Authorizer>>,
    paginators: DashMap<String, Arc<dyn Paginator>>,
}

impl FinderContext {
    pub fn new(script_path: impl Into<String>, controller_name: impl Into<String>) -> Self {
        Self {
            script_path: script_path.into(),
            controller_name: controller_name.into(),
            decorators: DashMap::new(),
            servicers: DashMap::new(),
            authorizers: DashMap::new(),
            paginators: DashMap::new(),
        }
    }

    pub fn script_path(&self) -> &str {
        &self.script_path
    }

    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    pub fn decorator(&self, engine: &Engine, model: &ModelClass) -> Result<Arc<dyn Decorator>> {
        if let Some(hit) = self.decorators.get(model.name()) {
            return Ok(Arc::clone(&hit));
        }
        let resolved = decorator_finder::find(engine, self, model)?;
        self.decorators
            .insert(model.name().to_string(), Arc::clone(&resolved));
        Ok(resolved)
    }

    pub fn servicer(&self, engine: &Engine, model: &ModelClass) -> Result<Arc<dyn Servicer>> {
        if let Some(hit) = self.servicers.get(model.name()) {
            return Ok(Arc::clone(&hit));
        }
        let resolved = servicer_finder::find(engine, self, model)?;
        self.servicers
            .insert(model.name().to_string(), Arc::clone(&resolved));
        Ok(resolved)
    }

    pub fn authorizer(
        &self,
        engine: &Engine,
        model: &ModelClass,
        request: &RequestContext,
    ) -> Result<Arc<dyn Authorizer>> {
        if let Some(hit) = self.authorizers.get(model.name()) {
            return Ok(Arc::clone(&hit));
        }
        let resolved = authorizer_finder::find(engine, self, model, request)?;
        self.authorizers
            .insert(model.name().to_string(), Arc::clone(&resolved));
        Ok(resolved)
    }

    pub fn paginator(&self, engine: &Engine, model: &ModelClass) -> Result<Arc<dyn Paginator>> {
        if let Some(hit) = self.paginators.get(model.name()) {
            return Ok(Arc::clone(&hit));
        }
        let resolved = paginator_finder::find(engine, self, model)?;
        self.paginators
            .insert(model.name().to_string(), Arc::clone(&resolved));
        Ok(resolved)
    }

    /// Drop all memoized instances, forcing re-resolution within this
    /// context.
    pub fn clear(&self) {
        self.decorators.clear();
        self.servicers.clear();
        self.authorizers.clear();
        self.paginators.clear();
    }
}
