//! # Engine
//!
//! The facade owning every piece of named state: configuration, the type
//! registration table, the cached class registry, the configuration-chain
//! memo store, installed modes, and the host's route table. Hosts build one
//! engine at boot, register their types against it, and hand it every
//! request.
//!
//! All cached state resets through one big hammer: [`Engine::clear`]. There
//! is deliberately no partial invalidation — a development reload recomputes
//! everything, trading a full re-resolution for correctness.

use crate::config::EngineConfig;
use crate::configuration::{ConfigurationChain, ControllerOptions};
use crate::constants::StrategyKind;
use crate::dispatch::request::{Parameters, RequestContext, Response};
use crate::dispatch::router::ResourcesRouter;
use crate::error::Result;
use crate::modes::Mode;
use crate::registry::{ClassRegistry, ModelClass, StrategyDef, TypeRegistry};
use crate::strategies::{Authorizer, Controller, Decorator, Paginator, Servicer};
use crate::urls::{EngineUrlFor, RouteTable};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub struct Engine {
    config: RwLock<EngineConfig>,
    types: RwLock<TypeRegistry>,
    registry: ClassRegistry,
    chain: ConfigurationChain,
    modes: RwLock<Vec<Arc<dyn Mode>>>,
    routes: RwLock<RouteTable>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: RwLock::new(config),
            types: RwLock::new(TypeRegistry::new()),
            registry: ClassRegistry::new(),
            chain: ConfigurationChain::new(),
            modes: RwLock::new(Vec::new()),
            routes: RwLock::new(RouteTable::new()),
        }
    }

    /// An engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    // ---- state access ----

    pub fn config(&self) -> EngineConfig {
        self.config.read().clone()
    }

    pub fn update_config(&self, config: EngineConfig) -> Result<()> {
        config.validate()?;
        *self.config.write() = config;
        self.clear();
        Ok(())
    }

    /// Run a closure against the type registration table.
    pub fn with_types<R>(&self, f: impl FnOnce(&TypeRegistry) -> R) -> R {
        f(&self.types.read())
    }

    /// Run a closure against the host route table.
    pub fn routes<R>(&self, f: impl FnOnce(&RouteTable) -> R) -> R {
        f(&self.routes.read())
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn chain(&self) -> &ConfigurationChain {
        &self.chain
    }

    /// Snapshot of installed modes, in installation order.
    pub fn modes(&self) -> Vec<Arc<dyn Mode>> {
        self.modes.read().clone()
    }

    // ---- registration ----

    /// Install a data-source adapter. Invalidates the cached model claims
    /// since the claim scan depends on the installed set.
    pub fn install_mode(&self, mode: Arc<dyn Mode>) {
        info!(mode = mode.name(), "Installing mode");
        self.modes.write().push(mode);
        self.registry.clear();
    }

    pub fn register_model(&self, name: impl Into<String>) -> ModelClass {
        self.types.write().register_model(name)
    }

    pub fn register_controller(
        &self,
        def: StrategyDef<dyn Controller>,
        options: ControllerOptions,
    ) -> Result<()> {
        self.types.write().register_controller(def, options)
    }

    pub fn register_decorator(&self, def: StrategyDef<dyn Decorator>) -> Result<()> {
        self.types.write().register_decorator(def)
    }

    pub fn register_servicer(&self, def: StrategyDef<dyn Servicer>) -> Result<()> {
        self.types.write().register_servicer(def)
    }

    pub fn register_authorizer(&self, def: StrategyDef<dyn Authorizer>) -> Result<()> {
        self.types.write().register_authorizer(def)
    }

    pub fn register_paginator(&self, def: StrategyDef<dyn Paginator>) -> Result<()> {
        self.types.write().register_paginator(def)
    }

    /// Assign a per-controller strategy override after registration.
    pub fn set_strategy_override(
        &self,
        controller: &str,
        kind: StrategyKind,
        value: impl Into<String>,
    ) -> Result<()> {
        self.types
            .write()
            .set_strategy_override(controller, kind, value)
    }

    pub fn add_mount(&self, engine_name: impl Into<String>, mount_path: impl Into<String>) {
        self.routes.write().add_mount(engine_name, mount_path);
    }

    pub fn add_route(
        &self,
        path: impl Into<String>,
        controller: Option<String>,
        action: Option<String>,
    ) {
        self.routes.write().add_route(path, controller, action);
    }

    // ---- model set ----

    /// All handled models: every mode-claimed model inside the configured
    /// include/exclude set, sorted by name.
    pub fn models(&self) -> Vec<ModelClass> {
        let config = self.config();
        self.registry
            .models(&self.modes())
            .into_iter()
            .filter(|model| config.model_included(model.name()))
            .collect()
    }

    /// Whether a model is claimed by a mode and not configured away.
    pub fn model_handled(&self, model: &ModelClass) -> bool {
        self.config().model_included(model.name())
            && self.registry.mode_of(&self.modes(), model).is_some()
    }

    // ---- dispatch ----

    /// Serve one request.
    pub async fn handle(&self, request: &mut RequestContext) -> Result<Response> {
        ResourcesRouter::dispatch(self, request).await
    }

    // ---- URL helpers ----

    #[allow(clippy::too_many_arguments)]
    pub fn url_for(
        &self,
        request: &RequestContext,
        controller_name: Option<&str>,
        action: &str,
        model: Option<&ModelClass>,
        id: Option<&str>,
        extra: &Parameters,
        with_query: bool,
    ) -> Result<String> {
        EngineUrlFor::url_for(
            self,
            request,
            controller_name,
            action,
            model,
            id,
            extra,
            with_query,
        )
    }

    pub fn index_path(&self, model: &ModelClass, request: &RequestContext) -> Result<String> {
        self.url_for(
            request,
            None,
            crate::constants::actions::INDEX,
            Some(model),
            None,
            &Parameters::new(),
            false,
        )
    }

    pub fn new_path(&self, model: &ModelClass, request: &RequestContext) -> Result<String> {
        self.url_for(
            request,
            None,
            crate::constants::actions::NEW,
            Some(model),
            None,
            &Parameters::new(),
            false,
        )
    }

    pub fn show_path(
        &self,
        model: &ModelClass,
        id: &str,
        request: &RequestContext,
    ) -> Result<String> {
        self.url_for(
            request,
            None,
            crate::constants::actions::SHOW,
            Some(model),
            Some(id),
            &Parameters::new(),
            false,
        )
    }

    pub fn edit_path(
        &self,
        model: &ModelClass,
        id: &str,
        request: &RequestContext,
    ) -> Result<String> {
        self.url_for(
            request,
            None,
            crate::constants::actions::EDIT,
            Some(model),
            Some(id),
            &Parameters::new(),
            false,
        )
    }

    // ---- lifecycle ----

    /// The big hammer: empty the class registry and every memoized chain
    /// attribute. Called on development reload and between test cases.
    pub fn clear(&self) {
        self.registry.clear();
        self.chain.clear();
        info!("Engine caches cleared");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
