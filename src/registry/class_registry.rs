//! # Class Registry
//!
//! The process-wide cache of resolved associations: which mode claims each
//! model, which strategy class convention-resolves for it, and which
//! providers its mode supplies. Slots are populated lazily on first
//! resolution and only ever emptied wholesale by [`ClassRegistry::clear`].
//!
//! Concurrent first-population races are benign: resolution is a pure
//! function of registered metadata, so redundant computations overwrite a
//! slot with an equivalent value (last write wins).

use crate::constants::StrategyKind;
use crate::logging::log_registry_operation;
use crate::modes::{AuthorizationProvider, Mode, PaginationProvider, ServiceProvider};
use crate::naming::converter::to_strategy_name;
use crate::registry::{ModelClass, TypeRegistry};
use crate::resolver;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Entry counts per cached association, for diagnostics.
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub claimed_models: usize,
    pub controller_entries: usize,
    pub decorator_entries: usize,
    pub servicer_entries: usize,
    pub authorizer_entries: usize,
    pub paginator_entries: usize,
    pub service_provider_entries: usize,
    pub pagination_provider_entries: usize,
    pub authorization_provider_entries: usize,
    pub built_at: Option<DateTime<Utc>>,
}

/// Cached model associations. Every field is a named slot; `clear()` zeroes
/// each one explicitly.
pub struct ClassRegistry {
    mode_map: RwLock<Option<Arc<HashMap<String, Arc<dyn Mode>>>>>,
    controller_map: DashMap<String, String>,
    decorator_map: DashMap<String, String>,
    servicer_map: DashMap<String, String>,
    authorizer_map: DashMap<String, String>,
    paginator_map: DashMap<String, String>,
    service_provider_map: DashMap<String, Arc<dyn ServiceProvider>>,
    pagination_provider_map: DashMap<String, Arc<dyn PaginationProvider>>,
    authorization_provider_map: DashMap<String, Vec<Arc<dyn AuthorizationProvider>>>,
    built_at: RwLock<Option<DateTime<Utc>>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self {
            mode_map: RwLock::new(None),
            controller_map: DashMap::new(),
            decorator_map: DashMap::new(),
            servicer_map: DashMap::new(),
            authorizer_map: DashMap::new(),
            paginator_map: DashMap::new(),
            service_provider_map: DashMap::new(),
            pagination_provider_map: DashMap::new(),
            authorization_provider_map: DashMap::new(),
            built_at: RwLock::new(None),
        }
    }

    /// The model→mode claim table, built on first use by scanning installed
    /// modes. The first installed mode claiming a model wins.
    fn mode_map(&self, modes: &[Arc<dyn Mode>]) -> Arc<HashMap<String, Arc<dyn Mode>>> {
        if let Some(map) = self.mode_map.read().as_ref() {
            return Arc::clone(map);
        }

        let mut map: HashMap<String, Arc<dyn Mode>> = HashMap::new();
        for mode in modes {
            for model in mode.model_finder().all() {
                map.entry(model.name().to_string())
                    .or_insert_with(|| Arc::clone(mode));
            }
        }
        let map = Arc::new(map);
        *self.mode_map.write() = Some(Arc::clone(&map));
        *self.built_at.write() = Some(Utc::now());
        let details = format!("{} models claimed", map.len());
        log_registry_operation("mode_scan", None, None, "built", Some(details.as_str()));
        map
    }

    /// The mode claiming a model, if any.
    pub fn mode_of(&self, modes: &[Arc<dyn Mode>], model: &ModelClass) -> Option<Arc<dyn Mode>> {
        self.mode_map(modes).get(model.name()).cloned()
    }

    /// All models claimed by any installed mode, sorted by name.
    pub fn models(&self, modes: &[Arc<dyn Mode>]) -> Vec<ModelClass> {
        let mut names: Vec<String> = self.mode_map(modes).keys().cloned().collect();
        names.sort();
        names.into_iter().map(ModelClass::new).collect()
    }

    /// The convention-resolved strategy class for a model under a mount, or
    /// `None` when no registered class matches. Both outcomes are cached.
    pub fn strategy_class_of(
        &self,
        types: &TypeRegistry,
        kind: StrategyKind,
        script_path: &str,
        model: &ModelClass,
    ) -> Option<String> {
        let cache = self.cache_for(kind);
        let key = format!("{script_path}#{}", model.name());
        if let Some(hit) = cache.get(&key) {
            return if hit.is_empty() {
                None
            } else {
                Some(hit.clone())
            };
        }

        let source = to_strategy_name(
            script_path,
            &model.resources_name(),
            StrategyKind::Controller,
        );
        let resolved = resolver::resolve_strategy(types, &source, kind, |descriptor| {
            match &descriptor.model_class {
                Some(bound) => bound == model.name(),
                None => true,
            }
        });
        // Negative results are cached as the empty string
        cache.insert(key, resolved.clone().unwrap_or_default());
        log_registry_operation(
            "strategy_resolution",
            Some(model.name()),
            Some(kind.as_str()),
            if resolved.is_some() { "resolved" } else { "missed" },
            resolved.as_deref(),
        );
        resolved
    }

    fn cache_for(&self, kind: StrategyKind) -> &DashMap<String, String> {
        match kind {
            StrategyKind::Controller => &self.controller_map,
            StrategyKind::Decorator => &self.decorator_map,
            StrategyKind::Servicer => &self.servicer_map,
            StrategyKind::Authorizer => &self.authorizer_map,
            StrategyKind::Paginator => &self.paginator_map,
        }
    }

    /// The service provider the claiming mode supplies for a model.
    pub fn service_provider_of(
        &self,
        modes: &[Arc<dyn Mode>],
        model: &ModelClass,
    ) -> Option<Arc<dyn ServiceProvider>> {
        if let Some(hit) = self.service_provider_map.get(model.name()) {
            return Some(Arc::clone(&hit));
        }
        let provider = self.mode_of(modes, model)?.model_service_provider(model);
        self.service_provider_map
            .insert(model.name().to_string(), Arc::clone(&provider));
        Some(provider)
    }

    /// The pagination provider the claiming mode supplies for a model.
    pub fn pagination_provider_of(
        &self,
        modes: &[Arc<dyn Mode>],
        model: &ModelClass,
    ) -> Option<Arc<dyn PaginationProvider>> {
        if let Some(hit) = self.pagination_provider_map.get(model.name()) {
            return Some(Arc::clone(&hit));
        }
        let provider = self.mode_of(modes, model)?.model_pagination_provider();
        self.pagination_provider_map
            .insert(model.name().to_string(), Arc::clone(&provider));
        Some(provider)
    }

    /// The ordered authorization providers the claiming mode supplies.
    pub fn authorization_providers_of(
        &self,
        modes: &[Arc<dyn Mode>],
        model: &ModelClass,
    ) -> Vec<Arc<dyn AuthorizationProvider>> {
        if let Some(hit) = self.authorization_provider_map.get(model.name()) {
            return hit.clone();
        }
        let providers = self
            .mode_of(modes, model)
            .map(|mode| mode.model_authorization_providers())
            .unwrap_or_default();
        self.authorization_provider_map
            .insert(model.name().to_string(), providers.clone());
        providers
    }

    /// Empty every named slot. Called on development reload and between test
    /// cases; there is deliberately no per-entry invalidation.
    pub fn clear(&self) {
        *self.mode_map.write() = None;
        self.controller_map.clear();
        self.decorator_map.clear();
        self.servicer_map.clear();
        self.authorizer_map.clear();
        self.paginator_map.clear();
        self.service_provider_map.clear();
        self.pagination_provider_map.clear();
        self.authorization_provider_map.clear();
        *self.built_at.write() = None;
        log_registry_operation("clear", None, None, "cleared", None);
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            claimed_models: self
                .mode_map
                .read()
                .as_ref()
                .map(|map| map.len())
                .unwrap_or(0),
            controller_entries: self.controller_map.len(),
            decorator_entries: self.decorator_map.len(),
            servicer_entries: self.servicer_map.len(),
            authorizer_entries: self.authorizer_map.len(),
            paginator_entries: self.paginator_map.len(),
            service_provider_entries: self.service_provider_map.len(),
            pagination_provider_entries: self.pagination_provider_map.len(),
            authorization_provider_entries: self.authorization_provider_map.len(),
            built_at: *self.built_at.read(),
        }
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::MemoryMode;
    use crate::registry::StrategyDef;

    #[test]
    fn test_mode_claim_is_cached_until_clear() {
        let registry = ClassRegistry::new();
        let model = ModelClass::new("Product");

        let first = Arc::new(MemoryMode::new());
        let second = Arc::new(MemoryMode::new());
        first.manage(model.clone());

        let modes: Vec<Arc<dyn Mode>> = vec![first.clone(), second.clone()];
        let claimed = registry.mode_of(&modes, &model).expect("claim expected");
        assert_eq!(claimed.name(), "memory");

        // Swap the claim to the other mode; the cached scan must keep
        // answering until cleared
        first.release(&model);
        second.manage(model.clone());
        assert!(registry.mode_of(&modes, &model).is_some());
        let stats = registry.stats();
        assert_eq!(stats.claimed_models, 1);
        assert!(stats.built_at.is_some());

        registry.clear();
        let reclaimed = registry.mode_of(&modes, &model).expect("claim expected");
        let second_dyn: Arc<dyn Mode> = second.clone();
        assert!(Arc::ptr_eq(&reclaimed, &second_dyn));
    }

    #[test]
    fn test_unclaimed_model_has_no_mode() {
        let registry = ClassRegistry::new();
        let modes: Vec<Arc<dyn Mode>> = vec![Arc::new(MemoryMode::new())];
        assert!(registry
            .mode_of(&modes, &ModelClass::new("Unclaimed"))
            .is_none());
    }

    #[test]
    fn test_strategy_resolution_memoizes_misses() {
        let registry = ClassRegistry::new();
        let mut types = TypeRegistry::new();
        let model = types.register_model("Product");

        assert!(registry
            .strategy_class_of(&types, StrategyKind::Decorator, "/admin", &model)
            .is_none());

        // Registering after the miss does not change the cached answer
        types
            .register_decorator(StrategyDef::named("ProductDecorator"))
            .expect("registration failed");
        assert!(registry
            .strategy_class_of(&types, StrategyKind::Decorator, "/admin", &model)
            .is_none());

        // A clear forces re-resolution against the current table
        registry.clear();
        assert_eq!(
            registry.strategy_class_of(&types, StrategyKind::Decorator, "/admin", &model),
            Some("ProductDecorator".to_string())
        );
    }
}
