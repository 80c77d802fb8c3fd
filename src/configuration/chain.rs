//! # Configuration Chain
//!
//! Inheritance-aware attribute resolution. Reading an attribute on a
//! controller checks the controller's own declaration, then each ancestor in
//! the explicit parent-chain table, stopping once the family's base class
//! has been consulted. The first declared value wins; resolved values
//! (including negative results) are memoized until [`ConfigurationChain::clear`].
//!
//! The degenerate case — a single controller with no parent — resolves
//! identically: its own declaration or nothing.

use crate::configuration::ControllerOptions;
use crate::constants::{SortingStrategy, StrategyKind};
use crate::error::{AdminError, Result};
use crate::registry::{ModelClass, TypeRegistry};
use crate::resolver;
use dashmap::DashMap;
use tracing::trace;

/// Configurable attributes resolvable through the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainAttribute {
    EngineName,
    LogoutPath,
    ModelClass,
    ResourceDecorator,
    ModelServicer,
    ModelAuthorizer,
    ModelPaginator,
    ApplicationDecorator,
    ApplicationServicer,
    ApplicationAuthorizer,
    ApplicationPaginator,
    PageSize,
    MaxTextLength,
    SortingStrategy,
    Models,
    ModelsToExclude,
}

impl ChainAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EngineName => "engine_name",
            Self::LogoutPath => "logout_path",
            Self::ModelClass => "model_class",
            Self::ResourceDecorator => "resource_decorator",
            Self::ModelServicer => "model_servicer",
            Self::ModelAuthorizer => "model_authorizer",
            Self::ModelPaginator => "model_paginator",
            Self::ApplicationDecorator => "application_decorator",
            Self::ApplicationServicer => "application_servicer",
            Self::ApplicationAuthorizer => "application_authorizer",
            Self::ApplicationPaginator => "application_paginator",
            Self::PageSize => "page_size",
            Self::MaxTextLength => "max_text_length",
            Self::SortingStrategy => "sorting_strategy",
            Self::Models => "models",
            Self::ModelsToExclude => "models_to_exclude",
        }
    }

    /// The per-model override attribute for a strategy kind.
    pub fn override_for(kind: StrategyKind) -> Option<Self> {
        match kind {
            StrategyKind::Controller => None,
            StrategyKind::Decorator => Some(Self::ResourceDecorator),
            StrategyKind::Servicer => Some(Self::ModelServicer),
            StrategyKind::Authorizer => Some(Self::ModelAuthorizer),
            StrategyKind::Paginator => Some(Self::ModelPaginator),
        }
    }
}

/// A memoized resolution outcome.
#[derive(Debug, Clone, PartialEq)]
enum MemoValue {
    Absent,
    Text(String),
    TextList(Vec<String>),
    Size(usize),
    Sorting(SortingStrategy),
}

/// Memo store for chain resolution. Shared process-wide and cleared as one
/// unit together with the class registry.
pub struct ConfigurationChain {
    memo: DashMap<String, MemoValue>,
}

impl ConfigurationChain {
    pub fn new() -> Self {
        Self {
            memo: DashMap::new(),
        }
    }

    /// Forget every memoized attribute, forcing re-resolution on next read.
    pub fn clear(&self) {
        self.memo.clear();
    }

    pub fn memoized_len(&self) -> usize {
        self.memo.len()
    }

    fn key(controller: &str, attribute: ChainAttribute) -> String {
        format!("{controller}#{}", attribute.as_str())
    }

    /// Resolve a text attribute through the chain.
    pub fn text(
        &self,
        types: &TypeRegistry,
        controller: &str,
        attribute: ChainAttribute,
    ) -> Option<String> {
        let key = Self::key(controller, attribute);
        if let Some(hit) = self.memo.get(&key) {
            return match &*hit {
                MemoValue::Text(value) => Some(value.clone()),
                _ => None,
            };
        }
        let resolved = walk(types, controller, |options| {
            text_extractor(options, attribute).cloned()
        });
        trace!(controller = controller, attribute = attribute.as_str(), resolved = ?resolved, "chain text resolution");
        self.memo.insert(
            key,
            resolved
                .clone()
                .map(MemoValue::Text)
                .unwrap_or(MemoValue::Absent),
        );
        resolved
    }

    /// Resolve a text-list attribute through the chain.
    pub fn text_list(
        &self,
        types: &TypeRegistry,
        controller: &str,
        attribute: ChainAttribute,
    ) -> Option<Vec<String>> {
        let key = Self::key(controller, attribute);
        if let Some(hit) = self.memo.get(&key) {
            return match &*hit {
                MemoValue::TextList(value) => Some(value.clone()),
                _ => None,
            };
        }
        let resolved = walk(types, controller, |options| match attribute {
            ChainAttribute::Models => options.models.clone(),
            ChainAttribute::ModelsToExclude => options.models_to_exclude.clone(),
            _ => None,
        });
        self.memo.insert(
            key,
            resolved
                .clone()
                .map(MemoValue::TextList)
                .unwrap_or(MemoValue::Absent),
        );
        resolved
    }

    /// Resolve a numeric attribute through the chain.
    pub fn size(
        &self,
        types: &TypeRegistry,
        controller: &str,
        attribute: ChainAttribute,
    ) -> Option<usize> {
        let key = Self::key(controller, attribute);
        if let Some(hit) = self.memo.get(&key) {
            return match &*hit {
                MemoValue::Size(value) => Some(*value),
                _ => None,
            };
        }
        let resolved = walk(types, controller, |options| match attribute {
            ChainAttribute::PageSize => options.page_size,
            ChainAttribute::MaxTextLength => options.max_text_length,
            _ => None,
        });
        self.memo.insert(
            key,
            resolved.map(MemoValue::Size).unwrap_or(MemoValue::Absent),
        );
        resolved
    }

    /// Resolve the sorting strategy through the chain.
    pub fn sorting(&self, types: &TypeRegistry, controller: &str) -> Option<SortingStrategy> {
        let key = Self::key(controller, ChainAttribute::SortingStrategy);
        if let Some(hit) = self.memo.get(&key) {
            return match &*hit {
                MemoValue::Sorting(value) => Some(*value),
                _ => None,
            };
        }
        let resolved = walk(types, controller, |options| options.sorting_strategy);
        self.memo.insert(
            key,
            resolved
                .map(MemoValue::Sorting)
                .unwrap_or(MemoValue::Absent),
        );
        resolved
    }

    /// The per-model strategy override a controller inherits for a kind.
    pub fn strategy_override(
        &self,
        types: &TypeRegistry,
        controller: &str,
        kind: StrategyKind,
    ) -> Option<String> {
        let attribute = ChainAttribute::override_for(kind)?;
        self.text(types, controller, attribute)
    }

    /// The model a controller serves: its inherited `model_class`
    /// declaration, else the convention guess from the controller's own
    /// name. A missing mapping is a configuration defect, not a routine
    /// miss, so it errors with an actionable `ClassNotFound`.
    pub fn model_class_for(&self, types: &TypeRegistry, controller: &str) -> Result<ModelClass> {
        if let Some(name) = self.text(types, controller, ChainAttribute::ModelClass) {
            return types.model(&name).ok_or_else(|| {
                AdminError::class_not_found(
                    name.clone(),
                    format!("model_class on {controller} names an unregistered model"),
                )
            });
        }
        resolver::resolve_model(types, controller).ok_or_else(|| {
            AdminError::class_not_found(
                controller,
                format!(
                    "no registered model matches {controller}; declare model_class on it or register the model it serves"
                ),
            )
        })
    }

    /// The application-level base for a kind: the inherited `application_*`
    /// declaration, else the family's base class.
    pub fn application_for(
        &self,
        types: &TypeRegistry,
        controller: &str,
        kind: StrategyKind,
    ) -> Option<String> {
        let attribute = match kind {
            StrategyKind::Controller => return None,
            StrategyKind::Decorator => ChainAttribute::ApplicationDecorator,
            StrategyKind::Servicer => ChainAttribute::ApplicationServicer,
            StrategyKind::Authorizer => ChainAttribute::ApplicationAuthorizer,
            StrategyKind::Paginator => ChainAttribute::ApplicationPaginator,
        };
        self.text(types, controller, attribute)
            .or_else(|| types.family_base_name(kind))
    }
}

impl Default for ConfigurationChain {
    fn default() -> Self {
        Self::new()
    }
}

fn text_extractor(options: &ControllerOptions, attribute: ChainAttribute) -> Option<&String> {
    match attribute {
        ChainAttribute::EngineName => options.engine_name.as_ref(),
        ChainAttribute::LogoutPath => options.logout_path.as_ref(),
        ChainAttribute::ModelClass => options.model_class.as_ref(),
        ChainAttribute::ResourceDecorator => options.resource_decorator.as_ref(),
        ChainAttribute::ModelServicer => options.model_servicer.as_ref(),
        ChainAttribute::ModelAuthorizer => options.model_authorizer.as_ref(),
        ChainAttribute::ModelPaginator => options.model_paginator.as_ref(),
        ChainAttribute::ApplicationDecorator => options.application_decorator.as_ref(),
        ChainAttribute::ApplicationServicer => options.application_servicer.as_ref(),
        ChainAttribute::ApplicationAuthorizer => options.application_authorizer.as_ref(),
        ChainAttribute::ApplicationPaginator => options.application_paginator.as_ref(),
        _ => None,
    }
}

/// Walk a controller's parent chain, returning the first declared value.
/// The walk stops after consulting a class flagged as the family base; a
/// controller with no registration resolves to nothing.
fn walk<V, F>(types: &TypeRegistry, controller: &str, extract: F) -> Option<V>
where
    F: Fn(&ControllerOptions) -> Option<V>,
{
    let mut current = controller.to_string();
    let mut hops = 0usize;
    loop {
        if let Some(options) = types.controller_options(&current) {
            if let Some(value) = extract(options) {
                return Some(value);
            }
        }
        let descriptor = types.descriptor_of(StrategyKind::Controller, &current)?;
        if descriptor.base_marker {
            return None;
        }
        match &descriptor.parent {
            Some(parent) => current = parent.clone(),
            None => return None,
        }
        // Guard against declared parent cycles
        hops += 1;
        if hops > 64 {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StrategyDef;

    fn chain_fixture() -> (TypeRegistry, ConfigurationChain) {
        let mut types = TypeRegistry::new();
        types
            .register_controller(
                StrategyDef::named("ResourcesController").base_class(),
                ControllerOptions {
                    page_size: Some(50),
                    engine_name: Some("admin".to_string()),
                    ..ControllerOptions::default()
                },
            )
            .expect("base registration failed");
        types
            .register_controller(
                StrategyDef::named("Admin::ApplicationController").parent("ResourcesController"),
                ControllerOptions {
                    logout_path: Some("/logout".to_string()),
                    ..ControllerOptions::default()
                },
            )
            .expect("registration failed");
        types
            .register_controller(
                StrategyDef::named("Admin::ProductsController")
                    .parent("Admin::ApplicationController"),
                ControllerOptions::default(),
            )
            .expect("registration failed");
        (types, ConfigurationChain::new())
    }

    #[test]
    fn test_inherited_attribute_resolution() {
        let (types, chain) = chain_fixture();
        assert_eq!(
            chain.text(&types, "Admin::ProductsController", ChainAttribute::LogoutPath),
            Some("/logout".to_string())
        );
        assert_eq!(
            chain.size(&types, "Admin::ProductsController", ChainAttribute::PageSize),
            Some(50)
        );
        assert_eq!(
            chain.text(&types, "Admin::ProductsController", ChainAttribute::EngineName),
            Some("admin".to_string())
        );
    }

    #[test]
    fn test_memoization_and_clear() {
        let (mut types, chain) = chain_fixture();

        assert_eq!(
            chain.size(&types, "Admin::ProductsController", ChainAttribute::PageSize),
            Some(50)
        );
        let memoized = chain.memoized_len();
        assert!(memoized > 0);

        // Mutating the table does not change memoized reads
        types
            .register_controller(
                StrategyDef::named("Admin::WidgetsController").parent("ResourcesController"),
                ControllerOptions {
                    page_size: Some(10),
                    ..ControllerOptions::default()
                },
            )
            .expect("registration failed");
        assert_eq!(
            chain.size(&types, "Admin::ProductsController", ChainAttribute::PageSize),
            Some(50)
        );

        chain.clear();
        assert_eq!(chain.memoized_len(), 0);
        assert_eq!(
            chain.size(&types, "Admin::WidgetsController", ChainAttribute::PageSize),
            Some(10)
        );
    }

    #[test]
    fn test_unregistered_controller_resolves_to_nothing() {
        let (types, chain) = chain_fixture();
        assert_eq!(
            chain.text(&types, "UnknownController", ChainAttribute::LogoutPath),
            None
        );
    }

    #[test]
    fn test_application_for_falls_back_to_family_base() {
        let (mut types, chain) = chain_fixture();
        types
            .register_authorizer(StrategyDef::named("ModelAuthorizer").base_class())
            .expect("registration failed");
        assert_eq!(
            chain.application_for(&types, "Admin::ProductsController", StrategyKind::Authorizer),
            Some("ModelAuthorizer".to_string())
        );
    }
}
