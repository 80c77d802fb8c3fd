//! # Type Registry
//!
//! The explicit registration table behind all convention guessing. Host
//! applications register their models and strategy classes at boot; every
//! later lookup — request dispatch, convention resolution, configuration
//! climbing — reads this table. There is no reflective class loading.
//!
//! Each strategy registration carries an optional parent name. Those links
//! form an explicit parent-chain table, and every ancestry question
//! (base-class boundaries, override validation, "too generic" rejection) is
//! an explicit walk over that table.

use crate::configuration::ControllerOptions;
use crate::constants::StrategyKind;
use crate::error::{AdminError, Result};
use crate::naming::converter::to_resources_name;
use crate::strategies::{Authorizer, Controller, Decorator, Paginator, Servicer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Handle to a registered data-model type. Identity is the fully-qualified
/// name, not pointer equality, so host-process reloads that recreate the
/// type keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelClass {
    name: String,
}

impl ModelClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pluralized, colon-namespaced resources name this model answers to.
    pub fn resources_name(&self) -> String {
        to_resources_name(&self.name)
    }
}

impl std::fmt::Display for ModelClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Instantiates a registered strategy for a model.
pub type StrategyFactory<T> = Arc<dyn Fn(&ModelClass) -> Arc<T> + Send + Sync>;

/// Declarative facts about a registered strategy class.
#[derive(Debug, Clone)]
pub struct StrategyDescriptor {
    pub name: String,
    pub kind: StrategyKind,
    /// Explicit parent link; the chain of these is the inheritance table.
    pub parent: Option<String>,
    /// Marks the root of attribute-resolution climbing for its family.
    pub base_marker: bool,
    /// Explicit model binding; `None` means the binding is guessed from the
    /// class name when needed.
    pub model_class: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// A registered strategy class: its descriptor plus an optional factory.
/// Registrations without a factory are declarative subclasses served by the
/// family's generic base behavior.
pub struct FamilyEntry<T: ?Sized + Send + Sync> {
    pub descriptor: StrategyDescriptor,
    pub factory: Option<StrategyFactory<T>>,
}

/// Builder for a strategy registration.
pub struct StrategyDef<T: ?Sized + Send + Sync> {
    name: String,
    parent: Option<String>,
    base_marker: bool,
    model_class: Option<String>,
    factory: Option<StrategyFactory<T>>,
}

impl<T: ?Sized + Send + Sync> StrategyDef<T> {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            base_marker: false,
            model_class: None,
            factory: None,
        }
    }

    /// Link this class under a previously registered parent.
    pub fn parent(mut self, name: impl Into<String>) -> Self {
        self.parent = Some(name.into());
        self
    }

    /// Flag this class as the root of its family's attribute climbing.
    pub fn base_class(mut self) -> Self {
        self.base_marker = true;
        self
    }

    /// Bind this class to a model explicitly instead of by name convention.
    pub fn model(mut self, name: impl Into<String>) -> Self {
        self.model_class = Some(name.into());
        self
    }

    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&ModelClass) -> Arc<T> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }
}

/// One strategy family's registrations.
pub struct StrategyFamily<T: ?Sized + Send + Sync> {
    kind: StrategyKind,
    entries: HashMap<String, FamilyEntry<T>>,
    base: Option<String>,
}

impl<T: ?Sized + Send + Sync> StrategyFamily<T> {
    fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
            base: None,
        }
    }

    fn insert(&mut self, def: StrategyDef<T>) -> Result<String> {
        if let Some(parent) = &def.parent {
            if !self.entries.contains_key(parent) {
                return Err(AdminError::configuration(
                    "TypeRegistry",
                    format!(
                        "{} {} names unregistered parent {}",
                        self.kind, def.name, parent
                    ),
                ));
            }
        }
        if def.base_marker {
            if let Some(existing) = &self.base {
                if existing != &def.name {
                    return Err(AdminError::configuration(
                        "TypeRegistry",
                        format!(
                            "{} family already has base class {existing}; {} cannot also be one",
                            self.kind, def.name
                        ),
                    ));
                }
            }
            self.base = Some(def.name.clone());
        }

        let name = def.name.clone();
        debug!(kind = %self.kind, class = %name, "Registering strategy class");
        self.entries.insert(
            name.clone(),
            FamilyEntry {
                descriptor: StrategyDescriptor {
                    name: def.name,
                    kind: self.kind,
                    parent: def.parent,
                    base_marker: def.base_marker,
                    model_class: def.model_class,
                    registered_at: Utc::now(),
                },
                factory: def.factory,
            },
        );
        Ok(name)
    }

    fn remove(&mut self, name: &str) {
        self.entries.remove(name);
        if self.base.as_deref() == Some(name) {
            self.base = None;
        }
    }

    pub fn get(&self, name: &str) -> Option<&FamilyEntry<T>> {
        self.entries.get(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&StrategyDescriptor> {
        self.entries.get(name).map(|entry| &entry.descriptor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn base_name(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The registration table: models plus the five strategy families.
pub struct TypeRegistry {
    models: HashMap<String, ModelClass>,
    controllers: StrategyFamily<dyn Controller>,
    decorators: StrategyFamily<dyn Decorator>,
    servicers: StrategyFamily<dyn Servicer>,
    authorizers: StrategyFamily<dyn Authorizer>,
    paginators: StrategyFamily<dyn Paginator>,
    controller_options: HashMap<String, ControllerOptions>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            controllers: StrategyFamily::new(StrategyKind::Controller),
            decorators: StrategyFamily::new(StrategyKind::Decorator),
            servicers: StrategyFamily::new(StrategyKind::Servicer),
            authorizers: StrategyFamily::new(StrategyKind::Authorizer),
            paginators: StrategyFamily::new(StrategyKind::Paginator),
            controller_options: HashMap::new(),
        }
    }

    // ---- models ----

    pub fn register_model(&mut self, name: impl Into<String>) -> ModelClass {
        let model = ModelClass::new(name);
        self.models.insert(model.name().to_string(), model.clone());
        model
    }

    pub fn model(&self, name: &str) -> Option<ModelClass> {
        self.models.get(name).cloned()
    }

    pub fn model_names(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    // ---- strategy registration ----

    pub fn register_controller(
        &mut self,
        def: StrategyDef<dyn Controller>,
        options: ControllerOptions,
    ) -> Result<()> {
        let name = self.controllers.insert(def)?;
        if let Err(err) = self.validate_controller_options(&name, &options) {
            self.controllers.remove(&name);
            return Err(err);
        }
        self.controller_options.insert(name, options);
        Ok(())
    }

    pub fn register_decorator(&mut self, def: StrategyDef<dyn Decorator>) -> Result<()> {
        self.decorators.insert(def).map(|_| ())
    }

    pub fn register_servicer(&mut self, def: StrategyDef<dyn Servicer>) -> Result<()> {
        self.servicers.insert(def).map(|_| ())
    }

    pub fn register_authorizer(&mut self, def: StrategyDef<dyn Authorizer>) -> Result<()> {
        self.authorizers.insert(def).map(|_| ())
    }

    pub fn register_paginator(&mut self, def: StrategyDef<dyn Paginator>) -> Result<()> {
        self.paginators.insert(def).map(|_| ())
    }

    // ---- family access ----

    pub fn controllers(&self) -> &StrategyFamily<dyn Controller> {
        &self.controllers
    }

    pub fn decorators(&self) -> &StrategyFamily<dyn Decorator> {
        &self.decorators
    }

    pub fn servicers(&self) -> &StrategyFamily<dyn Servicer> {
        &self.servicers
    }

    pub fn authorizers(&self) -> &StrategyFamily<dyn Authorizer> {
        &self.authorizers
    }

    pub fn paginators(&self) -> &StrategyFamily<dyn Paginator> {
        &self.paginators
    }

    // ---- controller configuration ----

    pub fn controller_options(&self, name: &str) -> Option<&ControllerOptions> {
        self.controller_options.get(name)
    }

    /// Assign a per-controller strategy override after registration,
    /// enforcing the same inheritance constraint as registration itself.
    pub fn set_strategy_override(
        &mut self,
        controller: &str,
        kind: StrategyKind,
        value: impl Into<String>,
    ) -> Result<()> {
        let value = value.into();
        if !self.controllers.contains(controller) {
            return Err(AdminError::configuration(
                "TypeRegistry",
                format!("unknown controller {controller}"),
            ));
        }
        self.validate_strategy_override(controller, kind, &value, None)?;
        self.controller_options
            .entry(controller.to_string())
            .or_default()
            .set_strategy_override(kind, value);
        Ok(())
    }

    fn validate_controller_options(
        &self,
        controller: &str,
        options: &ControllerOptions,
    ) -> Result<()> {
        for kind in [
            StrategyKind::Decorator,
            StrategyKind::Servicer,
            StrategyKind::Authorizer,
            StrategyKind::Paginator,
        ] {
            if let Some(value) = options.strategy_override(kind) {
                self.validate_strategy_override(controller, kind, value, Some(options))?;
            }
            if let Some(value) = options.application_override(kind) {
                if !self.family_contains(kind, value) {
                    return Err(AdminError::class_not_found(
                        value.clone(),
                        format!(
                            "register the {kind} class before naming it as application_{kind} on {controller}"
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    fn validate_strategy_override(
        &self,
        controller: &str,
        kind: StrategyKind,
        value: &str,
        own_options: Option<&ControllerOptions>,
    ) -> Result<()> {
        let attribute = override_attribute(kind);
        match self.application_base_with(controller, kind, own_options) {
            Some(expected) => {
                if self.family_is_descendant(kind, value, &expected, true) {
                    Ok(())
                } else {
                    Err(AdminError::invalid_configuration(attribute, expected, value))
                }
            }
            None => {
                // No application base registered for the family; any
                // registered class is acceptable
                if self.family_contains(kind, value) {
                    Ok(())
                } else {
                    Err(AdminError::class_not_found(
                        value,
                        format!("register the {kind} class before assigning {attribute}"),
                    ))
                }
            }
        }
    }

    /// The application-level base a controller's `{attribute}` overrides must
    /// descend from: its own or inherited `application_*` declaration, else
    /// the family's base class.
    pub fn application_base_for(&self, controller: &str, kind: StrategyKind) -> Option<String> {
        self.application_base_with(controller, kind, None)
    }

    fn application_base_with(
        &self,
        controller: &str,
        kind: StrategyKind,
        own_options: Option<&ControllerOptions>,
    ) -> Option<String> {
        if let Some(value) = own_options.and_then(|options| options.application_override(kind)) {
            return Some(value.clone());
        }
        let mut current = controller.to_string();
        loop {
            if let Some(options) = self.controller_options.get(&current) {
                if let Some(value) = options.application_override(kind) {
                    return Some(value.clone());
                }
            }
            let Some(descriptor) = self.controllers.descriptor(&current) else {
                break;
            };
            if descriptor.base_marker {
                break;
            }
            match &descriptor.parent {
                Some(parent) => current = parent.clone(),
                None => break,
            }
        }
        self.family_base_name(kind)
    }

    // ---- kind-generic queries ----

    pub fn descriptor_of(&self, kind: StrategyKind, name: &str) -> Option<&StrategyDescriptor> {
        match kind {
            StrategyKind::Controller => self.controllers.descriptor(name),
            StrategyKind::Decorator => self.decorators.descriptor(name),
            StrategyKind::Servicer => self.servicers.descriptor(name),
            StrategyKind::Authorizer => self.authorizers.descriptor(name),
            StrategyKind::Paginator => self.paginators.descriptor(name),
        }
    }

    pub fn family_contains(&self, kind: StrategyKind, name: &str) -> bool {
        self.descriptor_of(kind, name).is_some()
    }

    pub fn family_base_name(&self, kind: StrategyKind) -> Option<String> {
        let base = match kind {
            StrategyKind::Controller => self.controllers.base_name(),
            StrategyKind::Decorator => self.decorators.base_name(),
            StrategyKind::Servicer => self.servicers.base_name(),
            StrategyKind::Authorizer => self.authorizers.base_name(),
            StrategyKind::Paginator => self.paginators.base_name(),
        };
        base.map(str::to_string)
    }

    pub fn family_len(&self, kind: StrategyKind) -> usize {
        match kind {
            StrategyKind::Controller => self.controllers.len(),
            StrategyKind::Decorator => self.decorators.len(),
            StrategyKind::Servicer => self.servicers.len(),
            StrategyKind::Authorizer => self.authorizers.len(),
            StrategyKind::Paginator => self.paginators.len(),
        }
    }

    /// Walk the parent-chain table. `strict` excludes the ancestor itself.
    pub fn family_is_descendant(
        &self,
        kind: StrategyKind,
        child: &str,
        ancestor: &str,
        strict: bool,
    ) -> bool {
        if self.descriptor_of(kind, child).is_none()
            || self.descriptor_of(kind, ancestor).is_none()
        {
            return false;
        }
        if child == ancestor {
            return !strict;
        }
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = child.to_string();
        while let Some(descriptor) = self.descriptor_of(kind, &current) {
            match &descriptor.parent {
                Some(parent) => {
                    if parent == ancestor {
                        return true;
                    }
                    if !visited.insert(parent.clone()) {
                        // Cycle in the declared parents; treat as unrelated
                        return false;
                    }
                    current = parent.clone();
                }
                None => return false,
            }
        }
        false
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn override_attribute(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Controller => "resources_controller",
        StrategyKind::Decorator => "resource_decorator",
        StrategyKind::Servicer => "model_servicer",
        StrategyKind::Authorizer => "model_authorizer",
        StrategyKind::Paginator => "model_paginator",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_authorizers() -> TypeRegistry {
        let mut types = TypeRegistry::new();
        types
            .register_authorizer(StrategyDef::named("ModelAuthorizer").base_class())
            .expect("base registration failed");
        types
            .register_authorizer(StrategyDef::named("ApplicationAuthorizer").parent("ModelAuthorizer"))
            .expect("registration failed");
        types
            .register_authorizer(StrategyDef::named("ProductAuthorizer").parent("ApplicationAuthorizer"))
            .expect("registration failed");
        types
    }

    #[test]
    fn test_model_registration_round_trip() {
        let mut types = TypeRegistry::new();
        let model = types.register_model("Order::Item");
        assert_eq!(types.model("Order::Item"), Some(model.clone()));
        assert_eq!(model.resources_name(), "order::items");
        assert!(types.model("Order::Missing").is_none());
    }

    #[test]
    fn test_descendant_walk() {
        let types = registry_with_authorizers();
        assert!(types.family_is_descendant(
            StrategyKind::Authorizer,
            "ProductAuthorizer",
            "ModelAuthorizer",
            true
        ));
        assert!(types.family_is_descendant(
            StrategyKind::Authorizer,
            "ProductAuthorizer",
            "ApplicationAuthorizer",
            true
        ));
        assert!(!types.family_is_descendant(
            StrategyKind::Authorizer,
            "ModelAuthorizer",
            "ProductAuthorizer",
            true
        ));
        // Strictness excludes the class itself
        assert!(!types.family_is_descendant(
            StrategyKind::Authorizer,
            "ProductAuthorizer",
            "ProductAuthorizer",
            true
        ));
        assert!(types.family_is_descendant(
            StrategyKind::Authorizer,
            "ProductAuthorizer",
            "ProductAuthorizer",
            false
        ));
    }

    #[test]
    fn test_unregistered_parent_rejected() {
        let mut types = TypeRegistry::new();
        let result =
            types.register_authorizer(StrategyDef::named("ProductAuthorizer").parent("Missing"));
        assert!(result.is_err());
    }

    #[test]
    fn test_second_base_rejected() {
        let mut types = TypeRegistry::new();
        types
            .register_servicer(StrategyDef::named("ModelServicer").base_class())
            .expect("base registration failed");
        let result = types.register_servicer(StrategyDef::named("OtherServicer").base_class());
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_model_authorizer_override() {
        let mut types = registry_with_authorizers();
        types
            .register_controller(
                StrategyDef::named("ResourcesController").base_class(),
                ControllerOptions::default(),
            )
            .expect("controller registration failed");

        let options = ControllerOptions {
            model_authorizer: Some("ProductAuthorizer".to_string()),
            application_authorizer: Some("ApplicationAuthorizer".to_string()),
            ..ControllerOptions::default()
        };
        types
            .register_controller(
                StrategyDef::named("ProductsController").parent("ResourcesController"),
                options,
            )
            .expect("override should validate");
    }

    #[test]
    fn test_invalid_model_authorizer_override() {
        let mut types = registry_with_authorizers();
        types
            .register_controller(
                StrategyDef::named("ResourcesController").base_class(),
                ControllerOptions::default(),
            )
            .expect("controller registration failed");

        // ModelAuthorizer is the family base itself, not strictly below it
        let options = ControllerOptions {
            model_authorizer: Some("ModelAuthorizer".to_string()),
            ..ControllerOptions::default()
        };
        let result = types.register_controller(
            StrategyDef::named("ProductsController").parent("ResourcesController"),
            options,
        );
        assert!(matches!(
            result,
            Err(AdminError::InvalidConfiguration { .. })
        ));
        // Rollback keeps the failed controller out of the table
        assert!(!types.family_contains(StrategyKind::Controller, "ProductsController"));
    }

    #[test]
    fn test_application_base_defaults_to_family_base() {
        let types = registry_with_authorizers();
        assert_eq!(
            types.application_base_for("UnknownController", StrategyKind::Authorizer),
            Some("ModelAuthorizer".to_string())
        );
    }
}
