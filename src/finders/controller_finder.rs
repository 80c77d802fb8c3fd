//! Controller resolution for the current request.
//!
//! Controllers resolve differently from the other families: an exact
//! conventional name wins, then a per-request override parameter, then the
//! configured default resources controller. Falling back to the default is
//! normal operation and merely logs an advisory hint naming the controller
//! a host could register to customize the resource.

use crate::engine::Engine;
use crate::logging::log_dispatch_operation;
use crate::naming::converter::{to_controller_name, to_model_name};
use crate::registry::{FamilyEntry, ModelClass};
use crate::strategies::{Controller, ResourcesController};
use std::sync::Arc;
use tracing::info;

/// Outcome of controller resolution.
pub struct ControllerResolution {
    pub name: String,
    pub instance: Arc<dyn Controller>,
    /// Whether the default controller was substituted for a missing
    /// dedicated one.
    pub fallback: bool,
}

/// Resolve the controller serving a resource under a mount.
pub fn find(
    engine: &Engine,
    script_path: &str,
    resources_name: &str,
    override_param: Option<&str>,
) -> ControllerResolution {
    let expected = to_controller_name(script_path, resources_name);
    let model = ModelClass::new(to_model_name(resources_name));

    let resolved = engine.with_types(|types| {
        if let Some(entry) = types.controllers().get(&expected) {
            return Some(ControllerResolution {
                name: expected.clone(),
                instance: instantiate(entry, &model),
                fallback: false,
            });
        }
        if let Some(name) = override_param {
            if let Some(entry) = types.controllers().get(name) {
                return Some(ControllerResolution {
                    name: name.to_string(),
                    instance: instantiate(entry, &model),
                    fallback: true,
                });
            }
        }
        None
    });

    match resolved {
        Some(resolution) => resolution,
        None => {
            // Advisory only; serving through the generic controller is fine
            info!(
                expected = %expected,
                resources = %resources_name,
                "💡 HINT: register {expected} to customize how {resources_name} is served"
            );
            let fallback = default_controller(engine);
            let details = format!("{expected} is not registered");
            log_dispatch_operation(
                "controller_resolution",
                Some(resources_name),
                Some(fallback.name.as_str()),
                None,
                "fallback",
                Some(details.as_str()),
            );
            ControllerResolution {
                fallback: true,
                ..fallback
            }
        }
    }
}

/// The configured default resources controller.
pub fn default_controller(engine: &Engine) -> ControllerResolution {
    let name = engine.config().default_controller;
    let instance = engine.with_types(|types| {
        types.controllers().get(&name).map(|entry| match &entry.factory {
            Some(factory) => factory(&ModelClass::new("")),
            None => Arc::new(ResourcesController::new(name.clone())) as Arc<dyn Controller>,
        })
    });
    ControllerResolution {
        instance: instance
            .unwrap_or_else(|| Arc::new(ResourcesController::new(name.clone()))),
        name,
        fallback: false,
    }
}

fn instantiate(entry: &FamilyEntry<dyn Controller>, model: &ModelClass) -> Arc<dyn Controller> {
    match &entry.factory {
        Some(factory) => factory(model),
        None => Arc::new(ResourcesController::new(entry.descriptor.name.clone())),
    }
}
