//! Decorator resolution for the current request.

use crate::constants::{defaults, StrategyKind};
use crate::engine::Engine;
use crate::error::{AdminError, Result};
use crate::finders::FinderContext;
use crate::registry::{FamilyEntry, ModelClass};
use crate::strategies::{Decorator, ResourceDecorator};
use std::sync::Arc;

pub fn find(
    engine: &Engine,
    finder: &FinderContext,
    model: &ModelClass,
) -> Result<Arc<dyn Decorator>> {
    let kind = StrategyKind::Decorator;
    engine.with_types(|types| {
        // 1. Explicit override through the controller chain
        if let Some(name) =
            engine
                .chain()
                .strategy_override(types, finder.controller_name(), kind)
        {
            let entry = types.decorators().get(&name).ok_or_else(|| {
                AdminError::class_not_found(
                    name.clone(),
                    format!("resource_decorator on {} names an unregistered class", finder.controller_name()),
                )
            })?;
            return Ok(instantiate(entry, model));
        }

        // 2. Convention guess for (script path, model)
        if let Some(name) =
            engine
                .registry()
                .strategy_class_of(types, kind, finder.script_path(), model)
        {
            if let Some(entry) = types.decorators().get(&name) {
                return Ok(instantiate(entry, model));
            }
        }

        // 3. Controller-chain default (application_decorator or family base)
        if let Some(name) = engine
            .chain()
            .application_for(types, finder.controller_name(), kind)
        {
            if let Some(entry) = types.decorators().get(&name) {
                return Ok(instantiate(entry, model));
            }
            return Ok(Arc::new(ResourceDecorator::new(name)) as Arc<dyn Decorator>);
        }

        // 4. Generic default
        Ok(Arc::new(ResourceDecorator::new(defaults::RESOURCE_DECORATOR)) as Arc<dyn Decorator>)
    })
}

fn instantiate(entry: &FamilyEntry<dyn Decorator>, model: &ModelClass) -> Arc<dyn Decorator> {
    match &entry.factory {
        Some(factory) => factory(model),
        None => Arc::new(ResourceDecorator::new(entry.descriptor.name.clone())),
    }
}
