//! Paginator resolution for the current request.

use crate::constants::{defaults, StrategyKind};
use crate::engine::Engine;
use crate::error::{AdminError, Result};
use crate::finders::FinderContext;
use crate::modes::PaginationProvider;
use crate::registry::{FamilyEntry, ModelClass};
use crate::strategies::{ModelPaginator, Paginator};
use std::sync::Arc;

pub fn find(
    engine: &Engine,
    finder: &FinderContext,
    model: &ModelClass,
) -> Result<Arc<dyn Paginator>> {
    let kind = StrategyKind::Paginator;
    let provider = engine
        .registry()
        .pagination_provider_of(&engine.modes(), model)
        .ok_or_else(|| AdminError::unprocessable_entity(model.name()))?;

    engine.with_types(|types| {
        if let Some(name) =
            engine
                .chain()
                .strategy_override(types, finder.controller_name(), kind)
        {
            let entry = types.paginators().get(&name).ok_or_else(|| {
                AdminError::class_not_found(
                    name.clone(),
                    format!("model_paginator on {} names an unregistered class", finder.controller_name()),
                )
            })?;
            return Ok(instantiate(entry, model, &provider));
        }

        if let Some(name) =
            engine
                .registry()
                .strategy_class_of(types, kind, finder.script_path(), model)
        {
            if let Some(entry) = types.paginators().get(&name) {
                return Ok(instantiate(entry, model, &provider));
            }
        }

        if let Some(name) = engine
            .chain()
            .application_for(types, finder.controller_name(), kind)
        {
            if let Some(entry) = types.paginators().get(&name) {
                return Ok(instantiate(entry, model, &provider));
            }
            return Ok(
                Arc::new(ModelPaginator::new(name, provider.clone())) as Arc<dyn Paginator>
            );
        }

        Ok(Arc::new(ModelPaginator::new(
            defaults::MODEL_PAGINATOR,
            provider.clone(),
        )) as Arc<dyn Paginator>)
    })
}

fn instantiate(
    entry: &FamilyEntry<dyn Paginator>,
    model: &ModelClass,
    provider: &Arc<dyn PaginationProvider>,
) -> Arc<dyn Paginator> {
    match &entry.factory {
        Some(factory) => factory(model),
        None => Arc::new(ModelPaginator::new(
            entry.descriptor.name.clone(),
            Arc::clone(provider),
        )),
    }
}
