//! Servicer resolution for the current request.

use crate::constants::{defaults, StrategyKind};
use crate::engine::Engine;
use crate::error::{AdminError, Result};
use crate::finders::FinderContext;
use crate::registry::{FamilyEntry, ModelClass};
use crate::strategies::{ModelServicer, Servicer};
use std::sync::Arc;

pub fn find(
    engine: &Engine,
    finder: &FinderContext,
    model: &ModelClass,
) -> Result<Arc<dyn Servicer>> {
    let kind = StrategyKind::Servicer;
    engine.with_types(|types| {
        if let Some(name) =
            engine
                .chain()
                .strategy_override(types, finder.controller_name(), kind)
        {
            let entry = types.servicers().get(&name).ok_or_else(|| {
                AdminError::class_not_found(
                    name.clone(),
                    format!("model_servicer on {} names an unregistered class", finder.controller_name()),
                )
            })?;
            return Ok(instantiate(entry, model));
        }

        if let Some(name) =
            engine
                .registry()
                .strategy_class_of(types, kind, finder.script_path(), model)
        {
            if let Some(entry) = types.servicers().get(&name) {
                return Ok(instantiate(entry, model));
            }
        }

        if let Some(name) = engine
            .chain()
            .application_for(types, finder.controller_name(), kind)
        {
            if let Some(entry) = types.servicers().get(&name) {
                return Ok(instantiate(entry, model));
            }
            return Ok(Arc::new(ModelServicer::new(name)) as Arc<dyn Servicer>);
        }

        Ok(Arc::new(ModelServicer::new(defaults::MODEL_SERVICER)) as Arc<dyn Servicer>)
    })
}

fn instantiate(entry: &FamilyEntry<dyn Servicer>, model: &ModelClass) -> Arc<dyn Servicer> {
    match &entry.factory {
        Some(factory) => factory(model),
        None => Arc::new(ModelServicer::new(entry.descriptor.name.clone())),
    }
}
