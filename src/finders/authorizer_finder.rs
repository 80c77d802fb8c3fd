//! Authorizer resolution for the current request.
//!
//! Besides the shared precedence, the generic authorizer needs a permission
//! backend: the providers supplied by the model's mode are scanned in order
//! and the first one available for the request wins, with an allow-all
//! default guaranteeing the scan never comes up empty.

use crate::constants::{defaults, StrategyKind};
use crate::dispatch::request::RequestContext;
use crate::engine::Engine;
use crate::error::{AdminError, Result};
use crate::finders::FinderContext;
use crate::modes::{AuthorizationProvider, DefaultAuthorizationProvider};
use crate::registry::{FamilyEntry, ModelClass};
use crate::strategies::{Authorizer, ModelAuthorizer};
use std::sync::Arc;

pub fn find(
    engine: &Engine,
    finder: &FinderContext,
    model: &ModelClass,
    request: &RequestContext,
) -> Result<Arc<dyn Authorizer>> {
    let kind = StrategyKind::Authorizer;
    let provider = select_provider(engine, model, request);

    engine.with_types(|types| {
        if let Some(name) =
            engine
                .chain()
                .strategy_override(types, finder.controller_name(), kind)
        {
            let entry = types.authorizers().get(&name).ok_or_else(|| {
                AdminError::class_not_found(
                    name.clone(),
                    format!("model_authorizer on {} names an unregistered class", finder.controller_name()),
                )
            })?;
            return Ok(instantiate(entry, model, &provider));
        }

        if let Some(name) =
            engine
                .registry()
                .strategy_class_of(types, kind, finder.script_path(), model)
        {
            if let Some(entry) = types.authorizers().get(&name) {
                return Ok(instantiate(entry, model, &provider));
            }
        }

        if let Some(name) = engine
            .chain()
            .application_for(types, finder.controller_name(), kind)
        {
            if let Some(entry) = types.authorizers().get(&name) {
                return Ok(instantiate(entry, model, &provider));
            }
            return Ok(Arc::new(ModelAuthorizer::new(name, model.clone(), provider.clone()))
                as Arc<dyn Authorizer>);
        }

        Ok(Arc::new(ModelAuthorizer::new(
            defaults::MODEL_AUTHORIZER,
            model.clone(),
            provider.clone(),
        )) as Arc<dyn Authorizer>)
    })
}

/// First available provider from the mode's ordered list; allow-all default
/// when the list is empty or nothing matches.
fn select_provider(
    engine: &Engine,
    model: &ModelClass,
    request: &RequestContext,
) -> Arc<dyn AuthorizationProvider> {
    engine
        .registry()
        .authorization_providers_of(&engine.modes(), model)
        .into_iter()
        .find(|provider| provider.available(request))
        .unwrap_or_else(|| Arc::new(DefaultAuthorizationProvider))
}

fn instantiate(
    entry: &FamilyEntry<dyn Authorizer>,
    model: &ModelClass,
    provider: &Arc<dyn AuthorizationProvider>,
) -> Arc<dyn Authorizer> {
    match &entry.factory {
        Some(factory) => factory(model),
        None => Arc::new(ModelAuthorizer::new(
            entry.descriptor.name.clone(),
            model.clone(),
            Arc::clone(provider),
        )),
    }
}
