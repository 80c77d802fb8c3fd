//! Per-action evaluation context handed to controllers.

use crate::dispatch::request::RequestContext;
use crate::engine::Engine;
use crate::error::{AdminError, Result};
use crate::finders::FinderContext;
use crate::registry::ModelClass;
use crate::strategies::{Authorizer, ServicerEnv};
use std::sync::Arc;

/// Everything a controller action needs: the engine, the mutable request,
/// the validated model (when the route names one), and the per-request
/// strategy finders.
pub struct ActionContext<'a> {
    pub engine: &'a Engine,
    pub request: &'a mut RequestContext,
    pub model: Option<ModelClass>,
    pub controller_name: String,
    pub finders: FinderContext,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        engine: &'a Engine,
        request: &'a mut RequestContext,
        model: Option<ModelClass>,
        controller_name: impl Into<String>,
    ) -> Self {
        let controller_name = controller_name.into();
        let finders = FinderContext::new(request.script_path.clone(), controller_name.clone());
        Self {
            engine,
            request,
            model,
            controller_name,
            finders,
        }
    }

    /// The validated model, or `ModelNotFound` for actions that require one.
    pub fn model(&self) -> Result<&ModelClass> {
        self.model.as_ref().ok_or_else(|| {
            AdminError::model_not_found(
                self.request
                    .path_parameters
                    .resources
                    .clone()
                    .unwrap_or_default(),
            )
        })
    }

    /// Assemble the collaborators a servicer operation runs against.
    pub fn servicer_env<'m>(
        &self,
        model: &'m ModelClass,
        authorizer: Arc<dyn Authorizer>,
    ) -> Result<ServicerEnv<'m>> {
        let provider = self
            .engine
            .registry()
            .service_provider_of(&self.engine.modes(), model)
            .ok_or_else(|| AdminError::unprocessable_entity(model.name()))?;
        Ok(ServicerEnv {
            model,
            provider,
            authorizer,
        })
    }

    /// The id path parameter, or `ResourceNotFound` for actions that need it.
    pub fn id(&self) -> Result<String> {
        match &self.request.path_parameters.id {
            Some(id) => Ok(id.clone()),
            None => {
                let model = self
                    .model
                    .as_ref()
                    .map(|model| model.name().to_string())
                    .unwrap_or_default();
                Err(AdminError::resource_not_found(model, "<missing id>"))
            }
        }
    }
}
