//! # Resources Router
//!
//! The per-request state machine:
//!
//! ```text
//! Validating → Resolving → Dispatching → { Succeeded, Redirected }
//! ```
//!
//! Validating checks the named resource maps to a registered, mode-claimed
//! model. Resolving picks the controller (dedicated, request override, or
//! configured default). Dispatching invokes the controller action. Any
//! recoverable failure redirects to the default controller's matching error
//! action with a flash alert; configuration defects escape to the host.

use crate::constants::actions;
use crate::dispatch::context::ActionContext;
use crate::dispatch::request::{Flash, RequestContext, Response};
use crate::engine::Engine;
use crate::error::{AdminError, Result};
use crate::finders::controller_finder;
use crate::logging::{log_dispatch_operation, log_error};
use crate::naming::converter::to_model_class;
use crate::registry::ModelClass;
use tracing::debug;

/// Dispatch progress, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchState {
    Validating,
    Resolving,
    Dispatching,
    Succeeded,
    Redirected,
}

impl DispatchState {
    fn as_str(self) -> &'static str {
        match self {
            DispatchState::Validating => "validating",
            DispatchState::Resolving => "resolving",
            DispatchState::Dispatching => "dispatching",
            DispatchState::Succeeded => "succeeded",
            DispatchState::Redirected => "redirected",
        }
    }
}

/// Request-time entry point.
pub struct ResourcesRouter;

impl ResourcesRouter {
    /// Route a request to its controller action. Recoverable errors become
    /// rendered error pages; anything else propagates to the host.
    pub async fn dispatch(engine: &Engine, request: &mut RequestContext) -> Result<Response> {
        match Self::route(engine, request).await {
            Ok(response) => {
                debug!(state = DispatchState::Succeeded.as_str(), status = response.status, "dispatch complete");
                Ok(response)
            }
            Err(err) if err.is_recoverable() => Self::redirect_to_error(engine, request, err).await,
            Err(err) => {
                log_error(
                    "ResourcesRouter",
                    "dispatch",
                    &err.to_string(),
                    request.path_parameters.resources.as_deref(),
                );
                Err(err)
            }
        }
    }

    async fn route(engine: &Engine, request: &mut RequestContext) -> Result<Response> {
        // Validating
        debug!(state = DispatchState::Validating.as_str(), path = %request.path, "dispatch");
        let model = Self::validate(engine, request)?;

        // Resolving
        debug!(state = DispatchState::Resolving.as_str(), "dispatch");
        let action = request.path_parameters.action.clone().unwrap_or_else(|| {
            if model.is_some() {
                actions::INDEX.to_string()
            } else {
                actions::HOME.to_string()
            }
        });
        let resolution = match &request.path_parameters.resources {
            Some(resources) => controller_finder::find(
                engine,
                &request.script_path,
                resources,
                request.path_parameters.resources_controller.as_deref(),
            ),
            None => controller_finder::default_controller(engine),
        };

        // Dispatching
        log_dispatch_operation(
            "dispatch",
            request.path_parameters.resources.as_deref(),
            Some(resolution.name.as_str()),
            Some(action.as_str()),
            DispatchState::Dispatching.as_str(),
            None,
        );
        let controller = resolution.instance;
        let mut ctx = ActionContext::new(engine, request, model, resolution.name);
        controller.handle(&action, &mut ctx).await
    }

    /// Resources name → registered model → mode claim, in that order.
    /// Requests without a resources name (root/home) skip validation.
    fn validate(engine: &Engine, request: &RequestContext) -> Result<Option<ModelClass>> {
        let Some(resources) = &request.path_parameters.resources else {
            return Ok(None);
        };
        let model = engine
            .with_types(|types| to_model_class(resources, types))
            .ok_or_else(|| AdminError::model_not_found(resources.clone()))?;
        if !engine.model_handled(&model) {
            return Err(AdminError::unprocessable_entity(model.name()));
        }
        Ok(Some(model))
    }

    /// Translate a recoverable error into the default controller's matching
    /// error action, carrying the description as a flash alert.
    async fn redirect_to_error(
        engine: &Engine,
        request: &mut RequestContext,
        err: AdminError,
    ) -> Result<Response> {
        let error_action = err.error_action();
        let description = err.to_string();
        log_dispatch_operation(
            "dispatch",
            request.path_parameters.resources.as_deref(),
            None,
            Some(error_action),
            DispatchState::Redirected.as_str(),
            Some(description.as_str()),
        );
        request.session.push_flash(Flash::alert(description));

        let resolution = controller_finder::default_controller(engine);
        let controller = resolution.instance;
        let mut ctx = ActionContext::new(engine, request, None, resolution.name);
        controller.handle(error_action, &mut ctx).await
    }
}
