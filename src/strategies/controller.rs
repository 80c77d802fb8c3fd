//! # Resources Controller
//!
//! The controller strategy trait and the generic CRUD implementation every
//! resource gets for free. Action bodies are deliberately thin: each one
//! resolves its collaborators through the per-request finders, authorizes,
//! and delegates the actual data work to the servicer.

use crate::configuration::ChainAttribute;
use crate::constants::actions;
use crate::dispatch::context::ActionContext;
use crate::dispatch::request::{Flash, Response};
use crate::error::{AdminError, Result};
use crate::strategies::paginator::PaginationDefaults;
use crate::strategies::servicer::ServicerEnv;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Request-handling strategy.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Fully-qualified class name of this controller.
    fn controller_name(&self) -> &str;

    /// Serve one action against the evaluation context.
    async fn handle(&self, action: &str, ctx: &mut ActionContext<'_>) -> Result<Response>;
}

/// Generic controller serving the full resourceful action set plus the
/// error pages.
pub struct ResourcesController {
    name: String,
}

impl ResourcesController {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn home(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let models: Vec<String> = ctx
            .engine
            .models()
            .iter()
            .map(|model| model.resources_name())
            .collect();
        let logout_path = ctx
            .engine
            .with_types(|types| {
                ctx.engine
                    .chain()
                    .text(types, &ctx.controller_name, ChainAttribute::LogoutPath)
            })
            .or_else(|| ctx.engine.config().logout_path);
        Ok(Response::ok(
            &self.name,
            actions::HOME,
            json!({ "models": models, "logout_path": logout_path }),
        ))
    }

    async fn index(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let model = ctx.model()?.clone();
        let authorizer = ctx.finders.authorizer(ctx.engine, &model, ctx.request)?;
        authorizer.authorize(actions::INDEX, None)?;

        let servicer = ctx.finders.servicer(ctx.engine, &model)?;
        let paginator = ctx.finders.paginator(ctx.engine, &model)?;
        let decorator = ctx.finders.decorator(ctx.engine, &model)?;
        let env = ctx.servicer_env(&model, authorizer.clone())?;

        let all = servicer.collection(&env, &ctx.request.query).await?;
        let page = paginator.page_info(all.len(), &ctx.request.query, self.pagination_defaults(ctx));
        let records = servicer.paginate(&env, &ctx.request.query, &page).await?;

        let mut fields = decorator.fields_for(actions::INDEX);
        if fields.is_empty() {
            fields = derived_fields(records.first());
        }
        let sorting = ctx
            .engine
            .with_types(|types| ctx.engine.chain().sorting(types, &ctx.controller_name))
            .unwrap_or_else(|| ctx.engine.config().sorting_strategy);

        Ok(Response::ok(
            &self.name,
            actions::INDEX,
            json!({
                "resources": model.resources_name(),
                "fields": fields,
                "records": records,
                "page": page,
                "sort": { "strategy": sorting.as_str(), "param": ctx.request.query.sort() },
            }),
        ))
    }

    async fn show(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let model = ctx.model()?.clone();
        let id = ctx.id()?;
        let authorizer = ctx.finders.authorizer(ctx.engine, &model, ctx.request)?;
        let servicer = ctx.finders.servicer(ctx.engine, &model)?;
        let decorator = ctx.finders.decorator(ctx.engine, &model)?;
        let env = ctx.servicer_env(&model, authorizer.clone())?;

        let record = servicer.find(&env, &id).await?;
        authorizer.authorize(actions::SHOW, Some(&record))?;

        let mut fields = decorator.fields_for(actions::SHOW);
        if fields.is_empty() {
            fields = derived_fields(Some(&record));
        }

        Ok(Response::ok(
            &self.name,
            actions::SHOW,
            json!({
                "resources": model.resources_name(),
                "label": decorator.display_name(&record),
                "fields": fields,
                "record": record,
            }),
        ))
    }

    async fn new_resource(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let model = ctx.model()?.clone();
        let authorizer = ctx.finders.authorizer(ctx.engine, &model, ctx.request)?;
        authorizer.authorize(actions::NEW, None)?;

        let servicer = ctx.finders.servicer(ctx.engine, &model)?;
        let env = ctx.servicer_env(&model, authorizer.clone())?;
        let payload = ctx.request.payload.clone();
        let record = servicer.new_record(&env, &payload).await?;

        Ok(Response::ok(
            &self.name,
            actions::NEW,
            json!({
                "resources": model.resources_name(),
                "record": record,
            }),
        ))
    }

    async fn create(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let model = ctx.model()?.clone();
        let authorizer = ctx.finders.authorizer(ctx.engine, &model, ctx.request)?;
        let payload = ctx.request.payload.clone();
        authorizer.authorize(actions::CREATE, Some(&payload))?;

        let servicer = ctx.finders.servicer(ctx.engine, &model)?;
        let env = ctx.servicer_env(&model, authorizer.clone())?;
        let record = servicer.create(&env, payload).await?;

        let decorator = ctx.finders.decorator(ctx.engine, &model)?;
        ctx.request.session.push_flash(Flash::notice(format!(
            "{} was successfully created",
            decorator.display_name(&record)
        )));

        Ok(Response::new(
            201,
            &self.name,
            actions::CREATE,
            json!({
                "resources": model.resources_name(),
                "record": record,
            }),
        ))
    }

    async fn edit(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let model = ctx.model()?.clone();
        let id = ctx.id()?;
        let authorizer = ctx.finders.authorizer(ctx.engine, &model, ctx.request)?;
        let servicer = ctx.finders.servicer(ctx.engine, &model)?;
        let env = ctx.servicer_env(&model, authorizer.clone())?;

        let record = servicer.find(&env, &id).await?;
        authorizer.authorize(actions::EDIT, Some(&record))?;

        Ok(Response::ok(
            &self.name,
            actions::EDIT,
            json!({
                "resources": model.resources_name(),
                "record": record,
            }),
        ))
    }

    async fn update(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let model = ctx.model()?.clone();
        let id = ctx.id()?;
        let authorizer = ctx.finders.authorizer(ctx.engine, &model, ctx.request)?;
        let servicer = ctx.finders.servicer(ctx.engine, &model)?;
        let env = ctx.servicer_env(&model, authorizer.clone())?;

        let existing = servicer.find(&env, &id).await?;
        authorizer.authorize(actions::UPDATE, Some(&existing))?;

        let payload = ctx.request.payload.clone();
        let record = servicer.update(&env, &id, payload).await?;

        let decorator = ctx.finders.decorator(ctx.engine, &model)?;
        ctx.request.session.push_flash(Flash::notice(format!(
            "{} was successfully updated",
            decorator.display_name(&record)
        )));

        Ok(Response::ok(
            &self.name,
            actions::UPDATE,
            json!({
                "resources": model.resources_name(),
                "record": record,
            }),
        ))
    }

    async fn destroy(&self, ctx: &mut ActionContext<'_>) -> Result<Response> {
        let model = ctx.model()?.clone();
        let id = ctx.id()?;
        let authorizer = ctx.finders.authorizer(ctx.engine, &model, ctx.request)?;
        let servicer = ctx.finders.servicer(ctx.engine, &model)?;
        let env = ctx.servicer_env(&model, authorizer.clone())?;

        let existing = servicer.find(&env, &id).await?;
        authorizer.authorize(actions::DESTROY, Some(&existing))?;
        servicer.destroy(&env, &id).await?;

        ctx.request
            .session
            .push_flash(Flash::notice(format!("{} was successfully destroyed", id)));

        Ok(Response::ok(
            &self.name,
            actions::DESTROY,
            json!({
                "resources": model.resources_name(),
                "destroyed": id,
            }),
        ))
    }

    fn error_page(&self, action: &str, ctx: &mut ActionContext<'_>) -> Response {
        Response::new(
            status_for_error_action(action),
            &self.name,
            action,
            json!({
                "error": action,
                "flash": ctx.request.session.flash(),
            }),
        )
    }

    fn pagination_defaults(&self, ctx: &ActionContext<'_>) -> PaginationDefaults {
        let config = ctx.engine.config();
        let page_size = ctx
            .engine
            .with_types(|types| {
                ctx.engine
                    .chain()
                    .size(types, &ctx.controller_name, ChainAttribute::PageSize)
            })
            .unwrap_or(config.page_size);
        PaginationDefaults {
            page_size,
            max_page_size: config.max_page_size,
        }
    }
}

#[async_trait]
impl Controller for ResourcesController {
    fn controller_name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, action: &str, ctx: &mut ActionContext<'_>) -> Result<Response> {
        match action {
            actions::HOME => self.home(ctx),
            actions::INDEX => self.index(ctx).await,
            actions::SHOW => self.show(ctx).await,
            actions::NEW => self.new_resource(ctx).await,
            actions::CREATE => self.create(ctx).await,
            actions::EDIT => self.edit(ctx).await,
            actions::UPDATE => self.update(ctx).await,
            actions::DESTROY => self.destroy(ctx).await,
            action if actions::ERRORS.contains(&action) => Ok(self.error_page(action, ctx)),
            unknown => Err(AdminError::UnknownAction {
                controller: self.name.clone(),
                action: unknown.to_string(),
            }),
        }
    }
}

/// Status an error-page action renders with.
pub fn status_for_error_action(action: &str) -> u16 {
    match action {
        actions::NOT_FOUND => 404,
        actions::UNPROCESSABLE_ENTITY => 422,
        actions::FORBIDDEN => 403,
        actions::NOT_AUTHENTICATED => 401,
        actions::NOT_IMPLEMENTED => 501,
        _ => 500,
    }
}

/// Field names derived from a record when no list is registered.
fn derived_fields(record: Option<&Value>) -> Vec<String> {
    record
        .and_then(Value::as_object)
        .map(|attrs| attrs.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_action_statuses() {
        assert_eq!(status_for_error_action(actions::NOT_FOUND), 404);
        assert_eq!(status_for_error_action(actions::UNPROCESSABLE_ENTITY), 422);
        assert_eq!(status_for_error_action(actions::FORBIDDEN), 403);
        assert_eq!(status_for_error_action(actions::INTERNAL_SERVER_ERROR), 500);
    }

    #[test]
    fn test_derived_fields() {
        let record = serde_json::json!({"id": 1, "name": "Widget"});
        let mut fields = derived_fields(Some(&record));
        fields.sort();
        assert_eq!(fields, vec!["id", "name"]);
        assert!(derived_fields(None).is_empty());
    }
}
