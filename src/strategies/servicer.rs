//! # Model Servicer
//!
//! Data-access strategy for a model. The generic servicer is a thin layer
//! over the mode's service provider: it applies the authorizer's
//! mass-assignment filtering and preset attributes, then delegates. Custom
//! servicers registered by the host override individual operations.

use crate::dispatch::Parameters;
use crate::error::Result;
use crate::modes::ServiceProvider;
use crate::registry::ModelClass;
use crate::strategies::authorizer::Authorizer;
use crate::strategies::paginator::PageInfo;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Collaborators a servicer operation runs against, resolved per request.
pub struct ServicerEnv<'a> {
    pub model: &'a ModelClass,
    pub provider: Arc<dyn ServiceProvider>,
    pub authorizer: Arc<dyn Authorizer>,
}

/// Data-access strategy.
#[async_trait]
pub trait Servicer: Send + Sync {
    /// Fully-qualified class name of this servicer.
    fn servicer_name(&self) -> &str;

    /// Filter submitted attributes down to what the authorizer permits for
    /// the action, merging in any preset attributes it enforces.
    async fn permit(&self, env: &ServicerEnv<'_>, action: &str, payload: &Value) -> Result<Value>;

    /// All records of the model.
    async fn collection(&self, env: &ServicerEnv<'_>, params: &Parameters) -> Result<Vec<Value>>;

    /// The records inside a resolved page window.
    async fn paginate(
        &self,
        env: &ServicerEnv<'_>,
        params: &Parameters,
        page: &PageInfo,
    ) -> Result<Vec<Value>>;

    /// An unsaved record template seeded from permitted attributes.
    async fn new_record(&self, env: &ServicerEnv<'_>, payload: &Value) -> Result<Value>;

    /// A record by primary key; `ResourceNotFound` when absent.
    async fn find(&self, env: &ServicerEnv<'_>, id: &str) -> Result<Value>;

    async fn create(&self, env: &ServicerEnv<'_>, payload: Value) -> Result<Value>;

    async fn update(&self, env: &ServicerEnv<'_>, id: &str, payload: Value) -> Result<Value>;

    async fn destroy(&self, env: &ServicerEnv<'_>, id: &str) -> Result<Value>;
}

/// Generic servicer used when no dedicated servicer is registered for a
/// model.
pub struct ModelServicer {
    name: String,
}

impl ModelServicer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Servicer for ModelServicer {
    fn servicer_name(&self) -> &str {
        &self.name
    }

    async fn permit(&self, env: &ServicerEnv<'_>, action: &str, payload: &Value) -> Result<Value> {
        let permitted = env.authorizer.permit_params(action);
        let mut filtered = env
            .provider
            .permit(env.model, action, payload, permitted.as_deref())
            .await?;

        // Preset attributes enforced by the authorizer win over submitted ones
        if let Some(Value::Object(presets)) = env.authorizer.attributes_for(action) {
            if let Value::Object(ref mut attrs) = filtered {
                for (key, value) in presets {
                    attrs.insert(key, value);
                }
            }
        }
        Ok(filtered)
    }

    async fn collection(&self, env: &ServicerEnv<'_>, params: &Parameters) -> Result<Vec<Value>> {
        env.provider.collection(env.model, params).await
    }

    async fn paginate(
        &self,
        env: &ServicerEnv<'_>,
        params: &Parameters,
        page: &PageInfo,
    ) -> Result<Vec<Value>> {
        env.provider.paginate(env.model, params, page).await
    }

    async fn new_record(&self, env: &ServicerEnv<'_>, payload: &Value) -> Result<Value> {
        let permitted = self.permit(env, "new", payload).await?;
        env.provider.new_record(env.model, &permitted).await
    }

    async fn find(&self, env: &ServicerEnv<'_>, id: &str) -> Result<Value> {
        env.provider.find(env.model, id).await
    }

    async fn create(&self, env: &ServicerEnv<'_>, payload: Value) -> Result<Value> {
        let permitted = self.permit(env, "create", &payload).await?;
        env.provider.create(env.model, permitted).await
    }

    async fn update(&self, env: &ServicerEnv<'_>, id: &str, payload: Value) -> Result<Value> {
        let permitted = self.permit(env, "update", &payload).await?;
        env.provider.update(env.model, id, permitted).await
    }

    async fn destroy(&self, env: &ServicerEnv<'_>, id: &str) -> Result<Value> {
        env.provider.destroy(env.model, id).await
    }
}
