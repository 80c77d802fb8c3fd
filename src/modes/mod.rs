//! # Modes
//!
//! A mode is a data-source adapter family claiming a set of models and
//! owning the factories the engine resolves per model: a model finder, a
//! service provider, a pagination provider, and an ordered list of
//! authorization providers. Exactly one installed mode claims each model;
//! the claim is computed once by scanning installed modes and cached in the
//! class registry.

pub mod memory;

use crate::dispatch::{Parameters, RequestContext};
use crate::error::{AdminError, Result};
use crate::registry::ModelClass;
use crate::strategies::paginator::PageInfo;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

pub use memory::{DefaultAuthorizationProvider, MemoryMode, MemoryStore};

/// Enumerates the models a mode governs.
pub trait ModelFinder: Send + Sync {
    fn all(&self) -> Vec<ModelClass>;
}

/// Data access against whatever storage a mode fronts.
///
/// The base behavior of every operation except [`ServiceProvider::permit`]
/// is a not-implemented signal: a mode that cannot serve an operation gets a
/// rendered 501 instead of a crash if one is genuinely reached.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Filter a submitted attribute object down to an allow-list. The
    /// default keeps only permitted keys; with no allow-list everything
    /// passes through.
    async fn permit(
        &self,
        _model: &ModelClass,
        _action: &str,
        payload: &Value,
        permitted: Option<&[String]>,
    ) -> Result<Value> {
        match (payload, permitted) {
            (Value::Object(attrs), Some(allowed)) => {
                let filtered: Map<String, Value> = attrs
                    .iter()
                    .filter(|(key, _)| allowed.iter().any(|name| name == *key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                Ok(Value::Object(filtered))
            }
            _ => Ok(payload.clone()),
        }
    }

    async fn collection(&self, _model: &ModelClass, _params: &Parameters) -> Result<Vec<Value>> {
        Err(AdminError::not_implemented("collection"))
    }

    async fn paginate(
        &self,
        _model: &ModelClass,
        _params: &Parameters,
        _page: &PageInfo,
    ) -> Result<Vec<Value>> {
        Err(AdminError::not_implemented("paginate"))
    }

    async fn new_record(&self, _model: &ModelClass, _payload: &Value) -> Result<Value> {
        Err(AdminError::not_implemented("new_record"))
    }

    async fn find(&self, _model: &ModelClass, _id: &str) -> Result<Value> {
        Err(AdminError::not_implemented("find"))
    }

    async fn create(&self, _model: &ModelClass, _payload: Value) -> Result<Value> {
        Err(AdminError::not_implemented("create"))
    }

    async fn update(&self, _model: &ModelClass, _id: &str, _payload: Value) -> Result<Value> {
        Err(AdminError::not_implemented("update"))
    }

    async fn destroy(&self, _model: &ModelClass, _id: &str) -> Result<Value> {
        Err(AdminError::not_implemented("destroy"))
    }
}

/// Page-window computation for a mode's collections.
pub trait PaginationProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    fn page_info(
        &self,
        total: usize,
        params: &Parameters,
        page_size_default: usize,
        page_size_max: usize,
    ) -> PageInfo {
        let page_size = params
            .per()
            .unwrap_or(page_size_default)
            .clamp(1, page_size_max);
        let number_of_pages = total.div_ceil(page_size).max(1);
        let page = params.page().unwrap_or(1).clamp(1, number_of_pages);
        PageInfo {
            total,
            page,
            page_size,
            number_of_pages,
        }
    }
}

/// Permission backend contract. Providers are scanned in order; the first
/// one reporting itself available for the request wins.
pub trait AuthorizationProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Whether this provider can serve the given request (e.g. the host has
    /// its backing library configured for the current user).
    fn available(&self, request: &RequestContext) -> bool;

    /// Check an action; errors with `Forbidden` on denial.
    fn authorize(&self, action: &str, model: &ModelClass, subject: Option<&Value>) -> Result<()>;

    fn authorized(&self, action: &str, model: &ModelClass, subject: Option<&Value>) -> bool;

    /// Preset attribute values scoped to the current permission, when any.
    fn attributes_for(&self, _action: &str, _model: &ModelClass) -> Option<Value> {
        None
    }

    /// Mass-assignment allow-list; `None` permits every field.
    fn permit_params(&self, _action: &str, _model: &ModelClass) -> Option<Vec<String>> {
        None
    }
}

/// A data-source adapter family.
pub trait Mode: Send + Sync {
    fn name(&self) -> &str;

    fn model_finder(&self) -> Arc<dyn ModelFinder>;

    fn model_service_provider(&self, model: &ModelClass) -> Arc<dyn ServiceProvider>;

    fn model_pagination_provider(&self) -> Arc<dyn PaginationProvider>;

    /// Ordered provider list; must always end with one that is available for
    /// every request.
    fn model_authorization_providers(&self) -> Vec<Arc<dyn AuthorizationProvider>>;
}
