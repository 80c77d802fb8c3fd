//! # Model Authorizer
//!
//! Permission checks for resourceful actions. The generic authorizer
//! delegates every decision to an authorization provider supplied by the
//! model's mode; custom authorizers registered by the host replace it
//! wholesale for their model.

use crate::error::Result;
use crate::modes::AuthorizationProvider;
use crate::registry::ModelClass;
use serde_json::Value;
use std::sync::Arc;

/// Authorization strategy.
pub trait Authorizer: Send + Sync {
    /// Fully-qualified class name of this authorizer.
    fn authorizer_name(&self) -> &str;

    /// Check an action against a subject; errors with `Forbidden` on denial.
    fn authorize(&self, action: &str, subject: Option<&Value>) -> Result<()>;

    /// Predicate form of [`Authorizer::authorize`].
    fn authorized(&self, action: &str, subject: Option<&Value>) -> bool;

    /// Preset attribute values enforced on records created/updated through
    /// this authorizer, when the provider scopes them.
    fn attributes_for(&self, action: &str) -> Option<Value>;

    /// Mass-assignment allow-list for an action. `None` permits every field.
    fn permit_params(&self, action: &str) -> Option<Vec<String>>;
}

/// Generic authorizer backed by the first available authorization provider
/// of the model's mode.
pub struct ModelAuthorizer {
    name: String,
    model: ModelClass,
    provider: Arc<dyn AuthorizationProvider>,
}

impl ModelAuthorizer {
    pub fn new(
        name: impl Into<String>,
        model: ModelClass,
        provider: Arc<dyn AuthorizationProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            model,
            provider,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }
}

impl Authorizer for ModelAuthorizer {
    fn authorizer_name(&self) -> &str {
        &self.name
    }

    fn authorize(&self, action: &str, subject: Option<&Value>) -> Result<()> {
        self.provider.authorize(action, &self.model, subject)
    }

    fn authorized(&self, action: &str, subject: Option<&Value>) -> bool {
        self.provider.authorized(action, &self.model, subject)
    }

    fn attributes_for(&self, action: &str) -> Option<Value> {
        self.provider.attributes_for(action, &self.model)
    }

    fn permit_params(&self, action: &str) -> Option<Vec<String>> {
        self.provider.permit_params(action, &self.model)
    }
}
