//! # Error Types
//!
//! Structured error handling for the admin resolution engine using thiserror
//! for typed error variants instead of `Box<dyn Error>` patterns.
//!
//! The taxonomy splits along one axis the router cares about: whether an error
//! is recoverable at dispatch time (rendered as an in-app error page) or a
//! configuration defect that must surface during development and boot.

use crate::constants::actions;
use thiserror::Error;

/// Errors raised across the resolution and dispatch pipeline.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Model not found: {resources_name}")]
    ModelNotFound { resources_name: String },

    #[error("Resource not found: {model}: {id}")]
    ResourceNotFound { model: String, id: String },

    #[error("Unprocessable entity: {model} is not handled by any installed mode")]
    UnprocessableEntity { model: String },

    #[error("Forbidden: not allowed to {action} {subject}")]
    Forbidden { action: String, subject: String },

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unknown action: {action} is not served by {controller}")]
    UnknownAction { controller: String, action: String },

    #[error("Class not found for {class_name}: {reason}")]
    ClassNotFound { class_name: String, reason: String },

    #[error("Invalid configuration: {attribute} must name a descendant of {expected}, got {value}")]
    InvalidConfiguration {
        attribute: String,
        expected: String,
        value: String,
    },

    #[error("Configuration error: {component}: {message}")]
    Configuration { component: String, message: String },

    #[error("Not implemented: {operation}")]
    NotImplemented { operation: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl AdminError {
    /// Create a model-not-found error from a resources name.
    pub fn model_not_found(resources_name: impl Into<String>) -> Self {
        Self::ModelNotFound {
            resources_name: resources_name.into(),
        }
    }

    /// Create a resource-not-found error for a record lookup.
    pub fn resource_not_found(model: impl Into<String>, id: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            model: model.into(),
            id: id.into(),
        }
    }

    /// Create an unprocessable-entity error for a model no mode claims.
    pub fn unprocessable_entity(model: impl Into<String>) -> Self {
        Self::UnprocessableEntity {
            model: model.into(),
        }
    }

    /// Create a forbidden error for a denied action.
    pub fn forbidden(action: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::Forbidden {
            action: action.into(),
            subject: subject.into(),
        }
    }

    /// Create a class-not-found error carrying an actionable message naming
    /// the declaration the operator should add.
    pub fn class_not_found(class_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class_name: class_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-configuration error for a strategy override that
    /// violates its inheritance constraint.
    pub fn invalid_configuration(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidConfiguration {
            attribute: attribute.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }

    /// Create a configuration error for a malformed value.
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a not-implemented error for an abstract base operation.
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Whether the router may translate this error into a rendered error page.
    ///
    /// Configuration defects are deliberately not recoverable: they must
    /// escape to the host so they surface during development, not be papered
    /// over per request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ModelNotFound { .. }
                | Self::ResourceNotFound { .. }
                | Self::UnprocessableEntity { .. }
                | Self::Forbidden { .. }
                | Self::NotAuthenticated
                | Self::UnknownAction { .. }
                | Self::NotImplemented { .. }
        )
    }

    /// HTTP-ish status the rendered error page carries.
    pub fn status(&self) -> u16 {
        match self {
            Self::ModelNotFound { .. }
            | Self::ResourceNotFound { .. }
            | Self::UnknownAction { .. } => 404,
            Self::UnprocessableEntity { .. } => 422,
            Self::Forbidden { .. } => 403,
            Self::NotAuthenticated => 401,
            Self::NotImplemented { .. } => 501,
            Self::ClassNotFound { .. }
            | Self::InvalidConfiguration { .. }
            | Self::Configuration { .. }
            | Self::Serialization { .. } => 500,
        }
    }

    /// The generic controller action that renders this error.
    pub fn error_action(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. }
            | Self::ResourceNotFound { .. }
            | Self::UnknownAction { .. } => actions::NOT_FOUND,
            Self::UnprocessableEntity { .. } => actions::UNPROCESSABLE_ENTITY,
            Self::Forbidden { .. } => actions::FORBIDDEN,
            Self::NotAuthenticated => actions::NOT_AUTHENTICATED,
            Self::NotImplemented { .. } => actions::NOT_IMPLEMENTED,
            _ => actions::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AdminError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(AdminError::model_not_found("products").is_recoverable());
        assert!(AdminError::unprocessable_entity("Product").is_recoverable());
        assert!(AdminError::forbidden("destroy", "Product").is_recoverable());
        assert!(!AdminError::class_not_found("ProductsController", "no candidate").is_recoverable());
        assert!(
            !AdminError::invalid_configuration("model_authorizer", "ModelAuthorizer", "String")
                .is_recoverable()
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AdminError::model_not_found("products").status(), 404);
        assert_eq!(AdminError::unprocessable_entity("Product").status(), 422);
        assert_eq!(AdminError::forbidden("edit", "Product").status(), 403);
        assert_eq!(AdminError::NotAuthenticated.status(), 401);
        assert_eq!(AdminError::not_implemented("collection").status(), 501);
    }

    #[test]
    fn test_error_actions() {
        assert_eq!(
            AdminError::model_not_found("products").error_action(),
            actions::NOT_FOUND
        );
        assert_eq!(
            AdminError::unprocessable_entity("Product").error_action(),
            actions::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_message_names_the_subject() {
        let err = AdminError::unprocessable_entity("UnregisteredThing");
        assert!(err.to_string().contains("UnregisteredThing"));
    }
}
