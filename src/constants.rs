//! # System Constants
//!
//! Core constants and enums that define the naming conventions and operational
//! boundaries of the admin resolution engine.
//!
//! Resolution is convention-driven: strategy classes are discovered from names
//! assembled out of a script path, a resources name, and a kind-specific
//! suffix. The tables in this module are the single source of those
//! conventions.

use serde::{Deserialize, Serialize};

/// Token joining namespace segments in qualified names and resources names
/// (`Admin::Order::ItemsController`, `order::items`).
pub const NAMESPACE_SEPARATOR: &str = "::";

/// The five strategy families resolved per model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Controller,
    Decorator,
    Servicer,
    Authorizer,
    Paginator,
}

impl StrategyKind {
    /// Class-name suffix for this family.
    pub fn suffix(&self) -> &'static str {
        match self {
            StrategyKind::Controller => suffixes::CONTROLLER,
            StrategyKind::Decorator => suffixes::DECORATOR,
            StrategyKind::Servicer => suffixes::SERVICER,
            StrategyKind::Authorizer => suffixes::AUTHORIZER,
            StrategyKind::Paginator => suffixes::PAGINATOR,
        }
    }

    /// Controllers are named after the plural resources name; every other
    /// family is named after the singular model name.
    pub fn pluralized(&self) -> bool {
        matches!(self, StrategyKind::Controller)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Controller => "controller",
            StrategyKind::Decorator => "decorator",
            StrategyKind::Servicer => "servicer",
            StrategyKind::Authorizer => "authorizer",
            StrategyKind::Paginator => "paginator",
        }
    }

    pub fn all() -> [StrategyKind; 5] {
        [
            StrategyKind::Controller,
            StrategyKind::Decorator,
            StrategyKind::Servicer,
            StrategyKind::Authorizer,
            StrategyKind::Paginator,
        ]
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategy class-name suffixes, stripped during guessing and appended during
/// derived-name construction.
pub mod suffixes {
    pub const CONTROLLER: &str = "Controller";
    pub const DECORATOR: &str = "Decorator";
    pub const SERVICER: &str = "Servicer";
    pub const AUTHORIZER: &str = "Authorizer";
    pub const PAGINATOR: &str = "Paginator";

    /// All known suffixes, checked when normalizing a class name back to its
    /// model name.
    pub const ALL: &[&str] = &[CONTROLLER, DECORATOR, SERVICER, AUTHORIZER, PAGINATOR];
}

/// Controller action names.
pub mod actions {
    // Resourceful actions
    pub const INDEX: &str = "index";
    pub const SHOW: &str = "show";
    pub const NEW: &str = "new";
    pub const CREATE: &str = "create";
    pub const EDIT: &str = "edit";
    pub const UPDATE: &str = "update";
    pub const DESTROY: &str = "destroy";

    // Non-resourceful actions
    pub const HOME: &str = "home";

    // Error-page actions
    pub const NOT_FOUND: &str = "not_found";
    pub const UNPROCESSABLE_ENTITY: &str = "unprocessable_entity";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_AUTHENTICATED: &str = "not_authenticated";
    pub const NOT_IMPLEMENTED: &str = "not_implemented";
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";

    /// Actions served by the generic resources controller.
    pub const RESOURCEFUL: &[&str] = &[INDEX, SHOW, NEW, CREATE, EDIT, UPDATE, DESTROY];

    /// Actions rendering an error page instead of a resource.
    pub const ERRORS: &[&str] = &[
        NOT_FOUND,
        UNPROCESSABLE_ENTITY,
        FORBIDDEN,
        NOT_AUTHENTICATED,
        NOT_IMPLEMENTED,
        INTERNAL_SERVER_ERROR,
    ];

    /// Actions whose submitted attributes must pass mass-assignment
    /// filtering before they reach a service provider.
    pub const FORM_ACTIONS: &[&str] = &[NEW, CREATE, EDIT, UPDATE];
}

/// Sorting strategy applied by index actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortingStrategy {
    /// Sort by several columns at once.
    #[default]
    Multiple,
    /// One sort column at a time; a new sort replaces the previous one.
    Single,
}

impl SortingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortingStrategy::Multiple => "multiple",
            SortingStrategy::Single => "single",
        }
    }
}

/// Engine-wide defaults.
pub mod defaults {
    /// Records per page when no page size is configured or requested.
    pub const PAGE_SIZE: usize = 20;

    /// Upper bound applied to any requested page size.
    pub const MAX_PAGE_SIZE: usize = 100;

    /// Maximum rendered length for text values before truncation.
    pub const MAX_TEXT_LENGTH: usize = 20;

    /// Flash messages retained per session before the oldest is dropped.
    pub const FLASH_LIMIT: usize = 5;

    /// Name of the generic resources controller used when no dedicated
    /// controller is registered for a resource.
    pub const RESOURCES_CONTROLLER: &str = "ResourcesController";

    /// Generic base names for the remaining strategy families.
    pub const RESOURCE_DECORATOR: &str = "ResourceDecorator";
    pub const MODEL_SERVICER: &str = "ModelServicer";
    pub const MODEL_AUTHORIZER: &str = "ModelAuthorizer";
    pub const MODEL_PAGINATOR: &str = "ModelPaginator";

    /// Version compatibility marker.
    pub const ADMIN_CORE_VERSION: &str = "0.1.0";
}

/// Request parameter names recognized by the router.
pub mod params {
    pub const RESOURCES: &str = "resources";
    pub const ID: &str = "id";
    pub const ACTION: &str = "action";
    /// Per-request override naming the controller to fall back to when no
    /// dedicated controller exists for the resource.
    pub const RESOURCES_CONTROLLER: &str = "resources_controller";
    pub const PAGE: &str = "page";
    pub const PER: &str = "per";
    pub const SORT: &str = "sort";
}
