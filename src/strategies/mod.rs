//! # Strategy Families
//!
//! The five pluggable behavior units resolved per model: controller,
//! decorator, servicer, authorizer, and paginator. Each family is a trait
//! behind `Arc<dyn …>` plus a generic base implementation the engine falls
//! back to when a host application registers nothing more specific.
//!
//! ## Architecture
//!
//! ```text
//! Strategy Families
//! ├── Controller  (request handling; ResourcesController generic CRUD)
//! ├── Decorator   (presentation metadata; per-action field registration)
//! ├── Servicer    (data access; thin delegation to a mode's provider)
//! ├── Authorizer  (permission checks; provider-selection contract)
//! └── Paginator   (page-window computation)
//! ```

pub mod authorizer;
pub mod controller;
pub mod decorator;
pub mod paginator;
pub mod servicer;

pub use authorizer::{Authorizer, ModelAuthorizer};
pub use controller::{Controller, ResourcesController};
pub use decorator::{Decorator, ResourceDecorator};
pub use paginator::{ModelPaginator, PageInfo, Paginator};
pub use servicer::{ModelServicer, Servicer, ServicerEnv};
