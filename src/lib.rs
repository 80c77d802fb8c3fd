#![allow(clippy::doc_markdown)] // Allow technical terms like PascalCase in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Admin Core
//!
//! Convention-driven admin interface core: given a request naming a resource,
//! resolve — with no static route per model — which controller, authorizer,
//! servicer, decorator, and paginator apply, and dispatch the request to the
//! resolved controller action.
//!
//! ## Overview
//!
//! Admin Core is designed to complement a host web framework: the host owns
//! routing tables, rendering, and persistence, while this crate owns the
//! resolution machinery — a registration table over naming conventions, an
//! inheritance-aware configuration chain, process-wide resolution caches,
//! and the request router that ties them together.
//!
//! ## Architecture
//!
//! ```text
//! request
//!   └── ResourcesRouter          (validate resource, resolve controller)
//!         ├── TypeRegistry       (registered models + strategy classes)
//!         ├── ClassRegistry      (cached model→mode/strategy associations)
//!         ├── ConfigurationChain (inheritance-aware attribute resolution)
//!         ├── StrategyFinders    (explicit > guessed > chain > mode default)
//!         └── controller action  (thin calls into servicer/authorizer)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use admin_core::engine::Engine;
//! use admin_core::dispatch::RequestContext;
//! use admin_core::modes::MemoryMode;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::with_defaults();
//!
//! // Claim a model through a mode and register it
//! let product = engine.register_model("Product");
//! let mode = Arc::new(MemoryMode::new());
//! mode.manage(product.clone());
//! mode.seed(&product, serde_json::json!({"id": 1, "name": "Widget"}));
//! engine.install_mode(mode);
//!
//! // Dispatch an index request; the generic controller serves it
//! let mut request = RequestContext::new("/admin", "/admin/products")
//!     .with_resources("products")
//!     .with_action("index");
//! let response = engine.handle(&mut request).await?;
//! assert_eq!(response.status, 200);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`naming`] - Transforms between resources names and class names
//! - [`registry`] - Registration table and cached class registry
//! - [`resolver`] - Convention-based candidate-name resolution
//! - [`configuration`] - Per-controller attribute chain
//! - [`strategies`] - The five strategy families and their generic bases
//! - [`finders`] - Per-request strategy resolution with precedence
//! - [`modes`] - Data-source adapter contracts and the in-memory mode
//! - [`dispatch`] - Request context, router, and responses
//! - [`urls`] - Reverse URL generation over host mounts and routes
//! - [`engine`] - The facade owning all named state
//! - [`config`] - Engine-level configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup

pub mod config;
pub mod configuration;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod finders;
pub mod logging;
pub mod modes;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod strategies;
pub mod urls;

pub use config::EngineConfig;
pub use configuration::{ChainAttribute, ConfigurationChain, ControllerOptions};
pub use constants::{SortingStrategy, StrategyKind};
pub use dispatch::{
    ActionContext, Flash, FlashKind, Parameters, PathParameters, RequestContext, ResourcesRouter,
    Response, Session,
};
pub use engine::Engine;
pub use error::{AdminError, Result};
pub use modes::{MemoryMode, Mode};
pub use registry::{ClassRegistry, ModelClass, StrategyDef, TypeRegistry};
pub use strategies::{
    Authorizer, Controller, Decorator, ModelAuthorizer, ModelPaginator, ModelServicer, PageInfo,
    Paginator, ResourceDecorator, ResourcesController, Servicer, ServicerEnv,
};
pub use urls::{MountPoint, RouteEntry, RouteTable};
