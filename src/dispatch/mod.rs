//! # Request Dispatch
//!
//! The request-time entry point: a request context flows through the
//! resources router, which validates the named resource, resolves the target
//! controller, and invokes the controller action with resolved
//! collaborators. Routing failures become rendered error pages, never host
//! framework crashes.

pub mod context;
pub mod request;
pub mod router;

pub use context::ActionContext;
pub use request::{
    Flash, FlashKind, Parameters, PathParameters, RequestContext, Response, Session,
};
pub use router::ResourcesRouter;
