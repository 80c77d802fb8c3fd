//! # URL Resolution
//!
//! Reverse mapping from (action, model) back to a path, aware of multiple
//! simultaneous mounts and of user-defined routes that shadow the generic
//! resourceful ones.

pub mod routes;
pub mod url_for;

pub use routes::{MountPoint, RouteEntry, RouteTable};
pub use url_for::{canonical_for, CanonicalAction, EngineUrlFor};
