//! # Name Conversion
//!
//! Pure string transforms between resources names, model names, and derived
//! strategy class names. Everything here is deterministic and stateless;
//! "name maps to nothing" is always representable as `None` and never an
//! error at this layer.

pub mod converter;
pub mod inflection;

pub use converter::{
    script_namespace, to_authorizer_name, to_controller_name, to_model_class, to_model_name,
    to_resources_name, to_strategy_name,
};
pub use inflection::{pluralize, singularize};
