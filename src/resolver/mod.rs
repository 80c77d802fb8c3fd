//! # Convention Resolver
//!
//! Convention-over-configuration lookup: derive an ordered list of candidate
//! class names from a source class name, then find the first registered
//! candidate that survives validation. Most-specific (longest namespace)
//! candidates are tried first.

pub mod guesser;

pub use guesser::{candidate_names, resolve_model, resolve_strategy};
