//! # Registry Infrastructure
//!
//! Two registries with different lifetimes back the resolution pipeline:
//!
//! - **TypeRegistry**: the explicit registration table. Host applications
//!   register models and strategy classes here at boot; it replaces
//!   reflective class loading entirely. Mutated only by registration.
//! - **ClassRegistry**: the lazily-populated, process-wide cache of resolved
//!   associations (model→mode, model→strategy class, model→providers).
//!   Mutated only by first-resolution or a wholesale `clear()`.
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── TypeRegistry   (models + 5 strategy families + parent-chain table)
//! └── ClassRegistry  (cached associations, cleared on reload)
//! ```

pub mod class_registry;
pub mod type_registry;

pub use class_registry::{ClassRegistry, RegistryStats};
pub use type_registry::{
    FamilyEntry, ModelClass, StrategyDef, StrategyDescriptor, StrategyFactory, StrategyFamily,
    TypeRegistry,
};
