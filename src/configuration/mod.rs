//! # Controller Configuration
//!
//! Per-controller configurable attributes and their inheritance-aware
//! resolution. A controller declares attributes in [`ControllerOptions`] at
//! registration; unset attributes resolve by walking the explicit
//! parent-chain table at read time, stopping at the family's base class.
//! Resolved values are memoized until an explicit clear.

pub mod chain;

use crate::constants::{SortingStrategy, StrategyKind};
use serde::{Deserialize, Serialize};

pub use chain::{ChainAttribute, ConfigurationChain};

/// Declarative attributes a controller registration carries. Every field is
/// optional; `None` defers to the superclass chain, then to engine defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerOptions {
    /// Mount name used for URL generation when several mounts coexist.
    pub engine_name: Option<String>,

    /// Explicit model binding when the controller name doesn't follow the
    /// naming convention.
    pub model_class: Option<String>,

    pub models: Option<Vec<String>>,
    pub models_to_exclude: Option<Vec<String>>,
    pub logout_path: Option<String>,
    pub max_text_length: Option<usize>,
    pub page_size: Option<usize>,
    pub sorting_strategy: Option<SortingStrategy>,

    // Per-model strategy overrides; validated against the application-level
    // base at declaration time
    pub resource_decorator: Option<String>,
    pub model_servicer: Option<String>,
    pub model_authorizer: Option<String>,
    pub model_paginator: Option<String>,

    // Application-level bases strategy overrides must descend from
    pub application_decorator: Option<String>,
    pub application_servicer: Option<String>,
    pub application_authorizer: Option<String>,
    pub application_paginator: Option<String>,
}

impl ControllerOptions {
    /// The per-model override declared for a strategy kind, if any.
    pub fn strategy_override(&self, kind: StrategyKind) -> Option<&String> {
        match kind {
            StrategyKind::Controller => None,
            StrategyKind::Decorator => self.resource_decorator.as_ref(),
            StrategyKind::Servicer => self.model_servicer.as_ref(),
            StrategyKind::Authorizer => self.model_authorizer.as_ref(),
            StrategyKind::Paginator => self.model_paginator.as_ref(),
        }
    }

    /// The application-level base declared for a strategy kind, if any.
    pub fn application_override(&self, kind: StrategyKind) -> Option<&String> {
        match kind {
            StrategyKind::Controller => None,
            StrategyKind::Decorator => self.application_decorator.as_ref(),
            StrategyKind::Servicer => self.application_servicer.as_ref(),
            StrategyKind::Authorizer => self.application_authorizer.as_ref(),
            StrategyKind::Paginator => self.application_paginator.as_ref(),
        }
    }

    pub fn set_strategy_override(&mut self, kind: StrategyKind, value: String) {
        match kind {
            StrategyKind::Controller => {}
            StrategyKind::Decorator => self.resource_decorator = Some(value),
            StrategyKind::Servicer => self.model_servicer = Some(value),
            StrategyKind::Authorizer => self.model_authorizer = Some(value),
            StrategyKind::Paginator => self.model_paginator = Some(value),
        }
    }
}
