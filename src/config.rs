//! # Engine Configuration
//!
//! Engine-level configuration with environment overrides and YAML file
//! loading. Values here are the outermost fallback layer: per-controller
//! declarations resolved through the configuration chain always win over
//! these defaults.

use crate::constants::{defaults, SortingStrategy};
use crate::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the engine's route set, used to pick a mount point when
    /// several are registered.
    pub engine_name: String,

    /// Controller used when no dedicated controller exists for a resource.
    pub default_controller: String,

    /// Explicit allow-list of handled models. `None` means every model
    /// claimed by an installed mode is handled.
    pub models: Option<Vec<String>>,

    /// Models removed from the handled set even when a mode claims them.
    pub models_to_exclude: Vec<String>,

    /// Records per page when neither controller configuration nor request
    /// parameters say otherwise.
    pub page_size: usize,

    /// Upper bound applied to any requested page size.
    pub max_page_size: usize,

    /// Maximum rendered length for text values before truncation.
    pub max_text_length: usize,

    /// Path the logout link points at, when the host has one.
    pub logout_path: Option<String>,

    /// Sorting strategy applied by index actions.
    pub sorting_strategy: SortingStrategy,

    /// Flash messages retained per session before the oldest is dropped.
    pub flash_limit: usize,

    /// Free-form settings forwarded to custom strategies.
    pub custom_settings: HashMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_name: "admin".to_string(),
            default_controller: defaults::RESOURCES_CONTROLLER.to_string(),
            models: None,
            models_to_exclude: Vec::new(),
            page_size: defaults::PAGE_SIZE,
            max_page_size: defaults::MAX_PAGE_SIZE,
            max_text_length: defaults::MAX_TEXT_LENGTH,
            logout_path: None,
            sorting_strategy: SortingStrategy::default(),
            flash_limit: defaults::FLASH_LIMIT,
            custom_settings: HashMap::new(),
        }
    }
}

impl EngineConfig {
    /// Build a configuration from defaults plus environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(engine_name) = std::env::var("ADMIN_ENGINE_NAME") {
            config.engine_name = engine_name;
        }

        if let Ok(page_size) = std::env::var("ADMIN_PAGE_SIZE") {
            config.page_size = page_size
                .parse()
                .map_err(|e| AdminError::configuration("EngineConfig", format!("Invalid page_size: {e}")))?;
        }

        if let Ok(max_page_size) = std::env::var("ADMIN_MAX_PAGE_SIZE") {
            config.max_page_size = max_page_size.parse().map_err(|e| {
                AdminError::configuration("EngineConfig", format!("Invalid max_page_size: {e}"))
            })?;
        }

        if let Ok(logout_path) = std::env::var("ADMIN_LOGOUT_PATH") {
            config.logout_path = Some(logout_path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file, applying defaults for any
    /// omitted section.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AdminError::configuration(
                "EngineConfig",
                format!("Failed to read {}: {e}", path.display()),
            )
        })?;
        let config: Self = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate shape constraints. Fails at boot, never at request time.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AdminError::configuration(
                "EngineConfig",
                "page_size must be a positive integer",
            ));
        }
        if self.max_page_size < self.page_size {
            return Err(AdminError::configuration(
                "EngineConfig",
                format!(
                    "max_page_size ({}) must not be below page_size ({})",
                    self.max_page_size, self.page_size
                ),
            ));
        }
        if self.flash_limit == 0 {
            return Err(AdminError::configuration(
                "EngineConfig",
                "flash_limit must be a positive integer",
            ));
        }
        if self.default_controller.is_empty() {
            return Err(AdminError::configuration(
                "EngineConfig",
                "default_controller cannot be empty",
            ));
        }
        Ok(())
    }

    /// Whether a model name is inside the configured handled set.
    pub fn model_included(&self, model_name: &str) -> bool {
        if self
            .models_to_exclude
            .iter()
            .any(|excluded| excluded == model_name)
        {
            return false;
        }
        match &self.models {
            Some(allowed) => allowed.iter().any(|name| name == model_name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.page_size, defaults::PAGE_SIZE);
        assert_eq!(config.default_controller, defaults::RESOURCES_CONTROLLER);
        assert!(config.models.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_page_size() {
        let config = EngineConfig {
            page_size: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_inverted_page_bounds() {
        let config = EngineConfig {
            page_size: 50,
            max_page_size: 10,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_model_included_with_allow_list() {
        let config = EngineConfig {
            models: Some(vec!["Product".to_string(), "Order".to_string()]),
            models_to_exclude: vec!["Order".to_string()],
            ..EngineConfig::default()
        };
        assert!(config.model_included("Product"));
        assert!(!config.model_included("Order"));
        assert!(!config.model_included("Customer"));
    }

    #[test]
    fn test_model_included_without_allow_list() {
        let config = EngineConfig::default();
        assert!(config.model_included("Anything"));
    }
}
