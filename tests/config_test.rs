//! Engine configuration loading and validation.

use admin_core::{EngineConfig, SortingStrategy};
use std::io::Write;

#[test]
fn loads_configuration_from_yaml() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file creation failed");
    writeln!(
        file,
        "engine_name: back_office\n\
         page_size: 40\n\
         max_page_size: 200\n\
         models_to_exclude:\n\
         - AuditLog\n\
         sorting_strategy: single\n\
         logout_path: /sign_out"
    )
    .expect("write failed");

    let config = EngineConfig::load_from_file(file.path()).expect("load failed");
    assert_eq!(config.engine_name, "back_office");
    assert_eq!(config.page_size, 40);
    assert_eq!(config.max_page_size, 200);
    assert_eq!(config.models_to_exclude, vec!["AuditLog"]);
    assert_eq!(config.sorting_strategy, SortingStrategy::Single);
    assert_eq!(config.logout_path.as_deref(), Some("/sign_out"));

    // Omitted sections keep their defaults
    assert_eq!(config.default_controller, "ResourcesController");
    assert!(config.models.is_none());
}

#[test]
fn rejects_invalid_values_at_load_time() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file creation failed");
    writeln!(file, "page_size: 0").expect("write failed");

    assert!(EngineConfig::load_from_file(file.path()).is_err());
}

#[test]
fn missing_file_is_a_configuration_error() {
    let err = EngineConfig::load_from_file("/nonexistent/admin.yml").expect_err("load should fail");
    assert!(err.to_string().contains("/nonexistent/admin.yml"));
}
