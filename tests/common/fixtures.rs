//! Shared engine fixtures for the integration suite.

use admin_core::engine::Engine;
use admin_core::modes::{MemoryMode, Mode};
use admin_core::registry::ModelClass;
use serde_json::json;
use std::sync::Arc;

/// An engine with a seeded `Product` model claimed by a memory mode.
pub fn engine_with_products() -> (Engine, ModelClass, Arc<MemoryMode>) {
    let engine = Engine::with_defaults();
    let product = engine.register_model("Product");

    let mode = Arc::new(MemoryMode::new());
    mode.manage(product.clone());
    for i in 1..=3 {
        mode.seed(&product, json!({"id": i, "name": format!("product-{i}")}));
    }
    engine.install_mode(mode.clone() as Arc<dyn Mode>);
    engine.add_mount("admin", "/admin");

    (engine, product, mode)
}
