//! End-to-end demonstration of the resolution engine against the in-memory
//! mode: register models, dispatch a few requests, and print what the
//! generic controller served.

use admin_core::dispatch::RequestContext;
use admin_core::engine::Engine;
use admin_core::modes::MemoryMode;
use admin_core::Parameters;
use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    admin_core::logging::init_structured_logging();

    let engine = Engine::with_defaults();
    let product = engine.register_model("Product");
    let item = engine.register_model("Order::Item");

    let mode = Arc::new(MemoryMode::new());
    mode.manage(product.clone());
    mode.manage(item.clone());
    mode.seed(&product, json!({"id": 1, "name": "Widget", "price": 9.5}));
    mode.seed(&product, json!({"id": 2, "name": "Gadget", "price": 19.0}));
    mode.seed(&item, json!({"id": 1, "product_id": 1, "quantity": 3}));
    engine.install_mode(mode);

    engine.add_mount("admin", "/admin");

    // Index
    let mut request = RequestContext::new("/admin", "/admin/products")
        .with_resources("products")
        .with_action("index");
    let response = engine.handle(&mut request).await?;
    println!("GET /admin/products -> {}", response.status);
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    // Show a nested-namespace resource
    let mut request = RequestContext::new("/admin", "/admin/order::items/1")
        .with_resources("order::items")
        .with_action("show")
        .with_id("1");
    let response = engine.handle(&mut request).await?;
    println!("GET /admin/order::items/1 -> {}", response.status);
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    // Create
    let mut request = RequestContext::new("/admin", "/admin/products")
        .with_resources("products")
        .with_action("create")
        .with_payload(json!({"name": "Sprocket", "price": 4.25}));
    let response = engine.handle(&mut request).await?;
    println!("POST /admin/products -> {}", response.status);
    for flash in request.session.flash() {
        println!("flash[{}]: {}", flash.kind.as_str(), flash.message);
    }

    // Unregistered resource renders an in-app error page
    let mut request = RequestContext::new("/admin", "/admin/unregistered_things")
        .with_resources("unregistered_things")
        .with_action("index");
    let response = engine.handle(&mut request).await?;
    println!("GET /admin/unregistered_things -> {}", response.status);

    // Reverse URL generation
    let request = RequestContext::new("/admin", "/admin/products");
    println!("index_path: {}", engine.index_path(&product, &request)?);
    println!("show_path:  {}", engine.show_path(&product, "1", &request)?);
    let filtered = engine.url_for(
        &request,
        None,
        "index",
        Some(&product),
        None,
        &Parameters::from_pairs([("page", "2")]),
        false,
    )?;
    println!("paged:      {filtered}");

    Ok(())
}
