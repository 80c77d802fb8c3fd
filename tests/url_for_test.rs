//! Reverse URL generation: canonical paths under a mount, query merging,
//! and user-defined route overrides shadowing the generic shapes.

mod common;

use admin_core::dispatch::{Parameters, RequestContext};
use common::engine_with_products;

#[tokio::test]
async fn canonical_paths_round_trip_with_dispatch() {
    let (engine, product, _mode) = engine_with_products();
    let request = RequestContext::new("/admin", "/admin/products");

    let index = engine.index_path(&product, &request).expect("index path");
    assert_eq!(index, "/admin/products");
    let show = engine.show_path(&product, "1", &request).expect("show path");
    assert_eq!(show, "/admin/products/1");
    assert_eq!(
        engine.new_path(&product, &request).expect("new path"),
        "/admin/products/new"
    );
    assert_eq!(
        engine.edit_path(&product, "1", &request).expect("edit path"),
        "/admin/products/1/edit"
    );

    // The index path is exactly what the router serves when visited
    let mut visiting = RequestContext::new("/admin", index)
        .with_resources("products")
        .with_action("index");
    let response = engine.handle(&mut visiting).await.expect("dispatch failed");
    assert_eq!(response.status, 200);

    let mut visiting = RequestContext::new("/admin", show)
        .with_resources("products")
        .with_action("show")
        .with_id("1");
    let response = engine.handle(&mut visiting).await.expect("dispatch failed");
    assert_eq!(response.status, 200);
}

#[test]
fn nested_resources_names_appear_verbatim() {
    let (engine, _product, mode) = engine_with_products();
    let item = engine.register_model("Order::Item");
    mode.manage(item.clone());
    engine.clear();

    let request = RequestContext::new("/admin", "/admin");
    assert_eq!(
        engine.index_path(&item, &request).expect("index path"),
        "/admin/order::items"
    );
}

#[test]
fn with_query_merges_request_parameters_under_explicit_ones() {
    let (engine, product, _mode) = engine_with_products();
    let request = RequestContext::new("/admin", "/admin/products")
        .with_query_param("page", "2")
        .with_query_param("sort", "name");

    let path = engine
        .url_for(
            &request,
            None,
            "index",
            Some(&product),
            None,
            &Parameters::from_pairs([("page", "5")]),
            true,
        )
        .expect("url generation failed");

    assert_eq!(path, "/admin/products?page=5&sort=name");
}

#[test]
fn custom_action_prefers_a_user_defined_route() {
    let (engine, product, _mode) = engine_with_products();
    engine.add_route(
        "/admin/products/:id/publish",
        Some("Admin::ProductsController".to_string()),
        Some("publish".to_string()),
    );

    let request = RequestContext::new("/admin", "/admin/products");
    let path = engine
        .url_for(
            &request,
            None,
            "publish",
            Some(&product),
            Some("7"),
            &Parameters::new(),
            false,
        )
        .expect("url generation failed");

    assert_eq!(path, "/admin/products/7/publish");
}

#[test]
fn custom_action_composes_directly_without_a_route() {
    let (engine, product, _mode) = engine_with_products();
    let request = RequestContext::new("/admin", "/admin/products");

    let path = engine
        .url_for(
            &request,
            None,
            "archive",
            Some(&product),
            None,
            &Parameters::new(),
            false,
        )
        .expect("url generation failed");

    assert_eq!(path, "/admin/products/archive");
}

#[test]
fn ungoverned_model_falls_back_to_direct_composition() {
    let (engine, _product, _mode) = engine_with_products();
    // Registered but unclaimed by any mode
    let ghost = engine.register_model("Ghost");

    let request = RequestContext::new("/admin", "/admin/products");
    let path = engine
        .url_for(&request, None, "index", Some(&ghost), None, &Parameters::new(), false)
        .expect("url generation failed");

    assert_eq!(path, "/admin/ghosts/index");
}

#[test]
fn mount_selection_matches_request_path_prefix() {
    let (engine, product, _mode) = engine_with_products();
    engine.add_mount("back_office", "/back_office");

    // A request under the second mount generates under that prefix
    let request = RequestContext::new("/back_office", "/back_office/products");
    assert_eq!(
        engine.index_path(&product, &request).expect("index path"),
        "/back_office/products"
    );
}
