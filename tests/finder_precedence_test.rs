//! Strategy-finder precedence: explicit override, then convention guess,
//! then controller-chain default, then the generic mode-backed base.

mod common;

use admin_core::finders::FinderContext;
use admin_core::registry::StrategyDef;
use admin_core::ControllerOptions;
use common::engine_with_products;
use std::sync::Arc;

fn register_decorator_base(engine: &admin_core::Engine) {
    engine
        .register_decorator(StrategyDef::named("ResourceDecorator").base_class())
        .expect("base registration failed");
}

#[test]
fn explicit_override_beats_convention_guess() {
    let (engine, product, _mode) = engine_with_products();
    register_decorator_base(&engine);
    engine
        .register_decorator(StrategyDef::named("Admin::ProductDecorator").parent("ResourceDecorator"))
        .expect("registration failed");
    engine
        .register_decorator(StrategyDef::named("CustomDecorator").parent("ResourceDecorator"))
        .expect("registration failed");
    engine
        .register_controller(
            StrategyDef::named("Admin::ProductsController"),
            ControllerOptions {
                resource_decorator: Some("CustomDecorator".to_string()),
                ..ControllerOptions::default()
            },
        )
        .expect("controller registration failed");

    let finders = FinderContext::new("/admin", "Admin::ProductsController");
    let decorator = finders
        .decorator(&engine, &product)
        .expect("resolution failed");
    assert_eq!(decorator.decorator_name(), "CustomDecorator");
}

#[test]
fn convention_guess_beats_chain_default() {
    let (engine, product, _mode) = engine_with_products();
    register_decorator_base(&engine);
    engine
        .register_decorator(StrategyDef::named("Admin::ProductDecorator").parent("ResourceDecorator"))
        .expect("registration failed");
    engine
        .register_controller(
            StrategyDef::named("Admin::ProductsController"),
            ControllerOptions::default(),
        )
        .expect("controller registration failed");

    let finders = FinderContext::new("/admin", "Admin::ProductsController");
    let decorator = finders
        .decorator(&engine, &product)
        .expect("resolution failed");
    assert_eq!(decorator.decorator_name(), "Admin::ProductDecorator");
}

#[test]
fn guess_candidates_outside_the_family_base_are_rejected() {
    let (engine, product, _mode) = engine_with_products();
    register_decorator_base(&engine);
    // Guessable name, but not a descendant of the family base: too generic
    // to be a dedicated strategy, so resolution falls through to the default
    engine
        .register_decorator(StrategyDef::named("Admin::ProductDecorator"))
        .expect("registration failed");
    engine
        .register_controller(
            StrategyDef::named("Admin::ProductsController"),
            ControllerOptions::default(),
        )
        .expect("controller registration failed");

    let finders = FinderContext::new("/admin", "Admin::ProductsController");
    let decorator = finders
        .decorator(&engine, &product)
        .expect("resolution failed");
    assert_eq!(decorator.decorator_name(), "ResourceDecorator");
}

#[test]
fn chain_default_applies_without_a_guessable_class() {
    let (engine, product, _mode) = engine_with_products();
    register_decorator_base(&engine);
    engine
        .register_decorator(StrategyDef::named("SharedDecorator").parent("ResourceDecorator"))
        .expect("registration failed");
    engine
        .register_controller(
            StrategyDef::named("ResourcesController").base_class(),
            ControllerOptions {
                application_decorator: Some("SharedDecorator".to_string()),
                ..ControllerOptions::default()
            },
        )
        .expect("registration failed");
    engine
        .register_controller(
            StrategyDef::named("Admin::ProductsController").parent("ResourcesController"),
            ControllerOptions::default(),
        )
        .expect("registration failed");

    let finders = FinderContext::new("/admin", "Admin::ProductsController");
    let decorator = finders
        .decorator(&engine, &product)
        .expect("resolution failed");
    assert_eq!(decorator.decorator_name(), "SharedDecorator");
}

#[test]
fn generic_bases_resolve_when_nothing_is_registered() {
    let (engine, product, _mode) = engine_with_products();
    let request = admin_core::RequestContext::new("/admin", "/admin/products");

    let finders = FinderContext::new("/admin", "Admin::ProductsController");
    assert_eq!(
        finders
            .decorator(&engine, &product)
            .expect("resolution failed")
            .decorator_name(),
        "ResourceDecorator"
    );
    assert_eq!(
        finders
            .servicer(&engine, &product)
            .expect("resolution failed")
            .servicer_name(),
        "ModelServicer"
    );
    assert_eq!(
        finders
            .authorizer(&engine, &product, &request)
            .expect("resolution failed")
            .authorizer_name(),
        "ModelAuthorizer"
    );
    assert_eq!(
        finders
            .paginator(&engine, &product)
            .expect("resolution failed")
            .paginator_name(),
        "ModelPaginator"
    );
}

#[test]
fn finder_results_are_memoized_per_context() {
    let (engine, product, _mode) = engine_with_products();

    let finders = FinderContext::new("/admin", "Admin::ProductsController");
    let first = finders
        .decorator(&engine, &product)
        .expect("resolution failed");
    let second = finders
        .decorator(&engine, &product)
        .expect("resolution failed");
    assert!(Arc::ptr_eq(&first, &second));

    finders.clear();
    let third = finders
        .decorator(&engine, &product)
        .expect("resolution failed");
    assert!(!Arc::ptr_eq(&first, &third));
}
