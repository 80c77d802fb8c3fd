//! String transforms between resources names, model names, and derived
//! strategy class names.
//!
//! A resources name is pluralized, lower-cased, and namespaced with `::`
//! (`order::items`). A model name is the PascalCase qualified name it derives
//! from (`Order::Item`). For any registered model `M`,
//! `to_model_name(to_resources_name(M)) == M`.

use crate::constants::{StrategyKind, NAMESPACE_SEPARATOR};
use crate::naming::inflection::{pluralize, singularize};
use crate::registry::{ModelClass, TypeRegistry};
use convert_case::{Case, Casing};

/// Convert a model name to its resources name.
///
/// `Order::Item` becomes `order::items`.
pub fn to_resources_name(model_name: &str) -> String {
    let segments: Vec<&str> = model_name.split(NAMESPACE_SEPARATOR).collect();
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let snake = segment.to_case(Case::Snake);
            if i == last {
                pluralize(&snake)
            } else {
                snake
            }
        })
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}

/// Convert a resources name back to its model name.
///
/// `order::items` becomes `Order::Item`.
pub fn to_model_name(resources_name: &str) -> String {
    let segments: Vec<&str> = resources_name.split(NAMESPACE_SEPARATOR).collect();
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let word = if i == last {
                singularize(segment)
            } else {
                (*segment).to_string()
            };
            word.to_case(Case::Pascal)
        })
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}

/// Convert a resources name to a registered model class.
///
/// Returns `None` when no model is registered under the derived name; callers
/// must treat that as "not found", not as a fault.
pub fn to_model_class(resources_name: &str, types: &TypeRegistry) -> Option<ModelClass> {
    types.model(&to_model_name(resources_name))
}

/// Convert a mount script path to its namespace prefix.
///
/// `/admin` becomes `Admin`; `/main/admin` becomes `Main::Admin`; the empty
/// path has no prefix.
pub fn script_namespace(script_path: &str) -> String {
    script_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_case(Case::Pascal))
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}

/// Derive the conventional strategy class name for a resource under a mount.
///
/// `("/admin", "order::items", Controller)` yields
/// `Admin::Order::ItemsController`; non-controller kinds are named after the
/// singular model name (`Admin::Order::ItemAuthorizer`).
pub fn to_strategy_name(script_path: &str, resources_name: &str, kind: StrategyKind) -> String {
    let segments: Vec<&str> = resources_name.split(NAMESPACE_SEPARATOR).collect();
    let last = segments.len().saturating_sub(1);
    let mut parts: Vec<String> = Vec::new();

    let prefix = script_namespace(script_path);
    if !prefix.is_empty() {
        parts.push(prefix);
    }
    for (i, segment) in segments.iter().enumerate() {
        let word = if i == last && !kind.pluralized() {
            singularize(segment)
        } else {
            (*segment).to_string()
        };
        parts.push(word.to_case(Case::Pascal));
    }

    let mut name = parts.join(NAMESPACE_SEPARATOR);
    name.push_str(kind.suffix());
    name
}

/// Derive the conventional controller class name for a resource under a mount.
pub fn to_controller_name(script_path: &str, resources_name: &str) -> String {
    to_strategy_name(script_path, resources_name, StrategyKind::Controller)
}

/// Derive the conventional authorizer class name for a resource under a mount.
pub fn to_authorizer_name(script_path: &str, resources_name: &str) -> String {
    to_strategy_name(script_path, resources_name, StrategyKind::Authorizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_resources_name() {
        assert_eq!(to_resources_name("Product"), "products");
        assert_eq!(to_resources_name("Order::Item"), "order::items");
        assert_eq!(to_resources_name("Admin::OrderItem"), "admin::order_items");
        assert_eq!(to_resources_name("Person"), "people");
    }

    #[test]
    fn test_to_model_name() {
        assert_eq!(to_model_name("products"), "Product");
        assert_eq!(to_model_name("order::items"), "Order::Item");
        assert_eq!(to_model_name("admin::order_items"), "Admin::OrderItem");
        assert_eq!(to_model_name("people"), "Person");
    }

    #[test]
    fn test_round_trip() {
        for model in ["Product", "Order::Item", "Admin::OrderItem", "Person", "Category"] {
            assert_eq!(to_model_name(&to_resources_name(model)), model);
        }
    }

    #[test]
    fn test_script_namespace() {
        assert_eq!(script_namespace("/admin"), "Admin");
        assert_eq!(script_namespace("/main/admin"), "Main::Admin");
        assert_eq!(script_namespace(""), "");
        assert_eq!(script_namespace("/"), "");
    }

    #[test]
    fn test_to_controller_name() {
        assert_eq!(
            to_controller_name("/admin", "order::items"),
            "Admin::Order::ItemsController"
        );
        assert_eq!(to_controller_name("", "products"), "ProductsController");
    }

    #[test]
    fn test_to_authorizer_name_singularizes() {
        assert_eq!(
            to_authorizer_name("/admin", "order::items"),
            "Admin::Order::ItemAuthorizer"
        );
        assert_eq!(to_authorizer_name("", "products"), "ProductAuthorizer");
    }

    #[test]
    fn test_to_strategy_name_per_kind() {
        assert_eq!(
            to_strategy_name("/admin", "products", StrategyKind::Decorator),
            "Admin::ProductDecorator"
        );
        assert_eq!(
            to_strategy_name("/admin", "products", StrategyKind::Servicer),
            "Admin::ProductServicer"
        );
        assert_eq!(
            to_strategy_name("/admin", "products", StrategyKind::Paginator),
            "Admin::ProductPaginator"
        );
        assert_eq!(
            to_strategy_name("/admin", "products", StrategyKind::Controller),
            "Admin::ProductsController"
        );
    }
}
