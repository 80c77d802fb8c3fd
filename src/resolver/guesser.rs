//! # Name Guesser
//!
//! Given a class name like `Admin::Order::ItemsController`, derive candidate
//! names for a related class (the model `Admin::Order::Item`, the decorator
//! `Admin::Order::ItemDecorator`, …) by stripping the known suffix,
//! normalizing the terminal segment, and progressively dropping leading
//! namespace segments. Candidates are checked against the type registry in
//! order; a miss on one candidate is routine and simply means "try the next,
//! less specific, name".

use crate::constants::{suffixes, StrategyKind, NAMESPACE_SEPARATOR};
use crate::logging::log_resolution_operation;
use crate::naming::inflection::{pluralize, singularize};
use crate::registry::{ModelClass, StrategyDescriptor, TypeRegistry};
use convert_case::{Case, Casing};

fn strip_known_suffix(class_name: &str) -> &str {
    for suffix in suffixes::ALL {
        if let Some(stripped) = class_name.strip_suffix(suffix) {
            return stripped;
        }
    }
    class_name
}

/// Ordered candidate names for the target, most specific first.
///
/// `target = None` derives model names (singular, no suffix); a strategy
/// kind derives that family's class names.
pub fn candidate_names(class_name: &str, target: Option<StrategyKind>) -> Vec<String> {
    let base = strip_known_suffix(class_name);
    let mut segments: Vec<String> = base
        .split(NAMESPACE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        return Vec::new();
    }

    let last = segments.len() - 1;
    let snake = segments[last].to_case(Case::Snake);
    let normalized = match target {
        Some(kind) if kind.pluralized() => pluralize(&snake),
        _ => singularize(&snake),
    };
    segments[last] = normalized.to_case(Case::Pascal);

    let suffix = target.map(|kind| kind.suffix()).unwrap_or("");
    (0..segments.len())
        .map(|i| {
            let mut name = segments[i..].join(NAMESPACE_SEPARATOR);
            name.push_str(suffix);
            name
        })
        .collect()
}

/// Resolve the model a class name refers to, most specific match first.
pub fn resolve_model(types: &TypeRegistry, class_name: &str) -> Option<ModelClass> {
    let candidates = candidate_names(class_name, None);
    for candidate in &candidates {
        if let Some(model) = types.model(candidate) {
            log_resolution_operation(
                "resolve_model",
                class_name,
                Some(model.name()),
                candidates.len(),
            );
            return Some(model);
        }
    }
    log_resolution_operation("resolve_model", class_name, None, candidates.len());
    None
}

/// Resolve a strategy class for a family, most specific match first.
///
/// A candidate is rejected when it is the family's base class (or otherwise
/// not strictly below it) — too generic to be a dedicated strategy — or when
/// the caller's acceptance predicate declines it.
pub fn resolve_strategy<F>(
    types: &TypeRegistry,
    class_name: &str,
    kind: StrategyKind,
    accept: F,
) -> Option<String>
where
    F: Fn(&StrategyDescriptor) -> bool,
{
    let family_base = types.family_base_name(kind);
    let candidates = candidate_names(class_name, Some(kind));
    for candidate in &candidates {
        let Some(descriptor) = types.descriptor_of(kind, candidate) else {
            continue;
        };
        if let Some(base) = &family_base {
            if !types.family_is_descendant(kind, candidate, base, true) {
                continue;
            }
        }
        if !accept(descriptor) {
            continue;
        }
        log_resolution_operation(
            "resolve_strategy",
            class_name,
            Some(candidate),
            candidates.len(),
        );
        return Some(candidate.clone());
    }
    log_resolution_operation("resolve_strategy", class_name, None, candidates.len());
    None
}
