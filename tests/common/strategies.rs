//! Proptest strategies for generating model and class names.

use convert_case::{Case, Casing};
use proptest::prelude::*;

/// Words whose pluralization round-trips; registered model names are drawn
/// from vocabulary like this.
const WORDS: &[&str] = &[
    "item",
    "order",
    "product",
    "user",
    "category",
    "invoice",
    "shipment",
    "person",
    "box",
    "address",
    "entry",
    "status",
    "ticket",
    "warehouse",
    "customer",
    "child",
];

/// Strategy for a single PascalCase name segment, possibly compound
/// (`OrderItem`).
pub fn segment_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS.to_vec()), 1..=2)
        .prop_map(|words| {
            words
                .iter()
                .map(|word| word.to_case(Case::Pascal))
                .collect::<String>()
        })
}

/// Strategy for a qualified model name with up to three namespace segments
/// (`Admin::Order::Item`).
pub fn model_name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..=3).prop_map(|segments| segments.join("::"))
}

/// Strategy for a mount script path (`/admin`, `/main/admin`, or none).
pub fn script_path_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "/admin", "/main/admin", "/back_office"])
        .prop_map(str::to_string)
}
