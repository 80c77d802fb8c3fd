//! Naming properties: resources names must be invertible back to the model
//! names they derive from, and derived class names must keep the expected
//! shape.

mod common;

use admin_core::constants::StrategyKind;
use admin_core::naming::{to_controller_name, to_model_name, to_resources_name, to_strategy_name};
use admin_core::resolver::candidate_names;
use common::strategies::{model_name_strategy, script_path_strategy};
use proptest::prelude::*;

proptest! {
    /// Property: for any registered-style model name M,
    /// to_model_name(to_resources_name(M)) == M.
    #[test]
    fn resources_names_round_trip(model in model_name_strategy()) {
        let resources = to_resources_name(&model);
        prop_assert_eq!(to_model_name(&resources), model);
    }

    /// Property: resources names are lower-cased and keep the namespace
    /// separator.
    #[test]
    fn resources_names_are_lowercase(model in model_name_strategy()) {
        let resources = to_resources_name(&model);
        prop_assert!(resources.chars().all(|c| !c.is_ascii_uppercase()));
        prop_assert_eq!(
            resources.matches("::").count(),
            model.matches("::").count()
        );
    }

    /// Property: derived controller names end with the controller suffix and
    /// start with the script namespace.
    #[test]
    fn controller_names_have_the_expected_shape(
        model in model_name_strategy(),
        script in script_path_strategy(),
    ) {
        let resources = to_resources_name(&model);
        let controller = to_controller_name(&script, &resources);
        prop_assert!(controller.ends_with("Controller"));
        if script == "/admin" {
            prop_assert!(controller.starts_with("Admin::"));
        }
    }

    /// Property: candidate lists walk from most to least specific and end
    /// with an unqualified name.
    #[test]
    fn candidates_drop_namespace_segments_in_order(
        model in model_name_strategy(),
        script in script_path_strategy(),
    ) {
        let resources = to_resources_name(&model);
        let controller = to_controller_name(&script, &resources);
        let candidates = candidate_names(&controller, None);

        prop_assert!(!candidates.is_empty());
        for pair in candidates.windows(2) {
            prop_assert!(pair[0].len() > pair[1].len());
            prop_assert!(pair[0].ends_with(pair[1].as_str()));
        }
        let last = &candidates[candidates.len() - 1];
        prop_assert!(!last.contains("::"));
    }

    /// Property: non-controller strategies are named after the singular
    /// model name.
    #[test]
    fn strategy_names_singularize_for_non_controllers(model in model_name_strategy()) {
        let resources = to_resources_name(&model);
        let decorator = to_strategy_name("", &resources, StrategyKind::Decorator);
        prop_assert_eq!(decorator, format!("{model}Decorator"));
    }
}
