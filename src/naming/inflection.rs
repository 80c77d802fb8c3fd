//! English pluralization rules for resources names.
//!
//! The rule set is intentionally small: uncountables, a table of common
//! irregulars, and the standard suffix rules. Singularization is the exact
//! inverse of what pluralization produces, which keeps resources names
//! invertible back to model names.

/// Words whose plural equals their singular.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "metadata",
    "money",
    "news",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Irregular singular/plural pairs, looked up in both directions.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("datum", "data"),
    ("medium", "media"),
    ("leaf", "leaves"),
    ("knife", "knives"),
    ("life", "lives"),
    ("wolf", "wolves"),
    ("half", "halves"),
    ("shelf", "shelves"),
];

/// Pluralize a lower-cased word.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        // Already plural
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix('y') {
        if stem
            .chars()
            .last()
            .map(|c| !is_vowel(c))
            .unwrap_or(false)
        {
            return format!("{stem}ies");
        }
    }
    if ends_with_sibilant(word) {
        return format!("{word}es");
    }
    if word.ends_with("us") {
        // "status" and friends take -es
        return format!("{word}es");
    }
    if word.ends_with('s') {
        // Anything else ending in a plain "s" is treated as already plural
        return word.to_string();
    }
    format!("{word}s")
}

/// Singularize a lower-cased word. Inverse of [`pluralize`].
pub fn singularize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return (*singular).to_string();
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == word) {
        // Already singular
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if ends_with_sibilant(stem) || stem.ends_with('s') {
            return stem.to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !stem.ends_with('s') && !stem.is_empty() {
            return stem.to_string();
        }
    }
    word.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn ends_with_sibilant(word: &str) -> bool {
    word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
        || word.ends_with("ss")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(pluralize("item"), "items");
        assert_eq!(pluralize("order"), "orders");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn test_pluralize_is_idempotent_on_plurals() {
        assert_eq!(pluralize("products"), "products");
        assert_eq!(pluralize("people"), "people");
        assert_eq!(pluralize("categories"), "categories");
    }

    #[test]
    fn test_irregular_plurals() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("leaf"), "leaves");
    }

    #[test]
    fn test_uncountables() {
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(singularize("information"), "information");
    }

    #[test]
    fn test_singularize_inverts_pluralize() {
        for word in [
            "item", "order", "category", "box", "dish", "class", "status", "day", "person",
            "child", "leaf", "knife", "sheep", "product", "user", "address",
        ] {
            assert_eq!(singularize(&pluralize(word)), word, "round trip for {word}");
        }
    }

    #[test]
    fn test_singularize_already_singular() {
        assert_eq!(singularize("item"), "item");
        assert_eq!(singularize("person"), "person");
    }
}
