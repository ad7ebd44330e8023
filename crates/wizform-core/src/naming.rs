//! Naming helpers shared by registration, the namespace builder, and
//! error rendering.

use convert_case::{Case, Casing};

/// True for `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Snake-cased attribute prefix for an entity name; module separators
/// become underscores (`Fleet::Car` → `fleet_car`).
#[must_use]
pub fn prefix_for(entity_name: &str) -> String {
    entity_name
        .split("::")
        .map(|segment| segment.to_case(Case::Snake))
        .collect::<Vec<_>>()
        .join("_")
}

/// Plural form of a snake-cased prefix, pluralizing the last word only.
#[must_use]
pub fn pluralize(word: &str) -> String {
    let consonant_y = word.len() > 1
        && word.ends_with('y')
        && !matches!(
            word.as_bytes()[word.len() - 2],
            b'a' | b'e' | b'i' | b'o' | b'u'
        );

    if consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Human-readable attribute name: `manufacturer_id` → `Manufacturer`,
/// `car_kind` → `Car kind`.
#[must_use]
pub fn humanize(name: &str) -> String {
    let trimmed = name.strip_suffix("_id").unwrap_or(name);
    let spaced = trimmed.trim_matches('_').replace('_', " ");

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Aggregated attribute name for `field` under an optional prefix.
#[must_use]
pub fn prefixed(prefix: Option<&str>, field: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}_{field}"),
        None => field.to_string(),
    }
}
