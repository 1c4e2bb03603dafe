//! Identifier casing for the generated F#.
//!
//! Grammar rule names are arbitrary; these transforms guarantee legal,
//! readable F# identifiers. Names on the escape list collide with F#
//! primitive type keywords the generated code uses and pass through
//! untransformed; keep the list in sync with what the generators reference.

const ESCAPED: &[&str] = &["char", "string", "option", "list"];

/// Type/constructor casing: title-case each `_`/`-` delimited segment and
/// concatenate. Leading/trailing underscores and a bare `_` map to an
/// `Underscore` placeholder.
pub fn pascal_case(name: &str) -> String {
    if ESCAPED.contains(&name) {
        return name.to_string();
    }
    let stripped = name.trim_matches('_');
    if stripped.is_empty() {
        return "Underscore".to_string();
    }

    let mut result = String::with_capacity(name.len());
    if name.starts_with('_') {
        result.push_str("Underscore");
    }
    for segment in stripped.split(['_', '-']).filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    if name.ends_with('_') {
        result.push_str("Underscore");
    }
    result
}

/// Function/value casing: lower-case, underscore-delimited. Leading/trailing
/// underscores and a bare `_` map to an `underscore` placeholder.
pub fn snake_case(name: &str) -> String {
    if ESCAPED.contains(&name) {
        return name.to_string();
    }
    let stripped = name.trim_matches('_');
    if stripped.is_empty() {
        return "underscore".to_string();
    }

    let mut result = String::with_capacity(name.len());
    if name.starts_with('_') {
        result.push_str("underscore_");
    }
    for c in stripped.chars() {
        if c == '-' {
            result.push('_');
        } else if c.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    if name.ends_with('_') {
        result.push_str("_underscore");
    }
    result
}
