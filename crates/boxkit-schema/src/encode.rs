use crate::keys::KeyClass;
use crate::types::HookFragment;

/// Canonicalize the literal booleans `true`/`false` to `1`/`0`.
///
/// This is value-driven: it applies to every key, declared flag or not.
pub fn canonicalize_bool(value: &str) -> &str {
    match value {
        "true" => "1",
        "false" => "0",
        other => other,
    }
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
}

/// Remove one surrounding pair of matching quotes, if present.
pub fn strip_quotes(value: &str) -> &str {
    if is_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Quote a value containing spaces so it survives later shell word splitting.
///
/// Already-quoted values pass through. Values carrying a double quote are
/// wrapped in single quotes instead.
pub fn sanitize(value: &str) -> String {
    if !value.contains(' ') || is_quoted(value) {
        return value.to_owned();
    }
    if value.contains('"') {
        format!("'{value}'")
    } else {
        format!("\"{value}\"")
    }
}

/// Encode a raw value for storage in a section bag.
pub fn encode_value(class: KeyClass, raw: &str) -> String {
    let value = canonicalize_bool(raw);
    if class.is_hook() {
        HookFragment::encode(strip_quotes(value))
            .as_encoded()
            .to_owned()
    } else {
        sanitize(value)
    }
}
