//! Dotted-name selection over parsed JSON
//!
//! The path language is deliberately tiny: dot-separated member names,
//! no wildcards, no filters, no array indexing. An optional `$.` prefix
//! is accepted.

use serde_json::Value;

use docseal_canonical::json::normalize_scalar;

/// Descend a dotted path to the value it names
pub fn select<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }
    let mut current = value;
    for name in path.split('.') {
        current = current.as_object()?.get(name)?;
    }
    Some(current)
}

/// Select a scalar and render its normalized text
pub fn select_scalar(value: &Value, path: &str) -> Option<String> {
    select(value, path).and_then(normalize_scalar)
}

/// Select all scalar values at a path
///
/// A scalar yields itself; an array yields each scalar element.
/// Containers inside the selection are skipped.
pub fn select_all(value: &Value, path: &str) -> Vec<String> {
    match select(value, path) {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_scalar).collect(),
        Some(scalar) => normalize_scalar(scalar).into_iter().collect(),
        None => Vec::new(),
    }
}
