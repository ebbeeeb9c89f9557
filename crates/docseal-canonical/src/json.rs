//! JSON canonicalization
//!
//! Walks a parsed `serde_json::Value`, emitting one `(canonical path,
//! value hash)` pair per leaf. Object members are visited in sorted name
//! order; array elements are reordered by structural fingerprint and
//! assigned canonical indices, so element order in the source text never
//! reaches the Merkle layer. Numbers keep their source text (the crate is
//! built with `arbitrary_precision`), which is the pinned canonical
//! numeric form.

use serde_json::Value;
use sha2::{Digest, Sha256};

use docseal_core::{
    sha256, value_hash, PathHashes, EMPTY_ARRAY_SUFFIX, EMPTY_ARRAY_VALUE, EMPTY_OBJECT_SUFFIX,
    EMPTY_OBJECT_VALUE,
};

/// Root path of a JSON document
pub const JSON_ROOT: &str = "$";

/// Canonicalize a parsed JSON value into a path→hash map
pub fn canonicalize_json(value: &Value) -> PathHashes {
    let mut paths = PathHashes::new();
    walk(value, JSON_ROOT, &mut paths);
    paths
}

/// Textual normalization of a JSON scalar
///
/// Total over scalar values: `null`, `true`/`false`, the number's source
/// text, or the raw string characters. Containers have no normal form.
pub fn normalize_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Object(_) | Value::Array(_) => None,
    }
}

fn walk(value: &Value, path: &str, paths: &mut PathHashes) {
    match value {
        Value::Null => {
            paths.insert(path.to_string(), value_hash("null"));
        }
        Value::Bool(b) => {
            paths.insert(path.to_string(), value_hash(if *b { "true" } else { "false" }));
        }
        Value::Number(n) => {
            paths.insert(path.to_string(), value_hash(&n.to_string()));
        }
        Value::String(s) => {
            paths.insert(path.to_string(), value_hash(s));
        }
        Value::Object(members) => {
            if members.is_empty() {
                paths.insert(
                    format!("{path}{EMPTY_OBJECT_SUFFIX}"),
                    value_hash(EMPTY_OBJECT_VALUE),
                );
                return;
            }
            let mut names: Vec<&String> = members.keys().collect();
            names.sort();
            for name in names {
                walk(&members[name.as_str()], &format!("{path}.{name}"), paths);
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                paths.insert(
                    format!("{path}{EMPTY_ARRAY_SUFFIX}"),
                    value_hash(EMPTY_ARRAY_VALUE),
                );
                return;
            }
            let mut ordered: Vec<(String, &Value)> = items
                .iter()
                .map(|item| (hex::encode(fingerprint(item)), item))
                .collect();
            // Stable sort: fingerprint-equal elements keep their relative
            // order and therefore stable canonical indices.
            ordered.sort_by(|a, b| a.0.cmp(&b.0));
            for (index, (_, item)) in ordered.iter().enumerate() {
                walk(item, &format!("{path}[#{index}]"), paths);
            }
        }
    }
}

/// Structural fingerprint of a JSON value
///
/// Used only to order array elements; never fed to the Merkle tree.
/// Scalars hash as `N|V|<norm>`; objects as `N|O|` with sorted
/// `name=childHex;` segments; arrays as `N|A|` with the sorted list of
/// child fingerprints.
pub fn fingerprint(value: &Value) -> [u8; 32] {
    match value {
        Value::Null => sha256(b"N|V|null"),
        Value::Bool(true) => sha256(b"N|V|true"),
        Value::Bool(false) => sha256(b"N|V|false"),
        Value::Number(n) => sha256(format!("N|V|{n}").as_bytes()),
        Value::String(s) => sha256(format!("N|V|{s}").as_bytes()),
        Value::Object(members) => {
            let mut names: Vec<&String> = members.keys().collect();
            names.sort();
            let mut hasher = Sha256::new();
            hasher.update(b"N|O|");
            for name in names {
                hasher.update(name.as_bytes());
                hasher.update(b"=");
                hasher.update(hex::encode(fingerprint(&members[name.as_str()])).as_bytes());
                hasher.update(b";");
            }
            hasher.finalize().into()
        }
        Value::Array(items) => {
            let mut children: Vec<String> =
                items.iter().map(|item| hex::encode(fingerprint(item))).collect();
            children.sort();
            let mut hasher = Sha256::new();
            hasher.update(b"N|A|");
            for child in children {
                hasher.update(child.as_bytes());
            }
            hasher.finalize().into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_root() {
        let paths = canonicalize_json(&json!(42));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths["$"], value_hash("42"));
    }

    #[test]
    fn test_null_and_bool_normalization() {
        let paths = canonicalize_json(&json!({ "a": null, "b": true }));
        assert_eq!(paths["$.a"], value_hash("null"));
        assert_eq!(paths["$.b"], value_hash("true"));
    }

    #[test]
    fn test_number_keeps_source_text() {
        let value: Value = serde_json::from_str(r#"{"pin": 411045}"#).unwrap();
        let paths = canonicalize_json(&value);
        assert_eq!(paths["$.pin"], value_hash("411045"));
    }

    #[test]
    fn test_member_order_is_invisible() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": 2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": 2, "x": 1}"#).unwrap();
        assert_eq!(canonicalize_json(&a), canonicalize_json(&b));
    }

    #[test]
    fn test_array_order_is_invisible() {
        let a = json!({ "tags": ["x", "y"] });
        let b = json!({ "tags": ["y", "x"] });
        assert_eq!(canonicalize_json(&a), canonicalize_json(&b));
    }

    #[test]
    fn test_array_elements_get_canonical_indices() {
        let paths = canonicalize_json(&json!({ "tags": ["x", "y"] }));
        let indexed: Vec<&String> = paths.keys().filter(|p| p.starts_with("$.tags[")).collect();
        assert_eq!(indexed.len(), 2);
        assert!(paths.contains_key("$.tags[#0]"));
        assert!(paths.contains_key("$.tags[#1]"));
    }

    #[test]
    fn test_duplicate_elements_keep_distinct_positions() {
        let paths = canonicalize_json(&json!({ "a": [1, 1] }));
        assert_eq!(paths["$.a[#0]"], value_hash("1"));
        assert_eq!(paths["$.a[#1]"], value_hash("1"));
    }

    #[test]
    fn test_empty_containers_emit_markers() {
        let paths = canonicalize_json(&json!({ "o": {}, "a": [] }));
        assert_eq!(paths["$.o.__emptyObject"], value_hash("{}"));
        assert_eq!(paths["$.a.__emptyArray"], value_hash("[]"));
    }

    #[test]
    fn test_nested_paths() {
        let paths = canonicalize_json(&json!({ "addr": { "pin": 411045 } }));
        assert_eq!(paths["$.addr.pin"], value_hash("411045"));
    }

    #[test]
    fn test_fingerprint_distinguishes_shape() {
        assert_ne!(fingerprint(&json!({ "a": 1 })), fingerprint(&json!([1])));
        assert_ne!(fingerprint(&json!(1)), fingerprint(&json!(2)));
    }

    #[test]
    fn test_fingerprint_ignores_member_order() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": [2, 3]}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": [3, 2], "x": 1}"#).unwrap();
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }
}
