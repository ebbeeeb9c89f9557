//! Shared types for canonical paths and documents

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Path suffix announcing an empty JSON object
pub const EMPTY_OBJECT_SUFFIX: &str = ".__emptyObject";

/// Path suffix announcing an empty JSON array
pub const EMPTY_ARRAY_SUFFIX: &str = ".__emptyArray";

/// Path suffix announcing an XML element with no attributes and no content
pub const EMPTY_ELEMENT_SUFFIX: &str = ".__emptyElement";

/// Marker value hashed for an empty JSON object
pub const EMPTY_OBJECT_VALUE: &str = "{}";

/// Marker value hashed for an empty JSON array
pub const EMPTY_ARRAY_VALUE: &str = "[]";

/// Marker value hashed for an empty XML element
pub const EMPTY_ELEMENT_VALUE: &str = "<empty>";

/// Map from canonical path to leaf value hash
///
/// A `BTreeMap` keeps iteration lexicographic by path, which is the leaf
/// order the Merkle tree is built in.
pub type PathHashes = BTreeMap<String, [u8; 32]>;

/// Which document syntax a path→hash map was canonicalized from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Json,
    Xml,
}

impl DocumentKind {
    /// Whether a canonical path carries user data at its terminal segment.
    ///
    /// Only value leaves participate in the `changed` category of a diff:
    /// JSON scalars, XML attributes, and XML text. Empty-container markers
    /// and structural paths are excluded.
    pub fn is_value_leaf(&self, path: &str) -> bool {
        match self {
            DocumentKind::Json => {
                !path.ends_with(EMPTY_OBJECT_SUFFIX) && !path.ends_with(EMPTY_ARRAY_SUFFIX)
            }
            DocumentKind::Xml => path.contains(".@") || path.contains(".#text["),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_value_leaf_filter() {
        assert!(DocumentKind::Json.is_value_leaf("$.addr.pin"));
        assert!(DocumentKind::Json.is_value_leaf("$.tags[#0]"));
        assert!(!DocumentKind::Json.is_value_leaf("$.addr.__emptyObject"));
        assert!(!DocumentKind::Json.is_value_leaf("$.tags.__emptyArray"));
    }

    #[test]
    fn test_xml_value_leaf_filter() {
        assert!(DocumentKind::Xml.is_value_leaf("/Order/Item[#0].@sku"));
        assert!(DocumentKind::Xml.is_value_leaf("/Order/Qty[#0].#text[#0]"));
        assert!(!DocumentKind::Xml.is_value_leaf("/Order/Item[#0].__emptyElement"));
        assert!(!DocumentKind::Xml.is_value_leaf("/Order/Item[#0]"));
    }
}
