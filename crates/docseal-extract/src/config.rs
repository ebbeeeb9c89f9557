//! Extraction configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What to pull out of the new document
///
/// JSON paths are dotted names (`order.id`), optionally prefixed with
/// `$.`. XML paths are absolute simple paths (`/e:Order/e:Item/@sku`)
/// whose prefixes resolve through `namespaces`. Unset fields extract
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionConfig {
    /// Path of the document identifier
    pub id_path: Option<String>,
    /// Paths whose values populate the type list
    pub type_paths: Vec<String>,
    /// Output key → path of its value
    pub key_paths: BTreeMap<String, String>,
    /// Namespace prefix → URI, for XML paths
    pub namespaces: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ExtractionConfig = serde_json::from_str(r#"{"idPath": "order.id"}"#).unwrap();
        assert_eq!(config.id_path.as_deref(), Some("order.id"));
        assert!(config.type_paths.is_empty());
        assert!(config.key_paths.is_empty());
    }
}
