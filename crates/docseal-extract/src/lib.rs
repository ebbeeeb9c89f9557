//! DocSeal Extract - thin, configuration-driven field extraction
//!
//! Pulls an identifier, a list of types, and a key→value map out of the
//! new document of a comparison. JSON configs use dotted names only (no
//! wildcards or filters); XML configs use absolute simple paths with an
//! optional prefix→URI namespace resolver. Extraction never alters a
//! change set.

pub mod config;
pub mod json_path;
pub mod xml_path;

pub use config::*;

use serde_json::Value;
use std::collections::BTreeMap;

use docseal_canonical::XmlDocument;
use docseal_core::SealResult;

/// Fields pulled from a document per an [`ExtractionConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extraction {
    /// The identifier, when the config names one and it resolves
    pub id: Option<String>,
    /// Every value selected by the type paths
    pub types: Vec<String>,
    /// Configured key → resolved value; unresolved keys are absent
    pub key: BTreeMap<String, String>,
}

/// Extract from a parsed JSON document
pub fn extract_json(value: &Value, config: &ExtractionConfig) -> Extraction {
    Extraction {
        id: config
            .id_path
            .as_deref()
            .and_then(|path| json_path::select_scalar(value, path)),
        types: config
            .type_paths
            .iter()
            .flat_map(|path| json_path::select_all(value, path))
            .collect(),
        key: config
            .key_paths
            .iter()
            .filter_map(|(key, path)| {
                json_path::select_scalar(value, path).map(|v| (key.clone(), v))
            })
            .collect(),
    }
}

/// Extract from a parsed XML document
///
/// Fails only on unresolvable configuration (an unknown namespace
/// prefix); paths that match nothing simply resolve to nothing.
pub fn extract_xml(document: &XmlDocument, config: &ExtractionConfig) -> SealResult<Extraction> {
    let id = match config.id_path.as_deref() {
        Some(path) => xml_path::select_first(document, path, &config.namespaces)?,
        None => None,
    };
    let mut types = Vec::new();
    for path in &config.type_paths {
        types.extend(xml_path::select_all(document, path, &config.namespaces)?);
    }
    let mut key = BTreeMap::new();
    for (name, path) in &config.key_paths {
        if let Some(value) = xml_path::select_first(document, path, &config.namespaces)? {
            key.insert(name.clone(), value);
        }
    }
    Ok(Extraction { id, types, key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docseal_canonical::parse_xml;
    use serde_json::json;

    #[test]
    fn test_unconfigured_extraction_is_empty() {
        let extraction = extract_json(&json!({ "a": 1 }), &ExtractionConfig::default());
        assert_eq!(extraction, Extraction::default());
    }

    #[test]
    fn test_extract_json_fields() {
        let value = json!({
            "order": { "id": "ord-7", "kind": ["sale", "export"] },
            "total": 12.5
        });
        let config = ExtractionConfig {
            id_path: Some("order.id".to_string()),
            type_paths: vec!["order.kind".to_string()],
            key_paths: [("total".to_string(), "total".to_string())].into(),
            namespaces: BTreeMap::new(),
        };
        let extraction = extract_json(&value, &config);
        assert_eq!(extraction.id.as_deref(), Some("ord-7"));
        assert_eq!(extraction.types, vec!["sale", "export"]);
        assert_eq!(extraction.key["total"], "12.5");
    }

    #[test]
    fn test_extract_xml_fields() {
        let document = parse_xml(
            r#"<Order xmlns="urn:ex" id="ord-7">
                 <Item sku="A"><Qty>2</Qty></Item>
                 <Item sku="B"><Qty>1</Qty></Item>
               </Order>"#,
        )
        .unwrap();
        let config = ExtractionConfig {
            id_path: Some("/e:Order/@id".to_string()),
            type_paths: vec!["/e:Order/e:Item/@sku".to_string()],
            key_paths: [("qty".to_string(), "/e:Order/e:Item/e:Qty".to_string())].into(),
            namespaces: [("e".to_string(), "urn:ex".to_string())].into(),
        };
        let extraction = extract_xml(&document, &config).unwrap();
        assert_eq!(extraction.id.as_deref(), Some("ord-7"));
        assert_eq!(extraction.types, vec!["A", "B"]);
        assert_eq!(extraction.key["qty"], "2");
    }

    #[test]
    fn test_extract_xml_unknown_prefix_fails() {
        let document = parse_xml("<a/>").unwrap();
        let config = ExtractionConfig {
            id_path: Some("/nope:a".to_string()),
            ..ExtractionConfig::default()
        };
        assert!(extract_xml(&document, &config).is_err());
    }
}
