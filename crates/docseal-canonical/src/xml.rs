//! XML document model and canonicalization
//!
//! The model is namespace-aware and parser-agnostic: elements carry an
//! optional namespace URI, a local name, attributes, and ordered children
//! typed as element or character data. Qnames render as
//! `namespaceURI|localName` with the URI treated as opaque text.
//!
//! Canonicalization sorts attributes by qname, reorders siblings by
//! structural fingerprint, trims text, and assigns canonical indices, so
//! attribute order and sibling order in the source text never reach the
//! Merkle layer.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use docseal_core::{
    sha256, value_hash, PathHashes, EMPTY_ELEMENT_SUFFIX, EMPTY_ELEMENT_VALUE,
};

/// A parsed XML document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDocument {
    pub root: XmlElement,
}

/// An element node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlElement {
    /// Namespace URI, if the element name is bound to one
    pub namespace: Option<String>,
    pub local_name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

/// An attribute with its resolved namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// A child of an element: a nested element or character data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    /// Element with no attributes or children
    pub fn new(namespace: Option<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace,
            local_name: local_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Qualified name: `namespaceURI|localName`, or the bare local name
    pub fn qname(&self) -> String {
        qname_of(self.namespace.as_deref(), &self.local_name)
    }
}

impl XmlAttribute {
    pub fn qname(&self) -> String {
        qname_of(self.namespace.as_deref(), &self.local_name)
    }
}

fn qname_of(namespace: Option<&str>, local_name: &str) -> String {
    match namespace {
        Some(ns) => format!("{ns}|{local_name}"),
        None => local_name.to_string(),
    }
}

/// Canonicalize a parsed XML document into a path→hash map
pub fn canonicalize_xml(document: &XmlDocument) -> PathHashes {
    let mut paths = PathHashes::new();
    let root_path = format!("/{}", document.root.qname());
    walk_element(&document.root, &root_path, &mut paths);
    paths
}

/// A child prepared for canonical ordering
struct OrderedChild<'a> {
    /// 0 for text, 1 for elements; text sorts first
    type_order: u8,
    /// Element qname, empty for text
    qname: String,
    fingerprint_hex: String,
    node: &'a XmlNode,
}

fn walk_element(element: &XmlElement, path: &str, paths: &mut PathHashes) {
    let mut attributes: Vec<&XmlAttribute> = element.attributes.iter().collect();
    attributes.sort_by_key(|attribute| attribute.qname());
    for attribute in &attributes {
        paths.insert(
            format!("{path}.@{}", attribute.qname()),
            value_hash(attribute.value.trim()),
        );
    }

    // Whitespace-only text is not semantic and is dropped before the
    // siblings are ordered.
    let mut children: Vec<OrderedChild> = Vec::new();
    for node in &element.children {
        match node {
            XmlNode::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    children.push(OrderedChild {
                        type_order: 0,
                        qname: String::new(),
                        fingerprint_hex: hex::encode(text_fingerprint(trimmed)),
                        node,
                    });
                }
            }
            XmlNode::Element(child) => children.push(OrderedChild {
                type_order: 1,
                qname: child.qname(),
                fingerprint_hex: hex::encode(fingerprint(child)),
                node,
            }),
        }
    }

    if attributes.is_empty() && children.is_empty() {
        paths.insert(
            format!("{path}{EMPTY_ELEMENT_SUFFIX}"),
            value_hash(EMPTY_ELEMENT_VALUE),
        );
        return;
    }

    children.sort_by(|a, b| {
        (a.type_order, &a.qname, &a.fingerprint_hex).cmp(&(b.type_order, &b.qname, &b.fingerprint_hex))
    });

    let mut text_index = 0usize;
    let mut element_indices: std::collections::BTreeMap<String, usize> =
        std::collections::BTreeMap::new();
    for child in &children {
        match child.node {
            XmlNode::Text(text) => {
                paths.insert(
                    format!("{path}.#text[#{text_index}]"),
                    value_hash(text.trim()),
                );
                text_index += 1;
            }
            XmlNode::Element(child_element) => {
                let index = element_indices.entry(child.qname.clone()).or_insert(0);
                let child_path = format!("{path}/{}[#{}]", child.qname, index);
                *index += 1;
                walk_element(child_element, &child_path, paths);
            }
        }
    }
}

/// Structural fingerprint of an element
///
/// Used only to order siblings; never fed to the Merkle tree. Hashes
/// `N|EL|qname`, each `@qname=value;` in sorted attribute order, then the
/// sorted list of child fingerprints.
pub fn fingerprint(element: &XmlElement) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"N|EL|");
    hasher.update(element.qname().as_bytes());

    let mut attributes: Vec<&XmlAttribute> = element.attributes.iter().collect();
    attributes.sort_by_key(|attribute| attribute.qname());
    for attribute in attributes {
        hasher.update(b"@");
        hasher.update(attribute.qname().as_bytes());
        hasher.update(b"=");
        hasher.update(attribute.value.trim().as_bytes());
        hasher.update(b";");
    }

    let mut child_fingerprints: Vec<String> = element
        .children
        .iter()
        .filter_map(|node| match node {
            XmlNode::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| hex::encode(text_fingerprint(trimmed)))
            }
            XmlNode::Element(child) => Some(hex::encode(fingerprint(child))),
        })
        .collect();
    child_fingerprints.sort();
    for child in child_fingerprints {
        hasher.update(child.as_bytes());
    }
    hasher.finalize().into()
}

fn text_fingerprint(trimmed: &str) -> [u8; 32] {
    sha256(format!("N|TEXT|{trimmed}").as_bytes())
}
