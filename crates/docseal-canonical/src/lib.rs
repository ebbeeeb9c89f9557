//! DocSeal Canonical - deterministic, order-insensitive document traversal
//!
//! This crate turns parsed JSON and XML trees into path→hash maps:
//! - JSON: object members sorted by name, array elements reordered by
//!   structural fingerprint, empty containers announced by marker leaves
//! - XML: attributes sorted by qname, siblings reordered by structural
//!   fingerprint, trimmed text indexed as `#text` leaves
//!
//! Two documents that differ only in member order, attribute order, or
//! sibling order canonicalize to identical maps.

pub mod json;
pub mod xml;
pub mod xml_reader;

pub use json::canonicalize_json;
pub use xml::{canonicalize_xml, XmlAttribute, XmlDocument, XmlElement, XmlNode};
pub use xml_reader::parse_xml;
