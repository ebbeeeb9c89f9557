//! Index-free path normalization for reporting
//!
//! Normalization feeds the collapsed path sets and summaries only; the
//! Merkle root and the raw change set always use the canonical indexed
//! paths.

use docseal_core::{
    DocumentKind, EMPTY_ARRAY_SUFFIX, EMPTY_ELEMENT_SUFFIX, EMPTY_OBJECT_SUFFIX,
};

/// Normalize a canonical path for summaries
///
/// JSON: every `[#k]` canonical index is stripped. XML: canonical indices
/// are stripped, `.#text` segments are removed, attribute markers `.@`
/// are rewritten to `/@`, empty-container markers are dropped, and runs
/// of `/` collapse to one. Idempotent for both kinds.
pub fn normalize_path(kind: DocumentKind, path: &str) -> String {
    match kind {
        DocumentKind::Json => strip_canonical_indices(path),
        DocumentKind::Xml => {
            let mut normalized = strip_canonical_indices(path);
            normalized = normalized.replace(".#text", "");
            normalized = normalized.replace(".@", "/@");
            normalized = normalized.replace(EMPTY_ELEMENT_SUFFIX, "");
            normalized = normalized.replace(EMPTY_ARRAY_SUFFIX, "");
            normalized = normalized.replace(EMPTY_OBJECT_SUFFIX, "");
            while normalized.contains("//") {
                normalized = normalized.replace("//", "/");
            }
            normalized
        }
    }
}

/// Remove every `[#<digits>]` occurrence
fn strip_canonical_indices(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find("[#") {
        let tail = &rest[open + 2..];
        match tail.find(']') {
            Some(close)
                if close > 0 && tail[..close].bytes().all(|b| b.is_ascii_digit()) =>
            {
                out.push_str(&rest[..open]);
                rest = &tail[close + 1..];
            }
            _ => {
                out.push_str(&rest[..open + 2]);
                rest = &rest[open + 2..];
            }
        }
    }
    out.push_str(rest);
    out
}
