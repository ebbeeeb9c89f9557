//! Loggable payload record for a two-version comparison

use serde::{Deserialize, Serialize};
use tracing::debug;

use docseal_core::DocumentKind;

use crate::changeset::{ChangeSet, ChangedEntry};
use crate::summary::{collapsed_direct, key_summary, tag_summary, OpsByName};

/// Literal recorded for `rootOld` when there was no old document
pub const EMPTY_ROOT_LITERAL: &str = "<empty>";

/// Language-neutral record of a comparison, suitable for logging
///
/// Carries the two roots, the raw change set, the direct collapsed
/// (index-free) paths, and the per-key or per-tag summary depending on
/// the document kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffPayload {
    /// Hex of the old root, or `<empty>` when the old document was absent
    pub root_old: String,
    /// Hex of the new root
    pub root_new: String,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<ChangedEntry>,
    /// Direct collapsed paths, normalized and index-free
    pub collapsed_paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_summary: Option<OpsByName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_summary_elements: Option<OpsByName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_summary_attributes: Option<OpsByName>,
}

impl DiffPayload {
    /// Assemble the payload for a change set between two roots
    ///
    /// `old_root` is `None` when the old document was absent.
    pub fn assemble(
        kind: DocumentKind,
        old_root: Option<[u8; 32]>,
        new_root: [u8; 32],
        changes: &ChangeSet,
    ) -> Self {
        let collapsed_paths = collapsed_direct(kind, changes).into_iter().collect();
        let (key_summary, tag_summary_elements, tag_summary_attributes) = match kind {
            DocumentKind::Json => (Some(key_summary(changes)), None, None),
            DocumentKind::Xml => {
                let tags = tag_summary(changes);
                (None, Some(tags.elements), Some(tags.attributes))
            }
        };
        debug!(kind = ?kind, changed = changes.changed.len(), "assembled diff payload");
        Self {
            root_old: old_root
                .map(hex::encode)
                .unwrap_or_else(|| EMPTY_ROOT_LITERAL.to_string()),
            root_new: hex::encode(new_root),
            added: changes.added.clone(),
            removed: changes.removed.clone(),
            changed: changes.changed.clone(),
            collapsed_paths,
            key_summary,
            tag_summary_elements,
            tag_summary_attributes,
        }
    }
}
