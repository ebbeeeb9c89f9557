//! Set diff over two canonical path→hash maps

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use docseal_core::{DocumentKind, PathHashes};

/// A path present in both versions whose value hash differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedEntry {
    pub path: String,
    /// Lowercase hex of the old value hash
    pub old_hash: String,
    /// Lowercase hex of the new value hash
    pub new_hash: String,
}

/// Structural changes between two document versions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Paths present only in the new document
    pub added: Vec<String>,
    /// Paths present only in the old document
    pub removed: Vec<String>,
    /// Value leaves present in both with differing hashes
    pub changed: Vec<ChangedEntry>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Diff two canonical maps
///
/// The union of paths is visited in lexicographic order. A path present
/// in both versions with differing hashes enters `changed` only when it
/// is a value leaf for the document kind; interior structure is already
/// reflected in the root through the leaves below it. Empty-container
/// markers may appear under `added`/`removed` but never under `changed`.
///
/// An absent old document (`None`) reports every new path as added.
pub fn diff(old: Option<&PathHashes>, new: &PathHashes, kind: DocumentKind) -> ChangeSet {
    let empty = PathHashes::new();
    let old = old.unwrap_or(&empty);

    let mut changes = ChangeSet::default();
    let paths: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    for path in paths {
        match (old.get(path.as_str()), new.get(path.as_str())) {
            (None, Some(_)) => changes.added.push(path.clone()),
            (Some(_), None) => changes.removed.push(path.clone()),
            (Some(old_hash), Some(new_hash))
                if old_hash != new_hash && kind.is_value_leaf(path) =>
            {
                changes.changed.push(ChangedEntry {
                    path: path.clone(),
                    old_hash: hex::encode(old_hash),
                    new_hash: hex::encode(new_hash),
                });
            }
            _ => {}
        }
    }
    debug!(
        added = changes.added.len(),
        removed = changes.removed.len(),
        changed = changes.changed.len(),
        "computed change set"
    );
    changes
}
