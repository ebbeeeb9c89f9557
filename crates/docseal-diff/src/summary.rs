//! Collapsed path sets and per-key/per-tag change summaries

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use docseal_core::DocumentKind;

use crate::changeset::ChangeSet;
use crate::normalize::normalize_path;

/// Which operation a path participated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeOp {
    Added,
    Removed,
    Changed,
}

impl ChangeOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeOp::Added => "ADDED",
            ChangeOp::Removed => "REMOVED",
            ChangeOp::Changed => "CHANGED",
        }
    }
}

impl fmt::Display for ChangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map from key or tag to the sorted operation names it participated in
pub type OpsByName = BTreeMap<String, Vec<String>>;

/// Per-tag summary of an XML change set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    pub elements: OpsByName,
    pub attributes: OpsByName,
}

fn grouped_paths(changes: &ChangeSet) -> [(ChangeOp, Vec<&String>); 3] {
    [
        (ChangeOp::Added, changes.added.iter().collect()),
        (ChangeOp::Removed, changes.removed.iter().collect()),
        (
            ChangeOp::Changed,
            changes.changed.iter().map(|entry| &entry.path).collect(),
        ),
    ]
}

/// Whether a normalized path survives into the reported sets
///
/// The JSON root `$` and paths normalized away entirely are discarded.
fn is_reportable(path: &str) -> bool {
    !path.is_empty() && path != "$" && path != "/"
}

/// Normalized form of every changed path, without ancestors
pub fn collapsed_direct(kind: DocumentKind, changes: &ChangeSet) -> BTreeSet<String> {
    let mut collapsed = BTreeSet::new();
    for (_, paths) in grouped_paths(changes) {
        for path in paths {
            let normalized = normalize_path(kind, path);
            if is_reportable(&normalized) {
                collapsed.insert(normalized);
            }
        }
    }
    collapsed
}

/// Normalized changed paths plus every non-empty ancestor prefix
///
/// For XML the root segment is always present when the set is non-empty,
/// since every path prefix chain starts at `/root-qname`.
pub fn collapsed_with_ancestors(kind: DocumentKind, changes: &ChangeSet) -> BTreeSet<String> {
    let mut collapsed = BTreeSet::new();
    for path in collapsed_direct(kind, changes) {
        for ancestor in ancestors_of(kind, &path) {
            collapsed.insert(ancestor);
        }
        collapsed.insert(path);
    }
    collapsed
}

/// Non-empty proper ancestor prefixes of a normalized path
fn ancestors_of(kind: DocumentKind, path: &str) -> Vec<String> {
    let separator = match kind {
        DocumentKind::Json => '.',
        DocumentKind::Xml => '/',
    };
    path.char_indices()
        .filter(|&(index, c)| c == separator && index > 0)
        .map(|(index, _)| path[..index].to_string())
        .filter(|prefix| is_reportable(prefix))
        .collect()
}

/// Per-key summary of a JSON change set
///
/// The key is the last dot-segment of each operation's direct normalized
/// paths; the value lists the operation names, sorted.
pub fn key_summary(changes: &ChangeSet) -> OpsByName {
    let mut keys: BTreeMap<String, BTreeSet<&'static str>> = BTreeMap::new();
    for (op, paths) in grouped_paths(changes) {
        for path in paths {
            let normalized = normalize_path(DocumentKind::Json, path);
            if !is_reportable(&normalized) {
                continue;
            }
            if let Some(key) = last_segment(&normalized, '.') {
                keys.entry(key.to_string()).or_default().insert(op.as_str());
            }
        }
    }
    into_sorted_ops(keys)
}

/// Per-tag summary of an XML change set
///
/// Runs over the ancestor closure of each operation's normalized paths,
/// so enclosing elements are attributed too. `@`-prefixed segments are
/// recorded as attributes and additionally mark their parent element
/// CHANGED; all other segments are recorded as elements.
pub fn tag_summary(changes: &ChangeSet) -> TagSummary {
    let mut elements: BTreeMap<String, BTreeSet<&'static str>> = BTreeMap::new();
    let mut attributes: BTreeMap<String, BTreeSet<&'static str>> = BTreeMap::new();

    for (op, paths) in grouped_paths(changes) {
        let mut closure = BTreeSet::new();
        for path in paths {
            let normalized = normalize_path(DocumentKind::Xml, path);
            if !is_reportable(&normalized) {
                continue;
            }
            closure.extend(ancestors_of(DocumentKind::Xml, &normalized));
            closure.insert(normalized);
        }
        for path in closure {
            let Some(segment) = last_segment(&path, '/') else {
                continue;
            };
            if let Some(attribute) = segment.strip_prefix('@') {
                attributes
                    .entry(format!("@{attribute}"))
                    .or_default()
                    .insert(op.as_str());
                let parent = &path[..path.len() - segment.len() - 1];
                if let Some(parent_segment) = last_segment(parent, '/') {
                    elements
                        .entry(parent_segment.to_string())
                        .or_default()
                        .insert(ChangeOp::Changed.as_str());
                }
            } else {
                elements
                    .entry(segment.to_string())
                    .or_default()
                    .insert(op.as_str());
            }
        }
    }

    TagSummary {
        elements: into_sorted_ops(elements),
        attributes: into_sorted_ops(attributes),
    }
}

fn last_segment<'a>(path: &'a str, separator: char) -> Option<&'a str> {
    path.rsplit(separator).next().filter(|segment| !segment.is_empty())
}

fn into_sorted_ops(map: BTreeMap<String, BTreeSet<&'static str>>) -> OpsByName {
    map.into_iter()
        .map(|(name, ops)| (name, ops.into_iter().map(str::to_string).collect()))
        .collect()
}
