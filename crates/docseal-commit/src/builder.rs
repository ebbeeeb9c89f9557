//! Commitment construction and per-path proofs

use serde_json::Value;
use tracing::debug;

use docseal_canonical::{canonicalize_json, canonicalize_xml, parse_xml, XmlDocument};
use docseal_core::{encode_leaf, PathHashes, SealError, SealResult};
use docseal_merkle::{InclusionProof, MerkleTree};

/// A document commitment: the root, the tree behind it, and the
/// canonical path→hash map the leaves were encoded from
#[derive(Debug)]
pub struct BuildResult {
    pub root: [u8; 32],
    pub tree: MerkleTree,
    pub path_value_hashes: PathHashes,
}

impl BuildResult {
    fn from_paths(paths: PathHashes) -> Self {
        let leaves: Vec<Vec<u8>> = paths
            .iter()
            .map(|(path, hash)| encode_leaf(path, hash))
            .collect();
        let tree = MerkleTree::new(leaves);
        let root = tree.root();
        debug!(
            leaf_count = paths.len(),
            root = %hex::encode(root),
            "built document commitment"
        );
        Self {
            root,
            tree,
            path_value_hashes: paths,
        }
    }

    /// Lowercase hex rendering of the root
    pub fn root_hex(&self) -> String {
        hex::encode(self.root)
    }

    /// Leaf index of a canonical path, by lexicographic position
    pub fn leaf_index(&self, path: &str) -> Option<usize> {
        self.path_value_hashes.keys().position(|p| p == path)
    }

    /// The encoded leaf payload committed for a canonical path
    pub fn leaf_payload(&self, path: &str) -> SealResult<Vec<u8>> {
        let hash = self
            .path_value_hashes
            .get(path)
            .ok_or_else(|| SealError::PathNotFound(path.to_string()))?;
        Ok(encode_leaf(path, hash))
    }

    /// Generate an inclusion proof for a canonical path
    pub fn prove(&self, path: &str) -> SealResult<InclusionProof> {
        let index = self
            .leaf_index(path)
            .ok_or_else(|| SealError::PathNotFound(path.to_string()))?;
        self.tree.inclusion_proof(index)
    }
}

/// Commit to a parsed JSON document
pub fn build_json(value: &Value) -> BuildResult {
    BuildResult::from_paths(canonicalize_json(value))
}

/// Commit to a JSON document from text
pub fn build_json_str(text: &str) -> SealResult<BuildResult> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| SealError::MalformedJson(e.to_string()))?;
    Ok(build_json(&value))
}

/// Commit to a parsed XML document
pub fn build_xml(document: &XmlDocument) -> BuildResult {
    BuildResult::from_paths(canonicalize_xml(document))
}

/// Commit to an XML document from text
pub fn build_xml_str(text: &str) -> SealResult<BuildResult> {
    Ok(build_xml(&parse_xml(text)?))
}
