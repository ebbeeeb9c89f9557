//! Merkle proof structures and static verification

use serde::{Deserialize, Serialize};

use docseal_core::{hash_leaf, hash_node};

/// One step of an inclusion proof audit path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    /// Hash of the sibling subtree at this level
    pub hash: [u8; 32],
    /// Whether the sibling sits to the right of the running hash
    pub sibling_on_right: bool,
}

/// Audit path from a leaf to the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Index of the proven leaf
    pub leaf_index: u32,
    /// Number of leaves in the tree the proof was generated from
    pub leaf_count: u32,
    /// Sibling hashes, bottom-up
    pub path: Vec<ProofNode>,
}

/// Proof that the tree of `new_size` leaves is an append-only extension of
/// the tree over its first `old_size` leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyProof {
    pub old_size: u32,
    pub new_size: u32,
    pub nodes: Vec<[u8; 32]>,
}

/// Verify an inclusion proof against an expected root
///
/// Rehashes the leaf payload and folds the audit path; a mismatch returns
/// `false`, never an error.
pub fn verify_inclusion(leaf_payload: &[u8], proof: &InclusionProof, expected_root: &[u8; 32]) -> bool {
    let mut running = hash_leaf(leaf_payload);
    for node in &proof.path {
        running = if node.sibling_on_right {
            hash_node(&running, &node.hash)
        } else {
            hash_node(&node.hash, &running)
        };
    }
    running == *expected_root
}

/// Verify a consistency proof between two tree heads
///
/// Implements the RFC 6962 §2.1.2 client algorithm: reconstruct both the
/// old root (`fr`) and the new root (`sr`) from the proof nodes while
/// bit-walking `old_size - 1` and `new_size - 1`. The proof must be
/// consumed exactly. When `old_size == new_size` the roots must already be
/// equal and no nodes are expected.
pub fn verify_consistency(
    old_root: &[u8; 32],
    old_size: usize,
    new_root: &[u8; 32],
    new_size: usize,
    nodes: &[[u8; 32]],
) -> bool {
    if old_size == 0 || old_size > new_size {
        return false;
    }
    if old_size == new_size {
        return old_root == new_root && nodes.is_empty();
    }

    let mut remaining = nodes.iter();
    let mut fn_ = old_size - 1;
    let mut sn = new_size - 1;
    while fn_ & 1 == 1 {
        fn_ >>= 1;
        sn >>= 1;
    }

    // When old_size is a power of two the old root itself seeds the walk
    // and every proof node is consumed below.
    let (mut fr, mut sr) = if fn_ == 0 {
        (*old_root, *old_root)
    } else {
        match remaining.next() {
            Some(seed) => (*seed, *seed),
            None => return false,
        }
    };

    while fn_ != 0 {
        if fn_ & 1 == 1 {
            let node = match remaining.next() {
                Some(node) => node,
                None => return false,
            };
            fr = hash_node(node, &fr);
            sr = hash_node(node, &sr);
        } else if fn_ < sn {
            let node = match remaining.next() {
                Some(node) => node,
                None => return false,
            };
            sr = hash_node(&sr, node);
        }
        fn_ >>= 1;
        sn >>= 1;
    }

    // The new tree may extend above the height of the old subtree.
    while sn != 0 {
        let node = match remaining.next() {
            Some(node) => node,
            None => return false,
        };
        sr = hash_node(&sr, node);
        sn >>= 1;
    }

    fr == *old_root && sr == *new_root && remaining.next().is_none()
}
