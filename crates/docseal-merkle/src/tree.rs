//! Merkle tree construction and proof generation

use std::collections::HashMap;
use std::sync::RwLock;

use docseal_core::{empty_tree_root, hash_leaf, hash_node, SealError, SealResult};

use crate::proof::{ConsistencyProof, InclusionProof, ProofNode};

/// Immutable Merkle tree over an ordered sequence of leaf payloads
///
/// The tree hash follows RFC 6962 §2.1: an empty tree hashes to
/// SHA256(""), a single leaf to `hash_leaf(payload)`, and larger trees
/// split at the largest power of two strictly below their size. Subtree
/// hashes are memoized by `(start, size)` on first use, so the cache is a
/// pure function of the leaf list and the tree can be shared across
/// threads.
#[derive(Debug)]
pub struct MerkleTree {
    leaves: Vec<Vec<u8>>,
    cache: RwLock<HashMap<(usize, usize), [u8; 32]>>,
}

impl MerkleTree {
    /// Build a tree over the given leaf payloads, in order
    pub fn new(leaves: Vec<Vec<u8>>) -> Self {
        Self {
            leaves,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of leaves
    pub fn size(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree has no leaves
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Leaf payload by index
    pub fn leaf(&self, index: usize) -> Option<&[u8]> {
        self.leaves.get(index).map(Vec::as_slice)
    }

    /// The Merkle root: `mth(0, n)`
    pub fn root(&self) -> [u8; 32] {
        self.subtree_hash(0, self.leaves.len())
    }

    /// Merkle tree hash of the subtree covering `size` leaves from `start`
    fn subtree_hash(&self, start: usize, size: usize) -> [u8; 32] {
        if size == 0 {
            return empty_tree_root();
        }
        if let Some(hash) = self.cache.read().unwrap().get(&(start, size)) {
            return *hash;
        }
        let hash = if size == 1 {
            hash_leaf(&self.leaves[start])
        } else {
            let split = largest_power_of_two_below(size);
            hash_node(
                &self.subtree_hash(start, split),
                &self.subtree_hash(start + split, size - split),
            )
        };
        self.cache.write().unwrap().insert((start, size), hash);
        hash
    }

    /// Generate an inclusion proof for the leaf at `index`
    ///
    /// The audit path lists sibling subtree hashes bottom-up; a tree of
    /// one leaf yields an empty path.
    pub fn inclusion_proof(&self, index: usize) -> SealResult<InclusionProof> {
        if index >= self.leaves.len() {
            return Err(SealError::LeafOutOfBounds {
                index,
                size: self.leaves.len(),
            });
        }
        let mut path = Vec::new();
        self.collect_audit_path(0, self.leaves.len(), index, &mut path);
        Ok(InclusionProof {
            leaf_index: index as u32,
            leaf_count: self.leaves.len() as u32,
            path,
        })
    }

    fn collect_audit_path(
        &self,
        start: usize,
        size: usize,
        index: usize,
        path: &mut Vec<ProofNode>,
    ) {
        if size <= 1 {
            return;
        }
        let split = largest_power_of_two_below(size);
        if index < split {
            self.collect_audit_path(start, split, index, path);
            path.push(ProofNode {
                hash: self.subtree_hash(start + split, size - split),
                sibling_on_right: true,
            });
        } else {
            self.collect_audit_path(start + split, size - split, index - split, path);
            path.push(ProofNode {
                hash: self.subtree_hash(start, split),
                sibling_on_right: false,
            });
        }
    }

    /// Generate a consistency proof from a previous tree of `old_size`
    /// leaves to this tree
    ///
    /// `old_size` must lie in `1..=size()`. When `old_size == size()` the
    /// proof carries no nodes.
    pub fn consistency_proof(&self, old_size: usize) -> SealResult<ConsistencyProof> {
        let size = self.leaves.len();
        if old_size == 0 || old_size > size {
            return Err(SealError::InvalidProofBounds {
                old_size,
                tree_size: size,
            });
        }
        let mut nodes = Vec::new();
        if old_size < size {
            self.collect_consistency_nodes(old_size, 0, size, true, &mut nodes);
        }
        Ok(ConsistencyProof {
            old_size: old_size as u32,
            new_size: size as u32,
            nodes,
        })
    }

    /// RFC 6962 §2.1.2 SUBPROOF recursion
    fn collect_consistency_nodes(
        &self,
        m: usize,
        start: usize,
        size: usize,
        top: bool,
        nodes: &mut Vec<[u8; 32]>,
    ) {
        if m == size {
            if !top {
                nodes.push(self.subtree_hash(start, size));
            }
            return;
        }
        let split = largest_power_of_two_below(size);
        if m <= split {
            self.collect_consistency_nodes(m, start, split, top, nodes);
            nodes.push(self.subtree_hash(start + split, size - split));
        } else {
            self.collect_consistency_nodes(m - split, start + split, size - split, false, nodes);
            nodes.push(self.subtree_hash(start, split));
        }
    }
}

/// Largest power of two strictly less than `n`, for `n >= 2`
///
/// Equals the highest set bit of `n - 1`, matching the left-subtree split
/// of RFC 6962.
pub fn largest_power_of_two_below(n: usize) -> usize {
    debug_assert!(n >= 2);
    1 << (usize::BITS - 1 - (n - 1).leading_zeros())
}
