//! SHA-256 primitives and leaf encoding
//!
//! Domain separation follows RFC 6962: leaf hashes are computed over a
//! 0x00-prefixed payload, interior node hashes over 0x01 followed by the
//! two child hashes. Leaf payloads length-prefix the canonical path so the
//! path/hash boundary is unambiguous.

use sha2::{Digest, Sha256};

/// RFC 6962 leaf hash prefix
pub const LEAF_PREFIX: u8 = 0x00;

/// RFC 6962 interior node hash prefix
pub const NODE_PREFIX: u8 = 0x01;

/// Domain tag for value hashes
pub const VALUE_TAG: &str = "V|";

/// Compute SHA-256 over raw bytes
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash a leaf payload: SHA256(0x00 || payload)
pub fn hash_leaf(payload: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(payload);
    hasher.finalize().into()
}

/// Hash an interior node: SHA256(0x01 || left || right)
pub fn hash_node(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// The hash of an empty tree: SHA256 of the empty string
pub fn empty_tree_root() -> [u8; 32] {
    sha256(b"")
}

/// Hash a normalized leaf value: SHA256("V|" || utf8(value))
///
/// Every Merkle leaf value flows through this function, including
/// attribute values, text content, and empty-container markers.
pub fn value_hash(normalized: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(VALUE_TAG.as_bytes());
    hasher.update(normalized.as_bytes());
    hasher.finalize().into()
}

/// Encode a leaf payload from a canonical path and its value hash
///
/// Layout: 4-byte big-endian length of the UTF-8 path, the path bytes,
/// then the 32-byte value hash.
pub fn encode_leaf(path: &str, value_hash: &[u8; 32]) -> Vec<u8> {
    let path_bytes = path.as_bytes();
    let mut payload = Vec::with_capacity(4 + path_bytes.len() + 32);
    payload.extend_from_slice(&(path_bytes.len() as u32).to_be_bytes());
    payload.extend_from_slice(path_bytes);
    payload.extend_from_slice(value_hash);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_length() {
        assert_eq!(sha256(b"hello world").len(), 32);
    }

    #[test]
    fn test_empty_tree_root_is_sha256_of_nothing() {
        assert_eq!(
            hex::encode(empty_tree_root()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_leaf_and_node_domains_differ() {
        let data = [0u8; 32];
        let combined = [data, data].concat();
        assert_ne!(hash_leaf(&combined), hash_node(&data, &data));
    }

    #[test]
    fn test_value_hash_tagged() {
        assert_eq!(value_hash("null"), sha256(b"V|null"));
        assert_ne!(value_hash("null"), sha256(b"null"));
    }

    #[test]
    fn test_encode_leaf_layout() {
        let vhash = value_hash("42");
        let payload = encode_leaf("$.a", &vhash);
        assert_eq!(&payload[..4], &[0, 0, 0, 3]);
        assert_eq!(&payload[4..7], b"$.a");
        assert_eq!(&payload[7..], &vhash);
    }

    #[test]
    fn test_encode_leaf_disambiguates_boundaries() {
        // Without the length prefix these two would collide.
        let h = [0xabu8; 32];
        let a = encode_leaf("$.ab", &h);
        let b = encode_leaf("$.a", &h);
        assert_ne!(a, b);
    }
}
