//! DocSeal Merkle - RFC 6962 hash tree over opaque leaf payloads
//!
//! Provides:
//! - Merkle Tree Hash with leaf/node domain separation
//! - Inclusion proofs (audit paths) and their static verification
//! - Consistency proofs between tree sizes and their static verification
//! - Memoized subtree hashing so repeated proofs are cheap

pub mod proof;
pub mod tree;

pub use proof::*;
pub use tree::*;
