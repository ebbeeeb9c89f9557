//! DocSeal Commit - order-insensitive document commitments
//!
//! Ties the canonicalizers to the Merkle engine: canonicalize a document,
//! encode one leaf per canonical path in lexicographic order, and build
//! the tree. The resulting root is a pure function of the path→hash map,
//! so two documents that differ only in semantically-irrelevant ordering
//! commit to the same root.

pub mod builder;

pub use builder::*;
