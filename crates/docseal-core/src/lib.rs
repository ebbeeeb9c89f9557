//! DocSeal Core - hash primitives and shared types
//!
//! This crate provides the foundation the other DocSeal crates build on:
//! - SHA-256 with RFC 6962 leaf/node domain separation
//! - Value hashing and path-prefixed leaf encoding
//! - Canonical-path marker constants and the value-leaf filter
//! - The shared error type

pub mod error;
pub mod hash;
pub mod types;

pub use error::*;
pub use hash::*;
pub use types::*;
