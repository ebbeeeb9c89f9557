//! DocSeal Diff - structural change sets and summaries
//!
//! Given two canonical path→hash maps, this crate produces:
//! - the raw change set: added / removed / changed paths
//! - index-free normalized path sets, with optional ancestor closure
//! - per-key (JSON) and per-tag (XML) change summaries
//! - the loggable payload record combining all of the above
//!
//! The raw change set is authoritative; the collapsed sets and summaries
//! are reporting heuristics derived from it.

pub mod changeset;
pub mod normalize;
pub mod payload;
pub mod summary;

pub use changeset::*;
pub use normalize::*;
pub use payload::*;
pub use summary::*;
