//! Error types for the engine.
//!
//! All interactive operations are total: unmatched hits, empty undo stacks
//! and degenerate polygons are no-ops, not errors. The only fallible surface
//! is document serialization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Document (de)serialization failed.
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
