//! Crate error type.
//!
//! Handlers themselves never fail: an event without its expected target is a
//! guard-checked no-op. Errors only arise at initialization (binding against
//! a malformed document) and at the terminal/layout boundary.

use thiserror::Error;

/// Errors surfaced by page initialization and the runtime pipeline.
#[derive(Debug, Error)]
pub enum PageError {
    /// A required element is missing from the document. The page structure is
    /// a build-time guarantee, so this is fatal at initialization.
    #[error("document is missing required element: {0}")]
    MissingElement(&'static str),

    #[error("layout computation failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
