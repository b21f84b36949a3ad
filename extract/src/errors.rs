//! Error taxonomy for the extraction core.
//!
//! Document-level and chunk-level failures are isolated from one another;
//! only a budget-computation failure aborts an entire extraction call.
//! Chunk completion failures are logged and skipped rather than surfaced
//! here, and unparsable response candidates are dropped silently.

use thiserror::Error;

use crate::token::TokenizerError;

/// Errors that abort an extraction call (or a single document).
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// The rendered static prompt plus the reserved response allowance meets
    /// or exceeds the model context size, leaving no room for document text.
    /// The caller must shorten the column list or instructions.
    #[error("prompt is too long; reduce the column list or instructions")]
    PromptTooLong,

    /// A non-empty page-range expression produced no valid pages. Aborts
    /// only the document it was applied to.
    #[error("invalid page range: {0}")]
    InvalidPageRange(String),

    /// Encoding or decoding token sequences failed.
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}
