//! Error types for RDS group parsing
//!
//! Group decoding itself never fails. Errors only arise when groups are read
//! from their textual form.

use thiserror::Error;

/// Errors that can occur while parsing a group from text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line did not contain exactly four blocks
    #[error("expected 4 blocks, found {0}")]
    BlockCount(usize),

    /// Block was not a 16-bit hex word
    #[error("invalid block {index}: {word:?}")]
    InvalidBlock { index: usize, word: String },
}
