//! Error types for knapsack selection and Huffman coding.

use thiserror::Error;

/// Error variants for shelfcode operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied data violates a precondition (negative weight or
    /// capacity, empty value sequence).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A bit string could not be split into codewords of the code book.
    #[error("invalid code: {0}")]
    InvalidCode(String),
}

/// A specialized Result type for shelfcode operations.
pub type Result<T> = std::result::Result<T, Error>;
