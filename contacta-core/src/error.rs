//! Structured error types for the contacta workspace.

use thiserror::Error;

/// Unified error type for all contacta operations.
#[derive(Debug, Error)]
pub enum ContactaError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed input data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A residue code that is neither a known one-letter nor multi-letter code.
    #[error("unknown residue code {code:?} for residue {residue}")]
    UnknownResidueCode { residue: String, code: String },

    /// A HELIX/SHEET record whose fields could not be parsed.
    #[error("malformed structure record at line {line}: {reason}")]
    MalformedStructureRecord { line: usize, reason: String },

    /// A residue with zero weighted degree under the fail-fast policy.
    #[error("residue {0} has no contacts; local partitioning is undefined")]
    IsolatedNode(String),

    /// Two variants whose residue sets differ.
    #[error(
        "variants are not comparable: {only_first} residue(s) only in the first, \
         {only_second} only in the second"
    )]
    IncompatibleVariants {
        only_first: usize,
        only_second: usize,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ContactaError>;
