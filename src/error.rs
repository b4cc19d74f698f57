//! Error types returned by tree operations.

use thiserror::Error;

/// Outcome of a lookup or removal that could not find its key.
///
/// This is an ordinary result, not a failure of the tree: the tree is left
/// exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("key not found in tree")]
    NotFound,
}

/// A broken structural invariant, reported by `validate()`.
///
/// None of these can be produced through the public API; seeing one means the
/// tree code itself is wrong.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("in-order key sequence is not sorted")]
    Unordered,
    #[error("node balance factor {0} is outside -1..=1")]
    Unbalanced(i32),
    #[error("cached balance factor {cached} differs from actual {actual}")]
    StaleBalanceFactor { cached: i32, actual: i32 },
    #[error("child does not point back at its parent")]
    BrokenParentLink,
    #[error("tree holds {found} nodes but records {recorded}")]
    LengthMismatch { found: usize, recorded: usize },
}
