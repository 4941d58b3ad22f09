//! Error types for tree construction and factorization.

use thiserror::Error;

/// Errors produced while indexing an input or running the factorizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input contains a zero byte, which is reserved as the
    /// end-of-string sentinel.
    #[error("input contains a zero byte at offset {0}")]
    ZeroByte(usize),

    /// The input is too long to address with 32-bit node references.
    #[error("input length {0} exceeds the 32-bit indexing limit")]
    InputTooLarge(usize),

    /// The cost ceiling must be at least 1.
    #[error("cost ceiling must be positive")]
    ZeroCostCeiling,

    /// A position's cost exceeded the ceiling, meaning the search returned
    /// an inadmissible source. This indicates a bug, not a user error.
    #[error("cost {cost} at position {position} exceeds the ceiling {ceiling}")]
    CostOverrun {
        /// 1-based text position whose cost overran.
        position: u32,
        /// The cost that was computed for it.
        cost: u32,
        /// The configured ceiling.
        ceiling: u32,
    },

    /// The search selected the null source position, meaning the node
    /// annotations are inconsistent. This indicates a bug, not a user error.
    #[error("search selected the null source position while matching from position {0}")]
    NullSource(u32),

    /// The search returned a match that extends past the end of the text,
    /// which can only come from a stale distance-to-exhausted entry. This
    /// indicates a bug, not a user error.
    #[error("match of length {length} at position {position} extends past the end of the text")]
    MatchPastEnd {
        /// 1-based text position the match was requested for.
        position: u32,
        /// The claimed match length.
        length: u32,
    },
}

/// A specialized `Result` type for factorization operations.
pub type Result<T> = std::result::Result<T, Error>;
