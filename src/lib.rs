//! # batlz
//!
//! Bounded access-time Lempel–Ziv factorization.
//!
//! This library computes an LZ-like factorization of a byte string in which
//! every copy source respects a per-position reuse ceiling: each time a
//! position is copied its cost grows, and once a position reaches the
//! ceiling it can no longer serve as a source unless its distance to the
//! next exhausted position still buys a longer match.
//!
//! The engine is a suffix tree built online with Ukkonen's algorithm and
//! annotated, per internal node, with the best copy source currently
//! available in its subtree. A greedy loop alternates between a cost-aware
//! search for the longest admissible match and a leaf-to-root refresh of
//! the annotations the emitted phrase invalidated.
//!
//! ## Example
//!
//! ```rust
//! use batlz::factorize;
//!
//! let result = factorize(b"abcabcabc", 10).unwrap();
//! assert_eq!(result.phrase_count(), 4);
//! assert_eq!(result.decode(), b"abcabcabc");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod annotate;
mod error;
mod factorize;
mod search;
mod segment;
mod tree;

pub use error::{Error, Result};
pub use factorize::{factorize, Factorization, Factorizer, Phrase};
pub use search::Occurrence;
pub use tree::SuffixTree;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::factorize::{factorize, Factorization, Factorizer, Phrase};
    pub use crate::search::Occurrence;
    pub use crate::tree::SuffixTree;
}
