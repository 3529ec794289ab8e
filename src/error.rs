//! Error types for bindex.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in bindex.
///
/// Every failure is a local, non-retryable programming or data error and
/// propagates to the caller of the top-level `insert`/`find`/`load` call;
/// nothing is swallowed internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Constructing a node or tree with a capacity that is not an odd
    /// integer greater than 2.
    ///
    /// Capacity must be `2n + 1` so a split always yields a non-empty,
    /// balanced left/right division with exactly one promoted entry.
    #[error("invalid bucket capacity {0} (must be odd and > 2)")]
    InvalidCapacity(usize),

    /// Inserting a key that is already present in the tree.
    ///
    /// Insertion is not an upsert; the tree is left unchanged.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A leaf-only operation was called on an internal node, or an
    /// internal-only operation on a leaf.
    ///
    /// This indicates a bug in traversal logic, not bad input.
    #[error("invalid node operation: {0}")]
    InvalidOperation(&'static str),

    /// `find` reached its terminal node without a matching key.
    ///
    /// The search path is uniquely determined by key ordering, so a miss
    /// on the terminal node is conclusive.
    #[error("key not found in index")]
    NotFound,

    /// A persisted document is structurally invalid: missing fields, an
    /// inconsistent `children`/`indexs` length relationship, out-of-order
    /// entries, or a capacity mismatch between records.
    #[error("malformed index document: {0}")]
    MalformedDocument(String),

    /// A key or payload failed to (de)serialize through serde_json.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// I/O error from file persistence.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
