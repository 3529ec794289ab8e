//! Configuration constants for bindex.

/// Default bucket capacity for a generic index (5 entries).
///
/// Capacity is the maximum number of entries a node may reach before it
/// must split, and is constrained to `2n + 1` for some `n >= 1`:
/// - `cursor = capacity / 2` then always picks a true median,
/// - both halves of a split are non-empty,
/// - exactly one entry is promoted to the parent.
///
/// With capacity 5 a node splits into two 2-entry leaves plus one
/// promoted entry.
pub const DEFAULT_CAPACITY: usize = 5;

/// Bucket capacity used for the movie catalog index (11 entries).
///
/// Wider buckets mean fewer levels: with ~1000 movies and capacity 11 the
/// tree stays 3 levels deep.
pub const MOVIE_INDEX_CAPACITY: usize = 11;

/// Check whether a capacity is a legal bucket size (`2n + 1`, `n >= 1`).
#[inline]
pub fn is_valid_capacity(capacity: usize) -> bool {
    capacity > 2 && capacity % 2 == 1
}
