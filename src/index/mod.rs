//! Index structures.
//!
//! The only index in the crate today is the in-memory B-tree:
//! - [`btree::BTree`] - the tree itself (traversal, root tracking, dump/load)
//! - [`btree::Entry`] - a (key, payload) pair stored in a node bucket

pub mod btree;

pub use btree::{BTree, Entry};
