//! Common types and utilities shared across bindex.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants (bucket capacities)
//! - Node identifiers for arena-indexed trees

pub mod config;
mod node_id;

pub use node_id::NodeId;
