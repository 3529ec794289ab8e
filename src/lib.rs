//! bindex - an in-memory B-tree index with a recursive JSON persistence format.
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                        bindex                         │
//! ├───────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │            Catalog Layer (catalog/)             │  │
//! │  │     Movie records + bulk index construction     │  │
//! │  └─────────────────────────────────────────────────┘  │
//! │                          ↓                            │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │             Index Layer (index/)                │  │
//! │  │   BTree: insert / find / count / dump / load    │  │
//! │  │   Node buckets, median splits, root promotion   │  │
//! │  └─────────────────────────────────────────────────┘  │
//! │                          ↓                            │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │        Persistence (serde + serde_json)         │  │
//! │  │    one recursive JSON record per tree node      │  │
//! │  └─────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, capacity config)
//! - [`index`] - The B-tree index structure
//! - [`catalog`] - Movie payload type and index construction
//! - [`error`] - Error and Result types
//!
//! # Quick Start
//! ```
//! use bindex::BTree;
//!
//! let mut tree: BTree<u32, String> = BTree::new();
//! tree.insert(39, "thirty-nine".to_string()).unwrap();
//!
//! // Serialize the whole structure and bring it back.
//! let doc = tree.dump().unwrap();
//! let reloaded: BTree<u32, String> = BTree::load(&doc).unwrap();
//! assert_eq!(reloaded.find(&39).unwrap(), "thirty-nine");
//! ```

// Core modules
pub mod catalog;
pub mod common;
pub mod error;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_CAPACITY, MOVIE_INDEX_CAPACITY};
pub use common::NodeId;
pub use error::{Error, Result};

pub use catalog::Movie;
pub use index::btree::{BTree, Entry};
