//! Node identifier type.

use std::fmt;

/// Identifies a node slot in a tree's arena.
///
/// Nodes own their children and are also referenced upward by them (the
/// parent link), which would be a strong cycle under direct ownership.
/// Instead every node lives in a `Vec` arena owned by the tree, and both
/// directions of the relation are expressed as `NodeId` indices.
///
/// Using `u32` keeps ids `Copy` and small; 4 billion nodes is far beyond
/// any in-memory tree this crate materializes.
///
/// # Example
/// ```
/// use bindex::NodeId;
///
/// let id = NodeId::new(42);
/// assert_eq!(id.index(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// The arena slot this id names, as a vector index.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
