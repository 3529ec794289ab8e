//! B-tree index implementation.
//!
//! A balanced multi-way search tree keyed on an ordered key type and
//! storing a serializable payload per key. Nodes hold up to
//! `capacity - 1` entries at rest; the insert that fills a bucket to
//! `capacity` splits it around its median:
//!
//! ```text
//!              split of a full capacity-5 leaf
//!
//!   [22 39 41 53 97]        ──►          [41]
//!                                       /    \
//!                                 [22 39]    [53 97]
//! ```
//!
//! The median is promoted into the parent, which may fill and split in
//! turn, cascading upward; a split of the root grows the tree by one
//! level. The tree re-derives its root pointer after every insertion by
//! walking parent links, so root promotion stays a tree-level concern
//! and never leaks into node logic.
//!
//! # Storage model
//! All nodes live in a `Vec` arena owned by the tree. Parent and child
//! links are [`NodeId`] slots into that arena, which gives each node a
//! back-reference to its parent without an ownership cycle.
//!
//! # Persistence
//! [`BTree::dump`] emits one JSON record per node, recursively:
//!
//! ```text
//! {
//!   "indexs":   [ { "index": <key>, "data": <payload> }, ... ],
//!   "children": [ <same shape, recursively>, ... ],
//!   "maxsize":  <capacity>
//! }
//! ```
//!
//! `"indexs"` (sic) is the literal wire key of the existing file format
//! and is kept for compatibility. [`BTree::load`] rebuilds the arena and
//! restores every parent link, so a reloaded tree accepts further
//! inserts and splits exactly like a never-serialized one.

mod node;

use std::fmt::Debug;
use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::common::config::{is_valid_capacity, DEFAULT_CAPACITY};
use crate::common::NodeId;
use crate::error::{Error, Result};

pub use node::Entry;
use node::Node;

/// Wire field holding a node's entries. Misspelled in the original file
/// format; kept byte-for-byte for compatibility.
pub(crate) const FIELD_ENTRIES: &str = "indexs";
/// Wire field holding a node's child records.
pub(crate) const FIELD_CHILDREN: &str = "children";
/// Wire field holding the bucket capacity.
pub(crate) const FIELD_CAPACITY: &str = "maxsize";
/// Wire field holding an entry's key.
pub(crate) const FIELD_KEY: &str = "index";
/// Wire field holding an entry's payload.
pub(crate) const FIELD_DATA: &str = "data";

/// An in-memory B-tree index mapping ordered keys to serializable
/// payloads.
///
/// Supports insertion, point lookup, entry counting, and full
/// structural serialization to a self-describing JSON document. There
/// is no deletion and no range scan.
///
/// # Examples
/// ```
/// use bindex::BTree;
///
/// let mut tree: BTree<u32, String> = BTree::new();
/// tree.insert(39, "thirty-nine".to_string()).unwrap();
/// tree.insert(22, "twenty-two".to_string()).unwrap();
///
/// assert_eq!(tree.find(&39).unwrap(), "thirty-nine");
/// assert!(tree.find(&1).is_err());
/// assert_eq!(tree.count(), 2);
/// ```
#[derive(Debug)]
pub struct BTree<K, V> {
    /// Slot storage for every node in the tree.
    arena: Vec<Node<K, V>>,
    /// The current parentless node. Updated after every insertion.
    root: NodeId,
    /// Maximum bucket length before a split triggers; odd, > 2,
    /// uniform across the tree.
    capacity: usize,
}

impl<K: Ord + Debug, V> BTree<K, V> {
    /// Create an empty tree with the default capacity
    /// ([`DEFAULT_CAPACITY`], 5).
    pub fn new() -> Self {
        Self {
            arena: vec![Node::leaf(None)],
            root: NodeId::new(0),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create an empty tree with the given bucket capacity.
    ///
    /// # Errors
    /// Returns `Error::InvalidCapacity` unless `capacity` is odd and
    /// greater than 2.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if !is_valid_capacity(capacity) {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self {
            arena: vec![Node::leaf(None)],
            root: NodeId::new(0),
            capacity,
        })
    }

    /// The tree-wide bucket capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert a (key, payload) pair.
    ///
    /// Descends to the leaf the key belongs in and adds the entry there,
    /// splitting on the way back up as buckets fill. Afterwards the root
    /// pointer is re-derived by walking parent links from the last-known
    /// root; this runs even when nothing split, because a promotion
    /// anywhere on the path leaves the old pointer stale.
    ///
    /// # Errors
    /// Returns `Error::DuplicateKey` if the key is already present
    /// anywhere on the search path (leaf or internal node); the tree is
    /// left unchanged.
    pub fn insert(&mut self, key: K, payload: V) -> Result<()> {
        let mut current = self.root;
        loop {
            let node = &self.arena[current.index()];
            if node.contains(&key) {
                return Err(Error::DuplicateKey(format!("{:?}", key)));
            }
            if node.is_leaf() {
                break;
            }
            current = node.child_for(&key)?;
        }
        self.add_to_leaf(current, Entry::new(key, payload))?;

        // Cheap no-op walk when no split occurred.
        while let Some(parent) = self.arena[self.root.index()].parent {
            self.root = parent;
        }
        Ok(())
    }

    /// Look up the payload stored under `key`.
    ///
    /// Descends from the root, stopping early when an internal node
    /// holds the key itself. The search path is uniquely determined by
    /// key ordering, so a miss on the terminal node is conclusive.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if no entry with this key exists.
    pub fn find(&self, key: &K) -> Result<&V> {
        let mut current = self.root;
        let node = loop {
            let node = &self.arena[current.index()];
            if node.is_leaf() || node.contains(key) {
                break node;
            }
            current = node.child_for(key)?;
        };
        match node.search(key) {
            Ok(pos) => Ok(&node.entries[pos].payload),
            Err(_) => Err(Error::NotFound),
        }
    }

    /// Total number of entries stored across the entire tree.
    ///
    /// Full traversal summing bucket lengths; visit order is immaterial.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut unvisited = vec![self.root];
        while let Some(id) = unvisited.pop() {
            let node = &self.arena[id.index()];
            total += node.entries.len();
            unvisited.extend_from_slice(&node.children);
        }
        total
    }

    /// Number of levels from the root down to the leaves.
    ///
    /// An empty tree has depth 1 (a lone root leaf). Leafness is uniform
    /// per level, so the leftmost spine measures every path.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.root;
        while let Some(&child) = self.arena[current.index()].children.first() {
            depth += 1;
            current = child;
        }
        depth
    }

    /// Add an entry to a leaf bucket, splitting if it fills.
    ///
    /// # Errors
    /// `Error::InvalidOperation` if `id` is not a leaf,
    /// `Error::DuplicateKey` if the key is already in this bucket.
    fn add_to_leaf(&mut self, id: NodeId, entry: Entry<K, V>) -> Result<()> {
        let node = &mut self.arena[id.index()];
        if !node.is_leaf() {
            return Err(Error::InvalidOperation("add on a non-leaf node"));
        }
        let pos = match node.search(&entry.key) {
            Ok(_) => return Err(Error::DuplicateKey(format!("{:?}", entry.key))),
            Err(pos) => pos,
        };
        node.entries.insert(pos, entry);
        let full = node.entries.len() == self.capacity;
        if full {
            self.split(id);
        }
        Ok(())
    }

    /// Split a full node around its median entry.
    ///
    /// The node keeps the left half, a freshly allocated sibling takes
    /// the right half (reparenting any moved children), and the median
    /// is promoted: into the parent when there is one, otherwise into a
    /// brand-new root adopting both halves. The tree's root pointer is
    /// fixed up by `insert`, never here.
    fn split(&mut self, id: NodeId) {
        let cursor = self.capacity / 2;
        let right_id = NodeId::new(self.arena.len() as u32);

        let node = &mut self.arena[id.index()];
        debug_assert_eq!(node.entries.len(), self.capacity);

        let right_entries = node.entries.split_off(cursor + 1);
        let center = match node.entries.pop() {
            Some(entry) => entry,
            // Capacity is odd and > 2, so a full bucket has a median.
            None => unreachable!("split called on an underfull node"),
        };
        let right_children = if node.is_leaf() {
            Vec::new()
        } else {
            node.children.split_off(cursor + 1)
        };
        let parent = node.parent;

        self.arena.push(Node {
            entries: right_entries,
            children: right_children,
            parent,
        });
        let moved = self.arena[right_id.index()].children.clone();
        for child in moved {
            self.arena[child.index()].parent = Some(right_id);
        }
        debug!(node = %id, sibling = %right_id, "split full node");

        match parent {
            Some(parent_id) => self.split_and_promote(parent_id, center, right_id),
            None => {
                let new_root = NodeId::new(self.arena.len() as u32);
                self.arena.push(Node {
                    entries: vec![center],
                    children: vec![id, right_id],
                    parent: None,
                });
                self.arena[id.index()].parent = Some(new_root);
                self.arena[right_id.index()].parent = Some(new_root);
                debug!(root = %new_root, "promoted new root");
            }
        }
    }

    /// Receive a promoted median plus its right sibling into an internal
    /// node, re-splitting if this bucket fills in turn. Only `split`
    /// calls this; a single leaf split can cascade through several
    /// ancestor levels this way.
    fn split_and_promote(&mut self, id: NodeId, entry: Entry<K, V>, right_child: NodeId) {
        let node = &mut self.arena[id.index()];
        // Keys are unique tree-wide, so the search can only miss.
        let pos = match node.search(&entry.key) {
            Ok(pos) | Err(pos) => pos,
        };
        node.entries.insert(pos, entry);
        node.children.insert(pos + 1, right_child);
        let full = node.entries.len() == self.capacity;
        self.arena[right_child.index()].parent = Some(id);
        if full {
            self.split(id);
        }
    }
}

impl<K: Ord + Debug, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BTree<K, V>
where
    K: Ord + Debug + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Serialize the whole tree to its recursive JSON document form.
    ///
    /// Parent links are not part of the serialized form; [`BTree::load`]
    /// reconstructs them.
    ///
    /// # Errors
    /// Returns `Error::Codec` if a key or payload fails to serialize.
    pub fn dump(&self) -> Result<Value> {
        self.dump_node(self.root)
    }

    /// Rebuild a tree from a document produced by [`BTree::dump`].
    ///
    /// Each loaded child's parent link is restored while loading, so the
    /// returned tree supports further insertion (splits need working
    /// parent links), not just lookups.
    ///
    /// # Errors
    /// - `Error::MalformedDocument` for missing fields, an inconsistent
    ///   `children`/`indexs` length relationship, out-of-order entries,
    ///   or a capacity mismatch between records.
    /// - `Error::InvalidCapacity` if the recorded capacity is illegal.
    /// - `Error::Codec` if a key or payload fails to deserialize.
    pub fn load(doc: &Value) -> Result<Self> {
        let record = as_record(doc)?;
        let capacity = read_capacity(record)?;
        if !is_valid_capacity(capacity) {
            return Err(Error::InvalidCapacity(capacity));
        }

        let mut tree = Self {
            arena: Vec::new(),
            root: NodeId::new(0),
            capacity,
        };
        tree.root = tree.load_node(doc, None)?;
        debug!(
            nodes = tree.arena.len(),
            entries = tree.count(),
            "loaded index document"
        );
        Ok(tree)
    }

    /// Write the dumped document as pretty-printed JSON.
    ///
    /// # Errors
    /// `Error::Codec` on serialization failure, `Error::Io` on write
    /// failure.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let doc = self.dump()?;
        serde_json::to_writer_pretty(writer, &doc)?;
        Ok(())
    }

    /// Read a JSON document and load a tree from it.
    ///
    /// # Errors
    /// Everything [`BTree::load`] raises, plus `Error::Codec` for
    /// invalid JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Value = serde_json::from_reader(reader)?;
        Self::load(&doc)
    }

    fn dump_node(&self, id: NodeId) -> Result<Value> {
        let node = &self.arena[id.index()];

        let mut entries = Vec::with_capacity(node.entries.len());
        for entry in &node.entries {
            entries.push(entry.to_doc()?);
        }
        let mut children = Vec::with_capacity(node.children.len());
        for &child in &node.children {
            children.push(self.dump_node(child)?);
        }

        let mut record = Map::new();
        record.insert(FIELD_ENTRIES.to_string(), Value::Array(entries));
        record.insert(FIELD_CHILDREN.to_string(), Value::Array(children));
        record.insert(FIELD_CAPACITY.to_string(), Value::from(self.capacity));
        Ok(Value::Object(record))
    }

    /// Load one node record, then its children, attaching each child to
    /// this node's arena slot so parent links come back intact.
    fn load_node(&mut self, doc: &Value, parent: Option<NodeId>) -> Result<NodeId> {
        let record = as_record(doc)?;

        let capacity = read_capacity(record)?;
        if capacity != self.capacity {
            return Err(Error::MalformedDocument(format!(
                "capacity mismatch: node records {}, tree records {}",
                capacity, self.capacity
            )));
        }

        let entry_docs = field(record, FIELD_ENTRIES)?
            .as_array()
            .ok_or_else(|| malformed_field(FIELD_ENTRIES, "an array"))?;
        let mut entries = Vec::with_capacity(entry_docs.len());
        for entry_doc in entry_docs {
            entries.push(Entry::from_doc(entry_doc)?);
        }
        if entries.len() >= self.capacity {
            return Err(Error::MalformedDocument(format!(
                "bucket holds {} entries, at most {} fit a stable node",
                entries.len(),
                self.capacity - 1
            )));
        }
        for pair in entries.windows(2) {
            if pair[0].key >= pair[1].key {
                return Err(Error::MalformedDocument(
                    "bucket entries are not strictly increasing by key".to_string(),
                ));
            }
        }

        let child_docs: &[Value] = match record.get(FIELD_CHILDREN) {
            // Leaves may omit the field entirely.
            None => &[],
            Some(docs) => docs
                .as_array()
                .ok_or_else(|| malformed_field(FIELD_CHILDREN, "an array"))?,
        };
        if !child_docs.is_empty() && child_docs.len() != entries.len() + 1 {
            return Err(Error::MalformedDocument(format!(
                "{} entries require 0 or {} children, found {}",
                entries.len(),
                entries.len() + 1,
                child_docs.len()
            )));
        }

        let id = NodeId::new(self.arena.len() as u32);
        self.arena.push(Node {
            entries,
            children: Vec::with_capacity(child_docs.len()),
            parent,
        });
        for child_doc in child_docs {
            let child = self.load_node(child_doc, Some(id))?;
            self.arena[id.index()].children.push(child);
        }
        Ok(id)
    }
}

fn as_record(doc: &Value) -> Result<&Map<String, Value>> {
    doc.as_object()
        .ok_or_else(|| Error::MalformedDocument("node record is not an object".to_string()))
}

fn field<'a>(record: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    record
        .get(name)
        .ok_or_else(|| Error::MalformedDocument(format!("node record missing {:?}", name)))
}

fn malformed_field(name: &str, expected: &str) -> Error {
    Error::MalformedDocument(format!("{:?} is not {}", name, expected))
}

fn read_capacity(record: &Map<String, Value>) -> Result<usize> {
    field(record, FIELD_CAPACITY)?
        .as_u64()
        .map(|capacity| capacity as usize)
        .ok_or_else(|| malformed_field(FIELD_CAPACITY, "an integer"))
}
