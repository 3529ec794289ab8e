//! B-tree node: a sorted bucket of entries plus child links.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{FIELD_DATA, FIELD_KEY};
use crate::common::NodeId;
use crate::error::{Error, Result};

/// A single (key, payload) pair stored in a node bucket.
///
/// Entries are ordered and deduplicated by `key` alone; the payload is
/// opaque data carried alongside and only touched when the tree is
/// serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<K, V> {
    pub key: K,
    pub payload: V,
}

impl<K, V> Entry<K, V> {
    /// Create a new entry.
    #[inline]
    pub fn new(key: K, payload: V) -> Self {
        Entry { key, payload }
    }
}

impl<K: Serialize, V: Serialize> Entry<K, V> {
    /// Serialize to the `{ "index": <key>, "data": <payload> }` wire record.
    pub(crate) fn to_doc(&self) -> Result<Value> {
        let mut record = Map::new();
        record.insert(FIELD_KEY.to_string(), serde_json::to_value(&self.key)?);
        record.insert(FIELD_DATA.to_string(), serde_json::to_value(&self.payload)?);
        Ok(Value::Object(record))
    }
}

impl<K: DeserializeOwned, V: DeserializeOwned> Entry<K, V> {
    /// Rebuild an entry from its wire record.
    ///
    /// A missing or null `data` field is malformed: stored entries always
    /// carry a payload (key-only entries exist only as transient search
    /// probes and are never persisted).
    pub(crate) fn from_doc(doc: &Value) -> Result<Self> {
        let record = doc
            .as_object()
            .ok_or_else(|| Error::MalformedDocument("entry record is not an object".to_string()))?;
        let key = record
            .get(FIELD_KEY)
            .ok_or_else(|| Error::MalformedDocument(format!("entry record missing {:?}", FIELD_KEY)))?;
        let data = record
            .get(FIELD_DATA)
            .filter(|doc| !doc.is_null())
            .ok_or_else(|| Error::MalformedDocument(format!("entry record missing {:?}", FIELD_DATA)))?;
        Ok(Entry {
            key: serde_json::from_value(key.clone())?,
            payload: serde_json::from_value(data.clone())?,
        })
    }
}

/// A bucket of sorted entries plus, for internal nodes, one more child
/// than entries.
///
/// Nodes live in the owning tree's arena; `children` and `parent` are
/// arena slots, never owning pointers, so the parent back-reference does
/// not form an ownership cycle (see [`NodeId`]).
///
/// # Invariants
/// - `entries` is strictly increasing by key.
/// - `children` is empty (leaf) or holds exactly `entries.len() + 1` ids.
/// - All keys under `children[i]` sort below `entries[i].key`, all keys
///   under `children[i + 1]` above it.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) entries: Vec<Entry<K, V>>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<K: Ord, V> Node<K, V> {
    /// A fresh empty leaf.
    pub(crate) fn leaf(parent: Option<NodeId>) -> Self {
        Node {
            entries: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// A node is a leaf iff it has no children.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Binary search for `key` in this node's bucket.
    ///
    /// `Ok(pos)` is an exact hit; `Err(pos)` is the insertion/descent slot.
    pub(crate) fn search(&self, key: &K) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by(|entry| entry.key.cmp(key))
    }

    /// Whether an entry with this exact key exists in this node only
    /// (not the subtree).
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// The child to descend into when looking for `key`: the slot `i`
    /// such that `entries[i - 1].key < key < entries[i].key`.
    ///
    /// Valid only on internal nodes.
    pub(crate) fn child_for(&self, key: &K) -> Result<NodeId> {
        if self.is_leaf() {
            return Err(Error::InvalidOperation("child lookup on a leaf node"));
        }
        let slot = match self.search(key) {
            Ok(pos) => pos + 1,
            Err(pos) => pos,
        };
        Ok(self.children[slot])
    }
}
