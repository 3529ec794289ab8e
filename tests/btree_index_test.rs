//! B-tree Index Tests
//!
//! End-to-end tests driving the index purely through its public
//! surface: insert, find, count, depth, dump, load.

use bindex::{BTree, Error};

/// The key sequence the movie index project has always smoke-tested
/// with: enough inserts at capacity 5 to split leaves and grow the
/// root twice.
const KEYS: [u32; 22] = [
    39, 22, 97, 41, 53, 13, 21, 40, 30, 27, 33, 36, 35, 34, 24, 29, 26, 17, 28, 23, 31, 32,
];

fn build(keys: &[u32]) -> BTree<u32, String> {
    let mut tree = BTree::new();
    for &key in keys {
        tree.insert(key, format!("payload-{}", key)).unwrap();
    }
    tree
}

// ============================================================================
// Insert + find
// ============================================================================

#[test]
fn test_every_inserted_key_is_findable() {
    let tree = build(&KEYS);

    assert_eq!(tree.count(), KEYS.len());
    for &key in &KEYS {
        assert_eq!(tree.find(&key).unwrap(), &format!("payload-{}", key));
    }
}

#[test]
fn test_missing_keys_are_not_found() {
    let tree = build(&KEYS);

    for missing in [0u32, 1, 14, 98, 1000] {
        assert!(matches!(tree.find(&missing), Err(Error::NotFound)));
    }
}

#[test]
fn test_duplicate_insert_leaves_tree_unchanged() {
    let mut tree = build(&KEYS);
    let before = tree.dump().unwrap();

    for &key in &KEYS {
        let err = tree.insert(key, "shadow".to_string()).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
    }
    assert_eq!(tree.count(), KEYS.len());
    assert_eq!(tree.dump().unwrap(), before);
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_root_grows_upward_as_keys_accumulate() {
    let mut tree: BTree<u32, u32> = BTree::new();
    assert_eq!(tree.depth(), 1);

    // The 5th insert fills the root leaf at capacity 5.
    for key in [39, 22, 97, 41, 53] {
        tree.insert(key, key).unwrap();
    }
    assert_eq!(tree.depth(), 2);

    for &key in KEYS.iter().filter(|&&k| ![39, 22, 97, 41, 53].contains(&k)) {
        tree.insert(key, key).unwrap();
    }
    assert!(tree.depth() >= 3);
    assert_eq!(tree.count(), KEYS.len());
}

#[test]
fn test_descending_and_interleaved_insert_orders() {
    let mut descending: BTree<u32, u32> = BTree::new();
    for key in (0..60).rev() {
        descending.insert(key, key).unwrap();
    }
    let mut interleaved: BTree<u32, u32> = BTree::new();
    for n in 0..60 {
        let key = if n % 2 == 0 { n / 2 } else { 59 - n / 2 };
        interleaved.insert(key, key).unwrap();
    }

    for tree in [&descending, &interleaved] {
        assert_eq!(tree.count(), 60);
        for key in 0..60 {
            assert_eq!(*tree.find(&key).unwrap(), key);
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_document_round_trip_via_json_text() {
    let tree = build(&KEYS);

    // Through actual JSON text, not just Value equality.
    let text = serde_json::to_string_pretty(&tree.dump().unwrap()).unwrap();
    assert!(text.contains("\"indexs\""));
    assert!(text.contains("\"maxsize\": 5"));

    let reloaded: BTree<u32, String> =
        BTree::load(&serde_json::from_str(&text).unwrap()).unwrap();
    assert_eq!(reloaded.capacity(), tree.capacity());
    assert_eq!(reloaded.count(), tree.count());
    for &key in &KEYS {
        assert_eq!(reloaded.find(&key).unwrap(), &format!("payload-{}", key));
    }
}

#[test]
fn test_reloaded_tree_accepts_further_inserts() {
    // Serialize mid-build, reload, finish building on the reloaded
    // tree; it must end up identical to one that never left memory.
    let (first, rest) = KEYS.split_at(10);

    let mut reloaded: BTree<u32, String> =
        BTree::load(&build(first).dump().unwrap()).unwrap();
    for &key in rest {
        reloaded.insert(key, format!("payload-{}", key)).unwrap();
    }

    let fresh = build(&KEYS);
    assert_eq!(reloaded.count(), fresh.count());
    assert_eq!(reloaded.depth(), fresh.depth());
    assert_eq!(reloaded.dump().unwrap(), fresh.dump().unwrap());
}

#[test]
fn test_empty_tree_round_trip() {
    let tree: BTree<u32, String> = BTree::new();
    let reloaded: BTree<u32, String> = BTree::load(&tree.dump().unwrap()).unwrap();

    assert_eq!(reloaded.count(), 0);
    assert_eq!(reloaded.capacity(), 5);
    assert!(matches!(reloaded.find(&39), Err(Error::NotFound)));
}

#[test]
fn test_load_rejects_garbage_documents() {
    for doc in [
        serde_json::json!(null),
        serde_json::json!([1, 2, 3]),
        serde_json::json!({ "maxsize": 5 }),
        serde_json::json!({ "indexs": "not-an-array", "children": [], "maxsize": 5 }),
    ] {
        assert!(
            BTree::<u32, String>::load(&doc).is_err(),
            "document should be rejected: {}",
            doc
        );
    }
}
