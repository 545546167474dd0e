//! Contract tests for ordered store implementations.
//!
//! These tests validate the `OrderedStore` contract and can be run against
//! any backend through the harness.

use lexkv::{OrderedStore, StoreResult};

/// A test harness for store implementations.
///
/// Implementors provide fresh stores; a harness owns whatever scratch
/// state (temp directories, counters) its backend needs.
pub trait TestHarness {
    /// The store type being tested.
    type Store: OrderedStore;

    /// Create a fresh, empty store.
    fn create_store(&mut self) -> StoreResult<Self::Store>;
}

/// Run the standard contract suite against a store implementation.
///
/// # Example
///
/// ```ignore
/// struct MemoryHarness;
///
/// impl TestHarness for MemoryHarness {
///     type Store = MemoryStore;
///
///     fn create_store(&mut self) -> StoreResult<Self::Store> {
///         Ok(MemoryStore::new())
///     }
/// }
///
/// #[test]
/// fn test_memory_contract() {
///     run_contract_suite(&mut MemoryHarness);
/// }
/// ```
pub fn run_contract_suite<H: TestHarness>(harness: &mut H) {
    test_upsert_idempotence(harness);
    test_delete_idempotence(harness);
    test_contains(harness);
    test_ordering_invariant(harness);
    test_range_bounds(harness);
    test_prefix_derivation(harness);
    test_prefix_items(harness);
    test_batch_operations(harness);
    test_empty_store_scans(harness);
    test_binary_safety(harness);
}

fn collect_keys<S: OrderedStore>(
    store: &S,
    key_from: Option<&[u8]>,
    key_to: Option<&[u8]>,
) -> Vec<Vec<u8>> {
    store
        .keys(key_from, key_to)
        .expect("failed to start key scan")
        .collect::<StoreResult<Vec<_>>>()
        .expect("key scan failed")
}

fn collect_items<S: OrderedStore>(
    store: &S,
    key_from: Option<&[u8]>,
    key_to: Option<&[u8]>,
) -> Vec<(Vec<u8>, Vec<u8>)> {
    store
        .items(key_from, key_to)
        .expect("failed to start item scan")
        .collect::<StoreResult<Vec<_>>>()
        .expect("item scan failed")
}

fn test_upsert_idempotence<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    kv.put(b"k", b"v1").expect("failed to put");
    kv.put(b"k", b"v2").expect("failed to put");

    assert_eq!(kv.get(b"k").expect("failed to get"), Some(b"v2".to_vec()));
    // Exactly one entry for the key
    assert_eq!(collect_keys(&kv, None, None), vec![b"k".to_vec()]);
}

fn test_delete_idempotence<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    // Deleting an absent key is a no-op, not an error
    kv.delete(b"missing").expect("delete of absent key failed");
    assert!(collect_keys(&kv, None, None).is_empty());

    kv.put(b"k", b"v").expect("failed to put");
    kv.delete(b"k").expect("failed to delete");
    assert_eq!(kv.get(b"k").expect("failed to get"), None);

    kv.delete(b"k").expect("second delete failed");
}

fn test_contains<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    assert!(!kv.contains(b"k").expect("failed to check"));
    kv.put(b"k", b"v").expect("failed to put");
    assert!(kv.contains(b"k").expect("failed to check"));
}

fn test_ordering_invariant<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    // Inserted out of order; shorter prefixes sort before extensions
    for key in [&b"b"[..], b"ab", b"a", b"ba", b"aa"] {
        kv.put(key, b"x").expect("failed to put");
    }

    let scanned = collect_keys(&kv, None, None);
    assert_eq!(
        scanned,
        vec![
            b"a".to_vec(),
            b"aa".to_vec(),
            b"ab".to_vec(),
            b"b".to_vec(),
            b"ba".to_vec(),
        ]
    );

    // Strictly ascending, no duplicates
    for pair in scanned.windows(2) {
        assert!(pair[0] < pair[1]);
    }

    let pairs = collect_items(&kv, None, None);
    let item_keys: Vec<Vec<u8>> = pairs.into_iter().map(|(key, _)| key).collect();
    assert_eq!(item_keys, scanned);
}

fn test_range_bounds<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    for key in [&b"a"[..], b"ab", b"b", b"c"] {
        kv.put(key, b"x").expect("failed to put");
    }

    // Bounds are inclusive on both sides
    assert_eq!(
        collect_keys(&kv, Some(b"ab"), Some(b"b")),
        vec![b"ab".to_vec(), b"b".to_vec()]
    );
    assert_eq!(
        collect_keys(&kv, Some(b"ab"), None),
        vec![b"ab".to_vec(), b"b".to_vec(), b"c".to_vec()]
    );
    assert_eq!(
        collect_keys(&kv, None, Some(b"a")),
        vec![b"a".to_vec()]
    );

    // Bounds need not be present keys
    assert_eq!(
        collect_keys(&kv, Some(b"aa"), Some(b"bz")),
        vec![b"ab".to_vec(), b"b".to_vec()]
    );

    // Range outside all keys
    assert!(collect_keys(&kv, Some(b"d"), None).is_empty());

    let pairs = collect_items(&kv, Some(b"ab"), Some(b"b"));
    assert_eq!(
        pairs,
        vec![
            (b"ab".to_vec(), b"x".to_vec()),
            (b"b".to_vec(), b"x".to_vec()),
        ]
    );
}

fn test_prefix_derivation<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    kv.put(b"a", b"1").expect("failed to put");
    kv.put(b"ab", b"2").expect("failed to put");
    kv.put(b"b", b"3").expect("failed to put");

    assert_eq!(collect_keys(&kv, None, None), vec![b"a".to_vec(), b"ab".to_vec(), b"b".to_vec()]);

    let prefixed: Vec<Vec<u8>> = kv
        .prefix_keys(b"a", false)
        .expect("failed to start prefix scan")
        .collect::<StoreResult<Vec<_>>>()
        .expect("prefix scan failed");
    assert_eq!(prefixed, vec![b"a".to_vec(), b"ab".to_vec()]);

    // Stripping "a" from "a" leaves "", from "ab" leaves "b"
    let stripped: Vec<Vec<u8>> = kv
        .prefix_keys(b"a", true)
        .expect("failed to start prefix scan")
        .collect::<StoreResult<Vec<_>>>()
        .expect("prefix scan failed");
    assert_eq!(stripped, vec![b"".to_vec(), b"b".to_vec()]);

    assert_eq!(collect_keys(&kv, Some(b"ab"), None), vec![b"ab".to_vec(), b"b".to_vec()]);
    assert_eq!(collect_keys(&kv, None, Some(b"a")), vec![b"a".to_vec()]);

    // A prefix matching nothing yields nothing
    let empty: Vec<Vec<u8>> = kv
        .prefix_keys(b"c", false)
        .expect("failed to start prefix scan")
        .collect::<StoreResult<Vec<_>>>()
        .expect("prefix scan failed");
    assert!(empty.is_empty());
}

fn test_prefix_items<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    kv.put(b"user:1", b"Alice").expect("failed to put");
    kv.put(b"user:2", b"Bob").expect("failed to put");
    kv.put(b"zother", b"x").expect("failed to put");

    let pairs: Vec<(Vec<u8>, Vec<u8>)> = kv
        .prefix_items(b"user:", true)
        .expect("failed to start prefix scan")
        .collect::<StoreResult<Vec<_>>>()
        .expect("prefix scan failed");
    assert_eq!(
        pairs,
        vec![
            (b"1".to_vec(), b"Alice".to_vec()),
            (b"2".to_vec(), b"Bob".to_vec()),
        ]
    );
}

fn test_batch_operations<H: TestHarness>(harness: &mut H) {
    let mut batched = harness.create_store().expect("failed to create store");
    let mut singular = harness.create_store().expect("failed to create store");

    // Duplicate key in sequence: last write wins
    let pairs: Vec<(Vec<u8>, Vec<u8>)> = vec![
        (b"a".to_vec(), b"1".to_vec()),
        (b"b".to_vec(), b"2".to_vec()),
        (b"a".to_vec(), b"3".to_vec()),
        (b"c".to_vec(), b"4".to_vec()),
    ];

    batched.put_many(pairs.clone()).expect("failed to put batch");
    for (key, value) in &pairs {
        singular.put(key, value).expect("failed to put");
    }

    assert_eq!(collect_items(&batched, None, None), collect_items(&singular, None, None));
    assert_eq!(batched.get(b"a").expect("failed to get"), Some(b"3".to_vec()));

    batched
        .delete_many(vec![b"a".to_vec(), b"c".to_vec(), b"missing".to_vec()])
        .expect("failed to delete batch");
    assert_eq!(collect_keys(&batched, None, None), vec![b"b".to_vec()]);
}

fn test_empty_store_scans<H: TestHarness>(harness: &mut H) {
    let kv = harness.create_store().expect("failed to create store");

    assert!(collect_keys(&kv, None, None).is_empty());
    assert!(collect_items(&kv, Some(b"a"), Some(b"z")).is_empty());

    let prefixed: Vec<Vec<u8>> = kv
        .prefix_keys(b"p", false)
        .expect("failed to start prefix scan")
        .collect::<StoreResult<Vec<_>>>()
        .expect("prefix scan failed");
    assert!(prefixed.is_empty());
}

fn test_binary_safety<H: TestHarness>(harness: &mut H) {
    let mut kv = harness.create_store().expect("failed to create store");

    // Keys and values with NUL bytes, high bytes, and invalid UTF-8
    let key = [0x00, 0xFF, 0x80, 0x00, 0x01];
    let value = [0xFE, 0x00, 0xC3, 0x28];

    kv.put(&key, &value).expect("failed to put binary pair");
    assert_eq!(kv.get(&key).expect("failed to get"), Some(value.to_vec()));

    kv.put(b"", b"empty key").expect("failed to put empty key");
    assert_eq!(kv.get(b"").expect("failed to get"), Some(b"empty key".to_vec()));

    // The empty key sorts first
    let scanned = collect_keys(&kv, None, None);
    assert_eq!(scanned, vec![b"".to_vec(), key.to_vec()]);
}
