//! Contract checks shared by every backend's test suite
//!
//! Each function panics (via `assert!`) when the store under test breaks the
//! [`ListStore`] contract. Backends run [`run_all`] from their own tests, so
//! a new backend gets the same coverage by adding one call.
//!
//! List ids are freshly generated per check, so a persistent database can be
//! reused across runs.

use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::{generate_list_id, ListSnapshot, ListStore, StoreError};

/// Run every check against `store`
pub async fn run_all(store: Arc<dyn ListStore>) {
    not_found_is_not_empty(store.as_ref()).await;
    round_trip_preserves_items(store.as_ref()).await;
    chore_scenario(store.as_ref()).await;
    versions_advance_by_one(store.as_ref()).await;
    conflict_leaves_state_unchanged(store.as_ref()).await;
    absent_list_requires_version_zero(store.as_ref()).await;
    lists_are_independent(store.as_ref()).await;
    concurrent_writers_single_winner(Arc::clone(&store), 8).await;
    concurrent_creators_on_fresh_id(store, 8).await;
}

/// A never-written id is `NotFound`; a list written empty is not
pub async fn not_found_is_not_empty(store: &dyn ListStore) {
    let list_id = generate_list_id();

    let err = store.get(&list_id).await.unwrap_err();
    assert!(
        matches!(&err, StoreError::NotFound { list_id: id } if *id == list_id),
        "expected NotFound, got {:?}",
        err
    );

    let created = store.put(&list_id, vec![], 0).await.unwrap();
    assert_eq!(created, ListSnapshot::new(vec![], 0));
    assert_eq!(store.get(&list_id).await.unwrap(), ListSnapshot::new(vec![], 0));
}

/// `put` then `get` returns the exact items written
pub async fn round_trip_preserves_items(store: &dyn ListStore) {
    let list_id = generate_list_id();
    let items = vec![
        json!({"name": "dishes", "delay": 1, "lastDone": "2024-03-01T10:00:00Z"}),
        json!({"name": "laundry", "delay": 7, "assignee": null}),
        json!("plain string"),
        json!([1, 2, 3]),
        json!(42.5),
    ];

    let created = store.put(&list_id, items.clone(), 0).await.unwrap();
    assert_eq!(created, ListSnapshot::new(items.clone(), 0));
    assert_eq!(store.get(&list_id).await.unwrap(), created);

    let reordered: Vec<_> = items.iter().rev().cloned().collect();
    let updated = store.put(&list_id, reordered.clone(), 0).await.unwrap();
    assert_eq!(updated, ListSnapshot::new(reordered.clone(), 1));
    assert_eq!(store.get(&list_id).await.unwrap().items, reordered);
}

/// Create, update, stale update, read back
pub async fn chore_scenario(store: &dyn ListStore) {
    let list_id = generate_list_id();

    assert_eq!(store.put(&list_id, vec![], 0).await.unwrap().version, 0);
    assert_eq!(store.get(&list_id).await.unwrap(), ListSnapshot::new(vec![], 0));

    let dishes = vec![json!({"name": "dishes"})];
    assert_eq!(store.put(&list_id, dishes.clone(), 0).await.unwrap().version, 1);

    let err = store
        .put(&list_id, vec![json!({"name": "laundry"})], 0)
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "expected VersionConflict, got {:?}", err);

    assert_eq!(store.get(&list_id).await.unwrap(), ListSnapshot::new(dishes, 1));
}

/// Successive successful writes return 0, 1, 2, ...
pub async fn versions_advance_by_one(store: &dyn ListStore) {
    let list_id = generate_list_id();

    let mut version = store.put(&list_id, vec![json!(0)], 0).await.unwrap().version;
    assert_eq!(version, 0);

    for n in 1..=10u64 {
        let snapshot = store.put(&list_id, vec![json!(n)], version).await.unwrap();
        assert_eq!(snapshot.version, version + 1);
        version = snapshot.version;
    }

    assert_eq!(store.get(&list_id).await.unwrap(), ListSnapshot::new(vec![json!(10)], 10));
}

/// A stale write, or one ahead of the stored version, changes nothing
pub async fn conflict_leaves_state_unchanged(store: &dyn ListStore) {
    let list_id = generate_list_id();
    store.put(&list_id, vec![json!("a")], 0).await.unwrap();
    store.put(&list_id, vec![json!("b")], 0).await.unwrap();
    let current = store.put(&list_id, vec![json!("c")], 1).await.unwrap();
    assert_eq!(current.version, 2);

    for expected in [0, 1, 3, 100] {
        let err = store.put(&list_id, vec![json!("lost")], expected).await.unwrap_err();
        assert!(
            matches!(err, StoreError::VersionConflict { expected: e, .. } if e == expected),
            "expected VersionConflict for version {}, got {:?}",
            expected,
            err
        );
    }

    assert_eq!(store.get(&list_id).await.unwrap(), current);
}

/// Only `expected_version == 0` may create a list
pub async fn absent_list_requires_version_zero(store: &dyn ListStore) {
    let list_id = generate_list_id();

    let err = store.put(&list_id, vec![json!("x")], 5).await.unwrap_err();
    assert!(err.is_conflict(), "expected VersionConflict, got {:?}", err);
    assert!(store.get(&list_id).await.unwrap_err().is_not_found());
}

/// Writes to one list do not touch another
pub async fn lists_are_independent(store: &dyn ListStore) {
    let first = generate_list_id();
    let second = generate_list_id();

    store.put(&first, vec![json!("first")], 0).await.unwrap();
    store.put(&first, vec![json!("first again")], 0).await.unwrap();
    store.put(&second, vec![json!("second")], 0).await.unwrap();

    assert_eq!(
        store.get(&first).await.unwrap(),
        ListSnapshot::new(vec![json!("first again")], 1)
    );
    assert_eq!(
        store.get(&second).await.unwrap(),
        ListSnapshot::new(vec![json!("second")], 0)
    );
}

/// `writers` concurrent puts from the same version: exactly one wins
pub async fn concurrent_writers_single_winner(store: Arc<dyn ListStore>, writers: usize) {
    let list_id = generate_list_id();
    store.put(&list_id, vec![json!("seed")], 0).await.unwrap();
    let base = store.put(&list_id, vec![json!("base")], 0).await.unwrap().version;

    let mut tasks = JoinSet::new();
    for writer in 0..writers {
        let store = Arc::clone(&store);
        let list_id = list_id.clone();
        tasks.spawn(async move {
            store
                .put(&list_id, vec![json!({ "writer": writer })], base)
                .await
                .map(|snapshot| (writer, snapshot))
        });
    }

    let mut winners = Vec::new();
    let mut conflicts = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(win) => winners.push(win),
            Err(err) if err.is_conflict() => conflicts += 1,
            Err(err) => panic!("unexpected store error: {:?}", err),
        }
    }

    assert_eq!(winners.len(), 1, "exactly one writer must win");
    assert_eq!(conflicts, writers - 1);

    let (writer, snapshot) = winners.remove(0);
    assert_eq!(snapshot.version, base + 1);
    assert_eq!(
        store.get(&list_id).await.unwrap(),
        ListSnapshot::new(vec![json!({ "writer": writer })], base + 1)
    );
}

/// `creators` concurrent `put(fresh_id, _, 0)` calls
///
/// Writes on one id are linearized, so the first creator stores version 0
/// and whichever creator runs next sees version 0 and advances it to 1.
/// Every other creator is rejected, and the list holds the second winner's
/// items.
pub async fn concurrent_creators_on_fresh_id(store: Arc<dyn ListStore>, creators: usize) {
    assert!(creators >= 2, "needs at least two creators to race");
    let list_id = generate_list_id();

    let mut tasks = JoinSet::new();
    for creator in 0..creators {
        let store = Arc::clone(&store);
        let list_id = list_id.clone();
        tasks.spawn(async move {
            store
                .put(&list_id, vec![json!({ "creator": creator })], 0)
                .await
                .map(|snapshot| (creator, snapshot))
        });
    }

    let mut winners = Vec::new();
    let mut conflicts = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(win) => winners.push(win),
            Err(err) if err.is_conflict() => conflicts += 1,
            Err(err) => panic!("unexpected store error: {:?}", err),
        }
    }

    assert_eq!(winners.len(), 2, "one create and one update from version 0");
    assert_eq!(conflicts, creators - 2);

    winners.sort_by_key(|(_, snapshot)| snapshot.version);
    let versions: Vec<u64> = winners.iter().map(|(_, s)| s.version).collect();
    assert_eq!(versions, vec![0, 1]);

    let last_creator = winners[1].0;
    assert_eq!(
        store.get(&list_id).await.unwrap(),
        ListSnapshot::new(vec![json!({ "creator": last_creator })], 1)
    );
}
