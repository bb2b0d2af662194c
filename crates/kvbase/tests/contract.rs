//! Contract tests: the same scenarios against every backend.
//!
//! Each test runs once per `BackendKind` through `Store`, so a behaviour
//! that holds here holds for callers regardless of the engine they pick.

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use kvbase::{Backend, BackendKind, Config, KvError, Store};

const KINDS: [BackendKind; 2] = [BackendKind::Redb, BackendKind::Sled];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    name: String,
    #[serde(default)]
    tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn person(name: &str) -> Person {
    Person { name: name.to_string(), tags: Vec::new() }
}

fn store_path(kind: BackendKind, dir: &TempDir) -> std::path::PathBuf {
    match kind {
        BackendKind::Redb => dir.path().join("contract.db"),
        BackendKind::Sled => dir.path().join("contract"),
    }
}

fn test_store(kind: BackendKind) -> (Store, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(kind, store_path(kind, &dir), &Config::budget()).unwrap();
    (store, dir)
}

// ---------------------------------------------------------------------------
// Single-record lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_users_scenario() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        store.create("users", "u1", &person("Ann")).unwrap();
        assert_eq!(store.read::<Person>("users", "u1").unwrap(), person("Ann"), "{kind}");

        let err = store.create("users", "u1", &person("Ann")).unwrap_err();
        assert!(err.is_already_exists(), "{kind}: {err}");

        store.delete("users", "u1").unwrap();
        let err = store.read::<Person>("users", "u1").unwrap_err();
        assert!(err.is_not_found(), "{kind}: {err}");
    }
}

#[test]
fn test_round_trip_arbitrary_json_shape() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        let value = serde_json::json!({
            "name": "Ann",
            "nested": { "ok": true, "list": [1, 2, 3] },
            "unicode": "übergrößenträger",
        });
        store.create("docs", "d1", &value).unwrap();
        let back: serde_json::Value = store.read("docs", "d1").unwrap();
        assert_eq!(back, value, "{kind}");
    }
}

#[test]
fn test_never_written_key_is_not_found() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        assert!(store.read::<Person>("users", "ghost").unwrap_err().is_not_found());
        assert!(store.update("users", "ghost", &person("x")).unwrap_err().is_not_found());
        assert!(store.delete("users", "ghost").unwrap_err().is_not_found());
    }
}

#[test]
fn test_update_replaces_value() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        store.create("users", "u1", &person("Ann")).unwrap();
        let mut updated = person("Ann");
        updated.tags.push("admin".into());
        store.update("users", "u1", &updated).unwrap();

        assert_eq!(store.read::<Person>("users", "u1").unwrap(), updated, "{kind}");
        assert_eq!(store.count("users").unwrap(), 1, "{kind}");
    }
}

#[test]
fn test_same_key_in_different_buckets() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        store.create("users", "id", &person("user")).unwrap();
        store.create("groups", "id", &person("group")).unwrap();

        assert_eq!(store.read::<Person>("users", "id").unwrap().name, "user", "{kind}");
        assert_eq!(store.read::<Person>("groups", "id").unwrap().name, "group", "{kind}");

        store.delete("users", "id").unwrap();
        assert_eq!(store.read::<Person>("groups", "id").unwrap().name, "group", "{kind}");
    }
}

#[test]
fn test_underscore_addresses_do_not_collide() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        store.create("a", "b_c", &person("X")).unwrap();
        store.create("a_b", "c", &person("Y")).unwrap();

        assert_eq!(store.read::<Person>("a", "b_c").unwrap().name, "X", "{kind}");
        assert_eq!(store.read::<Person>("a_b", "c").unwrap().name, "Y", "{kind}");
        assert_eq!(store.count("a").unwrap(), 1, "{kind}");
        assert_eq!(store.count("a_b").unwrap(), 1, "{kind}");
    }
}

// ---------------------------------------------------------------------------
// Bucket operations
// ---------------------------------------------------------------------------

#[test]
fn test_count_matches_get() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        assert_eq!(store.count("users").unwrap(), 0, "{kind}");
        assert_eq!(store.get::<Person>("users").unwrap().len(), 0, "{kind}");

        for i in 0..50 {
            store.create("users", &format!("user-{:02}", i), &person(&format!("n{}", i))).unwrap();
        }
        store.delete("users", "user-07").unwrap();

        let all = store.get::<Person>("users").unwrap();
        assert_eq!(store.count("users").unwrap(), all.len(), "{kind}");
        assert_eq!(all.len(), 49, "{kind}");
        assert_eq!(all["user-42"].name, "n42", "{kind}");
        assert!(!all.contains_key("user-07"), "{kind}");
    }
}

#[test]
fn test_drop_then_get_is_empty() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        for i in 0..5 {
            store.create("users", &i.to_string(), &person("n")).unwrap();
        }
        store.create("other", "1", &person("kept")).unwrap();

        store.drop_bucket("users").unwrap();
        assert!(store.get::<Person>("users").unwrap().is_empty(), "{kind}");
        assert_eq!(store.count("users").unwrap(), 0, "{kind}");
        assert_eq!(store.count("other").unwrap(), 1, "{kind}");

        // The bucket can be reused after a drop
        store.create("users", "0", &person("again")).unwrap();
        assert_eq!(store.count("users").unwrap(), 1, "{kind}");
    }
}

#[test]
fn test_drop_missing_bucket_is_noop() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);
        store.drop_bucket("never-created").unwrap();
        store.drop_bucket("never-created").unwrap();
    }
}

// ---------------------------------------------------------------------------
// Validation and errors
// ---------------------------------------------------------------------------

#[test]
fn test_empty_names_rejected() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        let err = store.create("", "k", &person("x")).unwrap_err();
        assert!(matches!(err, KvError::InvalidAddress { component: "bucket", .. }), "{kind}");
        let err = store.create("b", "", &person("x")).unwrap_err();
        assert!(matches!(err, KvError::InvalidAddress { component: "key", .. }), "{kind}");
        assert!(store.count("").is_err(), "{kind}");
    }
}

#[test]
fn test_read_into_wrong_shape_is_serialization_error() {
    for kind in KINDS {
        let (store, _dir) = test_store(kind);

        store.create("numbers", "n", &42u32).unwrap();
        let err = store.read::<Person>("numbers", "n").unwrap_err();
        assert!(matches!(err, KvError::Serialization(_)), "{kind}: {err}");

        let err = store.get::<Person>("numbers").unwrap_err();
        assert!(matches!(err, KvError::Serialization(_)), "{kind}: {err}");
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn test_records_survive_reopen() {
    for kind in KINDS {
        let dir = TempDir::new().unwrap();
        let path = store_path(kind, &dir);
        {
            let store = Store::open(kind, &path, &Config::budget()).unwrap();
            store.create("users", "keep", &person("Ann")).unwrap();
            store.create("users", "doomed", &person("Bob")).unwrap();
            store.delete("users", "doomed").unwrap();
            store.flush().unwrap();
        }
        {
            let store = Store::open(kind, &path, &Config::budget()).unwrap();
            assert_eq!(store.read::<Person>("users", "keep").unwrap(), person("Ann"), "{kind}");
            assert!(store.read::<Person>("users", "doomed").unwrap_err().is_not_found());
            assert_eq!(store.count("users").unwrap(), 1, "{kind}");
        }
    }
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn test_concurrent_creates_on_one_key() {
    use std::sync::Arc;

    for kind in KINDS {
        let (store, _dir) = test_store(kind);
        let store = Arc::new(store);

        let mut handles = vec![];
        for i in 0..8 {
            let s = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                s.create("race", "winner", &person(&format!("t{}", i))).is_ok()
            }));
        }
        let wins = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();

        assert_eq!(wins, 1, "{kind}: exactly one create may succeed");
        assert_eq!(store.count("race").unwrap(), 1, "{kind}");
    }
}
