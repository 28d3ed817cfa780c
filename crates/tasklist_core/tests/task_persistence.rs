use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tasklist_core::{
    KeyValueStore, MemoryKeyValueStore, PersistenceError, SqliteKeyValueStore, StoreError,
    StoreResult, Task, TaskId, TaskRepository, TaskStore, TASKS_KEY,
};

struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Poisoned)
    }

    fn set_item(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Poisoned)
    }
}

/// Records every payload written under `TASKS_KEY`.
#[derive(Clone, Default)]
struct RecordingStore {
    writes: Arc<Mutex<Vec<String>>>,
    reject_writes: Arc<AtomicBool>,
}

impl RecordingStore {
    fn written_collections(&self) -> Vec<Vec<Task>> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|payload| serde_json::from_str(payload).unwrap())
            .collect()
    }
}

impl KeyValueStore for RecordingStore {
    fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(self.writes.lock().unwrap().last().cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        assert_eq!(key, TASKS_KEY);
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Poisoned);
        }
        self.writes.lock().unwrap().push(value.to_string());
        Ok(())
    }
}

#[test]
fn save_then_load_on_fresh_store_roundtrips() {
    let backend = MemoryKeyValueStore::new();
    let mut done = Task::with_id(TaskId::from("1700000000000"), "legacy id");
    done.checked = true;
    let tasks = vec![
        Task::new("first").unwrap(),
        done,
        Task::new("third").unwrap(),
    ];

    TaskStore::new(backend.clone()).save(&tasks).unwrap();
    let loaded = TaskStore::new(backend).load();

    assert_eq!(loaded, tasks);
}

#[test]
fn missing_value_loads_empty() {
    let store = TaskStore::new(MemoryKeyValueStore::new());
    assert!(store.try_load().unwrap().is_empty());
}

#[test]
fn corrupt_value_loads_empty() {
    let backend = MemoryKeyValueStore::new();
    backend.set_item(TASKS_KEY, "{not json").unwrap();
    let store = TaskStore::new(backend.clone());

    assert!(matches!(store.try_load(), Err(PersistenceError::ReadFailure(_))));
    assert!(store.load().is_empty());

    let repo = TaskRepository::open(backend).unwrap();
    assert!(repo.is_empty());
}

#[test]
fn wrong_record_shape_loads_empty() {
    let backend = MemoryKeyValueStore::new();
    backend.set_item(TASKS_KEY, r#"[{"id":"1","text":"no flag"}]"#).unwrap();

    assert!(TaskStore::new(backend).load().is_empty());
}

#[test]
fn unavailable_backend_is_non_fatal() {
    let store = TaskStore::new(UnavailableStore);
    assert!(store.load().is_empty());
    assert!(matches!(store.save(&[]), Err(PersistenceError::WriteFailure(_))));

    let mut repo = TaskRepository::open(UnavailableStore).unwrap();
    let task = repo.create("kept in memory").unwrap();
    repo.flush();
    assert_eq!(repo.get(&task.id), Some(&task));
}

#[test]
fn every_mutation_is_persisted_in_order() {
    let backend = MemoryKeyValueStore::new();
    let mut repo = TaskRepository::open(backend.clone()).unwrap();

    let first = repo.create("first").unwrap();
    let second = repo.create("second").unwrap();
    repo.toggle(&first.id);
    repo.save_edit(&second.id, "second edited");
    repo.delete(&first.id);
    repo.flush();

    let stored = TaskStore::new(backend).load();
    assert_eq!(stored, repo.snapshot());
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].text, "second edited");
}

#[test]
fn each_mutation_call_writes_its_own_snapshot_in_order() {
    let backend = RecordingStore::default();
    let mut repo = TaskRepository::open(backend.clone()).unwrap();
    let missing = TaskId::from("missing");
    let mut expected = Vec::new();

    let first = repo.create("first").unwrap();
    expected.push(repo.snapshot());
    let second = repo.create("second").unwrap();
    expected.push(repo.snapshot());
    repo.toggle(&first.id);
    expected.push(repo.snapshot());
    repo.save_edit(&second.id, "second edited");
    expected.push(repo.snapshot());
    repo.delete(&first.id);
    expected.push(repo.snapshot());

    assert!(repo.create("   ").is_none());
    assert!(!repo.toggle(&missing));
    expected.push(repo.snapshot());
    assert!(!repo.delete(&missing));
    expected.push(repo.snapshot());
    assert!(!repo.save_edit(&missing, "x"));
    expected.push(repo.snapshot());
    repo.flush();

    assert_eq!(backend.written_collections(), expected);
    assert_eq!(repo.revision(), 5);
}

#[test]
fn unknown_id_call_rewrites_store_after_failed_write() {
    let backend = RecordingStore::default();
    let mut repo = TaskRepository::open(backend.clone()).unwrap();

    backend.reject_writes.store(true, Ordering::SeqCst);
    repo.create("lost on first write").unwrap();
    repo.flush();
    assert!(backend.written_collections().is_empty());

    backend.reject_writes.store(false, Ordering::SeqCst);
    repo.delete(&TaskId::from("missing"));
    repo.flush();

    assert_eq!(backend.written_collections(), vec![repo.snapshot()]);
}

#[test]
fn repository_reopens_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.sqlite3");

    let expected = {
        let mut repo = TaskRepository::open(SqliteKeyValueStore::open(&path).unwrap()).unwrap();
        let milk = repo.create("buy milk").unwrap();
        repo.create("walk dog").unwrap();
        repo.toggle(&milk.id);
        repo.snapshot()
        // Drop joins the worker after pending writes.
    };

    let reopened = TaskRepository::open(SqliteKeyValueStore::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.list(), expected.as_slice());
}
