use std::collections::HashSet;
use tasklist_core::{MemoryKeyValueStore, TaskId, TaskRepository};

fn open_repo() -> TaskRepository {
    TaskRepository::open(MemoryKeyValueStore::new()).unwrap()
}

fn texts(repo: &TaskRepository) -> Vec<&str> {
    repo.list().iter().map(|task| task.text.as_str()).collect()
}

#[test]
fn create_rejects_blank_text() {
    let mut repo = open_repo();

    assert!(repo.create("").is_none());
    assert!(repo.create("  ").is_none());
    assert!(repo.create("\t\n").is_none());
    assert!(repo.is_empty());
    assert_eq!(repo.revision(), 0);
}

#[test]
fn create_appends_unchecked_task() {
    let mut repo = open_repo();

    let task = repo.create("buy milk").unwrap();

    assert_eq!(repo.len(), 1);
    assert_eq!(repo.list()[0], task);
    assert_eq!(task.text, "buy milk");
    assert!(!task.checked);
}

#[test]
fn created_ids_are_unique() {
    let mut repo = open_repo();
    for index in 0..50 {
        repo.create(format!("task {index}")).unwrap();
    }

    let ids = repo.list().iter().map(|task| &task.id).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 50);
}

#[test]
fn toggle_twice_restores_checked() {
    let mut repo = open_repo();
    let task = repo.create("water plants").unwrap();

    assert!(repo.toggle(&task.id));
    assert!(repo.get(&task.id).unwrap().checked);
    assert!(repo.toggle(&task.id));
    assert!(!repo.get(&task.id).unwrap().checked);
}

#[test]
fn toggle_unknown_id_is_noop() {
    let mut repo = open_repo();
    repo.create("a").unwrap();
    let before = repo.snapshot();

    assert!(!repo.toggle(&TaskId::from("missing")));
    assert_eq!(repo.list(), before.as_slice());
}

#[test]
fn delete_removes_task_and_is_safe_to_repeat() {
    let mut repo = open_repo();
    let task = repo.create("a").unwrap();

    assert!(repo.delete(&task.id));
    assert!(repo.get(&task.id).is_none());
    assert!(!repo.delete(&task.id));
    assert!(repo.is_empty());
}

#[test]
fn save_edit_replaces_text_verbatim_and_keeps_checked() {
    let mut repo = open_repo();
    let task = repo.create("draft").unwrap();
    repo.toggle(&task.id);

    assert!(repo.save_edit(&task.id, "  final  "));
    let edited = repo.get(&task.id).unwrap();
    assert_eq!(edited.text, "  final  ");
    assert!(edited.checked);

    assert!(repo.save_edit(&task.id, ""));
    assert_eq!(repo.get(&task.id).unwrap().text, "");
}

#[test]
fn save_edit_unknown_id_is_noop() {
    let mut repo = open_repo();
    repo.create("a").unwrap();

    assert!(!repo.save_edit(&TaskId::from("missing"), "b"));
    assert_eq!(texts(&repo), vec!["a"]);
}

#[test]
fn order_follows_creation_through_toggle_edit_and_delete() {
    let mut repo = open_repo();
    let first = repo.create("first").unwrap();
    let second = repo.create("second").unwrap();
    let third = repo.create("third").unwrap();
    repo.create("fourth").unwrap();

    repo.toggle(&third.id);
    repo.save_edit(&first.id, "first!");
    repo.delete(&second.id);

    assert_eq!(texts(&repo), vec!["first!", "third", "fourth"]);
}

#[test]
fn snapshot_is_detached_from_repository_state() {
    let mut repo = open_repo();
    repo.create("a").unwrap();

    let mut snapshot = repo.snapshot();
    snapshot[0].text = "mutated".to_string();
    snapshot.clear();

    assert_eq!(texts(&repo), vec!["a"]);
}
