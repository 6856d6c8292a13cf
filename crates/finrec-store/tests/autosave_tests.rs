// Integration tests for the auto-save policy:
// boundary at exact multiples of 10, op-counter trigger, manual save.

use std::sync::Arc;

use finrec_core::audit::AuditLog;
use finrec_core::model::{Client, ClientOperation};
use finrec_store::json;
use finrec_store::repo::{RepoConfig, Repository, Sequential};
use tempfile::TempDir;

fn client_repo(dir: &TempDir) -> Repository<Client> {
    let config = RepoConfig::new(
        dir.path().join("clients.json"),
        Arc::new(Sequential),
        |c: &Client| c.id.unwrap_or(0),
    );
    Repository::new(config, Arc::new(AuditLog::new()))
}

fn client(n: usize) -> Client {
    Client::new(
        format!("client-{n}"),
        "Test",
        format!("c{n}@example.com"),
        "+40700000000",
    )
}

#[test]
fn test_nine_creates_leave_no_file_tenth_persists_all() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clients.json");
    let repo = client_repo(&dir);

    for n in 1..=9 {
        repo.create(client(n), ClientOperation::Create).unwrap();
        assert!(!path.exists(), "no file expected after create #{n}");
    }

    repo.create(client(10), ClientOperation::Create).unwrap();

    assert!(path.exists());
    let persisted: Vec<Client> = json::load(&path);
    assert_eq!(persisted.len(), 10);
}

#[test]
fn test_op_counter_triggers_on_mixed_mutations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clients.json");
    let repo = client_repo(&dir);

    // 5 creates + 4 updates: 9 mutations, still below both triggers
    let mut created = Vec::new();
    for n in 1..=5 {
        created.push(repo.create(client(n), ClientOperation::Create).unwrap());
    }
    for c in created.iter().take(4) {
        repo.update(c.clone(), ClientOperation::Update).unwrap();
    }
    assert!(!path.exists());

    // The 10th mutation fires the counter trigger even though the active
    // set holds only 5 entities
    repo.delete_by_id(&5, ClientOperation::Delete).unwrap();
    assert!(path.exists());
    let persisted: Vec<Client> = json::load(&path);
    assert_eq!(persisted.len(), 4);
}

#[test]
fn test_counter_resets_after_autosave() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clients.json");
    let repo = client_repo(&dir);

    for n in 1..=10 {
        repo.create(client(n), ClientOperation::Create).unwrap();
    }
    let after_ten = std::fs::read_to_string(&path).unwrap();

    // The 11th mutation starts a fresh window: no save
    repo.create(client(11), ClientOperation::Create).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), after_ten);
}

#[test]
fn test_manual_save_bypasses_thresholds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clients.json");
    let repo = client_repo(&dir);

    repo.create(client(1), ClientOperation::Create).unwrap();
    assert!(!path.exists());

    repo.save().unwrap();

    let persisted: Vec<Client> = json::load(&path);
    assert_eq!(persisted.len(), 1);
}

#[test]
fn test_manual_save_resets_op_counter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clients.json");
    let repo = client_repo(&dir);

    for n in 1..=5 {
        repo.create(client(n), ClientOperation::Create).unwrap();
    }
    repo.save().unwrap();
    let after_manual = std::fs::read_to_string(&path).unwrap();

    // 9 more mutations: the pre-save ones no longer count
    for n in 6..=9 {
        repo.create(client(n), ClientOperation::Create).unwrap();
    }
    for n in 1..=5 {
        repo.delete_by_id(&n, ClientOperation::Delete).unwrap();
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), after_manual);

    // The 10th since the manual save persists again
    repo.delete_by_id(&6, ClientOperation::Delete).unwrap();
    assert_ne!(std::fs::read_to_string(&path).unwrap(), after_manual);
}

#[test]
fn test_save_on_empty_never_saved_repo_is_noop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clients.json");
    let repo = client_repo(&dir);

    repo.save().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_save_writes_empty_array_once_file_exists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clients.json");
    let repo = client_repo(&dir);

    repo.create(client(1), ClientOperation::Create).unwrap();
    repo.save().unwrap();
    repo.delete_by_id(&1, ClientOperation::Delete).unwrap();

    // Active is now empty but the file was saved before: save keeps the
    // file, as a valid empty array
    repo.save().unwrap();
    assert!(path.exists());
    let persisted: Vec<Client> = json::load(&path);
    assert!(persisted.is_empty());
}
