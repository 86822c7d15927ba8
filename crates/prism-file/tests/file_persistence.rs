//! Filesystem persistence tests.

use std::sync::Arc;

use prism_core::traits::ObjectPersistence;
use prism_core::{ApiUrl, Auth, ConnectionParams, Credentials, Session, SessionId, SessionScope};
use prism_file::FilePersistence;
use tempfile::TempDir;

fn session(id: &str) -> Session {
    let root = ApiUrl::new("https://photos.example.com").unwrap();
    Session::new(SessionId::new(id).unwrap(), ConnectionParams::new(root))
}

#[test]
fn missing_file_loads_as_none() {
    let dir = TempDir::new().unwrap();
    let persistence = FilePersistence::<Session>::new(dir.path().join("session.json"));

    assert!(!persistence.has_item());
    assert!(persistence.load_item().unwrap().is_none());
}

#[test]
fn saves_and_loads_session() {
    let dir = TempDir::new().unwrap();
    let persistence = FilePersistence::<Session>::new(dir.path().join("nested/session.json"));

    persistence.save_item(&session("abc123")).unwrap();

    assert!(persistence.has_item());
    let loaded = persistence.load_item().unwrap().unwrap();
    assert_eq!(loaded.id().as_str(), "abc123");
    assert_eq!(
        loaded.connection().root_url.as_str(),
        "https://photos.example.com/"
    );
}

#[test]
fn save_replaces_previous_item_without_leftovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let persistence = FilePersistence::<Session>::new(&path);

    persistence.save_item(&session("first")).unwrap();
    persistence.save_item(&session("second")).unwrap();

    let loaded = persistence.load_item().unwrap().unwrap();
    assert_eq!(loaded.id().as_str(), "second");

    let tmp_files = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(tmp_files, 0);
}

#[cfg(unix)]
#[test]
fn stored_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("auth.json");
    let persistence = FilePersistence::<Auth>::new(&path);

    persistence
        .save_item(&Auth::from(Credentials::new("alice", "secret")))
        .unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn clear_removes_item() {
    let dir = TempDir::new().unwrap();
    let persistence = FilePersistence::<Auth>::new(dir.path().join("auth.json"));

    persistence
        .save_item(&Auth::from(Credentials::new("alice", "secret")))
        .unwrap();
    persistence.clear().unwrap();

    assert!(!persistence.has_item());
    persistence.clear().unwrap();
}

#[test]
fn corrupt_file_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let persistence = FilePersistence::<Session>::new(&path);
    let err = persistence.load_item().unwrap_err();
    assert!(matches!(err, prism_core::Error::Storage(_)));
}

#[test]
fn renewed_session_survives_restore() {
    let dir = TempDir::new().unwrap();
    let sessions: Arc<dyn ObjectPersistence<Session>> =
        Arc::new(FilePersistence::<Session>::new(dir.path().join("session.json")));
    sessions.save_item(&session("A")).unwrap();

    let scope = SessionScope::restore(Arc::clone(&sessions), None)
        .unwrap()
        .unwrap();
    scope.store().publish(SessionId::new("B").unwrap());
    scope.close().unwrap();

    let restored = SessionScope::restore(sessions, None).unwrap().unwrap();
    assert_eq!(restored.session().id().as_str(), "B");
}
