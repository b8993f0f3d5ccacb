//! Session persistence across process restarts, using file-backed stores.

mod common;

use chrono::Duration;
use common::{alice_token, refresh_token, RecordingNavigator};
use relay::auth::{FileStore, SessionController, SessionState, TokenStore};
use relay::types::Theme;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn open_session(dir: &Path) -> SessionController {
    let store = TokenStore::new(
        Arc::new(FileStore::open(dir.join("session.json")).unwrap()),
        Arc::new(FileStore::open(dir.join("preferences.json")).unwrap()),
    );
    SessionController::new(store, Arc::new(RecordingNavigator::default()))
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    let first = open_session(dir.path());
    first.bootstrap();
    first
        .store()
        .set_tokens(None, Some(&refresh_token(Duration::days(7))))
        .unwrap();
    first.login(&alice_token()).unwrap();
    drop(first);

    let second = open_session(dir.path());
    assert!(second.is_loading());
    assert!(second.bootstrap());

    let user = second.user().unwrap();
    assert_eq!(user.user_name.as_deref(), Some("alice"));
    assert_eq!(user.id.as_deref(), Some("u1"));
    assert_eq!(second.store().cached_identity(), Some(user));
}

#[test]
fn test_logout_persists_and_keeps_theme() {
    let dir = TempDir::new().unwrap();

    let first = open_session(dir.path());
    first.store().set_theme(Theme::Dark).unwrap();
    first
        .store()
        .set_tokens(Some(&alice_token()), Some(&refresh_token(Duration::days(7))))
        .unwrap();
    assert!(first.bootstrap());
    first.logout();
    drop(first);

    let second = open_session(dir.path());
    assert!(!second.bootstrap());
    assert_eq!(second.state(), SessionState::Unauthenticated);
    assert_eq!(second.store().theme(), Theme::Dark);
}

#[test]
fn test_partial_pair_on_disk_is_wiped() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("session.json"),
        format!(r#"{{"accessToken": "{}"}}"#, alice_token()),
    )
    .unwrap();

    let session = open_session(dir.path());
    assert!(!session.bootstrap());

    let reopened = open_session(dir.path());
    assert!(reopened.store().access_token().is_none());
}

#[test]
fn test_bootstrap_recovers_from_torn_session_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");
    fs::write(&file, r#"{"accessToken": "abc"#).unwrap();

    let session = open_session(dir.path());
    assert!(!session.bootstrap());
    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(!session.is_loading());

    let content = fs::read_to_string(&file).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&content).is_ok());
}
