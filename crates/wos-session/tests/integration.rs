//! Integration tests for OsSession
//!
//! These tests drive a whole session the way the shell's applications do:
//! - Config loading and filesystem bootstrap
//! - Apps writing through the VFS while windows are opened and focused
//! - The two stores staying independent

use wos_desktop::AppKind;
use wos_session::{OsSession, SessionConfig, SessionError};
use wos_vfs::{TickClock, VfsError, VfsService};

fn start(json: &str) -> OsSession {
    let config = SessionConfig::from_json(json).unwrap();
    OsSession::with_clock(config, TickClock::default()).unwrap()
}

#[test]
fn test_session_from_json_config() {
    let session = start(r#"{"username": "neo", "hostname": "nebuchadnezzar"}"#);

    assert_eq!(session.home_dir(), "/home/neo");
    assert_eq!(session.vfs().read_text("/etc/hostname").unwrap(), "nebuchadnezzar");
    assert_eq!(session.setting("theme"), Some("dark"));
}

#[test]
fn test_editor_saves_through_vfs() {
    let mut session = start("{}");
    let editor = session.windows_mut().launch(
        AppKind::TextEditor,
        Some(serde_json::json!({"path": "/home/user/Documents/todo.txt"})),
    );

    let cwd = session.home_dir();
    let path = session.resolve(&cwd, "Documents/todo.txt");
    session.vfs_mut().write_file(&path, b"buy milk").unwrap();
    session.windows_mut().set_title(editor, "todo.txt");

    assert_eq!(session.vfs().read_text(&path).unwrap(), "buy milk");
    assert_eq!(session.windows().get(editor).unwrap().title, "todo.txt");
    assert_eq!(session.windows().active(), Some(editor));
}

#[test]
fn test_window_changes_leave_vfs_untouched() {
    let mut session = start("{}");
    let before = session.vfs().stat("/").unwrap();

    let terminal = session.windows_mut().launch(AppKind::Terminal, None);
    session.windows_mut().minimize(terminal);
    session.windows_mut().close(terminal);

    assert_eq!(session.vfs().stat("/").unwrap(), before);
}

#[test]
fn test_vfs_errors_surface_typed() {
    let mut session = start("{}");
    let err: SessionError = session
        .vfs_mut()
        .move_item("/home", "/home/user")
        .unwrap_err()
        .into();

    assert!(matches!(
        err.as_vfs(),
        Some(VfsError::InvalidCycle { .. })
    ));
}

#[test]
fn test_bad_config_is_rejected() {
    assert!(matches!(
        SessionConfig::from_json("not json"),
        Err(SessionError::Json(_))
    ));
}

#[test]
fn test_settings_roundtrip_through_config_json() {
    let mut session = start("{}");
    session.set_setting("accent", "amber");
    session.set_wallpaper("matrix");

    let json = session.config().to_json().unwrap();
    let restored = SessionConfig::from_json(&json).unwrap();

    assert_eq!(restored.settings["accent"], "amber");
    assert_eq!(restored.wallpaper, "matrix");
}
