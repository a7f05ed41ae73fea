//! Integration tests for the VFS facade
//!
//! These tests drive the public API the way application windows do:
//! - Create/read/write round trips through relative path resolution
//! - Directory exclusivity and copy independence
//! - Move cycle guard and tree stability on rejection
//! - Snapshot detachment across later writes

use proptest::prelude::*;
use wos_vfs::{
    bootstrap_filesystem, resolve, BootstrapLayout, NodeKind, TickClock, Vfs, VfsError,
    VfsService,
};

fn session_vfs() -> Vfs {
    let mut vfs = Vfs::with_clock(TickClock::default());
    bootstrap_filesystem(&mut vfs, &BootstrapLayout::new("u", "wos")).unwrap();
    vfs
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_create_notes_directory_and_file() {
    let mut vfs = session_vfs();

    vfs.make_directory("/home/u/Notes").unwrap();
    vfs.write_file("/home/u/Notes/a.txt", b"hi").unwrap();

    let entries = vfs.read_directory("/home/u/Notes").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "a.txt");
    assert_eq!(entries[0].kind(), NodeKind::File);
}

#[test]
fn test_delete_notes_directory() {
    let mut vfs = session_vfs();
    vfs.make_directory("/home/u/Notes").unwrap();
    vfs.write_file("/home/u/Notes/a.txt", b"hi").unwrap();

    vfs.delete_item("/home/u/Notes").unwrap();

    assert!(vfs.read_directory("/home/u/Notes").unwrap_err().is_not_found());
    assert!(vfs.read_file("/home/u/Notes/a.txt").unwrap_err().is_not_found());
}

#[test]
fn test_terminal_style_relative_paths() {
    let mut vfs = session_vfs();
    let cwd = "/home/u/Documents";

    let target = vfs.resolve(cwd, "../Downloads/./song.mp3");
    assert_eq!(target, "/home/u/Downloads/song.mp3");
    vfs.write_file(&target, b"ID3").unwrap();

    let back = resolve("/home/u/Downloads", "song.mp3");
    assert_eq!(vfs.read_file(&back).unwrap(), b"ID3");
}

#[test]
fn test_directory_exclusivity() {
    let mut vfs = session_vfs();
    vfs.write_file("/home/u/plain.txt", b"text").unwrap();

    assert_eq!(
        vfs.write_file("/home/u/plain.txt/child.txt", b"nope"),
        Err(VfsError::NotADirectory("/home/u/plain.txt".into()))
    );
    assert_eq!(vfs.read_file("/home/u/plain.txt").unwrap(), b"text");
}

#[test]
fn test_copy_independence() {
    let mut vfs = session_vfs();
    vfs.write_file("/home/u/a.txt", b"original").unwrap();

    vfs.copy_item("/home/u/a.txt", "/home/u/b.txt").unwrap();
    vfs.write_file("/home/u/b.txt", b"edited").unwrap();

    assert_eq!(vfs.read_file("/home/u/a.txt").unwrap(), b"original");
    assert_ne!(
        vfs.stat("/home/u/a.txt").unwrap().id,
        vfs.stat("/home/u/b.txt").unwrap().id
    );
}

#[test]
fn test_copy_directory_mints_ids_at_every_level() {
    let mut vfs = session_vfs();
    vfs.copy_item("/home/u", "/tmp/backup").unwrap();

    let original = vfs.stat("/home/u").unwrap();
    let backup = vfs.stat("/tmp/backup").unwrap();

    fn ids(node: &wos_vfs::Node, out: &mut Vec<wos_vfs::NodeId>) {
        out.push(node.id);
        for child in node.children().unwrap_or_default() {
            ids(child, out);
        }
    }
    let mut original_ids = Vec::new();
    let mut backup_ids = Vec::new();
    ids(&original, &mut original_ids);
    ids(&backup, &mut backup_ids);

    assert_eq!(original_ids.len(), backup_ids.len());
    assert!(backup_ids.iter().all(|id| !original_ids.contains(id)));
    assert_eq!(
        vfs.read_file("/tmp/backup/Documents/readme.txt").unwrap(),
        vfs.read_file("/home/u/Documents/readme.txt").unwrap()
    );
}

#[test]
fn test_move_cycle_guard_leaves_tree_unchanged() {
    let mut vfs = session_vfs();
    vfs.make_directory_all("/a/b").unwrap();
    let before = vfs.stat("/").unwrap();

    let err = vfs.move_item("/a", "/a/b").unwrap_err();
    assert!(matches!(err, VfsError::InvalidCycle { .. }));
    assert_eq!(vfs.stat("/").unwrap(), before);
}

#[test]
fn test_rename_in_place() {
    let mut vfs = session_vfs();
    vfs.write_file("/home/u/Documents/draft.txt", b"v1").unwrap();
    let id = vfs.stat("/home/u/Documents/draft.txt").unwrap().id;

    vfs.move_item("/home/u/Documents/draft.txt", "/home/u/Documents/final.txt")
        .unwrap();

    let names: Vec<String> = vfs
        .read_directory("/home/u/Documents")
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(names, ["readme.txt", "final.txt"]);
    assert_eq!(vfs.stat("/home/u/Documents/final.txt").unwrap().id, id);
}

#[test]
fn test_stale_snapshot_survives_delete() {
    let mut vfs = session_vfs();
    let listing = vfs.read_directory("/home/u").unwrap();
    let count = listing.len();

    vfs.delete_item("/home/u/Music").unwrap();

    assert_eq!(listing.len(), count);
    assert!(listing.iter().any(|n| n.name == "Music"));
    assert_eq!(vfs.read_directory("/home/u").unwrap().len(), count - 1);
}

#[test]
fn test_node_serializes_for_front_end() {
    let mut vfs = session_vfs();
    vfs.write_file("/home/u/a.txt", b"hi").unwrap();
    let node = vfs.stat("/home/u/a.txt").unwrap();

    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["kind"], "file");
    assert_eq!(json["name"], "a.txt");
    assert_eq!(json["permissions"], "-rw-r--r--");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_write_read_roundtrip(
        name in "[A-Za-z0-9_.-]{1,12}",
        content in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assume!(name != "." && name != "..");
        let mut vfs = session_vfs();
        let path = format!("/home/u/Documents/{}", name);

        vfs.write_file(&path, &content).unwrap();
        prop_assert_eq!(vfs.read_file(&path).unwrap(), content);
    }
}
