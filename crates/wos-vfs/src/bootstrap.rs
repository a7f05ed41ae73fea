//! Filesystem bootstrap for the VFS layer.
//!
//! Seeds the default tree a fresh session starts with.

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{join_path, VfsError};
use crate::service::VfsService;

/// Directories created inside every home.
pub const HOME_DIRECTORIES: [&str; 6] = [
    "Desktop",
    "Documents",
    "Downloads",
    "Music",
    "Pictures",
    "Videos",
];

/// Placeholder programs listed under /bin.
const BIN_ENTRIES: [&str; 8] = ["cat", "cd", "chmod", "cp", "ls", "mkdir", "mv", "rm"];

/// Who the default tree is built for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapLayout {
    /// Login name; the home directory is `/home/{username}`
    pub username: String,
    /// Written to /etc/hostname
    pub hostname: String,
}

impl BootstrapLayout {
    /// Create a layout.
    pub fn new(username: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            hostname: hostname.into(),
        }
    }

    /// Home directory path.
    pub fn home(&self) -> String {
        join_path("/home", &self.username)
    }
}

/// Bootstrap the root filesystem structure.
///
/// Creates the following hierarchy:
/// ```text
/// /
/// ├── bin/
/// ├── etc/
/// │   ├── hostname
/// │   └── motd
/// ├── home/
/// │   └── {username}/
/// │       ├── Desktop/ Documents/ Downloads/ Music/ Pictures/ Videos/
/// │       └── Documents/readme.txt
/// ├── tmp/
/// └── var/
///     └── log/
/// ```
///
/// Idempotent: if /home already exists, only /tmp is emptied.
pub fn bootstrap_filesystem<V: VfsService>(
    vfs: &mut V,
    layout: &BootstrapLayout,
) -> Result<(), VfsError> {
    if vfs.exists("/home") {
        info!("filesystem already initialized, cleaning /tmp");
        return clean_tmp(vfs);
    }

    vfs.make_directory("/bin")?;
    for program in BIN_ENTRIES {
        let path = join_path("/bin", program);
        vfs.write_file(&path, b"")?;
        vfs.chmod(&path, "755")?;
    }

    vfs.make_directory("/etc")?;
    vfs.write_file("/etc/hostname", layout.hostname.as_bytes())?;
    vfs.write_file(
        "/etc/motd",
        format!("Welcome to {}, {}.\n", layout.hostname, layout.username).as_bytes(),
    )?;

    vfs.make_directory("/home")?;
    create_user_home(vfs, layout)?;

    vfs.make_directory("/tmp")?;
    vfs.chmod("/tmp", "777")?;

    vfs.make_directory_all("/var/log")?;

    info!(
        "bootstrapped filesystem for {}@{}",
        layout.username, layout.hostname
    );
    Ok(())
}

/// Create a user's home directory and its standard folders.
pub fn create_user_home<V: VfsService>(
    vfs: &mut V,
    layout: &BootstrapLayout,
) -> Result<(), VfsError> {
    let home = layout.home();
    vfs.make_directory(&home)?;

    for dir in HOME_DIRECTORIES {
        vfs.make_directory(&join_path(&home, dir))?;
    }

    vfs.write_file(
        &format!("{}/Documents/readme.txt", home),
        b"Files saved here live for as long as this session does.\n",
    )?;
    vfs.chmod(&home, "700")?;
    Ok(())
}

/// Empty the /tmp directory.
pub fn clean_tmp<V: VfsService>(vfs: &mut V) -> Result<(), VfsError> {
    if !vfs.exists("/tmp") {
        return Ok(());
    }

    for entry in vfs.read_directory("/tmp")? {
        vfs.delete_item(&join_path("/tmp", &entry.name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TickClock;
    use crate::vfs::Vfs;

    fn bootstrapped() -> Vfs {
        let mut vfs = Vfs::with_clock(TickClock::default());
        bootstrap_filesystem(&mut vfs, &BootstrapLayout::new("neo", "zion")).unwrap();
        vfs
    }

    #[test]
    fn test_bootstrap_tree() {
        let vfs = bootstrapped();

        for dir in HOME_DIRECTORIES {
            assert!(vfs.stat(&format!("/home/neo/{}", dir)).unwrap().is_directory());
        }
        assert_eq!(vfs.read_text("/etc/hostname").unwrap(), "zion");
        assert!(vfs.exists("/home/neo/Documents/readme.txt"));
        assert!(vfs.exists("/var/log"));
        assert_eq!(vfs.stat("/tmp").unwrap().permissions.to_string(), "drwxrwxrwx");
        assert_eq!(vfs.stat("/home/neo").unwrap().permissions.to_string(), "drwx------");
        assert_eq!(vfs.stat("/bin/ls").unwrap().permissions.to_string(), "-rwxr-xr-x");
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let mut vfs = bootstrapped();
        vfs.write_file("/tmp/scratch", b"x").unwrap();
        vfs.make_directory("/tmp/build").unwrap();
        vfs.write_file("/home/neo/keep.txt", b"k").unwrap();
        let count = vfs.node_count();

        bootstrap_filesystem(&mut vfs, &BootstrapLayout::new("neo", "zion")).unwrap();

        assert!(vfs.read_directory("/tmp").unwrap().is_empty());
        assert!(vfs.exists("/home/neo/keep.txt"));
        assert_eq!(vfs.node_count(), count - 2);
    }

    #[test]
    fn test_home_path() {
        assert_eq!(BootstrapLayout::new("trinity", "zion").home(), "/home/trinity");
    }
}
