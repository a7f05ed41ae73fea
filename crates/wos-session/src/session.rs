//! OS session: the composition root

use log::info;
use wos_desktop::WindowStore;
use wos_vfs::{
    bootstrap_filesystem, resolve, BootstrapLayout, Clock, SystemClock, Vfs, VfsOptions,
};

use crate::config::SessionConfig;
use crate::error::SessionError;

/// One simulated desktop session
///
/// Owns the session's filesystem and window store for its whole lifetime.
/// The two never reference each other; applications reach both through
/// this handle.
#[derive(Debug)]
pub struct OsSession {
    config: SessionConfig,
    vfs: Vfs,
    windows: WindowStore,
}

impl OsSession {
    /// Start a session on the wall clock
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_clock(config, SystemClock)
    }

    /// Start a session with a custom clock
    pub fn with_clock(config: SessionConfig, clock: impl Clock + 'static) -> Result<Self, SessionError> {
        let options = VfsOptions {
            owner: config.username.clone(),
            group: config.group.clone(),
        };
        let mut vfs = Vfs::with_options(options, clock);
        bootstrap_filesystem(
            &mut vfs,
            &BootstrapLayout::new(config.username.as_str(), config.hostname.as_str()),
        )?;

        info!("session started for {}@{}", config.username, config.hostname);
        Ok(Self {
            config,
            vfs,
            windows: WindowStore::new(),
        })
    }

    /// The session filesystem
    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    /// The session filesystem, mutably
    pub fn vfs_mut(&mut self) -> &mut Vfs {
        &mut self.vfs
    }

    /// The window store
    pub fn windows(&self) -> &WindowStore {
        &self.windows
    }

    /// The window store, mutably
    pub fn windows_mut(&mut self) -> &mut WindowStore {
        &mut self.windows
    }

    /// Active configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The user's home directory
    pub fn home_dir(&self) -> String {
        BootstrapLayout::new(self.config.username.as_str(), self.config.hostname.as_str()).home()
    }

    /// Resolve `target` against `cwd`
    pub fn resolve(&self, cwd: &str, target: &str) -> String {
        resolve(cwd, target)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Look up a preference
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.config.settings.get(key).map(String::as_str)
    }

    /// Store a preference, returning the previous value
    pub fn set_setting(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.config.settings.insert(key.into(), value.into())
    }

    /// Remove a preference, returning its value
    pub fn remove_setting(&mut self, key: &str) -> Option<String> {
        self.config.settings.remove(key)
    }

    /// All preferences, sorted by key
    pub fn settings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.config
            .settings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Current wallpaper key
    pub fn wallpaper(&self) -> &str {
        &self.config.wallpaper
    }

    /// Change the wallpaper key
    pub fn set_wallpaper(&mut self, wallpaper: impl Into<String>) {
        self.config.wallpaper = wallpaper.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wos_vfs::{TickClock, VfsService};

    fn session() -> OsSession {
        OsSession::with_clock(SessionConfig::for_user("u"), TickClock::default()).unwrap()
    }

    #[test]
    fn test_session_bootstraps_home() {
        let session = session();
        assert_eq!(session.home_dir(), "/home/u");
        assert!(session.vfs().exists("/home/u/Documents/readme.txt"));
        assert_eq!(session.windows().count(), 0);
    }

    #[test]
    fn test_nodes_owned_by_session_user() {
        let mut session = session();
        session.vfs_mut().write_file("/tmp/x", b"x").unwrap();
        let node = session.vfs().stat("/tmp/x").unwrap();
        assert_eq!(node.owner, "u");
        assert_eq!(node.group, "users");
    }

    #[test]
    fn test_settings_passthrough() {
        let mut session = session();
        assert_eq!(session.setting("theme"), Some("dark"));

        assert_eq!(session.set_setting("theme", "light"), Some("dark".to_string()));
        assert_eq!(session.setting("theme"), Some("light"));

        session.set_setting("volume", "loud");
        assert_eq!(session.remove_setting("volume"), Some("loud".to_string()));
        assert_eq!(session.setting("volume"), None);

        let keys: Vec<&str> = session.settings().map(|(k, _)| k).collect();
        assert_eq!(keys, ["accent", "font_size", "sound", "theme"]);
    }

    #[test]
    fn test_wallpaper() {
        let mut session = session();
        assert_eq!(session.wallpaper(), "default");
        session.set_wallpaper("matrix");
        assert_eq!(session.wallpaper(), "matrix");
        assert_eq!(session.config().wallpaper, "matrix");
    }

    #[test]
    fn test_resolve_delegates() {
        let session = session();
        assert_eq!(session.resolve("/home/u", "../v/./x"), "/home/v/x");
    }
}
