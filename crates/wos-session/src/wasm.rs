//! WASM exports for the session
//!
//! This module provides wasm-bindgen exports for [`OsSession`], allowing the
//! browser front end to drive the filesystem and window store. Structured
//! values cross the boundary as JSON strings; failures become JS exceptions
//! carrying the error message.

use log::debug;
use wasm_bindgen::prelude::*;

use wos_desktop::{AppKind, WindowId};
use wos_vfs::{Clock, VfsService};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::session::OsSession;

/// Clock backed by `Date.now()`
#[derive(Clone, Copy, Debug, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

fn js_err(err: impl Into<SessionError>) -> JsValue {
    JsValue::from_str(&err.into().to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_err)
}

/// Session controller for WASM - wraps OsSession with a JS-friendly API
#[wasm_bindgen]
pub struct SessionController {
    session: OsSession,
}

#[wasm_bindgen]
impl SessionController {
    /// Start a session from a JSON config (`"{}"` for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<SessionController, JsValue> {
        let config = SessionConfig::from_json(config_json).map_err(js_err)?;
        let session = OsSession::with_clock(config, JsClock).map_err(js_err)?;
        Ok(Self { session })
    }

    // =========================================================================
    // Filesystem
    // =========================================================================

    /// Resolve a path typed relative to `cwd`
    #[wasm_bindgen]
    pub fn resolve(&self, cwd: &str, target: &str) -> String {
        self.session.resolve(cwd, target)
    }

    /// The user's home directory
    #[wasm_bindgen]
    pub fn home_dir(&self) -> String {
        self.session.home_dir()
    }

    /// Directory children as a JSON array of nodes
    #[wasm_bindgen]
    pub fn read_directory(&self, path: &str) -> Result<String, JsValue> {
        let nodes = self.session.vfs().read_directory(path).map_err(js_err)?;
        to_json(&nodes)
    }

    /// File content as text
    #[wasm_bindgen]
    pub fn read_file(&self, path: &str) -> Result<String, JsValue> {
        self.session.vfs().read_text(path).map_err(js_err)
    }

    /// Create or overwrite a text file
    #[wasm_bindgen]
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<(), JsValue> {
        self.session
            .vfs_mut()
            .write_file(path, content.as_bytes())
            .map_err(js_err)
    }

    /// Create a directory
    #[wasm_bindgen]
    pub fn make_directory(&mut self, path: &str) -> Result<(), JsValue> {
        self.session.vfs_mut().make_directory(path).map_err(js_err)
    }

    /// Delete a file or directory subtree
    #[wasm_bindgen]
    pub fn delete_item(&mut self, path: &str) -> Result<(), JsValue> {
        self.session.vfs_mut().delete_item(path).map_err(js_err)
    }

    /// Deep-copy a node
    #[wasm_bindgen]
    pub fn copy_item(&mut self, source: &str, dest: &str) -> Result<(), JsValue> {
        self.session.vfs_mut().copy_item(source, dest).map_err(js_err)
    }

    /// Move or rename a node
    #[wasm_bindgen]
    pub fn move_item(&mut self, source: &str, dest: &str) -> Result<(), JsValue> {
        self.session.vfs_mut().move_item(source, dest).map_err(js_err)
    }

    /// Apply a chmod mode string
    #[wasm_bindgen]
    pub fn chmod(&mut self, path: &str, mode: &str) -> Result<(), JsValue> {
        self.session.vfs_mut().chmod(path, mode).map_err(js_err)
    }

    /// Node metadata as JSON
    #[wasm_bindgen]
    pub fn stat(&self, path: &str) -> Result<String, JsValue> {
        let node = self.session.vfs().stat(path).map_err(js_err)?;
        to_json(&node)
    }

    /// Whether a node exists at `path`
    #[wasm_bindgen]
    pub fn exists(&self, path: &str) -> bool {
        self.session.vfs().exists(path)
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Launch an app by kebab-case kind, with optional JSON params
    #[wasm_bindgen]
    pub fn launch(&mut self, app_kind: &str, params_json: Option<String>) -> Result<u64, JsValue> {
        let kind: AppKind =
            serde_json::from_value(serde_json::Value::String(app_kind.to_string())).map_err(js_err)?;
        let params = match params_json {
            Some(json) => Some(serde_json::from_str(&json).map_err(js_err)?),
            None => None,
        };
        Ok(self.session.windows_mut().launch(kind, params))
    }

    /// Close a window
    #[wasm_bindgen]
    pub fn close_window(&mut self, id: WindowId) {
        self.session.windows_mut().close(id);
    }

    /// Focus a window
    #[wasm_bindgen]
    pub fn focus_window(&mut self, id: WindowId) {
        self.session.windows_mut().focus(id);
    }

    /// Minimize a window
    #[wasm_bindgen]
    pub fn minimize_window(&mut self, id: WindowId) {
        self.session.windows_mut().minimize(id);
    }

    /// Toggle maximize on a window
    #[wasm_bindgen]
    pub fn toggle_maximize(&mut self, id: WindowId) {
        self.session.windows_mut().toggle_maximize(id);
    }

    /// Move a window
    #[wasm_bindgen]
    pub fn move_window(&mut self, id: WindowId, x: f32, y: f32) {
        self.session.windows_mut().move_window(id, x, y);
    }

    /// Resize a window
    #[wasm_bindgen]
    pub fn resize_window(&mut self, id: WindowId, width: f32, height: f32) {
        self.session.windows_mut().resize(id, width, height);
    }

    /// Set a window title
    #[wasm_bindgen]
    pub fn set_window_title(&mut self, id: WindowId, title: &str) {
        self.session.windows_mut().set_title(id, title);
    }

    /// Focused window id
    #[wasm_bindgen]
    pub fn active_window(&self) -> Option<u64> {
        self.session.windows().active()
    }

    /// Current desktop snapshot as JSON
    #[wasm_bindgen]
    pub fn get_snapshot_json(&self) -> Result<String, JsValue> {
        to_json(&self.session.windows().snapshot())
    }

    /// Call `callback` with snapshot JSON after every window change
    #[wasm_bindgen]
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u64 {
        self.session.windows_mut().subscribe(move |snapshot| {
            match serde_json::to_string(snapshot) {
                Ok(json) => {
                    if callback.call1(&JsValue::NULL, &JsValue::from_str(&json)).is_err() {
                        debug!("snapshot observer threw");
                    }
                }
                Err(err) => debug!("snapshot serialization failed: {}", err),
            }
        })
    }

    /// Stop a subscription
    #[wasm_bindgen]
    pub fn unsubscribe(&mut self, id: u64) -> bool {
        self.session.windows_mut().unsubscribe(id)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Look up a preference
    #[wasm_bindgen]
    pub fn get_setting(&self, key: &str) -> Option<String> {
        self.session.setting(key).map(str::to_string)
    }

    /// Store a preference
    #[wasm_bindgen]
    pub fn set_setting(&mut self, key: &str, value: &str) {
        self.session.set_setting(key, value);
    }

    /// Change the wallpaper
    #[wasm_bindgen]
    pub fn set_wallpaper(&mut self, wallpaper: &str) {
        self.session.set_wallpaper(wallpaper);
    }

    /// Full configuration as JSON
    #[wasm_bindgen]
    pub fn get_config_json(&self) -> Result<String, JsValue> {
        self.session.config().to_json().map_err(js_err)
    }
}
