//! Session configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SessionError;

/// Settings every fresh session starts with
pub const DEFAULT_SETTINGS: [(&str, &str); 4] = [
    ("theme", "dark"),
    ("accent", "green"),
    ("font_size", "14"),
    ("sound", "on"),
];

/// User-facing configuration of one simulated session
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Login name; also the owner of new nodes
    pub username: String,
    /// Group stamped on new nodes
    pub group: String,
    /// Machine name written to /etc/hostname
    pub hostname: String,
    /// Desktop wallpaper key
    pub wallpaper: String,
    /// Opaque preference map
    pub settings: BTreeMap<String, String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: String::from("user"),
            group: String::from("users"),
            hostname: String::from("wos"),
            wallpaper: String::from("default"),
            settings: DEFAULT_SETTINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SessionConfig {
    /// Config with a custom login name and defaults elsewhere
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the config to JSON
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.username, "user");
        assert_eq!(config.group, "users");
        assert_eq!(config.hostname, "wos");
        assert_eq!(config.wallpaper, "default");
        assert_eq!(config.settings.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(config.settings.len(), DEFAULT_SETTINGS.len());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SessionConfig::from_json(r#"{"username": "neo"}"#).unwrap();
        assert_eq!(config.username, "neo");
        assert_eq!(config.hostname, "wos");
        assert_eq!(config.settings.get("sound").map(String::as_str), Some("on"));
    }

    #[test]
    fn test_explicit_settings_replace_defaults() {
        let config = SessionConfig::from_json(r#"{"settings": {"theme": "light"}}"#).unwrap();
        assert_eq!(config.settings.len(), 1);
        assert_eq!(config.settings["theme"], "light");
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SessionConfig::for_user("trinity");
        let restored = SessionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            SessionConfig::from_json("{\"username\": 5}"),
            Err(SessionError::Json(_))
        ));
    }
}
