//! Window record as seen by the front end

use super::{AppKind, WindowId};
use crate::math::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Opaque launch payload handed to the hosted application
pub type LaunchParams = serde_json::Value;

/// One open application instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    /// Unique window identifier
    pub id: WindowId,
    /// Application hosted by this window
    pub app_kind: AppKind,
    /// Title shown in the frame
    pub title: String,
    pub is_minimized: bool,
    pub is_maximized: bool,
    /// Stacking order (higher = on top), never reused
    pub z_index: u64,
    /// Position of the frame's top-left corner
    pub position: Vec2,
    /// Frame size while not maximized
    pub size: Size,
    /// Payload from the launcher, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_params: Option<LaunchParams>,
}

impl WindowRecord {
    /// Frame to draw inside `workspace`
    ///
    /// A maximized window fills the workspace regardless of its stored
    /// position and size.
    pub fn effective_frame(&self, workspace: Rect) -> Rect {
        if self.is_maximized {
            workspace
        } else {
            Rect::new(self.position, self.size)
        }
    }

    /// Whether the window should be drawn at all
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> WindowRecord {
        WindowRecord {
            id: 1,
            app_kind: AppKind::Terminal,
            title: "Terminal".to_string(),
            is_minimized: false,
            is_maximized: false,
            z_index: 1,
            position: Vec2::new(100.0, 100.0),
            size: Size::new(720.0, 440.0),
            launch_params: None,
        }
    }

    #[test]
    fn test_maximized_frame_takes_precedence() {
        let workspace = Rect::new(Vec2::ZERO, Size::new(1920.0, 1040.0));
        let mut window = record();
        assert_eq!(
            window.effective_frame(workspace),
            Rect::new(Vec2::new(100.0, 100.0), Size::new(720.0, 440.0))
        );

        window.is_maximized = true;
        assert_eq!(window.effective_frame(workspace), workspace);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["appKind"], "terminal");
        assert_eq!(json["zIndex"], 1);
        assert_eq!(json["isMinimized"], false);
        assert!(json.get("launchParams").is_none());
    }
}
