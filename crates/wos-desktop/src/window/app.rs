//! Application kinds a window can host

use crate::math::Size;
use serde::{Deserialize, Serialize};

/// Closed set of applications the shell can launch
///
/// The window store only needs a kind's identity (for singleton policy) plus
/// its default title and frame size; what a kind renders is up to the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppKind {
    Terminal,
    FileExplorer,
    TextEditor,
    Paint,
    MusicPlayer,
    VideoPlayer,
    ImageViewer,
    Browser,
    Calculator,
    Settings,
    SystemMonitor,
    NetworkScanner,
    PacketSniffer,
}

impl AppKind {
    /// Every kind, in launcher order
    pub const ALL: [AppKind; 13] = [
        AppKind::Terminal,
        AppKind::FileExplorer,
        AppKind::TextEditor,
        AppKind::Paint,
        AppKind::MusicPlayer,
        AppKind::VideoPlayer,
        AppKind::ImageViewer,
        AppKind::Browser,
        AppKind::Calculator,
        AppKind::Settings,
        AppKind::SystemMonitor,
        AppKind::NetworkScanner,
        AppKind::PacketSniffer,
    ];

    /// Title shown in the frame until the app sets its own
    pub fn title(self) -> &'static str {
        match self {
            AppKind::Terminal => "Terminal",
            AppKind::FileExplorer => "File Explorer",
            AppKind::TextEditor => "Text Editor",
            AppKind::Paint => "Paint",
            AppKind::MusicPlayer => "Music Player",
            AppKind::VideoPlayer => "Video Player",
            AppKind::ImageViewer => "Image Viewer",
            AppKind::Browser => "Browser",
            AppKind::Calculator => "Calculator",
            AppKind::Settings => "Settings",
            AppKind::SystemMonitor => "System Monitor",
            AppKind::NetworkScanner => "Network Scanner",
            AppKind::PacketSniffer => "Packet Sniffer",
        }
    }

    /// Frame size for a fresh window of this kind
    pub fn default_size(self) -> Size {
        match self {
            AppKind::Terminal => Size::new(720.0, 440.0),
            AppKind::FileExplorer => Size::new(800.0, 520.0),
            AppKind::TextEditor => Size::new(760.0, 540.0),
            AppKind::Paint => Size::new(860.0, 600.0),
            AppKind::MusicPlayer => Size::new(420.0, 520.0),
            AppKind::VideoPlayer => Size::new(800.0, 500.0),
            AppKind::ImageViewer => Size::new(720.0, 540.0),
            AppKind::Browser => Size::new(960.0, 640.0),
            AppKind::Calculator => Size::new(320.0, 460.0),
            AppKind::Settings => Size::new(640.0, 480.0),
            AppKind::SystemMonitor => Size::new(640.0, 420.0),
            AppKind::NetworkScanner => Size::new(760.0, 480.0),
            AppKind::PacketSniffer => Size::new(860.0, 520.0),
        }
    }

    /// Singleton kinds keep at most one parameterless instance open
    pub fn is_singleton(self) -> bool {
        matches!(self, AppKind::Settings | AppKind::SystemMonitor)
    }
}
