//! Geometry types for window placement

mod size;
mod vec2;

pub use size::Size;
pub use vec2::Vec2;

/// Axis-aligned rectangle: a position plus a size
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub size: Size,
}

impl Rect {
    /// Create a rectangle
    #[inline]
    pub const fn new(position: Vec2, size: Size) -> Self {
        Self { position, size }
    }
}
