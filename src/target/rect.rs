use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Same rect moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.left + offset.x, self.top + offset.y, self.width, self.height)
    }

    /// A rect with no area has not been laid out yet
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.left.is_finite() && self.top.is_finite()
    }
}
