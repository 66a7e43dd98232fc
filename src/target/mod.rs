//! Target boundary
//!
//! The simulator only needs two things from the outside world: where the
//! target currently is on screen, and somewhere to send new offsets.

pub mod rect;
pub mod smoothing;
pub mod virtual_target;

pub use rect::TargetRect;
pub use smoothing::SpringSmoother;
pub use virtual_target::VirtualTarget;

use glam::Vec2;

/// Reports the target's on-screen center.
///
/// The center reflects whatever was last rendered, including any translation
/// already applied. `None` until the target has been laid out.
pub trait TargetGeometry {
    fn current_center(&self) -> Option<Vec2>;
}

/// Consumes emitted offsets and renders them.
pub trait PresentationSink {
    /// A new offset from home to render toward.
    fn present(&mut self, offset: Vec2);

    /// Called once per frame so the sink can run its own interpolation.
    fn advance(&mut self, _dt: f32) {}
}

/// Something that is both measured and rendered (a button on a page).
pub trait TargetView: TargetGeometry + PresentationSink {}

impl<T: TargetGeometry + PresentationSink> TargetView for T {}

impl TargetGeometry for Option<Vec2> {
    fn current_center(&self) -> Option<Vec2> {
        *self
    }
}

impl TargetGeometry for Vec2 {
    fn current_center(&self) -> Option<Vec2> {
        Some(*self)
    }
}
