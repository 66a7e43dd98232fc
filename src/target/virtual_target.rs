//! Headless target
//!
//! Stands in for a laid-out button when there is no DOM: the native demo and
//! tests use it. Its measured center includes the smoothed translation, so the
//! simulator sees the same closed loop it would see in a browser.

use glam::Vec2;

use super::{PresentationSink, SpringSmoother, TargetGeometry, TargetRect};
use crate::settings::SmoothingConfig;

#[derive(Debug, Clone)]
pub struct VirtualTarget {
    home: Option<TargetRect>,
    smoother: SpringSmoother,
    presented: u64,
}

impl VirtualTarget {
    /// A target that has not been laid out yet
    pub fn new(smoothing: SmoothingConfig) -> Self {
        Self {
            home: None,
            smoother: SpringSmoother::new(smoothing),
            presented: 0,
        }
    }

    /// A target already laid out at `home`
    pub fn laid_out(home: TargetRect, smoothing: SmoothingConfig) -> Self {
        let mut target = Self::new(smoothing);
        target.lay_out(home);
        target
    }

    /// Record the untranslated layout box
    pub fn lay_out(&mut self, home: TargetRect) {
        if home.is_measured() {
            self.home = Some(home);
        } else {
            log::debug!("Ignoring unmeasured layout {:?}", home);
        }
    }

    /// Where the target is drawn right now
    pub fn rendered_rect(&self) -> Option<TargetRect> {
        self.home.map(|r| r.translated(self.smoother.position()))
    }

    /// Translation currently applied
    pub fn translation(&self) -> Vec2 {
        self.smoother.position()
    }

    /// Last offset received from the simulator
    pub fn requested(&self) -> Vec2 {
        self.smoother.target()
    }

    /// Number of `present` calls received
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl TargetGeometry for VirtualTarget {
    fn current_center(&self) -> Option<Vec2> {
        self.rendered_rect().map(|r| r.center())
    }
}

impl PresentationSink for VirtualTarget {
    fn present(&mut self, offset: Vec2) {
        self.presented += 1;
        self.smoother.set_target(offset);
    }

    fn advance(&mut self, dt: f32) {
        self.smoother.step(dt);
    }
}
