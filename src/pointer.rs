//! Pointer tracking
//!
//! Keeps only the latest pointer position. Events may arrive faster than
//! frames; older samples are simply overwritten.

use glam::Vec2;

use crate::consts::POINTER_SENTINEL;

/// Latest pointer position in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
}

impl Default for PointerSample {
    fn default() -> Self {
        Self::SENTINEL
    }
}

impl PointerSample {
    /// Far outside any viewport, so no repulsion is computed before the first event.
    pub const SENTINEL: Self = Self {
        position: Vec2::splat(POINTER_SENTINEL),
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }

    /// True until a real pointer event has been recorded
    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

/// Records pointer-move events, last write wins
#[derive(Debug, Default)]
pub struct PointerTracker {
    sample: PointerSample,
    events: u64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the sample. Non-finite coordinates are dropped.
    pub fn record(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            log::debug!("Ignoring non-finite pointer sample ({x}, {y})");
            return;
        }
        self.sample = PointerSample::new(x, y);
        self.events += 1;
    }

    /// Snapshot for the current tick
    #[inline]
    pub fn sample(&self) -> &PointerSample {
        &self.sample
    }

    /// Number of samples recorded so far
    pub fn events(&self) -> u64 {
        self.events
    }
}
