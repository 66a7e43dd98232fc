//! Presentation spring
//!
//! The renderer does not jump to each emitted offset. It chases it with a
//! time-based damped spring, independent of the simulator's own damping.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, SMOOTHING_MAX_STEP, SMOOTHING_REST};
use crate::settings::SmoothingConfig;

/// Damped spring that follows a moving target (unit: px, seconds)
#[derive(Debug, Clone)]
pub struct SpringSmoother {
    config: SmoothingConfig,
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
}

impl SpringSmoother {
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            config,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Currently rendered value
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_at_rest(&self) -> bool {
        self.position == self.target && self.velocity == Vec2::ZERO
    }

    /// Advance by `dt` seconds and return the new position.
    ///
    /// Large frames are split so the spring stays stable at low frame rates.
    /// `dt` is capped at `MAX_FRAME_DT`, which bounds the sub-step count.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        if self.is_at_rest() || dt.is_nan() || dt <= 0.0 {
            return self.position;
        }

        let dt = dt.min(MAX_FRAME_DT);
        let substeps = (dt / SMOOTHING_MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        let SmoothingConfig {
            stiffness,
            damping,
            mass,
        } = self.config;

        for _ in 0..substeps {
            let stretch = self.position - self.target;
            let accel = (-stretch * stiffness - self.velocity * damping) / mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
        }

        if !self.position.is_finite() || !self.velocity.is_finite() {
            log::warn!("Presentation spring diverged, snapping to target");
            self.snap();
        } else if self.position.distance(self.target) < SMOOTHING_REST
            && self.velocity.length() < SMOOTHING_REST
        {
            self.snap();
        }

        self.position
    }

    /// Jump straight to the target and stop
    pub fn snap(&mut self) {
        self.position = self.target;
        self.velocity = Vec2::ZERO;
    }
}
