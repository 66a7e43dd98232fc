//! Simulation state types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether the simulator still reacts to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Integrating and emitting
    #[default]
    Active,
    /// Terminal: state is fixed and nothing is emitted
    Frozen,
}

/// Displacement from home and its per-frame velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleState {
    /// Offset from the home position (0, 0), in px
    pub offset: Vec2,
    /// Velocity in px per frame
    pub velocity: Vec2,
}

impl ParticleState {
    /// At home, not moving
    pub const REST: Self = Self {
        offset: Vec2::ZERO,
        velocity: Vec2::ZERO,
    };

    /// Create a state, rejecting NaN/infinite components.
    pub fn new(offset: Vec2, velocity: Vec2) -> Result<Self> {
        if !offset.is_finite() {
            return Err(Error::NonFinite("offset"));
        }
        if !velocity.is_finite() {
            return Err(Error::NonFinite("velocity"));
        }
        Ok(Self { offset, velocity })
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.offset.is_finite() && self.velocity.is_finite()
    }

    /// Emission gate: true when the change is large enough to render.
    ///
    /// Per-axis comparison; velocity against `epsilon`, offset against `10 * epsilon`.
    #[inline]
    pub fn is_observable(&self, epsilon: f32) -> bool {
        let offset_epsilon = epsilon * 10.0;
        self.velocity.x.abs() > epsilon
            || self.velocity.y.abs() > epsilon
            || self.offset.x.abs() > offset_epsilon
            || self.offset.y.abs() > offset_epsilon
    }
}
