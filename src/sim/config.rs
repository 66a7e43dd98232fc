//! Simulation tuning
//!
//! Fixed for a session. Values are per frame, not per second.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Spring/repulsion tuning for the evading target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Hookean pull toward home (fraction of offset per frame)
    pub stiffness: f32,
    /// Multiplicative velocity damping applied once per frame, in (0, 1)
    pub friction: f32,
    /// Pointer distance (px) below which repulsion applies
    pub repel_radius: f32,
    /// Repulsion per pixel of intrusion into `repel_radius`
    pub repel_force: f32,
    /// Emission threshold on velocity; offset uses ten times this
    pub sleep_epsilon: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            stiffness: STIFFNESS,
            friction: FRICTION,
            repel_radius: REPEL_RADIUS,
            repel_force: REPEL_FORCE,
            sleep_epsilon: SLEEP_EPSILON,
        }
    }
}

impl SimConfig {
    /// Check every field is finite and in range.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("stiffness", self.stiffness),
            ("friction", self.friction),
            ("repel_radius", self.repel_radius),
            ("repel_force", self.repel_force),
            ("sleep_epsilon", self.sleep_epsilon),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!("{name} must be finite")));
        }
        if self.stiffness <= 0.0 {
            return Err(Error::InvalidConfig("stiffness must be > 0".into()));
        }
        if self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(Error::InvalidConfig("friction must be in (0, 1)".into()));
        }
        if self.repel_radius < 0.0 {
            return Err(Error::InvalidConfig("repel_radius must be >= 0".into()));
        }
        if self.repel_force < 0.0 {
            return Err(Error::InvalidConfig("repel_force must be >= 0".into()));
        }
        if self.sleep_epsilon <= 0.0 {
            return Err(Error::InvalidConfig("sleep_epsilon must be > 0".into()));
        }
        // Inside the radius the push stiffens the spring by repel_force
        let limit = self.stability_limit();
        if self.stiffness + self.repel_force >= limit {
            return Err(Error::InvalidConfig(format!(
                "stiffness + repel_force must be < {limit:.3} at friction {}",
                self.friction
            )));
        }
        Ok(())
    }

    /// Largest effective stiffness the damped per-frame step can take
    /// without growing: `2 * (1 + friction) / friction`.
    #[inline]
    pub fn stability_limit(&self) -> f32 {
        2.0 * (1.0 + self.friction) / self.friction
    }

    /// Offset threshold used by the emission gate
    #[inline]
    pub fn offset_epsilon(&self) -> f32 {
        self.sleep_epsilon * 10.0
    }
}
