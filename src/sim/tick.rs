//! Per-frame simulation step
//!
//! One call per display refresh. The step is deliberately frame-rate
//! dependent: forces are per-frame velocity changes and there is no
//! accumulator.

use glam::Vec2;

use super::config::SimConfig;
use super::forces::{repulsion_force, spring_force};
use super::state::{ParticleState, SimPhase};
use crate::error::Result;
use crate::pointer::PointerSample;
use crate::target::TargetGeometry;

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Ticks that integrated (Active phase)
    pub ticks: u64,
    /// Ticks whose offset passed the emission gate
    pub emitted: u64,
    /// Ticks that integrated but stayed under the gate
    pub suppressed: u64,
    /// Ticks discarded because integration produced NaN/infinity
    pub recovered: u64,
    /// Most recent frame time hint (seconds)
    pub last_dt: f32,
}

/// Owns the particle and advances it against the pointer
#[derive(Debug, Clone)]
pub struct EvasionSimulator {
    config: SimConfig,
    state: ParticleState,
    phase: SimPhase,
    stats: TickStats,
}

impl EvasionSimulator {
    /// Start at home, at rest
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_state(config, ParticleState::REST)
    }

    /// Start from an arbitrary finite state
    pub fn with_state(config: SimConfig, state: ParticleState) -> Result<Self> {
        config.validate()?;
        let state = ParticleState::new(state.offset, state.velocity)?;
        Ok(Self {
            config,
            state,
            phase: SimPhase::Active,
            stats: TickStats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_frozen(&self) -> bool {
        self.phase == SimPhase::Frozen
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// True when another tick from here would not be worth rendering
    pub fn is_settled(&self) -> bool {
        !self.state.is_observable(self.config.sleep_epsilon)
    }

    /// Stop reacting for good. Returns false if already frozen.
    pub fn freeze(&mut self) -> bool {
        if self.is_frozen() {
            return false;
        }
        self.phase = SimPhase::Frozen;
        log::info!(
            "Simulator frozen at offset ({:.2}, {:.2}) after {} ticks",
            self.state.offset.x,
            self.state.offset.y,
            self.stats.ticks
        );
        true
    }

    /// Advance one frame.
    ///
    /// `pointer` and `geometry` are each read once. The geometry is the
    /// target's last rendered position, so the push is measured from where the
    /// target was drawn, not where the simulation has it now.
    ///
    /// Returns the new offset when it is worth rendering, `None` otherwise
    /// (settled, frozen, or the step was discarded as non-finite).
    pub fn tick<G>(&mut self, pointer: &PointerSample, geometry: &G, dt_hint: f32) -> Option<Vec2>
    where
        G: TargetGeometry + ?Sized,
    {
        if self.is_frozen() {
            return None;
        }

        self.stats.ticks += 1;
        self.stats.last_dt = dt_hint;

        let config = &self.config;
        let spring = spring_force(self.state.offset, config.stiffness);
        let repel = match geometry.current_center() {
            Some(center) if !center.is_finite() || !pointer.position.is_finite() => {
                log::warn!(
                    "Skipping repulsion: non-finite center {:?} or pointer {:?}",
                    center,
                    pointer.position
                );
                Vec2::ZERO
            }
            Some(center) => repulsion_force(
                center,
                pointer.position,
                config.repel_radius,
                config.repel_force,
            ),
            None => Vec2::ZERO,
        };

        let mut next = self.state;
        next.velocity += spring + repel;
        next.velocity *= config.friction;
        next.offset += next.velocity;

        if !next.is_finite() {
            self.stats.recovered += 1;
            log::warn!(
                "Discarding non-finite step (spring {:?}, repel {:?}); keeping last state",
                spring,
                repel
            );
            return None;
        }

        self.state = next;

        if self.state.is_observable(config.sleep_epsilon) {
            self.stats.emitted += 1;
            log::trace!(
                "tick {}: offset ({:.2}, {:.2}) vel ({:.2}, {:.2})",
                self.stats.ticks,
                next.offset.x,
                next.offset.y,
                next.velocity.x,
                next.velocity.y
            );
            Some(self.state.offset)
        } else {
            self.stats.suppressed += 1;
            None
        }
    }
}
