//! Evasive Target - a control that runs away from the pointer
//!
//! Core modules:
//! - `sim`: Spring/repulsion integrator (pure, frame-stepped)
//! - `pointer`: Latest pointer sample
//! - `target`: Target geometry and presentation boundary
//! - `platform`: Frame scheduling (requestAnimationFrame on web, manual pump elsewhere)
//! - `controller`: Owns the pieces above and runs one frame at a time
//! - `settings`: Data-driven tuning

pub mod controller;
pub mod error;
pub mod platform;
pub mod pointer;
pub mod settings;
pub mod sim;
pub mod target;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::EvasionController;
pub use error::{Error, Result};
pub use pointer::{PointerSample, PointerTracker};
pub use settings::{Settings, SmoothingConfig};
pub use sim::{EvasionSimulator, ParticleState, SimConfig, SimPhase};

/// Tuning constants
pub mod consts {
    /// Spring pull back toward home, per frame
    pub const STIFFNESS: f32 = 0.05;
    /// Velocity kept after each frame (damping)
    pub const FRICTION: f32 = 0.85;
    /// Pointer distance (px) inside which the target is pushed away
    pub const REPEL_RADIUS: f32 = 150.0;
    /// Push strength per pixel of intrusion into the radius
    pub const REPEL_FORCE: f32 = 2.0;
    /// Velocity threshold below which updates are suppressed; offset uses 10x this
    pub const SLEEP_EPSILON: f32 = 0.01;

    /// Pointer position before any pointer event: far outside the viewport
    pub const POINTER_SENTINEL: f32 = -9999.0;

    /// Presentation spring (the secondary smoothing layer)
    pub const SMOOTHING_STIFFNESS: f32 = 600.0;
    pub const SMOOTHING_DAMPING: f32 = 25.0;
    pub const SMOOTHING_MASS: f32 = 1.0;
    /// Largest integration step used by the presentation spring
    pub const SMOOTHING_MAX_STEP: f32 = 1.0 / 240.0;
    /// Distance and speed below which the presentation spring is at rest
    pub const SMOOTHING_REST: f32 = 0.01;

    /// Nominal frame time used for the first frame
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame time passed on (tab switches produce huge gaps)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
