//! Evasion simulation module
//!
//! The physics lives here. This module stays pure:
//! - One integration step per frame, no timestep accumulator
//! - Inputs (pointer, target center) are read once per tick
//! - No rendering or platform dependencies

pub mod config;
pub mod forces;
pub mod state;
pub mod tick;

pub use config::SimConfig;
pub use forces::{repulsion_force, spring_force};
pub use state::{ParticleState, SimPhase};
pub use tick::{EvasionSimulator, TickStats};
