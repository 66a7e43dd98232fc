//! View controller
//!
//! Owns everything one evading control needs: the simulator, the pointer
//! sample, the target (measured and rendered), and the frame loop. All of it
//! is driven from one thread; nothing here is shared.

use crate::error::Result;
use crate::platform::{FrameControl, FrameScheduler, FrameSource, StopReason};
use crate::pointer::PointerTracker;
use crate::settings::Settings;
use crate::sim::EvasionSimulator;
use crate::target::TargetView;

pub struct EvasionController<S: FrameSource, T: TargetView> {
    simulator: EvasionSimulator,
    pointer: PointerTracker,
    target: T,
    scheduler: FrameScheduler<S>,
}

impl<S: FrameSource, T: TargetView> EvasionController<S, T> {
    pub fn new(simulator: EvasionSimulator, target: T, source: S) -> Self {
        Self {
            simulator,
            pointer: PointerTracker::new(),
            target,
            scheduler: FrameScheduler::new(source),
        }
    }

    pub fn from_settings(settings: &Settings, target: T, source: S) -> Result<Self> {
        settings.validate()?;
        let simulator = EvasionSimulator::new(settings.sim)?;
        Ok(Self::new(simulator, target, source))
    }

    /// Begin requesting frames
    pub fn start(&mut self) -> bool {
        if self.simulator.is_frozen() {
            return false;
        }
        self.scheduler.start()
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.record(x, y);
    }

    /// Run one fired frame: tick, present any emission, let the target
    /// interpolate. Returns false if the frame was not accepted.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> bool {
        let Self {
            simulator,
            pointer,
            target,
            scheduler,
        } = self;

        scheduler.run_frame(timestamp_ms, |dt| {
            if simulator.is_frozen() {
                return FrameControl::Stop;
            }
            if let Some(offset) = simulator.tick(pointer.sample(), &*target, dt) {
                target.present(offset);
            }
            target.advance(dt);
            FrameControl::Continue
        })
    }

    /// The user gave in: freeze the target where it is and stop the loop.
    ///
    /// Returns false if already accepted.
    pub fn accept(&mut self) -> bool {
        let froze = self.simulator.freeze();
        self.scheduler.stop(StopReason::Frozen);
        froze
    }

    /// The view is going away
    pub fn teardown(&mut self) {
        self.scheduler.stop(StopReason::Teardown);
    }

    pub fn simulator(&self) -> &EvasionSimulator {
        &self.simulator
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn scheduler(&self) -> &FrameScheduler<S> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler<S> {
        &mut self.scheduler
    }
}
