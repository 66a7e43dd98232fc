//! Self-rescheduling frame loop
//!
//! Each accepted frame requests the next one after its work is done, so the
//! loop runs at the display rate and stops by simply not asking again.
//! Stopping cancels whatever request is still outstanding.

use super::{FrameHandle, FrameSource};
use crate::consts::{MAX_FRAME_DT, NOMINAL_FRAME_DT};

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The simulator reached its terminal phase
    Frozen,
    /// The owning view went away
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped(StopReason),
}

/// What a frame body wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

pub struct FrameScheduler<S: FrameSource> {
    source: S,
    state: SchedulerState,
    pending: Option<FrameHandle>,
    last_timestamp: Option<f64>,
    frames: u64,
}

impl<S: FrameSource> FrameScheduler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: SchedulerState::Idle,
            pending: None,
            last_timestamp: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Outstanding request, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Idle -> Running. Returns false if already running or stopped.
    pub fn start(&mut self) -> bool {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::Running;
                self.request_next();
                log::info!("Frame loop started");
                true
            }
            SchedulerState::Running => false,
            SchedulerState::Stopped(reason) => {
                log::warn!("Frame loop already stopped ({:?}); not restarting", reason);
                false
            }
        }
    }

    /// Run one fired frame.
    ///
    /// `body` gets the frame time in seconds. The next frame is requested
    /// after it returns, unless it asked to stop. Frames that arrive when
    /// nothing was requested, or after stopping, are ignored and return false.
    pub fn run_frame<F>(&mut self, timestamp_ms: f64, body: F) -> bool
    where
        F: FnOnce(f32) -> FrameControl,
    {
        if self.pending.take().is_none() || !self.is_running() {
            log::debug!("Ignoring unrequested frame at {timestamp_ms:.1}ms");
            return false;
        }

        let dt = match self.last_timestamp {
            Some(prev) => (((timestamp_ms - prev) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => NOMINAL_FRAME_DT,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.frames += 1;

        match body(dt) {
            FrameControl::Continue => self.request_next(),
            FrameControl::Stop => {
                self.stop(StopReason::Frozen);
            }
        }
        true
    }

    /// Running/Idle -> Stopped, cancelling any outstanding request.
    ///
    /// Returns false if already stopped.
    pub fn stop(&mut self, reason: StopReason) -> bool {
        if let SchedulerState::Stopped(_) = self.state {
            return false;
        }
        if let Some(handle) = self.pending.take() {
            self.source.cancel_frame(handle);
        }
        self.state = SchedulerState::Stopped(reason);
        log::info!("Frame loop stopped ({:?}) after {} frames", reason, self.frames);
        true
    }

    fn request_next(&mut self) {
        self.pending = self.source.request_frame();
        if self.pending.is_none() {
            log::error!("Frame request refused; loop stalled");
        }
    }
}

impl<S: FrameSource> Drop for FrameScheduler<S> {
    fn drop(&mut self) {
        self.stop(StopReason::Teardown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualFrameSource;

    fn fire(scheduler: &mut FrameScheduler<ManualFrameSource>) -> bool {
        scheduler.source_mut().fire().is_some()
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.source().pending().is_empty());

        assert!(scheduler.start());
        assert!(!scheduler.start());
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert_eq!(scheduler.source().pending().len(), 1);
    }

    #[test]
    fn test_each_frame_requests_exactly_one_more() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        scheduler.start();

        for i in 0..5 {
            assert!(fire(&mut scheduler));
            let mut ran = false;
            assert!(scheduler.run_frame(i as f64 * 16.0, |_| {
                ran = true;
                FrameControl::Continue
            }));
            assert!(ran);
            assert_eq!(scheduler.source().pending().len(), 1);
        }
        assert_eq!(scheduler.frames(), 5);
        assert_eq!(scheduler.source().requested(), 6);
    }

    #[test]
    fn test_dt_from_timestamps() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        scheduler.start();

        let mut seen = Vec::new();
        for ts in [1000.0, 1016.0, 1050.0, 5000.0] {
            fire(&mut scheduler);
            scheduler.run_frame(ts, |dt| {
                seen.push(dt);
                FrameControl::Continue
            });
        }
        assert!((seen[0] - NOMINAL_FRAME_DT).abs() < 1e-6);
        assert!((seen[1] - 0.016).abs() < 1e-6);
        assert!((seen[2] - 0.034).abs() < 1e-6);
        // Long gap (hidden tab) is clamped
        assert_eq!(seen[3], MAX_FRAME_DT);
    }

    #[test]
    fn test_body_stop_ends_loop_without_new_request() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        scheduler.start();
        fire(&mut scheduler);
        scheduler.run_frame(0.0, |_| FrameControl::Stop);

        assert_eq!(scheduler.state(), SchedulerState::Stopped(StopReason::Frozen));
        assert!(scheduler.source().pending().is_empty());
        assert_eq!(scheduler.source().requested(), 1);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        scheduler.start();
        let handle = scheduler.pending().unwrap();

        assert!(scheduler.stop(StopReason::Teardown));
        assert!(!scheduler.stop(StopReason::Frozen));
        assert_eq!(scheduler.state(), SchedulerState::Stopped(StopReason::Teardown));
        assert!(scheduler.source().pending().is_empty());
        assert_eq!(scheduler.source().cancelled(), &[handle]);
    }

    #[test]
    fn test_frames_after_stop_are_ignored() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        scheduler.start();
        scheduler.stop(StopReason::Frozen);

        let mut ran = false;
        assert!(!scheduler.run_frame(16.0, |_| {
            ran = true;
            FrameControl::Continue
        }));
        assert!(!ran);
        assert!(!scheduler.start());
    }

    #[test]
    fn test_unrequested_frame_ignored() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        let mut ran = false;
        assert!(!scheduler.run_frame(0.0, |_| {
            ran = true;
            FrameControl::Continue
        }));
        assert!(!ran);
    }

    #[test]
    fn test_stop_before_start() {
        let mut scheduler = FrameScheduler::new(ManualFrameSource::new());
        assert!(scheduler.stop(StopReason::Teardown));
        assert!(!scheduler.start());
        assert_eq!(scheduler.source().requested(), 0);
    }
}
