//! Platform abstraction layer
//!
//! Frame timing differs per platform:
//! - Web: `requestAnimationFrame`, which follows the display refresh and
//!   pauses in hidden tabs
//! - Native/tests: frames fire only when the caller pumps them

#[cfg(target_arch = "wasm32")]
pub mod animation_frame;
pub mod scheduler;

#[cfg(target_arch = "wasm32")]
pub use animation_frame::AnimationFrameSource;
pub use scheduler::{FrameControl, FrameScheduler, SchedulerState, StopReason};

/// Identifies one outstanding frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// One-shot "call me at the next refresh" primitive.
///
/// A request fires at most once. Cancelling a handle that already fired is
/// harmless.
pub trait FrameSource {
    /// Ask for one callback at the next refresh. `None` if the platform refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Frame source driven by hand
///
/// Records every request and cancellation so callers can check that nothing
/// is left scheduled.
#[derive(Debug, Default)]
pub struct ManualFrameSource {
    next_id: i32,
    pending: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
    requested: u64,
}

impl ManualFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the oldest outstanding request, as the display would.
    ///
    /// The caller then runs the frame (e.g. `EvasionController::on_frame`).
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Requests not yet fired or cancelled
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Total requests ever made
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl FrameSource for ManualFrameSource {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(i) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(i);
            self.cancelled.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_source_fires_in_order() {
        let mut source = ManualFrameSource::new();
        let a = source.request_frame().unwrap();
        let b = source.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(source.fire(), Some(a));
        assert_eq!(source.fire(), Some(b));
        assert_eq!(source.fire(), None);
        assert_eq!(source.requested(), 2);
    }

    #[test]
    fn test_manual_source_cancel() {
        let mut source = ManualFrameSource::new();
        let a = source.request_frame().unwrap();
        source.cancel_frame(a);
        assert!(source.pending().is_empty());
        assert_eq!(source.cancelled(), &[a]);

        // Already gone: no double bookkeeping
        source.cancel_frame(a);
        assert_eq!(source.cancelled().len(), 1);
        assert_eq!(source.fire(), None);
    }
}
