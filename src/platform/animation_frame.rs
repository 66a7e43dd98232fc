//! `requestAnimationFrame` frame source

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameHandle, FrameSource};

/// Schedules one long-lived callback through the browser's frame clock.
///
/// The callback is created once and reused for every request; dropping the
/// source releases it, so cancel any outstanding request first (the
/// scheduler does this when it stops).
pub struct AnimationFrameSource {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrameSource {
    /// `on_frame` receives the frame timestamp in milliseconds.
    pub fn new(window: web_sys::Window, on_frame: impl FnMut(f64) + 'static) -> Self {
        Self {
            window,
            callback: Closure::<dyn FnMut(f64)>::new(on_frame),
        }
    }
}

impl FrameSource for AnimationFrameSource {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, e);
        }
    }
}
