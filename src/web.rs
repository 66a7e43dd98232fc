//! Browser binding
//!
//! Attaches the simulator to a button on the page. The button's own layout box
//! (which includes the transform we apply) is the geometry source, so the
//! push is always measured from where the button was last drawn.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent};

use crate::controller::EvasionController;
use crate::platform::AnimationFrameSource;
use crate::settings::{Settings, SmoothingConfig};
use crate::sim::EvasionSimulator;
use crate::target::{PresentationSink, SpringSmoother, TargetGeometry, TargetRect};

/// Element ids used when the module starts by itself
const DEFAULT_TARGET_ID: &str = "no-button";
const DEFAULT_ACCEPT_ID: &str = "yes-button";

type WebController = EvasionController<AnimationFrameSource, ButtonTarget>;

thread_local! {
    static AUTO_HANDLE: RefCell<Option<EvasionHandle>> = const { RefCell::new(None) };
}

fn js_error(msg: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(msg.as_ref()).into()
}

/// A DOM element used as the evading target
pub struct ButtonTarget {
    element: HtmlElement,
    smoother: SpringSmoother,
}

impl ButtonTarget {
    pub fn new(element: HtmlElement, smoothing: SmoothingConfig) -> Self {
        Self {
            element,
            smoother: SpringSmoother::new(smoothing),
        }
    }

    fn apply_transform(&self, translation: Vec2) {
        let value = format!("translate({:.2}px, {:.2}px)", translation.x, translation.y);
        if let Err(e) = self.element.style().set_property("transform", &value) {
            log::warn!("Failed to set transform: {:?}", e);
        }
    }
}

impl TargetGeometry for ButtonTarget {
    fn current_center(&self) -> Option<Vec2> {
        let rect = self.element.get_bounding_client_rect();
        let rect = TargetRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        rect.is_measured().then(|| rect.center())
    }
}

impl PresentationSink for ButtonTarget {
    fn present(&mut self, offset: Vec2) {
        self.smoother.set_target(offset);
    }

    fn advance(&mut self, dt: f32) {
        if self.smoother.is_at_rest() {
            return;
        }
        let translation = self.smoother.step(dt);
        self.apply_transform(translation);
    }
}

/// An event listener removed again on drop
struct EventBinding {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventBinding {
    fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Run `f` on the controller if it is still alive and not busy
fn with_controller(weak: &Weak<RefCell<WebController>>, f: impl FnOnce(&mut WebController)) {
    let Some(controller) = weak.upgrade() else {
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut c) => f(&mut c),
        Err(_) => log::warn!("Controller busy; dropping event"),
    };
}

/// Live binding between one button and the simulator.
///
/// Dropping it (or calling `teardown`) cancels the frame loop and removes
/// every listener it installed.
#[wasm_bindgen]
pub struct EvasionHandle {
    controller: Rc<RefCell<WebController>>,
    listeners: Vec<EventBinding>,
}

#[wasm_bindgen]
impl EvasionHandle {
    /// Attach to `target_id`; a click on `accept_id` (if given) freezes it.
    #[wasm_bindgen(constructor)]
    pub fn new(target_id: &str, accept_id: Option<String>) -> Result<EvasionHandle, JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let element: HtmlElement = document
            .get_element_by_id(target_id)
            .ok_or_else(|| js_error(format!("no element #{target_id}")))?
            .dyn_into()
            .map_err(|_| js_error(format!("#{target_id} is not an HTML element")))?;

        let settings = Settings::load();
        let simulator = EvasionSimulator::new(settings.sim).map_err(|e| js_error(e.to_string()))?;
        let target = ButtonTarget::new(element, settings.smoothing);

        let controller = Rc::new_cyclic(|weak: &Weak<RefCell<WebController>>| {
            let weak = weak.clone();
            let source = AnimationFrameSource::new(window.clone(), move |timestamp: f64| {
                with_controller(&weak, |c| {
                    c.on_frame(timestamp);
                });
            });
            RefCell::new(EvasionController::new(simulator, target, source))
        });

        let mut listeners = Vec::new();

        // Pointer position is tracked window-wide, not just over the button.
        // Leaving the page keeps the last position.
        {
            let weak = Rc::downgrade(&controller);
            listeners.push(EventBinding::new(&window, "mousemove", move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = (event.client_x() as f32, event.client_y() as f32);
                with_controller(&weak, |c| c.pointer_moved(x, y));
            })?);
        }

        if let Some(accept_id) = accept_id {
            match document.get_element_by_id(&accept_id) {
                Some(accept) => {
                    let weak = Rc::downgrade(&controller);
                    listeners.push(EventBinding::new(&accept, "click", move |_event: Event| {
                        with_controller(&weak, |c| {
                            if c.accept() {
                                log::info!("Accepted");
                            }
                        });
                    })?);
                }
                None => log::warn!("No accept element #{accept_id}; freeze only via accept()"),
            }
        }

        controller.borrow_mut().start();
        log::info!("Evasion attached to #{target_id}");

        Ok(Self {
            controller,
            listeners,
        })
    }

    /// Freeze the target where it is (idempotent)
    pub fn accept(&self) -> bool {
        self.controller.borrow_mut().accept()
    }

    #[wasm_bindgen(js_name = isFrozen)]
    pub fn is_frozen(&self) -> bool {
        self.controller.borrow().simulator().is_frozen()
    }

    /// Stop the frame loop and remove listeners
    pub fn teardown(&mut self) {
        self.controller.borrow_mut().teardown();
        self.listeners.clear();
    }
}

impl Drop for EvasionHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Evasive target starting...");

    let has_default_target = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(DEFAULT_TARGET_ID))
        .is_some();
    if !has_default_target {
        log::info!("No #{DEFAULT_TARGET_ID} on the page; waiting for EvasionHandle");
        return;
    }

    match EvasionHandle::new(DEFAULT_TARGET_ID, Some(DEFAULT_ACCEPT_ID.to_string())) {
        Ok(handle) => AUTO_HANDLE.with(|slot| *slot.borrow_mut() = Some(handle)),
        Err(e) => log::error!("Failed to attach: {:?}", e),
    }
}
