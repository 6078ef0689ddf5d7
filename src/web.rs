//! Browser binding: drives a [`Controller`] from `requestAnimationFrame` and
//! the window `resize` event.
//!
//! The callbacks hold only a weak reference to the shared state, so dropping
//! or stopping the [`ParticleNetwork`] handle is enough to end the loop; no
//! callback can reach the controller or the canvas afterwards.

use crate::canvas::CanvasSurface;
use crate::config::NetworkOptions;
use crate::controller::Controller;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

struct Shared {
    window: Option<Window>,
    controller: RefCell<Controller<CanvasSurface>>,
    frame_handle: Cell<Option<i32>>,
    on_frame: RefCell<Option<Closure<dyn FnMut()>>>,
    on_resize: RefCell<Option<Closure<dyn FnMut()>>>,
    // Set when the canvas was created by `mount` and must be removed on stop
    owned_canvas: Option<HtmlCanvasElement>,
}

impl Shared {
    fn viewport_size(&self) -> (u32, u32) {
        let window = match self.window.as_ref() {
            Some(window) => window,
            None => return (0, 0),
        };
        let dimension = |value: Result<JsValue, JsValue>| {
            value
                .ok()
                .and_then(|v| v.as_f64())
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| v as u32)
                .unwrap_or(0)
        };
        (
            dimension(window.inner_width()),
            dimension(window.inner_height()),
        )
    }

    fn schedule_frame(&self) {
        let on_frame = self.on_frame.borrow();
        let (window, callback) = match (self.window.as_ref(), on_frame.as_ref()) {
            (Some(window), Some(callback)) => (window, callback),
            _ => return,
        };
        match window
            .request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
        {
            Ok(handle) => self.frame_handle.set(Some(handle)),
            Err(err) => log::warn!("particle network: requestAnimationFrame failed: {:?}", err),
        }
    }

    fn frame(&self) {
        self.frame_handle.set(None);
        let running = {
            let mut controller = self.controller.borrow_mut();
            controller.tick();
            controller.is_running()
        };
        if running {
            self.schedule_frame();
        }
    }

    fn resize(&self) {
        let (width, height) = self.viewport_size();
        self.controller.borrow_mut().resize(width, height);
    }

    fn stop(&self) {
        self.controller.borrow_mut().teardown();

        if let Some(window) = self.window.as_ref() {
            if let Some(handle) = self.frame_handle.take() {
                if let Err(err) = window.cancel_animation_frame(handle) {
                    log::warn!("particle network: cancelAnimationFrame failed: {:?}", err);
                }
            }
            if let Some(on_resize) = self.on_resize.borrow_mut().take() {
                let callback = on_resize.as_ref().unchecked_ref::<js_sys::Function>();
                if let Err(err) = window.remove_event_listener_with_callback("resize", callback) {
                    log::warn!("particle network: removing resize listener failed: {:?}", err);
                }
            }
        }
        self.on_frame.borrow_mut().take();

        if let Some(canvas) = self.owned_canvas.as_ref() {
            canvas.remove();
        }
    }
}

/// Animated particle network drawn into a canvas behind the page.
///
/// Nothing here throws into the page except invalid `with_options` JSON: a
/// missing window, document or 2d context leaves the network idle.
///
/// ```js
/// const network = ParticleNetwork.mount(isDark);
/// network.start();
/// // on theme change
/// network.set_dark_mode(!isDark);
/// // on unmount
/// network.stop();
/// ```
#[wasm_bindgen]
pub struct ParticleNetwork {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl ParticleNetwork {
    /// Draws into an existing canvas with the default look.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dark_mode: bool) -> ParticleNetwork {
        ParticleNetwork::build(Some(canvas), NetworkOptions::default(), dark_mode, false)
    }

    /// Like `new`, with tunables given as a JSON object string.
    pub fn with_options(
        canvas: HtmlCanvasElement,
        dark_mode: bool,
        options: &str,
    ) -> Result<ParticleNetwork, JsValue> {
        let options = NetworkOptions::from_json(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(ParticleNetwork::build(Some(canvas), options, dark_mode, false))
    }

    /// Creates a backdrop canvas as the first child of `<body>`. The canvas is
    /// removed again by `stop`.
    pub fn mount(dark_mode: bool) -> ParticleNetwork {
        let canvas = match create_backdrop_canvas() {
            Ok(canvas) => Some(canvas),
            Err(err) => {
                log::warn!("particle network: cannot create backdrop canvas: {:?}", err);
                None
            }
        };
        ParticleNetwork::build(canvas, NetworkOptions::default(), dark_mode, true)
    }

    /// Sizes the canvas to the window, seeds the particles, subscribes to
    /// resize and starts the frame loop. Does nothing once started or stopped.
    pub fn start(&self) {
        let (width, height) = self.shared.viewport_size();
        let newly_running = {
            let mut controller = self.shared.controller.borrow_mut();
            let was_running = controller.is_running();
            controller.activate(width, height) && !was_running
        };
        if !newly_running {
            return;
        }

        if let Some(window) = self.shared.window.as_ref() {
            let weak: Weak<Shared> = Rc::downgrade(&self.shared);
            let on_resize = Closure::<dyn FnMut()>::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.resize();
                }
            });
            let callback = on_resize.as_ref().unchecked_ref::<js_sys::Function>();
            match window.add_event_listener_with_callback("resize", callback) {
                Ok(()) => *self.shared.on_resize.borrow_mut() = Some(on_resize),
                Err(err) => log::warn!("particle network: resize listener not added: {:?}", err),
            }
        }

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let on_frame = Closure::<dyn FnMut()>::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.frame();
            }
        });
        *self.shared.on_frame.borrow_mut() = Some(on_frame);

        // First frame is drawn synchronously, the rest on display refresh
        self.shared.frame();
    }

    /// Takes effect on the next frame without reseeding.
    pub fn set_dark_mode(&self, dark_mode: bool) {
        self.shared.controller.borrow_mut().set_dark_mode(dark_mode);
    }

    /// Cancels the pending frame and the resize subscription. Idempotent.
    pub fn stop(&self) {
        self.shared.stop();
    }

    pub fn is_running(&self) -> bool {
        self.shared.controller.borrow().is_running()
    }

    pub fn frames(&self) -> f64 {
        self.shared.controller.borrow().frames() as f64
    }

    pub fn particle_count(&self) -> usize {
        self.shared.controller.borrow().particles().len()
    }

    pub fn width(&self) -> u32 {
        self.shared.controller.borrow().viewport().width
    }

    pub fn height(&self) -> u32 {
        self.shared.controller.borrow().viewport().height
    }
}

impl ParticleNetwork {
    fn build(
        canvas: Option<HtmlCanvasElement>,
        options: NetworkOptions,
        dark_mode: bool,
        owned: bool,
    ) -> ParticleNetwork {
        let window = web_sys::window();
        if window.is_none() {
            log::warn!("particle network: no window, frames will not be scheduled");
        }
        let owned_canvas = if owned { canvas.clone() } else { None };
        let surface = canvas.and_then(|canvas| match CanvasSurface::new(canvas) {
            Ok(surface) => Some(surface),
            Err(err) => {
                log::warn!("particle network: no drawing surface: {:?}", err);
                None
            }
        });
        if let Some(surface) = surface.as_ref() {
            if let Err(err) = surface.apply_backdrop_style() {
                log::warn!("particle network: backdrop style not applied: {:?}", err);
            }
        }

        let shared = Shared {
            window,
            controller: RefCell::new(Controller::new(surface, options, dark_mode)),
            frame_handle: Cell::new(None),
            on_frame: RefCell::new(None),
            on_resize: RefCell::new(None),
            owned_canvas,
        };
        ParticleNetwork {
            shared: Rc::new(shared),
        }
    }
}

fn create_backdrop_canvas() -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    body.prepend_with_node_1(&canvas)?;
    Ok(canvas)
}

impl Drop for ParticleNetwork {
    fn drop(&mut self) {
        self.shared.stop();
    }
}
