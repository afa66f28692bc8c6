use std::cell::RefCell;
use std::rc::Rc;

use drift_core::{Effect, EffectConfig, EffectError, FrameBuffer, Host, ImageData};
use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement, MouseEvent, Window,
};

type SharedEffect = Rc<RefCell<Option<Effect<CanvasHost>>>>;
/// The animation-frame closure, shared between the host that schedules it
/// and the handle that eventually releases it.
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type Listener = Closure<dyn FnMut(Event)>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Canvas-backed host: `requestAnimationFrame` scheduling, `putImageData`
/// presentation and `performance.now()` as the clock.
struct CanvasHost {
    window: Window,
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
    callback: FrameCallback,
    pending: Option<i32>,
}

impl Host for CanvasHost {
    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn request_frame(&mut self) -> Result<(), EffectError> {
        let callback = self.callback.borrow();
        let closure = callback
            .as_ref()
            .ok_or_else(|| EffectError::Host("frame callback already released".into()))?;
        let id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(host_error)?;
        self.pending = Some(id);
        Ok(())
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), EffectError> {
        let context = self
            .context
            .as_ref()
            .ok_or_else(|| EffectError::Host("canvas context released".into()))?;
        let image = web_sys::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(frame.as_bytes()),
            frame.width(),
            frame.height(),
        )
        .map_err(host_error)?;
        context.put_image_data(&image, 0.0, 0.0).map_err(host_error)
    }

    fn release(&mut self) {
        if let Some(context) = self.context.take() {
            context.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }
    }
}

/// Particle effect bound to a canvas and the image it dissolves.
#[wasm_bindgen]
pub struct ParticleImage {
    canvas: HtmlCanvasElement,
    image: HtmlImageElement,
    effect: SharedEffect,
    callback: FrameCallback,
    listeners: Vec<(&'static str, Listener)>,
    onload: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleImage {
    /// Start the effect on `canvas` using the pixels of `image`.
    ///
    /// `config_json` is an optional JSON object of options layered over the
    /// defaults. If the image has not finished decoding, the particle field
    /// is built when its `load` event fires.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        image: HtmlImageElement,
        config_json: Option<String>,
    ) -> Result<ParticleImage, JsError> {
        let config = match config_json.as_deref() {
            Some(json) => EffectConfig::from_json(json)?,
            None => EffectConfig::default(),
        };

        let effect: SharedEffect = Rc::new(RefCell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        {
            let effect = effect.clone();
            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let mut slot = effect.borrow_mut();
                if let Some(running) = slot.as_mut() {
                    if let Err(err) = running.tick() {
                        log::error!("particle frame failed, stopping: {err}");
                        running.stop();
                    }
                }
            }) as Box<dyn FnMut()>));
        }

        let mut handle = ParticleImage {
            canvas,
            image,
            effect,
            callback,
            listeners: Vec::new(),
            onload: None,
        };
        handle.attach_pointer_listeners()?;

        if handle.image.complete() && handle.image.natural_width() > 0 {
            launch(
                &handle.canvas,
                &handle.image,
                config,
                &handle.effect,
                &handle.callback,
            )?;
        } else {
            log::debug!("image not decoded yet, deferring particle build to its load event");
            let canvas = handle.canvas.clone();
            let image = handle.image.clone();
            let effect = handle.effect.clone();
            let callback = handle.callback.clone();
            let onload = Closure::wrap(Box::new(move || {
                if effect.borrow().is_some() {
                    return;
                }
                if let Err(err) = launch(&canvas, &image, config.clone(), &effect, &callback) {
                    log::error!("particle build failed: {err}");
                }
            }) as Box<dyn FnMut()>);
            handle
                .image
                .add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())
                .map_err(host_error)?;
            handle.onload = Some(onload);
        }

        Ok(handle)
    }

    /// Halt the animation loop, detach listeners and release the canvas.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        let effect = self.effect.borrow_mut().take();
        if let Some(mut effect) = effect {
            effect.stop();
        }
        self.callback.borrow_mut().take();

        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        if let Some(onload) = self.onload.take() {
            let _ = self
                .image
                .remove_event_listener_with_callback("load", onload.as_ref().unchecked_ref());
        }
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.effect
            .borrow()
            .as_ref()
            .is_some_and(|effect| effect.is_running())
    }
}

impl ParticleImage {
    fn attach_pointer_listeners(&mut self) -> Result<(), EffectError> {
        let handlers: [(&'static str, fn(&mut Effect<CanvasHost>, Option<Vec2>)); 3] = [
            ("pointermove", |effect, at| {
                if let Some(at) = at {
                    effect.pointer_moved(at);
                }
            }),
            ("pointerleave", |effect, _| effect.pointer_left()),
            ("click", |effect, at| {
                if let Some(at) = at {
                    effect.clicked(at);
                }
            }),
        ];

        for (name, handler) in handlers {
            let canvas = self.canvas.clone();
            let effect = self.effect.clone();
            let listener = Closure::wrap(Box::new(move |event: Event| {
                let at = event
                    .dyn_ref::<MouseEvent>()
                    .and_then(|mouse| to_simulation(&canvas, mouse));
                if let Some(running) = effect.borrow_mut().as_mut() {
                    handler(running, at);
                }
            }) as Box<dyn FnMut(Event)>);
            self.canvas
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                .map_err(host_error)?;
            self.listeners.push((name, listener));
        }
        Ok(())
    }
}

impl Drop for ParticleImage {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read the decoded pixels of `image`, size the canvas to match and start
/// the effect.
fn launch(
    canvas: &HtmlCanvasElement,
    image: &HtmlImageElement,
    config: EffectConfig,
    effect: &SharedEffect,
    callback: &FrameCallback,
) -> Result<(), EffectError> {
    let window = web_sys::window().ok_or_else(|| EffectError::Host("no window".into()))?;
    let (width, height) = (image.natural_width(), image.natural_height());
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(host_error)?
        .ok_or_else(|| EffectError::Host("2d canvas context unavailable".into()))?
        .dyn_into()
        .map_err(|_| EffectError::Host("unexpected canvas context type".into()))?;

    context
        .draw_image_with_html_image_element(image, 0.0, 0.0)
        .map_err(host_error)?;
    let pixels = context
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(host_error)?
        .data()
        .0;
    context.clear_rect(0.0, 0.0, width as f64, height as f64);

    let source = ImageData::new(width, height, pixels)?;
    let host = CanvasHost {
        window,
        canvas: canvas.clone(),
        context: Some(context),
        callback: callback.clone(),
        pending: None,
    };
    let started = Effect::start(&source, config, host)?;
    *effect.borrow_mut() = Some(started);
    Ok(())
}

/// Map client coordinates onto the canvas' pixel grid, which is the
/// simulation space.
fn to_simulation(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let scale_x = canvas.width() as f64 / rect.width();
    let scale_y = canvas.height() as f64 / rect.height();
    Some(Vec2::new(
        ((event.client_x() as f64 - rect.left()) * scale_x) as f32,
        ((event.client_y() as f64 - rect.top()) * scale_y) as f32,
    ))
}

fn host_error(err: JsValue) -> EffectError {
    EffectError::Host(format!("{err:?}"))
}
