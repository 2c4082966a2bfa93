//! Browser entry point.
//!
//! [`start`] renders into a page canvas, listens for wheel, touch and resize
//! events on `window`, and drives every `.headings` element's
//! `translateY` from the heading tween on each animation frame.
//!
//! ```js
//! import init, { start } from "./pkg/orrery.js";
//! await init();
//! await start("canvas");
//! // or, with texture paths that match the site layout:
//! await start("canvas", '[assets]\nbackground = "/static/stars.jpg"');
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};
use web_time::Instant;

use crate::error::OrreryError;
use crate::input::GestureEvent;
use crate::options::Options;
use crate::OrreryEngine;

/// Elements whose vertical offset follows the heading tween.
const HEADINGS_SELECTOR: &str = ".headings";

type SharedEngine = Rc<RefCell<OrreryEngine>>;

/// Start the carousel on the canvas matching `canvas_selector`.
///
/// `options_toml` overrides the defaults in the same format as a preset
/// file. Omitted or `undefined` keeps the defaults.
///
/// # Errors
///
/// Rejects with a message if the options do not parse, the canvas is
/// missing, the GPU cannot be initialized, or a listener cannot be
/// registered.
#[wasm_bindgen]
pub async fn start(
    canvas_selector: String,
    options_toml: Option<String>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second call finds the logger already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    run(&canvas_selector, options_toml.as_deref())
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

async fn run(
    canvas_selector: &str,
    options_toml: Option<&str>,
) -> Result<(), OrreryError> {
    let options = Options::from_toml_or_default(options_toml)?;
    let window = web_sys::window().ok_or_else(|| web_error("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| web_error("no document"))?;
    let canvas: HtmlCanvasElement = document
        .query_selector(canvas_selector)
        .map_err(js_error)?
        .ok_or_else(|| web_error(&format!("no element matches {canvas_selector}")))?
        .dyn_into()
        .map_err(|_| web_error(&format!("{canvas_selector} is not a canvas")))?;
    let headings = heading_elements(&document)?;

    let size = fit_canvas(&window, &canvas);
    let engine = OrreryEngine::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        size,
        options,
    )
    .await?;
    let engine: SharedEngine = Rc::new(RefCell::new(engine));
    log::info!("orrery started on {canvas_selector}");

    register_listeners(&window, &canvas, &engine)?;
    start_frame_loop(engine, headings)
}

/// Forward gesture and resize events from `window` into the engine.
fn register_listeners(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    engine: &SharedEngine,
) -> Result<(), OrreryError> {
    listen(window, "wheel", {
        let engine = engine.clone();
        move |event| {
            if let Some(wheel) = event.dyn_ref::<web_sys::WheelEvent>() {
                let _ = engine.borrow_mut().handle_input(GestureEvent::Wheel {
                    delta_y: wheel.delta_y() as f32,
                });
            }
        }
    })?;

    listen(window, "touchstart", {
        let engine = engine.clone();
        move |event| {
            if let Some(y) = first_touch_y(&event) {
                let _ = engine
                    .borrow_mut()
                    .handle_input(GestureEvent::TouchStart { y });
            }
        }
    })?;

    listen(window, "touchmove", {
        let engine = engine.clone();
        move |event| {
            if let Some(y) = first_touch_y(&event) {
                let _ = engine
                    .borrow_mut()
                    .handle_input(GestureEvent::TouchMove { y });
            }
        }
    })?;

    listen(window, "touchend", {
        let engine = engine.clone();
        move |_| {
            let _ = engine.borrow_mut().handle_input(GestureEvent::TouchEnd);
        }
    })?;

    listen(window, "touchcancel", {
        let engine = engine.clone();
        move |_| {
            let _ = engine.borrow_mut().handle_input(GestureEvent::TouchCancel);
        }
    })?;

    listen(window, "resize", {
        let engine = engine.clone();
        let canvas = canvas.clone();
        move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = fit_canvas(&window, &canvas);
            engine.borrow_mut().resize(width, height);
        }
    })
}

/// Update, render and restyle headings on every animation frame.
fn start_frame_loop(
    engine: SharedEngine,
    headings: Vec<HtmlElement>,
) -> Result<(), OrreryError> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
        Rc::new(RefCell::new(None));
    let next = callback.clone();
    let mut shown_offset = f32::NAN;

    *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let offset = {
            let mut engine = engine.borrow_mut();
            engine.update(Instant::now());
            if let Err(e) = engine.render() {
                log::error!("render error: {e:?}");
            }
            engine.heading_offset()
        };
        if offset != shown_offset {
            set_heading_offset(&headings, offset);
            shown_offset = offset;
        }
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = request_animation_frame(cb) {
                log::error!("{e}");
            }
        }
    }));

    let first = callback.borrow();
    let cb = first
        .as_ref()
        .ok_or_else(|| web_error("frame callback missing"))?;
    request_animation_frame(cb)
}

fn set_heading_offset(headings: &[HtmlElement], offset_percent: f32) {
    let transform = format!("translateY({offset_percent}%)");
    for heading in headings {
        if let Err(e) = heading.style().set_property("transform", &transform) {
            log::warn!("heading style not applied: {e:?}");
        }
    }
}

fn heading_elements(
    document: &web_sys::Document,
) -> Result<Vec<HtmlElement>, OrreryError> {
    let nodes = document
        .query_selector_all(HEADINGS_SELECTOR)
        .map_err(js_error)?;
    let headings: Vec<HtmlElement> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect();
    if headings.is_empty() {
        log::warn!("no {HEADINGS_SELECTOR} elements on the page");
    }
    Ok(headings)
}

/// Size the canvas backing store to the window in physical pixels.
fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let ratio = window.device_pixel_ratio().max(1.0);
    let css = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
    };
    let width = (css(window.inner_width()) * ratio).round().max(1.0) as u32;
    let height = (css(window.inner_height()) * ratio).round().max(1.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

fn first_touch_y(event: &web_sys::Event) -> Option<f32> {
    let touch = event.dyn_ref::<web_sys::TouchEvent>()?.touches().get(0)?;
    Some(touch.client_y() as f32)
}

fn listen(
    target: &web_sys::EventTarget,
    name: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), OrreryError> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn request_animation_frame(
    callback: &Closure<dyn FnMut()>,
) -> Result<(), OrreryError> {
    let window = web_sys::window().ok_or_else(|| web_error("no window"))?;
    let _ = window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(js_error)?;
    Ok(())
}

fn web_error(message: &str) -> OrreryError {
    OrreryError::Web(message.to_owned())
}

fn js_error(value: JsValue) -> OrreryError {
    OrreryError::Web(format!("{value:?}"))
}
