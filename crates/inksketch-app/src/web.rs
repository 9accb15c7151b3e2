//! WebAssembly entry point and the DOM-backed sketch pad.

use crate::PathSlots;
use inksketch_core::format::{SVG_NS, XLINK_NS, export_v2};
use inksketch_core::{
    HostOffset, Modifiers, PathData, PointerInput, RawEvent, Sketch, SketchConfig, SketchHost,
    Stroke, StrokeId,
};
use kurbo::Point;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

/// Set up panic reporting and logging for the module.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // A second module instance on the page already installed a logger
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Renders strokes as `<path>` children of an `<svg>` inside a wrapper `div`.
struct DomHost {
    document: web_sys::Document,
    parent: web_sys::HtmlElement,
    svg: web_sys::Element,
    paths: PathSlots<web_sys::Element>,
}

impl DomHost {
    fn new(element: &web_sys::HtmlElement, width: f64, height: f64) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let parent: web_sys::HtmlElement = document.create_element("div")?.dyn_into()?;
        let svg = document.create_element_ns(Some(SVG_NS), "svg")?;
        svg.set_attribute("xmlns:xlink", XLINK_NS)?;
        svg.set_attribute("version", "1.1")?;

        parent.append_child(&svg)?;
        element.append_child(&parent)?;
        parent.style().set_property("display", "inline-block")?;

        let host = Self {
            document,
            parent,
            svg,
            paths: PathSlots::new(),
        };
        host.set_size(width, height)?;
        Ok(host)
    }

    fn set_size(&self, width: f64, height: f64) -> Result<(), JsValue> {
        self.svg.set_attribute("width", &width.to_string())?;
        self.svg.set_attribute("height", &height.to_string())
    }

    fn create_path(&self, stroke: &Stroke) -> Result<web_sys::Element, JsValue> {
        let path = self.document.create_element_ns(Some(SVG_NS), "path")?;
        path.set_attribute("stroke-width", &stroke.style.width.to_string())?;
        path.set_attribute("stroke-linecap", "round")?;
        path.set_attribute("stroke-linejoin", "round")?;
        path.set_attribute("stroke", &stroke.style.color)?;
        path.set_attribute("fill", "none")?;
        path.set_attribute("d", stroke.geometry.as_str())?;
        self.svg.append_child(&path)?;
        Ok(path)
    }

    fn remove(&self) {
        self.parent.remove();
    }
}

impl SketchHost for DomHost {
    fn offset(&self) -> HostOffset {
        HostOffset::new(
            f64::from(self.parent.offset_left()),
            f64::from(self.parent.offset_top()),
        )
    }

    fn push_path(&mut self, stroke: &Stroke) {
        let path = self
            .create_path(stroke)
            .inspect_err(|e| log::warn!("Failed to create path element: {:?}", e))
            .ok();
        self.paths.push(stroke.id(), path);
    }

    fn update_path(&mut self, id: StrokeId, geometry: &PathData) {
        let Some(path) = self.paths.get(id) else {
            return;
        };
        if let Err(e) = path.set_attribute("d", geometry.as_str()) {
            log::warn!("Failed to update path element: {:?}", e);
        }
    }

    fn pop_path(&mut self) {
        if let Some(path) = self.paths.pop() {
            path.remove();
        }
    }

    fn clear_paths(&mut self) {
        for path in self.paths.drain() {
            path.remove();
        }
    }
}

/// An event listener that unregisters itself when dropped.
struct Listener {
    target: web_sys::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn new(
        target: &web_sys::EventTarget,
        kind: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Draw notifications registered from JavaScript.
///
/// Kept outside the surface so a handler can call back into the pad.
#[derive(Default)]
struct Callbacks {
    on_draw_start: Option<js_sys::Function>,
    on_draw_stop: Option<js_sys::Function>,
}

fn call(callback: &Option<js_sys::Function>) {
    if let Some(f) = callback {
        if let Err(e) = f.call0(&JsValue::NULL) {
            log::error!("Draw callback failed: {:?}", e);
        }
    }
}

/// Read a raw event from a DOM mouse or touch event.
fn raw_event(event: &web_sys::Event) -> Option<RawEvent> {
    if let Some(touch) = event.dyn_ref::<web_sys::TouchEvent>() {
        let list = touch.changed_touches();
        let changed = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| Point::new(f64::from(t.page_x()), f64::from(t.page_y())))
            .collect();
        return Some(RawEvent {
            input: PointerInput::Touch {
                changed,
                contacts: touch.target_touches().length() as usize,
            },
            modifiers: Modifiers {
                shift: touch.shift_key(),
            },
        });
    }

    let mouse = event.dyn_ref::<web_sys::MouseEvent>()?;
    let raw = RawEvent::mouse(f64::from(mouse.layer_x()), f64::from(mouse.layer_y()));
    Some(raw.with_modifiers(Modifiers {
        shift: mouse.shift_key(),
    }))
}

/// A sketching surface attached to a page element.
#[wasm_bindgen]
pub struct SketchPad {
    sketch: Rc<RefCell<Sketch<DomHost>>>,
    callbacks: Rc<RefCell<Callbacks>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl SketchPad {
    /// Attach a new pad to `element`.
    ///
    /// `options` is a plain object with any of `width`, `height`,
    /// `minDistance`, `strokeWidth` (or `size`), `stroke` (or `color`),
    /// `disabled`, `onDrawStart` and `onDrawStop`.
    #[wasm_bindgen(constructor)]
    pub fn new(element: web_sys::HtmlElement, options: JsValue) -> Result<SketchPad, JsValue> {
        let config: SketchConfig = if options.is_undefined() || options.is_null() {
            SketchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options.clone())?
        };
        let callbacks = Callbacks {
            on_draw_start: js_function(&options, "onDrawStart"),
            on_draw_stop: js_function(&options, "onDrawStop"),
        };

        let host = DomHost::new(&element, config.width, config.height)?;
        let document = host.document.clone();
        let mut pad = SketchPad {
            sketch: Rc::new(RefCell::new(Sketch::new(host, config))),
            callbacks: Rc::new(RefCell::new(callbacks)),
            listeners: Vec::new(),
        };
        pad.listen(&element, &document)?;

        log::info!("Sketch pad attached");
        Ok(pad)
    }

    #[wasm_bindgen(setter = strokeWidth)]
    pub fn set_stroke_width(&self, width: f64) {
        self.sketch.borrow_mut().set_stroke_width(width);
    }

    #[wasm_bindgen(setter = size)]
    pub fn set_size(&self, width: f64) {
        self.set_stroke_width(width);
    }

    #[wasm_bindgen(setter = stroke)]
    pub fn set_stroke(&self, color: String) {
        self.sketch.borrow_mut().set_stroke_color(color);
    }

    #[wasm_bindgen(setter = color)]
    pub fn set_color(&self, color: String) {
        self.set_stroke(color);
    }

    #[wasm_bindgen(setter = disabled)]
    pub fn set_disabled(&self, disabled: bool) {
        self.sketch.borrow_mut().set_disabled(disabled);
    }

    #[wasm_bindgen(setter = onDrawStart)]
    pub fn set_on_draw_start(&self, f: Option<js_sys::Function>) {
        self.callbacks.borrow_mut().on_draw_start = f;
    }

    #[wasm_bindgen(setter = onDrawStop)]
    pub fn set_on_draw_stop(&self, f: Option<js_sys::Function>) {
        self.callbacks.borrow_mut().on_draw_stop = f;
    }

    /// Remove the most recent stroke.
    pub fn undo(&self) {
        self.sketch.borrow_mut().undo_last();
    }

    /// Remove all strokes.
    pub fn clear(&self) {
        self.sketch.borrow_mut().clear();
    }

    /// Current drawing as SVG markup.
    #[wasm_bindgen(js_name = toMarkup)]
    pub fn to_markup(&self) -> String {
        self.sketch.borrow().to_markup()
    }

    /// Current drawing as a plain object in the latest sketch format.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        let sketch = self.sketch.borrow();
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        Ok(export_v2(sketch.document()).serialize(&serializer)?)
    }

    /// Replace the drawing with a saved sketch object of either version.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&self, value: JsValue) {
        let value: serde_json::Value = match serde_wasm_bindgen::from_value(value) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Unreadable sketch object, loading empty canvas: {}", e);
                serde_json::Value::Null
            }
        };
        let mut sketch = self.sketch.borrow_mut();
        sketch.load_json(&value);
        resize(&sketch);
    }

    /// Replace the drawing with a saved sketch string of either version.
    #[wasm_bindgen(js_name = loadString)]
    pub fn load_string(&self, json: &str) {
        let mut sketch = self.sketch.borrow_mut();
        sketch.load_str(json);
        resize(&sketch);
    }

    /// Unregister every listener and remove the pad from the page.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.sketch.borrow().host().remove();
    }
}

impl SketchPad {
    fn listen(
        &mut self,
        element: &web_sys::HtmlElement,
        document: &web_sys::Document,
    ) -> Result<(), JsValue> {
        let is_touch = document
            .document_element()
            .map(|root| js_sys::Reflect::has(&root, &JsValue::from_str("ontouchstart")))
            .transpose()?
            .unwrap_or(false);
        let (down, move_, up) = if is_touch {
            ("touchstart", "touchmove", "touchend")
        } else {
            ("mousedown", "mousemove", "mouseup")
        };

        let sketch = self.sketch.clone();
        let callbacks = self.callbacks.clone();
        self.listeners.push(Listener::new(element, down, move |event| {
            let Some(raw) = raw_event(&event) else {
                return;
            };
            let response = sketch.borrow_mut().begin(&raw);
            if response.suppress_default {
                event.prevent_default();
            }
            if response.handled {
                let f = callbacks.borrow().on_draw_start.clone();
                call(&f);
            }
        })?);

        let sketch = self.sketch.clone();
        self.listeners.push(Listener::new(element, move_, move |event| {
            let Some(raw) = raw_event(&event) else {
                return;
            };
            let response = sketch.borrow_mut().drag(&raw);
            if response.suppress_default {
                event.prevent_default();
            }
        })?);

        // Gestures may end anywhere on the page
        let sketch = self.sketch.clone();
        let callbacks = self.callbacks.clone();
        self.listeners.push(Listener::new(document, up, move |_| {
            let response = sketch.borrow_mut().end();
            if response.handled {
                let f = callbacks.borrow().on_draw_stop.clone();
                call(&f);
            }
        })?);

        let sketch = self.sketch.clone();
        self.listeners.push(Listener::new(document, "keyup", move |event| {
            let released = event
                .dyn_ref::<web_sys::KeyboardEvent>()
                .is_some_and(|key| key.key() == "Shift");
            if released {
                sketch.borrow_mut().release_constrain();
            }
        })?);

        Ok(())
    }
}

fn resize(sketch: &Sketch<DomHost>) {
    let doc = sketch.document();
    if let Err(e) = sketch.host().set_size(doc.width, doc.height) {
        log::warn!("Failed to resize sketch: {:?}", e);
    }
}

/// A function-valued property of the options object.
fn js_function(options: &JsValue, key: &str) -> Option<js_sys::Function> {
    if !options.is_object() {
        return None;
    }
    js_sys::Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
}
