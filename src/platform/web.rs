//! Browser host over `web-sys`, plus the `WebCarousel` script binding.
//!
//! The carousel lives in an `Rc<RefCell<..>>`; every listener, timeout and
//! animation-frame closure holds only a `Weak` to it and calls back into the
//! matching `handle_*` entry point. DOM failures are logged and treated as
//! no-ops.

use crate::core::carousel::Carousel;
use crate::core::config::CarouselOptions;
use crate::input::events::{
    EventKind, EventResponse, ListenerTarget, PointerEvent, TouchPoint,
};
use crate::platform::features::{Features, TransformProperty};
use crate::platform::host::{FrameId, Host, TimerId};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, Window};

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format_args!($($t)*).to_string().into()))
}

type Shared = Rc<RefCell<Carousel<WebHost>>>;
type Handle = Weak<RefCell<Carousel<WebHost>>>;

struct Listener {
    target: ListenerTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(Event)>,
}

/// A scheduled timeout or frame. `done` is raised by the closure once it has
/// run, so the entry can be dropped on the next scheduling pass.
struct Scheduled<F: ?Sized> {
    handle: i32,
    done: Rc<Cell<bool>>,
    _closure: Closure<F>,
}

pub struct WebHost {
    window: Window,
    container: Element,
    carousel: Handle,
    next_id: u64,
    listeners: Vec<Listener>,
    timers: Vec<(TimerId, Scheduled<dyn FnMut()>)>,
    frames: Vec<(FrameId, Scheduled<dyn FnMut(f64)>)>,
    // unbound listeners may still be on the stack; they go when the host does
    retired: Vec<Closure<dyn FnMut(Event)>>,
}

impl WebHost {
    fn new(window: Window, container: Element, carousel: Handle) -> Self {
        Self {
            window,
            container,
            carousel,
            next_id: 1,
            listeners: Vec::new(),
            timers: Vec::new(),
            frames: Vec::new(),
            retired: Vec::new(),
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn target(&self, target: ListenerTarget) -> &EventTarget {
        match target {
            ListenerTarget::Container => self.container.as_ref(),
            ListenerTarget::Window => self.window.as_ref(),
        }
    }

    fn prune(&mut self) {
        self.timers.retain(|(_, entry)| !entry.done.get());
        self.frames.retain(|(_, entry)| !entry.done.get());
    }
}

/// Run `f` against the carousel if it is still alive and not already borrowed
fn with_carousel<R>(handle: &Handle, f: impl FnOnce(&mut Carousel<WebHost>) -> R) -> Option<R> {
    let shared = handle.upgrade()?;
    let result = match shared.try_borrow_mut() {
        Ok(mut carousel) => Some(f(&mut carousel)),
        Err(_) => {
            log::warn!("carousel callback re-entered; event dropped");
            None
        }
    };
    result
}

fn pointer_event(kind: EventKind, event: &Event) -> Option<PointerEvent> {
    let phase = kind.pointer_phase()?;
    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        let list = touch_event.touches();
        let touches = (0..list.length())
            .filter_map(|index| list.get(index))
            .map(|touch| {
                TouchPoint::new(
                    touch.identifier() as u64,
                    touch.page_x() as f64,
                    touch.page_y() as f64,
                )
            })
            .collect();
        return Some(PointerEvent::touch(phase, touches));
    }
    let mouse_event = event.dyn_ref::<MouseEvent>()?;
    Some(PointerEvent::mouse(
        phase,
        mouse_event.client_x() as f64,
        mouse_event.client_y() as f64,
    ))
}

fn apply_response(event: &Event, response: EventResponse) {
    if response.prevent_default {
        event.prevent_default();
    }
    if response.stop_propagation {
        event.stop_propagation();
        event.stop_immediate_propagation();
    }
}

fn dispatch(handle: &Handle, kind: EventKind, event: &Event) {
    let response = with_carousel(handle, |carousel| match kind {
        EventKind::Click => carousel.handle_click(),
        EventKind::Resize | EventKind::OrientationChange => {
            carousel.handle_resize();
            EventResponse::PASS
        }
        _ => match pointer_event(kind, event) {
            Some(pointer) => {
                let target = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok());
                carousel.handle_pointer(&pointer, target.as_ref())
            }
            None => EventResponse::PASS,
        },
    });
    if let Some(response) = response {
        apply_response(event, response);
    }
}

impl Host for WebHost {
    type Element = Element;

    fn query_selector(&self, scope: &Element, selector: &str) -> Option<Element> {
        match scope.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector '{}': {:?}", selector, err);
                None
            }
        }
    }

    fn query_selector_all(&self, scope: &Element, selector: &str) -> Vec<Element> {
        let Ok(list) = scope.query_selector_all(selector) else {
            log::warn!("invalid selector '{}'", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_width(&self, element: &Element) -> f64 {
        element.get_bounding_client_rect().width()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name()
    }

    fn set_translate_x(&mut self, element: &Element, property: TransformProperty, offset: f64) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let result = match property.css_name() {
            Some(name) => style.set_property(name, &format!("translate3d({}px, 0, 0)", offset)),
            None => style.set_property("left", &format!("{}px", offset)),
        };
        if let Err(err) = result {
            log::warn!("failed to position slide wrapper: {:?}", err);
        }
    }

    fn flush_layout(&mut self, element: &Element) {
        // reading a layout property makes the browser apply the staged transform
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let _ = html.offset_height();
        }
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().add_1(class) {
            log::warn!("failed to add class '{}': {:?}", class, err);
        }
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().remove_1(class) {
            log::warn!("failed to remove class '{}': {:?}", class, err);
        }
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            log::warn!("failed to set attribute '{}': {:?}", name, err);
        }
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) {
        if let Err(err) = element.remove_attribute(name) {
            log::warn!("failed to remove attribute '{}': {:?}", name, err);
        }
    }

    fn clone_element(&mut self, element: &Element) -> Element {
        element
            .clone_node_with_deep(true)
            .ok()
            .and_then(|node| node.dyn_into::<Element>().ok())
            .unwrap_or_else(|| element.clone())
    }

    fn prepend_child(&mut self, parent: &Element, child: &Element) {
        let first = parent.first_child();
        if let Err(err) = parent.insert_before(child, first.as_ref()) {
            log::warn!("failed to prepend clone: {:?}", err);
        }
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log::warn!("failed to append clone: {:?}", err);
        }
    }

    fn remove_element(&mut self, element: &Element) {
        element.remove();
    }

    fn set_draggable(&mut self, element: &Element, draggable: bool) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.set_draggable(draggable);
        }
    }

    fn add_listener(&mut self, target: ListenerTarget, kind: EventKind) {
        let handle = self.carousel.clone();
        let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
            dispatch(&handle, kind, &event);
        }));

        if let Err(err) = self
            .target(target)
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to listen for {}: {:?}", kind.as_str(), err);
            return;
        }
        self.listeners.push(Listener {
            target,
            kind,
            closure,
        });
    }

    fn remove_listener(&mut self, target: ListenerTarget, kind: EventKind) {
        let Some(position) = self
            .listeners
            .iter()
            .position(|listener| listener.target == target && listener.kind == kind)
        else {
            return;
        };
        let listener = self.listeners.remove(position);
        let _ = self.target(target).remove_event_listener_with_callback(
            kind.as_str(),
            listener.closure.as_ref().unchecked_ref(),
        );
        self.retired.push(listener.closure);
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        self.prune();
        let id = TimerId(self.next_id());
        let done = Rc::new(Cell::new(false));

        let handle = self.carousel.clone();
        let flag = done.clone();
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            with_carousel(&handle, |carousel| carousel.handle_timer(id));
            flag.set(true);
        }));

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            ) {
            Ok(browser_handle) => self.timers.push((
                id,
                Scheduled {
                    handle: browser_handle,
                    done,
                    _closure: closure,
                },
            )),
            Err(err) => log::warn!("setTimeout failed: {:?}", err),
        }
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if let Some((_, entry)) = self.timers.iter().find(|(timer, _)| *timer == id) {
            self.window.clear_timeout_with_handle(entry.handle);
            entry.done.set(true);
        }
    }

    fn request_frame(&mut self) -> FrameId {
        self.prune();
        let id = FrameId(self.next_id());
        let done = Rc::new(Cell::new(false));

        let handle = self.carousel.clone();
        let flag = done.clone();
        let closure = Closure::<dyn FnMut(f64)>::wrap(Box::new(move |timestamp: f64| {
            with_carousel(&handle, |carousel| carousel.handle_frame(id, timestamp));
            flag.set(true);
        }));

        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(browser_handle) => self.frames.push((
                id,
                Scheduled {
                    handle: browser_handle,
                    done,
                    _closure: closure,
                },
            )),
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some((_, entry)) = self.frames.iter().find(|(frame, _)| *frame == id) {
            let _ = self.window.cancel_animation_frame(entry.handle);
            entry.done.set(true);
        }
    }
}

impl std::fmt::Debug for WebHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebHost")
            .field("listeners", &self.listeners.len())
            .field("timers", &self.timers.len())
            .field("frames", &self.frames.len())
            .finish()
    }
}

/// Probe the page for touch support and a usable transform property
pub fn detect_features(window: &Window) -> Features {
    let Some(document) = window.document() else {
        return Features::default();
    };
    let touch = js_sys::Reflect::has(&document, &JsValue::from_str("ontouchend")).unwrap_or(false);
    let style = document.body().map(|body| body.style());

    Features::detect(touch, |name| {
        style.as_ref().is_some_and(|style| {
            js_sys::Reflect::has(style, &JsValue::from_str(name)).unwrap_or(false)
        })
    })
}

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Module entry point: panic hook and console logging
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Warn);
    }
}

/// Carousel bound to a DOM container, for use from page scripts
#[wasm_bindgen]
pub struct WebCarousel {
    inner: Shared,
}

#[wasm_bindgen]
impl WebCarousel {
    /// Attach a carousel to `container`. `options` is a plain object with
    /// the same keys as `CarouselOptions`; `undefined` keeps the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, options: JsValue) -> Result<WebCarousel, JsValue> {
        let options = if options.is_undefined() || options.is_null() {
            CarouselOptions::default()
        } else {
            let json: String = js_sys::JSON::stringify(&options)?.into();
            CarouselOptions::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let features = detect_features(&window);

        let inner = Rc::new_cyclic(|handle: &Handle| {
            let host = WebHost::new(window, container.clone(), handle.clone());
            RefCell::new(Carousel::new(host, container, options, features))
        });

        if let Some(err) = inner.borrow().init_error() {
            console_log!("slidelet: {}", err);
        }
        Ok(WebCarousel { inner })
    }

    pub fn next(&self) {
        self.with(|carousel| carousel.next());
    }

    pub fn prev(&self) {
        self.with(|carousel| carousel.prev());
    }

    pub fn go(&self, to: i32) {
        self.with(|carousel| carousel.go(to as isize));
    }

    pub fn disable(&self, disabled: bool) {
        self.with(|carousel| carousel.disable(disabled));
    }

    pub fn destroy(&self) {
        self.with(|carousel| carousel.destroy());
    }

    /// Register `callback(to, from)` for slide changes
    #[wasm_bindgen(js_name = setOnSlideChange)]
    pub fn set_on_slide_change(&self, callback: js_sys::Function) {
        self.with(|carousel| {
            carousel.set_on_slide_change(move |to, from| {
                let _ = callback.call2(
                    &JsValue::NULL,
                    &JsValue::from(to as u32),
                    &JsValue::from(from as u32),
                );
            })
        });
    }

    /// `undefined` while the carousel is busy, e.g. from inside the
    /// `onSlideChange` callback, whose arguments carry the index instead
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<usize> {
        self.peek(|carousel| carousel.current_index())
    }

    /// `undefined` while the carousel is busy
    #[wasm_bindgen(js_name = isSliding)]
    pub fn is_sliding(&self) -> Option<bool> {
        self.peek(|carousel| carousel.is_sliding())
    }

    fn peek<R>(&self, f: impl FnOnce(&Carousel<WebHost>) -> R) -> Option<R> {
        match self.inner.try_borrow() {
            Ok(carousel) => Some(f(&carousel)),
            Err(_) => {
                log::warn!("carousel is busy; state unavailable");
                None
            }
        }
    }

    fn with(&self, f: impl FnOnce(&mut Carousel<WebHost>)) {
        match self.inner.try_borrow_mut() {
            Ok(mut carousel) => f(&mut carousel),
            Err(_) => log::warn!("carousel is busy; call ignored"),
        }
    }
}
