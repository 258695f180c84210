//! In-memory host: a tiny element tree plus a virtual clock.
//!
//! Used for headless runs, tests and the egui widget. Timers fire when the
//! clock passes their deadline; frames land one frame interval after they are
//! requested. Nothing happens until the clock is advanced, see
//! [`Carousel::advance`].

use crate::core::carousel::Carousel;
use crate::core::constants::FRAME_INTERVAL_MS;
use crate::input::events::{EventKind, EventResponse, ListenerTarget, PointerEvent, PointerPhase};
use crate::platform::features::TransformProperty;
use crate::platform::host::{FrameId, Host, TimerId};
use fxhash::{FxHashMap, FxHashSet};

/// Index of an element in a [`MemoryHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A due timer or frame, as handed back by [`MemoryHost::next_wakeup`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wakeup {
    Timer(TimerId),
    Frame(FrameId, f64),
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: FxHashSet<String>,
    attributes: FxHashMap<String, String>,
    text: String,
    width: f64,
    translate_x: Option<f64>,
    draggable: bool,
}

#[derive(Debug, Clone, Copy)]
enum Scheduled {
    Timer(TimerId),
    Frame(FrameId),
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due: f64,
    seq: u64,
    what: Scheduled,
}

#[derive(Debug, Clone)]
pub struct MemoryHost {
    nodes: Vec<Node>,
    root: ElementId,
    viewport_width: f64,
    now_ms: f64,
    next_handle: u64,
    queue: Vec<Entry>,
    listeners: FxHashSet<(ListenerTarget, EventKind)>,
    transform_property: Option<TransformProperty>,
    layout_flushes: usize,
}

impl MemoryHost {
    pub fn new(viewport_width: f64) -> Self {
        let body = Node {
            tag: "body".to_string(),
            draggable: true,
            width: viewport_width,
            ..Default::default()
        };
        Self {
            nodes: vec![body],
            root: ElementId(0),
            viewport_width,
            now_ms: 0.0,
            next_handle: 1,
            queue: Vec::new(),
            listeners: FxHashSet::default(),
            transform_property: None,
            layout_flushes: 0,
        }
    }

    /// A `div > ul > li * count` carousel fixture, each slide `slide_width`
    /// wide inside a viewport of the same width. Returns the host and the
    /// container.
    pub fn with_slides(count: usize, slide_width: f64) -> (Self, ElementId) {
        let mut host = Self::new(slide_width);
        let container = host.insert(host.root, "div");
        host.set_width(container, slide_width);
        let list = host.insert(container, "ul");
        for index in 0..count {
            let slide = host.insert(list, "li");
            host.set_width(slide, slide_width);
            host.set_text(slide, format!("Slide {}", index + 1));
            host.set_attribute(&slide, "id", &format!("slide-{}", index));
            host.set_attribute(&slide, "data-index", &index.to_string());
        }
        (host, container)
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node {
            tag: tag.to_string(),
            draggable: true,
            ..Default::default()
        });
        ElementId(self.nodes.len() - 1)
    }

    /// Create an element as the last child of `parent`
    pub fn insert(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let child = self.create_element(tag);
        self.attach(parent, child, false);
        child
    }

    pub fn set_width(&mut self, element: ElementId, width: f64) {
        self.nodes[element.0].width = width;
    }

    pub fn set_text(&mut self, element: ElementId, text: impl Into<String>) {
        self.nodes[element.0].text = text.into();
    }

    pub fn text(&self, element: ElementId) -> &str {
        &self.nodes[element.0].text
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
        self.nodes[self.root.0].width = width;
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        &self.nodes[element.0].children
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes[element.0].parent
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes[element.0].classes.contains(class)
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.nodes[element.0].attributes.get(name).map(String::as_str)
    }

    pub fn translate_x(&self, element: ElementId) -> Option<f64> {
        self.nodes[element.0].translate_x
    }

    /// Property used by the most recent transform write
    pub fn transform_property(&self) -> Option<TransformProperty> {
        self.transform_property
    }

    /// How many times the carousel forced a layout pass
    pub fn layout_flushes(&self) -> usize {
        self.layout_flushes
    }

    pub fn is_draggable(&self, element: ElementId) -> bool {
        self.nodes[element.0].draggable
    }

    /// Whether the element is reachable from the document root
    pub fn is_attached(&self, element: ElementId) -> bool {
        let mut cursor = Some(element);
        while let Some(id) = cursor {
            if id == self.root {
                return true;
            }
            cursor = self.nodes[id.0].parent;
        }
        false
    }

    /// Descendants of `scope` carrying `class`, in document order
    pub fn elements_with_class(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    pub fn is_listening(&self, target: ListenerTarget, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.queue
            .iter()
            .filter(|entry| matches!(entry.what, Scheduled::Timer(_)))
            .count()
    }

    pub fn pending_frames(&self) -> usize {
        self.queue
            .iter()
            .filter(|entry| matches!(entry.what, Scheduled::Frame(_)))
            .count()
    }

    /// Virtual clock, in milliseconds
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Pop the earliest wakeup due at or before `until`, moving the clock to it
    pub fn next_wakeup(&mut self, until: f64) -> Option<Wakeup> {
        let (position, entry) = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(position, entry)| (position, *entry))?;

        self.queue.remove(position);
        self.now_ms = self.now_ms.max(entry.due);

        Some(match entry.what {
            Scheduled::Timer(id) => Wakeup::Timer(id),
            Scheduled::Frame(id) => Wakeup::Frame(id, entry.due),
        })
    }

    /// Move the clock forward without firing anything
    pub fn fast_forward(&mut self, until: f64) {
        self.now_ms = self.now_ms.max(until);
    }

    fn next_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn enqueue(&mut self, due: f64, what: Scheduled) {
        let seq = self.next_handle();
        self.queue.push(Entry { due, seq, what });
    }

    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        found
    }

    fn matches(&self, element: ElementId, selector: &str) -> bool {
        let node = &self.nodes[element.0];
        if let Some(class) = selector.strip_prefix('.') {
            node.classes.contains(class)
        } else if let Some(id) = selector.strip_prefix('#') {
            node.attributes.get("id").is_some_and(|value| value == id)
        } else {
            node.tag.eq_ignore_ascii_case(selector)
        }
    }

    fn detach(&mut self, element: ElementId) {
        if let Some(parent) = self.nodes[element.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != element);
        }
    }

    fn attach(&mut self, parent: ElementId, child: ElementId, first: bool) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        if first {
            children.insert(0, child);
        } else {
            children.push(child);
        }
        self.nodes[child.0].parent = Some(parent);
    }

    fn deep_copy(&mut self, element: ElementId) -> ElementId {
        let mut node = self.nodes[element.0].clone();
        let children = std::mem::take(&mut node.children);
        node.parent = None;
        self.nodes.push(node);
        let copy = ElementId(self.nodes.len() - 1);

        for child in children {
            let child_copy = self.deep_copy(child);
            self.attach(copy, child_copy, false);
        }
        copy
    }
}

impl Host for MemoryHost {
    type Element = ElementId;

    fn query_selector(&self, scope: &ElementId, selector: &str) -> Option<ElementId> {
        self.descendants(*scope)
            .into_iter()
            .find(|id| self.matches(*id, selector))
    }

    fn query_selector_all(&self, scope: &ElementId, selector: &str) -> Vec<ElementId> {
        self.descendants(*scope)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn element_width(&self, element: &ElementId) -> f64 {
        self.nodes[element.0].width
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn tag_name(&self, element: &ElementId) -> String {
        self.nodes[element.0].tag.to_ascii_uppercase()
    }

    fn set_translate_x(&mut self, element: &ElementId, property: TransformProperty, offset: f64) {
        self.nodes[element.0].translate_x = Some(offset);
        self.transform_property = Some(property);
    }

    fn flush_layout(&mut self, _element: &ElementId) {
        self.layout_flushes += 1;
    }

    fn add_class(&mut self, element: &ElementId, class: &str) {
        self.nodes[element.0].classes.insert(class.to_string());
    }

    fn remove_class(&mut self, element: &ElementId, class: &str) {
        self.nodes[element.0].classes.remove(class);
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        self.nodes[element.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, element: &ElementId, name: &str) {
        self.nodes[element.0].attributes.remove(name);
    }

    fn clone_element(&mut self, element: &ElementId) -> ElementId {
        self.deep_copy(*element)
    }

    fn prepend_child(&mut self, parent: &ElementId, child: &ElementId) {
        self.attach(*parent, *child, true);
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) {
        self.attach(*parent, *child, false);
    }

    fn remove_element(&mut self, element: &ElementId) {
        self.detach(*element);
    }

    fn set_draggable(&mut self, element: &ElementId, draggable: bool) {
        self.nodes[element.0].draggable = draggable;
    }

    fn add_listener(&mut self, target: ListenerTarget, kind: EventKind) {
        self.listeners.insert((target, kind));
    }

    fn remove_listener(&mut self, target: ListenerTarget, kind: EventKind) {
        self.listeners.remove(&(target, kind));
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        let id = TimerId(self.next_handle());
        self.enqueue(self.now_ms + delay_ms as f64, Scheduled::Timer(id));
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.queue
            .retain(|entry| !matches!(entry.what, Scheduled::Timer(timer) if timer == id));
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_handle());
        self.enqueue(self.now_ms + FRAME_INTERVAL_MS, Scheduled::Frame(id));
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.queue
            .retain(|entry| !matches!(entry.what, Scheduled::Frame(frame) if frame == id));
    }
}

fn listener_for(event: &PointerEvent) -> EventKind {
    match (event.phase, event.is_touch_event()) {
        (PointerPhase::Start, true) => EventKind::TouchStart,
        (PointerPhase::Move, true) => EventKind::TouchMove,
        (PointerPhase::End, true) => EventKind::TouchEnd,
        (PointerPhase::Start, false) => EventKind::MouseDown,
        (PointerPhase::Move, false) => EventKind::MouseMove,
        (PointerPhase::End, false) => EventKind::MouseUp,
        (PointerPhase::Cancel, _) => EventKind::TouchCancel,
        (PointerPhase::Leave, _) => EventKind::MouseLeave,
    }
}

impl Carousel<MemoryHost> {
    /// Run the virtual clock forward by `ms`, delivering every timer and
    /// frame that falls due, in order
    pub fn advance(&mut self, ms: f64) {
        let until = self.host().now() + ms;
        while let Some(wakeup) = self.host_mut().next_wakeup(until) {
            match wakeup {
                Wakeup::Timer(id) => self.handle_timer(id),
                Wakeup::Frame(id, timestamp) => self.handle_frame(id, timestamp),
            }
        }
        self.host_mut().fast_forward(until);
    }

    /// Deliver a pointer event the way a platform would: only if a listener
    /// for it is bound. Returns `None` when nothing was listening.
    pub fn dispatch_pointer(
        &mut self,
        event: &PointerEvent,
        target: Option<ElementId>,
    ) -> Option<EventResponse> {
        let kind = listener_for(event);
        if !self.host().is_listening(ListenerTarget::Container, kind) {
            return None;
        }
        Some(self.handle_pointer(event, target.as_ref()))
    }

    pub fn dispatch_click(&mut self) -> Option<EventResponse> {
        if !self
            .host()
            .is_listening(ListenerTarget::Container, EventKind::Click)
        {
            return None;
        }
        Some(self.handle_click())
    }

    /// Change the window width and deliver a resize if anything listens
    pub fn resize_viewport(&mut self, width: f64) -> bool {
        self.host_mut().set_viewport_width(width);
        if !self
            .host()
            .is_listening(ListenerTarget::Window, EventKind::Resize)
        {
            return false;
        }
        self.handle_resize();
        true
    }
}
