//! The carousel engine: gesture tracking, navigation, wrap-around cloning,
//! transitions and resize handling over an abstract [`Host`].
//!
//! Everything runs on host callbacks. At most one piece of deferred work
//! (transition settle, animation frame or resize debounce) is outstanding at
//! any time; starting another supersedes it, and the superseded work is
//! completed on the spot so no state is left half-applied.

use crate::animation::transitions::Transition;
use crate::core::config::{CarouselOptions, TransitionMode};
use crate::core::constants::NATIVE_DRAG_TAGS;
use crate::input::events::{
    EventKind, EventResponse, ListenerTarget, PointerEvent, PointerPhase, PointerSource,
};
use crate::input::gestures::{resist, DragGesture, DragOutcome};
use crate::platform::features::Features;
use crate::platform::host::{FrameId, Host, TimerId};
use crate::{Result, SlideletError};
use std::fmt;

/// Invoked with `(to, from)` whenever navigation lands on a different slide
pub type SlideChangeCallback = Box<dyn FnMut(usize, usize)>;

/// Floored modulo of a slide target into `[0, count)`
pub fn wrap_index(to: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    to.rem_euclid(count as isize) as usize
}

#[derive(Debug, Clone, PartialEq)]
enum Deferred {
    Settle(TimerId),
    Animate {
        frame: FrameId,
        transition: Transition,
    },
    Resize(TimerId),
}

pub struct Carousel<H: Host> {
    host: H,
    container: Option<H::Element>,
    options: CarouselOptions,
    features: Features,
    source: PointerSource,

    slide_wrap: Option<H::Element>,
    slides: Vec<H::Element>,
    clones: Vec<H::Element>,
    clone_count: usize,
    current: usize,

    slide_width: f64,
    base_offset: f64,
    offset: f64,
    drag_offset: f64,
    viewport_width: f64,

    is_sliding: bool,
    is_active: bool,
    destroyed: bool,

    gesture: DragGesture,
    interrupted: bool,
    bindings: Vec<(ListenerTarget, EventKind)>,
    pending: Option<Deferred>,
    on_slide_change: Option<SlideChangeCallback>,
    init_error: Option<SlideletError>,
}

impl<H: Host> Carousel<H> {
    /// Create and initialize a carousel on `container`.
    ///
    /// Never fails: if initialization is impossible (too few slides, no slide
    /// wrapper, invalid options) the problem is logged, kept in
    /// [`init_error`](Self::init_error), and the carousel stays inert.
    pub fn new(host: H, container: H::Element, options: CarouselOptions, features: Features) -> Self {
        let mut carousel = Self {
            host,
            container: Some(container),
            gesture: DragGesture::new(options.drag_threshold),
            source: PointerSource::for_features(&features),
            options,
            features,
            slide_wrap: None,
            slides: Vec::new(),
            clones: Vec::new(),
            clone_count: 0,
            current: 0,
            slide_width: 0.0,
            base_offset: 0.0,
            offset: 0.0,
            drag_offset: 0.0,
            viewport_width: 0.0,
            is_sliding: false,
            is_active: true,
            destroyed: false,
            interrupted: false,
            bindings: Vec::new(),
            pending: None,
            on_slide_change: None,
            init_error: None,
        };

        if let Err(err) = carousel.init() {
            log::warn!("Carousel: {}", err);
            carousel.is_active = false;
            carousel.init_error = Some(err);
        }

        carousel
    }

    fn init(&mut self) -> Result<()> {
        self.options.validate()?;

        let container = self
            .container
            .clone()
            .ok_or_else(|| SlideletError::Host("carousel has no container".to_string()))?;
        let slide_wrap = self
            .host
            .query_selector(&container, &self.options.slide_wrap_selector)
            .ok_or_else(|| SlideletError::MissingSlideWrap {
                selector: self.options.slide_wrap_selector.clone(),
            })?;
        let slides = self
            .host
            .query_selector_all(&slide_wrap, &self.options.slide_selector);

        if slides.len() < self.options.display {
            return Err(SlideletError::InsufficientSlides {
                found: slides.len(),
                required: self.options.display,
            });
        }

        self.slide_wrap = Some(slide_wrap);
        self.slides = slides;

        if self.options.infinite {
            self.clone_slides();
        }

        self.bind_listeners();
        self.viewport_width = self.host.viewport_width();
        self.refresh_dimensions();
        self.jump_to(self.options.initial_index);

        log::debug!(
            "carousel ready: {} slides, {} clones, slide width {}px, {:?} input",
            self.slides.len(),
            self.clone_count,
            self.slide_width,
            self.source
        );
        Ok(())
    }

    /// Remove all listeners, cancel deferred work, strip clones and markers.
    /// The carousel is permanently inert afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        for (target, kind) in std::mem::take(&mut self.bindings) {
            self.host.remove_listener(target, kind);
        }
        self.cancel_pending();

        if let Some(slide) = self.slides.get(self.current) {
            self.host.remove_class(slide, &self.options.active_class);
        }
        if let Some(slide_wrap) = self.slide_wrap.take() {
            self.host
                .remove_class(&slide_wrap, &self.options.animating_class);
        }
        for clone in std::mem::take(&mut self.clones) {
            self.host.remove_element(&clone);
        }

        self.slides.clear();
        self.container = None;
        self.clone_count = 0;
        self.base_offset = 0.0;
        self.drag_offset = 0.0;
        self.gesture.reset();
        self.interrupted = false;
        self.on_slide_change = None;
        self.is_sliding = false;
        self.is_active = false;
        self.destroyed = true;

        log::debug!("carousel destroyed");
    }

    /// Suspend (`true`) or resume (`false`) navigation and gestures.
    /// Has no effect on a carousel that never initialized or was destroyed.
    pub fn disable(&mut self, disabled: bool) {
        if !self.is_initialized() {
            return;
        }
        self.is_active = !disabled;
    }

    pub fn next(&mut self) {
        let last = self.slides.len().saturating_sub(1);
        if self.options.infinite || self.current != last {
            self.go(self.current as isize + 1);
        } else {
            self.go(last as isize);
        }
    }

    pub fn prev(&mut self) {
        if self.options.infinite || self.current != 0 {
            self.go(self.current as isize - 1);
        } else {
            self.go(0);
        }
    }

    /// Slide to `to`, which may be any integer; it is wrapped into range.
    ///
    /// Ignored while a transition is in flight or while the carousel is
    /// inactive.
    pub fn go(&mut self, to: isize) {
        if self.is_sliding || !self.is_active || self.slides.is_empty() {
            return;
        }
        // a pending re-measure must land before computing the target
        self.supersede_pending();

        let count = self.slides.len() as isize;
        let current = self.current as isize;

        // stage the strip inside the clone region so the wrap looks seamless
        if self.clone_count > 0 && (to < 0 || to >= count) {
            let staging = if to < 0 { current + count } else { current - count };
            self.apply_position(staging);
            if let Some(slide_wrap) = &self.slide_wrap {
                self.host.flush_layout(slide_wrap);
            }
        }

        let target = wrap_index(to, self.slides.len());
        self.slide_to(-(target as f64 * self.slide_width));

        let previous = self.current;
        if target != previous {
            log::debug!("slide {} -> {}", previous, target);
            if let Some(callback) = self.on_slide_change.as_mut() {
                callback(target, previous);
            }
        }

        self.mark_active(previous, target);
        self.current = target;
    }

    /// Deliver a touch or mouse notification
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        target: Option<&H::Element>,
    ) -> EventResponse {
        if event.is_touch_event() != (self.source == PointerSource::Touch) {
            return EventResponse::PASS;
        }

        match event.phase {
            PointerPhase::Start => {
                self.drag_start(event, target);
                EventResponse::PASS
            }
            PointerPhase::Move => {
                self.drag_move(event);
                EventResponse::PASS
            }
            PointerPhase::End | PointerPhase::Cancel | PointerPhase::Leave => self.drag_end(),
        }
    }

    /// Deliver a click; swallowed when it trails a committed drag
    pub fn handle_click(&mut self) -> EventResponse {
        if self.gesture.threshold_met() {
            EventResponse::PREVENT_DEFAULT
        } else {
            EventResponse::PASS
        }
    }

    /// Deliver a window resize or orientation change
    pub fn handle_resize(&mut self) {
        if !self.is_initialized() {
            return;
        }

        // height-only changes (mobile browser chrome) do not affect layout
        let width = self.host.viewport_width();
        if width == self.viewport_width {
            return;
        }
        self.viewport_width = width;

        match self.pending.take() {
            Some(Deferred::Resize(id)) => self.host.clear_timeout(id),
            other => {
                self.pending = other;
                self.supersede_pending();
            }
        }

        let id = self.host.set_timeout(self.options.resize_debounce_ms);
        self.pending = Some(Deferred::Resize(id));
    }

    /// Re-measure and reposition right away, whatever the window width.
    /// Completes an in-flight transition and drops a pending debounce.
    pub fn refresh_layout(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.viewport_width = self.host.viewport_width();

        match self.pending.take() {
            Some(Deferred::Resize(id)) => self.host.clear_timeout(id),
            other => {
                self.pending = other;
                self.supersede_pending();
            }
        }
        self.relayout();
    }

    /// Deliver an elapsed timeout
    pub fn handle_timer(&mut self, id: TimerId) {
        if matches!(self.pending, Some(Deferred::Settle(pending)) if pending == id) {
            self.pending = None;
            self.finish_slide();
        } else if matches!(self.pending, Some(Deferred::Resize(pending)) if pending == id) {
            self.pending = None;
            self.relayout();
        } else {
            log::trace!("ignoring stale timer {:?}", id);
        }
    }

    /// Deliver an animation frame
    pub fn handle_frame(&mut self, id: FrameId, timestamp_ms: f64) {
        match self.pending.take() {
            Some(Deferred::Animate {
                frame,
                mut transition,
            }) if frame == id => {
                let sample = transition.sample(timestamp_ms);
                log::trace!("frame at {}ms: offset {}", timestamp_ms, sample.offset);
                self.apply_offset(sample.offset);

                if sample.finished {
                    self.finish_slide();
                } else {
                    let frame = self.host.request_frame();
                    self.pending = Some(Deferred::Animate { frame, transition });
                }
            }
            other => {
                self.pending = other;
                log::trace!("ignoring stale frame {:?}", id);
            }
        }
    }

    pub fn set_on_slide_change<F>(&mut self, callback: F)
    where
        F: FnMut(usize, usize) + 'static,
    {
        self.on_slide_change = Some(Box::new(callback));
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Number of clones prepended ahead of the first real slide
    pub fn clone_count(&self) -> usize {
        self.clone_count
    }

    pub fn slide_width(&self) -> f64 {
        self.slide_width
    }

    /// Pixel correction for the prepended clones
    pub fn base_offset(&self) -> f64 {
        self.base_offset
    }

    /// Last translation applied to the slide wrapper
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn drag_delta(&self) -> f64 {
        self.gesture.delta_x()
    }

    pub fn is_sliding(&self) -> bool {
        self.is_sliding
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn init_error(&self) -> Option<&SlideletError> {
        self.init_error.as_ref()
    }

    pub(crate) fn take_init_error(&mut self) -> Option<SlideletError> {
        self.init_error.take()
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn pointer_source(&self) -> PointerSource {
        self.source
    }

    pub fn slides(&self) -> &[H::Element] {
        &self.slides
    }

    pub fn clones(&self) -> &[H::Element] {
        &self.clones
    }

    pub fn slide_wrap(&self) -> Option<&H::Element> {
        self.slide_wrap.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn is_initialized(&self) -> bool {
        !self.destroyed && self.slide_wrap.is_some()
    }

    fn drag_start(&mut self, event: &PointerEvent, target: Option<&H::Element>) {
        if !self.is_active {
            return;
        }
        let Some(position) = event.position() else {
            return;
        };

        let interrupted = if self.is_sliding {
            if !self.options.interrupt_on_drag {
                return;
            }
            self.interrupt_slide();
            true
        } else {
            false
        };

        self.gesture.begin(position.x);
        self.drag_offset = 0.0;
        self.interrupted = interrupted;

        if let Some(target) = target {
            let tag = self.host.tag_name(target);
            if NATIVE_DRAG_TAGS
                .iter()
                .any(|native| tag.eq_ignore_ascii_case(native))
            {
                self.host.set_draggable(target, false);
            }
        }
    }

    fn drag_move(&mut self, event: &PointerEvent) {
        if !self.is_active {
            return;
        }
        let Some(position) = event.position() else {
            return;
        };
        let Some(delta) = self.gesture.update(position.x) else {
            return;
        };

        self.drag_offset = if self.pulls_past_edge(delta) {
            resist(delta, self.options.edge_resistance)
        } else {
            delta
        };
        self.apply_position(self.current as isize);
    }

    fn drag_end(&mut self) -> EventResponse {
        let Some(outcome) = self.gesture.finish() else {
            return EventResponse::PASS;
        };

        let response = if self.gesture.threshold_met() {
            EventResponse::SUPPRESS
        } else {
            EventResponse::PASS
        };

        // a halted transition leaves the strip between two slides
        let interrupted = std::mem::take(&mut self.interrupted);

        if self.is_active {
            match outcome {
                DragOutcome::Stay if interrupted => self.go(self.current as isize),
                DragOutcome::Stay => {}
                DragOutcome::SnapBack => self.go(self.current as isize),
                DragOutcome::Previous => self.prev(),
                DragOutcome::Next => self.next(),
            }
            self.drag_offset = 0.0;
        } else if self.drag_offset != 0.0 || interrupted {
            self.drag_offset = 0.0;
            self.apply_position(self.current as isize);
        }

        response
    }

    fn pulls_past_edge(&self, delta: f64) -> bool {
        if self.options.infinite {
            return false;
        }
        let last = self.slides.len().saturating_sub(1);
        (self.current == 0 && delta > 0.0) || (self.current == last && delta < 0.0)
    }

    /// Position the strip at a slide, following any live drag, without animating
    fn apply_position(&mut self, index: isize) {
        let offset = self.drag_offset - index as f64 * self.slide_width - self.base_offset;
        self.apply_offset(offset);
    }

    fn apply_offset(&mut self, offset: f64) {
        if let Some(slide_wrap) = &self.slide_wrap {
            self.host
                .set_translate_x(slide_wrap, self.features.transform, offset);
        }
        self.offset = offset;
    }

    fn slide_to(&mut self, position: f64) {
        let end = position - self.base_offset;

        self.supersede_pending();
        self.is_sliding = true;
        if let Some(slide_wrap) = &self.slide_wrap {
            self.host
                .add_class(slide_wrap, &self.options.animating_class);
        }

        match self.options.transition {
            TransitionMode::Timed => {
                self.apply_offset(end);
                let id = self.host.set_timeout(self.options.transition_duration_ms);
                self.pending = Some(Deferred::Settle(id));
            }
            TransitionMode::Eased { easing } => {
                let transition = Transition::new(
                    self.offset,
                    end,
                    self.options.transition_duration_ms as f64,
                    easing,
                );
                let frame = self.host.request_frame();
                self.pending = Some(Deferred::Animate { frame, transition });
            }
        }
    }

    fn finish_slide(&mut self) {
        self.is_sliding = false;
        if let Some(slide_wrap) = &self.slide_wrap {
            self.host
                .remove_class(slide_wrap, &self.options.animating_class);
        }
    }

    /// Stop an in-flight transition where it is, keeping any pending resize
    fn interrupt_slide(&mut self) {
        match self.pending.take() {
            Some(Deferred::Settle(id)) => self.host.clear_timeout(id),
            Some(Deferred::Animate { frame, .. }) => self.host.cancel_frame(frame),
            other => self.pending = other,
        }
        self.finish_slide();
    }

    /// Cancel the pending deferred work and complete it immediately
    fn supersede_pending(&mut self) {
        match self.pending.take() {
            Some(Deferred::Settle(id)) => {
                self.host.clear_timeout(id);
                self.finish_slide();
            }
            Some(Deferred::Animate { frame, transition }) => {
                self.host.cancel_frame(frame);
                self.apply_offset(transition.to);
                self.finish_slide();
            }
            Some(Deferred::Resize(id)) => {
                self.host.clear_timeout(id);
                self.relayout();
            }
            None => {}
        }
    }

    /// Cancel the pending deferred work without running it
    fn cancel_pending(&mut self) {
        match self.pending.take() {
            Some(Deferred::Settle(id)) | Some(Deferred::Resize(id)) => self.host.clear_timeout(id),
            Some(Deferred::Animate { frame, .. }) => self.host.cancel_frame(frame),
            None => {}
        }
    }

    fn relayout(&mut self) {
        self.refresh_dimensions();
        self.apply_position(self.current as isize);
        log::debug!(
            "relayout at viewport width {}: slide width {}px",
            self.viewport_width,
            self.slide_width
        );
    }

    fn refresh_dimensions(&mut self) {
        self.slide_width = self
            .slides
            .first()
            .map(|slide| self.host.element_width(slide))
            .unwrap_or(0.0);
        self.base_offset = self.clone_count as f64 * self.slide_width;
    }

    fn jump_to(&mut self, index: isize) {
        let target = wrap_index(index, self.slides.len());
        self.drag_offset = 0.0;
        self.apply_position(target as isize);
        self.mark_active(self.current, target);
        self.current = target;
    }

    fn mark_active(&mut self, from: usize, to: usize) {
        if let Some(slide) = self.slides.get(from) {
            self.host.remove_class(slide, &self.options.active_class);
        }
        if let Some(slide) = self.slides.get(to) {
            self.host.add_class(slide, &self.options.active_class);
        }
    }

    fn bind_listeners(&mut self) {
        let container_events = self
            .source
            .container_events()
            .iter()
            .map(|kind| (ListenerTarget::Container, *kind));
        let window_events = PointerSource::window_events()
            .iter()
            .map(|kind| (ListenerTarget::Window, *kind));

        for (target, kind) in container_events.chain(window_events) {
            self.host.add_listener(target, kind);
            self.bindings.push((target, kind));
        }
    }

    /// Copy the last and first `display` slides to the opposite ends of the strip
    fn clone_slides(&mut self) {
        let Some(slide_wrap) = self.slide_wrap.clone() else {
            return;
        };
        let slides = self.slides.clone();
        let count = slides.len();
        let display = self.options.display.min(count);

        for slide in slides[count - display..].iter().rev() {
            let clone = self.make_clone(slide);
            self.host.prepend_child(&slide_wrap, &clone);
            self.clones.push(clone);
            self.clone_count += 1;
        }

        for slide in &slides[..display] {
            let clone = self.make_clone(slide);
            self.host.append_child(&slide_wrap, &clone);
            self.clones.push(clone);
        }
    }

    fn make_clone(&mut self, slide: &H::Element) -> H::Element {
        let clone = self.host.clone_element(slide);
        self.host.remove_attribute(&clone, "id");
        self.host.set_attribute(&clone, "aria-hidden", "true");
        self.host.add_class(&clone, &self.options.clone_class);
        clone
    }
}

impl<H> fmt::Debug for Carousel<H>
where
    H: Host + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("host", &self.host)
            .field("current", &self.current)
            .field("slides", &self.slides.len())
            .field("clone_count", &self.clone_count)
            .field("slide_width", &self.slide_width)
            .field("offset", &self.offset)
            .field("is_sliding", &self.is_sliding)
            .field("is_dragging", &self.gesture.is_dragging())
            .field("is_active", &self.is_active)
            .field("pending", &self.pending)
            .finish()
    }
}
