//! Boundary between the carousel engine and whatever actually owns the
//! elements, the event loop and the clock.
//!
//! Deferred work is token based: the carousel asks for a timeout or a frame
//! and receives an id; when it is due, the host calls
//! [`Carousel::handle_timer`](crate::core::carousel::Carousel::handle_timer) or
//! [`Carousel::handle_frame`](crate::core::carousel::Carousel::handle_frame)
//! with that id. Platform events come back the same way through the
//! carousel's `handle_*` entry points.

use crate::input::events::{EventKind, ListenerTarget};
use crate::platform::features::TransformProperty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a scheduled timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Handle of a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u64);

/// Element, layout, event and scheduling primitives the carousel consumes
pub trait Host {
    /// Opaque element handle
    type Element: Clone + PartialEq + fmt::Debug;

    /// First descendant of `scope` matching `selector`
    fn query_selector(&self, scope: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// All descendants of `scope` matching `selector`, in document order
    fn query_selector_all(&self, scope: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// Rendered width of an element, in pixels
    fn element_width(&self, element: &Self::Element) -> f64;

    /// Current width of the window
    fn viewport_width(&self) -> f64;

    fn tag_name(&self, element: &Self::Element) -> String;

    /// Translate an element horizontally by `offset` pixels
    fn set_translate_x(&mut self, element: &Self::Element, property: TransformProperty, offset: f64);

    /// Force pending style writes on `element` to be laid out, so the next
    /// write starts a transition from them instead of being merged
    fn flush_layout(&mut self, element: &Self::Element);

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    /// Deep, detached copy of an element
    fn clone_element(&mut self, element: &Self::Element) -> Self::Element;

    /// Insert `child` as the first child of `parent`
    fn prepend_child(&mut self, parent: &Self::Element, child: &Self::Element);

    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Detach an element from its parent
    fn remove_element(&mut self, element: &Self::Element);

    /// Toggle the platform's native drag-and-drop on an element
    fn set_draggable(&mut self, element: &Self::Element, draggable: bool);

    fn add_listener(&mut self, target: ListenerTarget, kind: EventKind);

    fn remove_listener(&mut self, target: ListenerTarget, kind: EventKind);

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId;

    fn clear_timeout(&mut self, id: TimerId);

    fn request_frame(&mut self) -> FrameId;

    fn cancel_frame(&mut self, id: FrameId);
}
