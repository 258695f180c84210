use crate::core::geometry::Point;
use crate::platform::features::Features;
use serde::{Deserialize, Serialize};

/// Phase of a pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    /// Touch cancelled by the platform; ends a drag
    Cancel,
    /// Pointer left the container; ends a drag
    Leave,
}

impl PointerPhase {
    pub fn ends_drag(&self) -> bool {
        matches!(self, PointerPhase::End | PointerPhase::Cancel | PointerPhase::Leave)
    }
}

/// Individual touch point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    /// Page coordinates
    pub page: Point,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            page: Point::new(x, y),
        }
    }
}

/// A raw pointer notification from either a touch or a mouse source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Active touch list for touch events, `None` for mouse events
    pub touches: Option<Vec<TouchPoint>>,
    /// Client coordinates for mouse events
    pub client: Point,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            touches: None,
            client: Point::new(x, y),
        }
    }

    pub fn touch(phase: PointerPhase, touches: Vec<TouchPoint>) -> Self {
        Self {
            phase,
            touches: Some(touches),
            client: Point::default(),
        }
    }

    /// Normalizes touch and mouse readings into a single position.
    ///
    /// Touch events read the first touch's page coordinates, mouse events the
    /// client coordinates. A touch event whose list is empty (as on touch end)
    /// has no position.
    pub fn position(&self) -> Option<Point> {
        match &self.touches {
            Some(touches) => touches.first().map(|touch| touch.page),
            None => Some(self.client),
        }
    }

    pub fn is_touch_event(&self) -> bool {
        self.touches.is_some()
    }
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerTarget {
    /// The carousel container element
    Container,
    /// The global window
    Window,
}

/// Platform notifications the carousel subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    Click,
    Resize,
    OrientationChange,
}

impl EventKind {
    /// Platform event name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::TouchCancel => "touchcancel",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Click => "click",
            EventKind::Resize => "resize",
            EventKind::OrientationChange => "orientationchange",
        }
    }

    /// Pointer phase carried by this notification, if it is a pointer event
    pub fn pointer_phase(&self) -> Option<PointerPhase> {
        match self {
            EventKind::TouchStart | EventKind::MouseDown => Some(PointerPhase::Start),
            EventKind::TouchMove | EventKind::MouseMove => Some(PointerPhase::Move),
            EventKind::TouchEnd | EventKind::MouseUp => Some(PointerPhase::End),
            EventKind::TouchCancel => Some(PointerPhase::Cancel),
            EventKind::MouseLeave => Some(PointerPhase::Leave),
            EventKind::Click | EventKind::Resize | EventKind::OrientationChange => None,
        }
    }

    pub fn is_window_event(&self) -> bool {
        matches!(self, EventKind::Resize | EventKind::OrientationChange)
    }
}

/// The pointer family a carousel listens to; never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerSource {
    Touch,
    Mouse,
}

impl PointerSource {
    pub fn for_features(features: &Features) -> Self {
        if features.touch {
            PointerSource::Touch
        } else {
            PointerSource::Mouse
        }
    }

    /// Container events bound for this source, including click suppression
    pub fn container_events(&self) -> &'static [EventKind] {
        match self {
            PointerSource::Touch => &[
                EventKind::TouchStart,
                EventKind::TouchMove,
                EventKind::TouchEnd,
                EventKind::TouchCancel,
                EventKind::Click,
            ],
            PointerSource::Mouse => &[
                EventKind::MouseDown,
                EventKind::MouseMove,
                EventKind::MouseUp,
                EventKind::MouseLeave,
                EventKind::Click,
            ],
        }
    }

    pub fn window_events() -> &'static [EventKind] {
        &[EventKind::Resize, EventKind::OrientationChange]
    }
}

/// What the host should do with the platform event it just delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventResponse {
    /// Let the event through untouched
    pub const PASS: EventResponse = EventResponse {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Cancel the default action only
    pub const PREVENT_DEFAULT: EventResponse = EventResponse {
        prevent_default: true,
        stop_propagation: false,
    };

    /// Cancel the default action and stop all further propagation
    pub const SUPPRESS: EventResponse = EventResponse {
        prevent_default: true,
        stop_propagation: true,
    };

    pub fn is_pass(&self) -> bool {
        *self == Self::PASS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_position_uses_client_coordinates() {
        let event = PointerEvent::mouse(PointerPhase::Start, 100.0, 20.0);
        assert_eq!(event.position(), Some(Point::new(100.0, 20.0)));
        assert!(!event.is_touch_event());
    }

    #[test]
    fn test_touch_position_uses_first_touch() {
        let event = PointerEvent::touch(
            PointerPhase::Move,
            vec![TouchPoint::new(1, 40.0, 5.0), TouchPoint::new(2, 300.0, 9.0)],
        );
        assert_eq!(event.position(), Some(Point::new(40.0, 5.0)));
        assert!(event.is_touch_event());
    }

    #[test]
    fn test_empty_touch_list_has_no_position() {
        let event = PointerEvent::touch(PointerPhase::End, Vec::new());
        assert_eq!(event.position(), None);
    }

    #[test]
    fn test_source_selection_is_exclusive() {
        let touch = PointerSource::for_features(&Features::touch());
        let mouse = PointerSource::for_features(&Features::mouse());
        assert_eq!(touch, PointerSource::Touch);
        assert_eq!(mouse, PointerSource::Mouse);

        assert!(touch
            .container_events()
            .iter()
            .all(|kind| !matches!(kind, EventKind::MouseDown | EventKind::MouseMove)));
        assert!(mouse
            .container_events()
            .iter()
            .all(|kind| !matches!(kind, EventKind::TouchStart | EventKind::TouchMove)));
    }

    #[test]
    fn test_event_phases() {
        assert_eq!(EventKind::MouseLeave.pointer_phase(), Some(PointerPhase::Leave));
        assert!(PointerPhase::Leave.ends_drag());
        assert!(PointerPhase::Cancel.ends_drag());
        assert!(!PointerPhase::Move.ends_drag());
        assert_eq!(EventKind::Click.pointer_phase(), None);
        assert!(EventKind::OrientationChange.is_window_event());
    }
}
