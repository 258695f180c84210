pub mod events;
pub mod gestures;

// Re-export the essential types
pub use events::{
    EventKind, EventResponse, ListenerTarget, PointerEvent, PointerPhase, PointerSource,
    TouchPoint,
};
pub use gestures::{DragGesture, DragOutcome};
