//! Prelude module for common slidelet types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use slidelet::prelude::*;`

pub use crate::core::{
    builder::CarouselBuilder,
    carousel::{wrap_index, Carousel, SlideChangeCallback},
    config::{CarouselOptions, TransitionMode},
    geometry::Point,
};

pub use crate::animation::{
    easing::EasingFunction,
    transitions::{Transition, TransitionFrame},
};

pub use crate::input::{
    events::{
        EventKind, EventResponse, ListenerTarget, PointerEvent, PointerPhase, PointerSource,
        TouchPoint,
    },
    gestures::{DragGesture, DragOutcome},
};

pub use crate::platform::{
    features::{Features, TransformProperty},
    host::{FrameId, Host, TimerId},
    memory::{ElementId, MemoryHost},
};

#[cfg(feature = "egui")]
pub use crate::ui::{widget::CarouselWidget, UiCarouselExt};

#[cfg(feature = "wasm")]
pub use crate::platform::web::{WebCarousel, WebHost};

pub use crate::{Error as SlideletError, Result};
