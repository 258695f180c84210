//! # Slidelet
//!
//! A touch and mouse driven slide carousel engine.
//!
//! The carousel translates a strip of slides horizontally, follows drags
//! with edge resistance, commits or snaps back on release, and optionally
//! wraps around using cloned slides at both ends. It runs against an
//! abstract [`Host`](platform::Host): the browser DOM behind the `wasm`
//! feature, an in-memory element tree for headless use and tests, or the
//! egui widget behind the `egui` feature.

pub mod animation;
pub mod core;
pub mod input;
pub mod platform;
pub mod prelude;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::CarouselBuilder,
    carousel::Carousel,
    config::{CarouselOptions, TransitionMode},
};

pub use animation::{easing::EasingFunction, transitions::Transition};

pub use input::{
    events::{EventResponse, PointerEvent, PointerPhase},
    gestures::DragOutcome,
};

pub use platform::{Features, Host, MemoryHost, TransformProperty};

#[cfg(feature = "egui")]
pub use ui::widget::CarouselWidget;

#[cfg(feature = "wasm")]
pub use platform::web::WebCarousel;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, SlideletError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum SlideletError {
    #[error("Carousel: slide count {found} is less than display count {required}")]
    InsufficientSlides { found: usize, required: usize },

    #[error("Carousel: no slide wrapper matches '{selector}'")]
    MissingSlideWrap { selector: String },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Host error: {0}")]
    Host(String),
}

/// Error type alias for convenience
pub type Error = SlideletError;
