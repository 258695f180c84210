//! Core constants for carousel behavior.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Selector for the element that wraps (and is translated along with) the slides.
pub const DEFAULT_SLIDE_WRAP_SELECTOR: &str = "ul";

/// Selector for the slides inside the wrapper.
pub const DEFAULT_SLIDE_SELECTOR: &str = "li";

/// Minimum number of slides visible at a time.
pub const DEFAULT_DISPLAY: usize = 1;

/// Slide transition length in milliseconds.
pub const DEFAULT_TRANSITION_DURATION_MS: u32 = 400;

/// Minimum horizontal travel, in pixels, before a drag commits to a slide change.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 50.0;

/// Damping applied to drags past the first or last slide when not wrapping.
pub const DEFAULT_EDGE_RESISTANCE: f64 = 0.3;

/// Quiet period after the last horizontal resize before re-measuring.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 150;

/// Marker placed on the current slide.
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// Marker placed on the slide wrapper while a transition is in flight.
pub const DEFAULT_ANIMATING_CLASS: &str = "animate";

/// Marker placed on decorative wrap-around clones.
pub const DEFAULT_CLONE_CLASS: &str = "clone";

/// Frame cadence of the virtual clock used by [`crate::platform::memory::MemoryHost`].
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Tags whose native drag behavior is disabled when a drag starts on them.
pub const NATIVE_DRAG_TAGS: [&str; 2] = ["IMG", "A"];
