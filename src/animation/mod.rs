pub mod easing;
pub mod transitions;

// Re-export commonly used types and functions for convenience
pub use easing::{
    ease_in_cubic, ease_in_out_cubic, ease_in_quad, ease_in_quart, ease_out_quad,
    EasingFunction,
};
pub use transitions::{Transition, TransitionFrame};
