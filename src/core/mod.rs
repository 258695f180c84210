pub mod builder;
pub mod carousel;
pub mod config;
pub mod constants;
pub mod geometry;

pub use builder::CarouselBuilder;
pub use carousel::{wrap_index, Carousel, SlideChangeCallback};
pub use config::{CarouselOptions, TransitionMode};
pub use geometry::Point;
