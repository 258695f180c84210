pub mod features;
pub mod host;
pub mod memory;

#[cfg(feature = "wasm")]
pub mod web;

pub use features::{Features, TransformProperty};
pub use host::{FrameId, Host, TimerId};
pub use memory::{ElementId, MemoryHost, Wakeup};

#[cfg(feature = "wasm")]
pub use web::{WebCarousel, WebHost};
