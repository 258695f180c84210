//! Platform capability profile.
//!
//! Detected once by the host and injected into the carousel, so behavior
//! under either input profile can be exercised deterministically.

use serde::{Deserialize, Serialize};

/// Which style property carries the strip transform on this platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformProperty {
    #[default]
    Standard,
    Webkit,
    Moz,
    O,
    Ms,
    /// No transform support; hosts fall back to positional offsets
    Unsupported,
}

impl TransformProperty {
    /// Candidates in order of preference
    pub const CANDIDATES: [TransformProperty; 5] = [
        TransformProperty::Standard,
        TransformProperty::Webkit,
        TransformProperty::Moz,
        TransformProperty::O,
        TransformProperty::Ms,
    ];

    /// Script-side property name, as probed on a style declaration
    pub fn js_name(&self) -> Option<&'static str> {
        match self {
            TransformProperty::Standard => Some("transform"),
            TransformProperty::Webkit => Some("webkitTransform"),
            TransformProperty::Moz => Some("MozTransform"),
            TransformProperty::O => Some("OTransform"),
            TransformProperty::Ms => Some("msTransform"),
            TransformProperty::Unsupported => None,
        }
    }

    /// Stylesheet property name
    pub fn css_name(&self) -> Option<&'static str> {
        match self {
            TransformProperty::Standard => Some("transform"),
            TransformProperty::Webkit => Some("-webkit-transform"),
            TransformProperty::Moz => Some("-moz-transform"),
            TransformProperty::O => Some("-o-transform"),
            TransformProperty::Ms => Some("-ms-transform"),
            TransformProperty::Unsupported => None,
        }
    }

    /// Pick the first candidate the platform reports as supported
    pub fn detect(is_supported: impl Fn(&str) -> bool) -> Self {
        Self::CANDIDATES
            .into_iter()
            .find(|candidate| candidate.js_name().is_some_and(&is_supported))
            .unwrap_or(TransformProperty::Unsupported)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, TransformProperty::Unsupported)
    }
}

/// Capability-detection result handed to a carousel at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Features {
    /// The platform delivers touch events; touch listeners are used exclusively
    pub touch: bool,
    pub transform: TransformProperty,
}

impl Features {
    pub fn new(touch: bool, transform: TransformProperty) -> Self {
        Self { touch, transform }
    }

    /// Mouse-driven desktop profile
    pub fn mouse() -> Self {
        Self::new(false, TransformProperty::Standard)
    }

    /// Touch-driven mobile profile
    pub fn touch() -> Self {
        Self::new(true, TransformProperty::Standard)
    }

    pub fn detect(touch: bool, is_supported: impl Fn(&str) -> bool) -> Self {
        Self::new(touch, TransformProperty::detect(is_supported))
    }
}
