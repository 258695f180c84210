//! Carousel configuration
//!
//! Options are plain data so they can be read from JSON (as a page script
//! would pass them) or built in code. Keys are camelCase, and the short
//! legacy names (`slideWrap`, `slides`, `speed`, `animateClass`,
//! `infiniteWrap`, `minVisibleSlides`) are accepted as aliases.

use crate::animation::easing::EasingFunction;
use crate::core::constants::*;
use crate::{Result, SlideletError};
use serde::{Deserialize, Serialize};

/// How a committed slide change is animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TransitionMode {
    /// Apply the target transform at once and hold the sliding lock for the
    /// configured duration; the platform's own style transition does the easing.
    #[default]
    Timed,
    /// Drive the offset frame by frame along an easing curve.
    Eased {
        #[serde(default)]
        easing: EasingFunction,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselOptions {
    #[serde(alias = "slideWrap")]
    pub slide_wrap_selector: String,
    #[serde(alias = "slides")]
    pub slide_selector: String,
    /// Wrap from the last slide to the first and back
    #[serde(alias = "infiniteWrap")]
    pub infinite: bool,
    /// Minimum number of slides shown at once; also the clone count per side
    #[serde(alias = "minVisibleSlides")]
    pub display: usize,
    #[serde(alias = "speed")]
    pub transition_duration_ms: u32,
    pub initial_index: isize,
    #[serde(alias = "activeClassName")]
    pub active_class: String,
    #[serde(alias = "animateClass", alias = "animatingClassName")]
    pub animating_class: String,
    pub clone_class: String,
    #[serde(alias = "dragThresholdPx")]
    pub drag_threshold: f64,
    pub edge_resistance: f64,
    pub resize_debounce_ms: u32,
    /// A drag starting mid-transition cancels it instead of being ignored
    pub interrupt_on_drag: bool,
    pub transition: TransitionMode,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            slide_wrap_selector: DEFAULT_SLIDE_WRAP_SELECTOR.to_string(),
            slide_selector: DEFAULT_SLIDE_SELECTOR.to_string(),
            infinite: false,
            display: DEFAULT_DISPLAY,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            initial_index: 0,
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            animating_class: DEFAULT_ANIMATING_CLASS.to_string(),
            clone_class: DEFAULT_CLONE_CLASS.to_string(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            edge_resistance: DEFAULT_EDGE_RESISTANCE,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            interrupt_on_drag: true,
            transition: TransitionMode::Timed,
        }
    }
}

impl CarouselOptions {
    /// Parse and validate options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let options: CarouselOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display == 0 {
            return Err(SlideletError::InvalidOptions(
                "display must be at least 1".to_string(),
            ));
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(SlideletError::InvalidOptions(format!(
                "dragThreshold must be a non-negative number, got {}",
                self.drag_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.edge_resistance) {
            return Err(SlideletError::InvalidOptions(format!(
                "edgeResistance must be within [0, 1], got {}",
                self.edge_resistance
            )));
        }
        if self.slide_wrap_selector.trim().is_empty() || self.slide_selector.trim().is_empty() {
            return Err(SlideletError::InvalidOptions(
                "selectors must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CarouselOptions::default();
        assert_eq!(options.slide_wrap_selector, "ul");
        assert_eq!(options.slide_selector, "li");
        assert!(!options.infinite);
        assert_eq!(options.display, 1);
        assert_eq!(options.transition_duration_ms, 400);
        assert_eq!(options.initial_index, 0);
        assert_eq!(options.drag_threshold, 50.0);
        assert_eq!(options.transition, TransitionMode::Timed);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json_with_legacy_keys() {
        let options = CarouselOptions::from_json(
            r#"{"slideWrap": ".track", "slides": ".slide", "speed": 250, "infiniteWrap": true, "minVisibleSlides": 2}"#,
        )
        .unwrap();
        assert_eq!(options.slide_wrap_selector, ".track");
        assert_eq!(options.slide_selector, ".slide");
        assert_eq!(options.transition_duration_ms, 250);
        assert!(options.infinite);
        assert_eq!(options.display, 2);
        // untouched keys keep their defaults
        assert_eq!(options.active_class, "active");
    }

    #[test]
    fn test_from_json_eased_transition() {
        let options = CarouselOptions::from_json(
            r#"{"transition": {"mode": "eased", "easing": "easeOutQuad"}}"#,
        )
        .unwrap();
        assert_eq!(
            options.transition,
            TransitionMode::Eased {
                easing: EasingFunction::EaseOutQuad
            }
        );

        let options = CarouselOptions::from_json(r#"{"transition": {"mode": "eased"}}"#).unwrap();
        assert_eq!(
            options.transition,
            TransitionMode::Eased {
                easing: EasingFunction::EaseInOutCubic
            }
        );
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let options = CarouselOptions {
            display: 0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(SlideletError::InvalidOptions(_))));

        let options = CarouselOptions {
            edge_resistance: 1.5,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = CarouselOptions {
            drag_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let result = CarouselOptions::from_json("{infinite: yes}");
        assert!(matches!(result, Err(SlideletError::Serialization(_))));
    }

    #[test]
    fn test_json_roundtrip_keeps_camel_case() {
        let json = CarouselOptions::default().to_json().unwrap();
        assert!(json.contains("\"slideWrapSelector\""));
        assert!(json.contains("\"transitionDurationMs\""));
    }
}
