//! Time to offset curves.
//!
//! The free functions follow the classic `(t, b, c, d)` convention: elapsed
//! time, begin value, total change and duration. [`EasingFunction`] wraps
//! them for configuration and normalized use.

use serde::{Deserialize, Serialize};

pub fn ease_in_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t + b
}

pub fn ease_in_out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        c / 2.0 * t * t * t + b
    } else {
        let t = t - 2.0;
        c / 2.0 * (t * t * t + 2.0) + b
    }
}

pub fn ease_in_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t + b
}

pub fn ease_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

pub fn ease_in_quart(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    c * t * t * t * t + b
}

/// Easing curves available to frame-driven transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EasingFunction {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInCubic,
    #[default]
    EaseInOutCubic,
    EaseInQuart,
}

impl EasingFunction {
    /// Evaluate the curve at elapsed time `t` of `d`, moving from `b` by `c`.
    ///
    /// Times outside `[0, d]` are clamped, and a non-positive duration yields
    /// the end value.
    pub fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        if d <= 0.0 {
            return b + c;
        }
        let t = t.clamp(0.0, d);
        match self {
            EasingFunction::Linear => c * t / d + b,
            EasingFunction::EaseInQuad => ease_in_quad(t, b, c, d),
            EasingFunction::EaseOutQuad => ease_out_quad(t, b, c, d),
            EasingFunction::EaseInCubic => ease_in_cubic(t, b, c, d),
            EasingFunction::EaseInOutCubic => ease_in_out_cubic(t, b, c, d),
            EasingFunction::EaseInQuart => ease_in_quart(t, b, c, d),
        }
    }

    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        self.ease(t, 0.0, 1.0, 1.0)
    }

    pub fn all() -> [EasingFunction; 6] {
        [
            EasingFunction::Linear,
            EasingFunction::EaseInQuad,
            EasingFunction::EaseOutQuad,
            EasingFunction::EaseInCubic,
            EasingFunction::EaseInOutCubic,
            EasingFunction::EaseInQuart,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EasingFunction::Linear => "linear",
            EasingFunction::EaseInQuad => "easeInQuad",
            EasingFunction::EaseOutQuad => "easeOutQuad",
            EasingFunction::EaseInCubic => "easeInCubic",
            EasingFunction::EaseInOutCubic => "easeInOutCubic",
            EasingFunction::EaseInQuart => "easeInQuart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_curves_hit_endpoints() {
        for easing in EasingFunction::all() {
            assert!((easing.ease(0.0, 10.0, -300.0, 400.0) - 10.0).abs() < EPS, "{}", easing.name());
            assert!((easing.ease(400.0, 10.0, -300.0, 400.0) + 290.0).abs() < EPS, "{}", easing.name());
        }
    }

    #[test]
    fn test_curve_shapes() {
        assert_eq!(EasingFunction::Linear.apply(0.5), 0.5);
        assert_eq!(EasingFunction::EaseInQuad.apply(0.5), 0.25);
        assert_eq!(EasingFunction::EaseOutQuad.apply(0.5), 0.75);
        assert_eq!(EasingFunction::EaseInCubic.apply(0.5), 0.125);
        assert_eq!(EasingFunction::EaseInOutCubic.apply(0.5), 0.5);
        assert_eq!(EasingFunction::EaseInQuart.apply(0.5), 0.0625);
    }

    #[test]
    fn test_penner_signature() {
        // Halfway through a 400ms, 200px in-cubic move starting at 100px
        assert_eq!(ease_in_cubic(200.0, 100.0, 200.0, 400.0), 125.0);
        assert_eq!(ease_in_out_cubic(300.0, 0.0, 100.0, 400.0), 93.75);
    }

    #[test]
    fn test_degenerate_duration() {
        assert_eq!(EasingFunction::EaseInCubic.ease(5.0, 1.0, 2.0, 0.0), 3.0);
    }

    #[test]
    fn test_out_of_range_time_is_clamped() {
        assert_eq!(EasingFunction::EaseInQuad.ease(800.0, 0.0, 10.0, 400.0), 10.0);
        assert_eq!(EasingFunction::EaseInQuad.ease(-10.0, 0.0, 10.0, 400.0), 0.0);
    }

    #[test]
    fn test_easing_serde_names() {
        let json = serde_json::to_string(&EasingFunction::EaseInOutCubic).unwrap();
        assert_eq!(json, "\"easeInOutCubic\"");
        let parsed: EasingFunction = serde_json::from_str("\"easeOutQuad\"").unwrap();
        assert_eq!(parsed, EasingFunction::EaseOutQuad);
    }
}
