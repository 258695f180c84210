use crate::animation::easing::EasingFunction;

/// A single eased move of the slide strip from one offset to another.
///
/// The start timestamp latches on the first sample, so a transition can be
/// created before the host knows when its first frame will land.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Offset in pixels at the start of the move
    pub from: f64,
    /// Offset in pixels once settled
    pub to: f64,
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Easing function
    pub easing: EasingFunction,
    started_at: Option<f64>,
}

/// Output of one transition sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub offset: f64,
    pub finished: bool,
}

impl Transition {
    pub fn new(from: f64, to: f64, duration_ms: f64, easing: EasingFunction) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            started_at: None,
        }
    }

    /// Timestamp of the first sample, if any
    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// Sample the transition at a frame timestamp (milliseconds)
    pub fn sample(&mut self, timestamp_ms: f64) -> TransitionFrame {
        let start = *self.started_at.get_or_insert(timestamp_ms);
        let elapsed = (timestamp_ms - start).max(0.0);

        if elapsed >= self.duration_ms {
            return TransitionFrame {
                offset: self.to,
                finished: true,
            };
        }

        TransitionFrame {
            offset: self
                .easing
                .ease(elapsed, self.from, self.to - self.from, self.duration_ms),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_latches_start() {
        let mut transition = Transition::new(0.0, -400.0, 400.0, EasingFunction::Linear);
        let frame = transition.sample(1_000.0);
        assert_eq!(transition.started_at(), Some(1_000.0));
        assert_eq!(frame.offset, 0.0);
        assert!(!frame.finished);
    }

    #[test]
    fn test_linear_progress_and_settle() {
        let mut transition = Transition::new(0.0, -400.0, 400.0, EasingFunction::Linear);
        transition.sample(0.0);
        assert_eq!(transition.sample(100.0).offset, -100.0);
        assert_eq!(transition.sample(200.0).offset, -200.0);

        let last = transition.sample(400.0);
        assert!(last.finished);
        assert_eq!(last.offset, -400.0);
    }

    #[test]
    fn test_zero_duration_settles_immediately() {
        let mut transition = Transition::new(10.0, 20.0, 0.0, EasingFunction::EaseInCubic);
        let frame = transition.sample(5.0);
        assert!(frame.finished);
        assert_eq!(frame.offset, 20.0);
    }

    #[test]
    fn test_eased_offsets_stay_between_endpoints() {
        let mut transition = Transition::new(-200.0, -600.0, 400.0, EasingFunction::EaseInOutCubic);
        transition.sample(0.0);
        for step in 1..25 {
            let frame = transition.sample(step as f64 * 16.0);
            assert!(frame.offset <= -200.0 && frame.offset >= -600.0);
        }
    }
}
