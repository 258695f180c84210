/// What a finished drag asks the carousel to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The pointer never moved; nothing to settle
    Stay,
    /// Moved, but not far enough; return to the current slide
    SnapBack,
    /// Dragged right at least the threshold
    Previous,
    /// Dragged left at least the threshold
    Next,
}

/// Horizontal drag tracker: `idle -> dragging -> idle`
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    threshold: f64,
    dragging: bool,
    start_x: f64,
    delta_x: f64,
    threshold_met: bool,
}

impl DragGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            dragging: false,
            start_x: 0.0,
            delta_x: 0.0,
            threshold_met: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn start_x(&self) -> f64 {
        self.start_x
    }

    /// Signed distance from the start of the drag to the last pointer reading
    pub fn delta_x(&self) -> f64 {
        self.delta_x
    }

    /// Whether the last drag travelled further than the threshold.
    ///
    /// Stays set after the drag ends so the trailing click can be swallowed;
    /// cleared when the next drag begins.
    pub fn threshold_met(&self) -> bool {
        self.threshold_met
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = x;
        self.delta_x = 0.0;
        self.threshold_met = false;
        self.dragging = true;
    }

    /// Track a pointer reading, returning the raw delta. No-op when idle.
    pub fn update(&mut self, x: f64) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        self.delta_x = x - self.start_x;
        self.threshold_met = self.delta_x.abs() > self.threshold;
        Some(self.delta_x)
    }

    /// End the drag and decide where it lands. `None` when idle.
    pub fn finish(&mut self) -> Option<DragOutcome> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let outcome = if self.delta_x == 0.0 {
            DragOutcome::Stay
        } else if self.delta_x.abs() < self.threshold {
            DragOutcome::SnapBack
        } else if self.delta_x > 0.0 {
            DragOutcome::Previous
        } else {
            DragOutcome::Next
        };
        Some(outcome)
    }

    /// Drop all drag state, including the click-suppression flag
    pub fn reset(&mut self) {
        self.dragging = false;
        self.delta_x = 0.0;
        self.threshold_met = false;
    }
}

/// Damp a drag delta by `factor`, for pulling past a hard edge
pub fn resist(delta: f64, factor: f64) -> f64 {
    delta * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_left_past_threshold() {
        let mut gesture = DragGesture::new(50.0);
        gesture.begin(100.0);
        assert_eq!(gesture.update(40.0), Some(-60.0));
        assert!(gesture.threshold_met());
        assert_eq!(gesture.finish(), Some(DragOutcome::Next));
        assert!(!gesture.is_dragging());
        // flag survives for click suppression
        assert!(gesture.threshold_met());
    }

    #[test]
    fn test_commit_right_past_threshold() {
        let mut gesture = DragGesture::new(50.0);
        gesture.begin(100.0);
        gesture.update(180.0);
        assert_eq!(gesture.finish(), Some(DragOutcome::Previous));
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut gesture = DragGesture::new(50.0);
        gesture.begin(100.0);
        gesture.update(130.0);
        assert!(!gesture.threshold_met());
        assert_eq!(gesture.finish(), Some(DragOutcome::SnapBack));
    }

    #[test]
    fn test_exact_threshold_commits_without_suppressing_click() {
        let mut gesture = DragGesture::new(50.0);
        gesture.begin(100.0);
        gesture.update(150.0);
        assert!(!gesture.threshold_met());
        assert_eq!(gesture.finish(), Some(DragOutcome::Previous));

        gesture.begin(100.0);
        gesture.update(50.0);
        assert_eq!(gesture.finish(), Some(DragOutcome::Next));
    }

    #[test]
    fn test_press_without_motion_stays() {
        let mut gesture = DragGesture::new(50.0);
        gesture.begin(100.0);
        assert_eq!(gesture.finish(), Some(DragOutcome::Stay));
    }

    #[test]
    fn test_idle_gesture_ignores_move_and_end() {
        let mut gesture = DragGesture::new(50.0);
        assert_eq!(gesture.update(10.0), None);
        assert_eq!(gesture.finish(), None);
    }

    #[test]
    fn test_begin_clears_previous_flag() {
        let mut gesture = DragGesture::new(50.0);
        gesture.begin(0.0);
        gesture.update(-90.0);
        gesture.finish();
        gesture.begin(0.0);
        assert!(!gesture.threshold_met());
        assert_eq!(gesture.delta_x(), 0.0);
    }

    #[test]
    fn test_resist() {
        assert!((resist(80.0, 0.3) - 24.0).abs() < 1e-9);
    }
}
