//! Carousel builder for fluent configuration
//!
//! Collects options, platform features and the slide-change callback, then
//! attaches everything to a host and container in one step.

use crate::{
    animation::easing::EasingFunction,
    core::{
        carousel::{Carousel, SlideChangeCallback},
        config::{CarouselOptions, TransitionMode},
    },
    platform::{features::Features, host::Host},
    Result,
};

/// Builder for creating and configuring Carousel instances
pub struct CarouselBuilder {
    options: CarouselOptions,
    features: Features,
    on_slide_change: Option<SlideChangeCallback>,
}

impl CarouselBuilder {
    /// Create a new CarouselBuilder with default options and mouse input
    pub fn new() -> Self {
        Self {
            options: CarouselOptions::default(),
            features: Features::mouse(),
            on_slide_change: None,
        }
    }

    /// Replace all options at once
    pub fn with_options(mut self, options: CarouselOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the detected platform capabilities
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn slide_wrap(mut self, selector: impl Into<String>) -> Self {
        self.options.slide_wrap_selector = selector.into();
        self
    }

    pub fn slides(mut self, selector: impl Into<String>) -> Self {
        self.options.slide_selector = selector.into();
        self
    }

    /// Enable or disable wrap-around navigation
    pub fn infinite(mut self, infinite: bool) -> Self {
        self.options.infinite = infinite;
        self
    }

    /// Set the minimum number of visible slides
    pub fn display(mut self, display: usize) -> Self {
        self.options.display = display;
        self
    }

    pub fn transition_duration_ms(mut self, duration_ms: u32) -> Self {
        self.options.transition_duration_ms = duration_ms;
        self
    }

    pub fn initial_index(mut self, index: isize) -> Self {
        self.options.initial_index = index;
        self
    }

    pub fn drag_threshold(mut self, threshold: f64) -> Self {
        self.options.drag_threshold = threshold;
        self
    }

    pub fn edge_resistance(mut self, resistance: f64) -> Self {
        self.options.edge_resistance = resistance;
        self
    }

    /// Animate slide changes frame by frame along `easing`
    pub fn eased(mut self, easing: EasingFunction) -> Self {
        self.options.transition = TransitionMode::Eased { easing };
        self
    }

    /// Called with `(to, from)` whenever navigation lands on another slide
    pub fn on_slide_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, usize) + 'static,
    {
        self.on_slide_change = Some(Box::new(callback));
        self
    }

    /// Build the carousel. Initialization problems leave it inert; see
    /// [`Carousel::init_error`].
    pub fn build<H: Host>(self, host: H, container: H::Element) -> Carousel<H> {
        let mut carousel = Carousel::new(host, container, self.options, self.features);
        if let Some(callback) = self.on_slide_change {
            carousel.set_on_slide_change(callback);
        }
        carousel
    }

    /// Build the carousel, returning the initialization error if there was one
    pub fn try_build<H: Host>(self, host: H, container: H::Element) -> Result<Carousel<H>> {
        self.options.validate()?;
        let mut carousel = self.build(host, container);
        match carousel.take_init_error() {
            Some(err) => Err(err),
            None => Ok(carousel),
        }
    }
}

impl Default for CarouselBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::MemoryHost;
    use crate::SlideletError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_builder_applies_options() {
        let (host, container) = MemoryHost::with_slides(4, 100.0);
        let carousel = CarouselBuilder::new()
            .infinite(true)
            .display(2)
            .transition_duration_ms(250)
            .initial_index(3)
            .build(host, container);

        assert!(carousel.options().infinite);
        assert_eq!(carousel.options().transition_duration_ms, 250);
        assert_eq!(carousel.current_index(), 3);
        assert_eq!(carousel.clone_count(), 2);
    }

    #[test]
    fn test_builder_registers_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let (host, container) = MemoryHost::with_slides(3, 100.0);
        let mut carousel = CarouselBuilder::new()
            .on_slide_change(move |to, from| sink.borrow_mut().push((to, from)))
            .build(host, container);

        carousel.next();
        assert_eq!(*seen.borrow(), vec![(1, 0)]);
    }

    #[test]
    fn test_try_build_reports_insufficient_slides() {
        let (host, container) = MemoryHost::with_slides(1, 100.0);
        let result = CarouselBuilder::new().display(3).try_build(host, container);
        assert!(matches!(
            result,
            Err(SlideletError::InsufficientSlides {
                found: 1,
                required: 3
            })
        ));
    }

    #[test]
    fn test_try_build_reports_missing_wrapper() {
        let (host, container) = MemoryHost::with_slides(3, 100.0);
        let result = CarouselBuilder::new()
            .slide_wrap(".track")
            .try_build(host, container);
        assert!(matches!(result, Err(SlideletError::MissingSlideWrap { .. })));
    }

    #[test]
    fn test_try_build_rejects_invalid_options() {
        let (host, container) = MemoryHost::with_slides(3, 100.0);
        let result = CarouselBuilder::new()
            .edge_resistance(2.0)
            .try_build(host, container);
        assert!(matches!(result, Err(SlideletError::InvalidOptions(_))));
    }
}
