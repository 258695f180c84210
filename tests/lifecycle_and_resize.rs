use slidelet::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Construction, cloning, teardown and resize handling
#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    const WIDTH: f64 = 200.0;
    const SETTLE_MS: f64 = 400.0;
    const DEBOUNCE_MS: f64 = 150.0;

    fn carousel_with(count: usize, options: CarouselOptions) -> Carousel<MemoryHost> {
        let _ = env_logger::builder().is_test(true).try_init();
        let (host, container) = MemoryHost::with_slides(count, WIDTH);
        Carousel::new(host, container, options, Features::mouse())
    }

    fn carousel(options: CarouselOptions) -> Carousel<MemoryHost> {
        carousel_with(5, options)
    }

    fn strip_indices(carousel: &Carousel<MemoryHost>) -> Vec<String> {
        let host = carousel.host();
        let wrap = *carousel.slide_wrap().unwrap();
        host.children(wrap)
            .iter()
            .map(|child| host.attribute(*child, "data-index").unwrap_or("?").to_string())
            .collect()
    }

    fn resize_slides(carousel: &mut Carousel<MemoryHost>, width: f64) {
        let wrap = *carousel.slide_wrap().unwrap();
        let children = carousel.host().children(wrap).to_vec();
        for child in children {
            carousel.host_mut().set_width(child, width);
        }
    }

    #[test]
    fn test_clones_surround_real_slides() {
        let carousel = carousel(CarouselOptions {
            infinite: true,
            display: 2,
            ..Default::default()
        });

        assert_eq!(carousel.slide_count(), 5);
        assert_eq!(carousel.clone_count(), 2);
        assert_eq!(carousel.clones().len(), 4);
        assert_eq!(carousel.base_offset(), 2.0 * WIDTH);
        assert_eq!(carousel.offset(), -2.0 * WIDTH);
        assert_eq!(
            strip_indices(&carousel),
            vec!["3", "4", "0", "1", "2", "3", "4", "0", "1"]
        );
    }

    #[test]
    fn test_clones_are_decorative() {
        let carousel = carousel(CarouselOptions {
            infinite: true,
            ..Default::default()
        });
        let host = carousel.host();

        for clone in carousel.clones() {
            assert!(host.has_class(*clone, "clone"));
            assert_eq!(host.attribute(*clone, "aria-hidden"), Some("true"));
            assert_eq!(host.attribute(*clone, "id"), None);
        }
        for slide in carousel.slides() {
            assert!(!host.has_class(*slide, "clone"));
            assert!(host.attribute(*slide, "id").is_some());
        }
    }

    #[test]
    fn test_no_clones_without_infinite() {
        let carousel = carousel(CarouselOptions {
            display: 2,
            ..Default::default()
        });
        assert_eq!(carousel.clone_count(), 0);
        assert_eq!(carousel.base_offset(), 0.0);
        assert_eq!(strip_indices(&carousel).len(), 5);
    }

    #[test]
    fn test_initial_index_is_a_silent_jump() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let (host, container) = MemoryHost::with_slides(5, WIDTH);
        let carousel = CarouselBuilder::new()
            .initial_index(7)
            .on_slide_change(move |to, from| sink.borrow_mut().push((to, from)))
            .build(host, container);

        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.offset(), -2.0 * WIDTH);
        assert!(!carousel.is_sliding());
        assert!(carousel.host().has_class(carousel.slides()[2], "active"));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_listeners_follow_pointer_source() {
        let carousel = carousel(CarouselOptions::default());
        let host = carousel.host();
        assert_eq!(host.listener_count(), 7);
        assert!(host.is_listening(ListenerTarget::Container, EventKind::MouseDown));
        assert!(host.is_listening(ListenerTarget::Container, EventKind::Click));
        assert!(host.is_listening(ListenerTarget::Window, EventKind::Resize));
        assert!(host.is_listening(ListenerTarget::Window, EventKind::OrientationChange));
        assert!(!host.is_listening(ListenerTarget::Container, EventKind::TouchStart));

        let (host, container) = MemoryHost::with_slides(5, WIDTH);
        let carousel = Carousel::new(host, container, CarouselOptions::default(), Features::touch());
        let host = carousel.host();
        assert_eq!(host.listener_count(), 7);
        assert!(host.is_listening(ListenerTarget::Container, EventKind::TouchStart));
        assert!(host.is_listening(ListenerTarget::Container, EventKind::TouchCancel));
        assert!(!host.is_listening(ListenerTarget::Container, EventKind::MouseDown));
    }

    #[test]
    fn test_transform_property_is_injected() {
        let (host, container) = MemoryHost::with_slides(3, WIDTH);
        let features = Features::new(false, TransformProperty::Webkit);
        let carousel = Carousel::new(host, container, CarouselOptions::default(), features);
        assert_eq!(
            carousel.host().transform_property(),
            Some(TransformProperty::Webkit)
        );
    }

    #[test]
    fn test_insufficient_slides_leave_carousel_inert() {
        let mut carousel = carousel_with(
            2,
            CarouselOptions {
                display: 3,
                infinite: true,
                ..Default::default()
            },
        );

        assert!(!carousel.is_active());
        assert!(matches!(
            carousel.init_error(),
            Some(SlideletError::InsufficientSlides {
                found: 2,
                required: 3
            })
        ));
        assert_eq!(carousel.host().listener_count(), 0);
        assert_eq!(carousel.clone_count(), 0);

        carousel.next();
        carousel.go(1);
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.is_sliding());

        carousel.disable(false);
        assert!(!carousel.is_active());
        assert!(!carousel.resize_viewport(500.0));
    }

    #[test]
    fn test_missing_slide_wrap_leaves_carousel_inert() {
        let carousel = carousel(CarouselOptions {
            slide_wrap_selector: ".track".to_string(),
            ..Default::default()
        });
        assert!(!carousel.is_active());
        assert!(matches!(
            carousel.init_error(),
            Some(SlideletError::MissingSlideWrap { .. })
        ));
    }

    #[test]
    fn test_destroy_unbinds_and_restores_markup() {
        let mut carousel = carousel(CarouselOptions {
            infinite: true,
            ..Default::default()
        });
        let wrap = *carousel.slide_wrap().unwrap();
        let clones = carousel.clones().to_vec();
        let slides = carousel.slides().to_vec();

        carousel.next();
        carousel.destroy();

        let host = carousel.host();
        assert!(carousel.is_destroyed());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_timers(), 0);
        assert_eq!(host.pending_frames(), 0);
        assert!(!host.has_class(wrap, "animate"));
        assert!(clones.iter().all(|clone| !host.is_attached(*clone)));
        assert!(slides.iter().all(|slide| !host.has_class(*slide, "active")));
        assert_eq!(host.children(wrap).len(), 5);
    }

    #[test]
    fn test_destroyed_carousel_is_inert() {
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        let mut carousel = carousel(CarouselOptions::default());
        carousel.set_on_slide_change(move |_, _| *sink.borrow_mut() += 1);

        carousel.destroy();
        carousel.destroy();

        carousel.next();
        carousel.prev();
        carousel.go(3);
        carousel.disable(false);
        carousel.advance(1_000.0);

        assert!(!carousel.is_active());
        assert!(!carousel.is_sliding());
        assert_eq!(*seen.borrow(), 0);

        let press = PointerEvent::mouse(PointerPhase::Start, 100.0, 0.0);
        assert_eq!(carousel.dispatch_pointer(&press, None), None);
        assert_eq!(carousel.dispatch_click(), None);
        assert!(!carousel.resize_viewport(640.0));
    }

    #[test]
    fn test_height_only_resize_is_ignored() {
        let mut carousel = carousel(CarouselOptions::default());
        assert!(carousel.resize_viewport(WIDTH));
        assert_eq!(carousel.host().pending_timers(), 0);
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut carousel = carousel(CarouselOptions {
            initial_index: 2,
            ..Default::default()
        });
        resize_slides(&mut carousel, 300.0);

        assert!(carousel.resize_viewport(300.0));
        carousel.advance(100.0);
        assert_eq!(carousel.slide_width(), WIDTH);

        // a second resize restarts the quiet period
        assert!(carousel.resize_viewport(310.0));
        assert_eq!(carousel.host().pending_timers(), 1);
        carousel.advance(100.0);
        assert_eq!(carousel.slide_width(), WIDTH);

        carousel.advance(DEBOUNCE_MS);
        assert_eq!(carousel.slide_width(), 300.0);
        assert_eq!(carousel.offset(), -600.0);
        assert!(!carousel.is_sliding());
    }

    #[test]
    fn test_resize_mid_transition_settles_slide() {
        let mut carousel = carousel(CarouselOptions::default());
        let wrap = *carousel.slide_wrap().unwrap();

        carousel.next();
        resize_slides(&mut carousel, 250.0);
        carousel.resize_viewport(250.0);

        assert!(!carousel.is_sliding());
        assert!(!carousel.host().has_class(wrap, "animate"));

        carousel.advance(DEBOUNCE_MS);
        assert_eq!(carousel.slide_width(), 250.0);
        assert_eq!(carousel.offset(), -250.0);

        carousel.next();
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_resize_relayout_keeps_clone_offset() {
        let mut carousel = carousel(CarouselOptions {
            infinite: true,
            display: 2,
            ..Default::default()
        });
        resize_slides(&mut carousel, 100.0);
        carousel.resize_viewport(100.0);
        carousel.advance(DEBOUNCE_MS);

        assert_eq!(carousel.base_offset(), 200.0);
        assert_eq!(carousel.offset(), -200.0);
    }
}
