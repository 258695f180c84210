use slidelet::{
    input::events::{PointerEvent, PointerPhase},
    CarouselBuilder, CarouselOptions, EasingFunction, Features, MemoryHost,
};

/// Example of driving a carousel in headless mode without any UI
fn main() -> slidelet::Result<()> {
    env_logger::init();

    println!("🎠 Slidelet Headless Example");
    println!("============================");

    let options = CarouselOptions::from_json(r#"{"infinite": true, "display": 2, "speed": 300}"#)?;
    let (host, container) = MemoryHost::with_slides(5, 320.0);

    let mut carousel = CarouselBuilder::new()
        .with_options(options)
        .with_features(Features::mouse())
        .eased(EasingFunction::EaseInOutCubic)
        .on_slide_change(|to, from| println!("   ↪ slide changed {} -> {}", from, to))
        .try_build(host, container)?;

    println!("✅ Carousel created:");
    println!("   Slides: {}", carousel.slide_count());
    println!("   Clones per side: {}", carousel.clone_count());
    println!("   Slide width: {}px", carousel.slide_width());
    println!("   Offset: {}px", carousel.offset());

    println!("\n🎯 Navigating:");
    for step in ["next", "next", "prev", "go(-1)", "go(12)"] {
        match step {
            "next" => carousel.next(),
            "prev" => carousel.prev(),
            "go(-1)" => carousel.go(-1),
            _ => carousel.go(12),
        }

        // sample the transition a few frames in, then let it settle
        carousel.advance(100.0);
        let mid = carousel.offset();
        carousel.advance(400.0);
        println!(
            "   📍 {:<7} index {} (mid-flight {:.1}px, settled {:.1}px)",
            step,
            carousel.current_index(),
            mid,
            carousel.offset()
        );
    }

    println!("\n🚀 Dragging:");
    let drags = [(400.0, 300.0), (300.0, 380.0), (300.0, 310.0)];
    for (from, to) in drags {
        carousel.dispatch_pointer(&PointerEvent::mouse(PointerPhase::Start, from, 0.0), None);
        carousel.dispatch_pointer(&PointerEvent::mouse(PointerPhase::Move, to, 0.0), None);
        let response =
            carousel.dispatch_pointer(&PointerEvent::mouse(PointerPhase::End, to, 0.0), None);
        carousel.advance(400.0);

        println!(
            "   👆 {:>5.0}px -> index {} ({:?})",
            to - from,
            carousel.current_index(),
            response.unwrap_or_default()
        );
    }

    println!("\n📐 Resizing to 480px:");
    let wrap = carousel.slide_wrap().copied();
    if let Some(wrap) = wrap {
        let children = carousel.host().children(wrap).to_vec();
        for child in children {
            carousel.host_mut().set_width(child, 480.0);
        }
    }
    carousel.resize_viewport(480.0);
    carousel.advance(200.0);
    println!(
        "   Slide width {}px, offset {}px",
        carousel.slide_width(),
        carousel.offset()
    );

    carousel.destroy();
    println!("\n🧹 Destroyed; listeners left: {}", carousel.host().listener_count());

    Ok(())
}
