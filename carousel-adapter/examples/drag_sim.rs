use carousel::{CarouselOptions, PointerPosition, SlidesPerView};
use carousel_adapter::{Controller, Easing, Key};

fn main() {
    // Example: a controller driving a looping carousel from synthetic pointer events.
    //
    // An adapter would:
    // - forward pointer/wheel/key events with their timestamps
    // - call tick(now_ms) in a frame loop
    // - render the strip at the returned translate with the slides in dom_order()
    let mut c = Controller::new(
        CarouselOptions::new(6)
            .with_slides_per_view(SlidesPerView::Count(2.0))
            .with_space_between(10.0)
            .with_loop(true),
    );
    c.on_container_size(410.0);
    c.set_easing(Easing::SmoothStep);

    // A quick flick to the left.
    let mut now_ms = 0u64;
    c.pointer_down(PointerPosition::new(300.0, 100.0), now_ms);
    for x in [290.0, 260.0, 220.0] {
        now_ms += 16;
        c.pointer_move(PointerPosition::new(x, 100.0), now_ms);
    }
    let outcome = c.pointer_up(PointerPosition::new(220.0, 100.0), now_ms);
    println!(
        "release={outcome:?} position={:?} order={:?}",
        c.carousel().current_position(),
        c.carousel().dom_order()
    );

    while let Some(translate) = c.tick(now_ms) {
        println!("t={now_ms} translate={translate:.1}");
        now_ms += 48;
    }

    c.key(Key::ArrowLeft, now_ms);
    while c.tick(now_ms).is_some() {
        now_ms += 16;
    }
    println!(
        "done: position={:?} transform={}",
        c.carousel().current_position(),
        c.transform_string(now_ms)
    );
}
