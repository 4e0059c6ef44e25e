// Example: a looping three-up carousel driven by prev/next intents.
use carousel::{Carousel, CarouselEvent, CarouselOptions, SlidesPerView};

fn main() {
    let options = CarouselOptions::new(8)
        .with_slides_per_view(SlidesPerView::Count(3.0))
        .with_space_between(12.0)
        .with_step_slides(2)
        .with_loop(true)
        .with_on_event(Some(|c: &Carousel, e: &CarouselEvent| {
            println!("event={e:?} position={:?}", c.current_position());
        }));
    let mut c = Carousel::new(options);
    c.set_container_size(960.0);

    println!("slide_size={}", c.slide_size(0));
    println!("order={:?} translate={}", c.slide_order(), c.translate());

    for _ in 0..5 {
        c.slide_next();
        println!(
            "position={:?} order={:?} visible={:?} transform={}",
            c.current_position(),
            c.slide_order(),
            c.visible_indices(),
            c.transform_string()
        );
    }

    c.slide_to(7);
    let state = c.render_state();
    println!("active={:?} rendered={:?}", state.active_index, state.rendered_indices);
}
