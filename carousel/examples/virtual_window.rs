// Example: a virtualized carousel over a large slide count keeps only a few slides rendered.
use carousel::{Carousel, CarouselOptions};

fn main() {
    let mut c = Carousel::new(CarouselOptions::new(100_000).with_virtual(true, 1.0));
    c.set_container_size(400.0);
    println!("rendered={:?}", c.rendered_indices());

    c.slide_to(50_000);
    println!(
        "position={:?} window={:?} rendered={:?}",
        c.current_position(),
        c.virtual_window(),
        c.rendered_indices()
    );

    for _ in 0..3 {
        c.slide_next();
        println!("position={:?} translate={}", c.current_position(), c.translate());
    }
}
