// Example: a million-row list, hysteresis, and scroll-to.
use windowed_list::{ItemSize, Size, StickTo, WindowEngine, WindowOptions};

fn main() {
    let options = WindowOptions::new(1_000_000, ItemSize::Uniform(24))
        .with_client_size(Size::new(480, 720))
        .with_on_update_items(Some(|w| println!("update_items: {w:?}")));
    let Ok(mut engine) = WindowEngine::new(options) else {
        return;
    };

    println!("metrics={:?}", engine.metrics());
    println!("scroll_bounds={:?}", engine.scroll_bounds());

    // Offsets inside the threshold band do not touch the window.
    for offset in [4, 12, 23, 24, 48, 123_456] {
        engine.on_scroll(offset);
        println!(
            "offset={offset} window={:?} threshold={:?}",
            engine.render_window(),
            engine.threshold()
        );
    }

    engine.scroll_to_index(999_999, StickTo::End, 0);
    println!(
        "after scroll_to_index: offset={} visible={:?}",
        engine.scroll_offset(),
        engine.visible_range()
    );
}
