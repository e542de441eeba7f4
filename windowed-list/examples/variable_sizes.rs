// Example: variable-size rows measured after render.
use windowed_list::{Size, StickTo, WindowEngine, WindowOptions};

fn main() {
    // Start with estimates only; real sizes arrive as rows are rendered.
    let options = WindowOptions::variable(5_000, 40, Vec::<u32>::new())
        .with_client_size(Size::new(600, 800))
        .with_on_scroll_to(Some(|p| println!("on_scroll_to: {p:?}")));
    let Ok(mut engine) = WindowEngine::new(options) else {
        return;
    };

    engine.scroll_to_index(300, StickTo::Start, 0);
    println!(
        "requested 300: offset={} pending={:?}",
        engine.scroll_offset(),
        engine.pending_scroll()
    );

    // Measure every rendered row until the pending scroll settles.
    let mut passes = 0;
    while engine.pending_scroll().is_some() && passes < 64 {
        passes += 1;
        let window = engine.render_window();
        for index in 0..window.end_index().min(engine.data_size()) {
            engine.set_item_size(index, 20 + (index % 7) as u32 * 10);
        }
        println!(
            "pass {passes}: window={:?} offset={}",
            engine.render_window(),
            engine.scroll_offset()
        );
    }

    println!(
        "settled: item 300 at {:?}, total_extent={}",
        engine.item_position(300),
        engine.total_extent()
    );
}
