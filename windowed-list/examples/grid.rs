// Example: a responsive grid with a recycled slot pool.
use windowed_list::{ItemSize, Point, Size, SlotHandle, SlotPool, WindowEngine, WindowOptions};

struct Card {
    id: usize,
}

impl SlotHandle for Card {
    fn attach(&mut self, index: usize, position: Point) {
        println!("  card {} <- item {index} at ({}, {})", self.id, position.x, position.y);
    }

    fn detach(&mut self) {
        println!("  card {} hidden", self.id);
    }
}

fn main() {
    let options = WindowOptions::new(
        10_000,
        ItemSize::Grid {
            min_width: 180,
            min_height: 270,
        },
    )
    .with_client_size(Size::new(1280, 720))
    .with_spacing(20);
    let Ok(mut engine) = WindowEngine::new(options) else {
        return;
    };
    println!("metrics={:?}", engine.metrics());

    let mut pool = SlotPool::new();
    let mut next_id = 0;
    let mut make_card = || {
        next_id += 1;
        Card { id: next_id }
    };

    let touched = engine.sync_slots(&mut pool, &mut make_card);
    println!("initial sync touched {touched} slots");

    // One row down: only the entering row is rebound.
    for offset in [290, 580, 870] {
        engine.on_scroll(offset);
        println!("offset={offset} window={:?}", engine.render_window());
        let touched = engine.sync_slots(&mut pool, &mut make_card);
        println!("sync touched {touched} slots");
    }

    // Wider viewport: more columns, a new layout, a full refresh.
    engine.set_client_size(Size::new(1920, 720));
    println!("resized: metrics={:?}", engine.metrics());
    let touched = engine.sync_slots(&mut pool, &mut make_card);
    println!("resize sync touched {touched} slots");
}
