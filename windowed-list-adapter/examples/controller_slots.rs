use windowed_list::{ItemSize, Point, Size, SlotHandle, StickTo, WindowOptions};
use windowed_list_adapter::{Controller, ScrollStrategy};

#[derive(Default)]
struct Row {
    shown: Option<usize>,
}

impl SlotHandle for Row {
    fn attach(&mut self, index: usize, _position: Point) {
        self.shown = Some(index);
    }

    fn detach(&mut self) {
        self.shown = None;
    }
}

fn main() {
    // Example: a controller driving a native scroll container without holding any UI objects.
    //
    // An adapter would:
    // - forward scroll/resize/data events to the controller
    // - apply any returned command to the real scroll container
    // - call sync_slots and render the attached rows
    let options =
        WindowOptions::new(10_000, ItemSize::Uniform(32)).with_client_size(Size::new(400, 640));
    let Ok(mut c) = Controller::<Row>::new(options, ScrollStrategy::Native) else {
        return;
    };
    c.sync_slots(Row::default);

    for offset in [0u64, 200, 4_000, 319_360, 400_000] {
        let command = c.on_scroll(offset);
        let touched = c.sync_slots(Row::default);
        println!(
            "scroll={offset} command={command:?} window={:?} touched={touched}",
            c.engine().render_window()
        );
    }

    println!("shrink: {:?}", c.on_data_size(100));
    println!("jump: {:?}", c.scroll_to_index(50, StickTo::Center, 0));
    println!("scroll_by: {:?}", c.scroll_by(-64));

    let rows: Vec<usize> = c.pool().slots().iter().filter_map(|s| s.handle.shown).collect();
    println!("attached rows: {rows:?}");
}
