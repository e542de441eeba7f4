use crate::*;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

/// Vertical list: 720px viewport, 30px items, overhang 3.
fn list_options(data_size: usize) -> WindowOptions {
    WindowOptions::new(data_size, ItemSize::Uniform(30)).with_client_size(Size::new(400, 720))
}

fn grid_options(data_size: usize) -> WindowOptions {
    WindowOptions::new(
        data_size,
        ItemSize::Grid {
            min_width: 180,
            min_height: 270,
        },
    )
    .with_client_size(Size::new(1280, 720))
    .with_spacing(20)
}

#[derive(Default)]
struct Recorded {
    windows: Mutex<Vec<RenderWindow>>,
    scrolls: Mutex<Vec<Point>>,
}

impl Recorded {
    fn windows(&self) -> Vec<RenderWindow> {
        self.windows.lock().unwrap().clone()
    }

    fn scrolls(&self) -> Vec<Point> {
        self.scrolls.lock().unwrap().clone()
    }
}

fn recording(options: WindowOptions) -> (WindowEngine, Arc<Recorded>) {
    let rec = Arc::new(Recorded::default());
    let windows = Arc::clone(&rec);
    let scrolls = Arc::clone(&rec);
    let options = options
        .with_on_update_items(Some(move |w| windows.windows.lock().unwrap().push(w)))
        .with_on_scroll_to(Some(move |p| scrolls.scrolls.lock().unwrap().push(p)));
    (WindowEngine::new(options).unwrap(), rec)
}

fn fresh_window(engine: &WindowEngine, offset: u64) -> RenderWindow {
    let metrics = *engine.metrics();
    resolve(
        offset,
        engine.data_size(),
        &metrics,
        &mut UniformLanes::new(&metrics),
    )
    .window
}

#[derive(Clone, Debug, Default)]
struct Node {
    shown: Option<(usize, Point)>,
    attaches: usize,
}

impl SlotHandle for Node {
    fn attach(&mut self, index: usize, position: Point) {
        self.shown = Some((index, position));
        self.attaches += 1;
    }

    fn detach(&mut self) {
        self.shown = None;
    }
}

#[test]
fn scenario_a_list_window_size() {
    let engine = WindowEngine::new(list_options(100)).unwrap();
    assert_eq!(
        engine.render_window(),
        RenderWindow {
            first_index: 0,
            num_of_items: 27
        }
    );
    // Seed band: ceil(3 / 2) lanes of 30px.
    assert_eq!(engine.threshold(), Threshold::seed(60));
}

#[test]
fn scenario_b_grid_metrics() {
    let engine = WindowEngine::new(grid_options(1000)).unwrap();
    let m = engine.metrics();
    assert_eq!(m.dimension_to_extent(), 6);
    assert_eq!(m.secondary.item_size, 196);
    assert_eq!(m.primary.item_size, 294);
    assert_eq!(engine.render_window().num_of_items, 36);
}

#[test]
fn scenario_c_empty_dataset() {
    let (mut engine, rec) = recording(list_options(0));
    assert_eq!(engine.render_window().num_of_items, 0);
    assert_eq!(engine.visible_range(), None);
    assert_eq!(engine.item_position(0), None);
    assert_eq!(engine.total_extent(), 0);

    let b = engine.scroll_bounds();
    assert_eq!(b.scroll_height, 0);
    assert_eq!(b.max_top, 0);

    engine.scroll_to_index(3, StickTo::Start, 0);
    engine.reveal_index(0);
    engine.on_scroll(500);
    assert!(rec.scrolls().is_empty());
    assert!(rec.windows().is_empty());
}

#[test]
fn scenario_d_scroll_past_the_end_clamps_to_last_item() {
    let (mut engine, rec) = recording(list_options(100));
    engine.scroll_to_index(100, StickTo::Start, 0);
    // Item 99 starts at 2970 but the list only scrolls to 3000 - 720.
    assert_eq!(engine.scroll_offset(), 2_280);
    assert_eq!(rec.scrolls(), vec![Point::new(0, 2_280)]);

    engine.scroll_to_index(99, StickTo::End, 0);
    assert_eq!(engine.scroll_offset(), 2_280);
    assert_eq!(engine.pending_scroll(), None);
}

#[test]
fn hysteresis_suppresses_recomputation_inside_the_band() {
    let (mut engine, rec) = recording(list_options(100));
    engine.on_scroll(10);
    engine.on_scroll(59);
    assert!(rec.windows().is_empty());

    engine.on_scroll(61);
    assert_eq!(engine.render_window().first_index, 1);
    assert_eq!(engine.threshold().min, Some(60));
    assert_eq!(engine.threshold().max, Some(90));

    engine.on_scroll(70);
    engine.on_scroll(89);
    assert_eq!(rec.windows().len(), 1);

    engine.on_scroll(90);
    assert_eq!(
        rec.windows(),
        vec![
            RenderWindow {
                first_index: 1,
                num_of_items: 27
            },
            RenderWindow {
                first_index: 2,
                num_of_items: 27
            },
        ]
    );
}

#[test]
fn notification_fires_only_when_the_window_changes() {
    let (mut engine, rec) = recording(list_options(100));
    engine.on_scroll(100);
    let n = rec.windows().len();

    // Every band exit that moves the window notifies once.
    engine.on_scroll(2_000);
    engine.on_scroll(100);
    assert_eq!(rec.windows().len(), n + 2);

    engine.set_client_size(Size::new(500, 720));
    assert_eq!(rec.windows().len(), n + 2);
}

#[test]
fn window_always_matches_a_fresh_resolution() {
    let mut rng = Lcg::new(7);
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    for _ in 0..2_000 {
        match rng.gen_range_usize(0, 10) {
            0 => engine.set_data_size(rng.gen_range_usize(0, 300)),
            1 => engine.set_client_size(Size::new(400, rng.gen_range_u32(0, 1_000))),
            _ => engine.on_scroll(rng.gen_range_u64(0, 10_000)),
        }
        let offset = engine.scroll_offset();
        let window = engine.render_window();
        assert_eq!(window, fresh_window(&engine, offset), "offset {offset}");
        assert!(engine.threshold().contains(offset));

        let ds = engine.data_size();
        let m = *engine.metrics();
        assert!(window.num_of_items <= ds);
        assert!(window.first_index <= m.max_first_index(ds, window.num_of_items));
    }
}

#[test]
fn variable_window_matches_a_fresh_resolution_across_measurements() {
    let mut rng = Lcg::new(23);
    for _ in 0..200 {
        let n = rng.gen_range_usize(1, 400);
        let spacing = rng.gen_range_u32(0, 10);
        let estimate = rng.gen_range_u32(0, 60);
        let prefix = rng.gen_range_usize(0, n + 1);
        let mut known: Vec<Option<u32>> = vec![None; n];
        for size in known.iter_mut().take(prefix) {
            *size = Some(rng.gen_range_u32(0, 90));
        }
        let sizes: Vec<u32> = known.iter().map_while(|s| *s).collect();
        let options = WindowOptions::variable(n, estimate, sizes)
            .with_spacing(spacing)
            .with_overhang(rng.gen_range_usize(0, 7))
            .with_client_size(Size::new(300, rng.gen_range_u32(0, 900)));
        let mut engine = WindowEngine::new(options).unwrap();

        for _ in 0..60 {
            if rng.gen_range_usize(0, 3) == 0 {
                let index = rng.gen_range_usize(0, n);
                let size = rng.gen_range_u32(0, 90);
                known[index] = Some(size);
                engine.set_item_size(index, size);
            } else {
                let max = engine.max_scroll_offset();
                engine.on_scroll(rng.gen_range_u64(0, max + 1));
            }

            let mut fresh = ItemPositionCache::new(n, spacing, estimate);
            for (i, size) in known.iter().enumerate() {
                if let Some(size) = size {
                    fresh.set_size(i, *size);
                }
            }
            let offset = engine.scroll_offset();
            let metrics = *engine.metrics();
            let expected = resolve(offset, n, &metrics, &mut fresh).window;
            assert_eq!(engine.render_window(), expected, "offset {offset}");
            assert!(engine.threshold().contains(offset), "offset {offset}");
        }
    }
}

#[test]
fn num_of_items_formula_holds_for_random_grids() {
    let mut rng = Lcg::new(11);
    for _ in 0..500 {
        let ds = rng.gen_range_usize(0, 5_000);
        let opts = WindowOptions::new(
            ds,
            ItemSize::Grid {
                min_width: rng.gen_range_u32(1, 400),
                min_height: rng.gen_range_u32(1, 400),
            },
        )
        .with_client_size(Size::new(
            rng.gen_range_u32(0, 2_000),
            rng.gen_range_u32(0, 2_000),
        ))
        .with_spacing(rng.gen_range_u32(0, 40))
        .with_overhang(rng.gen_range_usize(0, 8));
        let engine = WindowEngine::new(opts.clone()).unwrap();
        let m = engine.metrics();
        let d = m.dimension_to_extent();
        let lanes = u64::from(m.primary.client_size).div_ceil(m.primary.step()) as usize;
        assert!(d >= 1);
        assert_eq!(
            engine.render_window().num_of_items,
            ds.min(d * (lanes + opts.overhang))
        );
    }
}

#[test]
fn pinned_window_follows_growth_smaller_than_a_lane() {
    let (mut engine, rec) = recording(grid_options(1000));
    engine.scroll_to_position(u64::MAX);
    assert_eq!(engine.scroll_offset(), 51_698);
    assert_eq!(engine.render_window().first_index, 966);
    let threshold = engine.threshold();
    assert_eq!(threshold.max, None);

    engine.set_data_size(1003);
    assert_eq!(engine.render_window().first_index, 972);
    assert_eq!(engine.threshold(), threshold);
    assert_eq!(rec.windows().last().map(|w| w.first_index), Some(972));

    // A full lane or more re-resolves from the scroll offset instead.
    engine.set_data_size(1020);
    assert_eq!(engine.render_window().first_index, 978);
    assert_eq!(engine.scroll_offset(), 51_698);
}

#[test]
fn shrinking_clamps_the_offset_and_reports_it() {
    let (mut engine, rec) = recording(list_options(100));
    engine.scroll_to_position(2_280);
    engine.set_data_size(50);
    assert_eq!(engine.scroll_offset(), 780);
    assert_eq!(rec.scrolls(), vec![Point::new(0, 2_280), Point::new(0, 780)]);
    assert_eq!(engine.render_window().first_index, 23);
    assert_eq!(engine.render_window().num_of_items, 27);
}

#[test]
fn client_size_change_rebuilds_metrics() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    let epoch = engine.layout_epoch();
    engine.set_client_size(Size::new(400, 360));
    assert_eq!(engine.render_window().num_of_items, 15);
    assert!(engine.layout_epoch() > epoch);
    assert_eq!(engine.scroll_bounds().max_top, 2_640);
}

#[test]
fn rejected_options_leave_the_engine_untouched() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    engine.on_scroll(500);
    let window = engine.render_window();

    let err = engine.update_options(|o| {
        o.item_size = ItemSize::Grid {
            min_width: 0,
            min_height: 10,
        }
    });
    assert_eq!(err, Err(ConfigError::MissingMinWidth));
    assert_eq!(engine.options().item_size, ItemSize::Uniform(30));
    assert_eq!(engine.render_window(), window);

    let err = WindowEngine::new(grid_options(10).with_item_sizes(Some(vec![10u32; 10])));
    assert_eq!(err.err(), Some(ConfigError::ItemSizesInGrid));
}

#[test]
fn update_options_rebuilds_on_spacing_change() {
    let (mut engine, rec) = recording(list_options(100));
    engine.on_scroll(600);
    let before = engine.render_window();

    engine.update_options(|o| o.spacing = 10).unwrap();
    assert_eq!(engine.metrics().primary.grid_size, 40);
    // 600 / 40 = lane 15, one lane of overhang before it.
    assert_eq!(engine.render_window().first_index, 14);
    assert_ne!(engine.render_window(), before);
    assert_eq!(rec.windows().last().copied(), Some(engine.render_window()));
}

#[test]
fn uniform_positions_and_grid_points() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    assert_eq!(
        engine.item_position(3),
        Some(ItemPosition {
            primary: 90,
            secondary: 0
        })
    );
    assert_eq!(engine.item_position(100), None);

    let mut grid = WindowEngine::new(grid_options(1000)).unwrap();
    // Index 7 is lane 1, column 1.
    assert_eq!(grid.grid_position(7), Some(Point::new(216, 314)));

    let opts = WindowOptions::new(10, ItemSize::Uniform(50))
        .with_direction(Direction::Horizontal)
        .with_client_size(Size::new(300, 100));
    let mut row = WindowEngine::new(opts).unwrap();
    assert_eq!(row.grid_position(3), Some(Point::new(150, 0)));
    let b = row.scroll_bounds();
    assert_eq!(b.scroll_width, 500);
    assert_eq!(b.max_left, 200);
    assert_eq!(b.max_top, 0);
}

#[test]
fn variable_offsets_accumulate_sizes() {
    let sizes: Vec<u32> = (0..20).map(|i| 10 + (i % 4) * 10).collect();
    let opts = WindowOptions::variable(20, 25, sizes)
        .with_spacing(5)
        .with_client_size(Size::new(100, 100));
    let mut engine = WindowEngine::new(opts).unwrap();
    assert!(engine.is_variable());
    assert_eq!(engine.item_position(3).map(|p| p.primary), Some(75));
    assert_eq!(engine.item_size(3), 40);
    assert_eq!(engine.total_extent(), 500 + 19 * 5);
    assert_eq!(engine.scroll_bounds().max_top, 495);
}

#[test]
fn random_variable_offsets_match_prefix_sums() {
    let mut rng = Lcg::new(42);
    for _ in 0..50 {
        let n = rng.gen_range_usize(1, 200);
        let spacing = rng.gen_range_u32(0, 8);
        let sizes: Vec<u32> = (0..n).map(|_| rng.gen_range_u32(0, 60)).collect();
        let mut cache = ItemPositionCache::new(n, spacing, 20);
        cache.set_sizes(&sizes);

        let mut expected = 0u64;
        for (i, &size) in sizes.iter().enumerate() {
            assert_eq!(cache.offset_of(i), expected);
            assert!(cache.is_exact(i));
            expected += u64::from(size) + u64::from(spacing);
        }
        assert_eq!(cache.total_extent(), expected - u64::from(spacing));

        for _ in 0..20 {
            let offset = rng.gen_range_u64(0, expected + 1);
            let i = cache.index_at(offset);
            assert!(cache.offset_of(i) <= offset || i == 0);
            if i + 1 < n {
                assert!(cache.offset_of(i + 1) > offset);
            }
        }
    }
}

#[test]
fn measuring_items_moves_later_positions() {
    let opts = WindowOptions::variable(50, 20, vec![20u32; 10]).with_client_size(Size::new(100, 100));
    let mut engine = WindowEngine::new(opts).unwrap();
    let epoch = engine.layout_epoch();
    assert_eq!(engine.item_position(12).map(|p| p.primary), Some(240));

    assert!(engine.set_item_size(5, 70));
    assert_eq!(engine.item_position(12).map(|p| p.primary), Some(290));
    assert!(engine.layout_epoch() > epoch);
    assert!(!engine.set_item_size(5, 70));
    assert!(!engine.set_item_size(500, 70));
}

#[test]
fn pending_scroll_resolves_once_sizes_are_known() {
    let opts = WindowOptions::variable(50, 20, Vec::<u32>::new()).with_client_size(Size::new(100, 100));
    let (mut engine, rec) = recording(opts);

    engine.scroll_to_index(10, StickTo::Start, 0);
    assert_eq!(engine.scroll_offset(), 200);
    assert_eq!(
        engine.pending_scroll(),
        Some(PendingScroll {
            index: 10,
            stick_to: StickTo::Start,
            offset: 0
        })
    );

    engine.set_item_sizes(vec![30u32; 50]).unwrap();
    assert_eq!(engine.pending_scroll(), None);
    assert_eq!(engine.scroll_offset(), 300);
    assert_eq!(rec.scrolls(), vec![Point::new(0, 200), Point::new(0, 300)]);
    assert_eq!(engine.render_window().first_index, 9);
}

#[test]
fn pending_scroll_is_retargeted_per_measurement() {
    let opts = WindowOptions::variable(50, 20, Vec::<u32>::new()).with_client_size(Size::new(100, 100));
    let mut engine = WindowEngine::new(opts).unwrap();
    engine.scroll_to_index(3, StickTo::Start, 0);
    assert_eq!(engine.scroll_offset(), 60);

    engine.set_item_size(0, 40);
    assert_eq!(engine.scroll_offset(), 80);
    assert!(engine.pending_scroll().is_some());

    engine.set_item_size(1, 40);
    engine.set_item_size(2, 40);
    assert_eq!(engine.scroll_offset(), 120);
    assert!(engine.pending_scroll().is_some());

    // Exact once the target's own size is known too.
    engine.set_item_size(3, 10);
    assert_eq!(engine.scroll_offset(), 120);
    assert_eq!(engine.pending_scroll(), None);
}

#[test]
fn user_scroll_cancels_a_pending_scroll() {
    let opts = WindowOptions::variable(50, 20, Vec::<u32>::new()).with_client_size(Size::new(100, 100));
    let mut engine = WindowEngine::new(opts).unwrap();
    engine.scroll_to_index(10, StickTo::Start, 0);
    // Echo of the engine's own request keeps it.
    engine.on_scroll(200);
    assert!(engine.pending_scroll().is_some());

    engine.on_scroll(150);
    assert_eq!(engine.pending_scroll(), None);
    engine.set_item_sizes(vec![30u32; 50]).unwrap();
    assert_eq!(engine.scroll_offset(), 150);
}

#[test]
fn scroll_to_index_alignment() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    engine.scroll_to_index(40, StickTo::Center, 0);
    // 1200 - (720 - 30) / 2
    assert_eq!(engine.scroll_offset(), 855);
    engine.scroll_to_index(40, StickTo::End, 0);
    assert_eq!(engine.scroll_offset(), 510);
    engine.scroll_to_index(40, StickTo::Start, 30);
    assert_eq!(engine.scroll_offset(), 1_170);
    engine.scroll_to_index(1, StickTo::End, 0);
    assert_eq!(engine.scroll_offset(), 0);
    assert_eq!(engine.render_window().first_index, 0);
}

#[test]
fn reveal_index_scrolls_minimally() {
    let (mut engine, rec) = recording(list_options(100));
    engine.reveal_index(5);
    assert!(rec.scrolls().is_empty());

    engine.reveal_index(30);
    assert_eq!(engine.scroll_offset(), 210);
    engine.reveal_index(2);
    assert_eq!(engine.scroll_offset(), 60);
    assert_eq!(rec.scrolls(), vec![Point::new(0, 210), Point::new(0, 60)]);
}

#[test]
fn visible_range_for_variable_items() {
    let opts = WindowOptions::variable(100, 50, vec![50u32; 100])
        .with_spacing(10)
        .with_client_size(Size::new(100, 120));
    let mut engine = WindowEngine::new(opts).unwrap();
    assert_eq!(
        engine.visible_range(),
        Some(VisibleRange { first: 0, last: 1 })
    );

    // Items: [0,50) [60,110) [120,170) [180,230)...
    engine.on_scroll(55);
    assert_eq!(
        engine.visible_range(),
        Some(VisibleRange { first: 1, last: 2 })
    );
    engine.on_scroll(60);
    assert_eq!(
        engine.visible_range(),
        Some(VisibleRange { first: 1, last: 2 })
    );
}

#[test]
fn visible_range_for_uniform_lists() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    assert_eq!(
        engine.visible_range(),
        Some(VisibleRange { first: 0, last: 23 })
    );
    engine.on_scroll(2_280);
    assert_eq!(
        engine.visible_range(),
        Some(VisibleRange {
            first: 76,
            last: 99
        })
    );
}

#[test]
fn slots_keep_their_index_while_scrolling() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    let mut pool = SlotPool::<Node>::new();
    assert_eq!(engine.sync_slots(&mut pool, Node::default), 27);

    let mut offset = 0;
    while offset < 1_500 {
        let before = engine.render_window();
        offset += 45;
        engine.on_scroll(offset);
        let after = engine.render_window();

        let attaches: Vec<(usize, usize)> = (after.first_index..before.end_index())
            .filter_map(|i| pool.slot_for(i).map(|s| (i, s.handle.attaches)))
            .collect();
        let touched = engine.sync_slots(&mut pool, Node::default);
        assert_eq!(touched, after.first_index - before.first_index);
        for (i, n) in attaches {
            assert_eq!(pool.slot_for(i).map(|s| s.handle.attaches), Some(n));
        }
        for i in after.first_index..after.end_index() {
            let slot = pool.slot_for(i).unwrap();
            assert_eq!(slot.position(), Point::new(0, i as u64 * 30));
        }
    }
}

#[test]
fn slot_pool_repositions_after_layout_changes() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    let mut pool = SlotPool::<Node>::new();
    engine.sync_slots(&mut pool, Node::default);
    assert_eq!(engine.sync_slots(&mut pool, Node::default), 0);

    engine.update_options(|o| o.spacing = 2).unwrap();
    assert_eq!(engine.sync_slots(&mut pool, Node::default), 26);
    assert_eq!(pool.len(), 26);
    assert_eq!(pool.slot_for(2).unwrap().position(), Point::new(0, 64));
}

#[test]
fn grid_tail_slots_are_hidden() {
    let mut engine = WindowEngine::new(grid_options(40)).unwrap();
    engine.scroll_to_position(u64::MAX);
    let mut pool = SlotPool::<Node>::new();
    engine.sync_slots(&mut pool, Node::default);
    let w = engine.render_window();
    assert_eq!(w.first_index, 6);
    assert_eq!(w.end_index(), 42);
    assert_eq!(pool.iter_attached().count(), 34);
    assert!(pool.slot_for(40).is_none());
    let hidden = pool.slots().iter().filter(|s| s.handle.shown.is_none()).count();
    assert_eq!(hidden, 2);
}

#[test]
fn batch_update_coalesces_notifications() {
    let (mut engine, rec) = recording(list_options(100));
    engine.batch_update(|e| {
        e.on_scroll(300);
        e.on_scroll(600);
        e.set_client_size(Size::new(400, 600));
    });
    assert_eq!(rec.windows(), vec![engine.render_window()]);

    // A batch that returns to the starting window stays silent.
    engine.batch_update(|e| {
        let at = e.scroll_offset();
        e.on_scroll(1_500);
        e.on_scroll(at);
    });
    assert_eq!(rec.windows().len(), 1);
}

#[test]
fn frame_state_round_trips() {
    let mut engine = WindowEngine::new(list_options(100)).unwrap();
    engine.set_client_size(Size::new(400, 600));
    engine.scroll_to_position(500);
    let frame = engine.frame_state();
    assert_eq!(frame.scroll.offset, 500);
    assert_eq!(frame.viewport.client_size, Size::new(400, 600));

    let (mut restored, rec) = recording(list_options(100));
    restored.restore_frame_state(frame);
    assert_eq!(restored.scroll_offset(), 500);
    assert_eq!(restored.render_window(), engine.render_window());
    assert_eq!(rec.scrolls(), vec![Point::new(0, 500)]);
    assert_eq!(rec.windows().len(), 1);
}

#[test]
fn initial_offset_is_clamped_and_applied() {
    let engine = WindowEngine::new(list_options(100).with_initial_offset(10_000)).unwrap();
    assert_eq!(engine.scroll_offset(), 2_280);
    assert_eq!(engine.render_window().first_index, 73);
    assert_eq!(engine.threshold().max, None);
}

#[test]
fn switching_to_variable_sizes_rebuilds_positions() {
    let mut engine = WindowEngine::new(list_options(10)).unwrap();
    assert!(!engine.is_variable());
    assert!(!engine.set_item_size(0, 99));

    engine.set_item_sizes(vec![10u32, 20, 30]).unwrap();
    assert!(engine.is_variable());
    assert_eq!(engine.item_position(3).map(|p| p.primary), Some(60));
    // Unmeasured items use the uniform size as the estimate.
    assert_eq!(engine.total_extent(), 60 + 7 * 30);

    engine.update_options(|o| o.item_sizes = None).unwrap();
    assert!(!engine.is_variable());
    assert_eq!(engine.total_extent(), 300);
}

#[test]
fn zero_sized_items_do_not_divide_by_zero() {
    let mut engine = WindowEngine::new(WindowOptions::new(10, ItemSize::Uniform(0))).unwrap();
    engine.on_scroll(5);
    assert_eq!(engine.total_extent(), 0);
    assert_eq!(engine.render_window().num_of_items, 3);
    let counter = AtomicUsize::new(0);
    engine.batch_update(|_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(counter.load(Ordering::Relaxed), 1);
}
