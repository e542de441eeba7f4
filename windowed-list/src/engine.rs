use alloc::sync::Arc;
use core::mem;

use crate::bounds;
use crate::resolver::{self, Resolution, UniformLanes};
use crate::{
    ConfigError, Direction, FrameState, ItemPosition, ItemPositionCache, Metrics, PendingScroll,
    Point, RenderWindow, ScrollBounds, ScrollState, Size, SlotHandle, SlotPool, StickTo,
    Threshold, ViewportState, VisibleRange, WindowOptions,
};

/// A headless windowing engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it with explicit calls: viewport size, scroll offsets, dataset size
///   and (for variable lists) item measurements.
/// - Rendering is exposed through [`RenderWindow`], per-index positions, and
///   [`WindowEngine::sync_slots`] for consumers that recycle render nodes.
///
/// Methods that read positions take `&mut self` because variable-size offsets are computed
/// lazily and cached.
#[derive(Clone, Debug)]
pub struct WindowEngine {
    options: WindowOptions,
    metrics: Metrics,
    /// Present in variable-size mode only.
    positions: Option<ItemPositionCache>,
    scroll_offset: u64,
    window: RenderWindow,
    threshold: Threshold,
    pending: Option<PendingScroll>,
    layout_epoch: u64,
    batch_depth: usize,
    batch_start: RenderWindow,
}

impl WindowEngine {
    /// Creates an engine from options.
    ///
    /// `options.initial_offset` is clamped into the scroll bounds and applied immediately. No
    /// notification is fired; read [`WindowEngine::render_window`] for the initial window.
    pub fn new(options: WindowOptions) -> Result<Self, ConfigError> {
        let metrics = Metrics::calculate(&options)?;
        let positions = build_positions(&options, &metrics);
        wdebug!(
            data_size = options.data_size,
            variable = options.is_variable(),
            overhang = options.overhang,
            "WindowEngine::new"
        );
        let mut engine = Self {
            metrics,
            positions,
            scroll_offset: 0,
            window: RenderWindow::default(),
            threshold: Threshold::unbounded(metrics.threshold_base),
            pending: None,
            layout_epoch: 0,
            batch_depth: 0,
            batch_start: RenderWindow::default(),
            options,
        };

        let offset = engine.options.initial_offset.min(engine.max_scroll_offset());
        engine.scroll_offset = offset;
        if offset == 0 && engine.positions.is_none() {
            let data_size = engine.options.data_size;
            engine.window = RenderWindow {
                first_index: 0,
                num_of_items: engine.metrics.num_of_items(data_size),
            };
            engine.threshold = resolver::seed_threshold(data_size, &engine.metrics);
        } else {
            let resolution = engine.resolve_at(offset);
            engine.apply(resolution);
        }
        Ok(engine)
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn data_size(&self) -> usize {
        self.options.data_size
    }

    pub fn direction(&self) -> Direction {
        self.options.direction
    }

    pub fn is_variable(&self) -> bool {
        self.positions.is_some()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn render_window(&self) -> RenderWindow {
        self.window
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// The scroll-into-view request still waiting for exact item positions, if any.
    pub fn pending_scroll(&self) -> Option<PendingScroll> {
        self.pending
    }

    /// Incremented whenever item positions may have moved without the window moving.
    ///
    /// Slot pools compare it to decide whether every slot needs repositioning.
    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    /// Replaces the options, rebuilding only what the difference requires.
    ///
    /// On error the engine is left untouched.
    pub fn set_options(&mut self, options: WindowOptions) -> Result<(), ConfigError> {
        let metrics = Metrics::calculate(&options)?;
        let prev = mem::replace(&mut self.options, options);
        wtrace!(
            data_size = self.options.data_size,
            overhang = self.options.overhang,
            "WindowEngine::set_options"
        );

        self.batch_update(|e| {
            let metrics_changed = prev.metrics_differ(&e.options) || metrics != e.metrics;
            let sizes_changed = prev.item_sizes_differ(&e.options);
            if metrics_changed {
                e.apply_metrics(metrics, sizes_changed);
                return;
            }
            if prev.data_size != e.options.data_size {
                e.data_size_changed(prev.data_size);
            }
            if sizes_changed {
                if let (Some(cache), Some(sizes)) = (&mut e.positions, &e.options.item_sizes) {
                    cache.set_sizes(sizes);
                }
                e.relayout();
            }
        });
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut WindowOptions),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Batches multiple updates into a single `on_update_items` notification.
    ///
    /// The notification fires once at the end, and only if the window differs from the one
    /// before the batch. `on_scroll_to` is never deferred.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        if self.batch_depth == 0 {
            self.batch_start = self.window;
        }
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            let start = self.batch_start;
            self.notify(start);
        }
    }

    /// Applies a new viewport size. This is a metrics change.
    pub fn set_client_size(&mut self, client_size: Size) {
        if self.options.client_size == client_size {
            return;
        }
        self.options.client_size = client_size;
        // Changing the client size cannot invalidate options that already validated.
        let metrics = Metrics::from_valid(&self.options);
        self.batch_update(|e| e.apply_metrics(metrics, false));
    }

    /// Feeds a scroll offset (primary axis) reported by the consumer.
    ///
    /// The window is only recomputed when `offset` leaves the current threshold band.
    pub fn on_scroll(&mut self, offset: u64) {
        if offset != self.scroll_offset && self.pending.take().is_some() {
            wtrace!(offset, "on_scroll: user scroll cancels pending scroll-into-view");
        }
        self.scroll_offset = offset;
        if self.threshold.contains(offset) {
            return;
        }
        let prev = self.window;
        let resolution = self.resolve_at(offset);
        self.apply(resolution);
        self.notify(prev);
    }

    /// Changes the number of items.
    pub fn set_data_size(&mut self, data_size: usize) {
        let prev = self.options.data_size;
        if prev == data_size {
            return;
        }
        self.options.data_size = data_size;
        self.batch_update(|e| e.data_size_changed(prev));
    }

    /// Records the measured size of one item. Variable-size mode only.
    ///
    /// Returns `true` when the size changed (and the layout was refreshed).
    pub fn set_item_size(&mut self, index: usize, size: u32) -> bool {
        let Some(cache) = &mut self.positions else {
            wwarn!(index, "set_item_size: ignored in uniform mode");
            return false;
        };
        if !cache.set_size(index, size) {
            return false;
        }
        wtrace!(index, size, "set_item_size");
        self.batch_update(|e| e.relayout());
        true
    }

    /// Replaces every per-item size, switching to variable-size mode if needed.
    pub fn set_item_sizes(&mut self, sizes: impl Into<Arc<[u32]>>) -> Result<(), ConfigError> {
        let sizes = sizes.into();
        self.update_options(|o| o.item_sizes = Some(sizes))
    }

    /// Scrolls so that `index` is aligned to `stick_to`, shifted by `offset` pixels.
    ///
    /// Indexes past the end clamp to the last item. When the target relies on estimated sizes
    /// the request stays pending and is re-targeted as measurements arrive.
    pub fn scroll_to_index(&mut self, index: usize, stick_to: StickTo, offset: i64) {
        let Some(last) = self.options.data_size.checked_sub(1) else {
            return;
        };
        let index = index.min(last);
        let target = self.aligned_offset(index, stick_to, offset);
        self.pending = (!self.is_exact(index)).then_some(PendingScroll {
            index,
            stick_to,
            offset,
        });
        wtrace!(index, target, pending = self.pending.is_some(), "scroll_to_index");
        self.scroll_to(target);
    }

    /// Scrolls to an absolute primary-axis offset, clamped into the scroll bounds.
    pub fn scroll_to_position(&mut self, offset: u64) {
        self.pending = None;
        let target = offset.min(self.max_scroll_offset());
        self.scroll_to(target);
    }

    /// Scrolls the minimum distance needed to show `index` entirely.
    ///
    /// Does nothing when the item is already fully visible.
    pub fn reveal_index(&mut self, index: usize) {
        let Some(last) = self.options.data_size.checked_sub(1) else {
            return;
        };
        let index = index.min(last);
        let position = self.primary_position(index);
        let size = self.item_size(index);
        let max = self.max_scroll_offset();
        let Some(target) = bounds::reveal_offset(
            position,
            size,
            self.metrics.primary.client_size,
            self.scroll_offset,
            max,
        ) else {
            return;
        };
        let stick_to = if target < self.scroll_offset {
            StickTo::Start
        } else {
            StickTo::End
        };
        self.pending = (!self.is_exact(index)).then_some(PendingScroll {
            index,
            stick_to,
            offset: 0,
        });
        self.scroll_to(target);
    }

    /// Axis-relative position of `index`, or `None` when it is out of range.
    pub fn item_position(&mut self, index: usize) -> Option<ItemPosition> {
        if index >= self.options.data_size {
            return None;
        }
        Some(match &mut self.positions {
            Some(cache) => ItemPosition {
                primary: cache.offset_of(index),
                secondary: 0,
            },
            None => self.metrics.uniform_position(index),
        })
    }

    /// `left`/`top` of `index` in content coordinates.
    pub fn grid_position(&mut self, index: usize) -> Option<Point> {
        let direction = self.options.direction;
        self.item_position(index).map(|p| p.to_point(direction))
    }

    /// Primary-axis size of `index` (the estimate when it is not measured yet).
    pub fn item_size(&self, index: usize) -> u32 {
        match &self.positions {
            Some(cache) => cache.size_of(index),
            None => self.metrics.primary.item_size,
        }
    }

    /// Total primary-axis extent of the content.
    pub fn total_extent(&mut self) -> u64 {
        match &mut self.positions {
            Some(cache) => cache.total_extent(),
            None => self.metrics.uniform_extent(self.options.data_size),
        }
    }

    pub fn scroll_bounds(&mut self) -> ScrollBounds {
        let extent = self.total_extent();
        bounds::scroll_bounds(&self.metrics, self.options.direction, extent)
    }

    /// Largest valid primary-axis scroll offset.
    pub fn max_scroll_offset(&mut self) -> u64 {
        self.total_extent()
            .saturating_sub(u64::from(self.metrics.primary.client_size))
    }

    /// Items inside the viewport at the current offset, excluding the overhang.
    pub fn visible_range(&mut self) -> Option<VisibleRange> {
        let data_size = self.options.data_size;
        let scroll = self.scroll_offset;
        let client = u64::from(self.metrics.primary.client_size);
        let Some(cache) = &mut self.positions else {
            return bounds::uniform_visible_range(&self.metrics, data_size, scroll);
        };
        let last_index = data_size.checked_sub(1)?;

        let mut first = cache.index_at(scroll);
        if cache.bottom_of(first) <= scroll {
            // `scroll` sits in the gap after `first`.
            first = (first + 1).min(last_index);
        }
        let end = scroll.saturating_add(client);
        let last = cache.index_at(end.saturating_sub(1)).min(last_index);
        Some(VisibleRange {
            first,
            last: last.max(first),
        })
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: ViewportState {
                client_size: self.options.client_size,
            },
            scroll: ScrollState {
                offset: self.scroll_offset,
            },
        }
    }

    /// Restores viewport + scroll state from a previously captured snapshot.
    ///
    /// The offset is clamped and reported through `on_scroll_to`.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.batch_update(|e| {
            e.set_client_size(frame.viewport.client_size);
            e.scroll_to_position(frame.scroll.offset);
        });
    }

    /// Attaches the current window to `pool`, creating handles on demand.
    ///
    /// Returns the number of slots that were (re)bound.
    pub fn sync_slots<H: SlotHandle>(
        &mut self,
        pool: &mut SlotPool<H>,
        make_handle: impl FnMut() -> H,
    ) -> usize {
        let window = self.window;
        let data_size = self.options.data_size;
        let epoch = self.layout_epoch;
        pool.sync(
            window,
            data_size,
            epoch,
            |index| self.grid_position(index).unwrap_or_default(),
            make_handle,
        )
    }

    fn resolve_at(&mut self, offset: u64) -> Resolution {
        let data_size = self.options.data_size;
        match &mut self.positions {
            Some(cache) => resolver::resolve(offset, data_size, &self.metrics, cache),
            None => resolver::resolve(
                offset,
                data_size,
                &self.metrics,
                &mut UniformLanes::new(&self.metrics),
            ),
        }
    }

    fn apply(&mut self, resolution: Resolution) {
        self.window = resolution.window;
        self.threshold = resolution.threshold;
    }

    fn notify(&self, prev: RenderWindow) {
        if self.batch_depth > 0 || self.window == prev {
            return;
        }
        if let Some(cb) = &self.options.on_update_items {
            cb(self.window);
        }
    }

    fn emit_scroll_to(&self, offset: u64) {
        if let Some(cb) = &self.options.on_scroll_to {
            let position = ItemPosition {
                primary: offset,
                secondary: 0,
            };
            cb(position.to_point(self.options.direction));
        }
    }

    /// Moves to `target` on the engine's own initiative and tells the consumer.
    fn scroll_to(&mut self, target: u64) {
        let prev = self.window;
        self.scroll_offset = target;
        self.emit_scroll_to(target);
        if !self.threshold.contains(target) {
            let resolution = self.resolve_at(target);
            self.apply(resolution);
        }
        self.notify(prev);
    }

    fn primary_position(&mut self, index: usize) -> u64 {
        self.item_position(index).map_or(0, |p| p.primary)
    }

    fn is_exact(&mut self, index: usize) -> bool {
        self.positions
            .as_mut()
            .is_none_or(|cache| cache.is_exact(index))
    }

    fn aligned_offset(&mut self, index: usize, stick_to: StickTo, offset: i64) -> u64 {
        let position = self.primary_position(index);
        let size = self.item_size(index);
        let max = self.max_scroll_offset();
        bounds::aligned_offset(
            position,
            size,
            self.metrics.primary.client_size,
            stick_to,
            offset,
            max,
        )
    }

    /// Rebuilds everything derived from the metrics.
    fn apply_metrics(&mut self, metrics: Metrics, sizes_changed: bool) {
        wdebug!(
            dimension_to_extent = metrics.dimension_to_extent(),
            grid_size = metrics.primary.grid_size,
            "apply_metrics"
        );
        self.metrics = metrics;
        // Measurements survive a viewport change unless the sizes themselves were replaced.
        let keep_measurements =
            !sizes_changed && self.positions.is_some() == self.options.is_variable();
        if keep_measurements {
            if let Some(cache) = &mut self.positions {
                cache.invalidate(metrics.spacing, metrics.primary.item_size);
                cache.set_len(self.options.data_size);
            }
        } else {
            self.positions = build_positions(&self.options, &self.metrics);
        }
        self.relayout();
    }

    fn data_size_changed(&mut self, prev_data_size: usize) {
        let data_size = self.options.data_size;
        let d = self.metrics.dimension_to_extent();
        let prev_max = self
            .metrics
            .max_first_index(prev_data_size, self.window.num_of_items);
        let was_pinned = self.window.first_index == prev_max && prev_max > 0;
        wdebug!(prev_data_size, data_size, was_pinned, "data_size_changed");

        if let Some(cache) = &mut self.positions {
            cache.set_len(data_size);
        }

        let grew_less_than_a_lane = data_size > prev_data_size && data_size - prev_data_size < d;
        if was_pinned && grew_less_than_a_lane {
            // Stay pinned to the end; the band is left as is.
            let num_of_items = self.metrics.num_of_items(data_size);
            self.window = RenderWindow {
                first_index: self.metrics.max_first_index(data_size, num_of_items),
                num_of_items,
            };
            self.layout_epoch = self.layout_epoch.wrapping_add(1);
            self.retarget_pending();
        } else {
            self.relayout();
        }
    }

    /// Clamps the offset into the current bounds and recomputes the window from it.
    fn relayout(&mut self) {
        let max = self.max_scroll_offset();
        if self.scroll_offset > max {
            self.scroll_offset = max;
            self.emit_scroll_to(max);
        }
        let resolution = self.resolve_at(self.scroll_offset);
        self.apply(resolution);
        self.layout_epoch = self.layout_epoch.wrapping_add(1);
        self.retarget_pending();
    }

    fn retarget_pending(&mut self) {
        let Some(pending) = self.pending else {
            return;
        };
        let Some(last) = self.options.data_size.checked_sub(1) else {
            self.pending = None;
            return;
        };
        let index = pending.index.min(last);
        if self.is_exact(index) {
            self.pending = None;
        }
        let target = self.aligned_offset(index, pending.stick_to, pending.offset);
        wtrace!(index, target, done = self.pending.is_none(), "retarget_pending");
        if target != self.scroll_offset {
            self.scroll_to(target);
        }
    }
}

fn build_positions(options: &WindowOptions, metrics: &Metrics) -> Option<ItemPositionCache> {
    options.item_sizes.as_ref().map(|sizes| {
        let mut cache =
            ItemPositionCache::new(options.data_size, metrics.spacing, metrics.primary.item_size);
        cache.set_sizes(sizes);
        cache
    })
}
