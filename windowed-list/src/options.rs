use alloc::sync::Arc;

use crate::{ConfigError, Direction, ItemSize, Point, RenderWindow, Size};

/// Default number of extra lanes rendered around the viewport.
pub const DEFAULT_OVERHANG: usize = 3;

/// A callback fired when the render window changes (and only then).
pub type OnUpdateItems = Arc<dyn Fn(RenderWindow) + Send + Sync>;

/// A callback fired when the engine moves the scroll position on its own, e.g. after
/// clamping into shrunken bounds or resolving a scroll-to request.
///
/// The point is in content coordinates; the consumer is expected to apply it to its
/// scroll surface.
pub type OnScrollTo = Arc<dyn Fn(Point) + Send + Sync>;

/// Configuration for [`crate::WindowEngine`].
///
/// Cheap to clone: per-item sizes and callbacks are stored in `Arc`s, so adapters can tweak a
/// field and call `WindowEngine::set_options` without copying large buffers.
pub struct WindowOptions {
    pub data_size: usize,
    pub direction: Direction,
    pub item_size: ItemSize,
    /// Per-item sizes along the scroll axis.
    ///
    /// Presence switches the engine to variable-size mode; `item_size` then acts as the
    /// estimate for items whose size is not known yet. The slice may be shorter than
    /// `data_size`.
    pub item_sizes: Option<Arc<[u32]>>,
    /// Space between items, applied on both axes.
    pub spacing: u32,
    /// Extra lanes materialized outside the viewport, split before/after it.
    pub overhang: usize,
    pub client_size: Size,
    /// Scroll offset along the primary axis applied by `WindowEngine::new`.
    pub initial_offset: u64,
    pub on_update_items: Option<OnUpdateItems>,
    pub on_scroll_to: Option<OnScrollTo>,
}

impl Clone for WindowOptions {
    fn clone(&self) -> Self {
        Self {
            data_size: self.data_size,
            direction: self.direction,
            item_size: self.item_size,
            item_sizes: self.item_sizes.clone(),
            spacing: self.spacing,
            overhang: self.overhang,
            client_size: self.client_size,
            initial_offset: self.initial_offset,
            on_update_items: self.on_update_items.clone(),
            on_scroll_to: self.on_scroll_to.clone(),
        }
    }
}

impl WindowOptions {
    /// Creates options for a vertical list with no spacing and the default overhang.
    pub fn new(data_size: usize, item_size: ItemSize) -> Self {
        Self {
            data_size,
            direction: Direction::Vertical,
            item_size,
            item_sizes: None,
            spacing: 0,
            overhang: DEFAULT_OVERHANG,
            client_size: Size::default(),
            initial_offset: 0,
            on_update_items: None,
            on_scroll_to: None,
        }
    }

    /// Creates options for a variable-size list.
    ///
    /// `estimate` is used for every item whose entry in `item_sizes` is missing.
    pub fn variable(data_size: usize, estimate: u32, item_sizes: impl Into<Arc<[u32]>>) -> Self {
        Self::new(data_size, ItemSize::Uniform(estimate)).with_item_sizes(Some(item_sizes))
    }

    pub fn is_variable(&self) -> bool {
        self.item_sizes.is_some()
    }

    /// Checks the configuration contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.item_size {
            ItemSize::Grid { min_width: 0, .. } => Err(ConfigError::MissingMinWidth),
            ItemSize::Grid { min_height: 0, .. } => Err(ConfigError::MissingMinHeight),
            ItemSize::Grid { .. } if self.item_sizes.is_some() => {
                Err(ConfigError::ItemSizesInGrid)
            }
            _ => Ok(()),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_item_size(mut self, item_size: ItemSize) -> Self {
        self.item_size = item_size;
        self
    }

    pub fn with_item_sizes(mut self, item_sizes: Option<impl Into<Arc<[u32]>>>) -> Self {
        self.item_sizes = item_sizes.map(Into::into);
        self
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_overhang(mut self, overhang: usize) -> Self {
        self.overhang = overhang;
        self
    }

    pub fn with_client_size(mut self, client_size: Size) -> Self {
        self.client_size = client_size;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_on_update_items(
        mut self,
        on_update_items: Option<impl Fn(RenderWindow) + Send + Sync + 'static>,
    ) -> Self {
        self.on_update_items = on_update_items.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll_to(
        mut self,
        on_scroll_to: Option<impl Fn(Point) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll_to = on_scroll_to.map(|f| Arc::new(f) as _);
        self
    }

    /// Returns `true` when switching from `self` to `next` requires the metrics (and
    /// therefore the threshold band and window) to be rebuilt from scratch.
    pub(crate) fn metrics_differ(&self, next: &Self) -> bool {
        self.direction != next.direction
            || self.item_size != next.item_size
            || self.spacing != next.spacing
            || self.overhang != next.overhang
            || self.client_size != next.client_size
            || self.is_variable() != next.is_variable()
    }

    pub(crate) fn item_sizes_differ(&self, next: &Self) -> bool {
        match (&self.item_sizes, &next.item_sizes) {
            (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
            (None, None) => false,
            _ => true,
        }
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new(0, ItemSize::default())
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("data_size", &self.data_size)
            .field("direction", &self.direction)
            .field("item_size", &self.item_size)
            .field(
                "item_sizes",
                &self.item_sizes.as_ref().map(|sizes| sizes.len()),
            )
            .field("spacing", &self.spacing)
            .field("overhang", &self.overhang)
            .field("client_size", &self.client_size)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
