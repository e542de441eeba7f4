/// Scroll direction of the list (the primary axis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// How items are sized along both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSize {
    /// A plain list: every item is `size` pixels on both axes, one lane.
    Uniform(u32),
    /// A grid: lanes are packed across the secondary axis and items keep the
    /// `min_width : min_height` aspect ratio.
    ///
    /// Zero means "not provided" and is rejected with a [`crate::ConfigError`].
    Grid { min_width: u32, min_height: u32 },
}

impl Default for ItemSize {
    fn default() -> Self {
        Self::Uniform(0)
    }
}

/// Which edge of the viewport an item should be aligned to when scrolling to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StickTo {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A point in content coordinates (`x` = left, `y` = top).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u64,
    pub y: u64,
}

impl Point {
    pub const fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }
}

/// An item position expressed along the scroll axis and the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub primary: u64,
    pub secondary: u64,
}

impl ItemPosition {
    /// Maps the axis-relative position onto `left`/`top` for the given direction.
    pub fn to_point(self, direction: Direction) -> Point {
        match direction {
            Direction::Vertical => Point::new(self.secondary, self.primary),
            Direction::Horizontal => Point::new(self.primary, self.secondary),
        }
    }
}

/// The contiguous range of logical indexes that is currently materialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    pub first_index: usize,
    pub num_of_items: usize,
}

impl RenderWindow {
    pub fn is_empty(&self) -> bool {
        self.num_of_items == 0
    }

    /// One past the last index of the window (may exceed the dataset size).
    pub fn end_index(&self) -> usize {
        self.first_index.saturating_add(self.num_of_items)
    }

    /// The last index of the window, or `None` when the window is empty.
    pub fn last_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index() - 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first_index && index < self.end_index()
    }
}

/// The items that are actually inside the viewport (no overhang), inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize,
}

/// The band of scroll offsets for which the current window stays valid.
///
/// The band is half-open: `[min, max)`. `None` leaves that side unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub base: u64,
}

impl Threshold {
    pub const fn unbounded(base: u64) -> Self {
        Self {
            min: None,
            max: None,
            base,
        }
    }

    /// The band used before the first recomputation at offset zero.
    pub const fn seed(base: u64) -> Self {
        Self {
            min: None,
            max: Some(base),
            base,
        }
    }

    pub fn contains(&self, offset: u64) -> bool {
        self.min.is_none_or(|min| offset >= min) && self.max.is_none_or(|max| offset < max)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollBounds {
    pub client_width: u32,
    pub client_height: u32,
    pub scroll_width: u64,
    pub scroll_height: u64,
    pub max_left: u64,
    pub max_top: u64,
}

impl ScrollBounds {
    /// Maximum scroll offset along the primary axis.
    pub fn max_primary(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Vertical => self.max_top,
            Direction::Horizontal => self.max_left,
        }
    }
}

/// A scroll-into-view request whose target was computed from estimated sizes.
///
/// The engine re-targets it on every layout pass until the item's position is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingScroll {
    pub index: usize,
    pub stick_to: StickTo,
    pub offset: i64,
}
