//! Maps a scroll offset to the first materialized index and the band of offsets for which that
//! answer stays valid.

use crate::{Metrics, RenderWindow, Threshold};

/// Lane geometry along the primary axis.
///
/// A lane is one row (vertical) or column (horizontal) of `dimension_to_extent` items. Uniform
/// lists compute lanes arithmetically; variable lists read them from the position cache, which
/// is why both methods take `&mut self`.
pub trait LaneLayout {
    /// The lane whose `[lane_top(k), lane_top(k + 1))` interval contains `offset`.
    fn lane_at(&mut self, offset: u64) -> usize;

    /// Start offset of `lane`.
    fn lane_top(&mut self, lane: usize) -> u64;
}

/// Lanes spaced `step` pixels apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformLanes {
    pub step: u64,
}

impl UniformLanes {
    pub fn new(metrics: &Metrics) -> Self {
        Self {
            step: metrics.primary.step(),
        }
    }
}

impl LaneLayout for UniformLanes {
    fn lane_at(&mut self, offset: u64) -> usize {
        usize::try_from(offset / self.step.max(1)).unwrap_or(usize::MAX)
    }

    fn lane_top(&mut self, lane: usize) -> u64 {
        (lane as u64).saturating_mul(self.step)
    }
}

/// Result of a window recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub window: RenderWindow,
    pub threshold: Threshold,
}

/// Recomputes the render window for `offset`.
///
/// The window starts `overhang / 2` lanes before the lane containing `offset`, clamped to
/// `[0, max_first_index]`. The returned band covers exactly the offsets that would produce the
/// same `first_index`; a side is unbounded once the window is clamped against that end.
pub fn resolve(
    offset: u64,
    data_size: usize,
    metrics: &Metrics,
    lanes: &mut impl LaneLayout,
) -> Resolution {
    let d = metrics.dimension_to_extent();
    let num_of_items = metrics.num_of_items(data_size);
    let max_extent = metrics.max_first_index(data_size, num_of_items) / d;
    let ob = metrics.overhang_before();

    let lane = lanes.lane_at(offset);
    let first_extent = lane.saturating_sub(ob).min(max_extent);

    let min = (first_extent > 0).then(|| lanes.lane_top(first_extent + ob));
    let max = (first_extent < max_extent).then(|| lanes.lane_top(first_extent + ob + 1));

    let resolution = Resolution {
        window: RenderWindow {
            first_index: first_extent * d,
            num_of_items,
        },
        threshold: Threshold {
            min,
            max,
            base: metrics.threshold_base,
        },
    };
    wtrace!(
        offset,
        first_index = resolution.window.first_index,
        num_of_items,
        "resolve"
    );
    resolution
}

/// The band used before the first scroll event of a uniform list sitting at offset zero.
///
/// Unbounded when every item fits in the window.
pub fn seed_threshold(data_size: usize, metrics: &Metrics) -> Threshold {
    let num_of_items = metrics.num_of_items(data_size);
    if metrics.max_first_index(data_size, num_of_items) == 0 {
        Threshold::unbounded(metrics.threshold_base)
    } else {
        Threshold::seed(metrics.threshold_base)
    }
}
