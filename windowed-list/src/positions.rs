//! Lazily built offsets for lists whose items have individual sizes.

use alloc::vec::Vec;

use crate::resolver::LaneLayout;

/// Cumulative item offsets for a variable-size list.
///
/// Offsets are only cached across the contiguous prefix of items whose sizes are known, and only
/// as far as callers have asked for. Past that frontier, offsets are extrapolated with the
/// uniform estimate and never cached, so a late measurement can never leave stale entries behind.
///
/// Sizes are held per item (`data_size` entries), separately from the caller's slice. Bulk
/// replacement through [`ItemPositionCache::set_sizes`] is `O(data_size)`; per-item updates
/// through [`ItemPositionCache::set_size`] are `O(1)` apart from the truncated offsets.
#[derive(Clone, Debug, Default)]
pub struct ItemPositionCache {
    sizes: Vec<Option<u32>>,
    /// `offsets[i]` is exact for every cached `i`.
    offsets: Vec<u64>,
    spacing: u32,
    estimate: u32,
}

impl ItemPositionCache {
    pub fn new(data_size: usize, spacing: u32, estimate: u32) -> Self {
        Self {
            sizes: alloc::vec![None; data_size],
            offsets: Vec::new(),
            spacing,
            estimate,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Number of offsets currently cached.
    pub fn cached_len(&self) -> usize {
        self.offsets.len()
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Drops every cached offset, e.g. after the spacing or estimate changed.
    pub fn invalidate(&mut self, spacing: u32, estimate: u32) {
        self.spacing = spacing;
        self.estimate = estimate;
        self.offsets.clear();
    }

    /// Resizes to `data_size` items; new items have unknown sizes.
    pub fn set_len(&mut self, data_size: usize) {
        self.sizes.resize(data_size, None);
        self.offsets.truncate(data_size);
    }

    /// Replaces all known sizes. Entries past `sizes.len()` become unknown.
    ///
    /// Walks every item; cached offsets up to the first changed size are kept.
    ///
    /// Returns `true` when any size changed.
    pub fn set_sizes(&mut self, sizes: &[u32]) -> bool {
        let n = self.sizes.len();
        let mut first_changed = None;
        for i in 0..n {
            let next = sizes.get(i).copied();
            if self.sizes[i] != next {
                self.sizes[i] = next;
                first_changed.get_or_insert(i);
            }
        }
        match first_changed {
            Some(i) => {
                self.offsets.truncate(i + 1);
                true
            }
            None => false,
        }
    }

    /// Records the size of a single item. Returns `true` when the size changed.
    pub fn set_size(&mut self, index: usize, size: u32) -> bool {
        let Some(slot) = self.sizes.get_mut(index) else {
            return false;
        };
        if *slot == Some(size) {
            return false;
        }
        *slot = Some(size);
        // offsets[j] depends on every size before j.
        self.offsets.truncate(index + 1);
        true
    }

    pub fn is_known(&self, index: usize) -> bool {
        self.sizes.get(index).is_some_and(Option::is_some)
    }

    /// Size of `index`, or the estimate when it is not known yet.
    pub fn size_of(&self, index: usize) -> u32 {
        self.sizes.get(index).copied().flatten().unwrap_or(self.estimate)
    }

    fn estimate_step(&self) -> u64 {
        u64::from(self.estimate.saturating_add(self.spacing).max(1))
    }

    /// Extends the cache until it covers `index` or reaches an unknown size.
    fn extend_through(&mut self, index: usize) {
        if self.sizes.is_empty() {
            return;
        }
        if self.offsets.is_empty() {
            self.offsets.push(0);
        }
        while self.offsets.len() <= index && self.offsets.len() < self.sizes.len() {
            let prev = self.offsets.len() - 1;
            let Some(size) = self.sizes[prev] else {
                break;
            };
            let next = self.offsets[prev]
                .saturating_add(u64::from(size))
                .saturating_add(u64::from(self.spacing));
            self.offsets.push(next);
        }
    }

    /// Extends the cache until its last offset is past `offset` or it reaches an unknown size.
    fn extend_past(&mut self, offset: u64) {
        if self.sizes.is_empty() {
            return;
        }
        if self.offsets.is_empty() {
            self.offsets.push(0);
        }
        while self.offsets.last().is_some_and(|&last| last <= offset)
            && self.offsets.len() < self.sizes.len()
        {
            let prev = self.offsets.len() - 1;
            let Some(size) = self.sizes[prev] else {
                break;
            };
            let next = self.offsets[prev]
                .saturating_add(u64::from(size))
                .saturating_add(u64::from(self.spacing));
            self.offsets.push(next);
        }
    }

    /// `true` when the offset and size of `index` are both measured values.
    pub fn is_exact(&mut self, index: usize) -> bool {
        self.extend_through(index);
        index < self.offsets.len() && self.is_known(index)
    }

    /// Start offset of `index` along the scroll axis.
    pub fn offset_of(&mut self, index: usize) -> u64 {
        if index == 0 {
            return 0;
        }
        self.extend_through(index);
        if let Some(&offset) = self.offsets.get(index) {
            return offset;
        }
        let frontier = self.offsets.len().saturating_sub(1);
        let base = self.offsets.get(frontier).copied().unwrap_or(0);
        base.saturating_add(((index - frontier) as u64).saturating_mul(self.estimate_step()))
    }

    /// `offset_of(index) + size_of(index)`.
    pub fn bottom_of(&mut self, index: usize) -> u64 {
        self.offset_of(index)
            .saturating_add(u64::from(self.size_of(index)))
    }

    /// Total extent of all items, including the spacing between them.
    pub fn total_extent(&mut self) -> u64 {
        match self.sizes.len() {
            0 => 0,
            n => self.bottom_of(n - 1),
        }
    }

    /// Index of the item whose `[offset_of(i), offset_of(i + 1))` interval contains `offset`.
    ///
    /// Offsets past the end map to the last item.
    pub fn index_at(&mut self, offset: u64) -> usize {
        let n = self.sizes.len();
        if n == 0 {
            return 0;
        }
        self.extend_past(offset);
        let last_cached = self.offsets.len() - 1;
        if self.offsets[last_cached] > offset || last_cached == n - 1 {
            let i = self.offsets.partition_point(|&o| o <= offset);
            return i.saturating_sub(1).min(n - 1);
        }
        // Past the measured frontier: extrapolate with the estimate.
        let beyond = (offset - self.offsets[last_cached]) / self.estimate_step();
        let beyond = usize::try_from(beyond).unwrap_or(usize::MAX);
        last_cached.saturating_add(beyond).min(n - 1)
    }
}

impl LaneLayout for ItemPositionCache {
    fn lane_at(&mut self, offset: u64) -> usize {
        self.index_at(offset)
    }

    fn lane_top(&mut self, lane: usize) -> u64 {
        self.offset_of(lane)
    }
}
