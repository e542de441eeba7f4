//! A fixed pool of render slots reused as the window slides.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{Point, RenderWindow};

/// A consumer-owned render node.
///
/// The pool never creates content; it only tells each handle which logical index it now shows
/// and where to place it.
pub trait SlotHandle {
    /// Shows `index` at `position` (content coordinates).
    fn attach(&mut self, index: usize, position: Point);

    /// Hides the slot. Called for window entries past the end of the dataset.
    fn detach(&mut self);
}

#[derive(Clone, Debug)]
pub struct Slot<H> {
    pub handle: H,
    index: Option<usize>,
    position: Point,
}

impl<H> Slot<H> {
    /// The logical index last attached to this slot.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// Indexes that must be (re)attached after the window moved from `prev_first` to `first`.
///
/// Moves shorter than the pool only touch the entering indexes; anything else refreshes the
/// whole window.
pub fn update_range(prev_first: Option<usize>, first: usize, num_of_items: usize) -> Range<usize> {
    let n = num_of_items;
    match prev_first {
        _ if n == 0 => first..first,
        Some(prev) if prev == first => first..first,
        Some(prev) if first > prev && first - prev < n => prev + n..first + n,
        Some(prev) if first < prev && prev - first < n => first..prev,
        _ => first..first + n,
    }
}

/// `num_of_items` slots keyed by `index % num_of_items`.
///
/// An index that stays inside the window keeps its slot across any number of moves, so the
/// consumer only rebinds the entering indexes.
#[derive(Clone, Debug)]
pub struct SlotPool<H> {
    slots: Vec<Slot<H>>,
    prev_first: Option<usize>,
    epoch: u64,
}

impl<H> Default for SlotPool<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SlotPool<H> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            prev_first: None,
            epoch: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot<H>] {
        &self.slots
    }

    /// Slot key for `index`, or `None` for an empty pool.
    pub fn key_of(&self, index: usize) -> Option<usize> {
        (!self.slots.is_empty()).then(|| index % self.slots.len())
    }

    /// The slot currently showing `index`.
    pub fn slot_for(&self, index: usize) -> Option<&Slot<H>> {
        let slot = self.slots.get(self.key_of(index)?)?;
        (slot.index == Some(index)).then_some(slot)
    }

    /// Attached `(index, handle)` pairs in slot order.
    pub fn iter_attached(&self) -> impl Iterator<Item = (usize, &H)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.index.map(|index| (index, &slot.handle)))
    }
}

impl<H: SlotHandle> SlotPool<H> {
    /// Brings the pool in line with `window`.
    ///
    /// `epoch` identifies the layout the positions belong to; a new epoch forces a full refresh
    /// even when the window did not move. Returns the number of slots that were touched.
    pub fn sync(
        &mut self,
        window: RenderWindow,
        data_size: usize,
        epoch: u64,
        mut position_of: impl FnMut(usize) -> Point,
        mut make_handle: impl FnMut() -> H,
    ) -> usize {
        let n = window.num_of_items;
        let first = window.first_index;

        let mut full = self.epoch != epoch || self.slots.len() != n;
        if self.slots.len() > n {
            for mut slot in self.slots.drain(n..) {
                if slot.index.take().is_some() {
                    slot.handle.detach();
                }
            }
        }
        while self.slots.len() < n {
            self.slots.push(Slot {
                handle: make_handle(),
                index: None,
                position: Point::default(),
            });
            full = true;
        }

        let range = if full {
            first..first + n
        } else {
            update_range(self.prev_first, first, n)
        };
        let touched = range.len();

        for index in range.clone() {
            let slot = &mut self.slots[index % n];
            if index < data_size {
                let position = position_of(index);
                slot.index = Some(index);
                slot.position = position;
                slot.handle.attach(index, position);
            } else if slot.index.take().is_some() {
                slot.handle.detach();
            }
        }

        wtrace!(
            first,
            num_of_items = n,
            start = range.start,
            end = range.end,
            full,
            "SlotPool::sync"
        );
        self.prev_first = Some(first);
        self.epoch = epoch;
        touched
    }
}
