//! A headless windowing engine for very large lists and grids.
//!
//! For consumer-side helpers (scroll strategies, a slot-driving controller), see the
//! `windowed-list-adapter` crate.
//!
//! Only a sliding window of items is materialized at any time. This crate provides the math
//! behind it: viewport-to-index resolution with a hysteresis band that keeps per-frame work
//! near zero, lazily built offsets for variably sized items, a fixed pool of recyclable render
//! slots, and scroll bounds with scroll-into-view alignment.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport (client) size
//! - scroll offsets as the user scrolls
//! - the dataset size and, for variable-size lists, item measurements
//!
//! and to apply what the engine hands back: the render window, item positions, and the scroll
//! offsets the engine asks for through `on_scroll_to`.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bounds;
mod engine;
mod error;
mod metrics;
mod options;
mod positions;
mod recycler;
mod resolver;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use bounds::{aligned_offset, clamp_offset, reveal_offset, scroll_bounds};
pub use engine::WindowEngine;
pub use error::ConfigError;
pub use metrics::{AxisMetrics, GridShape, Metrics};
pub use options::{DEFAULT_OVERHANG, OnScrollTo, OnUpdateItems, WindowOptions};
pub use positions::ItemPositionCache;
pub use recycler::{Slot, SlotHandle, SlotPool, update_range};
pub use resolver::{LaneLayout, Resolution, UniformLanes, resolve};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{
    Direction, ItemPosition, ItemSize, PendingScroll, Point, RenderWindow, ScrollBounds, Size,
    StickTo, Threshold, VisibleRange,
};
