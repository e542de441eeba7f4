//! Scrollable extents and scroll-target alignment.

use crate::{Direction, Metrics, ScrollBounds, StickTo, VisibleRange};

/// Scroll bounds for content whose primary extent is `extent` pixels.
///
/// The secondary axis never scrolls: its scroll size is the client size.
pub fn scroll_bounds(metrics: &Metrics, direction: Direction, extent: u64) -> ScrollBounds {
    let primary_client = metrics.primary.client_size;
    let secondary_client = metrics.secondary.client_size;
    let max_primary = extent.saturating_sub(u64::from(primary_client));
    match direction {
        Direction::Vertical => ScrollBounds {
            client_width: secondary_client,
            client_height: primary_client,
            scroll_width: u64::from(secondary_client),
            scroll_height: extent,
            max_left: 0,
            max_top: max_primary,
        },
        Direction::Horizontal => ScrollBounds {
            client_width: primary_client,
            client_height: secondary_client,
            scroll_width: extent,
            scroll_height: u64::from(secondary_client),
            max_left: max_primary,
            max_top: 0,
        },
    }
}

/// Scroll offset that aligns an item at `position` with `size` pixels to `stick_to`.
///
/// `offset` shifts the item further into the viewport (towards the opposite edge for `End`).
/// The result is clamped to `[0, max]`.
pub fn aligned_offset(
    position: u64,
    size: u32,
    client: u32,
    stick_to: StickTo,
    offset: i64,
    max: u64,
) -> u64 {
    let pos = i64::try_from(position).unwrap_or(i64::MAX);
    let slack = i64::from(client) - i64::from(size);
    let target = match stick_to {
        StickTo::Start => pos.saturating_sub(offset),
        StickTo::Center => pos.saturating_sub(slack / 2).saturating_sub(offset),
        StickTo::End => pos.saturating_sub(slack.saturating_sub(offset)),
    };
    clamp_offset(target, max)
}

/// Clamps a signed offset into `[0, max]`.
pub fn clamp_offset(target: i64, max: u64) -> u64 {
    u64::try_from(target).unwrap_or(0).min(max)
}

/// The smallest scroll that makes `[position, position + size)` fully visible from `current`.
///
/// Returns `None` when the item is already visible. Items larger than the viewport are
/// start-aligned.
pub fn reveal_offset(position: u64, size: u32, client: u32, current: u64, max: u64) -> Option<u64> {
    let bottom = position.saturating_add(u64::from(size));
    let view_end = current.saturating_add(u64::from(client));
    let target = if position < current || size > client {
        position
    } else if bottom > view_end {
        bottom - u64::from(client)
    } else {
        return None;
    };
    let target = target.min(max);
    (target != current).then_some(target)
}

/// Items strictly inside `[scroll, scroll + client)` of a uniform list or grid.
pub fn uniform_visible_range(metrics: &Metrics, data_size: usize, scroll: u64) -> Option<VisibleRange> {
    if data_size == 0 {
        return None;
    }
    let d = metrics.dimension_to_extent() as u64;
    let step = metrics.primary.step() as i64;
    let pos = i64::try_from(scroll).unwrap_or(i64::MAX);
    let item = i64::from(metrics.primary.item_size);

    // First lane whose bottom edge lies below `scroll`.
    let first_lane = (pos - item).div_euclid(step) + 1;
    let first = u64::try_from(first_lane).unwrap_or(0).saturating_mul(d);

    let end = scroll.saturating_add(u64::from(metrics.primary.client_size));
    let last = end
        .div_ceil(step as u64)
        .saturating_mul(d)
        .saturating_sub(1);

    let last_index = data_size - 1;
    let first = usize::try_from(first).unwrap_or(usize::MAX).min(last_index);
    let last = usize::try_from(last).unwrap_or(usize::MAX).min(last_index);
    Some(VisibleRange {
        first,
        last: last.max(first),
    })
}
