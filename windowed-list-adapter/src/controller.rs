use windowed_list::{
    ConfigError, ScrollBounds, Size, SlotHandle, SlotPool, StickTo, WindowEngine, WindowOptions,
    clamp_offset,
};

use crate::{ScrollCommand, ScrollStrategy};

/// A framework-neutral controller that wraps a [`WindowEngine`] together with a slot pool and a
/// [`ScrollStrategy`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_client_size` / `on_scroll` / `on_data_size` when UI or data events occur
/// - `sync_slots` after each event to rebind the render nodes that entered the window
///
/// Every event method returns the [`ScrollCommand`] the consumer must apply, if any, so the
/// scroll surface and the engine never drift apart.
#[derive(Clone, Debug)]
pub struct Controller<H> {
    engine: WindowEngine,
    pool: SlotPool<H>,
    strategy: ScrollStrategy,
    /// The offset currently shown by the consumer.
    shown: u64,
}

impl<H: SlotHandle> Controller<H> {
    pub fn new(options: WindowOptions, strategy: ScrollStrategy) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(WindowEngine::new(options)?, strategy))
    }

    /// Wraps an existing engine. The consumer is assumed to show offset zero; call
    /// [`Controller::take_scroll_command`] to pick up a non-zero initial offset.
    pub fn from_engine(engine: WindowEngine, strategy: ScrollStrategy) -> Self {
        Self {
            engine,
            pool: SlotPool::new(),
            strategy,
            shown: 0,
        }
    }

    pub fn engine(&self) -> &WindowEngine {
        &self.engine
    }

    /// Direct engine access. Follow any offset-changing call with
    /// [`Controller::take_scroll_command`].
    pub fn engine_mut(&mut self) -> &mut WindowEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> WindowEngine {
        self.engine
    }

    pub fn pool(&self) -> &SlotPool<H> {
        &self.pool
    }

    pub fn strategy(&self) -> ScrollStrategy {
        self.strategy
    }

    pub fn scroll_bounds(&mut self) -> ScrollBounds {
        self.engine.scroll_bounds()
    }

    /// Returns the command that brings the consumer to the engine's offset, if they differ.
    pub fn take_scroll_command(&mut self) -> Option<ScrollCommand> {
        let offset = self.engine.scroll_offset();
        if offset == self.shown {
            return None;
        }
        self.shown = offset;
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "windowed_list_adapter", offset, "scroll command");
        Some(self.strategy.command(self.engine.direction(), offset))
    }

    pub fn on_client_size(&mut self, client_size: Size) -> Option<ScrollCommand> {
        self.engine.set_client_size(client_size);
        self.take_scroll_command()
    }

    /// Call this with the offset the UI scrolled to (e.g. native scroll events, or the offset an
    /// adapter computed from wheel input under [`ScrollStrategy::Translate`]).
    ///
    /// Under [`ScrollStrategy::Translate`] the offset is clamped into the scroll bounds first.
    pub fn on_scroll(&mut self, offset: u64) -> Option<ScrollCommand> {
        let offset = if self.strategy.is_native() {
            self.shown = offset;
            offset
        } else {
            offset.min(self.engine.max_scroll_offset())
        };
        self.engine.on_scroll(offset);
        self.take_scroll_command()
    }

    /// Scrolls by a signed delta, clamped into the scroll bounds.
    pub fn scroll_by(&mut self, delta: i64) -> Option<ScrollCommand> {
        let current = i64::try_from(self.engine.scroll_offset()).unwrap_or(i64::MAX);
        let max = self.engine.max_scroll_offset();
        let target = clamp_offset(current.saturating_add(delta), max);
        self.engine.scroll_to_position(target);
        self.take_scroll_command()
    }

    pub fn on_data_size(&mut self, data_size: usize) -> Option<ScrollCommand> {
        self.engine.set_data_size(data_size);
        self.take_scroll_command()
    }

    /// Records a measured item size (variable-size lists).
    pub fn on_item_size(&mut self, index: usize, size: u32) -> Option<ScrollCommand> {
        self.engine.set_item_size(index, size);
        self.take_scroll_command()
    }

    pub fn scroll_to_index(
        &mut self,
        index: usize,
        stick_to: StickTo,
        offset: i64,
    ) -> Option<ScrollCommand> {
        self.engine.scroll_to_index(index, stick_to, offset);
        self.take_scroll_command()
    }

    pub fn reveal_index(&mut self, index: usize) -> Option<ScrollCommand> {
        self.engine.reveal_index(index);
        self.take_scroll_command()
    }

    /// Rebinds the slots for the current window. Returns the number of slots touched.
    pub fn sync_slots(&mut self, make_handle: impl FnMut() -> H) -> usize {
        self.engine.sync_slots(&mut self.pool, make_handle)
    }
}
