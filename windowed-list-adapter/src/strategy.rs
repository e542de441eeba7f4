use windowed_list::{Direction, Point};

/// How the consumer realizes a scroll offset on screen.
///
/// The engine only ever produces offsets; this decides what the consumer is asked to do with
/// them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollStrategy {
    /// The content layer is moved with a translation of `-offset`; there is no native scroll
    /// container, so every offset change must be applied by the consumer.
    #[default]
    Translate,
    /// A native scroll container owns the offset. The consumer only acts when the engine moves
    /// the offset on its own (clamping, scroll-to requests).
    Native,
}

/// An instruction for the consumer's scroll surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollCommand {
    /// Translate the content layer by `(x, y)` pixels.
    Translate { x: i64, y: i64 },
    /// Set the native scroll position (`left`, `top`).
    ScrollTo(Point),
}

impl ScrollStrategy {
    /// The command that shows the content scrolled to `offset` along `direction`.
    pub fn command(self, direction: Direction, offset: u64) -> ScrollCommand {
        match self {
            Self::Translate => {
                let shift = -i64::try_from(offset).unwrap_or(i64::MAX);
                match direction {
                    Direction::Vertical => ScrollCommand::Translate { x: 0, y: shift },
                    Direction::Horizontal => ScrollCommand::Translate { x: shift, y: 0 },
                }
            }
            Self::Native => ScrollCommand::ScrollTo(match direction {
                Direction::Vertical => Point::new(0, offset),
                Direction::Horizontal => Point::new(offset, 0),
            }),
        }
    }

    /// `true` when the consumer's own scroll events already reflect the offset on screen.
    pub fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }
}
