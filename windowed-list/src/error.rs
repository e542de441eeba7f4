use thiserror::Error;

/// A contract violation in [`crate::WindowOptions`].
///
/// These are programmer errors and are reported when the options are applied
/// (`WindowEngine::new` / `WindowEngine::set_options`), never while scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid item size requires a non-zero `min_width`")]
    MissingMinWidth,

    #[error("grid item size requires a non-zero `min_height`")]
    MissingMinHeight,

    /// Per-item sizes only make sense for a single-lane list.
    #[error("per-item sizes cannot be combined with a grid item size")]
    ItemSizesInGrid,
}
