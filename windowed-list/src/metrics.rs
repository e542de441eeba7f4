//! Per-axis grid metrics derived from the viewport and the item-size spec.

use crate::{ConfigError, Direction, ItemSize, WindowOptions};

/// Sizes along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisMetrics {
    pub client_size: u32,
    pub item_size: u32,
    pub min_item_size: Option<u32>,
    /// `item_size + spacing`: the distance between two consecutive lanes.
    pub grid_size: u32,
}

impl AxisMetrics {
    /// The lane step used for divisions; a zero grid size degrades to one pixel.
    pub fn step(&self) -> u64 {
        u64::from(self.grid_size.max(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub is_primary_vertical: bool,
    /// Number of lanes across the secondary axis; `1` for a plain list.
    pub dimension_to_extent: usize,
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            is_primary_vertical: true,
            dimension_to_extent: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub primary: AxisMetrics,
    pub secondary: AxisMetrics,
    pub shape: GridShape,
    pub spacing: u32,
    pub overhang: usize,
    /// `primary.grid_size * ceil(overhang / 2)`; seeds the first threshold band.
    pub threshold_base: u64,
}

impl Metrics {
    /// Derives the metrics for `options`.
    ///
    /// Fails when the grid item-size spec is incomplete.
    pub fn calculate(options: &WindowOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self::from_valid(options))
    }

    /// Derives the metrics for options that already passed [`WindowOptions::validate`].
    pub(crate) fn from_valid(options: &WindowOptions) -> Self {
        let spacing = options.spacing;
        let is_primary_vertical = options.direction.is_vertical();
        let (primary_client, secondary_client) = match options.direction {
            Direction::Vertical => (options.client_size.height, options.client_size.width),
            Direction::Horizontal => (options.client_size.width, options.client_size.height),
        };

        let mut dimension_to_extent = 1usize;
        let (primary, secondary) = match options.item_size {
            ItemSize::Uniform(size) => (
                AxisMetrics {
                    client_size: primary_client,
                    item_size: size,
                    min_item_size: None,
                    grid_size: size.saturating_add(spacing),
                },
                AxisMetrics {
                    client_size: secondary_client,
                    item_size: size,
                    min_item_size: None,
                    grid_size: size.saturating_add(spacing),
                },
            ),
            ItemSize::Grid {
                min_width,
                min_height,
            } => {
                let (min_primary, min_secondary) = if is_primary_vertical {
                    (min_height, min_width)
                } else {
                    (min_width, min_height)
                };

                let lanes = (u64::from(secondary_client) + u64::from(spacing))
                    / (u64::from(min_secondary) + u64::from(spacing));
                dimension_to_extent = usize::try_from(lanes).unwrap_or(usize::MAX).max(1);

                // Whatever is left after the gaps is split evenly between the lanes.
                let gaps = u64::from(spacing).saturating_mul(dimension_to_extent as u64 - 1);
                let secondary_item = u64::from(secondary_client).saturating_sub(gaps)
                    / dimension_to_extent as u64;
                let secondary_item = u32::try_from(secondary_item).unwrap_or(u32::MAX);

                // Keep the aspect ratio of the minimum item size.
                let primary_item =
                    u64::from(min_primary) * u64::from(secondary_item) / u64::from(min_secondary);
                let primary_item = u32::try_from(primary_item).unwrap_or(u32::MAX);

                (
                    AxisMetrics {
                        client_size: primary_client,
                        item_size: primary_item,
                        min_item_size: Some(min_primary),
                        grid_size: primary_item.saturating_add(spacing),
                    },
                    AxisMetrics {
                        client_size: secondary_client,
                        item_size: secondary_item,
                        min_item_size: Some(min_secondary),
                        grid_size: secondary_item.saturating_add(spacing),
                    },
                )
            }
        };

        if primary.grid_size == 0 {
            wwarn!("Metrics::calculate: zero primary grid size, lanes step by one pixel");
        }

        let threshold_base =
            u64::from(primary.grid_size).saturating_mul(options.overhang.div_ceil(2) as u64);

        let metrics = Self {
            primary,
            secondary,
            shape: GridShape {
                is_primary_vertical,
                dimension_to_extent,
            },
            spacing,
            overhang: options.overhang,
            threshold_base,
        };
        wdebug!(
            dimension_to_extent,
            primary_item = metrics.primary.item_size,
            secondary_item = metrics.secondary.item_size,
            threshold_base,
            "Metrics::calculate"
        );
        metrics
    }

    pub fn dimension_to_extent(&self) -> usize {
        self.shape.dimension_to_extent
    }

    /// Lanes rendered before the viewport.
    pub fn overhang_before(&self) -> usize {
        self.overhang / 2
    }

    /// `min(data_size, d * (ceil(primary_client / grid_size) + overhang))`.
    pub fn num_of_items(&self, data_size: usize) -> usize {
        let lanes = u64::from(self.primary.client_size).div_ceil(self.primary.step());
        let lanes = usize::try_from(lanes)
            .unwrap_or(usize::MAX)
            .saturating_add(self.overhang);
        data_size.min(self.dimension_to_extent().saturating_mul(lanes))
    }

    /// `ceil((data_size - num_of_items) / d) * d`.
    pub fn max_first_index(&self, data_size: usize, num_of_items: usize) -> usize {
        let d = self.dimension_to_extent();
        data_size.saturating_sub(num_of_items).div_ceil(d) * d
    }

    /// Axis-relative position of `index` when every item has the uniform size.
    pub fn uniform_position(&self, index: usize) -> crate::ItemPosition {
        let d = self.dimension_to_extent();
        crate::ItemPosition {
            primary: (index / d) as u64 * u64::from(self.primary.grid_size),
            secondary: (index % d) as u64 * u64::from(self.secondary.grid_size),
        }
    }

    /// Primary extent of `data_size` uniformly sized items: `ceil(n / d) * grid - spacing`.
    pub fn uniform_extent(&self, data_size: usize) -> u64 {
        let lanes = data_size.div_ceil(self.dimension_to_extent()) as u64;
        lanes
            .saturating_mul(u64::from(self.primary.grid_size))
            .saturating_sub(u64::from(self.spacing))
    }
}
