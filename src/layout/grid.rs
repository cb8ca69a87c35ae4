//! Grid placement arithmetic.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::cards::CardIdentity;
use crate::core::GameConfig;

/// Row-major grid of pair slots, centered on the origin.
///
/// Each pair occupies one slot. The primary card sits on the slot, the
/// counterpart half a spacing to its right on the same row and slightly
/// closer to the camera, so the two halves of a pair always read as
/// neighbours.
///
/// ```
/// use memorama::layout::GridLayout;
///
/// let grid = GridLayout::new(3, 6.5, 6, 0.1);
/// let primary = grid.layout(4, false);
/// let counterpart = grid.layout(4, true);
///
/// assert_eq!(counterpart.x - primary.x, 3.25);
/// assert_eq!(counterpart.y, primary.y);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    columns: u32,
    spacing: f32,
    rows: u32,
    counterpart_z: f32,
}

impl GridLayout {
    /// Grid for `slots` pairs laid out over `columns` columns.
    ///
    /// `columns` must be non-zero; `GameConfig::validate` guarantees it.
    #[must_use]
    pub fn new(columns: u32, spacing: f32, slots: u32, counterpart_z: f32) -> Self {
        let columns = columns.max(1);
        Self {
            columns,
            spacing,
            rows: slots.div_ceil(columns),
            counterpart_z,
        }
    }

    /// Grid sized for a catalog of `catalog_size` pairs, spaced per `config`.
    ///
    /// Rows follow the catalog, not the deal, so a deal smaller than the
    /// catalog fills the top rows of the same board.
    #[must_use]
    pub fn from_config(config: &GameConfig, catalog_size: usize) -> Self {
        let slots = u32::try_from(catalog_size).unwrap_or(u32::MAX);
        Self::new(config.columns, config.spacing, slots, config.counterpart_z_offset)
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Total width between the first and last column.
    #[must_use]
    pub fn width(&self) -> f32 {
        (self.columns - 1) as f32 * self.spacing
    }

    /// Total height between the first and last row.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows.saturating_sub(1) as f32 * self.spacing
    }

    /// World position of one half of a pair.
    #[must_use]
    pub fn layout(&self, pair_index: u32, is_counterpart: bool) -> Vec3 {
        let column = (pair_index % self.columns) as f32;
        let row = (pair_index / self.columns) as f32;

        let x = column * self.spacing - self.width() / 2.0
            + if is_counterpart { self.spacing / 2.0 } else { 0.0 };
        let y = row * -self.spacing + self.height() / 2.0;
        let z = if is_counterpart { self.counterpart_z } else { 0.0 };

        Vec3::new(x, y, z)
    }

    /// World position of a dealt card.
    #[must_use]
    pub fn position(&self, identity: CardIdentity) -> Vec3 {
        self.layout(identity.pair_index, identity.is_counterpart)
    }
}
