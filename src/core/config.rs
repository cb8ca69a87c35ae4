//! Session configuration.
//!
//! `GameConfig` covers grid geometry, pacing, and the camera and board
//! placement a frontend needs. Defaults reproduce the classic six-pair
//! board. Every field has a default, so a JSON file only needs to list
//! what it overrides:
//!
//! ```
//! use memorama::core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "total_pairs": 4, "columns": 2 }"#).unwrap();
//! assert_eq!(config.total_pairs, 4);
//! assert_eq!(config.spacing, 6.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{MemoramaError, Result};

/// Perspective camera the picker casts rays from.
///
/// The camera sits on the z axis looking at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Distance from the origin along +z.
    pub position_z: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 90.0,
            position_z: 10.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// The board model drawn behind the cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub model: String,
    pub position: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            model: "tablero.obj".to_string(),
            position: [0.0, 0.0, -15.0],
            scale: [2.0, 0.8, 15.0],
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pairs dealt per session.
    pub total_pairs: u32,

    /// Grid columns.
    pub columns: u32,

    /// Distance between neighbouring grid cells, in world units.
    pub spacing: f32,

    /// Pause between the second flip of a round and its judgment.
    pub reveal_delay_ms: u64,

    /// Duration of the flip animation.
    pub flip_duration_ms: u64,

    /// Depth offset of counterpart cards, keeps overlapping faces from
    /// z-fighting.
    pub counterpart_z_offset: f32,

    /// Uniform model scale.
    pub card_scale: f32,

    /// Unscaled card face size (width, height), used for picking.
    pub card_size: [f32; 2],

    pub camera: CameraConfig,

    pub background: BackgroundConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_pairs: 6,
            columns: 3,
            spacing: 6.5,
            reveal_delay_ms: 1000,
            flip_duration_ms: 500,
            counterpart_z_offset: 0.1,
            card_scale: 1.5,
            card_size: [2.0, 3.0],
            camera: CameraConfig::default(),
            background: BackgroundConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pairs dealt.
    #[must_use]
    pub fn with_total_pairs(mut self, total_pairs: u32) -> Self {
        self.total_pairs = total_pairs;
        self
    }

    /// Set the grid column count.
    #[must_use]
    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    /// Set the grid spacing.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the reveal delay.
    #[must_use]
    pub fn with_reveal_delay_ms(mut self, delay: u64) -> Self {
        self.reveal_delay_ms = delay;
        self
    }

    /// Set the flip animation duration.
    #[must_use]
    pub fn with_flip_duration_ms(mut self, duration: u64) -> Self {
        self.flip_duration_ms = duration;
        self
    }

    /// Half extents of a scaled card face.
    #[must_use]
    pub fn card_half_extents(&self) -> [f32; 2] {
        [
            self.card_size[0] * self.card_scale / 2.0,
            self.card_size[1] * self.card_scale / 2.0,
        ]
    }

    /// Check that this configuration can deal from a catalog of
    /// `catalog_size` pairs.
    pub fn validate(&self, catalog_size: usize) -> Result<()> {
        if self.total_pairs == 0 {
            return Err(MemoramaError::InvalidConfiguration(
                "total_pairs must be at least 1".to_string(),
            ));
        }
        if self.total_pairs as usize > catalog_size {
            return Err(MemoramaError::InvalidConfiguration(format!(
                "requested {} pairs but the catalog only has {}",
                self.total_pairs, catalog_size
            )));
        }
        if self.columns == 0 {
            return Err(MemoramaError::InvalidConfiguration(
                "columns must be at least 1".to_string(),
            ));
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(MemoramaError::InvalidConfiguration(format!(
                "spacing must be positive, got {}",
                self.spacing
            )));
        }
        if !self.card_scale.is_finite() || self.card_scale <= 0.0 {
            return Err(MemoramaError::InvalidConfiguration(format!(
                "card_scale must be positive, got {}",
                self.card_scale
            )));
        }
        Ok(())
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
