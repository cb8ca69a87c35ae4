//! Core types: card ids, RNG, configuration, errors, click records.
//!
//! Everything here is independent of the rendering engine.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;
pub mod click;

pub use entity::CardId;
pub use rng::{GameRng, GameRngState};
pub use config::{BackgroundConfig, CameraConfig, GameConfig};
pub use error::{MemoramaError, Result};
pub use click::{decode_history, encode_history, ClickOutcome, ClickRecord, IgnoreReason};
