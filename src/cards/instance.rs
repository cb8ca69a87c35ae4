//! Card entities - runtime card state.
//!
//! A `CardEntity` exists once its model has loaded and been placed on the
//! grid. Its identity and position never change afterwards; only the
//! face-up flag and the target rotation are touched, by the match state
//! machine.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::definition::CardIdentity;
use crate::core::CardId;

/// A placed, clickable card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardEntity {
    pub id: CardId,

    pub identity: CardIdentity,

    /// Is the card showing its face?
    pub face_up: bool,

    /// Grid position, set once at placement.
    pub position: Vec3,

    /// Target rotation about the Y axis, in radians. Each flip adds π.
    pub rotation_y: f32,
}

impl CardEntity {
    /// Create a face-down card at `position`.
    #[must_use]
    pub fn new(identity: CardIdentity, position: Vec3) -> Self {
        Self {
            id: CardId::for_card(identity.pair_index, identity.is_counterpart),
            identity,
            face_up: false,
            position,
            rotation_y: 0.0,
        }
    }

    /// Toggle the face-up flag and advance the rotation by half a turn.
    ///
    /// Returns the rotation before the flip.
    pub fn flip(&mut self) -> f32 {
        let from = self.rotation_y;
        self.face_up = !self.face_up;
        self.rotation_y += std::f32::consts::PI;
        from
    }
}
