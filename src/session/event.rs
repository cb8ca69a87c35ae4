//! Session events.
//!
//! The controller emits one event for every observable change. Frontends
//! drain them each frame; the CLI logs them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::cards::CardIdentity;
use crate::core::CardId;

/// Something that happened during a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A card's model loaded and the card is now clickable.
    CardPlaced {
        card: CardId,
        identity: CardIdentity,
        position: Vec3,
    },
    /// A card's model failed to load; it will never be clickable.
    CardLoadFailed { identity: CardIdentity, reason: String },
    /// A card turned face-up or face-down.
    CardFlipped { card: CardId, face_up: bool },
    /// A round is full; judgment happens at `due_ms`.
    EvaluationScheduled { first: CardId, second: CardId, due_ms: u64 },
    /// Two cards of the same pair were found.
    PairMatched { pair_index: u32, pairs_found: u32 },
    /// Two cards of different pairs were turned back.
    PairMismatched { first: CardId, second: CardId },
    /// Every pair has been found. Emitted once.
    Won { pairs_found: u32 },
}

impl SessionEvent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::CardPlaced { .. } => "card_placed",
            SessionEvent::CardLoadFailed { .. } => "card_load_failed",
            SessionEvent::CardFlipped { .. } => "card_flipped",
            SessionEvent::EvaluationScheduled { .. } => "evaluation_scheduled",
            SessionEvent::PairMatched { .. } => "pair_matched",
            SessionEvent::PairMismatched { .. } => "pair_mismatched",
            SessionEvent::Won { .. } => "won",
        }
    }
}
