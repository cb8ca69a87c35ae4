//! Click outcomes and click history.
//!
//! Every pointer click resolves to a `ClickOutcome`. Ignored clicks are
//! normal control flow: they carry an `IgnoreReason` instead of an error.
//! Resolved clicks are appended to the session history as `ClickRecord`s,
//! which is enough to replay a session deterministically.

use serde::{Deserialize, Serialize};

use super::entity::CardId;
use super::error::Result;

/// Why a click had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The pointer did not hit any placed card.
    NoCardHit,
    /// The id does not name a placed card (not loaded, or failed to load).
    NotPlaced,
    /// The card is already face-up.
    AlreadyFaceUp,
    /// Two cards are waiting for judgment.
    EvaluationPending,
    /// Every pair has been found.
    SessionWon,
}

/// Result of a single click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// First card of a round turned face-up.
    FirstFlipped(CardId),
    /// Second card of a round turned face-up; judgment is now scheduled.
    SecondFlipped(CardId),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl ClickOutcome {
    /// Did this click flip a card?
    #[must_use]
    pub fn flipped(self) -> Option<CardId> {
        match self {
            ClickOutcome::FirstFlipped(card) | ClickOutcome::SecondFlipped(card) => Some(card),
            ClickOutcome::Ignored(_) => None,
        }
    }

    #[must_use]
    pub fn is_ignored(self) -> bool {
        matches!(self, ClickOutcome::Ignored(_))
    }
}

/// A recorded click.
///
/// Used for:
/// - Replay/debugging
/// - Comparing two runs of the same seed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    /// Virtual time of the click.
    pub at_ms: u64,

    /// Card the click resolved to, if any.
    pub card: Option<CardId>,

    /// What the click did.
    pub outcome: ClickOutcome,
}

impl ClickRecord {
    /// Create a new click record.
    #[must_use]
    pub fn new(at_ms: u64, card: Option<CardId>, outcome: ClickOutcome) -> Self {
        Self {
            at_ms,
            card,
            outcome,
        }
    }
}

/// Encode a click history with bincode.
pub fn encode_history(records: &[ClickRecord]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(records)?)
}

/// Decode a history produced by [`encode_history`].
pub fn decode_history(bytes: &[u8]) -> Result<Vec<ClickRecord>> {
    Ok(bincode::deserialize(bytes)?)
}
