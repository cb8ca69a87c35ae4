//! Match state machine.
//!
//! ```text
//!  Idle --click--> OneFlipped --click--> Evaluating --timer--> Idle
//!                                                 \-------> Won
//! ```
//!
//! Clicks on face-up cards, clicks while two cards await judgment, and
//! clicks after the session is won are ignored. The second flip of a
//! round schedules a judgment on the timer queue; nothing is compared
//! until that timer fires.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::{MatchPhase, SessionState};
use crate::core::{CardId, ClickOutcome, GameConfig, IgnoreReason};
use crate::interaction::{Animator, FlipCommand};
use crate::timer::TimerQueue;

/// Deferred judgment of a full round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEvaluation {
    pub first: CardId,
    pub second: CardId,
}

/// Result of judging a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgement {
    /// Both cards belong to the same pair and stay face-up.
    Matched {
        pair_index: u32,
        cards: [CardId; 2],
        /// This match completed the board.
        won: bool,
    },
    /// Different pairs; both cards were flipped back.
    Mismatched { cards: [CardId; 2] },
}

/// Click handler and judge for a session.
///
/// Holds only pacing; all mutable state lives in the `SessionState` passed
/// to each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchStateMachine {
    reveal_delay_ms: u64,
    flip_duration_ms: u64,
}

impl MatchStateMachine {
    #[must_use]
    pub fn new(reveal_delay_ms: u64, flip_duration_ms: u64) -> Self {
        Self {
            reveal_delay_ms,
            flip_duration_ms,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.reveal_delay_ms, config.flip_duration_ms)
    }

    #[must_use]
    pub fn reveal_delay_ms(&self) -> u64 {
        self.reveal_delay_ms
    }

    /// Handle a click on `card`.
    pub fn click(
        &self,
        state: &mut SessionState,
        card: CardId,
        timers: &mut TimerQueue<PendingEvaluation>,
        animator: &mut dyn Animator,
    ) -> ClickOutcome {
        match state.phase() {
            MatchPhase::Won => return ClickOutcome::Ignored(IgnoreReason::SessionWon),
            MatchPhase::Evaluating => return ClickOutcome::Ignored(IgnoreReason::EvaluationPending),
            MatchPhase::Idle | MatchPhase::OneFlipped => {}
        }

        match state.card(card) {
            None => return ClickOutcome::Ignored(IgnoreReason::NotPlaced),
            Some(entity) if entity.face_up => return ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp),
            Some(_) => {}
        }

        self.flip(state, card, animator);
        state.push_pending(card);

        match *state.pending() {
            [first, second] => {
                timers.schedule(self.reveal_delay_ms, PendingEvaluation { first, second });
                debug!(%first, %second, delay_ms = self.reveal_delay_ms, "round full, judgment scheduled");
                ClickOutcome::SecondFlipped(card)
            }
            _ => ClickOutcome::FirstFlipped(card),
        }
    }

    /// Judge the pending round. Called when its timer fires.
    ///
    /// Returns `None` if there is no full round to judge.
    pub fn evaluate(&self, state: &mut SessionState, animator: &mut dyn Animator) -> Option<Judgement> {
        if state.pending().len() != 2 {
            return None;
        }
        let pending = state.take_pending();
        let cards = [pending[0], pending[1]];

        let identities = (state.card(cards[0])?.identity, state.card(cards[1])?.identity);

        if identities.0.matches(identities.1) {
            let pair_index = identities.0.pair_index;
            state.record_match(pair_index);
            let won = state.is_won();
            info!(
                pair_index,
                pairs_found = state.pairs_found(),
                total_pairs = state.total_pairs(),
                "pair matched"
            );
            Some(Judgement::Matched {
                pair_index,
                cards,
                won,
            })
        } else {
            debug!(first = %cards[0], second = %cards[1], "no match, flipping back");
            for card in cards {
                self.flip(state, card, animator);
            }
            Some(Judgement::Mismatched { cards })
        }
    }

    /// Toggle a card and issue its tween.
    fn flip(&self, state: &mut SessionState, card: CardId, animator: &mut dyn Animator) {
        let Some(entity) = state.card_mut(card) else {
            return;
        };
        let from_rotation = entity.flip();
        let command = FlipCommand {
            card,
            from_rotation,
            to_rotation: entity.rotation_y,
            duration_ms: self.flip_duration_ms,
            face_up: entity.face_up,
        };
        debug!(%card, face_up = entity.face_up, "flip");
        animator.flip(command);
    }
}
