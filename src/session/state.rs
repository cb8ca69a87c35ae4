//! Session state: every placed card, the pending round, and progress.
//!
//! Uses `im` persistent collections, so cloning a `SessionState` is O(1)
//! and frontends can keep snapshots (for undo views, debugging overlays,
//! or comparing two runs) without copying the board.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardEntity;
use crate::core::CardId;

/// Where the current round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No card of the current round is face-up.
    Idle,
    /// One card is face-up, waiting for the second.
    OneFlipped,
    /// Two cards are face-up, judgment scheduled.
    Evaluating,
    /// Every pair has been found.
    Won,
}

/// All mutable state of one play-through.
///
/// ## Invariants
///
/// - `0 <= pairs_found <= total_pairs`
/// - `pending` holds 0, 1 or 2 cards
/// - a card is in `pending` only while it is face-up and unjudged
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    cards: OrdMap<CardId, CardEntity>,
    pending: SmallVec<[CardId; 2]>,
    matched: OrdSet<u32>,
    pairs_found: u32,
    total_pairs: u32,
}

impl SessionState {
    /// Create an empty board for `total_pairs` pairs.
    #[must_use]
    pub fn new(total_pairs: u32) -> Self {
        Self {
            cards: OrdMap::new(),
            pending: SmallVec::new(),
            matched: OrdSet::new(),
            pairs_found: 0,
            total_pairs,
        }
    }

    /// Add a placed card. Returns `false` if a card with the same id is
    /// already on the board.
    pub fn place(&mut self, card: CardEntity) -> bool {
        if self.cards.contains_key(&card.id) {
            return false;
        }
        self.cards.insert(card.id, card);
        true
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardEntity> {
        self.cards.get(&id)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut CardEntity> {
        self.cards.get_mut(&id)
    }

    /// Placed cards in id order.
    pub fn cards(&self) -> impl Iterator<Item = &CardEntity> {
        self.cards.values()
    }

    /// Number of cards placed so far.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards of the current round, in click order.
    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    pub(crate) fn push_pending(&mut self, id: CardId) {
        debug_assert!(self.pending.len() < 2, "pending round is full");
        self.pending.push(id);
    }

    pub(crate) fn take_pending(&mut self) -> SmallVec<[CardId; 2]> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn record_match(&mut self, pair_index: u32) {
        if self.matched.insert(pair_index).is_none() {
            self.pairs_found += 1;
        }
    }

    #[must_use]
    pub fn pairs_found(&self) -> u32 {
        self.pairs_found
    }

    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    /// Has the pair with this index been found?
    #[must_use]
    pub fn is_matched(&self, pair_index: u32) -> bool {
        self.matched.contains(&pair_index)
    }

    /// Pair indices found so far, ascending.
    pub fn matched_pairs(&self) -> impl Iterator<Item = u32> + '_ {
        self.matched.iter().copied()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.pairs_found == self.total_pairs
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        if self.is_won() {
            return MatchPhase::Won;
        }
        match self.pending.len() {
            0 => MatchPhase::Idle,
            1 => MatchPhase::OneFlipped,
            _ => MatchPhase::Evaluating,
        }
    }

    /// Face-down cards that can still be clicked.
    pub fn face_down(&self) -> impl Iterator<Item = &CardEntity> {
        self.cards.values().filter(|c| !c.face_up)
    }
}
