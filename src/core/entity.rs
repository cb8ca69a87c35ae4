//! Card entity identification.
//!
//! Every placed card has a unique `CardId`. Ids are derived from the card's
//! identity rather than from load order, so a session assigns the same id
//! to the same card no matter in which order the models finish loading.
//!
//! ## ID Layout
//!
//! - `pair_index * 2`: the primary card of a pair
//! - `pair_index * 2 + 1`: its counterpart
//!
//! ```
//! use memorama::core::CardId;
//!
//! let primary = CardId::for_card(3, false);
//! let counterpart = CardId::for_card(3, true);
//!
//! assert_eq!(primary.pair_index(), 3);
//! assert!(!primary.is_counterpart());
//! assert!(counterpart.is_counterpart());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a placed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Id of the card with the given pair index and orientation.
    #[must_use]
    pub const fn for_card(pair_index: u32, is_counterpart: bool) -> Self {
        Self(pair_index * 2 + is_counterpart as u32)
    }

    /// Pair index encoded in this id.
    #[must_use]
    pub const fn pair_index(self) -> u32 {
        self.0 / 2
    }

    /// Is this the counterpart half of its pair?
    #[must_use]
    pub const fn is_counterpart(self) -> bool {
        self.0 % 2 == 1
    }

    /// Id of the other card in the same pair.
    #[must_use]
    pub const fn partner(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
