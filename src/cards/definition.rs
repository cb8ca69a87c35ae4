//! Pair definitions and card identities.
//!
//! A `PairDefinition` is catalog data: the two model files that make up a
//! pair. A `CardIdentity` is what a dealt card *is* for matching purposes:
//! its session pair index and which half of the pair it shows.

use serde::{Deserialize, Serialize};

/// Reference to a model file understood by the frontend's loader.
///
/// The core never opens these; it only hands them out in load requests.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }

    /// Material library that ships next to the model.
    ///
    /// Same name and location, `.obj` swapped for `.mtl`.
    ///
    /// ```
    /// use memorama::cards::AssetRef;
    ///
    /// let model = AssetRef::new("Cards/CARTA1A.obj");
    /// assert_eq!(model.material().path(), "Cards/CARTA1A.mtl");
    /// ```
    #[must_use]
    pub fn material(&self) -> AssetRef {
        AssetRef(self.0.replacen(".obj", ".mtl", 1))
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog entry: a primary model and its designated counterpart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairDefinition {
    pub primary: AssetRef,
    pub counterpart: AssetRef,
}

impl PairDefinition {
    pub fn new(primary: impl Into<String>, counterpart: impl Into<String>) -> Self {
        Self {
            primary: AssetRef::new(primary),
            counterpart: AssetRef::new(counterpart),
        }
    }

    /// Model for one half of the pair.
    #[must_use]
    pub fn asset(&self, is_counterpart: bool) -> &AssetRef {
        if is_counterpart {
            &self.counterpart
        } else {
            &self.primary
        }
    }
}

/// Matching identity of a dealt card.
///
/// Exactly two identities share a `pair_index` in a session: one with
/// `is_counterpart == false`, one with `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIdentity {
    pub pair_index: u32,
    pub is_counterpart: bool,
}

impl CardIdentity {
    #[must_use]
    pub const fn new(pair_index: u32, is_counterpart: bool) -> Self {
        Self {
            pair_index,
            is_counterpart,
        }
    }

    #[must_use]
    pub const fn primary(pair_index: u32) -> Self {
        Self::new(pair_index, false)
    }

    #[must_use]
    pub const fn counterpart(pair_index: u32) -> Self {
        Self::new(pair_index, true)
    }

    /// Do the two cards belong to the same pair?
    #[must_use]
    pub const fn matches(self, other: CardIdentity) -> bool {
        self.pair_index == other.pair_index
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let half = if self.is_counterpart { "B" } else { "A" };
        write!(f, "Pair({}{})", self.pair_index, half)
    }
}
