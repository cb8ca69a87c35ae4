//! Pair catalog.
//!
//! The `PairCatalog` lists every pair a session can deal from. The pair
//! selector draws a subset of it at session start.

use serde::{Deserialize, Serialize};

use super::definition::PairDefinition;

/// Number of pairs in the bundled card set.
pub const BUNDLED_PAIRS: usize = 6;

/// Ordered list of available pair definitions.
///
/// ## Example
///
/// ```
/// use memorama::cards::{PairCatalog, PairDefinition};
///
/// let mut catalog = PairCatalog::new();
/// catalog.register(PairDefinition::new("sun.obj", "moon.obj"));
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.get(0).unwrap().counterpart.path(), "moon.obj");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCatalog {
    pairs: Vec<PairDefinition>,
}

impl PairCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled card set: `Cards/CARTA{n}A.obj` paired with
    /// `Cards/CARTA{n}B.obj`.
    #[must_use]
    pub fn bundled() -> Self {
        (1..=BUNDLED_PAIRS)
            .map(|n| PairDefinition::new(format!("Cards/CARTA{n}A.obj"), format!("Cards/CARTA{n}B.obj")))
            .collect()
    }

    /// Register a pair definition. Returns its catalog index.
    pub fn register(&mut self, pair: PairDefinition) -> usize {
        self.pairs.push(pair);
        self.pairs.len() - 1
    }

    /// Get a pair definition by catalog index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PairDefinition> {
        self.pairs.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PairDefinition> {
        self.pairs.iter()
    }
}

impl FromIterator<PairDefinition> for PairCatalog {
    fn from_iter<I: IntoIterator<Item = PairDefinition>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}
