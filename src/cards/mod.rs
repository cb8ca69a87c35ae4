//! Card catalog, identities, placed entities, and pair selection.
//!
//! - `PairDefinition`: catalog data (the two model files of a pair)
//! - `PairCatalog`: every pair a session can deal
//! - `CardIdentity`: pair index + orientation of a dealt card
//! - `CardEntity`: a placed card with face-up state and position
//! - `select_pairs`: random deal at session start

mod definition;
mod catalog;
mod instance;
pub mod selector;

pub use definition::{AssetRef, CardIdentity, PairDefinition};
pub use catalog::{PairCatalog, BUNDLED_PAIRS};
pub use instance::CardEntity;
pub use selector::{select_indices, select_pairs, SelectedPair};
