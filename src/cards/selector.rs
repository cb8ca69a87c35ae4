//! Random pair selection.
//!
//! At session start a subset of the catalog is dealt: the catalog indices
//! are shuffled and the first `total_pairs` are kept. The position of a
//! pair in the result becomes its session pair index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::PairCatalog;
use super::definition::PairDefinition;
use crate::core::{GameRng, MemoramaError, Result};

/// A pair dealt into the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPair {
    /// Session pair index, `0..total_pairs`.
    pub pair_index: u32,
    /// Index of the definition in the catalog.
    pub catalog_index: usize,
    pub definition: PairDefinition,
}

/// Shuffle catalog indices and return the first `total_pairs`.
///
/// Every subset of the catalog, in every order, is equally likely.
/// Fails with `InvalidConfiguration` when more pairs are requested than the
/// catalog holds.
pub fn select_indices(catalog_size: usize, total_pairs: usize, rng: &mut GameRng) -> Result<Vec<usize>> {
    if total_pairs > catalog_size {
        return Err(MemoramaError::InvalidConfiguration(format!(
            "requested {total_pairs} pairs but the catalog only has {catalog_size}"
        )));
    }

    let mut indices: Vec<usize> = (0..catalog_size).collect();
    rng.shuffle(&mut indices);
    indices.truncate(total_pairs);
    Ok(indices)
}

/// Deal `total_pairs` distinct pairs from the catalog.
pub fn select_pairs(catalog: &PairCatalog, total_pairs: usize, rng: &mut GameRng) -> Result<Vec<SelectedPair>> {
    let indices = select_indices(catalog.len(), total_pairs, rng)?;
    debug!(?indices, "dealt pairs");

    indices
        .into_iter()
        .enumerate()
        .map(|(pair_index, catalog_index)| {
            let definition = catalog.get(catalog_index).cloned().ok_or_else(|| {
                MemoramaError::InvalidConfiguration(format!("catalog index {catalog_index} out of range"))
            })?;
            Ok(SelectedPair {
                pair_index: pair_index as u32,
                catalog_index,
                definition,
            })
        })
        .collect()
}
