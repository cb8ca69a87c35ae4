//! Error type shared by the whole crate.

use crate::cards::CardIdentity;

/// Errors from session setup and card placement.
///
/// Ignored clicks and mismatches are normal control flow and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum MemoramaError {
    /// The configuration cannot produce a playable session.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A loaded model does not belong to any pair dealt this session.
    #[error("card {0} is not part of this session")]
    UnknownCard(CardIdentity),

    /// The same card was reported loaded twice.
    #[error("card {0} was already placed")]
    DuplicateCard(CardIdentity),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Click history could not be encoded or decoded.
    #[error("history encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Result alias for crate operations.
pub type Result<T, E = MemoramaError> = std::result::Result<T, E>;
