use std::fmt;

/// Every failure mode the mining core can produce.
///
/// `BadInput` variants are ordinary, expected failures a caller should handle;
/// `InternalInvariantBroken` indicates a bug in the tree bookkeeping and is not
/// expected to occur on any valid input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database is empty")]
    EmptyDatabase,

    #[error("minSup ({min_sup}) exceeds the database size ({database_size})")]
    ThresholdExceedsDatabase { min_sup: u64, database_size: u64 },

    #[error("invalid threshold value: {0}")]
    InvalidThreshold(String),

    #[error("internal invariant broken: {0}")]
    InternalInvariantBroken(String),
}

impl Error {
    pub fn internal(detail: impl fmt::Display) -> Self {
        Self::InternalInvariantBroken(detail.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
