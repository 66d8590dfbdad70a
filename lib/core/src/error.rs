use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Why a match request ended without a match.
///
/// Never shown to callers; every variant collapses to "no suitable match found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    ProfileNotFound,
    NoEmbedding,
    NoEligibleCandidates,
    NoNeighborFound,
}

impl std::fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NoMatchReason::ProfileNotFound => "requester profile not found",
            NoMatchReason::NoEmbedding => "requester has no embedding",
            NoMatchReason::NoEligibleCandidates => "no eligible candidates",
            NoMatchReason::NoNeighborFound => "no neighbour found",
        };
        f.write_str(s)
    }
}
