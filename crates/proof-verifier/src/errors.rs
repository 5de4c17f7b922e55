//! Error types for certificate proof verification.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type alias for context assembly.
pub type LoadResult<T> = Result<T, LoadError>;

/// Reasons a verification context could not be assembled.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The sidechain constant did not deserialize into a field element.
    #[error("malformed sidechain constant")]
    MalformedConstant,

    /// The certificate proof did not deserialize.
    #[error("malformed certificate proof")]
    MalformedProof,

    /// The verification key is required but could not be obtained.
    #[error("verification key unavailable from {0}")]
    MissingVerificationKey(&'static str),

    /// The start height of the certificate epoch does not fit in a height.
    #[error("start height of epoch {0} out of range")]
    EpochHeightOverflow(u32),

    /// The certificate epoch starts at genesis so there is no previous end-of-epoch block.
    #[error("epoch {0} has no previous end-of-epoch block")]
    NoPreviousEpochBlock(u32),

    /// The active chain has no block at the previous end-of-epoch height.
    #[error("no active-chain block at height {0}")]
    MissingBlock(u64),
}

/// Reasons a context is refused before reaching the proof system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("missing end-of-epoch block hash")]
    MissingEndEpochHash,

    #[error("missing previous end-of-epoch block hash")]
    MissingPrevEndEpochHash,

    #[error("missing backward transfer list")]
    MissingBtList,

    #[error("empty backward transfer list not accepted")]
    EmptyBtList,

    #[error("quality {quality} below minimum {min}")]
    QualityTooLow { quality: u64, min: u64 },

    #[error("missing proof")]
    MissingProof,

    #[error("missing verification key")]
    MissingVerificationKey,
}

/// Errors loading a [`VerifierConfig`](crate::VerifierConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
