//! Sidechain withdrawal certificate proof verification.
//!
//! A [`ProofVerifier`] assembles a [`VerificationContext`] from a sidechain's
//! metadata, one of its certificates and the active main chain, then hands it
//! to the configured [`VerificationStrategy`], which checks the context is
//! complete and forwards it to the proof system.
//!
//! Every opaque proof-system object in a context is owned by it and released
//! when the context is reset, replaced or dropped.

mod config;
mod context;
mod errors;
mod strategy;
mod verifier;

pub use config::{VerifierConfig, VkPolicy, VkSource};
pub use context::VerificationContext;
pub use errors::{ConfigError, LoadError, LoadResult, PreconditionError};
pub use strategy::{CertProofStrategy, PreconditionPolicy, StrategyKind, VerificationStrategy};
pub use verifier::ProofVerifier;
