//! Sidechain certificate, sidechain metadata and main-chain lookup types
//! consumed by the certificate proof verifier.

mod certificate;
mod chain;
mod sidechain;

pub use certificate::{CertOutput, OutputKind, ScCertificate};
pub use chain::ChainView;
pub use sidechain::{ScCreationData, SidechainInfo};
