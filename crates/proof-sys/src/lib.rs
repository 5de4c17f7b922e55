//! Boundary to the proof system that verifies sidechain certificate proofs.
//!
//! The proof system is treated as opaque: the certificate verifier only ever
//! deserializes its objects, hands them back through [`ProofSystem::verify`],
//! and drops them. Dropping an object is how it is released, so every owned
//! field element, proof and verification key is freed exactly once.
//!
//! The [`native`] backend implements the trait without real cryptography and
//! is used for local deployments and tests.

use std::fmt;

use zendoo_primitives::{BackwardTransfer, Buf32};

pub mod native;

/// A proof system capable of checking withdrawal certificate proofs.
pub trait ProofSystem: fmt::Debug {
    /// Deserialized field element.
    type FieldElement: fmt::Debug;

    /// Deserialized proof.
    type Proof: fmt::Debug;

    /// Deserialized verification key.
    type VerifyingKey: fmt::Debug;

    /// Parses a field element, returning `None` on malformed input.
    fn deserialize_field(&self, bytes: &[u8]) -> Option<Self::FieldElement>;

    /// Parses a proof, returning `None` on malformed input.
    fn deserialize_proof(&self, bytes: &[u8]) -> Option<Self::Proof>;

    /// Parses a verification key, returning `None` on malformed input.
    fn deserialize_verifying_key(&self, bytes: &[u8]) -> Option<Self::VerifyingKey>;

    /// Checks the proof against the public inputs.
    ///
    /// Must be deterministic and free of side effects.
    fn verify(&self, inputs: &VerifierInputs<'_, Self>) -> bool;
}

/// Everything the proof system is given for a single verification call.
pub struct VerifierInputs<'a, P: ProofSystem + ?Sized> {
    pub end_epoch_mc_b_hash: &'a Buf32,
    pub prev_end_epoch_mc_b_hash: &'a Buf32,
    pub bt_list: &'a [BackwardTransfer],
    pub quality: u64,
    pub constant: Option<&'a P::FieldElement>,
    pub proof_data: Option<&'a P::FieldElement>,
    pub proof: &'a P::Proof,
    pub verification_key: Option<&'a P::VerifyingKey>,
}

impl<P: ProofSystem + ?Sized> fmt::Debug for VerifierInputs<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierInputs")
            .field("end_epoch_mc_b_hash", self.end_epoch_mc_b_hash)
            .field("prev_end_epoch_mc_b_hash", self.prev_end_epoch_mc_b_hash)
            .field("bt_list", &self.bt_list)
            .field("quality", &self.quality)
            .field("constant", &self.constant)
            .field("proof_data", &self.proof_data)
            .field("proof", self.proof)
            .field("verification_key", &self.verification_key)
            .finish()
    }
}
