//! Native backend: no real proving, proofs are hash commitments to the statement.
//!
//! A native proof is a version byte followed by the SHA-256 commitment to the
//! full public statement. Anyone can produce one with [`NativeProofSystem::prove`],
//! so this backend only makes sense where the certificate submitter is trusted.

use sha2::{Digest, Sha256};
use tracing::*;
use zendoo_primitives::{BackwardTransfer, Buf32};

use crate::{ProofSystem, VerifierInputs};

/// Serialized length of a native field element.
pub const NATIVE_FIELD_LEN: usize = 32;

/// Serialized length of a native verification key.
pub const NATIVE_VK_LEN: usize = 32;

/// Leading byte of every native proof.
pub const NATIVE_PROOF_VERSION: u8 = 1;

/// Serialized length of a native proof.
pub const NATIVE_PROOF_LEN: usize = 1 + 32;

const COMMITMENT_TAG: &[u8] = b"zendoo/native-cert-proof/v1";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeField(Buf32);

impl NativeField {
    pub fn new(value: Buf32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Buf32 {
        &self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeProof(Buf32);

impl NativeProof {
    pub fn commitment(&self) -> &Buf32 {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(NATIVE_PROOF_LEN);
        buf.push(NATIVE_PROOF_VERSION);
        buf.extend_from_slice(self.0.as_slice());
        buf
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeVerifyingKey(Buf32);

impl NativeVerifyingKey {
    pub fn new(value: Buf32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Buf32 {
        &self.0
    }
}

/// Public statement a native proof commits to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub end_epoch_mc_b_hash: Buf32,
    pub prev_end_epoch_mc_b_hash: Buf32,
    pub bt_list: Vec<BackwardTransfer>,
    pub quality: u64,
    pub constant: Option<Buf32>,
    pub proof_data: Option<Buf32>,
    pub verification_key: Option<Buf32>,
}

impl Statement {
    /// Computes the commitment a matching proof must carry.
    pub fn commitment(&self) -> Buf32 {
        commit(
            &self.end_epoch_mc_b_hash,
            &self.prev_end_epoch_mc_b_hash,
            &self.bt_list,
            self.quality,
            self.constant.as_ref(),
            self.proof_data.as_ref(),
            self.verification_key.as_ref(),
        )
    }
}

fn commit(
    end_epoch_mc_b_hash: &Buf32,
    prev_end_epoch_mc_b_hash: &Buf32,
    bt_list: &[BackwardTransfer],
    quality: u64,
    constant: Option<&Buf32>,
    proof_data: Option<&Buf32>,
    verification_key: Option<&Buf32>,
) -> Buf32 {
    let mut hasher = Sha256::new();
    hasher.update(COMMITMENT_TAG);
    hasher.update(end_epoch_mc_b_hash.as_slice());
    hasher.update(prev_end_epoch_mc_b_hash.as_slice());

    hasher.update((bt_list.len() as u64).to_le_bytes());
    for bt in bt_list {
        hasher.update(bt.pk_dest().as_slice());
        hasher.update(bt.amount().to_units().to_le_bytes());
    }

    hasher.update(quality.to_le_bytes());

    for elem in [constant, proof_data, verification_key] {
        match elem {
            Some(buf) => {
                hasher.update([1u8]);
                hasher.update(buf.as_slice());
            }
            None => hasher.update([0u8]),
        }
    }

    Buf32::new(hasher.finalize().into())
}

/// Proof system whose proofs are plain commitments to the statement.
#[derive(Copy, Clone, Debug, Default)]
pub struct NativeProofSystem;

impl NativeProofSystem {
    pub fn new() -> Self {
        Self
    }

    /// Produces serialized proof bytes for the statement.
    pub fn prove(&self, statement: &Statement) -> Vec<u8> {
        NativeProof(statement.commitment()).to_bytes()
    }
}

impl ProofSystem for NativeProofSystem {
    type FieldElement = NativeField;
    type Proof = NativeProof;
    type VerifyingKey = NativeVerifyingKey;

    fn deserialize_field(&self, bytes: &[u8]) -> Option<NativeField> {
        Buf32::try_from(bytes).ok().map(NativeField)
    }

    fn deserialize_proof(&self, bytes: &[u8]) -> Option<NativeProof> {
        match bytes.split_first() {
            Some((&NATIVE_PROOF_VERSION, rest)) => Buf32::try_from(rest).ok().map(NativeProof),
            _ => None,
        }
    }

    fn deserialize_verifying_key(&self, bytes: &[u8]) -> Option<NativeVerifyingKey> {
        Buf32::try_from(bytes).ok().map(NativeVerifyingKey)
    }

    fn verify(&self, inputs: &VerifierInputs<'_, Self>) -> bool {
        let expected = commit(
            inputs.end_epoch_mc_b_hash,
            inputs.prev_end_epoch_mc_b_hash,
            inputs.bt_list,
            inputs.quality,
            inputs.constant.map(NativeField::value),
            inputs.proof_data.map(NativeField::value),
            inputs.verification_key.map(NativeVerifyingKey::value),
        );

        let valid = expected == *inputs.proof.commitment();
        if !valid {
            trace!(%expected, got = %inputs.proof.commitment(), "native proof commitment mismatch");
        }
        valid
    }
}
