use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use zendoo_primitives::{Amount, BackwardTransfer, Buf20, Buf32};

/// What an output of a certificate pays to.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputKind {
    /// Ordinary output locked by a script, e.g. change.
    Regular { script_pubkey: Vec<u8> },

    /// Backward transfer to a main-chain pubkey hash.
    BackwardTransfer { pubkey_hash: Buf20 },
}

/// An output carried by a certificate.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
pub struct CertOutput {
    value: Amount,
    kind: OutputKind,
}

impl CertOutput {
    pub fn new(value: Amount, kind: OutputKind) -> Self {
        Self { value, kind }
    }

    pub fn regular(value: Amount, script_pubkey: Vec<u8>) -> Self {
        Self::new(value, OutputKind::Regular { script_pubkey })
    }

    pub fn backward_transfer(value: Amount, pubkey_hash: Buf20) -> Self {
        Self::new(value, OutputKind::BackwardTransfer { pubkey_hash })
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    pub fn kind(&self) -> &OutputKind {
        &self.kind
    }

    pub fn is_backward_transfer(&self) -> bool {
        matches!(self.kind, OutputKind::BackwardTransfer { .. })
    }

    /// Copies out the backward transfer record if this output is one.
    pub fn as_backward_transfer(&self) -> Option<BackwardTransfer> {
        match &self.kind {
            OutputKind::BackwardTransfer { pubkey_hash } => {
                Some(BackwardTransfer::new(*pubkey_hash, self.value))
            }
            OutputKind::Regular { .. } => None,
        }
    }
}

/// A sidechain withdrawal certificate, already parsed from its wire format.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
pub struct ScCertificate {
    /// Sidechain the certificate was issued by.
    sc_id: Buf32,

    /// Withdrawal epoch the certificate attests to.
    epoch_number: u32,

    /// Weight used to choose among competing certificates for the same epoch.
    quality: u64,

    /// Main-chain block hash declared as the end of the epoch.
    end_epoch_block_hash: Buf32,

    /// Serialized proof, opaque to everything but the proof system.
    sc_proof: Vec<u8>,

    outputs: Vec<CertOutput>,
}

impl ScCertificate {
    pub fn new(
        sc_id: Buf32,
        epoch_number: u32,
        quality: u64,
        end_epoch_block_hash: Buf32,
        sc_proof: Vec<u8>,
        outputs: Vec<CertOutput>,
    ) -> Self {
        Self {
            sc_id,
            epoch_number,
            quality,
            end_epoch_block_hash,
            sc_proof,
            outputs,
        }
    }

    pub fn sc_id(&self) -> &Buf32 {
        &self.sc_id
    }

    pub fn epoch_number(&self) -> u32 {
        self.epoch_number
    }

    pub fn quality(&self) -> u64 {
        self.quality
    }

    pub fn end_epoch_block_hash(&self) -> &Buf32 {
        &self.end_epoch_block_hash
    }

    pub fn sc_proof(&self) -> &[u8] {
        &self.sc_proof
    }

    pub fn set_sc_proof(&mut self, sc_proof: Vec<u8>) {
        self.sc_proof = sc_proof;
    }

    pub fn outputs(&self) -> &[CertOutput] {
        &self.outputs
    }

    /// Iterates the backward transfers in output order, skipping every other output.
    pub fn backward_transfers(&self) -> impl Iterator<Item = BackwardTransfer> + '_ {
        self.outputs
            .iter()
            .filter_map(CertOutput::as_backward_transfer)
    }
}
