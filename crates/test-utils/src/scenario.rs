//! Builder for consistent sidechain / certificate / chain fixtures.

use zendoo_primitives::{Amount, Buf20, Buf32};
use zendoo_proof_sys::native::{NativeProofSystem, Statement};
use zendoo_sc_types::{CertOutput, ChainView, ScCertificate, ScCreationData, SidechainInfo};

use crate::MemChain;

/// Backward transfer output paying `amount` to a pubkey hash filled with `byte`.
pub fn bt_output(byte: u8, amount: u64) -> CertOutput {
    CertOutput::backward_transfer(Amount::from_units(amount), Buf20::new([byte; 20]))
}

/// Regular P2PKH-looking output worth `amount`.
pub fn regular_output(amount: u64) -> CertOutput {
    CertOutput::regular(Amount::from_units(amount), vec![0x76, 0xa9, 0x14])
}

/// A sidechain, its certificate for some epoch and the main chain it refers to.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub sidechain: SidechainInfo,
    pub certificate: ScCertificate,
    pub chain: MemChain,

    /// Statement the certificate's native proof commits to.
    pub statement: Statement,
}

impl Scenario {
    /// Replaces the certificate proof with bytes no backend accepts.
    pub fn corrupt_proof(&mut self) {
        self.certificate.set_sc_proof(vec![0xde, 0xad, 0xbe, 0xef]);
    }

    /// Replaces the sidechain constant with bytes no backend accepts.
    pub fn corrupt_constant(&mut self) {
        self.sidechain.creation_data.custom_data = vec![0x01];
    }
}

#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    creation_height: u64,
    epoch_length: u32,
    epoch: u32,
    quality: u64,
    constant: Buf32,
    outputs: Vec<CertOutput>,
    verification_key: Option<Buf32>,
    proof_binds_vk: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self {
            creation_height: 10,
            epoch_length: 5,
            epoch: 2,
            quality: 42,
            constant: Buf32::new([0xc0; 32]),
            outputs: vec![
                regular_output(1),
                bt_output(0xaa, 10),
                regular_output(2),
                bt_output(0xbb, 20),
            ],
            verification_key: None,
            proof_binds_vk: false,
        }
    }
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creation_height(mut self, height: u64) -> Self {
        self.creation_height = height;
        self
    }

    pub fn epoch_length(mut self, len: u32) -> Self {
        self.epoch_length = len;
        self
    }

    pub fn epoch(mut self, epoch: u32) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn quality(mut self, quality: u64) -> Self {
        self.quality = quality;
        self
    }

    pub fn outputs(mut self, outputs: Vec<CertOutput>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Declares a verification key in the sidechain creation data.
    pub fn verification_key(mut self, vk: Buf32) -> Self {
        self.verification_key = Some(vk);
        self
    }

    /// Whether the proof commits to the declared verification key.
    pub fn proof_binds_vk(mut self, binds: bool) -> Self {
        self.proof_binds_vk = binds;
        self
    }

    /// Builds the fixture.
    ///
    /// # Panics
    ///
    /// If the configured epoch has no previous end-of-epoch block.
    pub fn build(self) -> Scenario {
        let sidechain = SidechainInfo::new(
            self.creation_height,
            ScCreationData {
                withdrawal_epoch_length: self.epoch_length,
                custom_data: self.constant.as_slice().to_vec(),
                w_cert_vk: self.verification_key.map(|vk| vk.as_slice().to_vec()),
            },
        );

        let epoch_start = sidechain
            .start_height_for_epoch(self.epoch)
            .expect("scenario: epoch start height");
        let next_epoch_start = sidechain
            .start_height_for_epoch(self.epoch + 1)
            .expect("scenario: next epoch start height");
        let prev_end_height = epoch_start
            .checked_sub(1)
            .expect("scenario: epoch must not start at genesis");
        let end_height = next_epoch_start - 1;

        let chain = MemChain::with_tip(next_epoch_start);
        let end_hash = chain
            .block_hash_at_height(end_height)
            .expect("scenario: end block");
        let prev_end_hash = chain
            .block_hash_at_height(prev_end_height)
            .expect("scenario: prev end block");

        let certificate_stub = ScCertificate::new(
            Buf32::new([0x5c; 32]),
            self.epoch,
            self.quality,
            end_hash,
            Vec::new(),
            self.outputs,
        );

        let statement = Statement {
            end_epoch_mc_b_hash: end_hash,
            prev_end_epoch_mc_b_hash: prev_end_hash,
            bt_list: certificate_stub.backward_transfers().collect(),
            quality: self.quality,
            constant: Some(self.constant),
            proof_data: None,
            verification_key: self.verification_key.filter(|_| self.proof_binds_vk),
        };

        let mut certificate = certificate_stub;
        certificate.set_sc_proof(NativeProofSystem::new().prove(&statement));

        Scenario {
            sidechain,
            certificate,
            chain,
            statement,
        }
    }
}
