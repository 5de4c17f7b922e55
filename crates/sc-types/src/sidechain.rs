use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Parameters a sidechain was declared with at creation time.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
pub struct ScCreationData {
    /// Length of a withdrawal epoch in main-chain blocks.
    pub withdrawal_epoch_length: u32,

    /// Serialized constant field element the sidechain proofs are bound to.
    pub custom_data: Vec<u8>,

    /// Serialized certificate verification key, if declared.
    #[serde(default)]
    pub w_cert_vk: Option<Vec<u8>>,
}

/// Registry entry for a sidechain.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
pub struct SidechainInfo {
    /// Main-chain height the sidechain was created at.
    pub creation_block_height: u64,

    pub creation_data: ScCreationData,
}

impl SidechainInfo {
    pub fn new(creation_block_height: u64, creation_data: ScCreationData) -> Self {
        Self {
            creation_block_height,
            creation_data,
        }
    }

    /// Main-chain height at which withdrawal epoch `epoch` starts.
    ///
    /// Returns `None` if the height does not fit in a `u64`.
    pub fn start_height_for_epoch(&self, epoch: u32) -> Option<u64> {
        let offset =
            u64::from(epoch).checked_mul(u64::from(self.creation_data.withdrawal_epoch_length))?;
        self.creation_block_height.checked_add(offset)
    }

    /// Serialized constant the sidechain's proofs commit to.
    pub fn constant_bytes(&self) -> &[u8] {
        &self.creation_data.custom_data
    }

    pub fn verification_key_bytes(&self) -> Option<&[u8]> {
        self.creation_data.w_cert_vk.as_deref()
    }
}
