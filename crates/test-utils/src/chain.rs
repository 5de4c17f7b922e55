use sha2::{Digest, Sha256};
use zendoo_primitives::Buf32;
use zendoo_sc_types::ChainView;

/// Active chain held in memory, one hash per height starting at genesis.
#[derive(Clone, Debug, Default)]
pub struct MemChain {
    hashes: Vec<Buf32>,
}

impl MemChain {
    /// Builds a chain with blocks at heights `0..=tip` and deterministic hashes.
    pub fn with_tip(tip: u64) -> Self {
        let hashes = (0..=tip).map(Self::synthetic_hash).collect();
        Self { hashes }
    }

    pub fn from_hashes(hashes: Vec<Buf32>) -> Self {
        Self { hashes }
    }

    /// Hash used for the block at `height` by [`MemChain::with_tip`].
    pub fn synthetic_hash(height: u64) -> Buf32 {
        let digest = Sha256::new()
            .chain_update(b"memchain")
            .chain_update(height.to_le_bytes())
            .finalize();
        Buf32::new(digest.into())
    }

    pub fn tip_height(&self) -> Option<u64> {
        self.hashes.len().checked_sub(1).map(|h| h as u64)
    }
}

impl ChainView for MemChain {
    fn block_hash_at_height(&self, height: u64) -> Option<Buf32> {
        let idx = usize::try_from(height).ok()?;
        self.hashes.get(idx).copied()
    }
}
