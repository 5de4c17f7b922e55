use zendoo_primitives::Buf32;

/// Read-only view of the active main chain.
pub trait ChainView {
    /// Returns the hash of the active-chain block at `height`, if there is one.
    fn block_hash_at_height(&self, height: u64) -> Option<Buf32>;
}

impl<T: ChainView + ?Sized> ChainView for &T {
    fn block_hash_at_height(&self, height: u64) -> Option<Buf32> {
        (**self).block_hash_at_height(height)
    }
}
