/// A 20-byte buffer, used for main-chain pubkey hashes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Buf20(pub [u8; 20]);

impl_buf_core!(Buf20, 20);
impl_buf_fmt!(Buf20, 20);
impl_buf_borsh!(Buf20, 20);
impl_buf_serde!(Buf20, 20);

/// A 32-byte buffer, used for block hashes and sidechain ids.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Buf32(pub [u8; 32]);

impl_buf_core!(Buf32, 32);
impl_buf_fmt!(Buf32, 32);
impl_buf_borsh!(Buf32, 32);
impl_buf_serde!(Buf32, 32);
