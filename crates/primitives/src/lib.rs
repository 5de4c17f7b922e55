//! Collection of generic data types shared by the certificate verification crates.

#[macro_use]
mod macros;

mod amount;
mod bt;
mod buf;

pub use amount::Amount;
pub use bt::BackwardTransfer;
pub use buf::{Buf20, Buf32};
