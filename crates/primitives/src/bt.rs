use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{Amount, Buf20};

/// A value transfer from a sidechain back to a main-chain destination.
///
/// This is the record handed to the proof system, one per backward-transfer
/// output of a certificate.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct BackwardTransfer {
    pk_dest: Buf20,
    amount: Amount,
}

impl BackwardTransfer {
    pub fn new(pk_dest: Buf20, amount: Amount) -> Self {
        Self { pk_dest, amount }
    }

    /// Destination pubkey hash on the main chain.
    pub fn pk_dest(&self) -> &Buf20 {
        &self.pk_dest
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}
