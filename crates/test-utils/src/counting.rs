//! Proof system wrapper that instruments allocations and verification calls.

use std::sync::{
    Arc,
    atomic::{AtomicU8, AtomicUsize, Ordering},
};

use zendoo_proof_sys::{
    ProofSystem, VerifierInputs,
    native::{NativeField, NativeProof, NativeProofSystem, NativeVerifyingKey},
};

const VERDICT_PASSTHROUGH: u8 = 0;
const VERDICT_REJECT: u8 = 1;
const VERDICT_ACCEPT: u8 = 2;

/// Counts opaque objects handed out by a [`CountingProofSystem`].
#[derive(Debug, Default)]
pub struct ResourceCounter {
    allocated: AtomicUsize,
    freed: AtomicUsize,
    verify_calls: AtomicUsize,
}

impl ResourceCounter {
    /// Objects currently alive.
    pub fn live(&self) -> usize {
        self.allocated() - self.freed()
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    pub fn freed(&self) -> usize {
        self.freed.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

/// An object whose lifetime is recorded in a [`ResourceCounter`].
#[derive(Debug)]
pub struct Tracked<T> {
    inner: T,
    counter: Arc<ResourceCounter>,
}

impl<T> Tracked<T> {
    fn new(inner: T, counter: &Arc<ResourceCounter>) -> Self {
        counter.allocated.fetch_add(1, Ordering::SeqCst);
        Self {
            inner,
            counter: counter.clone(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.counter.freed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Native proof system whose objects are tracked, with an optional forced verdict.
#[derive(Debug, Default)]
pub struct CountingProofSystem {
    inner: NativeProofSystem,
    counter: Arc<ResourceCounter>,
    verdict: AtomicU8,
}

impl CountingProofSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> &Arc<ResourceCounter> {
        &self.counter
    }

    /// Makes every subsequent `verify` return `verdict` without checking the proof.
    pub fn force_verdict(&self, verdict: bool) {
        let raw = if verdict {
            VERDICT_ACCEPT
        } else {
            VERDICT_REJECT
        };
        self.verdict.store(raw, Ordering::SeqCst);
    }

    /// Restores real verification by the native backend.
    pub fn clear_verdict(&self) {
        self.verdict.store(VERDICT_PASSTHROUGH, Ordering::SeqCst);
    }
}

impl ProofSystem for CountingProofSystem {
    type FieldElement = Tracked<NativeField>;
    type Proof = Tracked<NativeProof>;
    type VerifyingKey = Tracked<NativeVerifyingKey>;

    fn deserialize_field(&self, bytes: &[u8]) -> Option<Self::FieldElement> {
        let elem = self.inner.deserialize_field(bytes)?;
        Some(Tracked::new(elem, &self.counter))
    }

    fn deserialize_proof(&self, bytes: &[u8]) -> Option<Self::Proof> {
        let proof = self.inner.deserialize_proof(bytes)?;
        Some(Tracked::new(proof, &self.counter))
    }

    fn deserialize_verifying_key(&self, bytes: &[u8]) -> Option<Self::VerifyingKey> {
        let vk = self.inner.deserialize_verifying_key(bytes)?;
        Some(Tracked::new(vk, &self.counter))
    }

    fn verify(&self, inputs: &VerifierInputs<'_, Self>) -> bool {
        self.counter.verify_calls.fetch_add(1, Ordering::SeqCst);

        match self.verdict.load(Ordering::SeqCst) {
            VERDICT_ACCEPT => return true,
            VERDICT_REJECT => return false,
            _ => {}
        }

        self.inner.verify(&VerifierInputs {
            end_epoch_mc_b_hash: inputs.end_epoch_mc_b_hash,
            prev_end_epoch_mc_b_hash: inputs.prev_end_epoch_mc_b_hash,
            bt_list: inputs.bt_list,
            quality: inputs.quality,
            constant: inputs.constant.map(Tracked::inner),
            proof_data: inputs.proof_data.map(Tracked::inner),
            proof: inputs.proof.inner(),
            verification_key: inputs.verification_key.map(Tracked::inner),
        })
    }
}
