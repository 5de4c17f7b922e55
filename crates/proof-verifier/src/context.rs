//! Inputs of a single certificate proof verification.

use zendoo_primitives::{BackwardTransfer, Buf32};
use zendoo_proof_sys::{ProofSystem, VerifierInputs};

/// Everything a strategy needs to verify one certificate proof.
///
/// A context is either null (every field absent, quality zero) or loaded
/// (both hashes, the backward transfer list and the proof present). The
/// proof-system objects are owned, so replacing or dropping a context
/// releases them exactly once. Hashes are copied in, so a context never
/// borrows from the certificate or chain it was built from.
#[derive(Debug)]
pub struct VerificationContext<P: ProofSystem> {
    end_epoch_mc_b_hash: Option<Buf32>,
    prev_end_epoch_mc_b_hash: Option<Buf32>,

    /// `None` stands for "no list", which is distinct from an empty list.
    bt_list: Option<Vec<BackwardTransfer>>,
    quality: u64,
    constant: Option<P::FieldElement>,
    proof_data: Option<P::FieldElement>,
    proof: Option<P::Proof>,
    verification_key: Option<P::VerifyingKey>,
}

impl<P: ProofSystem> Default for VerificationContext<P> {
    fn default() -> Self {
        Self::null()
    }
}

impl<P: ProofSystem> VerificationContext<P> {
    /// Creates a context in the null state.
    pub fn null() -> Self {
        Self {
            end_epoch_mc_b_hash: None,
            prev_end_epoch_mc_b_hash: None,
            bt_list: None,
            quality: 0,
            constant: None,
            proof_data: None,
            proof: None,
            verification_key: None,
        }
    }

    /// Creates a loaded context from its required fields.
    ///
    /// The optional field elements and verification key start absent and can
    /// be attached with the `with_*` builders.
    pub fn new(
        end_epoch_mc_b_hash: Buf32,
        prev_end_epoch_mc_b_hash: Buf32,
        bt_list: Vec<BackwardTransfer>,
        quality: u64,
        proof: P::Proof,
    ) -> Self {
        Self {
            end_epoch_mc_b_hash: Some(end_epoch_mc_b_hash),
            prev_end_epoch_mc_b_hash: Some(prev_end_epoch_mc_b_hash),
            bt_list: Some(bt_list),
            quality,
            constant: None,
            proof_data: None,
            proof: Some(proof),
            verification_key: None,
        }
    }

    pub fn with_end_epoch_mc_b_hash(mut self, hash: Buf32) -> Self {
        self.end_epoch_mc_b_hash = Some(hash);
        self
    }

    pub fn with_prev_end_epoch_mc_b_hash(mut self, hash: Buf32) -> Self {
        self.prev_end_epoch_mc_b_hash = Some(hash);
        self
    }

    pub fn with_bt_list(mut self, bt_list: Vec<BackwardTransfer>) -> Self {
        self.bt_list = Some(bt_list);
        self
    }

    pub fn with_quality(mut self, quality: u64) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_constant(mut self, constant: Option<P::FieldElement>) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_proof_data(mut self, proof_data: Option<P::FieldElement>) -> Self {
        self.proof_data = proof_data;
        self
    }

    pub fn with_proof(mut self, proof: P::Proof) -> Self {
        self.proof = Some(proof);
        self
    }

    pub fn with_verification_key(mut self, vk: Option<P::VerifyingKey>) -> Self {
        self.verification_key = vk;
        self
    }

    /// Releases every owned object and returns to the null state.
    ///
    /// Calling this on a null context does nothing.
    pub fn reset(&mut self) {
        *self = Self::null();
    }

    /// Checks every field, not just whether [`reset`](Self::reset) was called.
    pub fn is_null(&self) -> bool {
        self.end_epoch_mc_b_hash.is_none()
            && self.prev_end_epoch_mc_b_hash.is_none()
            && self.bt_list.is_none()
            && self.quality == 0
            && self.constant.is_none()
            && self.proof_data.is_none()
            && self.proof.is_none()
            && self.verification_key.is_none()
    }

    pub fn end_epoch_mc_b_hash(&self) -> Option<&Buf32> {
        self.end_epoch_mc_b_hash.as_ref()
    }

    pub fn prev_end_epoch_mc_b_hash(&self) -> Option<&Buf32> {
        self.prev_end_epoch_mc_b_hash.as_ref()
    }

    pub fn bt_list(&self) -> Option<&[BackwardTransfer]> {
        self.bt_list.as_deref()
    }

    pub fn quality(&self) -> u64 {
        self.quality
    }

    pub fn constant(&self) -> Option<&P::FieldElement> {
        self.constant.as_ref()
    }

    pub fn proof_data(&self) -> Option<&P::FieldElement> {
        self.proof_data.as_ref()
    }

    pub fn proof(&self) -> Option<&P::Proof> {
        self.proof.as_ref()
    }

    pub fn verification_key(&self) -> Option<&P::VerifyingKey> {
        self.verification_key.as_ref()
    }

    /// Borrows the context as proof-system inputs, if every required field is present.
    pub fn verifier_inputs(&self) -> Option<VerifierInputs<'_, P>> {
        Some(VerifierInputs {
            end_epoch_mc_b_hash: self.end_epoch_mc_b_hash.as_ref()?,
            prev_end_epoch_mc_b_hash: self.prev_end_epoch_mc_b_hash.as_ref()?,
            bt_list: self.bt_list.as_deref()?,
            quality: self.quality,
            constant: self.constant.as_ref(),
            proof_data: self.proof_data.as_ref(),
            proof: self.proof.as_ref()?,
            verification_key: self.verification_key.as_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use zendoo_primitives::{Amount, Buf20};
    use zendoo_proof_sys::native::{NATIVE_PROOF_VERSION, NativeProofSystem};
    use zendoo_test_utils::CountingProofSystem;

    use super::*;

    fn proof_bytes() -> Vec<u8> {
        let mut bytes = vec![NATIVE_PROOF_VERSION];
        bytes.extend_from_slice(&[7; 32]);
        bytes
    }

    fn loaded(sys: &CountingProofSystem) -> VerificationContext<CountingProofSystem> {
        VerificationContext::new(
            Buf32::new([1; 32]),
            Buf32::new([2; 32]),
            vec![BackwardTransfer::new(
                Buf20::new([0xaa; 20]),
                Amount::from_units(10),
            )],
            5,
            sys.deserialize_proof(&proof_bytes()).unwrap(),
        )
        .with_constant(sys.deserialize_field(&[3; 32]))
        .with_proof_data(sys.deserialize_field(&[4; 32]))
        .with_verification_key(sys.deserialize_verifying_key(&[5; 32]))
    }

    #[test]
    fn test_null_context() {
        let ctx = VerificationContext::<NativeProofSystem>::null();
        assert!(ctx.is_null());
        assert!(ctx.verifier_inputs().is_none());
        assert!(VerificationContext::<NativeProofSystem>::default().is_null());
    }

    #[test]
    fn test_reset_on_null_is_noop() {
        let mut ctx = VerificationContext::<NativeProofSystem>::null();
        ctx.reset();
        ctx.reset();
        assert!(ctx.is_null());
    }

    #[test]
    fn test_reset_releases_every_object_once() {
        let sys = CountingProofSystem::new();
        let counter = sys.counter().clone();

        let mut ctx = loaded(&sys);
        assert!(!ctx.is_null());
        assert_eq!(counter.live(), 4);

        ctx.reset();
        assert!(ctx.is_null());
        assert_eq!(counter.live(), 0);
        assert_eq!(counter.freed(), 4);

        ctx.reset();
        assert_eq!(counter.freed(), 4);
    }

    #[test]
    fn test_drop_releases_objects() {
        let sys = CountingProofSystem::new();
        let counter = sys.counter().clone();

        drop(loaded(&sys));
        assert_eq!(counter.allocated(), 4);
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn test_quality_alone_makes_context_non_null() {
        let ctx = VerificationContext::<NativeProofSystem>::null().with_quality(1);
        assert!(!ctx.is_null());
        assert!(ctx.verifier_inputs().is_none());
    }

    #[test]
    fn test_empty_bt_list_differs_from_missing() {
        let ctx = VerificationContext::<NativeProofSystem>::null().with_bt_list(Vec::new());
        assert!(!ctx.is_null());
        assert_eq!(ctx.bt_list(), Some(&[][..]));
    }

    #[test]
    fn test_verifier_inputs_require_proof_and_hashes() {
        let sys = NativeProofSystem::new();
        let proof = sys.deserialize_proof(&proof_bytes()).unwrap();

        let partial = VerificationContext::<NativeProofSystem>::null()
            .with_end_epoch_mc_b_hash(Buf32::new([1; 32]))
            .with_bt_list(Vec::new())
            .with_proof(proof);
        assert!(partial.verifier_inputs().is_none());

        let complete = partial.with_prev_end_epoch_mc_b_hash(Buf32::new([2; 32]));
        let inputs = complete.verifier_inputs().unwrap();
        assert_eq!(inputs.end_epoch_mc_b_hash, &Buf32::new([1; 32]));
        assert_eq!(inputs.prev_end_epoch_mc_b_hash, &Buf32::new([2; 32]));
        assert!(inputs.bt_list.is_empty());
        assert!(inputs.constant.is_none());
    }
}
