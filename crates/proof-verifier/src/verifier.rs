//! Orchestrates context assembly and strategy dispatch.

use std::{borrow::Cow, fs, sync::Arc};

use tracing::*;
use zendoo_proof_sys::ProofSystem;
use zendoo_sc_types::{ChainView, ScCertificate, SidechainInfo};

use crate::{
    config::{VerifierConfig, VkPolicy, VkSource},
    context::VerificationContext,
    errors::{LoadError, LoadResult},
    strategy::VerificationStrategy,
};

/// Verifies sidechain withdrawal certificate proofs.
///
/// The verifier is the only component that reads certificates, sidechain
/// metadata and the active chain. It turns them into a
/// [`VerificationContext`] in [`load`](Self::load) and hands that context to
/// the active strategy in [`execute`](Self::execute).
///
/// Calls on one instance must not overlap; use one verifier per attempt or
/// guard a shared one externally.
#[derive(Debug)]
pub struct ProofVerifier<P: ProofSystem + 'static> {
    backend: Arc<P>,
    config: VerifierConfig,
    strategy: Option<Box<dyn VerificationStrategy<P>>>,
    ctx: VerificationContext<P>,
}

impl<P: ProofSystem + 'static> ProofVerifier<P> {
    /// Creates a verifier with no active strategy.
    pub fn new(backend: Arc<P>, config: VerifierConfig) -> Self {
        Self {
            backend,
            config,
            strategy: None,
            ctx: VerificationContext::null(),
        }
    }

    /// Creates a verifier with the strategy named in the config already active.
    pub fn from_config(backend: Arc<P>, config: VerifierConfig) -> Self {
        let strategy = config.strategy.build(backend.clone(), &config);
        let mut verifier = Self::new(backend, config);
        verifier.set_strategy(Some(strategy));
        verifier
    }

    pub fn backend(&self) -> &Arc<P> {
        &self.backend
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Replaces the active strategy. `None` makes every [`execute`](Self::execute) reject.
    pub fn set_strategy(&mut self, strategy: Option<Box<dyn VerificationStrategy<P>>>) {
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> Option<&dyn VerificationStrategy<P>> {
        self.strategy.as_deref()
    }

    /// Replaces the current context, releasing the previous one.
    pub fn set_context(&mut self, ctx: VerificationContext<P>) {
        self.ctx = ctx;
    }

    pub fn context(&self) -> &VerificationContext<P> {
        &self.ctx
    }

    /// Releases the current context.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// Assembles the context for `cert`, returning whether it succeeded.
    ///
    /// On failure the context is left null.
    pub fn load(
        &mut self,
        sidechain: &SidechainInfo,
        cert: &ScCertificate,
        chain: &impl ChainView,
    ) -> bool {
        match self.try_load(sidechain, cert, chain) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    epoch = cert.epoch_number(),
                    sc_id = %cert.sc_id(),
                    %err,
                    "failed to load certificate verification context"
                );
                false
            }
        }
    }

    /// Like [`load`](Self::load) but reports why assembly failed.
    pub fn try_load(
        &mut self,
        sidechain: &SidechainInfo,
        cert: &ScCertificate,
        chain: &impl ChainView,
    ) -> LoadResult<()> {
        self.ctx.reset();

        // Partially deserialized objects are dropped on early return.
        let constant = self
            .backend
            .deserialize_field(sidechain.constant_bytes())
            .ok_or(LoadError::MalformedConstant)?;
        let proof = self
            .backend
            .deserialize_proof(cert.sc_proof())
            .ok_or(LoadError::MalformedProof)?;

        let vk = self.load_verification_key(sidechain);
        let verification_key = match self.config.vk_policy {
            VkPolicy::Required => Some(vk.ok_or_else(|| {
                LoadError::MissingVerificationKey(self.config.vk_source.describe())
            })?),
            VkPolicy::Waived => None,
        };

        let epoch = cert.epoch_number();
        let end_epoch_mc_b_hash = *cert.end_epoch_block_hash();

        let epoch_start = sidechain
            .start_height_for_epoch(epoch)
            .ok_or(LoadError::EpochHeightOverflow(epoch))?;
        let prev_end_height = epoch_start
            .checked_sub(1)
            .ok_or(LoadError::NoPreviousEpochBlock(epoch))?;
        let prev_end_epoch_mc_b_hash = chain
            .block_hash_at_height(prev_end_height)
            .ok_or(LoadError::MissingBlock(prev_end_height))?;

        let bt_list: Vec<_> = cert.backward_transfers().collect();
        let bt_count = bt_list.len();

        self.ctx = VerificationContext::new(
            end_epoch_mc_b_hash,
            prev_end_epoch_mc_b_hash,
            bt_list,
            cert.quality(),
            proof,
        )
        .with_constant(Some(constant))
        .with_proof_data(None)
        .with_verification_key(verification_key);

        debug!(
            %epoch,
            quality = cert.quality(),
            %bt_count,
            %prev_end_height,
            has_vk = self.ctx.verification_key().is_some(),
            "loaded certificate verification context"
        );

        Ok(())
    }

    fn load_verification_key(&self, sidechain: &SidechainInfo) -> Option<P::VerifyingKey> {
        let bytes: Cow<'_, [u8]> = match &self.config.vk_source {
            VkSource::None => return None,
            VkSource::Sidechain => Cow::Borrowed(sidechain.verification_key_bytes()?),
            VkSource::File { path } => match fs::read(path) {
                Ok(bytes) => Cow::Owned(bytes),
                Err(err) => {
                    warn!(path = %path.display(), %err, "failed to read verification key");
                    return None;
                }
            },
        };

        let vk = self.backend.deserialize_verifying_key(&bytes);
        if vk.is_none() {
            warn!(source = self.config.vk_source.describe(), "malformed verification key");
        }
        vk
    }

    /// Runs the active strategy over the current context.
    ///
    /// Rejects when no strategy is set. The context is not modified.
    pub fn execute(&self) -> bool {
        let Some(strategy) = self.strategy.as_deref() else {
            warn!("no verification strategy set, rejecting");
            return false;
        };

        trace!(strategy = strategy.name(), "executing verification strategy");
        strategy.run(&self.ctx)
    }
}
