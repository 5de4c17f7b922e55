//! Verification strategies and the registry of available kinds.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::*;
use zendoo_proof_sys::ProofSystem;

use crate::{
    config::{VerifierConfig, VkPolicy},
    context::VerificationContext,
    errors::PreconditionError,
};

/// One way of verifying a loaded [`VerificationContext`].
pub trait VerificationStrategy<P: ProofSystem>: fmt::Debug {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Returns whether the context carries everything [`run`](Self::run) needs.
    fn check_preconditions(&self, ctx: &VerificationContext<P>) -> bool;

    /// Verifies the context, rejecting without calling the proof system if the
    /// preconditions do not hold.
    fn run(&self, ctx: &VerificationContext<P>) -> bool;
}

/// Which contexts a strategy is willing to forward to the proof system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PreconditionPolicy {
    pub allow_empty_bt_list: bool,
    pub min_quality: u64,
    pub vk_policy: VkPolicy,
}

impl Default for PreconditionPolicy {
    fn default() -> Self {
        Self::from_config(&VerifierConfig::default())
    }
}

impl PreconditionPolicy {
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self {
            allow_empty_bt_list: config.allow_empty_bt_list,
            min_quality: config.min_quality,
            vk_policy: config.vk_policy,
        }
    }

    /// Checks the context, reporting the first violated requirement.
    pub fn check<P: ProofSystem>(
        &self,
        ctx: &VerificationContext<P>,
    ) -> Result<(), PreconditionError> {
        if ctx.end_epoch_mc_b_hash().is_none() {
            return Err(PreconditionError::MissingEndEpochHash);
        }

        if ctx.prev_end_epoch_mc_b_hash().is_none() {
            return Err(PreconditionError::MissingPrevEndEpochHash);
        }

        let bt_list = ctx.bt_list().ok_or(PreconditionError::MissingBtList)?;
        if bt_list.is_empty() && !self.allow_empty_bt_list {
            return Err(PreconditionError::EmptyBtList);
        }

        if ctx.quality() < self.min_quality {
            return Err(PreconditionError::QualityTooLow {
                quality: ctx.quality(),
                min: self.min_quality,
            });
        }

        if ctx.proof().is_none() {
            return Err(PreconditionError::MissingProof);
        }

        if self.vk_policy == VkPolicy::Required && ctx.verification_key().is_none() {
            return Err(PreconditionError::MissingVerificationKey);
        }

        Ok(())
    }
}

/// Verifies the proof carried by a sidechain withdrawal certificate.
#[derive(Debug)]
pub struct CertProofStrategy<P> {
    backend: Arc<P>,
    policy: PreconditionPolicy,
}

impl<P: ProofSystem> CertProofStrategy<P> {
    pub fn new(backend: Arc<P>, policy: PreconditionPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> &PreconditionPolicy {
        &self.policy
    }
}

impl<P: ProofSystem> VerificationStrategy<P> for CertProofStrategy<P> {
    fn name(&self) -> &'static str {
        StrategyKind::CertProof.name()
    }

    fn check_preconditions(&self, ctx: &VerificationContext<P>) -> bool {
        self.policy.check(ctx).is_ok()
    }

    fn run(&self, ctx: &VerificationContext<P>) -> bool {
        if let Err(err) = self.policy.check(ctx) {
            warn!(strategy = self.name(), %err, "rejecting context, preconditions not met");
            return false;
        }

        // Required fields were checked above.
        let Some(inputs) = ctx.verifier_inputs() else {
            warn!(strategy = self.name(), "rejecting incomplete context");
            return false;
        };

        trace!(
            strategy = self.name(),
            quality = inputs.quality,
            bt_count = inputs.bt_list.len(),
            has_constant = inputs.constant.is_some(),
            has_vk = inputs.verification_key.is_some(),
            "dispatching to proof system"
        );

        let valid = self.backend.verify(&inputs);
        debug!(strategy = self.name(), %valid, "proof system returned");
        valid
    }
}

/// Registered strategy kinds, selectable from config.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Withdrawal certificate proof verification.
    #[default]
    CertProof,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::CertProof => "cert_proof",
        }
    }

    /// Instantiates the strategy over a proof system backend.
    pub fn build<P: ProofSystem + 'static>(
        self,
        backend: Arc<P>,
        config: &VerifierConfig,
    ) -> Box<dyn VerificationStrategy<P>> {
        match self {
            Self::CertProof => Box::new(CertProofStrategy::new(
                backend,
                PreconditionPolicy::from_config(config),
            )),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
