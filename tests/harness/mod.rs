//! Shared setup for verifier integration tests.

use std::sync::Arc;

use zendoo_proof_sys::{ProofSystem, native::NativeProofSystem};
use zendoo_proof_verifier::{ProofVerifier, VerifierConfig};
use zendoo_sc_types::ChainView;
use zendoo_test_utils::{CountingProofSystem, Scenario, init_test_logging};

/// Verifier over the instrumented backend, with the strategy from `config` active.
pub fn counting_verifier(config: VerifierConfig) -> ProofVerifier<CountingProofSystem> {
    init_test_logging();
    ProofVerifier::from_config(Arc::new(CountingProofSystem::new()), config)
}

/// Verifier over the plain native backend.
pub fn native_verifier(config: VerifierConfig) -> ProofVerifier<NativeProofSystem> {
    init_test_logging();
    ProofVerifier::from_config(Arc::new(NativeProofSystem::new()), config)
}

/// Loads the scenario into the verifier, then executes it if loading succeeded.
///
/// Returns `(loaded, accepted)`.
pub fn load_and_execute<P>(verifier: &mut ProofVerifier<P>, scenario: &Scenario) -> (bool, bool)
where
    P: ProofSystem + 'static,
{
    load_on_chain(verifier, scenario, &scenario.chain)
}

/// Same as [`load_and_execute`] but against a different view of the main chain.
pub fn load_on_chain<P>(
    verifier: &mut ProofVerifier<P>,
    scenario: &Scenario,
    chain: &impl ChainView,
) -> (bool, bool)
where
    P: ProofSystem + 'static,
{
    let loaded = verifier.load(&scenario.sidechain, &scenario.certificate, chain);
    let accepted = verifier.execute();
    (loaded, accepted)
}
