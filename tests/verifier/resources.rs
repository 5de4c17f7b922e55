//! Resource accounting across verifier use
//!
//! Every proof-system object a verifier acquires must be released exactly
//! once, whether loads succeed, fail halfway or are repeated.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use integration_tests::harness::{counting_verifier, load_and_execute};
use zendoo_primitives::Buf32;
use zendoo_proof_verifier::{LoadError, VerificationContext, VerifierConfig, VkSource};
use zendoo_test_utils::{MemChain, ScenarioBuilder};

/// Repeated loads release the previous context before building the next.
#[test]
fn test_repeated_loads_do_not_leak() {
    let scenario = ScenarioBuilder::new().build();
    let mut verifier = counting_verifier(VerifierConfig::default());
    let counter = verifier.backend().counter().clone();

    for round in 1..=5 {
        assert_eq!(load_and_execute(&mut verifier, &scenario), (true, true));
        assert_eq!(counter.live(), 2);
        assert_eq!(counter.allocated(), 2 * round);
    }

    drop(verifier);
    assert_eq!(counter.live(), 0);
    assert_eq!(counter.freed(), counter.allocated());
}

/// Alternating good and bad loads never leave objects behind.
#[test]
fn test_failed_loads_release_partial_context() {
    let good = ScenarioBuilder::new().build();
    let mut bad_proof = good.clone();
    bad_proof.corrupt_proof();
    let mut bad_constant = good.clone();
    bad_constant.corrupt_constant();
    let short_chain = MemChain::with_tip(5);

    let mut verifier = counting_verifier(VerifierConfig::default());
    let counter = verifier.backend().counter().clone();

    assert!(verifier.load(&good.sidechain, &good.certificate, &good.chain));
    assert_eq!(counter.live(), 2);

    let err = verifier
        .try_load(&bad_proof.sidechain, &bad_proof.certificate, &bad_proof.chain)
        .unwrap_err();
    assert!(matches!(err, LoadError::MalformedProof));
    assert_eq!(counter.live(), 0);

    assert!(verifier.load(&good.sidechain, &good.certificate, &good.chain));
    let err = verifier
        .try_load(&good.sidechain, &good.certificate, &short_chain)
        .unwrap_err();
    assert!(matches!(err, LoadError::MissingBlock(19)));
    assert_eq!(counter.live(), 0);

    let err = verifier
        .try_load(
            &bad_constant.sidechain,
            &bad_constant.certificate,
            &bad_constant.chain,
        )
        .unwrap_err();
    assert!(matches!(err, LoadError::MalformedConstant));
    assert_eq!(counter.live(), 0);
    assert!(verifier.context().is_null());
}

/// A waived key is fetched and released without ending up in the context.
#[test]
fn test_waived_key_is_released() {
    let scenario = ScenarioBuilder::new()
        .verification_key(Buf32::new([0x11; 32]))
        .build();
    let mut verifier = counting_verifier(VerifierConfig {
        vk_source: VkSource::Sidechain,
        ..VerifierConfig::default()
    });
    let counter = verifier.backend().counter().clone();

    assert_eq!(load_and_execute(&mut verifier, &scenario), (true, true));
    assert_eq!(counter.allocated(), 3);
    assert_eq!(counter.live(), 2);
    assert!(verifier.context().verification_key().is_none());
}

/// Replacing or resetting the context releases what it held.
#[test]
fn test_set_context_and_reset_release() {
    let scenario = ScenarioBuilder::new().build();
    let mut verifier = counting_verifier(VerifierConfig::default());
    let counter = verifier.backend().counter().clone();

    assert!(verifier.load(&scenario.sidechain, &scenario.certificate, &scenario.chain));
    verifier.set_context(VerificationContext::null());
    assert_eq!(counter.live(), 0);
    assert!(!verifier.execute());

    assert!(verifier.load(&scenario.sidechain, &scenario.certificate, &scenario.chain));
    verifier.reset();
    verifier.reset();
    assert_eq!(counter.live(), 0);
    assert_eq!(counter.freed(), 4);
    assert!(verifier.context().is_null());
}
