//! End-to-end certificate verification tests
//!
//! Builds a sidechain, one of its certificates and the main chain around it,
//! then drives a verifier through load and execute.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use std::{io::Write, sync::Arc};

use integration_tests::harness::{
    counting_verifier, load_and_execute, load_on_chain, native_verifier,
};
use zendoo_primitives::{Amount, BackwardTransfer, Buf20, Buf32};
use zendoo_proof_verifier::{ProofVerifier, VerifierConfig, VkPolicy, VkSource};
use zendoo_test_utils::{
    CountingProofSystem, MemChain, ScenarioBuilder, bt_output, regular_output,
};

// ============================================================================
// Accept / reject
// ============================================================================

/// A well-formed certificate over a resolvable chain is loaded and accepted.
#[test]
fn test_valid_certificate_is_accepted() {
    let scenario = ScenarioBuilder::new().build();
    let mut verifier = native_verifier(VerifierConfig::default());

    assert_eq!(load_and_execute(&mut verifier, &scenario), (true, true));
    assert!(!verifier.context().is_null());
}

/// The backend verdict reaches the caller unchanged.
#[test]
fn test_execute_returns_backend_verdict() {
    let scenario = ScenarioBuilder::new().build();
    let mut verifier = counting_verifier(VerifierConfig::default());
    assert!(verifier.load(&scenario.sidechain, &scenario.certificate, &scenario.chain));

    verifier.backend().force_verdict(false);
    assert!(!verifier.execute());

    verifier.backend().force_verdict(true);
    assert!(verifier.execute());

    verifier.backend().clear_verdict();
    assert!(verifier.execute());
    assert_eq!(verifier.backend().counter().verify_calls(), 3);
}

/// Corrupted proof bytes fail the load, and executing afterwards rejects.
#[test]
fn test_corrupted_proof_is_rejected() {
    let mut scenario = ScenarioBuilder::new().build();
    scenario.corrupt_proof();
    let mut verifier = counting_verifier(VerifierConfig::default());
    verifier.backend().force_verdict(true);

    assert_eq!(load_and_execute(&mut verifier, &scenario), (false, false));
    assert!(verifier.context().is_null());
    assert_eq!(verifier.backend().counter().verify_calls(), 0);
}

/// A certificate whose previous end-of-epoch block differs on our chain is rejected.
#[test]
fn test_different_chain_history_is_rejected() {
    let scenario = ScenarioBuilder::new().build();

    // Epoch 2 starts at height 20; replace the block before it.
    let mut hashes: Vec<Buf32> = (0..=25).map(MemChain::synthetic_hash).collect();
    hashes[19] = Buf32::new([0xee; 32]);
    let forked = MemChain::from_hashes(hashes);

    let mut verifier = native_verifier(VerifierConfig::default());
    assert_eq!(load_on_chain(&mut verifier, &scenario, &forked), (true, false));
    assert_eq!(
        verifier.context().prev_end_epoch_mc_b_hash(),
        Some(&Buf32::new([0xee; 32]))
    );
}

/// Without a strategy every execution rejects, loaded context or not.
#[test]
fn test_no_strategy_always_rejects() {
    let scenario = ScenarioBuilder::new().build();
    let backend = Arc::new(CountingProofSystem::new());
    let mut verifier = ProofVerifier::new(backend, VerifierConfig::default());

    assert!(!verifier.execute());
    assert_eq!(load_and_execute(&mut verifier, &scenario), (true, false));
    assert_eq!(verifier.backend().counter().verify_calls(), 0);
}

// ============================================================================
// Backward transfers
// ============================================================================

/// Only backward-transfer outputs are collected, in output order.
#[test]
fn test_backward_transfers_keep_order() {
    let scenario = ScenarioBuilder::new()
        .outputs(vec![
            regular_output(1),
            bt_output(0xaa, 10),
            regular_output(2),
            bt_output(0xbb, 20),
        ])
        .build();
    let mut verifier = native_verifier(VerifierConfig::default());
    assert_eq!(load_and_execute(&mut verifier, &scenario), (true, true));

    let expected = vec![
        BackwardTransfer::new(Buf20::new([0xaa; 20]), Amount::from_units(10)),
        BackwardTransfer::new(Buf20::new([0xbb; 20]), Amount::from_units(20)),
    ];
    assert_eq!(verifier.context().bt_list(), Some(expected.as_slice()));
}

/// Certificates without backward transfers follow the configured policy.
#[test]
fn test_empty_backward_transfer_policy() -> anyhow::Result<()> {
    let scenario = ScenarioBuilder::new()
        .outputs(vec![regular_output(1)])
        .build();

    let mut permissive = native_verifier(VerifierConfig::default());
    assert_eq!(load_and_execute(&mut permissive, &scenario), (true, true));

    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "allow_empty_bt_list = false")?;
    let config = VerifierConfig::load(file.path())?;

    let mut strict = native_verifier(config);
    assert_eq!(load_and_execute(&mut strict, &scenario), (true, false));
    Ok(())
}

// ============================================================================
// Verification key policy
// ============================================================================

/// A required key bound into the proof is attached and verified.
#[test]
fn test_required_key_bound_into_proof() -> anyhow::Result<()> {
    let scenario = ScenarioBuilder::new()
        .verification_key(Buf32::new([0x77; 32]))
        .proof_binds_vk(true)
        .build();
    let config = VerifierConfig::from_toml_str(
        r#"
        vk_policy = "required"

        [vk_source]
        kind = "sidechain"
        "#,
    )?;
    assert_eq!(config.vk_policy, VkPolicy::Required);

    let mut verifier = native_verifier(config);
    assert_eq!(load_and_execute(&mut verifier, &scenario), (true, true));
    Ok(())
}

/// A key the proof did not commit to makes the proof invalid once required.
#[test]
fn test_required_key_not_bound_into_proof() {
    let scenario = ScenarioBuilder::new()
        .verification_key(Buf32::new([0x77; 32]))
        .build();

    let mut waived = native_verifier(VerifierConfig {
        vk_source: VkSource::Sidechain,
        ..VerifierConfig::default()
    });
    assert_eq!(load_and_execute(&mut waived, &scenario), (true, true));

    let mut required = native_verifier(VerifierConfig {
        vk_policy: VkPolicy::Required,
        vk_source: VkSource::Sidechain,
        ..VerifierConfig::default()
    });
    assert_eq!(load_and_execute(&mut required, &scenario), (true, false));
}

/// A required key that cannot be found fails the load.
#[test]
fn test_required_key_missing() {
    let scenario = ScenarioBuilder::new().build();
    let mut verifier = native_verifier(VerifierConfig {
        vk_policy: VkPolicy::Required,
        ..VerifierConfig::default()
    });

    assert_eq!(load_and_execute(&mut verifier, &scenario), (false, false));
    assert!(verifier.context().is_null());
}
