//! End-to-end flows: access-gated values through every policy variant, and
//! full settlement lifecycles through the engine.

use ed25519_dalek::{Signature, Signer, SigningKey};
use rust_decimal::Decimal;

use claimgate_access::{
    AllowListPolicy, GatedValue, MerklePolicy, MerkleTree, SignedEntitlementPolicy,
};
use claimgate_registry::{CoinLedger, TokenLedger};
use claimgate_settlement::SettlementEngine;
use claimgate_types::config::fixtures::keypair;
use claimgate_types::{
    AccountId, ClaimgateError, EngineConfig, Nonce, RegistryId, SettlementAction, SettlementClaim,
    TokenId,
};

fn sign_claim(key: &SigningKey, claim: &SettlementClaim) -> Signature {
    key.sign(claim.digest().as_bytes())
}

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

struct World {
    engine: SettlementEngine,
    authority_key: SigningKey,
    admin: AccountId,
    coin: RegistryId,
    nft: RegistryId,
}

fn world() -> World {
    let (authority_key, _) = keypair();
    let (_, admin) = keypair();
    let (_, custody) = keypair();

    let config = EngineConfig::new(authority_key.verifying_key().to_bytes(), admin);
    let mut engine = SettlementEngine::new(&config, custody).expect("valid authority");

    let coin = engine
        .attach_fungible(admin, Box::new(CoinLedger::new(RegistryId::new())))
        .expect("admin attaches");
    let nft = engine
        .attach_non_fungible(admin, Box::new(TokenLedger::new(RegistryId::new())))
        .expect("admin attaches");
    engine.fund_custody(admin, coin, dec(10_000)).expect("admin funds");

    World {
        engine,
        authority_key,
        admin,
        coin,
        nft,
    }
}

// ──────────────────── access-control variants ────────────────────

#[test]
fn allow_list_gates_a_protected_value() {
    let (_, admin) = keypair();
    let (_, alice) = keypair();
    let (_, mallory) = keypair();

    let mut gated = GatedValue::new(AllowListPolicy::new(admin));
    gated.policy_mut().grant(admin, alice).unwrap();

    gated.set(alice, &(), 42).unwrap();
    assert_eq!(gated.get(), 42);

    let err = gated.set(mallory, &(), 7).unwrap_err();
    assert!(matches!(err, ClaimgateError::NotWhitelisted));
    assert_eq!(gated.get(), 42);
}

#[test]
fn signed_entitlement_gates_a_protected_value() {
    let (authority_key, _) = keypair();
    let (_, alice) = keypair();
    let (_, mallory) = keypair();

    let mut gated = GatedValue::new(SignedEntitlementPolicy::new(authority_key.verifying_key()));
    let sig = authority_key.sign(&SignedEntitlementPolicy::entitlement_digest(alice));

    gated.set(alice, &sig, 11).unwrap();
    // The same artifact keeps working; this variant is deliberately
    // replay-free. Single-use semantics live in the settlement engine.
    gated.set(alice, &sig, 12).unwrap();
    assert_eq!(gated.get(), 12);

    // Alice's artifact does not entitle Mallory.
    let err = gated.set(mallory, &sig, 13).unwrap_err();
    assert!(matches!(err, ClaimgateError::SignatureInvalid));
    assert_eq!(gated.get(), 12);
}

#[test]
fn merkle_membership_gates_a_protected_value() {
    let members: Vec<AccountId> = (1u8..=5).map(|b| AccountId([b; 32])).collect();
    let tree = MerkleTree::from_identities(&members).unwrap();
    let mut gated = GatedValue::new(MerklePolicy::new(tree.root()));

    let proof = tree.proof_for(members[2]).expect("member has a proof");
    gated.set(members[2], &proof, 99).unwrap();
    assert_eq!(gated.get(), 99);

    // An outsider borrowing a member's proof fails: the leaf is recomputed
    // from the caller's own identity.
    let outsider = AccountId([0xee; 32]);
    let err = gated.set(outsider, &proof, 0).unwrap_err();
    assert!(matches!(err, ClaimgateError::ProofInvalid));
    assert_eq!(gated.get(), 99);
}

// ──────────────────── settlement lifecycle ────────────────────

#[test]
fn full_settlement_lifecycle() {
    let mut w = world();
    let (_, alice) = keypair();

    // 1. Authority authorizes a mint into custody, then a delivery to Alice.
    let custody = w.engine.custody_account();
    let mint = SettlementClaim::mint(custody, w.nft, TokenId(1), Nonce(1));
    w.engine
        .mint_non_fungible(custody, w.nft, TokenId(1), Nonce(1), &sign_claim(&w.authority_key, &mint))
        .unwrap();

    let delivery = SettlementClaim::delivery(alice, w.nft, TokenId(1), Nonce(2));
    let event = w
        .engine
        .transfer_non_fungible(
            alice,
            w.nft,
            TokenId(1),
            Nonce(2),
            &sign_claim(&w.authority_key, &delivery),
        )
        .unwrap();
    assert!(matches!(
        event.action,
        SettlementAction::NonFungibleTransferred { .. }
    ));

    // 2. A payout on top.
    let payout = SettlementClaim::payout(alice, w.coin, dec(1_500), Nonce(3));
    w.engine
        .transfer_fungible(alice, w.coin, dec(1_500), Nonce(3), &sign_claim(&w.authority_key, &payout))
        .unwrap();

    // Final state: Alice owns token 1 and 1500 coins; custody shrank.
    assert_eq!(
        w.engine.non_fungible(w.nft).unwrap().owner_of(TokenId(1)),
        Some(alice)
    );
    assert_eq!(w.engine.fungible(w.coin).unwrap().balance_of(alice), dec(1_500));
    assert_eq!(w.engine.custody_balance(w.coin).unwrap(), dec(8_500));

    // All three claims consumed.
    for claim in [&mint, &delivery, &payout] {
        assert!(w.engine.is_consumed(&claim.digest()));
    }
}

#[test]
fn settled_claim_is_dead_and_fresh_claim_hits_state_conflict() {
    let mut w = world();
    let (_, alice) = keypair();

    let first = SettlementClaim::mint(alice, w.nft, TokenId(7), Nonce(1));
    let sig1 = sign_claim(&w.authority_key, &first);
    w.engine
        .mint_non_fungible(alice, w.nft, TokenId(7), Nonce(1), &sig1)
        .unwrap();

    // Same claim again: replay.
    let err = w
        .engine
        .mint_non_fungible(alice, w.nft, TokenId(7), Nonce(1), &sig1)
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::ClaimAlreadyUsed { .. }));

    // Fresh authorization with nonce 2 for the same token: passes the
    // signature and replay gates, fails on registry state.
    let second = SettlementClaim::mint(alice, w.nft, TokenId(7), Nonce(2));
    let err = w
        .engine
        .mint_non_fungible(
            alice,
            w.nft,
            TokenId(7),
            Nonce(2),
            &sign_claim(&w.authority_key, &second),
        )
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::TokenAlreadyMinted { .. }));
    assert!(!w.engine.is_consumed(&second.digest()));

    // Nonce 2 itself is still unconsumed and spendable on another token.
    let third = SettlementClaim::mint(alice, w.nft, TokenId(8), Nonce(2));
    w.engine
        .mint_non_fungible(
            alice,
            w.nft,
            TokenId(8),
            Nonce(2),
            &sign_claim(&w.authority_key, &third),
        )
        .unwrap();
}

#[test]
fn mixed_settlement_is_atomic_end_to_end() {
    let mut w = world();
    let (_, alice) = keypair();

    // Poison the mint leg: token 1 already exists.
    let custody = w.engine.custody_account();
    let pre = SettlementClaim::mint(custody, w.nft, TokenId(1), Nonce(1));
    w.engine
        .mint_non_fungible(custody, w.nft, TokenId(1), Nonce(1), &sign_claim(&w.authority_key, &pre))
        .unwrap();

    let bad = SettlementClaim::mixed(alice, w.coin, dec(500), w.nft, TokenId(1), Nonce(2));
    let err = w
        .engine
        .mixed_settlement(
            alice,
            w.coin,
            dec(500),
            w.nft,
            TokenId(1),
            Nonce(2),
            &sign_claim(&w.authority_key, &bad),
        )
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::TokenAlreadyMinted { .. }));
    // Neither leg moved anything.
    assert_eq!(w.engine.custody_balance(w.coin).unwrap(), dec(10_000));
    assert_eq!(w.engine.fungible(w.coin).unwrap().balance_of(alice), Decimal::ZERO);

    // A well-formed mixed claim settles both legs under one signature.
    let good = SettlementClaim::mixed(alice, w.coin, dec(500), w.nft, TokenId(2), Nonce(3));
    let events = w
        .engine
        .mixed_settlement(
            alice,
            w.coin,
            dec(500),
            w.nft,
            TokenId(2),
            Nonce(3),
            &sign_claim(&w.authority_key, &good),
        )
        .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        w.engine.non_fungible(w.nft).unwrap().owner_of(TokenId(2)),
        Some(alice)
    );
    assert_eq!(w.engine.fungible(w.coin).unwrap().balance_of(alice), dec(500));
    assert_eq!(w.engine.custody_balance(w.coin).unwrap(), dec(9_500));
}

#[test]
fn negative_payout_cannot_inflate_custody() {
    let mut w = world();
    let (_, alice) = keypair();

    // Even with a valid authority signature, a payout of -50 must be
    // rejected outright; letting it through would debit Alice and grow
    // custody past its funding.
    let claim = SettlementClaim::payout(alice, w.coin, dec(-50), Nonce(1));
    let err = w
        .engine
        .transfer_fungible(alice, w.coin, dec(-50), Nonce(1), &sign_claim(&w.authority_key, &claim))
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::NonPositiveAmount { .. }));

    assert_eq!(w.engine.custody_balance(w.coin).unwrap(), dec(10_000));
    assert_eq!(w.engine.fungible(w.coin).unwrap().balance_of(alice), Decimal::ZERO);
    assert!(!w.engine.is_consumed(&claim.digest()));
}

#[test]
fn signatures_bind_every_parameter_across_the_api() {
    let mut w = world();
    let (_, alice) = keypair();
    let (_, bob) = keypair();

    let claim = SettlementClaim::payout(alice, w.coin, dec(100), Nonce(1));
    let sig = sign_claim(&w.authority_key, &claim);

    // Redirect recipient.
    let err = w
        .engine
        .transfer_fungible(bob, w.coin, dec(100), Nonce(1), &sig)
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::SignatureInvalid));

    // Inflate amount.
    let err = w
        .engine
        .transfer_fungible(alice, w.coin, dec(9_999), Nonce(1), &sig)
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::SignatureInvalid));

    // Repurpose as a different operation kind with overlapping parameters.
    let err = w
        .engine
        .mint_non_fungible(alice, w.coin, TokenId(100), Nonce(1), &sig)
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::SignatureInvalid));

    // The untampered claim still settles: no failed attempt consumed it.
    w.engine
        .transfer_fungible(alice, w.coin, dec(100), Nonce(1), &sig)
        .unwrap();
}

#[test]
fn administration_is_caller_gated_end_to_end() {
    let mut w = world();
    let (_, mallory) = keypair();

    let err = w
        .engine
        .attach_non_fungible(mallory, Box::new(TokenLedger::new(RegistryId::new())))
        .unwrap_err();
    assert!(matches!(err, ClaimgateError::NotAdministrator));

    let err = w.engine.fund_custody(mallory, w.coin, dec(1)).unwrap_err();
    assert!(matches!(err, ClaimgateError::NotAdministrator));

    // The real administrator still can.
    let admin = w.admin;
    w.engine.fund_custody(admin, w.coin, dec(1)).unwrap();
    assert_eq!(w.engine.custody_balance(w.coin).unwrap(), dec(10_001));
}
