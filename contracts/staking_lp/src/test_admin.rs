extern crate std;

use common::FeeConfig;
use soroban_sdk::{testutils::Address as _, vec, Address, Env};

use crate::{ContractError, StakingLpContract, StakingLpContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingLpContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let staking_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingLpContract, ());
    let client = StakingLpContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &staking_token.address(),
        &reward_token.address(),
        &86_400,
        &0,
    );

    (env, client, owner)
}

// ── Ownership transfer ───────────────────────────────────────────────────────

#[test]
fn test_two_step_ownership_transfer() {
    let (env, client, owner) = setup();
    let next = Address::generate(&env);

    client.propose_owner(&owner, &next);
    assert_eq!(client.get_pending_owner(), Some(next.clone()));
    // Nothing changes until the candidate accepts.
    assert_eq!(client.get_owner(), owner);

    client.accept_owner(&next);
    assert_eq!(client.get_owner(), next);
    assert_eq!(client.get_pending_owner(), None);

    // The previous owner lost its rights.
    match client.try_pause(&owner) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    client.pause(&next);
}

#[test]
fn test_accept_by_wrong_address_fails() {
    let (env, client, owner) = setup();
    let next = Address::generate(&env);
    let intruder = Address::generate(&env);

    client.propose_owner(&owner, &next);
    match client.try_accept_owner(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_owner(), owner);
}

#[test]
fn test_cancelled_proposal_cannot_be_accepted() {
    let (env, client, owner) = setup();
    let next = Address::generate(&env);

    client.propose_owner(&owner, &next);
    client.cancel_owner_transfer(&owner);
    assert_eq!(client.get_pending_owner(), None);

    match client.try_accept_owner(&next) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Owner-only setters ───────────────────────────────────────────────────────

#[test]
fn test_non_owner_rejected_everywhere() {
    let (env, client, _owner) = setup();
    let stranger = Address::generate(&env);

    match client.try_set_rewards_duration(&stranger, &10) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_add_to_eligible_users(&stranger, &vec![&env, stranger.clone()]) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_set_operator(&stranger, &stranger, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_propose_owner(&stranger, &stranger) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Fees ─────────────────────────────────────────────────────────────────────

#[test]
fn test_set_and_read_fees() {
    let (env, client, owner) = setup();
    let recipient = Address::generate(&env);
    assert_eq!(client.get_fees(), None);

    let config = FeeConfig {
        deposit_fee_bps: 30,
        withdrawal_fee_bps: 10_000,
        recipient,
    };
    client.set_fees(&owner, &config);
    assert_eq!(client.get_fees(), Some(config));
}

#[test]
fn test_fee_above_hundred_percent_rejected() {
    let (env, client, owner) = setup();
    let config = FeeConfig {
        deposit_fee_bps: 10_001,
        withdrawal_fee_bps: 0,
        recipient: Address::generate(&env),
    };

    match client.try_set_fees(&owner, &config) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidFee),
        _ => unreachable!("Expected InvalidFee error"),
    }
    assert_eq!(client.get_fees(), None);
}

#[test]
fn test_quote_fee_rounds_down() {
    let (_env, client, _owner) = setup();
    assert_eq!(client.quote_fee(&999, &30), (2, 997));
    assert_eq!(client.quote_fee(&1_000, &10_000), (1_000, 0));

    match client.try_quote_fee(&1_000, &10_001) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidFee),
        _ => unreachable!("Expected InvalidFee error"),
    }
}

// ── Error codes ──────────────────────────────────────────────────────────────

#[test]
fn test_error_discriminants_are_stable() {
    assert_eq!(ContractError::NotInitialized as u32, 1);
    assert_eq!(ContractError::Unauthorized as u32, 10);
    assert_eq!(ContractError::ContractPaused as u32, 11);
    assert_eq!(ContractError::ZeroAmount as u32, 20);
    assert_eq!(ContractError::NotEligible as u32, 40);
    assert_eq!(ContractError::DurationTooShort as u32, 43);
    assert_eq!(ContractError::InsufficientBalance as u32, 60);
    assert_eq!(ContractError::ArithmeticOverflow as u32, 63);
}
