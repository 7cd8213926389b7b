extern crate std;

use soroban_sdk::{
    testutils::{Address as _, IssuerFlags, Ledger},
    token, Address, Env,
};

use crate::invariants;
use crate::{CrowdfundCampaign, CrowdfundCampaignClient};

const DURATION: u64 = 86_400;
const TARGET: i128 = 10_000;

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

fn setup() -> (
    Env,
    CrowdfundCampaignClient<'static>,
    Address,
    token::Client<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CrowdfundCampaign, ());
    let client = CrowdfundCampaignClient::new(&env, &contract_id);
    let beneficiary = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    client.initialize(&beneficiary, &token.address, &DURATION, &TARGET);
    (env, client, beneficiary, token)
}

fn mint(env: &Env, token: &token::Client, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

fn advance_time(env: &Env, secs: u64) {
    env.ledger().with_mut(|li| li.timestamp += secs);
}

/// Deposit exactly the target from a fresh contributor, then pass the deadline.
fn fund_to_target_and_end(
    env: &Env,
    client: &CrowdfundCampaignClient,
    token: &token::Client,
) -> Address {
    let funder = Address::generate(env);
    mint(env, token, &funder, TARGET);
    client.deposit(&funder, &TARGET);
    advance_time(env, DURATION);
    funder
}

// ─────────────────────────────────────────────────────────
// Claim
// ─────────────────────────────────────────────────────────

#[test]
// Error::CampaignNotEnded
#[should_panic(expected = "Error(Contract, #7)")]
fn test_claim_before_deadline_fails() {
    let (env, client, beneficiary, token) = setup();
    let funder = Address::generate(&env);
    mint(&env, &token, &funder, TARGET);
    client.deposit(&funder, &TARGET);
    client.claim(&beneficiary);
}

#[test]
// Error::NotOwner
#[should_panic(expected = "Error(Contract, #5)")]
fn test_claim_by_non_beneficiary_fails() {
    let (env, client, _beneficiary, token) = setup();
    fund_to_target_and_end(&env, &client, &token);
    let intruder = Address::generate(&env);
    client.claim(&intruder);
}

#[test]
// Error::GoalNotReached
#[should_panic(expected = "Error(Contract, #11)")]
fn test_claim_when_goal_missed_fails() {
    let (env, client, beneficiary, token) = setup();
    let funder = Address::generate(&env);
    mint(&env, &token, &funder, 1_000);
    client.deposit(&funder, &1_000);
    advance_time(&env, DURATION);
    client.claim(&beneficiary);
}

/// Goal met, deadline passed: the beneficiary claims the full pool exactly
/// once; a second attempt lands on `AlreadyWithdrawn`.
#[test]
fn test_claim_succeeds_exactly_once() {
    let (env, client, beneficiary, token) = setup();
    fund_to_target_and_end(&env, &client, &token);

    let claimed = client.claim(&beneficiary);
    assert_eq!(claimed, TARGET);
    assert_eq!(token.balance(&beneficiary), TARGET);
    assert_eq!(token.balance(&client.address), 0);
    assert!(client.get_status().beneficiary_claimed);

    // Error::AlreadyWithdrawn
    assert!(client.try_claim(&beneficiary).is_err());
    assert_eq!(token.balance(&beneficiary), TARGET);
}

#[test]
fn test_claim_sweeps_unattributed_value() {
    let (env, client, beneficiary, token) = setup();
    let funder = Address::generate(&env);
    let passerby = Address::generate(&env);
    mint(&env, &token, &funder, TARGET);
    mint(&env, &token, &passerby, 500);

    client.deposit(&funder, &TARGET);

    // Value sent straight to the contract address, bypassing deposit:
    // accepted, but credited to nobody.
    token.transfer(&passerby, &client.address, &500);
    let status = client.get_status();
    assert_eq!(status.total_raised, TARGET);
    assert_eq!(client.get_contribution(&passerby).amount, 0);
    assert_eq!(token.balance(&client.address), TARGET + 500);

    advance_time(&env, DURATION);
    let claimed = client.claim(&beneficiary);
    assert_eq!(claimed, TARGET + 500);
    assert_eq!(token.balance(&beneficiary), TARGET + 500);
    assert_eq!(token.balance(&client.address), 0);
}

// ─────────────────────────────────────────────────────────
// Refund
// ─────────────────────────────────────────────────────────

#[test]
// Error::DeadlineNotPassed
#[should_panic(expected = "Error(Contract, #8)")]
fn test_refund_before_deadline_fails() {
    let (env, client, _beneficiary, token) = setup();
    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    client.deposit(&alice, &1_000);
    client.refund(&alice);
}

#[test]
// Error::GoalAlreadyReached — refunds exist only for missed-goal outcomes.
#[should_panic(expected = "Error(Contract, #10)")]
fn test_refund_when_goal_met_fails() {
    let (env, client, _beneficiary, token) = setup();
    let funder = fund_to_target_and_end(&env, &client, &token);
    client.refund(&funder);
}

#[test]
// Error::NoContribution
#[should_panic(expected = "Error(Contract, #12)")]
fn test_refund_without_contribution_fails() {
    let (env, client, _beneficiary, _token) = setup();
    advance_time(&env, DURATION);
    let stranger = Address::generate(&env);
    client.refund(&stranger);
}

/// Goal missed, deadline passed: each contributor reclaims their own total
/// exactly once; a second attempt lands on `AlreadyWithdrawn`.
#[test]
fn test_refund_succeeds_exactly_once() {
    let (env, client, _beneficiary, token) = setup();
    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 3_000);
    client.deposit(&alice, &1_000);
    client.deposit(&alice, &500);
    advance_time(&env, DURATION);

    let refunded = client.refund(&alice);
    assert_eq!(refunded, 1_500);
    assert_eq!(token.balance(&alice), 3_000);
    assert_eq!(token.balance(&client.address), 0);

    let record = client.get_contribution(&alice);
    assert_eq!(record.amount, 1_500);
    assert!(record.refunded);

    // Error::AlreadyWithdrawn
    assert!(client.try_refund(&alice).is_err());
    assert_eq!(token.balance(&alice), 3_000);
}

#[test]
fn test_refunds_are_independent_per_contributor() {
    let (env, client, _beneficiary, token) = setup();
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    mint(&env, &token, &alice, 2_000);
    mint(&env, &token, &bob, 4_000);
    client.deposit(&alice, &2_000);
    client.deposit(&bob, &4_000);
    advance_time(&env, DURATION + 7 * 86_400);

    // Contributors resolve on their own schedule; one refund does not
    // disturb another record.
    client.refund(&bob);
    assert!(client.get_contribution(&bob).refunded);
    assert!(!client.get_contribution(&alice).refunded);
    assert_eq!(token.balance(&client.address), 2_000);

    client.refund(&alice);
    assert_eq!(token.balance(&alice), 2_000);
    assert_eq!(token.balance(&client.address), 0);
}

// ─────────────────────────────────────────────────────────
// Transfer failures
// ─────────────────────────────────────────────────────────

/// Like [`setup`], but the asset carries the revocable flag so the admin can
/// freeze balances and force outbound transfers to fail.
fn setup_with_revocable_token() -> (
    Env,
    CrowdfundCampaignClient<'static>,
    Address,
    token::Client<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CrowdfundCampaign, ());
    let client = CrowdfundCampaignClient::new(&env, &contract_id);
    let beneficiary = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    sac.issuer().set_flag(IssuerFlags::RevocableFlag);
    let token = token::Client::new(&env, &sac.address());
    client.initialize(&beneficiary, &token.address, &DURATION, &TARGET);
    (env, client, beneficiary, token)
}

fn set_frozen(env: &Env, token: &token::Client, holder: &Address, frozen: bool) {
    token::StellarAssetClient::new(env, &token.address).set_authorized(holder, &!frozen);
}

#[test]
// Error::WithdrawalFailed
#[should_panic(expected = "Error(Contract, #14)")]
fn test_claim_with_frozen_balance_fails() {
    let (env, client, beneficiary, token) = setup_with_revocable_token();
    fund_to_target_and_end(&env, &client, &token);

    set_frozen(&env, &token, &client.address, true);
    client.claim(&beneficiary);
}

/// A failed payout unwinds the whole call, so no claimed marker survives it
/// and the beneficiary can try again once the transfer can go through.
#[test]
fn test_claim_retries_after_failed_transfer() {
    let (env, client, beneficiary, token) = setup_with_revocable_token();
    fund_to_target_and_end(&env, &client, &token);

    set_frozen(&env, &token, &client.address, true);
    assert!(client.try_claim(&beneficiary).is_err());
    assert!(!client.get_status().beneficiary_claimed);
    assert_eq!(token.balance(&client.address), TARGET);

    set_frozen(&env, &token, &client.address, false);
    assert_eq!(client.claim(&beneficiary), TARGET);
    assert_eq!(token.balance(&beneficiary), TARGET);
    assert_eq!(token.balance(&client.address), 0);
}

#[test]
fn test_refund_retries_after_failed_transfer() {
    let (env, client, _beneficiary, token) = setup_with_revocable_token();
    let alice = Address::generate(&env);
    mint(&env, &token, &alice, 1_000);
    client.deposit(&alice, &1_000);
    advance_time(&env, DURATION);

    set_frozen(&env, &token, &client.address, true);
    assert!(client.try_refund(&alice).is_err());
    assert!(!client.get_contribution(&alice).refunded);
    assert_eq!(token.balance(&client.address), 1_000);

    set_frozen(&env, &token, &client.address, false);
    assert_eq!(client.refund(&alice), 1_000);
    assert_eq!(token.balance(&alice), 1_000);
    assert!(client.get_contribution(&alice).refunded);
}

// ─────────────────────────────────────────────────────────
// Scripted scenarios
// ─────────────────────────────────────────────────────────

/// target=10, duration=1: A deposits 10 before the deadline; the
/// beneficiary claims after it; a repeat claim is rejected.
#[test]
fn test_scenario_goal_met_then_claimed() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CrowdfundCampaign, ());
    let client = CrowdfundCampaignClient::new(&env, &contract_id);
    let beneficiary = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    client.initialize(&beneficiary, &token.address, &1, &10);

    let a = Address::generate(&env);
    mint(&env, &token, &a, 10);
    client.deposit(&a, &10);
    assert_eq!(client.get_status().total_raised, 10);

    advance_time(&env, 1);
    assert_eq!(client.claim(&beneficiary), 10);
    assert_eq!(token.balance(&beneficiary), 10);
    assert!(client.get_status().beneficiary_claimed);
    assert!(client.try_claim(&beneficiary).is_err());
}

/// target=10, duration=1: A deposits 1; after the deadline A is refunded and
/// the beneficiary's claim fails with `GoalNotReached`. The two resolved
/// outcomes never mix.
#[test]
fn test_scenario_goal_missed_then_refunded() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CrowdfundCampaign, ());
    let client = CrowdfundCampaignClient::new(&env, &contract_id);
    let beneficiary = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    client.initialize(&beneficiary, &token.address, &1, &10);

    let a = Address::generate(&env);
    mint(&env, &token, &a, 1);
    client.deposit(&a, &1);

    advance_time(&env, 1);
    assert_eq!(client.refund(&a), 1);
    assert_eq!(token.balance(&a), 1);
    assert!(client.try_claim(&beneficiary).is_err());

    let status = client.get_status();
    let record = client.get_contribution(&a);
    invariants::assert_outcomes_exclusive(&status, &[record]);
}
