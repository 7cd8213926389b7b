//! # Crowdfund Campaign Contract
//!
//! A time-bounded, goal-based fund pool. One deployed instance is one
//! campaign: contributors deposit a single token toward a target before a
//! deadline; if the target is met the beneficiary claims the pooled balance
//! exactly once, otherwise each contributor reclaims their own deposit
//! exactly once.
//!
//! | Phase      | Entry Point(s)                         |
//! |------------|----------------------------------------|
//! | Bootstrap  | [`CrowdfundCampaign::initialize`]      |
//! | Funding    | [`CrowdfundCampaign::deposit`]         |
//! | Resolution | [`CrowdfundCampaign::claim`], [`CrowdfundCampaign::refund`] |
//! | Queries    | `get_status`, `get_contribution`       |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`]; event emission to
//! [`events`]. This file holds the transition guards and the
//! checks-effects-interactions discipline: every outbound token transfer
//! happens only after the one-shot flag covering it has been committed, so a
//! nested call back into the contract observes the post-mutation state and
//! is rejected by the guards instead of repeating a payout.
//!
//! Campaign parameters are immutable after `initialize`. Which resolved
//! branch a campaign ends on (goal met vs missed) is fixed the instant the
//! deadline passes, because `deposit` rejects everything at or after it.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env,
};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_resolution;

use storage::{
    is_initialized, load_config, load_contribution, load_state, save_campaign, save_contribution,
    save_state,
};
pub use events::{
    CampaignCreated, ContributionRefunded, DepositMade, FundsClaimed, StatusSnapshot,
};
pub use types::{CampaignConfig, CampaignState, CampaignStatus, Contribution};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized     = 2,
    /// Target amount was zero or negative at construction.
    InvalidGoal        = 3,
    /// Duration was zero, or the deadline timestamp would overflow.
    InvalidDeadline    = 4,
    /// Caller is not the beneficiary.
    NotOwner           = 5,
    /// Deposit attempted at or after the deadline.
    CampaignEnded      = 6,
    /// Claim attempted before the deadline.
    CampaignNotEnded   = 7,
    /// Refund attempted before the deadline.
    DeadlineNotPassed  = 8,
    /// Deposit amount was zero or negative.
    InsufficientAmount = 9,
    /// Deposit or refund attempted after the target was already met.
    GoalAlreadyReached = 10,
    /// Claim attempted on a campaign that missed its target.
    GoalNotReached     = 11,
    /// Refund attempted by an address with no recorded deposits.
    NoContribution     = 12,
    /// Second claim or second refund for the same party.
    AlreadyWithdrawn   = 13,
    /// The outbound token transfer reported failure.
    WithdrawalFailed   = 14,
    /// An accumulator would overflow `i128`.
    Overflow           = 15,
}

#[contract]
pub struct CrowdfundCampaign;

#[contractimpl]
impl CrowdfundCampaign {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Create the campaign. Must be called exactly once after deployment.
    ///
    /// - `beneficiary` must sign and becomes the only address able to claim.
    /// - `token` is the single funding asset; it never changes.
    /// - The deadline is fixed at `now + duration_secs`.
    ///
    /// Fails with `InvalidGoal` if `target <= 0`, `InvalidDeadline` if
    /// `duration_secs == 0` or the deadline would overflow, and
    /// `AlreadyInitialized` on any subsequent call.
    pub fn initialize(
        env: Env,
        beneficiary: Address,
        token: Address,
        duration_secs: u64,
        target: i128,
    ) {
        beneficiary.require_auth();

        if is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if target <= 0 {
            panic_with_error!(&env, Error::InvalidGoal);
        }
        if duration_secs == 0 {
            panic_with_error!(&env, Error::InvalidDeadline);
        }

        let deadline = env
            .ledger()
            .timestamp()
            .checked_add(duration_secs)
            .unwrap_or_else(|| panic_with_error!(&env, Error::InvalidDeadline));

        let config = CampaignConfig {
            beneficiary: beneficiary.clone(),
            token: token.clone(),
            target,
            deadline,
        };
        let state = CampaignState {
            total_raised: 0,
            beneficiary_claimed: false,
        };
        save_campaign(&env, &config, &state);

        events::campaign_created(
            &env,
            CampaignCreated {
                beneficiary,
                token,
                target,
                deadline,
            },
        );
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the campaign token toward the goal.
    ///
    /// Guards, in order:
    /// - `amount > 0`, else `InsufficientAmount` (checked first so a zero
    ///   deposit reports the same error in every campaign state);
    /// - `now < deadline`, else `CampaignEnded`;
    /// - `total_raised < target`, else `GoalAlreadyReached` — a deposit
    ///   arriving after the goal is met is rejected whole, never clipped.
    ///
    /// The inbound token transfer and the accounting update are one
    /// transaction: if the transfer traps, the invocation unwinds and no
    /// state persists.
    pub fn deposit(env: Env, contributor: Address, amount: i128) {
        contributor.require_auth();

        let config = load_config(&env);
        let mut state = load_state(&env);

        if amount <= 0 {
            panic_with_error!(&env, Error::InsufficientAmount);
        }
        let now = env.ledger().timestamp();
        if now >= config.deadline {
            panic_with_error!(&env, Error::CampaignEnded);
        }
        if state.total_raised >= config.target {
            panic_with_error!(&env, Error::GoalAlreadyReached);
        }

        // Take custody. Traps on failure, unwinding the whole invocation
        // before any accounting is written.
        token::Client::new(&env, &config.token).transfer(
            &contributor,
            &env.current_contract_address(),
            &amount,
        );

        let mut record = load_contribution(&env, &contributor);
        record.amount = record
            .amount
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        state.total_raised = state
            .total_raised
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));

        save_contribution(&env, &contributor, &record);
        save_state(&env, &state);

        events::deposit_made(&env, &contributor, amount);
        events::status_snapshot(
            &env,
            state.total_raised,
            state.total_raised >= config.target,
            now >= config.deadline,
        );
    }

    // ─────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────

    /// Claim the full pooled balance. Beneficiary only, exactly once, after
    /// the deadline, and only if the target was met.
    ///
    /// The transferred amount is the contract's entire token balance, which
    /// sweeps any value sent directly to the contract address without going
    /// through `deposit`. Returns the amount transferred.
    ///
    /// The claimed flag is committed before the outbound transfer; a
    /// reentrant call lands on `AlreadyWithdrawn`. A transfer failure aborts
    /// with `WithdrawalFailed`, unwinding the flag with it, so the claim can
    /// be retried once the transfer path is healthy.
    pub fn claim(env: Env, caller: Address) -> i128 {
        caller.require_auth();

        let config = load_config(&env);
        let mut state = load_state(&env);

        if caller != config.beneficiary {
            panic_with_error!(&env, Error::NotOwner);
        }
        if env.ledger().timestamp() < config.deadline {
            panic_with_error!(&env, Error::CampaignNotEnded);
        }
        if state.total_raised < config.target {
            panic_with_error!(&env, Error::GoalNotReached);
        }
        if state.beneficiary_claimed {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }

        // CEI: commit the one-shot flag before moving funds.
        state.beneficiary_claimed = true;
        save_state(&env, &state);

        let token_client = token::Client::new(&env, &config.token);
        let contract = env.current_contract_address();
        let amount = token_client.balance(&contract);

        match token_client.try_transfer(&contract, &config.beneficiary, &amount) {
            Ok(Ok(())) => {}
            _ => panic_with_error!(&env, Error::WithdrawalFailed),
        }

        events::funds_claimed(&env, &config.beneficiary, amount);
        amount
    }

    /// Reclaim the caller's own deposits. Only after the deadline, only if
    /// the target was missed, exactly once per contributor.
    ///
    /// Same ordering discipline as `claim`: the refunded flag is committed
    /// before the outbound transfer. Returns the amount transferred.
    pub fn refund(env: Env, contributor: Address) -> i128 {
        contributor.require_auth();

        let config = load_config(&env);
        let state = load_state(&env);

        if env.ledger().timestamp() < config.deadline {
            panic_with_error!(&env, Error::DeadlineNotPassed);
        }
        if state.total_raised >= config.target {
            panic_with_error!(&env, Error::GoalAlreadyReached);
        }

        let mut record = load_contribution(&env, &contributor);
        if record.amount == 0 {
            panic_with_error!(&env, Error::NoContribution);
        }
        if record.refunded {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }

        // CEI: commit the one-shot flag before moving funds.
        record.refunded = true;
        save_contribution(&env, &contributor, &record);

        let token_client = token::Client::new(&env, &config.token);
        match token_client.try_transfer(
            &env.current_contract_address(),
            &contributor,
            &record.amount,
        ) {
            Ok(Ok(())) => {}
            _ => panic_with_error!(&env, Error::WithdrawalFailed),
        }

        events::contribution_refunded(&env, &contributor, record.amount);
        record.amount
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Aggregate campaign snapshot. Read-only.
    pub fn get_status(env: Env) -> CampaignStatus {
        let config = load_config(&env);
        let state = load_state(&env);
        let now = env.ledger().timestamp();
        CampaignStatus {
            total_raised: state.total_raised,
            target: config.target,
            deadline: config.deadline,
            goal_reached: state.total_raised >= config.target,
            deadline_passed: now >= config.deadline,
            beneficiary_claimed: state.beneficiary_claimed,
        }
    }

    /// Per-contributor record. Read-only; returns the empty record for an
    /// address that has never deposited.
    pub fn get_contribution(env: Env, contributor: Address) -> Contribution {
        load_contribution(&env, &contributor)
    }
}
