//! # Events
//!
//! Publish helpers and payload structs for the five campaign events.
//!
//! Topics follow the `(symbol, actor)` convention where an actor is
//! meaningful; data is always a single `#[contracttype]` struct so off-chain
//! consumers decode one shape per topic. Emission is fire-and-forget — the
//! transition guards in `lib.rs` never read these back, so correctness does
//! not depend on anything observing them.
//!
//! | Topic     | Payload                  | Emitted by     |
//! |-----------|--------------------------|----------------|
//! | `created` | [`CampaignCreated`]      | `initialize`   |
//! | `deposit` | [`DepositMade`]          | `deposit`      |
//! | `status`  | [`StatusSnapshot`]       | `deposit`      |
//! | `claimed` | [`FundsClaimed`]         | `claim`        |
//! | `refund`  | [`ContributionRefunded`] | `refund`       |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// A new campaign was initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub beneficiary: Address,
    pub token: Address,
    pub target: i128,
    pub deadline: u64,
}

/// A contributor deposited toward the goal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositMade {
    pub contributor: Address,
    pub amount: i128,
}

/// Campaign progress at the moment of a deposit, for observers that track
/// the campaign without polling `get_status`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusSnapshot {
    pub total_raised: i128,
    pub goal_reached: bool,
    pub deadline_passed: bool,
}

/// The beneficiary claimed the pooled balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsClaimed {
    pub beneficiary: Address,
    pub amount: i128,
}

/// A contributor reclaimed their deposit after a missed goal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRefunded {
    pub contributor: Address,
    pub amount: i128,
}

pub fn campaign_created(env: &Env, payload: CampaignCreated) {
    env.events().publish((symbol_short!("created"),), payload);
}

pub fn deposit_made(env: &Env, contributor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("deposit"), contributor.clone()),
        DepositMade {
            contributor: contributor.clone(),
            amount,
        },
    );
}

pub fn status_snapshot(env: &Env, total_raised: i128, goal_reached: bool, deadline_passed: bool) {
    env.events().publish(
        (symbol_short!("status"),),
        StatusSnapshot {
            total_raised,
            goal_reached,
            deadline_passed,
        },
    );
}

pub fn funds_claimed(env: &Env, beneficiary: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claimed"), beneficiary.clone()),
        FundsClaimed {
            beneficiary: beneficiary.clone(),
            amount,
        },
    );
}

pub fn contribution_refunded(env: &Env, contributor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("refund"), contributor.clone()),
        ContributionRefunded {
            contributor: contributor.clone(),
            amount,
        },
    );
}
