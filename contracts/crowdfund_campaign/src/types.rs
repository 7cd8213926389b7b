//! # Types
//!
//! Shared data structures of the campaign ledger.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A campaign is stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once by `initialize`; never mutated.
//! - [`CampaignState`] — written on every deposit and on claim.
//!
//! Deposits are the high-frequency write path, so the mutable entry is kept
//! to the two fields that actually change. Per-contributor records live in
//! their own persistent entries (see [`crate::storage`]).
//!
//! ### Lifecycle
//!
//! The campaign moves through a strict forward-only lifecycle, determined by
//! the ledger clock and the raised total rather than a stored discriminant:
//!
//! ```text
//! Active ──(deadline, total >= target)──► GoalMet ──► Claimed
//!    └────(deadline, total <  target)──► GoalMissed ──► Refunded (per contributor)
//! ```
//!
//! `Claimed` and `Refunded` are terminal; the guards in `lib.rs` reject every
//! backward transition. Which resolved branch a campaign lands on is fixed at
//! the instant the deadline passes, because no deposit is accepted afterwards.

use soroban_sdk::{contracttype, Address};

/// Immutable campaign parameters, written once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    /// Address entitled to the pooled funds if the goal is met.
    pub beneficiary: Address,
    /// Token contract representing the single funding asset.
    pub token: Address,
    /// Target amount to raise. Always positive.
    pub target: i128,
    /// Ledger timestamp at which the campaign closes.
    pub deadline: u64,
}

/// Mutable campaign accounting, updated on deposits and claim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    /// Sum of all attributed deposits. Monotonically non-decreasing.
    pub total_raised: i128,
    /// One-shot flag set when the beneficiary claims. Never reverts.
    pub beneficiary_claimed: bool,
}

/// Per-contributor record, created lazily on first deposit and kept forever.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    /// Cumulative deposited amount. Monotonically non-decreasing.
    pub amount: i128,
    /// One-shot flag set when the contributor is refunded. Never reverts.
    pub refunded: bool,
}

impl Contribution {
    /// Record for an address that has never deposited.
    pub fn empty() -> Self {
        Contribution {
            amount: 0,
            refunded: false,
        }
    }
}

/// Aggregate snapshot returned by the read-only `get_status` entry point.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignStatus {
    pub total_raised: i128,
    pub target: i128,
    pub deadline: u64,
    /// `total_raised >= target`.
    pub goal_reached: bool,
    /// `now >= deadline` at the time of the query.
    pub deadline_passed: bool,
    pub beneficiary_claimed: bool,
}
