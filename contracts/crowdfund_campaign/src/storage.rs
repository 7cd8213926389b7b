//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the campaign ledger:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key        | Type             | Description                        |
//! |------------|------------------|------------------------------------|
//! | `Config`   | `CampaignConfig` | Immutable campaign parameters      |
//! | `State`    | `CampaignState`  | Mutable campaign accounting        |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                   | Type           | Description                   |
//! |-----------------------|----------------|-------------------------------|
//! | `Contribution(addr)`  | `Contribution` | Per-contributor record        |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining. Contribution entries are never deleted; a resolved campaign
//! stays queryable for as long as its TTLs are kept alive.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::types::{CampaignConfig, CampaignState, Contribution};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// `Config` and `State` are instance-tier singletons extended together.
/// `Contribution` entries are persistent-tier with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable campaign parameters (Instance).
    Config,
    /// Mutable campaign accounting (Instance).
    State,
    /// Per-contributor record keyed by address (Persistent).
    Contribution(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Returns `true` once `initialize` has written the campaign config.
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Write both singleton entries. Called exactly once, by `initialize`.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

/// Load the immutable campaign parameters.
/// Aborts with `NotInitialized` before `initialize` has run.
pub fn load_config(env: &Env) -> CampaignConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

/// Load the mutable campaign accounting.
/// Aborts with `NotInitialized` before `initialize` has run.
pub fn load_state(env: &Env) -> CampaignState {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

/// Save only the mutable accounting entry (the deposit/claim write path).
pub fn save_state(env: &Env, state: &CampaignState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Load a contributor's record, defaulting to the empty record for an
/// address that has never deposited.
pub fn load_contribution(env: &Env, contributor: &Address) -> Contribution {
    let key = DataKey::Contribution(contributor.clone());
    match env.storage().persistent().get(&key) {
        Some(record) => {
            bump_persistent(env, &key);
            record
        }
        None => Contribution::empty(),
    }
}

/// Save a contributor's record.
pub fn save_contribution(env: &Env, contributor: &Address, record: &Contribution) {
    let key = DataKey::Contribution(contributor.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}
