//! Canonical event types emitted by the campaign contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/crowdfund_campaign/src/events.rs`: one `created` event at
//! initialization, a `deposit` + `status` pair per deposit, one `claimed`
//! event if the goal was met, and one `refund` event per contributor if it
//! was missed.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the campaign contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The campaign was initialized (`created` topic).
    CampaignCreated,
    /// A contributor deposited toward the goal (`deposit` topic).
    DepositMade,
    /// Progress snapshot emitted alongside each deposit (`status` topic).
    StatusSnapshot,
    /// The beneficiary claimed the pooled balance (`claimed` topic).
    FundsClaimed,
    /// A contributor was refunded after a missed goal (`refund` topic).
    ContributionRefunded,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "deposit" => Self::DepositMade,
            "status" => Self::StatusSnapshot,
            "claimed" => Self::FundsClaimed,
            "refund" => Self::ContributionRefunded,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::DepositMade => "deposit_made",
            Self::StatusSnapshot => "status_snapshot",
            Self::FundsClaimed => "funds_claimed",
            Self::ContributionRefunded => "contribution_refunded",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded campaign event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    pub event_type: String,
    /// Contributor or beneficiary address, where the event names one.
    pub actor: Option<String>,
    /// Deposited / claimed / refunded amount, where the event carries one.
    pub amount: Option<String>,
    /// Running raised total, for `status_snapshot` events.
    pub total_raised: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub total_raised: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
