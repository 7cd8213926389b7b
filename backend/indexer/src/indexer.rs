//! Long-running background task that polls the Soroban RPC and writes
//! decoded campaign events to the database.
//!
//! The poller keeps a [`ScanPosition`] (start ledger plus an optional RPC
//! pagination cursor) persisted in SQLite, so a restart resumes exactly
//! where the previous run left off and `INSERT OR IGNORE` on the events
//! table absorbs any overlap.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::events::{CampaignEvent, EventKind};
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where the next `getEvents` call should start scanning.
#[derive(Debug, Clone)]
struct ScanPosition {
    ledger: u32,
    cursor: Option<String>,
}

impl ScanPosition {
    /// Resume from the persisted cursor, falling back to the configured
    /// start ledger on a fresh database.
    async fn resume(pool: &SqlitePool, config: &Config) -> Self {
        let last_ledger = db::get_last_ledger(pool).await.unwrap_or(0);
        let cursor = db::get_cursor_string(pool).await.unwrap_or(None);

        let ledger = if last_ledger > 0 {
            last_ledger as u32
        } else {
            config.start_ledger
        };

        ScanPosition { ledger, cursor }
    }

    /// Advance past a completed poll. While the RPC hands back a pagination
    /// cursor we stay on the same start ledger; once pagination is drained
    /// we jump to the latest ledger the RPC reported.
    fn advance(&mut self, latest_ledger: Option<u64>, next_cursor: Option<String>) {
        if next_cursor.is_none() {
            if let Some(latest) = latest_ledger {
                self.ledger = (latest as u32).max(self.ledger);
            }
        }
        self.cursor = next_cursor;
    }
}

/// Spawn the indexer loop as a background [`tokio`] task.
pub async fn run(state: Arc<IndexerState>) {
    info!(
        "Following campaign contract {} via {}",
        state.config.contract_id, state.config.rpc_url
    );

    let mut position = ScanPosition::resume(&state.pool, &state.config).await;
    info!("Resuming scan from ledger {}", position.ledger);

    loop {
        if let Err(e) = poll_once(&state, &mut position).await {
            error!("Poll failed, will retry: {e}");
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// Fetch one page of events, store the new ones, and persist the advanced
/// scan position.
async fn poll_once(state: &IndexerState, position: &mut ScanPosition) -> crate::errors::Result<()> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        &state.client,
        &state.config.rpc_url,
        &state.config.contract_id,
        position.ledger,
        position.cursor.as_deref(),
        state.config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let decoded = rpc::decode_events(&raw_events, &state.config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            "Stored {inserted} new campaign events ({} fetched)",
            raw_events.len()
        );
        log_campaign_progress(&decoded);
    }

    position.advance(latest_ledger, next_cursor);
    db::save_cursor(
        &state.pool,
        position.ledger as i64,
        position.cursor.as_deref(),
    )
    .await?;

    Ok(())
}

/// Surface campaign milestones from a freshly decoded batch: the running
/// raised total, and any claim or refund resolutions.
fn log_campaign_progress(decoded: &[CampaignEvent]) {
    if let Some(total) = latest_total(decoded) {
        info!("Campaign total raised: {total}");
    }

    for event in decoded {
        if event.event_type == EventKind::FundsClaimed.as_str() {
            info!(
                "Beneficiary {} claimed {}",
                event.actor.as_deref().unwrap_or("<unknown>"),
                event.amount.as_deref().unwrap_or("?")
            );
        } else if event.event_type == EventKind::ContributionRefunded.as_str() {
            info!(
                "Refunded {} to contributor {}",
                event.amount.as_deref().unwrap_or("?"),
                event.actor.as_deref().unwrap_or("<unknown>")
            );
        }
    }
}

/// The running total from the most recent status snapshot in the batch, if
/// the batch carries any. Snapshots arrive in ledger order, so the last one
/// wins.
fn latest_total(decoded: &[CampaignEvent]) -> Option<&str> {
    decoded
        .iter()
        .rev()
        .find(|e| e.event_type == EventKind::StatusSnapshot.as_str())
        .and_then(|e| e.total_raised.as_deref())
}
