//! Environment-driven configuration.
//!
//! `CONTRACT_ID` — the campaign contract to follow — is the only required
//! variable; everything else has a default suitable for testnet use.

use std::str::FromStr;

use crate::errors::{IndexerError, Result};

const DEFAULT_RPC_URL: &str = "https://soroban-testnet.stellar.org";
const DEFAULT_DATABASE_URL: &str = "sqlite:./campaign_events.db";

/// Runtime settings shared by the poller and the REST API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint.
    pub rpc_url: String,
    /// The campaign contract address (Strkey format).
    pub contract_id: String,
    /// SQLite database URL or file path.
    pub database_url: String,
    /// Port for the REST API server.
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events.
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request.
    pub events_per_page: u32,
    /// Ledger to start from when no cursor has been persisted yet.
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Config {
            rpc_url: optional("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            contract_id: optional("CONTRACT_ID").ok_or_else(|| {
                IndexerError::Config("CONTRACT_ID environment variable is required".to_string())
            })?,
            database_url: optional("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            api_port: parsed("API_PORT", 3001)?,
            poll_interval_secs: parsed("POLL_INTERVAL_SECS", 5)?,
            events_per_page: parsed("EVENTS_PER_PAGE", 100)?,
            start_ledger: parsed("START_LEDGER", 0)?,
        };

        if config.poll_interval_secs == 0 {
            return Err(IndexerError::Config(
                "POLL_INTERVAL_SECS must be at least 1".to_string(),
            ));
        }
        if config.events_per_page == 0 {
            return Err(IndexerError::Config(
                "EVENTS_PER_PAGE must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

/// Read an environment variable, treating unset and empty the same.
fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Read and parse an environment variable, falling back to `default` when
/// the variable is unset.
fn parsed<T: FromStr>(key: &str, default: T) -> Result<T> {
    match optional(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| IndexerError::Config(format!("invalid value for {key}: {raw}"))),
    }
}
