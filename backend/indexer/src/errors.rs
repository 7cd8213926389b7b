//! Failure modes of the campaign indexer.
//!
//! Everything the poller and the REST layer can hit funnels into
//! [`IndexerError`]. Transient RPC trouble (timeouts, rate limits, soft
//! error codes) never surfaces here — `rpc::fetch_events` retries those
//! internally — so an `Rpc` value always means the request itself was
//! malformed and retrying is pointless.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// The RPC rejected the `getEvents` call outright (invalid request or
    /// unknown method).
    #[error("rpc rejected getEvents (code {code}): {message}")]
    Rpc { code: i64, message: String },

    /// A campaign event could not be decoded from the RPC response.
    #[error("event decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
