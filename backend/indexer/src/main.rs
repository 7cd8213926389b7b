//! Campaign event indexer — entry point.
//!
//! Runs two halves off one SQLite database: a background task that polls
//! Soroban `getEvents` for the crowdfund campaign contract and persists
//! decoded events, and an Axum REST API that serves them back out.

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use indexer::IndexerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

    let api_port = config.api_port;
    tokio::spawn(indexer::run(Arc::new(IndexerState {
        pool: pool.clone(),
        config,
        client,
    })));

    let app = api::router(pool);
    let addr = format!("0.0.0.0:{api_port}");
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
