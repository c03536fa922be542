mod config;
mod render;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use render::TextSink;
use stockwatch_core::records::load_records;
use stockwatch_core::{CancelFlag, MonitorLoop, PortfolioBook};
use stockwatch_market_data::YahooProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env();

    let provider = Arc::new(YahooProvider::with_timeout(config.provider_timeout)?);
    let records = load_records(&config.records_path)?;
    let book = Arc::new(PortfolioBook::from_records(&records, provider)?);
    if book.is_empty() {
        anyhow::bail!("No purchase records found in {}", config.records_path);
    }

    // One-shot report before the live view starts; a failure here is fatal.
    let invested = book.invested_amount().await?;
    info!("Invested amount: {}", invested.round_dp(2));

    let cancel = CancelFlag::new();
    let monitor = MonitorLoop::new(
        book,
        Arc::new(TextSink::new()),
        config.tick_interval,
        config.frame_limit,
        cancel.clone(),
    );

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping after the current tick");
            cancel.cancel();
        }
    });

    if let Err(e) = monitor.run().await {
        error!("Monitor loop terminated: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
