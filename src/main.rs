use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::config::Config;
use trade_journal::media::{MediaStore, MemoryMediaStore};
use trade_journal::models::TradeInput;
use trade_journal::service::TradeService;
use trade_journal::store::{MemoryTradeStore, TradeStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| cfg.data_file.clone());
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading trade export {path}"))?;
    let inputs: Vec<TradeInput> =
        serde_json::from_str(&raw).context("parsing trade export")?;

    let store: Arc<dyn TradeStore> = Arc::new(MemoryTradeStore::new());
    let media: Arc<dyn MediaStore> = Arc::new(MemoryMediaStore::new());
    let service = TradeService::new(store, media);

    let mut imported = 0usize;
    for input in inputs {
        match service.create(input).await {
            Ok(_) => imported += 1,
            Err(e) => warn!("Skipping trade: {}", e),
        }
    }
    info!("Imported {} trades from {}", imported, path);

    let stats = service.dashboard().await?;
    stats.print_summary();

    let today = Utc::now().date_naive();
    let days = service.calendar(today.year(), today.month()).await?;
    let traded: Vec<_> = days.iter().filter(|d| d.pnl != 0.0).collect();
    if !traded.is_empty() {
        println!("\n  THIS MONTH");
        println!("  ───────────────────────────────────");
        for day in traded {
            println!("  {}: ${:+.2}", day.date, day.pnl);
        }
    }

    Ok(())
}
