//! Same-day trading context shown next to a journal entry.

use serde::{Deserialize, Serialize};

use crate::models::Trade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyContext {
    pub pnl: f64,
    pub wins: usize,
    pub losses: usize,
}

/// Summarize the closed trades of a single day. Callers fetch the slice
/// via the same from/to day-window filter as the main trade list.
pub fn daily_context(trades: &[Trade]) -> DailyContext {
    let pnl = trades.iter().map(|t| t.net_pnl.unwrap_or(0.0)).sum();
    let wins = trades
        .iter()
        .filter(|t| t.net_pnl.unwrap_or(0.0) > 0.0)
        .count();
    let losses = trades
        .iter()
        .filter(|t| t.net_pnl.unwrap_or(0.0) < 0.0)
        .count();
    DailyContext { pnl, wins, losses }
}
