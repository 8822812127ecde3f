//! Dashboard series and summary statistics.
//!
//! Every series is recomputed from the full closed-trade snapshot on each
//! call. There is no cached or persisted aggregate state: a fresh O(n) scan
//! per view keeps the displayed numbers consistent with the underlying
//! records. Inputs degrade gracefully — missing numerics count as 0 or are
//! excluded from denominators, never rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::round2;
use crate::models::Trade;

/// One equity-curve point: a trading day, its own net P&L, and the running
/// cumulative equity. Days with no trades do not appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    pub day: String,
    pub equity: f64,
    pub daily_pnl: f64,
}

/// One cumulative-R step. One entry per trade, not per day — the day label
/// is for axis display only, so same-day trades share a label but each
/// contributes its own step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeRPoint {
    pub day: String,
    pub cum_r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPerf {
    pub name: String,
    pub avg_r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentWinRate {
    pub instrument: String,
    pub win_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Whole percent in [0, 100]; 0 on an empty set.
    pub win_rate: u32,
    pub avg_r: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// `+inf` when there are wins and no losses, 0 when neither.
    pub profit_factor: f64,
    pub total_commission: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub cumulative_r: Vec<CumulativeRPoint>,
    pub strategy_perf: Vec<StrategyPerf>,
    pub instrument_win_rates: Vec<InstrumentWinRate>,
}

impl DashboardStats {
    /// Compute every dashboard series over a closed-trade snapshot.
    ///
    /// Callers pass closed trades only (open trades contribute nothing to
    /// any metric). Order does not matter: series that need it sort
    /// internally.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let total = trades.len();
        let pnl = |t: &Trade| t.net_pnl.unwrap_or(0.0);

        let winners: Vec<&Trade> = trades.iter().filter(|t| pnl(t) > 0.0).collect();
        let losers: Vec<&Trade> = trades.iter().filter(|t| pnl(t) < 0.0).collect();
        let wins = winners.len();
        let losses = losers.len();

        let win_rate = if total > 0 {
            (wins as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        // R=0 usually means "no stop loss set", not break-even, so zero-R
        // trades are excluded from the average rather than dragging it down.
        let r_vals: Vec<f64> = trades
            .iter()
            .map(|t| t.r_multiple)
            .filter(|r| r.is_finite() && *r != 0.0)
            .collect();
        let avg_r = if r_vals.is_empty() {
            0.0
        } else {
            r_vals.iter().sum::<f64>() / r_vals.len() as f64
        };

        let sum_wins: f64 = winners.iter().map(|t| pnl(t)).sum();
        let sum_losses_abs: f64 = losers.iter().map(|t| pnl(t)).sum::<f64>().abs();

        let avg_win = if wins > 0 { sum_wins / wins as f64 } else { 0.0 };
        let avg_loss = if losses > 0 {
            sum_losses_abs / losses as f64
        } else {
            0.0
        };

        let profit_factor = if sum_losses_abs > 0.0 {
            sum_wins / sum_losses_abs
        } else if sum_wins > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let total_commission: f64 = trades.iter().map(|t| t.commission).sum();

        DashboardStats {
            total_trades: total,
            wins,
            losses,
            win_rate,
            avg_r,
            avg_win,
            avg_loss,
            profit_factor,
            total_commission,
            equity_curve: equity_curve(trades),
            cumulative_r: cumulative_r(trades),
            strategy_perf: strategy_perf(trades),
            instrument_win_rates: instrument_win_rates(trades),
        }
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("  DASHBOARD");
        println!("{}", "=".repeat(60));
        println!("  Trades:        {}", self.total_trades);
        println!("  Win/Loss:      {} / {}", self.wins, self.losses);
        println!("  Win Rate:      {}%", self.win_rate);
        println!("  Avg R:         {:.2}", self.avg_r);
        println!("  Avg Win:       ${:.2}", self.avg_win);
        println!("  Avg Loss:      -${:.2}", self.avg_loss);
        if self.profit_factor.is_infinite() {
            println!("  Profit Factor: inf");
        } else {
            println!("  Profit Factor: {:.2}", self.profit_factor);
        }
        println!("  Commission:    ${:.2}", self.total_commission);

        if let Some(last) = self.equity_curve.last() {
            println!();
            println!("  EQUITY");
            println!("  ───────────────────────────────────");
            println!("  Days traded:   {}", self.equity_curve.len());
            println!("  Final equity:  ${:+.2}", last.equity);
        }

        if !self.strategy_perf.is_empty() {
            println!();
            println!("  BY STRATEGY");
            println!("  ───────────────────────────────────");
            for s in &self.strategy_perf {
                println!("  {:>16}: avg {:+.2}R", s.name, s.avg_r);
            }
        }

        if !self.instrument_win_rates.is_empty() {
            println!();
            println!("  BY INSTRUMENT");
            println!("  ───────────────────────────────────");
            for i in &self.instrument_win_rates {
                println!("  {:>16}: WR {}%", i.instrument, i.win_rate);
            }
        }
        println!("{}", "=".repeat(60));
    }
}

/// Group net P&L by calendar day of exit and run a cumulative sum.
/// Lexicographic day order is chronological for `yyyy-MM-dd` keys.
fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut by_day: BTreeMap<String, f64> = BTreeMap::new();
    for t in trades {
        let Some(day) = t.exit_day() else { continue };
        *by_day.entry(day).or_insert(0.0) += t.net_pnl.unwrap_or(0.0);
    }

    let mut equity = 0.0;
    by_day
        .into_iter()
        .map(|(day, pnl)| {
            equity += pnl;
            EquityPoint {
                day,
                equity: round2(equity),
                daily_pnl: round2(pnl),
            }
        })
        .collect()
}

fn cumulative_r(trades: &[Trade]) -> Vec<CumulativeRPoint> {
    let mut steps: Vec<&Trade> = trades.iter().filter(|t| t.exit_time.is_some()).collect();
    steps.sort_by_key(|t| t.exit_time);

    let mut cum_r = 0.0;
    steps
        .into_iter()
        .map(|t| {
            cum_r += t.r_multiple;
            CumulativeRPoint {
                day: t.exit_day().unwrap_or_default(),
                cum_r,
            }
        })
        .collect()
}

/// Each trade contributes its R to every tag it carries; untagged trades
/// fall into a synthetic "Untagged" bucket.
fn strategy_perf(trades: &[Trade]) -> Vec<StrategyPerf> {
    let mut buckets: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for t in trades {
        let tags: Vec<&str> = if t.tags.is_empty() {
            vec!["Untagged"]
        } else {
            t.tags.iter().map(String::as_str).collect()
        };
        for tag in tags {
            let entry = buckets.entry(tag).or_insert((0.0, 0));
            entry.0 += t.r_multiple;
            entry.1 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(name, (sum_r, count))| StrategyPerf {
            name: name.to_string(),
            avg_r: round2(sum_r / count as f64),
        })
        .collect()
}

fn instrument_win_rates(trades: &[Trade]) -> Vec<InstrumentWinRate> {
    let mut buckets: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for t in trades {
        let key = if t.symbol.is_empty() {
            "Unknown"
        } else {
            t.symbol.as_str()
        };
        let entry = buckets.entry(key).or_insert((0, 0));
        entry.1 += 1;
        if t.net_pnl.unwrap_or(0.0) > 0.0 {
            entry.0 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(instrument, (wins, total))| InstrumentWinRate {
            instrument: instrument.to_string(),
            win_rate: (wins as f64 / total as f64 * 100.0).round() as u32,
        })
        .collect()
}
