//! Per-day P&L buckets for the month calendar.
//!
//! Unlike the equity curve, this view renders a full grid: every calendar
//! day of the month appears, zero-trade days included.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Trade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub pnl: f64,
}

/// First and last day of a month, or `None` for an invalid year/month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Sum net P&L per calendar day of exit across the given month.
///
/// Trades exiting outside the month contribute nothing; callers normally
/// pre-filter to the month window, but stray records are tolerated.
pub fn month_pnl(trades: &[Trade], year: i32, month: u32) -> Vec<CalendarDay> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            let pnl = trades
                .iter()
                .filter(|t| t.exit_time.map(|e| e.date_naive()) == Some(date))
                .map(|t| t.net_pnl.unwrap_or(0.0))
                .sum();
            CalendarDay { date, pnl }
        })
        .collect()
}
