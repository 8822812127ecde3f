use chrono::{DateTime, Duration, Utc};

use trade_journal::models::{AccountType, Direction, TradeInput, TradeStatus};

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Closed trade exiting `day_offset` days after base, with an explicit
/// stop so the normalizer produces a non-zero R.
pub fn closed_input(
    symbol: &str,
    net_pnl: f64,
    day_offset: i64,
    tags: &[&str],
) -> TradeInput {
    let entry = base_time() + Duration::days(day_offset);
    TradeInput {
        symbol: symbol.to_string(),
        direction: Direction::Long,
        status: TradeStatus::Closed,
        entry_price: 2300.0,
        exit_price: Some(2310.0),
        stop_loss: Some(2290.0), // risk 10 per unit
        take_profit: None,
        quantity: 1.0,
        commission: 1.0,
        net_pnl: Some(net_pnl),
        entry_time: entry,
        exit_time: Some(entry + Duration::hours(2)),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        account_type: AccountType::Demo,
        comments: None,
        trade_url: None,
    }
}

pub fn open_input(symbol: &str) -> TradeInput {
    TradeInput {
        symbol: symbol.to_string(),
        direction: Direction::Long,
        status: TradeStatus::Open,
        entry_price: 2300.0,
        exit_price: None,
        stop_loss: Some(2290.0),
        take_profit: None,
        quantity: 1.0,
        commission: 0.0,
        net_pnl: None,
        entry_time: base_time(),
        exit_time: None,
        tags: Vec::new(),
        account_type: AccountType::Demo,
        comments: None,
        trade_url: None,
    }
}
