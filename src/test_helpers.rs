use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{AccountType, Direction, Trade, TradeInput, TradeStatus};

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// A valid closed long: entry 2300, stop 2290, qty 1, held one hour.
pub fn closed_input(symbol: &str, net_pnl: f64) -> TradeInput {
    TradeInput {
        symbol: symbol.to_string(),
        direction: Direction::Long,
        status: TradeStatus::Closed,
        entry_price: 2300.0,
        exit_price: Some(2310.0),
        stop_loss: Some(2290.0),
        take_profit: None,
        quantity: 1.0,
        commission: 0.0,
        net_pnl: Some(net_pnl),
        entry_time: base_time(),
        exit_time: Some(base_time() + Duration::hours(1)),
        tags: Vec::new(),
        account_type: AccountType::Demo,
        comments: None,
        trade_url: None,
    }
}

/// An open long with no exit fields and no stop.
pub fn open_input(symbol: &str) -> TradeInput {
    TradeInput {
        symbol: symbol.to_string(),
        direction: Direction::Long,
        status: TradeStatus::Open,
        entry_price: 2300.0,
        exit_price: None,
        stop_loss: None,
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

/// A fully-built closed record for analytics tests, exiting at 16:00 UTC
/// on the given `yyyy-MM-dd` day.
pub fn closed_trade(symbol: &str, net_pnl: f64, r: f64, day: &str, tags: &[&str]) -> Trade {
    let exit = DateTime::parse_from_rfc3339(&format!("{day}T16:00:00Z"))
        .unwrap()
        .with_timezone(&Utc);
    closed_trade_at(symbol, net_pnl, r, exit, tags)
}

pub fn closed_trade_at(
    symbol: &str,
    net_pnl: f64,
    r: f64,
    exit: DateTime<Utc>,
    tags: &[&str],
) -> Trade {
    Trade {
        id: Uuid::new_v4(),
        symbol: symbol.to_string(),
        direction: Direction::Long,
        status: TradeStatus::Closed,
        entry_price: 100.0,
        exit_price: Some(110.0),
        stop_loss: None,
        take_profit: None,
        quantity: 1.0,
        commission: 0.0,
        net_pnl: Some(net_pnl),
        entry_time: exit - Duration::hours(1),
        exit_time: Some(exit),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        account_type: AccountType::Demo,
        comments: None,
        trade_url: None,
        duration_secs: 3600,
        risk_amount: 0.0,
        r_multiple: r,
        files: Vec::new(),
        created_at: exit,
        updated_at: exit,
    }
}
