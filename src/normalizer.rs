//! Derived-field computation for trade records.
//!
//! Runs on every create and update: edits to stop loss, entry price,
//! quantity, net P&L or status all invalidate previously derived values.
//! The computation is a pure function of the input and the supplied
//! wall-clock instant, so callers pass `Utc::now()` at write time and
//! tests pass a fixed instant.

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::models::{Trade, TradeInput, TradeStatus};

/// Values recomputed from the raw fields, never user-editable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    pub duration_secs: i64,
    pub risk_amount: f64,
    pub r_multiple: f64,
}

/// Validated fields with derived values populated, ready for persistence.
#[derive(Debug, Clone)]
pub struct NormalizedTrade {
    pub fields: TradeInput,
    pub derived: Derived,
}

impl NormalizedTrade {
    /// Materialize a record. Identity and timestamps are assigned by the
    /// store on insert; attachments are managed outside the edit form.
    pub fn into_record(self) -> Trade {
        let f = self.fields;
        let d = self.derived;
        Trade {
            id: uuid::Uuid::nil(),
            symbol: f.symbol,
            direction: f.direction,
            status: f.status,
            entry_price: f.entry_price,
            exit_price: f.exit_price,
            stop_loss: f.stop_loss,
            take_profit: f.take_profit,
            quantity: f.quantity,
            commission: f.commission,
            net_pnl: f.net_pnl,
            entry_time: f.entry_time,
            exit_time: f.exit_time,
            tags: f.tags,
            account_type: f.account_type,
            comments: f.comments,
            trade_url: f.trade_url,
            duration_secs: d.duration_secs,
            risk_amount: d.risk_amount,
            r_multiple: d.r_multiple,
            files: Vec::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Validate closed/open invariants and compute derived fields.
///
/// Closed trades must carry exit price, exit time and net P&L. Open trades
/// never do: exit fields are dropped if supplied, and risk/R stay zero
/// regardless of stop loss — risk in R is only meaningful once realized.
/// Open-trade duration is a snapshot at `now`, not a live value.
pub fn normalize(mut input: TradeInput, now: DateTime<Utc>) -> Result<NormalizedTrade, Error> {
    match input.status {
        TradeStatus::Closed => {
            if input.exit_price.is_none() {
                return Err(Error::validation("exitPrice is required when status is closed"));
            }
            if input.exit_time.is_none() {
                return Err(Error::validation("exitTime is required when status is closed"));
            }
            if input.net_pnl.is_none() {
                return Err(Error::validation("netPnl is required when status is closed"));
            }
        }
        TradeStatus::Open => {
            input.exit_price = None;
            input.exit_time = None;
            input.net_pnl = None;
        }
    }

    let end = input.exit_time.unwrap_or(now);
    let duration_secs = (end - input.entry_time).num_seconds().max(0);

    let (risk_amount, r_multiple) = match (input.stop_loss, input.status) {
        (Some(stop), TradeStatus::Closed) => {
            let risk = (input.entry_price - stop).abs() * input.quantity;
            let r = match input.net_pnl {
                Some(pnl) if risk > 0.0 => pnl / risk,
                _ => 0.0,
            };
            (risk, r)
        }
        _ => (0.0, 0.0),
    };

    Ok(NormalizedTrade {
        fields: input,
        derived: Derived {
            duration_secs,
            risk_amount,
            r_multiple,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{base_time, closed_input, open_input};
    use chrono::Duration;

    #[test]
    fn closed_requires_exit_price() {
        let mut input = closed_input("XAUUSD", 100.0);
        input.exit_price = None;
        let err = normalize(input, base_time()).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("exitPrice")));
    }

    #[test]
    fn closed_requires_exit_time() {
        let mut input = closed_input("XAUUSD", 100.0);
        input.exit_time = None;
        let err = normalize(input, base_time()).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("exitTime")));
    }

    #[test]
    fn closed_requires_net_pnl() {
        let mut input = closed_input("XAUUSD", 100.0);
        input.net_pnl = None;
        let err = normalize(input, base_time()).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("netPnl")));
    }

    #[test]
    fn open_drops_exit_fields_without_error() {
        let mut input = open_input("XAUUSD");
        input.exit_price = Some(2400.0);
        input.exit_time = Some(base_time());
        input.net_pnl = Some(55.0);
        let n = normalize(input, base_time()).unwrap();
        assert!(n.fields.exit_price.is_none());
        assert!(n.fields.exit_time.is_none());
        assert!(n.fields.net_pnl.is_none());
    }

    #[test]
    fn open_with_stop_loss_has_zero_risk_and_r() {
        let mut input = open_input("XAUUSD");
        input.stop_loss = Some(2290.0);
        let n = normalize(input, base_time()).unwrap();
        assert_eq!(n.derived.risk_amount, 0.0);
        assert_eq!(n.derived.r_multiple, 0.0);
    }

    #[test]
    fn closed_without_stop_loss_has_zero_risk_and_r() {
        let mut input = closed_input("XAUUSD", 100.0);
        input.stop_loss = None;
        let n = normalize(input, base_time()).unwrap();
        assert_eq!(n.derived.risk_amount, 0.0);
        assert_eq!(n.derived.r_multiple, 0.0);
    }

    #[test]
    fn risk_and_r_from_entry_stop_quantity() {
        // entry 2300, stop 2295, qty 2 => risk 10; pnl 25 => R 2.5
        let mut input = closed_input("XAUUSD", 25.0);
        input.entry_price = 2300.0;
        input.stop_loss = Some(2295.0);
        input.quantity = 2.0;
        let n = normalize(input, base_time()).unwrap();
        assert!((n.derived.risk_amount - 10.0).abs() < 1e-9);
        assert!((n.derived.r_multiple - 2.5).abs() < 1e-9);
    }

    #[test]
    fn stop_at_entry_keeps_r_zero() {
        let mut input = closed_input("XAUUSD", 25.0);
        input.stop_loss = Some(input.entry_price);
        let n = normalize(input, base_time()).unwrap();
        assert_eq!(n.derived.risk_amount, 0.0);
        assert_eq!(n.derived.r_multiple, 0.0);
    }

    #[test]
    fn closed_duration_is_exit_minus_entry() {
        let mut input = closed_input("XAUUSD", 10.0);
        input.entry_time = base_time();
        input.exit_time = Some(base_time() + Duration::seconds(5400));
        let n = normalize(input, base_time() + Duration::days(30)).unwrap();
        assert_eq!(n.derived.duration_secs, 5400);
    }

    #[test]
    fn duration_clamps_to_zero_when_exit_precedes_entry() {
        let mut input = closed_input("XAUUSD", 10.0);
        input.entry_time = base_time();
        input.exit_time = Some(base_time() - Duration::hours(2));
        let n = normalize(input, base_time()).unwrap();
        assert_eq!(n.derived.duration_secs, 0);
    }

    #[test]
    fn open_duration_is_snapshot_at_now() {
        let mut input = open_input("XAUUSD");
        input.entry_time = base_time();
        let n = normalize(input, base_time() + Duration::seconds(90)).unwrap();
        assert_eq!(n.derived.duration_secs, 90);
    }

    #[test]
    fn normalization_is_idempotent() {
        let input = closed_input("XAUUSD", 42.0);
        let now = base_time() + Duration::hours(3);
        let a = normalize(input.clone(), now).unwrap();
        let b = normalize(input, now).unwrap();
        assert_eq!(a.derived, b.derived);
    }
}
