//! Persistence collaborators.
//!
//! The core receives already-constructed store handles; there is no global
//! connection singleton. Filters mirror the journal's query surface: a
//! day window on exit time, direction, tag membership, and status.

pub mod memory;

pub use memory::{MemoryJournalStore, MemoryTradeStore};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Direction, JournalEntry, Trade, TradeStatus};

#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub direction: Option<Direction>,
    pub tag: Option<String>,
    pub status: Option<TradeStatus>,
}

impl TradeFilter {
    /// Window covering a single calendar day.
    pub fn day(date: NaiveDate) -> Self {
        TradeFilter {
            from: Some(date),
            to: Some(date),
            ..Default::default()
        }
    }

    pub fn matches(&self, t: &Trade) -> bool {
        if self.from.is_some() || self.to.is_some() {
            // A date window binds on exit time; trades without one never match.
            let Some(exit) = t.exit_time else { return false };
            if let Some(from) = self.from {
                if exit < day_start(from) {
                    return false;
                }
            }
            if let Some(to) = self.to {
                if exit > day_end(to) {
                    return false;
                }
            }
        }
        if let Some(direction) = self.direction {
            if t.direction != direction {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !t.tags.iter().any(|x| x == tag) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if t.status != status {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl JournalFilter {
    pub fn matches(&self, e: &JournalEntry) -> bool {
        if let Some(from) = self.from {
            if e.date < day_start(from) {
                return false;
            }
        }
        if let Some(to) = self.to {
            if e.date > day_end(to) {
                return false;
            }
        }
        true
    }
}

fn day_start(d: NaiveDate) -> DateTime<Utc> {
    d.and_time(NaiveTime::MIN).and_utc()
}

/// Inclusive through 23:59:59, so a `to` bound covers its whole day.
fn day_end(d: NaiveDate) -> DateTime<Utc> {
    day_start(d) + Duration::seconds(86_399)
}

#[async_trait]
pub trait TradeStore: Send + Sync {
    async fn find(&self, filter: &TradeFilter) -> Result<Vec<Trade>, Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Trade>, Error>;
    async fn insert(&self, trade: Trade) -> Result<Trade, Error>;
    async fn update(&self, id: Uuid, trade: Trade) -> Result<Option<Trade>, Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, Error>;
}

#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn find(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>, Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<JournalEntry>, Error>;
    async fn insert(&self, entry: JournalEntry) -> Result<JournalEntry, Error>;
    async fn update(&self, id: Uuid, entry: JournalEntry) -> Result<Option<JournalEntry>, Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, Error>;
}
