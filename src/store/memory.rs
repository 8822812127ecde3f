//! In-memory store implementations backed by a `tokio` RwLock.
//!
//! Identity and timestamps are store-managed: insert assigns a fresh id
//! and both timestamps, update preserves the original creation time and
//! bumps `updated_at`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{JournalFilter, JournalStore, TradeFilter, TradeStore};
use crate::error::Error;
use crate::models::{JournalEntry, Trade};

/// Query cap matching the journal's trade-list page size.
const FIND_LIMIT: usize = 1000;

#[derive(Default)]
pub struct MemoryTradeStore {
    inner: RwLock<HashMap<Uuid, Trade>>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn find(&self, filter: &TradeFilter) -> Result<Vec<Trade>, Error> {
        let map = self.inner.read().await;
        let mut out: Vec<Trade> = map.values().filter(|t| filter.matches(t)).cloned().collect();
        // Newest first: exit time desc, creation desc as tie-break.
        out.sort_by(|a, b| {
            b.exit_time
                .cmp(&a.exit_time)
                .then(b.created_at.cmp(&a.created_at))
        });
        out.truncate(FIND_LIMIT);
        Ok(out)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Trade>, Error> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn insert(&self, mut trade: Trade) -> Result<Trade, Error> {
        let now = Utc::now();
        trade.id = Uuid::new_v4();
        trade.created_at = now;
        trade.updated_at = now;
        self.inner.write().await.insert(trade.id, trade.clone());
        Ok(trade)
    }

    async fn update(&self, id: Uuid, mut trade: Trade) -> Result<Option<Trade>, Error> {
        let mut map = self.inner.write().await;
        let Some(existing) = map.get(&id) else {
            return Ok(None);
        };
        trade.id = id;
        trade.created_at = existing.created_at;
        trade.updated_at = Utc::now();
        map.insert(id, trade.clone());
        Ok(Some(trade))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Error> {
        Ok(self.inner.write().await.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryJournalStore {
    inner: RwLock<HashMap<Uuid, JournalEntry>>,
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalStore for MemoryJournalStore {
    async fn find(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>, Error> {
        let map = self.inner.read().await;
        let mut out: Vec<JournalEntry> =
            map.values().filter(|e| filter.matches(e)).cloned().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JournalEntry>, Error> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn insert(&self, mut entry: JournalEntry) -> Result<JournalEntry, Error> {
        let now = Utc::now();
        entry.id = Uuid::new_v4();
        entry.created_at = now;
        entry.updated_at = now;
        self.inner.write().await.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: Uuid, mut entry: JournalEntry) -> Result<Option<JournalEntry>, Error> {
        let mut map = self.inner.write().await;
        let Some(existing) = map.get(&id) else {
            return Ok(None);
        };
        entry.id = id;
        entry.created_at = existing.created_at;
        entry.updated_at = Utc::now();
        map.insert(id, entry.clone());
        Ok(Some(entry))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Error> {
        Ok(self.inner.write().await.remove(&id).is_some())
    }
}
