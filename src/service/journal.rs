//! Journal entry lifecycle and the same-day trading context.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{daily_context, DailyContext};
use crate::error::Error;
use crate::media::{validate_mime, BlobMetadata, MediaStore};
use crate::models::{AttachedFile, JournalEntry, JournalInput, TradeStatus};
use crate::store::{JournalFilter, JournalStore, TradeFilter, TradeStore};

pub struct JournalService {
    journals: Arc<dyn JournalStore>,
    trades: Arc<dyn TradeStore>,
    media: Arc<dyn MediaStore>,
}

impl JournalService {
    pub fn new(
        journals: Arc<dyn JournalStore>,
        trades: Arc<dyn TradeStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            journals,
            trades,
            media,
        }
    }

    pub async fn create(&self, input: JournalInput) -> Result<JournalEntry, Error> {
        let entry = JournalEntry {
            id: Uuid::nil(),
            date: input.date,
            content: input.content,
            tags: input.tags,
            files: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let entry = self.journals.insert(entry).await?;
        info!("Journal entry created: {}", entry.id);
        Ok(entry)
    }

    pub async fn update(&self, id: Uuid, input: JournalInput) -> Result<JournalEntry, Error> {
        let mut entry = self
            .journals
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("journal entry"))?;
        entry.date = input.date;
        entry.content = input.content;
        entry.tags = input.tags;
        self.journals
            .update(id, entry)
            .await?
            .ok_or(Error::NotFound("journal entry"))
    }

    pub async fn get(&self, id: Uuid) -> Result<JournalEntry, Error> {
        self.journals
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("journal entry"))
    }

    pub async fn list(&self, filter: &JournalFilter) -> Result<Vec<JournalEntry>, Error> {
        self.journals.find(filter).await
    }

    /// Deletes the entry with best-effort attachment cleanup, mirroring the
    /// trade cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        let entry = self
            .journals
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("journal entry"))?;
        for file in &entry.files {
            if let Err(e) = self.media.delete(file.blob_id).await {
                warn!("Blob cleanup failed for entry {}: {} ({})", id, file.blob_id, e);
            }
        }
        self.journals.delete(id).await?;
        info!("Journal entry deleted: {}", id);
        Ok(())
    }

    pub async fn attach(
        &self,
        id: Uuid,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachedFile, Error> {
        let mut entry = self
            .journals
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("journal entry"))?;
        let mime = validate_mime(mime_type)?;

        let size_bytes = bytes.len() as u64;
        let blob_id = self
            .media
            .put(
                bytes,
                BlobMetadata {
                    filename: filename.to_string(),
                    mime_type: mime.clone(),
                },
            )
            .await?;

        let file = AttachedFile {
            blob_id,
            filename: filename.to_string(),
            mime_type: mime,
            size_bytes,
            uploaded_at: Utc::now(),
        };
        entry.files.push(file.clone());
        self.journals
            .update(id, entry)
            .await?
            .ok_or(Error::NotFound("journal entry"))?;
        Ok(file)
    }

    /// What happened that trading day: same day-window query as the trade
    /// list, summarized for the entry editor.
    pub async fn daily_context(&self, date: NaiveDate) -> Result<DailyContext, Error> {
        let filter = TradeFilter {
            status: Some(TradeStatus::Closed),
            ..TradeFilter::day(date)
        };
        let trades = self.trades.find(&filter).await?;
        Ok(daily_context(&trades))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MemoryMediaStore;
    use crate::service::TradeService;
    use crate::store::{MemoryJournalStore, MemoryTradeStore};
    use crate::test_helpers::{base_time, closed_input};

    fn services() -> (JournalService, TradeService, Arc<MemoryMediaStore>) {
        let trades = Arc::new(MemoryTradeStore::new());
        let media = Arc::new(MemoryMediaStore::new());
        let journal = JournalService::new(
            Arc::new(MemoryJournalStore::new()),
            trades.clone(),
            media.clone(),
        );
        let trade_service = TradeService::new(trades, media.clone());
        (journal, trade_service, media)
    }

    fn entry_input(content: &str) -> JournalInput {
        JournalInput {
            date: base_time(),
            content: content.to_string(),
            tags: vec!["review".to_string()],
        }
    }

    #[tokio::test]
    async fn create_update_round_trip() {
        let (journal, _, _) = services();
        let entry = journal.create(entry_input("took two setups")).await.unwrap();
        assert_eq!(entry.content, "took two setups");

        let mut edited = entry_input("revised notes");
        edited.tags = vec![];
        let updated = journal.update(entry.id, edited).await.unwrap();
        assert_eq!(updated.content, "revised notes");
        assert!(updated.tags.is_empty());
        assert_eq!(updated.created_at, entry.created_at);
    }

    #[tokio::test]
    async fn missing_entry_is_not_found() {
        let (journal, _, _) = services();
        assert!(matches!(
            journal.get(Uuid::new_v4()).await,
            Err(Error::NotFound("journal entry"))
        ));
    }

    #[tokio::test]
    async fn delete_cascades_to_blobs() {
        let (journal, _, media) = services();
        let entry = journal.create(entry_input("with chart")).await.unwrap();
        let file = journal
            .attach(entry.id, "chart.jpeg", "image/jpeg", vec![9; 10])
            .await
            .unwrap();

        journal.delete(entry.id).await.unwrap();
        assert!(media.get(file.blob_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn daily_context_summarizes_that_day_only() {
        let (journal, trades, _) = services();
        // Two closed trades on 2024-01-15, one on the 16th.
        trades.create(closed_input("XAUUSD", 120.0)).await.unwrap();
        trades.create(closed_input("XAUUSD", -45.0)).await.unwrap();
        let mut next_day = closed_input("XAUUSD", 500.0);
        next_day.exit_time = Some(base_time() + chrono::Duration::days(1));
        trades.create(next_day).await.unwrap();

        let ctx = journal
            .daily_context(base_time().date_naive())
            .await
            .unwrap();
        assert_eq!(ctx.wins, 1);
        assert_eq!(ctx.losses, 1);
        assert!((ctx.pnl - 75.0).abs() < 1e-9);
    }
}
