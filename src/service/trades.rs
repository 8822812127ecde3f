//! Trade lifecycle: create/update with normalization, cascading delete,
//! attachment handling, and the dashboard/calendar fetch paths.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analytics::{month_bounds, month_pnl, CalendarDay, DashboardStats};
use crate::error::Error;
use crate::media::{validate_mime, BlobMetadata, MediaStore};
use crate::models::{AttachedFile, Trade, TradeInput, TradeStatus};
use crate::normalizer::normalize;
use crate::store::{TradeFilter, TradeStore};

pub struct TradeService {
    store: Arc<dyn TradeStore>,
    media: Arc<dyn MediaStore>,
}

impl TradeService {
    pub fn new(store: Arc<dyn TradeStore>, media: Arc<dyn MediaStore>) -> Self {
        Self { store, media }
    }

    pub async fn create(&self, input: TradeInput) -> Result<Trade, Error> {
        let record = normalize(input, Utc::now())?.into_record();
        let trade = self.store.insert(record).await?;
        info!(
            "Trade created: {} {} {} [{}]",
            trade.symbol, trade.direction, trade.id, trade.status
        );
        Ok(trade)
    }

    /// Re-normalizes on every edit: changes to stop loss, prices, quantity,
    /// net P&L or status invalidate the derived fields.
    pub async fn update(&self, id: Uuid, input: TradeInput) -> Result<Trade, Error> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("trade"))?;
        let mut record = normalize(input, Utc::now())?.into_record();
        record.files = existing.files;
        let trade = self
            .store
            .update(id, record)
            .await?
            .ok_or(Error::NotFound("trade"))?;
        debug!("Trade updated: {}", trade.id);
        Ok(trade)
    }

    pub async fn get(&self, id: Uuid) -> Result<Trade, Error> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("trade"))
    }

    pub async fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, Error> {
        self.store.find(filter).await
    }

    /// Deletes the trade and its attachments. Blob deletion is best effort:
    /// an orphaned blob must not block deleting the parent record.
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        let trade = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("trade"))?;
        for file in &trade.files {
            if let Err(e) = self.media.delete(file.blob_id).await {
                warn!("Blob cleanup failed for trade {}: {} ({})", id, file.blob_id, e);
            }
        }
        self.store.delete(id).await?;
        info!("Trade deleted: {}", id);
        Ok(())
    }

    /// Write the blob, then link it into the trade. The two steps carry no
    /// compensating rollback: a failed link leaves an orphaned blob.
    pub async fn attach(
        &self,
        id: Uuid,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachedFile, Error> {
        let mut trade = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(Error::NotFound("trade"))?;
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
        trade.files.push(file.clone());
        self.store
            .update(id, trade)
            .await?
            .ok_or(Error::NotFound("trade"))?;
        Ok(file)
    }

    /// Full dashboard over the closed-trade set. Legacy records without a
    /// status field deserialize as closed, so the status filter covers them.
    pub async fn dashboard(&self) -> Result<DashboardStats, Error> {
        let filter = TradeFilter {
            status: Some(TradeStatus::Closed),
            ..Default::default()
        };
        let trades = self.store.find(&filter).await?;
        Ok(DashboardStats::from_trades(&trades))
    }

    /// Per-day P&L grid for a month.
    pub async fn calendar(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>, Error> {
        let Some((first, last)) = month_bounds(year, month) else {
            return Err(Error::validation(format!("invalid month: {year}-{month:02}")));
        };
        let filter = TradeFilter {
            from: Some(first),
            to: Some(last),
            status: Some(TradeStatus::Closed),
            ..Default::default()
        };
        let trades = self.store.find(&filter).await?;
        Ok(month_pnl(&trades, year, month))
    }
}
