use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BlobMetadata, MediaStore};
use crate::error::Error;

#[derive(Default)]
pub struct MemoryMediaStore {
    inner: RwLock<HashMap<Uuid, (BlobMetadata, Vec<u8>)>>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn put(&self, bytes: Vec<u8>, meta: BlobMetadata) -> Result<Uuid, Error> {
        let blob_id = Uuid::new_v4();
        self.inner.write().await.insert(blob_id, (meta, bytes));
        Ok(blob_id)
    }

    async fn get(&self, blob_id: Uuid) -> Result<Option<Vec<u8>>, Error> {
        Ok(self
            .inner
            .read()
            .await
            .get(&blob_id)
            .map(|(_, bytes)| bytes.clone()))
    }

    async fn delete(&self, blob_id: Uuid) -> Result<(), Error> {
        match self.inner.write().await.remove(&blob_id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound("blob")),
        }
    }
}
