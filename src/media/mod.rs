//! Binary attachment storage.
//!
//! Blobs are keyed by a generated id and owned by exactly one parent
//! record. The mime whitelist is enforced before anything is stored.

pub mod memory;

pub use memory::MemoryMediaStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;

pub const ALLOWED_MIME_TYPES: &[&str] = &["image/png", "image/jpg", "image/jpeg", "video/mp4"];

/// Lowercase and check a submitted mime type against the whitelist.
pub fn validate_mime(mime: &str) -> Result<String, Error> {
    let mime = mime.to_ascii_lowercase();
    if ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        Ok(mime)
    } else {
        Err(Error::UnsupportedMediaType(mime))
    }
}

#[derive(Debug, Clone)]
pub struct BlobMetadata {
    pub filename: String,
    pub mime_type: String,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn put(&self, bytes: Vec<u8>, meta: BlobMetadata) -> Result<Uuid, Error>;
    async fn get(&self, blob_id: Uuid) -> Result<Option<Vec<u8>>, Error>;
    async fn delete(&self, blob_id: Uuid) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_is_case_insensitive() {
        assert_eq!(validate_mime("IMAGE/PNG").unwrap(), "image/png");
        assert_eq!(validate_mime("video/MP4").unwrap(), "video/mp4");
    }

    #[test]
    fn rejects_types_outside_whitelist() {
        for mime in ["image/gif", "application/pdf", "text/html", ""] {
            assert!(matches!(
                validate_mime(mime),
                Err(Error::UnsupportedMediaType(_))
            ));
        }
    }
}
