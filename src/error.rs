use thiserror::Error;

/// Failure taxonomy for the journal core.
///
/// `Validation` names the offending field and is surfaced to the caller
/// without retry. `NotFound` maps to a 404-equivalent. `Store` wraps
/// persistence failures and is propagated unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("store: {0}")]
    Store(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
