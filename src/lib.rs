pub mod analytics;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod normalizer;
pub mod service;
pub mod store;
#[cfg(test)]
pub mod test_helpers;

pub use error::Error;
