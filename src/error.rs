//! Crate error type
//!
//! Gameplay operations never fail; only configuration input can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Settings JSON could not be parsed
    #[error("invalid settings JSON: {0}")]
    Settings(#[from] serde_json::Error),

    /// A setting parsed but holds an unusable value
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
