// Error types for chart refresh and preference persistence
use crate::domain::payload::Misalignment;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("seed payload unavailable: {0}")]
    SeedParse(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("malformed payload: {0}")]
    PayloadShape(String),

    #[error("misaligned payload: {0}")]
    Misaligned(#[from] Misalignment),

    #[error("tip ledger unavailable: {0}")]
    Ledger(String),
}

impl From<reqwest::Error> for RefreshError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RefreshError::PayloadShape(err.to_string())
        } else if let Some(status) = err.status() {
            RefreshError::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            RefreshError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference store is corrupt: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("preferences could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
}
