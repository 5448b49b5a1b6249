use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("application date {0} is in the future")]
    FutureDate(NaiveDate),

    #[error("unrecognized date: {0}")]
    InvalidDate(String),

    #[error("unrecognized status: {0}")]
    UnknownStatus(String),

    #[error("unrecognized relance channel: {0}")]
    UnknownChannel(String),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("storage: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
