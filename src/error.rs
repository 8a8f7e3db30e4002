//! Error types for the playoff fantasy football tracker

use crate::lineup::ValidationError;
use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, FflError>;

#[derive(Error, Debug)]
pub enum FflError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Week {week} is locked. No more lineup changes allowed.")]
    WeekLocked { week: u8 },

    #[error("Lineup rejected: {}", format_validation_errors(.0))]
    InvalidLineup(Vec<ValidationError>),

    #[error("{source_name} stats unavailable: {message}")]
    Upstream {
        source_name: &'static str,
        message: String,
    },

    #[error("Stat request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid lineup slot: {slot}")]
    InvalidSlot { slot: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FflError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        FflError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
