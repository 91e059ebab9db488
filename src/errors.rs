//! Unified application error type.
//! All modules (sheets, repository, db, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Remote spreadsheet
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    SheetsApi { status: u16, message: String },

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True when the remote side reported that the addressed sheet or range
    /// does not exist. Callers reading a date sheet or the catalog turn this
    /// into an empty result.
    pub fn is_missing_range(&self) -> bool {
        match self {
            AppError::SheetsApi { status, message } => {
                *status == 404 || message.contains("Unable to parse range")
            }
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
