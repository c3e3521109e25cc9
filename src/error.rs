//! Error types for texprogress.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Tracker error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Directory is not readable or writable: {0}")]
    PermissionDenied(PathBuf),

    #[error("Init date {start} has to come before or equal to today ({today})")]
    StartDateInFuture { start: NaiveDate, today: NaiveDate },

    #[error("Failed to run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected {tool} output: {reason}")]
    ToolOutput { tool: String, reason: String },

    #[error("Ledger has no data rows to plot")]
    EmptyLedger,

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub fn tool_output(tool: &str, reason: impl Into<String>) -> Self {
        Self::ToolOutput {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }
}
