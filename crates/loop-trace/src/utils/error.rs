//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during trace parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed VLAN token {token:?} on line {line_number}")]
    MalformedVlanToken { line_number: usize, token: String },

    #[error("Broadcast line {line_number} has no `{field}` field")]
    MissingField {
        line_number: usize,
        field: &'static str,
    },
}

impl ParseError {
    /// 1-based line of the trace that failed to parse
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedVlanToken { line_number, .. } | Self::MissingField { line_number, .. } => {
                *line_number
            }
        }
    }
}

/// Errors that can occur while obtaining the raw trace text.
///
/// Every variant means the trace source is unavailable for this run.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("Trace file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read trace file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection to {host} failed: {reason}")]
    ConnectFailed { host: String, reason: String },

    #[error("Authentication failed for user {0}")]
    AuthenticationFailed(String),

    #[error("Timed out after {seconds}s waiting for {operation}")]
    Timeout { operation: String, seconds: u64 },

    #[error("SSH session error: {0}")]
    Session(String),

    #[error("Missing connection parameter: {0}")]
    MissingParameter(&'static str),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading detection thresholds
#[derive(Error, Debug)]
pub enum ThresholdError {
    #[error("Invalid threshold configuration: {0}")]
    Invalid(String),

    #[error("Threshold TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
