//! Error types module
//!
//! This module provides the core error types used throughout the scanner.
//! Disposition-action and audit-write failures never reach this type; they
//! are absorbed where they occur. `AppError` covers the failures that escape
//! the scan sequence and surface to the caller.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// HTTP status code to return
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Storage(_)
            | AppError::Config(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => 500,
        }
    }

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    /// Error variant name for structured logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "InternalWithSource",
        }
    }

    /// Message surfaced to the caller in the error response body.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) => LogLevel::Debug,
            _ => LogLevel::Error,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}
