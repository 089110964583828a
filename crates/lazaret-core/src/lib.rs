//! Lazaret Core Library
//!
//! This crate provides the domain models, configuration, and error types
//! shared across all Lazaret components.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, LogLevel};
pub use models::{
    AuditRecord, ClassificationResult, DeploymentMode, Disposition, ScanAction, ScanReport,
    ScanRequest, ScanStatus, StoreRef, ThreatDetail,
};
pub use storage_types::StorageBackend;
