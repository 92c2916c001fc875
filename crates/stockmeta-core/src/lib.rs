//! Stockmeta Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! input validation shared by the processing engine and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    BatchEdit, CheckOutcome, ExportFormat, ExportOptions, ExportRecord, FileHandle, FileStatus,
    GeneratedMetadata, MediaKind, MetadataRecord, PreviewHandle, QueuedFile, Severity,
    ValidationCategory, ValidationIssue, ValidationKind, ValidationResult, ValidationStatus,
};
