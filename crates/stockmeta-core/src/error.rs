//! Error types module
//!
//! All fallible operations of the queue, the metadata store and the session
//! controller report an `AppError`. Trait seams (generators, validation
//! backends, configuration) use `anyhow` and are folded into `AppError` at the
//! controller boundary.

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

/// Metadata describing how an error should be presented to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (the action can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Invalid metadata value: {0}")]
    InvalidMetadataValue(String),

    #[error("Keyword limit exceeded: at most {limit} keywords are allowed")]
    KeywordLimitExceeded { limit: usize },

    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    #[error("Processing is already in progress")]
    ProcessingInProgress,

    #[error("Processing was cancelled")]
    ProcessingCancelled,

    #[error("Stale processing run: {0}")]
    StaleProcessingRun(String),

    #[error("Tab unavailable: {0}")]
    TabUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidMetadataValue(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the input and try again"),
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the file is still in the queue"),
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size or raise MAX_FILE_SIZE_MB"),
            LogLevel::Debug,
        ),
        AppError::UnsupportedFileType(_) => (
            "UNSUPPORTED_FILE_TYPE",
            false,
            Some("Use one of the accepted file extensions"),
            LogLevel::Debug,
        ),
        AppError::InvalidMetadataValue(_) => (
            "INVALID_METADATA_VALUE",
            false,
            Some("Shorten the value to fit the field limit"),
            LogLevel::Debug,
        ),
        AppError::KeywordLimitExceeded { .. } => (
            "KEYWORD_LIMIT_EXCEEDED",
            false,
            Some("Remove a keyword before adding another"),
            LogLevel::Debug,
        ),
        AppError::InvalidLanguage(_) => (
            "INVALID_LANGUAGE",
            false,
            Some("Use a two-letter language code such as 'en'"),
            LogLevel::Debug,
        ),
        AppError::ProcessingInProgress => (
            "PROCESSING_IN_PROGRESS",
            true,
            Some("Wait for the current run to finish"),
            LogLevel::Warn,
        ),
        AppError::ProcessingCancelled => (
            "PROCESSING_CANCELLED",
            true,
            Some("Start processing again"),
            LogLevel::Warn,
        ),
        AppError::StaleProcessingRun(_) => (
            "STALE_PROCESSING_RUN",
            false,
            Some("Discard the result; a newer run owns the queue"),
            LogLevel::Warn,
        ),
        AppError::TabUnavailable(_) => (
            "TAB_UNAVAILABLE",
            false,
            Some("Process files before opening this tab"),
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            true,
            Some("Retry the operation"),
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error output
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::UnsupportedFileType(_) => "UnsupportedFileType",
            AppError::InvalidMetadataValue(_) => "InvalidMetadataValue",
            AppError::KeywordLimitExceeded { .. } => "KeywordLimitExceeded",
            AppError::InvalidLanguage(_) => "InvalidLanguage",
            AppError::ProcessingInProgress => "ProcessingInProgress",
            AppError::ProcessingCancelled => "ProcessingCancelled",
            AppError::StaleProcessingRun(_) => "StaleProcessingRun",
            AppError::TabUnavailable(_) => "TabUnavailable",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::UnsupportedFileType(ref msg) => msg.clone(),
            AppError::InvalidMetadataValue(ref msg) => msg.clone(),
            AppError::KeywordLimitExceeded { limit } => {
                format!("A file can carry at most {} keywords", limit)
            }
            AppError::InvalidLanguage(ref code) => format!("Unknown language code '{}'", code),
            AppError::ProcessingInProgress => "Files are already being processed".to_string(),
            AppError::ProcessingCancelled => "Processing was cancelled".to_string(),
            AppError::StaleProcessingRun(_) => {
                "These results belong to a run that is no longer active".to_string()
            }
            AppError::TabUnavailable(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal error".to_string(),
            AppError::InternalWithSource { .. } => "Internal error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("File not in queue".to_string());
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "File not in queue");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_keyword_limit() {
        let err = AppError::KeywordLimitExceeded { limit: 49 };
        assert_eq!(err.error_code(), "KEYWORD_LIMIT_EXCEEDED");
        assert!(err.client_message().contains("49"));
        assert!(err.to_string().contains("49"));
    }

    #[test]
    fn test_error_metadata_processing_in_progress() {
        let err = AppError::ProcessingInProgress;
        assert!(err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert_eq!(
            err.suggested_action(),
            Some("Wait for the current run to finish")
        );
    }

    #[test]
    fn test_from_anyhow_keeps_source_chain() {
        let inner = anyhow::anyhow!("generator exploded").context("while generating metadata");
        let err = AppError::from(inner);
        assert_eq!(err.error_type(), "Internal");
        assert_eq!(err.client_message(), "Internal error");
        let details = err.detailed_message();
        assert!(details.contains("Caused by"));
    }

    #[test]
    fn test_error_metadata_stale_run() {
        let err = AppError::StaleProcessingRun("run 1".to_string());
        assert_eq!(err.error_code(), "STALE_PROCESSING_RUN");
        assert_eq!(err.error_type(), "StaleProcessingRun");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }
}
