//! Terminal error reporting for failed commands.

use serde::Serialize;

use stockmeta_core::{AppError, ErrorMetadata, LogLevel};

/// What a failed command prints to stderr
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorReport {
    /// Build a report for a command error. Application errors keep their code
    /// and hints; anything else is reported as an internal error. Details are
    /// left out in production.
    pub fn from_error(err: &anyhow::Error, is_production: bool) -> Self {
        match err.downcast_ref::<AppError>() {
            Some(app_error) => Self {
                error: app_error.client_message(),
                details: (!is_production).then(|| app_error.detailed_message()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            },
            None => Self {
                error: err.to_string(),
                details: (!is_production).then(|| format!("{:#}", err)),
                code: "COMMAND_FAILED".to_string(),
                recoverable: false,
                suggested_action: None,
            },
        }
    }

    /// Plain text rendering for stderr
    pub fn render(&self) -> String {
        let mut out = format!("error[{}]: {}", self.code, self.error);
        if let Some(details) = &self.details {
            if details != &self.error {
                out.push_str(&format!("\n  details: {}", details));
            }
        }
        if let Some(action) = &self.suggested_action {
            out.push_str(&format!("\n  hint: {}", action));
        }
        out
    }
}

/// Log a command error at the level its kind asks for.
pub fn log_error(err: &anyhow::Error) {
    let Some(app_error) = err.downcast_ref::<AppError>() else {
        tracing::error!(error = %format!("{:#}", err), "Command failed");
        return;
    };

    let error_type = app_error.error_type();
    match app_error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %app_error, error_type = error_type, "Command failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %app_error, error_type = error_type, "Command failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %app_error, error_type = error_type, "Command failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_report_keeps_app_error_metadata() {
        let err = anyhow::Error::from(AppError::KeywordLimitExceeded { limit: 49 });
        let report = ErrorReport::from_error(&err, false);

        assert_eq!(report.code, "KEYWORD_LIMIT_EXCEEDED");
        assert_eq!(report.error, "A file can carry at most 49 keywords");
        assert!(!report.recoverable);
        assert_eq!(
            report.suggested_action.as_deref(),
            Some("Remove a keyword before adding another")
        );

        let text = report.render();
        assert!(text.starts_with("error[KEYWORD_LIMIT_EXCEEDED]"));
        assert!(text.contains("hint: Remove a keyword"));
    }

    #[test]
    fn test_report_finds_app_error_behind_context() {
        let err = Err::<(), _>(AppError::ProcessingCancelled)
            .context("Processing files")
            .unwrap_err();
        let report = ErrorReport::from_error(&err, false);
        assert_eq!(report.code, "PROCESSING_CANCELLED");
        assert!(report.recoverable);
    }

    #[test]
    fn test_report_hides_details_in_production() {
        let source = anyhow::anyhow!("disk unplugged").context("reading queue");
        let err = anyhow::Error::from(AppError::from(source));

        let dev = ErrorReport::from_error(&err, false);
        assert!(dev.details.unwrap().contains("Caused by"));

        let prod = ErrorReport::from_error(&err, true);
        assert_eq!(prod.error, "Internal error");
        assert!(prod.details.is_none());
        let json = serde_json::to_value(&prod).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_report_for_plain_errors() {
        let err = anyhow::anyhow!("No acceptable files to process");
        let report = ErrorReport::from_error(&err, true);
        assert_eq!(report.code, "COMMAND_FAILED");
        assert_eq!(report.render(), "error[COMMAND_FAILED]: No acceptable files to process");
    }
}
