//! Compliance and legal validation.
//!
//! [`ValidationSimulator`] returns a fixed set of findings regardless of the
//! asset. A real rules engine plugs in through [`ValidationBackend`].

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::fmt::Debug;

use stockmeta_core::models::{
    Severity, ValidationCategory, ValidationIssue, ValidationKind, ValidationResult,
    ValidationStatus,
};

#[async_trait]
pub trait ValidationBackend: Send + Sync + Debug {
    /// Get the backend name/identifier
    fn name(&self) -> &str;

    /// Run one validation pass
    async fn run(&self, kind: ValidationKind) -> Result<ValidationResult>;
}

#[derive(Debug, Default, Clone)]
pub struct ValidationSimulator;

impl ValidationSimulator {
    pub fn new() -> Self {
        Self
    }

    pub fn run_compliance_check(&self) -> ValidationResult {
        let issues = vec![
            ValidationIssue {
                category: ValidationCategory::Compliance,
                kind: "title".to_string(),
                severity: Severity::Medium,
                message: "Title is too generic".to_string(),
                suggestions: vec![
                    "Describe the main subject".to_string(),
                    "Mention the setting or mood".to_string(),
                ],
            },
            ValidationIssue {
                category: ValidationCategory::Compliance,
                kind: "keywords".to_string(),
                severity: Severity::Low,
                message: "Using fewer than 30 keywords reduces discoverability".to_string(),
                suggestions: vec![],
            },
        ];

        Self::result(ValidationKind::Compliance, issues)
    }

    pub fn run_legal_validation(&self) -> ValidationResult {
        let issues = vec![
            ValidationIssue {
                category: ValidationCategory::Legal,
                kind: "faces".to_string(),
                severity: Severity::High,
                message: "Faces detected without a model release".to_string(),
                suggestions: vec!["Attach a signed model release".to_string()],
            },
            ValidationIssue {
                category: ValidationCategory::Legal,
                kind: "property".to_string(),
                severity: Severity::Medium,
                message: "Iconic buildings may require a property release".to_string(),
                suggestions: vec![
                    "Attach a property release or mark the asset editorial".to_string(),
                ],
            },
        ];

        Self::result(ValidationKind::Legal, issues)
    }

    fn result(kind: ValidationKind, issues: Vec<ValidationIssue>) -> ValidationResult {
        tracing::info!(
            kind = %kind,
            issue_count = issues.len(),
            "Validation run completed"
        );

        ValidationResult {
            kind,
            status: ValidationStatus::Warning,
            issues,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ValidationBackend for ValidationSimulator {
    fn name(&self) -> &str {
        "canned_simulator"
    }

    async fn run(&self, kind: ValidationKind) -> Result<ValidationResult> {
        Ok(match kind {
            ValidationKind::Compliance => self.run_compliance_check(),
            ValidationKind::Legal => self.run_legal_validation(),
        })
    }
}
