use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Which family of checks produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationCategory {
    Compliance,
    Legal,
}

impl Display for ValidationCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ValidationCategory::Compliance => write!(f, "compliance"),
            ValidationCategory::Legal => write!(f, "legal"),
        }
    }
}

/// Validation run requested from a backend
pub type ValidationKind = ValidationCategory;

impl FromStr for ValidationCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compliance" => Ok(ValidationCategory::Compliance),
            "legal" => Ok(ValidationCategory::Legal),
            _ => Err(anyhow::anyhow!("Invalid validation category: {}", s)),
        }
    }
}

/// Issue severity. `Low`, `Medium` and `High` are shown as info, warning and
/// error respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "info",
            Severity::Medium => "warning",
            Severity::High => "error",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// Overall status of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Success,
    Warning,
    Error,
}

impl Display for ValidationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ValidationStatus::Success => write!(f, "success"),
            ValidationStatus::Warning => write!(f, "warning"),
            ValidationStatus::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub category: ValidationCategory,
    /// What the issue concerns, e.g. `title` or `faces`
    pub kind: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub kind: ValidationKind,
    pub status: ValidationStatus,
    pub issues: Vec<ValidationIssue>,
    pub checked_at: DateTime<Utc>,
}

impl ValidationResult {
    /// Highest severity among the issues, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> ValidationIssue {
        ValidationIssue {
            category: ValidationCategory::Legal,
            kind: "faces".to_string(),
            severity,
            message: "m".to_string(),
            suggestions: vec![],
        }
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Low.label(), "info");
        assert_eq!(Severity::Medium.to_string(), "warning");
        assert_eq!(Severity::High.label(), "error");
        assert!(Severity::High > Severity::Medium);
    }

    #[test]
    fn test_result_severity_helpers() {
        let result = ValidationResult {
            kind: ValidationKind::Legal,
            status: ValidationStatus::Warning,
            issues: vec![issue(Severity::Medium), issue(Severity::High), issue(Severity::Medium)],
            checked_at: Utc::now(),
        };
        assert_eq!(result.max_severity(), Some(Severity::High));
        assert_eq!(result.count_by_severity(Severity::Medium), 2);
        assert_eq!(result.count_by_severity(Severity::Low), 0);
    }

    #[test]
    fn test_issue_without_suggestions_omits_field() {
        let json = serde_json::to_value(issue(Severity::Low)).unwrap();
        assert!(json.get("suggestions").is_none());
        assert_eq!(json["category"], "legal");
        assert_eq!(json["severity"], "low");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "compliance".parse::<ValidationCategory>().unwrap(),
            ValidationCategory::Compliance
        );
        assert!("privacy".parse::<ValidationCategory>().is_err());
    }
}
