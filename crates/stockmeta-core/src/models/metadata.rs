use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use validator::ValidationErrors;

use crate::validation::metadata::{dedup_keywords, parse_keyword_input, PRIMARY_LANGUAGE};

/// Outcome of a compliance or legal check attached to generated metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

impl Default for CheckOutcome {
    fn default() -> Self {
        Self {
            is_valid: true,
            warnings: Vec::new(),
        }
    }
}

/// Metadata produced by a generator for a single asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub compliance: CheckOutcome,
    pub legal: CheckOutcome,
}

/// Editable metadata record owned by the metadata store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub file_id: Uuid,
    pub filename: String,
    pub title: String,
    /// Primary (English) description
    pub description: String,
    /// Localized descriptions keyed by language code
    pub languages: BTreeMap<String, String>,
    pub keywords: Vec<String>,
    pub compliance: CheckOutcome,
    pub legal: CheckOutcome,
}

impl MetadataRecord {
    /// Wrap generated metadata, seeding an empty description for every
    /// language in `languages`.
    pub fn from_generated(
        file_id: Uuid,
        filename: impl Into<String>,
        generated: GeneratedMetadata,
        languages: &[String],
    ) -> Self {
        Self {
            file_id,
            filename: filename.into(),
            title: generated.title,
            description: generated.description,
            languages: languages
                .iter()
                .map(|code| (code.clone(), String::new()))
                .collect(),
            keywords: generated.keywords,
            compliance: generated.compliance,
            legal: generated.legal,
        }
    }

    /// Description in the given language. The primary language reads the
    /// record's main description.
    pub fn description_for(&self, language: &str) -> Option<&str> {
        if language == PRIMARY_LANGUAGE {
            Some(&self.description)
        } else {
            self.languages.get(language).map(String::as_str)
        }
    }
}

/// Shared values applied to several records at once.
///
/// Only fields whose `apply_*` flag is set are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BatchEdit {
    #[validate(length(max = 50, message = "Batch title must be at most 50 characters"))]
    pub title: String,
    #[validate(length(
        max = 500,
        message = "Batch description must be at most 500 characters"
    ))]
    pub description: String,
    #[validate(length(max = 49, message = "At most 49 batch keywords"))]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub apply_title: bool,
    #[serde(default)]
    pub apply_description: bool,
    #[serde(default)]
    pub apply_keywords: bool,
}

impl BatchEdit {
    /// Append keywords typed as comma separated input.
    pub fn add_keywords_from_input(&mut self, input: &str) {
        let merged = self
            .keywords
            .drain(..)
            .chain(parse_keyword_input(input))
            .collect::<Vec<_>>();
        self.keywords = dedup_keywords(merged);
    }

    /// Remove the batch keyword at `index`; out of range is a no-op.
    pub fn remove_keyword_at(&mut self, index: usize) {
        if index < self.keywords.len() {
            self.keywords.remove(index);
        }
    }

    /// True when no field is flagged for application
    pub fn is_empty(&self) -> bool {
        !(self.apply_title || self.apply_description || self.apply_keywords)
    }

    /// Validate only the fields that will be written. Unflagged fields may
    /// hold anything.
    pub fn validate_applied(&self) -> Result<(), ValidationErrors> {
        let applied = BatchEdit {
            title: if self.apply_title {
                self.title.clone()
            } else {
                String::new()
            },
            description: if self.apply_description {
                self.description.clone()
            } else {
                String::new()
            },
            keywords: if self.apply_keywords {
                self.keywords.clone()
            } else {
                Vec::new()
            },
            ..self.clone()
        };
        applied.validate()
    }
}
