//! Metadata store: editable per-file records produced by processing.

use std::collections::HashMap;
use uuid::Uuid;

use stockmeta_core::models::{BatchEdit, MetadataRecord};
use stockmeta_core::validation::{
    dedup_keywords, validate_description, validate_language_code, validate_title, MAX_KEYWORDS,
    PRIMARY_LANGUAGE,
};
use stockmeta_core::AppError;

/// Direction for [`MetadataStore::reorder_keyword`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMove {
    Up,
    Down,
}

#[derive(Debug, Default)]
pub struct MetadataStore {
    records: HashMap<Uuid, MetadataRecord>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: MetadataRecord) {
        self.records.insert(record.file_id, record);
    }

    pub fn get(&self, id: Uuid) -> Option<&MetadataRecord> {
        self.records.get(&id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<MetadataRecord> {
        self.records.remove(&id)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.records.contains_key(&id)
    }

    fn record_mut(&mut self, id: Uuid) -> Result<&mut MetadataRecord, AppError> {
        self.records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("No metadata for file {}", id)))
    }

    pub fn set_title(&mut self, id: Uuid, title: &str) -> Result<(), AppError> {
        validate_title(title).map_err(|e| AppError::InvalidMetadataValue(e.to_string()))?;
        self.record_mut(id)?.title = title.to_string();
        Ok(())
    }

    /// Set the description for one language. The primary language writes the
    /// record's main description; any other code writes the language map.
    pub fn set_description(&mut self, id: Uuid, language: &str, text: &str) -> Result<(), AppError> {
        validate_language_code(language)
            .map_err(|_| AppError::InvalidLanguage(language.to_string()))?;
        validate_description(text).map_err(|e| AppError::InvalidMetadataValue(e.to_string()))?;

        let record = self.record_mut(id)?;
        if language == PRIMARY_LANGUAGE {
            record.description = text.to_string();
        } else {
            record.languages.insert(language.to_string(), text.to_string());
        }
        Ok(())
    }

    pub fn description(&self, id: Uuid, language: &str) -> Result<Option<&str>, AppError> {
        let record = self
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("No metadata for file {}", id)))?;
        Ok(record.description_for(language))
    }

    /// Append a keyword. Returns `Ok(false)` when the trimmed keyword is empty
    /// or already present.
    pub fn add_keyword(&mut self, id: Uuid, keyword: &str) -> Result<bool, AppError> {
        let keyword = keyword.trim();
        let record = self.record_mut(id)?;

        if keyword.is_empty() || record.keywords.iter().any(|k| k == keyword) {
            return Ok(false);
        }
        if record.keywords.len() >= MAX_KEYWORDS {
            return Err(AppError::KeywordLimitExceeded {
                limit: MAX_KEYWORDS,
            });
        }

        record.keywords.push(keyword.to_string());
        Ok(true)
    }

    /// Remove a keyword. Returns whether it was present.
    pub fn remove_keyword(&mut self, id: Uuid, keyword: &str) -> Result<bool, AppError> {
        let record = self.record_mut(id)?;
        let before = record.keywords.len();
        record.keywords.retain(|k| k != keyword);
        Ok(record.keywords.len() != before)
    }

    /// Swap a keyword with its neighbour. Moving past either end of the list,
    /// or moving a keyword that is not present, changes nothing and returns
    /// `Ok(false)`.
    pub fn reorder_keyword(
        &mut self,
        id: Uuid,
        keyword: &str,
        direction: KeywordMove,
    ) -> Result<bool, AppError> {
        let record = self.record_mut(id)?;
        let Some(index) = record.keywords.iter().position(|k| k == keyword) else {
            return Ok(false);
        };

        let target = match direction {
            KeywordMove::Up if index > 0 => index - 1,
            KeywordMove::Down if index + 1 < record.keywords.len() => index + 1,
            _ => return Ok(false),
        };

        record.keywords.swap(index, target);
        Ok(true)
    }

    /// Apply a batch edit to every target that has a record. Targets without a
    /// record are skipped. Only flagged fields are checked against the length
    /// limits. Returns the number of records updated.
    pub fn batch_apply(&mut self, edit: &BatchEdit, targets: &[Uuid]) -> Result<usize, AppError> {
        edit.validate_applied()?;

        if edit.is_empty() {
            return Ok(0);
        }

        let keywords = dedup_keywords(edit.keywords.iter().cloned());
        let mut updated = 0;

        for id in targets {
            let Some(record) = self.records.get_mut(id) else {
                continue;
            };
            if edit.apply_title {
                record.title = edit.title.clone();
            }
            if edit.apply_description {
                record.description = edit.description.clone();
            }
            if edit.apply_keywords {
                record.keywords = keywords.clone();
            }
            updated += 1;
        }

        tracing::info!(
            targets = targets.len(),
            updated = updated,
            apply_title = edit.apply_title,
            apply_description = edit.apply_description,
            apply_keywords = edit.apply_keywords,
            "Batch edit applied"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockmeta_core::models::{CheckOutcome, GeneratedMetadata};

    fn languages() -> Vec<String> {
        vec!["en".to_string(), "es".to_string(), "fr".to_string()]
    }

    fn store_with(keywords: &[&str]) -> (MetadataStore, Uuid) {
        let id = Uuid::new_v4();
        let generated = GeneratedMetadata {
            title: "Beach - Professional Photo Asset".to_string(),
            description: "High quality image featuring beach.".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            compliance: CheckOutcome::default(),
            legal: CheckOutcome::default(),
        };
        let mut store = MetadataStore::new();
        store.insert(MetadataRecord::from_generated(id, "beach.jpg", generated, &languages()));
        (store, id)
    }

    #[test]
    fn test_set_title_enforces_limit() {
        let (mut store, id) = store_with(&[]);
        store.set_title(id, "Golden hour").unwrap();
        assert_eq!(store.get(id).unwrap().title, "Golden hour");

        let err = store.set_title(id, &"t".repeat(51)).unwrap_err();
        assert_eq!(err.error_type(), "InvalidMetadataValue");
        assert_eq!(store.get(id).unwrap().title, "Golden hour");
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (mut store, _) = store_with(&[]);
        let err = store.set_title(Uuid::new_v4(), "x").unwrap_err();
        assert_eq!(err.error_type(), "NotFound");
        assert!(store.add_keyword(Uuid::new_v4(), "x").is_err());
    }

    #[test]
    fn test_set_description_per_language() {
        let (mut store, id) = store_with(&[]);
        store.set_description(id, "en", "Primary").unwrap();
        store.set_description(id, "es", "Playa").unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.description, "Primary");
        assert_eq!(record.languages["es"], "Playa");
        assert_eq!(record.languages["en"], "");
        assert_eq!(store.description(id, "es").unwrap(), Some("Playa"));
        assert_eq!(store.description(id, "en").unwrap(), Some("Primary"));
    }

    #[test]
    fn test_set_description_rejects_bad_input() {
        let (mut store, id) = store_with(&[]);
        let err = store.set_description(id, "ENG", "x").unwrap_err();
        assert_eq!(err.error_type(), "InvalidLanguage");

        let err = store.set_description(id, "fr", &"d".repeat(501)).unwrap_err();
        assert_eq!(err.error_type(), "InvalidMetadataValue");
    }

    #[test]
    fn test_add_keyword_ignores_empty_and_duplicates() {
        let (mut store, id) = store_with(&["beach"]);
        assert!(!store.add_keyword(id, "   ").unwrap());
        assert!(!store.add_keyword(id, "beach").unwrap());
        assert!(store.add_keyword(id, " sunset ").unwrap());
        assert_eq!(store.get(id).unwrap().keywords, vec!["beach", "sunset"]);
    }

    #[test]
    fn test_add_keyword_at_limit_is_rejected() {
        let full: Vec<String> = (0..MAX_KEYWORDS).map(|i| format!("kw{}", i)).collect();
        let refs: Vec<&str> = full.iter().map(String::as_str).collect();
        let (mut store, id) = store_with(&refs);

        let err = store.add_keyword(id, "one-more").unwrap_err();
        assert!(matches!(err, AppError::KeywordLimitExceeded { limit: 49 }));
        // duplicates are still a silent no-op at the limit
        assert!(!store.add_keyword(id, "kw0").unwrap());
        assert_eq!(store.get(id).unwrap().keywords.len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_remove_keyword() {
        let (mut store, id) = store_with(&["a", "b"]);
        assert!(store.remove_keyword(id, "a").unwrap());
        assert!(!store.remove_keyword(id, "zzz").unwrap());
        assert_eq!(store.get(id).unwrap().keywords, vec!["b"]);
    }

    #[test]
    fn test_reorder_keyword_swaps_neighbours() {
        let (mut store, id) = store_with(&["a", "b", "c"]);
        assert!(store.reorder_keyword(id, "b", KeywordMove::Up).unwrap());
        assert_eq!(store.get(id).unwrap().keywords, vec!["b", "a", "c"]);
        assert!(store.reorder_keyword(id, "a", KeywordMove::Down).unwrap());
        assert_eq!(store.get(id).unwrap().keywords, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_reorder_at_boundaries_is_noop() {
        let (mut store, id) = store_with(&["a", "b", "c"]);
        assert!(!store.reorder_keyword(id, "a", KeywordMove::Up).unwrap());
        assert!(!store.reorder_keyword(id, "c", KeywordMove::Down).unwrap());
        assert!(!store.reorder_keyword(id, "missing", KeywordMove::Up).unwrap());
        assert_eq!(store.get(id).unwrap().keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_batch_apply_only_flagged_fields() {
        let (mut store, first) = store_with(&["a"]);
        let second = Uuid::new_v4();
        let generated = GeneratedMetadata {
            title: "Other".to_string(),
            description: "Other description".to_string(),
            keywords: vec!["z".to_string()],
            compliance: CheckOutcome::default(),
            legal: CheckOutcome::default(),
        };
        store.insert(MetadataRecord::from_generated(second, "other.jpg", generated, &languages()));

        let mut edit = BatchEdit {
            title: "Summer set".to_string(),
            apply_title: true,
            apply_keywords: true,
            ..BatchEdit::default()
        };
        edit.add_keywords_from_input("summer, travel, summer");

        let updated = store
            .batch_apply(&edit, &[first, second, Uuid::new_v4()])
            .unwrap();
        assert_eq!(updated, 2);

        for id in [first, second] {
            let record = store.get(id).unwrap();
            assert_eq!(record.title, "Summer set");
            assert_eq!(record.keywords, vec!["summer", "travel"]);
        }
        assert_eq!(store.get(second).unwrap().description, "Other description");
    }

    #[test]
    fn test_batch_apply_rejects_invalid_edit() {
        let (mut store, id) = store_with(&[]);
        let edit = BatchEdit {
            title: "x".repeat(60),
            apply_title: true,
            ..BatchEdit::default()
        };
        let err = store.batch_apply(&edit, &[id]).unwrap_err();
        assert_eq!(err.error_type(), "InvalidMetadataValue");
        assert_eq!(store.get(id).unwrap().title, "Beach - Professional Photo Asset");
    }

    #[test]
    fn test_batch_apply_skips_limits_of_unflagged_fields() {
        let (mut store, id) = store_with(&["a"]);
        let edit = BatchEdit {
            title: "x".repeat(60),
            keywords: vec!["travel".to_string(), "summer".to_string()],
            apply_keywords: true,
            ..BatchEdit::default()
        };

        assert_eq!(store.batch_apply(&edit, &[id]).unwrap(), 1);
        let record = store.get(id).unwrap();
        assert_eq!(record.keywords, vec!["travel", "summer"]);
        assert_eq!(record.title, "Beach - Professional Photo Asset");
    }

    #[test]
    fn test_batch_apply_without_flags_changes_nothing() {
        let (mut store, id) = store_with(&["a"]);
        let edit = BatchEdit {
            title: "Ignored".to_string(),
            ..BatchEdit::default()
        };
        assert_eq!(store.batch_apply(&edit, &[id]).unwrap(), 0);
        assert_eq!(store.get(id).unwrap().keywords, vec!["a"]);
    }
}
