//! Export record assembly. Writing records to XMP, CSV, JSON or XLSX is done
//! by the caller.

use stockmeta_core::models::{
    ExportOptions, ExportRecord, MetadataRecord, ValidationResult, ValidationSummary,
};

/// Condense the latest validation runs. Returns `None` when neither check has
/// been run.
pub fn summarize_validation(
    compliance: Option<&ValidationResult>,
    legal: Option<&ValidationResult>,
) -> Option<ValidationSummary> {
    if compliance.is_none() && legal.is_none() {
        return None;
    }

    let results = || compliance.into_iter().chain(legal);

    Some(ValidationSummary {
        compliance: compliance.map(|r| r.status),
        legal: legal.map(|r| r.status),
        issue_count: results().map(|r| r.issues.len()).sum(),
        highest_severity: results().filter_map(|r| r.max_severity()).max(),
    })
}

/// Build one export record per metadata record, in iteration order.
pub fn build_records<'a, I>(
    records: I,
    validation: Option<&ValidationSummary>,
    options: &ExportOptions,
) -> Vec<ExportRecord>
where
    I: IntoIterator<Item = &'a MetadataRecord>,
{
    records
        .into_iter()
        .map(|record| ExportRecord {
            filename: options
                .include_original_filename
                .then(|| record.filename.clone()),
            title: record.title.clone(),
            description: record.description.clone(),
            keywords: record.keywords.clone(),
            validation_summary: if options.include_validation {
                validation.cloned()
            } else {
                None
            },
        })
        .collect()
}
