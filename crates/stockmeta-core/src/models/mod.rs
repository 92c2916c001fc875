pub mod export;
pub mod media;
pub mod metadata;
pub mod validation;

pub use export::{ExportFormat, ExportOptions, ExportRecord, ValidationSummary};
pub use media::{FileHandle, FileStatus, MediaKind, PreviewHandle, QueuedFile};
pub use metadata::{BatchEdit, CheckOutcome, GeneratedMetadata, MetadataRecord};
pub use validation::{
    Severity, ValidationCategory, ValidationIssue, ValidationKind, ValidationResult,
    ValidationStatus,
};
