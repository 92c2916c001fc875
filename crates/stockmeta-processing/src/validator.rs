use std::collections::HashSet;

use stockmeta_core::models::FileHandle;
use stockmeta_core::{AppError, Config};

/// Per-file intake rejections
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("{name} exceeds the maximum file size of {max_mb}MB")]
    FileTooLarge { name: String, max_mb: u64 },

    #[error("{name} is not an accepted file type (accepted: {accepted})")]
    InvalidExtension { name: String, accepted: String },
}

impl IntakeError {
    pub fn file_name(&self) -> &str {
        match self {
            IntakeError::FileTooLarge { name, .. } => name,
            IntakeError::InvalidExtension { name, .. } => name,
        }
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            IntakeError::InvalidExtension { .. } => AppError::UnsupportedFileType(err.to_string()),
        }
    }
}

/// Result of validating one intake batch
#[derive(Debug, Default, Clone)]
pub struct IntakeReport {
    pub accepted: Vec<FileHandle>,
    pub rejected: Vec<IntakeError>,
}

impl IntakeReport {
    /// One user-visible message per rejected file
    pub fn messages(&self) -> Vec<String> {
        self.rejected.iter().map(|e| e.to_string()).collect()
    }

    /// All rejection messages joined by newlines, or `None` when every file
    /// passed.
    pub fn error_message(&self) -> Option<String> {
        if self.rejected.is_empty() {
            None
        } else {
            Some(self.messages().join("\n"))
        }
    }
}

/// Intake file validator
///
/// Checks declared size and extension only; file contents are never read.
#[derive(Debug, Clone)]
pub struct IntakeValidator {
    max_file_size_mb: u64,
    accepted_extensions: Vec<String>,
}

impl IntakeValidator {
    pub fn new(max_file_size_mb: u64, accepted_extensions: Vec<String>) -> Self {
        Self {
            max_file_size_mb,
            accepted_extensions: accepted_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_file_size_mb, config.accepted_extensions.clone())
    }

    fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    fn accepted_list(&self) -> String {
        self.accepted_extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Validate file size
    pub fn validate_file_size(&self, name: &str, size: u64) -> Result<(), IntakeError> {
        if size > self.max_file_size_bytes() {
            return Err(IntakeError::FileTooLarge {
                name: name.to_string(),
                max_mb: self.max_file_size_mb,
            });
        }
        Ok(())
    }

    /// Validate file extension (text after the last `.`, case-insensitive)
    pub fn validate_extension(&self, name: &str) -> Result<(), IntakeError> {
        let extension = file_extension(name);

        if !self.accepted_extensions.contains(&extension) {
            return Err(IntakeError::InvalidExtension {
                name: name.to_string(),
                accepted: self.accepted_list(),
            });
        }

        Ok(())
    }

    /// Validate a single handle; size is checked before type.
    pub fn validate(&self, file: &FileHandle) -> Result<(), IntakeError> {
        self.validate_file_size(&file.name, file.byte_size)?;
        self.validate_extension(&file.name)?;
        Ok(())
    }

    /// Validate a batch. Repeated names inside the batch collapse to their
    /// first occurrence before validation; valid files proceed even when
    /// others are rejected.
    pub fn validate_batch(&self, files: Vec<FileHandle>) -> IntakeReport {
        let mut seen = HashSet::new();
        let mut report = IntakeReport::default();

        for file in files {
            if !seen.insert(file.name.clone()) {
                continue;
            }
            match self.validate(&file) {
                Ok(()) => report.accepted.push(file),
                Err(e) => {
                    tracing::debug!(file = %file.name, error = %e, "Rejected file at intake");
                    report.rejected.push(e);
                }
            }
        }

        report
    }
}

fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or_default().to_lowercase()
}

/// Map a filename extension to the content type a browser would declare.
pub fn content_type_for_filename(name: &str) -> &'static str {
    match file_extension(name).as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        // Videos
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        _ => "application/octet-stream",
    }
}
