//! Session controller
//!
//! Owns the intake queue, the metadata store, the latest validation results
//! and the navigation state (active tab and editor cursor). Every mutation of
//! that state goes through [`Session`].

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use stockmeta_core::models::{
    BatchEdit, ExportOptions, ExportRecord, FileHandle, FileStatus, MetadataRecord, QueuedFile,
    ValidationKind, ValidationResult,
};
use stockmeta_core::{AppError, Config};

use crate::compliance::{ValidationBackend, ValidationSimulator};
use crate::export;
use crate::pipeline::{JobFile, ProcessingJob, ProcessingOutcome, Processor};
use crate::queue::IntakeQueue;
use crate::store::MetadataStore;
use crate::validator::{IntakeError, IntakeValidator};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Upload,
    Metadata,
    Export,
}

impl Display for Tab {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Tab::Upload => write!(f, "upload"),
            Tab::Metadata => write!(f, "metadata"),
            Tab::Export => write!(f, "export"),
        }
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Tab::Upload),
            "metadata" => Ok(Tab::Metadata),
            "export" => Ok(Tab::Export),
            _ => Err(anyhow::anyhow!("Invalid tab: {}", s)),
        }
    }
}

/// Editor navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// What happened to one intake batch
#[derive(Debug, Default, Clone)]
pub struct IntakeOutcome {
    /// Ids of newly queued files
    pub added: Vec<Uuid>,
    pub rejected: Vec<IntakeError>,
}

impl IntakeOutcome {
    pub fn error_message(&self) -> Option<String> {
        if self.rejected.is_empty() {
            return None;
        }
        Some(
            self.rejected
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

/// The outstanding processing run
#[derive(Debug, Clone)]
struct InFlightRun {
    run_id: Uuid,
    file_ids: Vec<Uuid>,
}

#[derive(Debug)]
pub struct Session {
    config: Config,
    intake_validator: IntakeValidator,
    queue: IntakeQueue,
    store: MetadataStore,
    validation_backend: Arc<dyn ValidationBackend>,
    compliance: Option<ValidationResult>,
    legal: Option<ValidationResult>,
    active_tab: Tab,
    editor_index: usize,
    in_flight: Option<InFlightRun>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::with_backend(config, Arc::new(ValidationSimulator::new()))
    }

    pub fn with_backend(config: Config, validation_backend: Arc<dyn ValidationBackend>) -> Self {
        Self {
            intake_validator: IntakeValidator::from_config(&config),
            config,
            queue: IntakeQueue::new(),
            store: MetadataStore::new(),
            validation_backend,
            compliance: None,
            legal: None,
            active_tab: Tab::Upload,
            editor_index: 0,
            in_flight: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn queue(&self) -> &IntakeQueue {
        &self.queue
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Direct access for per-record edits (title, descriptions, keywords)
    pub fn store_mut(&mut self) -> &mut MetadataStore {
        &mut self.store
    }

    pub fn files(&self) -> &[QueuedFile] {
        self.queue.files()
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_results(&self) -> bool {
        !self.store.is_empty()
    }

    // Intake

    /// Validate and queue a batch. Valid files are queued even when others in
    /// the same batch are rejected.
    pub fn add_files(&mut self, files: Vec<FileHandle>) -> IntakeOutcome {
        let report = self.intake_validator.validate_batch(files);
        if !report.rejected.is_empty() {
            tracing::warn!(
                rejected = report.rejected.len(),
                "Some files were rejected at intake"
            );
        }

        IntakeOutcome {
            added: self.queue.add_files(report.accepted),
            rejected: report.rejected,
        }
    }

    /// Remove a file along with its metadata. Unknown ids are ignored.
    pub fn remove_file(&mut self, id: Uuid) {
        self.queue.remove_file(id);
        self.store.remove(id);
        if self.store.is_empty() {
            self.active_tab = Tab::Upload;
        }
    }

    pub fn set_selected(&mut self, id: Uuid, selected: bool) -> bool {
        self.queue.set_selected(id, selected)
    }

    pub fn select_all(&mut self, selected: bool) {
        self.queue.select_all(selected);
    }

    /// Drop every file, record and validation result. An outstanding run is
    /// abandoned and its results will be rejected.
    pub fn clear(&mut self) {
        self.in_flight = None;
        self.queue.clear();
        self.store.clear();
        self.compliance = None;
        self.legal = None;
        self.active_tab = Tab::Upload;
        self.editor_index = 0;
        tracing::info!("Session cleared");
    }

    // Processing

    /// Start a run over every queued file.
    ///
    /// Fails with `ProcessingInProgress` while a run is outstanding and with
    /// `InvalidInput` when the queue is empty.
    pub fn begin_processing(&mut self) -> Result<ProcessingJob, AppError> {
        if self.in_flight.is_some() {
            return Err(AppError::ProcessingInProgress);
        }
        if self.queue.is_empty() {
            return Err(AppError::InvalidInput("No files to process".to_string()));
        }

        let job = ProcessingJob::new(self.queue.files().iter().map(JobFile::from).collect());
        for file in &job.files {
            self.queue.set_status(file.file_id, FileStatus::Processing);
        }
        self.in_flight = Some(InFlightRun {
            run_id: job.run_id,
            file_ids: job.file_ids(),
        });

        Ok(job)
    }

    /// Fold the result of a run back into the session.
    ///
    /// On success the store is replaced by the new records, and the metadata
    /// tab opens. Files removed while the run was outstanding are skipped.
    /// A cancelled run returns its files to pending and leaves the store as it
    /// was. Returns the number of records written.
    ///
    /// Results of a run that is no longer outstanding (cancelled, cleared or
    /// replaced by a newer run) fail with `StaleProcessingRun` and change
    /// nothing.
    pub fn complete_processing(
        &mut self,
        run_id: Uuid,
        result: Result<ProcessingOutcome, AppError>,
    ) -> Result<usize, AppError> {
        let in_flight = match self.in_flight.take() {
            Some(run) if run.run_id == run_id => run.file_ids,
            other => {
                self.in_flight = other;
                tracing::warn!(run_id = %run_id, "Ignoring results of a stale processing run");
                return Err(AppError::StaleProcessingRun(run_id.to_string()));
            }
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                let status = match e {
                    AppError::ProcessingCancelled => FileStatus::Pending,
                    _ => FileStatus::Error,
                };
                for id in in_flight {
                    self.queue.set_status(id, status);
                }
                return Err(e);
            }
        };

        self.store.clear();
        for generated in outcome.generated {
            if !self.queue.contains(generated.file_id) {
                continue;
            }
            self.store.insert(MetadataRecord::from_generated(
                generated.file_id,
                generated.filename,
                generated.metadata,
                &self.config.default_languages,
            ));
            self.queue.set_status(generated.file_id, FileStatus::Completed);
        }
        for failed in outcome.failed {
            self.queue.set_status(failed.file_id, FileStatus::Error);
        }

        let written = self.store.len();
        self.editor_index = 0;
        if written > 0 {
            self.active_tab = Tab::Metadata;
        }

        tracing::info!(records = written, "Processing results applied");
        Ok(written)
    }

    /// Abandon the outstanding run without waiting for it.
    pub fn cancel_processing(&mut self) {
        if let Some(run) = self.in_flight.take() {
            for id in run.file_ids {
                self.queue.set_status(id, FileStatus::Pending);
            }
            tracing::info!("Processing cancelled");
        }
    }

    /// Run processing to completion on `processor`.
    pub async fn process(&mut self, processor: &Processor) -> Result<usize, AppError> {
        let job = self.begin_processing()?;
        let run_id = job.run_id;
        let result = processor.spawn(job).wait().await;
        self.complete_processing(run_id, result)
    }

    // Navigation

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Tabs other than upload need processed results.
    pub fn set_active_tab(&mut self, tab: Tab) -> Result<(), AppError> {
        if tab != Tab::Upload && !self.has_results() {
            return Err(AppError::TabUnavailable(format!(
                "The {} tab is available after processing",
                tab
            )));
        }
        self.active_tab = tab;
        Ok(())
    }

    /// Selected files that have metadata, in queue order
    pub fn editor_files(&self) -> Vec<Uuid> {
        self.queue
            .files()
            .iter()
            .filter(|f| f.selected && self.store.contains(f.id))
            .map(|f| f.id)
            .collect()
    }

    /// File under the editor cursor
    pub fn current_editor_file(&self) -> Option<Uuid> {
        let files = self.editor_files();
        let last = files.len().checked_sub(1)?;
        files.get(self.editor_index.min(last)).copied()
    }

    /// Move the editor cursor, stopping at either end.
    pub fn navigate(&mut self, direction: Direction) -> Option<Uuid> {
        let files = self.editor_files();
        let last = files.len().checked_sub(1)?;
        let index = self.editor_index.min(last);

        self.editor_index = match direction {
            Direction::Prev => index.saturating_sub(1),
            Direction::Next => (index + 1).min(last),
        };
        files.get(self.editor_index).copied()
    }

    /// Apply a batch edit to every file in the editor.
    pub fn batch_apply(&mut self, edit: &BatchEdit) -> Result<usize, AppError> {
        let targets = self.editor_files();
        self.store.batch_apply(edit, &targets)
    }

    // Validation

    pub async fn run_validation(&mut self, kind: ValidationKind) -> Result<&ValidationResult, AppError> {
        let result = self.validation_backend.run(kind).await?;
        let slot = match kind {
            ValidationKind::Compliance => &mut self.compliance,
            ValidationKind::Legal => &mut self.legal,
        };
        Ok(slot.insert(result))
    }

    pub async fn run_compliance_check(&mut self) -> Result<&ValidationResult, AppError> {
        self.run_validation(ValidationKind::Compliance).await
    }

    pub async fn run_legal_validation(&mut self) -> Result<&ValidationResult, AppError> {
        self.run_validation(ValidationKind::Legal).await
    }

    pub fn compliance_result(&self) -> Option<&ValidationResult> {
        self.compliance.as_ref()
    }

    pub fn legal_result(&self) -> Option<&ValidationResult> {
        self.legal.as_ref()
    }

    // Export

    /// Export records for every processed file, in queue order.
    pub fn export_metadata(&self, options: &ExportOptions) -> Vec<ExportRecord> {
        let summary = export::summarize_validation(self.compliance.as_ref(), self.legal.as_ref());
        let records = self
            .queue
            .files()
            .iter()
            .filter_map(|f| self.store.get(f.id));

        let exported = export::build_records(records, summary.as_ref(), options);
        tracing::info!(
            records = exported.len(),
            format = %options.format,
            "Metadata exported"
        );
        exported
    }
}
