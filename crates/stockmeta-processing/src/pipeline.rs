//! Processing pipeline
//!
//! A run waits for the configured delay, then asks the generator for metadata
//! on every file in the job. The run executes on its own tokio task and can be
//! cancelled through the handle until it finishes.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use stockmeta_core::models::{GeneratedMetadata, MediaKind, QueuedFile};
use stockmeta_core::{AppError, Config};

use crate::generator::{HeuristicGenerator, MetadataGenerator};

/// Snapshot of one queued file taken when the run starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFile {
    pub file_id: Uuid,
    pub filename: String,
    pub media_kind: MediaKind,
}

impl From<&QueuedFile> for JobFile {
    fn from(file: &QueuedFile) -> Self {
        Self {
            file_id: file.id,
            filename: file.display_name.clone(),
            media_kind: file.media_kind,
        }
    }
}

/// One processing run. `run_id` ties a completion back to the run that
/// produced it.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    pub run_id: Uuid,
    pub files: Vec<JobFile>,
}

impl Default for ProcessingJob {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProcessingJob {
    pub fn new(files: Vec<JobFile>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            files,
        }
    }

    pub fn file_ids(&self) -> Vec<Uuid> {
        self.files.iter().map(|f| f.file_id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub file_id: Uuid,
    pub filename: String,
    pub metadata: GeneratedMetadata,
}

#[derive(Debug, Clone)]
pub struct FailedFile {
    pub file_id: Uuid,
    pub filename: String,
    pub error: String,
}

/// Result of a completed run
#[derive(Debug, Clone, Default)]
pub struct ProcessingOutcome {
    pub generated: Vec<GeneratedFile>,
    pub failed: Vec<FailedFile>,
}

/// Runs processing jobs against a metadata generator
#[derive(Debug, Clone)]
pub struct Processor {
    generator: Arc<dyn MetadataGenerator>,
    delay: Duration,
}

impl Processor {
    pub fn new(generator: Arc<dyn MetadataGenerator>, delay: Duration) -> Self {
        Self { generator, delay }
    }

    /// Filename heuristic generator with the configured delay
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HeuristicGenerator::new()), config.processing_delay())
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Start a run on a new task.
    pub fn spawn(&self, job: ProcessingJob) -> ProcessingHandle {
        let run_id = job.run_id;
        let cancel_token = CancellationToken::new();
        let processor = self.clone();
        let token = cancel_token.clone();

        let join = tokio::spawn(async move { processor.run(job, token).await });

        ProcessingHandle {
            run_id,
            cancel_token,
            join,
        }
    }

    /// Execute a run on the current task.
    ///
    /// Cancellation is honoured during the delay and between files. A file
    /// whose generation fails is reported in the outcome without stopping the
    /// run.
    pub async fn run(
        &self,
        job: ProcessingJob,
        cancel_token: CancellationToken,
    ) -> Result<ProcessingOutcome, AppError> {
        tracing::info!(
            run_id = %job.run_id,
            file_count = job.files.len(),
            generator = %self.generator.name(),
            delay_ms = self.delay.as_millis() as u64,
            "Processing started"
        );

        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::info!("Processing cancelled before generation");
                return Err(AppError::ProcessingCancelled);
            }
            _ = tokio::time::sleep(self.delay) => {}
        }

        let mut outcome = ProcessingOutcome::default();

        for file in job.files {
            if cancel_token.is_cancelled() {
                tracing::info!("Processing cancelled during generation");
                return Err(AppError::ProcessingCancelled);
            }

            match self.generator.generate(&file.filename, file.media_kind).await {
                Ok(metadata) => outcome.generated.push(GeneratedFile {
                    file_id: file.file_id,
                    filename: file.filename,
                    metadata,
                }),
                Err(e) => {
                    tracing::warn!(
                        file_id = %file.file_id,
                        file = %file.filename,
                        error = %e,
                        "Metadata generation failed"
                    );
                    outcome.failed.push(FailedFile {
                        file_id: file.file_id,
                        filename: file.filename,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            generated = outcome.generated.len(),
            failed = outcome.failed.len(),
            "Processing finished"
        );

        Ok(outcome)
    }
}

/// Handle to a spawned run
#[derive(Debug)]
pub struct ProcessingHandle {
    run_id: Uuid,
    cancel_token: CancellationToken,
    join: JoinHandle<Result<ProcessingOutcome, AppError>>,
}

impl ProcessingHandle {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the run to finish
    pub async fn wait(self) -> Result<ProcessingOutcome, AppError> {
        self.join.await.map_err(|e| AppError::InternalWithSource {
            message: "Processing task failed".to_string(),
            source: anyhow::Error::new(e),
        })?
    }
}
