//! Stockmeta processing engine
//!
//! Intake, rule-based metadata generation, editing and simulated validation
//! for stock photo and video assets. [`Session`] ties the pieces together.

pub mod classifier;
pub mod compliance;
pub mod export;
pub mod generator;
pub mod pipeline;
pub mod queue;
pub mod session;
pub mod store;
pub mod validator;

pub use classifier::generate;
pub use compliance::{ValidationBackend, ValidationSimulator};
pub use generator::{HeuristicGenerator, MetadataGenerator};
pub use pipeline::{
    FailedFile, GeneratedFile, JobFile, ProcessingHandle, ProcessingJob, ProcessingOutcome,
    Processor,
};
pub use queue::IntakeQueue;
pub use session::{Direction, IntakeOutcome, Session, Tab};
pub use store::{KeywordMove, MetadataStore};
pub use validator::{content_type_for_filename, IntakeError, IntakeReport, IntakeValidator};
