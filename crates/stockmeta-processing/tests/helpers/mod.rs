//! Test helpers: sessions with an instant processor and sample file handles.
//!
//! Run from workspace root: `cargo test -p stockmeta-processing --test session_flow_test`.

use std::sync::Arc;
use std::time::Duration;

use stockmeta_core::models::FileHandle;
use stockmeta_core::Config;
use stockmeta_processing::{HeuristicGenerator, Processor, Session};

/// Session with default limits and languages
pub fn setup_session() -> Session {
    Session::new(Config::default())
}

/// Processor that skips the simulated delay
pub fn instant_processor() -> Processor {
    Processor::new(Arc::new(HeuristicGenerator::new()), Duration::ZERO)
}

/// Processor whose delay outlasts any test
pub fn slow_processor() -> Processor {
    Processor::new(Arc::new(HeuristicGenerator::new()), Duration::from_secs(600))
}

pub fn image(name: &str) -> FileHandle {
    FileHandle::new(name, 3 * 1024 * 1024, "image/jpeg")
}

pub fn video(name: &str) -> FileHandle {
    FileHandle::new(name, 40 * 1024 * 1024, "video/mp4")
}
