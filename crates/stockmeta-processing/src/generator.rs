//! Metadata generator abstraction
//!
//! The processing pipeline only talks to [`MetadataGenerator`]. The shipped
//! implementation is the filename heuristic in [`crate::classifier`]; a
//! vision-model backed generator can be dropped in behind the same trait.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

use stockmeta_core::models::{GeneratedMetadata, MediaKind};

use crate::classifier;

/// Trait that all metadata generators must implement
#[async_trait]
pub trait MetadataGenerator: Send + Sync + Debug {
    /// Get the generator name/identifier
    fn name(&self) -> &str;

    /// Produce metadata for one asset
    async fn generate(&self, filename: &str, kind: MediaKind) -> Result<GeneratedMetadata>;
}

/// Deterministic generator driven by filename keywords
#[derive(Debug, Default, Clone)]
pub struct HeuristicGenerator;

impl HeuristicGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetadataGenerator for HeuristicGenerator {
    fn name(&self) -> &str {
        "filename_heuristic"
    }

    async fn generate(&self, filename: &str, kind: MediaKind) -> Result<GeneratedMetadata> {
        let metadata = classifier::generate(filename, kind);
        tracing::debug!(
            filename = %filename,
            media_kind = %kind,
            keyword_count = metadata.keywords.len(),
            "Generated metadata from filename"
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_heuristic_generator_matches_classifier() {
        let generator = HeuristicGenerator::new();
        assert_eq!(generator.name(), "filename_heuristic");

        let generated = generator
            .generate("sunset_beach.jpg", MediaKind::Image)
            .await
            .unwrap();
        assert_eq!(
            generated,
            classifier::generate("sunset_beach.jpg", MediaKind::Image)
        );
    }
}
