//! Configuration module
//!
//! Intake limits, the simulated processing delay and the languages seeded
//! into every metadata record. Values come from the environment (with `.env`
//! support) and fall back to the defaults below.

use std::env;
use std::time::Duration;

use crate::validation::metadata::validate_language_code;

// Common constants
const MAX_FILE_SIZE_MB: u64 = 100;
const PROCESSING_DELAY_MS: u64 = 2000;
const ACCEPTED_EXTENSIONS: &str = "jpg,jpeg,png,gif,mp4,mov";
const DEFAULT_LANGUAGES: &str = "en,es,fr";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    /// Maximum accepted file size, in megabytes
    pub max_file_size_mb: u64,
    /// Accepted extensions, lowercase, without the leading dot
    pub accepted_extensions: Vec<String>,
    /// Delay before simulated generation completes
    pub processing_delay_ms: u64,
    /// Languages seeded (empty) into the description map of every record
    pub default_languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            max_file_size_mb: MAX_FILE_SIZE_MB,
            accepted_extensions: split_list(ACCEPTED_EXTENSIONS),
            processing_delay_ms: PROCESSING_DELAY_MS,
            default_languages: split_codes(DEFAULT_LANGUAGES),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_MB must be a valid number"))?;

        let processing_delay_ms = env::var("PROCESSING_DELAY_MS")
            .unwrap_or_else(|_| PROCESSING_DELAY_MS.to_string())
            .parse::<u64>()
            .unwrap_or(PROCESSING_DELAY_MS);

        let accepted_extensions = split_list(
            &env::var("ACCEPTED_EXTENSIONS").unwrap_or_else(|_| ACCEPTED_EXTENSIONS.to_string()),
        );

        let default_languages = split_codes(
            &env::var("DEFAULT_LANGUAGES").unwrap_or_else(|_| DEFAULT_LANGUAGES.to_string()),
        );

        let config = Config {
            environment,
            max_file_size_mb,
            accepted_extensions,
            processing_delay_ms,
            default_languages,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }

        if self.accepted_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ACCEPTED_EXTENSIONS must list at least one extension"
            ));
        }

        for language in &self.default_languages {
            validate_language_code(language)
                .map_err(|e| anyhow::anyhow!("DEFAULT_LANGUAGES: {}", e))?;
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

/// Split a comma separated setting, trimming entries, lowercasing them and
/// dropping leading dots and empties.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a comma separated list of language codes. Case is kept so region
/// subtags such as `pt-BR` survive.
fn split_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
