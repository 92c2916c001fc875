//! Metadata validation module
//!
//! Limits applied to user input at the editing boundary:
//! - Title: at most 50 characters
//! - Description: at most 500 characters (per language)
//! - Keywords: at most 49 unique entries
//! - Language codes: `xx` or `xx-YY`
//!
//! Generated titles and descriptions are not run through these checks.

use anyhow::{Context, Result};
use regex::Regex;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum number of keywords per file
pub const MAX_KEYWORDS: usize = 49;

/// Language whose description is stored as the record's primary description
pub const PRIMARY_LANGUAGE: &str = "en";

/// Validate a user-entered title
pub fn validate_title(title: &str) -> Result<()> {
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(anyhow::anyhow!(
            "Title is {} characters long, but maximum allowed is {}",
            len,
            MAX_TITLE_LENGTH
        ));
    }
    Ok(())
}

/// Validate a user-entered description
pub fn validate_description(description: &str) -> Result<()> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(anyhow::anyhow!(
            "Description is {} characters long, but maximum allowed is {}",
            len,
            MAX_DESCRIPTION_LENGTH
        ));
    }
    Ok(())
}

/// Validate a language code
///
/// Rules:
/// - Must match pattern: `^[a-z]{2}(-[A-Z]{2})?$`
pub fn validate_language_code(code: &str) -> Result<()> {
    let pattern = Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$")
        .context("Failed to compile language code validation regex")?;

    if !pattern.is_match(code) {
        return Err(anyhow::anyhow!(
            "Language code '{}' is invalid. Expected a two-letter code such as 'en' or 'pt-BR'",
            code
        ));
    }

    Ok(())
}

/// Parse comma separated keyword input: split on `,`, trim, drop empties.
pub fn parse_keyword_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove duplicate keywords (case-sensitive, first occurrence wins) and cap
/// the list at [`MAX_KEYWORDS`].
pub fn dedup_keywords<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    keywords
        .into_iter()
        .filter(|k| seen.insert(k.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}
