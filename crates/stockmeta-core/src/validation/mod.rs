//! Validation modules

pub mod metadata;

pub use metadata::{
    dedup_keywords, parse_keyword_input, validate_description, validate_language_code,
    validate_title, MAX_DESCRIPTION_LENGTH, MAX_KEYWORDS, MAX_TITLE_LENGTH, PRIMARY_LANGUAGE,
};
