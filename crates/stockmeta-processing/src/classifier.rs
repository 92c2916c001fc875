//! Rule-based metadata generator
//!
//! Derives a title, a description and an ordered keyword list from nothing
//! but a filename and a media kind. The output is fully deterministic.
//!
//! Keyword assembly order:
//! 1. generic quality/style words
//! 2. media-kind words (photo or video)
//! 3. visual/colour words
//! 4. one subject pool, picked by the first rule whose trigger appears in the
//!    lowercased base name
//! 5. filename tokens of at least three characters
//!
//! The concatenation is deduplicated (case-sensitive, first occurrence wins)
//! and truncated to [`MAX_KEYWORDS`].

use serde::{Deserialize, Serialize};
use stockmeta_core::models::{CheckOutcome, GeneratedMetadata, MediaKind};
use stockmeta_core::validation::{dedup_keywords, MAX_KEYWORDS};

const GENERIC_KEYWORDS: [&str; 20] = [
    "photography",
    "stock",
    "image",
    "professional",
    "quality",
    "commercial",
    "creative",
    "digital",
    "modern",
    "clean",
    "beautiful",
    "detailed",
    "vibrant",
    "sharp",
    "clear",
    "artistic",
    "contemporary",
    "premium",
    "elegant",
    "stylish",
];

const PHOTO_KEYWORDS: [&str; 10] = [
    "photo",
    "picture",
    "snapshot",
    "photograph",
    "wallpaper",
    "backdrop",
    "visual",
    "still",
    "capture",
    "shot",
];

const VIDEO_KEYWORDS: [&str; 10] = [
    "video",
    "footage",
    "clip",
    "film",
    "motion",
    "sequence",
    "recording",
    "movie",
    "reel",
    "animation",
];

const VISUAL_KEYWORDS: [&str; 10] = [
    "colorful",
    "bright",
    "dark",
    "light",
    "shadow",
    "contrast",
    "saturated",
    "muted",
    "focus",
    "blur",
];

const NATURE_KEYWORDS: &[&str] = &[
    "nature",
    "landscape",
    "outdoor",
    "scenic",
    "mountain",
    "forest",
    "tree",
    "sky",
    "cloud",
    "water",
    "river",
    "lake",
    "ocean",
    "beach",
    "sunset",
    "sunrise",
    "horizon",
    "environment",
    "wilderness",
];

const PORTRAIT_KEYWORDS: &[&str] = &[
    "portrait",
    "people",
    "person",
    "face",
    "smile",
    "expression",
    "emotion",
    "human",
    "model",
    "lifestyle",
    "fashion",
    "beauty",
    "adult",
    "young",
    "professional",
    "casual",
    "formal",
];

const URBAN_KEYWORDS: &[&str] = &[
    "urban",
    "city",
    "architecture",
    "building",
    "skyline",
    "street",
    "downtown",
    "metropolitan",
    "skyscraper",
    "structure",
    "construction",
    "landmark",
    "modern",
    "office",
    "residential",
    "commercial",
];

const SPORTS_KEYWORDS: &[&str] = &[
    "sport",
    "athletic",
    "team",
    "game",
    "competition",
    "player",
    "jersey",
    "uniform",
    "equipment",
    "fitness",
    "active",
    "match",
    "tournament",
    "championship",
    "league",
    "professional",
];

const GENERIC_SUBJECT_KEYWORDS: &[&str] = &[
    "object",
    "item",
    "product",
    "design",
    "concept",
    "abstract",
    "detail",
    "closeup",
    "texture",
    "pattern",
    "background",
    "composition",
    "arrangement",
    "collection",
    "set",
];

/// Minimum length (in characters) of a filename token kept as a keyword
const MIN_FILENAME_TOKEN_LENGTH: usize = 3;

/// Subject-matter category inferred from the filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectPool {
    Nature,
    Portrait,
    Urban,
    Sports,
    Generic,
}

/// Trigger substrings, checked in priority order. The first rule with a
/// matching trigger wins.
const SUBJECT_RULES: &[(SubjectPool, &[&str])] = &[
    (SubjectPool::Nature, &["nature", "landscape"]),
    (SubjectPool::Portrait, &["person", "people", "portrait"]),
    (SubjectPool::Urban, &["city", "urban"]),
    (SubjectPool::Sports, &["sport", "jersey", "team"]),
];

impl SubjectPool {
    /// Pick the pool for a base name. Matching is done on the lowercased name.
    pub fn select(base_name: &str) -> Self {
        let lowered = base_name.to_lowercase();
        SUBJECT_RULES
            .iter()
            .find(|(_, triggers)| triggers.iter().any(|t| lowered.contains(t)))
            .map(|(pool, _)| *pool)
            .unwrap_or(SubjectPool::Generic)
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            SubjectPool::Nature => NATURE_KEYWORDS,
            SubjectPool::Portrait => PORTRAIT_KEYWORDS,
            SubjectPool::Urban => URBAN_KEYWORDS,
            SubjectPool::Sports => SPORTS_KEYWORDS,
            SubjectPool::Generic => GENERIC_SUBJECT_KEYWORDS,
        }
    }
}

fn media_keywords(kind: MediaKind) -> &'static [&'static str] {
    match kind {
        MediaKind::Image => &PHOTO_KEYWORDS,
        MediaKind::Video => &VIDEO_KEYWORDS,
    }
}

/// Human readable base name: everything before the first `.`, with `_` and
/// `-` turned into spaces.
pub fn base_name(filename: &str) -> String {
    filename
        .split('.')
        .next()
        .unwrap_or_default()
        .replace(['_', '-'], " ")
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Space separated tokens of the base name at least three UTF-16 code units
/// long, lowercased. Characters outside the basic plane count twice.
pub fn filename_keywords(base_name: &str) -> Vec<String> {
    base_name
        .split(' ')
        .filter(|word| word.encode_utf16().count() >= MIN_FILENAME_TOKEN_LENGTH)
        .map(str::to_lowercase)
        .collect()
}

/// Assemble, deduplicate and truncate the keyword list.
pub fn build_keywords(base_name: &str, kind: MediaKind) -> Vec<String> {
    let pooled = GENERIC_KEYWORDS
        .iter()
        .chain(media_keywords(kind))
        .chain(VISUAL_KEYWORDS.iter())
        .chain(SubjectPool::select(base_name).keywords())
        .map(|k| k.to_string());

    let keywords = dedup_keywords(pooled.chain(filename_keywords(base_name)));
    debug_assert!(keywords.len() <= MAX_KEYWORDS);
    keywords
}

/// Generate metadata for a file name and media kind.
///
/// Titles and descriptions are not clamped to the editor's length limits.
pub fn generate(filename: &str, kind: MediaKind) -> GeneratedMetadata {
    let base = base_name(filename);
    let display = capitalize_first(&base);

    GeneratedMetadata {
        title: format!("{} - Professional {} Asset", display, kind.title_noun()),
        description: format!(
            "High quality {} featuring {}. Perfect for commercial use, marketing materials, and creative projects.",
            kind.description_noun(),
            base
        ),
        keywords: build_keywords(&base, kind),
        compliance: CheckOutcome::default(),
        legal: CheckOutcome::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_and_bounded(keywords: &[String]) {
        assert!(keywords.len() <= MAX_KEYWORDS);
        let unique: HashSet<&String> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len(), "duplicate keyword in {:?}", keywords);
    }

    #[test]
    fn test_title_for_sunset_beach() {
        let meta = generate("sunset_beach.jpg", MediaKind::Image);
        assert_eq!(meta.title, "Sunset beach - Professional Photo Asset");
    }

    #[test]
    fn test_description_uses_uncapitalized_base_name() {
        let meta = generate("city-lights.mp4", MediaKind::Video);
        assert_eq!(meta.title, "City lights - Professional Video Asset");
        assert_eq!(
            meta.description,
            "High quality video featuring city lights. Perfect for commercial use, marketing materials, and creative projects."
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        for name in ["mountain-nature.jpg", "team_photo.png", "", "x.y.z"] {
            assert_eq!(
                generate(name, MediaKind::Image),
                generate(name, MediaKind::Image)
            );
        }
    }

    #[test]
    fn test_keywords_unique_and_bounded() {
        for name in [
            "mountain-nature.jpg",
            "happy_people.png",
            "urban-city.jpg",
            "sport_jersey_team.mov",
            "red_balloon.gif",
            "",
        ] {
            for kind in [MediaKind::Image, MediaKind::Video] {
                assert_unique_and_bounded(&generate(name, kind).keywords);
            }
        }
    }

    #[test]
    fn test_keyword_order_starts_with_fixed_pools() {
        let keywords = generate("anything.jpg", MediaKind::Image).keywords;
        assert_eq!(keywords[0], "photography");
        assert_eq!(keywords[19], "stylish");
        assert_eq!(keywords[20], "photo");
        assert_eq!(keywords[30], "colorful");
        assert_eq!(keywords[39], "blur");
    }

    #[test]
    fn test_video_uses_video_pool() {
        let keywords = generate("anything.mp4", MediaKind::Video).keywords;
        assert_eq!(keywords[20], "video");
        assert!(keywords.contains(&"footage".to_string()));
        assert!(!keywords.contains(&"snapshot".to_string()));
    }

    #[test]
    fn test_nature_pool_selected() {
        let keywords = generate("mountain-nature.jpg", MediaKind::Image).keywords;
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert!(keywords.contains(&"mountain".to_string()));
        assert!(keywords.contains(&"forest".to_string()));
        assert_eq!(
            &keywords[40..],
            &["nature", "landscape", "outdoor", "scenic", "mountain", "forest", "tree", "sky", "cloud"]
        );
    }

    #[test]
    fn test_urban_pool_selected() {
        let keywords = generate("urban-city.jpg", MediaKind::Image).keywords;
        assert!(keywords.contains(&"skyline".to_string()));
        assert!(!keywords.contains(&"forest".to_string()));
        assert_eq!(keywords[40], "urban");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        assert_eq!(SubjectPool::select("city nature"), SubjectPool::Nature);
        assert_eq!(SubjectPool::select("portrait in the city"), SubjectPool::Portrait);
        assert_eq!(SubjectPool::select("urban team"), SubjectPool::Urban);
        assert_eq!(SubjectPool::select("Jersey"), SubjectPool::Sports);
        assert_eq!(SubjectPool::select("red balloon"), SubjectPool::Generic);
        assert_eq!(SubjectPool::select("LANDSCAPE"), SubjectPool::Nature);
    }

    #[test]
    fn test_duplicates_across_pools_removed() {
        // "modern" and "commercial" appear in both the generic and urban pools
        let keywords = generate("city.jpg", MediaKind::Image).keywords;
        assert_eq!(keywords.iter().filter(|k| *k == "modern").count(), 1);
        assert_eq!(keywords.iter().filter(|k| *k == "commercial").count(), 1);
        assert_eq!(keywords.iter().position(|k| k == "modern"), Some(8));
    }

    #[test]
    fn test_empty_name_falls_back_to_generic_pool() {
        let meta = generate("", MediaKind::Image);
        assert_eq!(meta.title, " - Professional Photo Asset");
        assert_eq!(meta.keywords[40], "object");
        assert!(meta.compliance.is_valid);
        assert!(meta.legal.warnings.is_empty());
    }

    #[test]
    fn test_base_name_uses_text_before_first_dot() {
        assert_eq!(base_name("my.holiday.photo.jpg"), "my");
        assert_eq!(base_name("golden_hour-sea.png"), "golden hour sea");
        assert_eq!(base_name("noext"), "noext");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("sunset beach"), "Sunset beach");
        assert_eq!(capitalize_first("émile"), "Émile");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_filename_keywords() {
        assert_eq!(
            filename_keywords("Red ox on the HILL"),
            vec!["red", "the", "hill"]
        );
        assert!(filename_keywords("a bc").is_empty());
    }

    #[test]
    fn test_filename_token_length_counts_utf16_units() {
        assert_eq!(filename_keywords("\u{1F600}a ab"), vec!["\u{1F600}a"]);
        assert!(filename_keywords("\u{e9}t").is_empty());
    }

    #[test]
    fn test_keyword_dedup_is_case_sensitive() {
        let merged = dedup_keywords(
            ["Photo", "photo"].iter().map(|s| s.to_string()),
        );
        assert_eq!(merged.len(), 2);
    }
}
