/*!
 * Text patterns for non-linguistic content.
 *
 * Identifiers, tokens and numbers are expected to survive translation
 * unchanged, so an identical source and target on such content is not a
 * translation failure.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Substrings marking composite keys exported from form builders
pub const COMPOSITE_KEY_MARKERS: &[&str] = &["items|id:", "answers|id:"];

/// Prefix of generated record identifiers
pub const IDENTIFIER_PREFIX: &str = "cm";

/// Minimum length of identifier and hex tokens
pub const MIN_TOKEN_LENGTH: usize = 12;

/// Sources at or below this length are treated as non-linguistic
pub const MAX_SHORT_LENGTH: usize = 3;

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static HEX_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{12,}$").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // 42, 3.5, 42%
        Regex::new(r"^\d+(\.\d+)?%?$").unwrap(),
        // $3.5K, 12M
        Regex::new(r"(?i)^\$?\d+(\.\d+)?[KMB]?$").unwrap(),
        // up to $3.5K
        Regex::new(r"(?i)^(up to\s*)?\$?\d+(\.\d+)?[KMB]?$").unwrap(),
    ]
});

/// Trim, collapse whitespace runs to one space and lowercase
pub fn normalize_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}

/// Whether the text is an identifier, a composite key or a hex token
pub fn looks_like_id_or_token(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }

    if COMPOSITE_KEY_MARKERS.iter().any(|marker| text.contains(marker)) {
        return true;
    }

    if text.starts_with(IDENTIFIER_PREFIX)
        && text.chars().count() >= MIN_TOKEN_LENGTH
        && ALPHANUMERIC.is_match(text)
    {
        return true;
    }

    HEX_TOKEN.is_match(&text.to_lowercase())
}

/// Whether the text is a bare number, percentage or currency amount
pub fn looks_like_numberish(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || NUMBER_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

/// Whether a source text carries no language to translate
pub fn is_non_linguistic(text: &str) -> bool {
    looks_like_id_or_token(text)
        || looks_like_numberish(text)
        || text.trim().chars().count() <= MAX_SHORT_LENGTH
}
