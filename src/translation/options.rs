/*!
 * Options for a translation run.
 */

use std::time::Duration;

use super::glossary::Glossary;

/// What to do with a string that could not be translated after all retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Put the source text in the target unchanged
    #[default]
    Source,
    /// Put the source text in the target wrapped in `[[...]]`
    Marked,
    /// Fail the whole batch with the last backend error
    Disabled,
}

impl FallbackPolicy {
    /// Build from the two configuration flags
    pub fn from_flags(fallback_to_source_on_error: bool, mark_fallback_in_target: bool) -> Self {
        match (fallback_to_source_on_error, mark_fallback_in_target) {
            (false, _) => Self::Disabled,
            (true, true) => Self::Marked,
            (true, false) => Self::Source,
        }
    }

    /// Text substituted for `source`, or None when fallback is disabled
    pub fn apply(&self, source: &str) -> Option<String> {
        match self {
            Self::Source => Some(source.to_string()),
            Self::Marked => Some(format!("[[{}]]", source)),
            Self::Disabled => None,
        }
    }
}

/// Options controlling translation, decoration and failure handling
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Backend target language code (e.g. "fr", "de")
    pub target_language: String,

    /// Backend source language code, None for auto-detection
    pub source_language: Option<String>,

    /// Value written to the first file's `target-language` attribute
    pub file_target_language: Option<String>,

    /// Prepended to every translated run
    pub prefix_target: String,

    /// Appended to every translated run
    pub suffix_target: String,

    /// Literal replacements applied to translated text
    pub glossary: Glossary,

    /// Additional attempts after the first one
    pub retries: u32,

    /// Backoff unit; attempt N waits `retry_backoff * N`
    pub retry_backoff: Duration,

    /// Failure handling once retries are exhausted
    pub fallback: FallbackPolicy,
}

impl TranslationOptions {
    /// Options for a target language with default retry and fallback behaviour
    pub fn new(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            source_language: None,
            file_target_language: None,
            prefix_target: String::new(),
            suffix_target: String::new(),
            glossary: Glossary::default(),
            retries: 2,
            retry_backoff: Duration::from_millis(350),
            fallback: FallbackPolicy::Source,
        }
    }

    /// Apply glossary, then prefix and suffix, to a translated core
    pub fn decorate(&self, translated: &str) -> String {
        let substituted = self.glossary.apply(translated);
        format!("{}{}{}", self.prefix_target, substituted, self.suffix_target)
    }
}

/// How units are grouped into backend round trips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    /// Consecutive units per batch
    pub batch_size: usize,
    /// Pause after each batch
    pub batch_delay: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: 30,
            batch_delay: Duration::ZERO,
        }
    }
}
