use anyhow::{anyhow, Result};
use isolang::Language;

use crate::providers::AUTO_DETECT;

/// Language utilities for translation backends and XLIFF locales
///
/// Backends accept ISO 639-1 codes, optionally with a region or script
/// suffix (`zh-CN`, `pt-BR`). XLIFF files carry locales such as `fr-fr`.
/// Language presets: (language code, display name, default XLIFF locale)
pub const LANGUAGE_PRESETS: &[(&str, &str, &str)] = &[
    ("fr", "French (FR)", "fr-fr"),
    ("de", "German (DE)", "de-de"),
    ("es", "Spanish (ES)", "es-es"),
    ("it", "Italian (IT)", "it-it"),
];

/// Whether a source language means "let the backend detect it"
pub fn is_auto(code: &str) -> bool {
    let code = code.trim();
    code.is_empty() || code.eq_ignore_ascii_case(AUTO_DETECT)
}

/// Normalize a language code for a backend request: trimmed, lowercase, empty becomes `auto`
pub fn normalize_language(code: Option<&str>) -> String {
    let normalized = code.unwrap_or_default().trim().to_lowercase();
    if normalized.is_empty() {
        AUTO_DETECT.to_string()
    } else {
        normalized
    }
}

/// Base language of a code with an optional region suffix (`pt-BR` -> `pt`)
pub fn language_base(code: &str) -> String {
    let code = code.trim();
    code.split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_lowercase()
}

/// Resolve the base of a language code to an ISO 639 language
fn resolve_language(code: &str) -> Option<Language> {
    let base = language_base(code);
    match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }
}

/// Validate that a code names a known ISO 639-1 or ISO 639-3 language
pub fn validate_language_code(code: &str) -> Result<()> {
    resolve_language(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = resolve_language(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}

/// Default XLIFF locale for a target language, if it has a preset
pub fn default_locale(code: &str) -> Option<String> {
    let code = code.trim().to_lowercase();
    LANGUAGE_PRESETS
        .iter()
        .find(|(preset, _, locale)| *preset == code || *locale == code)
        .map(|(_, _, locale)| locale.to_string())
}
