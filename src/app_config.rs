use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::path::Path;
use std::time::Duration;

use crate::language_utils;
use crate::translation::glossary::Glossary;
use crate::translation::options::{BatchSettings, FallbackPolicy, TranslationOptions};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code; empty or "auto" lets the backend detect it
    #[serde(default)]
    pub source_language: String,

    /// Target language code sent to the backend
    pub target_language: String,

    /// Value written to the file-level `target-language` attribute
    #[serde(default)]
    pub file_target_language: Option<String>,

    /// Use the language preset locale (e.g. `fr-fr`) when no explicit attribute is configured
    #[serde(default = "default_true")]
    pub use_locale_preset: bool,

    /// Translation config
    pub translation: TranslationConfig,

    /// Text decoration applied to every translated run
    #[serde(default)]
    pub decoration: DecorationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate public web endpoint
    #[default]
    Google,
    // @provider: Google Cloud Translation v2 API
    GoogleCloud,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::GoogleCloud => "Google Cloud Translation",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::GoogleCloud => "googlecloud".to_string(),
        }
    }

    // @returns: Whether the backend needs an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::GoogleCloud)
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "googlecloud" | "google-cloud" => Ok(Self::GoogleCloud),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation backend to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// API key, required by the cloud backend
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Endpoint override; empty uses the backend default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
            common: TranslationCommonConfig::default(),
        }
    }
}

/// Common translation settings applicable to all backends
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Retry count for failed strings (total attempts = retries + 1)
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Linear backoff unit for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Substitute the source text when a string cannot be translated
    #[serde(default = "default_true")]
    pub fallback_to_source_on_error: bool,

    /// Wrap fallback text in `[[...]]` so it stands out in the target
    #[serde(default)]
    pub mark_fallback_in_target: bool,

    /// Number of translation units per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Delay after each batch (in milliseconds)
    #[serde(default)]
    pub batch_delay_ms: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            fallback_to_source_on_error: true,
            mark_fallback_in_target: false,
            batch_size: default_batch_size(),
            batch_delay_ms: 0,
        }
    }
}

/// Decoration applied to translated text
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DecorationConfig {
    /// Prepended to every translated run
    #[serde(default)]
    pub prefix: String,

    /// Appended to every translated run
    #[serde(default)]
    pub suffix: String,

    /// Literal replacements applied to translated text, longest key first
    #[serde(default)]
    pub glossary: BTreeMap<String, String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    350 // waits 350ms, then 700ms, ...
}

fn default_batch_size() -> usize {
    40
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, or write and return the defaults when it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path));
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !language_utils::is_auto(&self.source_language) {
            language_utils::get_language_name(&self.source_language)
                .context("Invalid source language")?;
        }
        language_utils::get_language_name(&self.target_language)
            .context("Invalid target language")?;

        if self.translation.common.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }

        if self.translation.provider.requires_api_key() && self.translation.api_key.is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                self.translation.provider.display_name()
            ));
        }

        Ok(())
    }

    /// Source language as the translation options expect it (None = auto-detect)
    pub fn source_language_option(&self) -> Option<String> {
        if language_utils::is_auto(&self.source_language) {
            None
        } else {
            Some(self.source_language.clone())
        }
    }

    /// Value for the file-level `target-language` attribute, if it should be written
    pub fn effective_file_target_language(&self) -> Option<String> {
        match self.file_target_language.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => Some(explicit.to_string()),
            _ if self.use_locale_preset => language_utils::default_locale(&self.target_language),
            _ => None,
        }
    }

    /// Options driving a translation run
    pub fn translation_options(&self) -> TranslationOptions {
        let common = &self.translation.common;
        TranslationOptions {
            target_language: self.target_language.clone(),
            source_language: self.source_language_option(),
            file_target_language: self.effective_file_target_language(),
            prefix_target: self.decoration.prefix.clone(),
            suffix_target: self.decoration.suffix.clone(),
            glossary: Glossary::from_map(&self.decoration.glossary),
            retries: common.retry_count,
            retry_backoff: Duration::from_millis(common.retry_backoff_ms),
            fallback: FallbackPolicy::from_flags(
                common.fallback_to_source_on_error,
                common.mark_fallback_in_target,
            ),
        }
    }

    /// Batching settings for the document translator
    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            batch_size: self.translation.common.batch_size,
            batch_delay: Duration::from_millis(self.translation.common.batch_delay_ms),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            file_target_language: None,
            use_locale_preset: true,
            translation: TranslationConfig::default(),
            decoration: DecorationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
