/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which sends flat
 * batches of text to a translation backend one string at a time, with
 * bounded retries, linear backoff and a fallback policy for strings that
 * cannot be translated.
 */

use anyhow::{anyhow, Result};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils::normalize_language;
use crate::providers::google::{GoogleCloudTranslate, GoogleTranslate};
use crate::providers::Provider;

use super::options::TranslationOptions;

/// Translations for a batch, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// One entry per input string
    pub translations: Vec<String>,
    /// Strings resolved through the fallback policy
    pub failed_count: usize,
}

/// Result of translating a single string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringOutcome {
    pub text: String,
    pub used_fallback: bool,
}

/// Wait before the retry following `attempt` (0-based): `backoff × (attempt + 1)`, saturating
pub fn retry_delay(backoff: Duration, attempt: u32) -> Duration {
    backoff.saturating_mul(attempt.saturating_add(1))
}

/// Main translation service
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Backend implementation
    provider: Arc<dyn Provider>,
}

impl TranslationService {
    /// Create a service from the translation configuration
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let provider: Arc<dyn Provider> = match config.provider {
            ConfigTranslationProvider::Google => {
                if config.endpoint.is_empty() {
                    Arc::new(GoogleTranslate::new(config.timeout_secs))
                } else {
                    Arc::new(GoogleTranslate::with_endpoint(&config.endpoint, config.timeout_secs))
                }
            }
            ConfigTranslationProvider::GoogleCloud => {
                if config.api_key.is_empty() {
                    return Err(anyhow!("Google Cloud Translation requires an API key"));
                }
                if config.endpoint.is_empty() {
                    Arc::new(GoogleCloudTranslate::new(&config.api_key, config.timeout_secs))
                } else {
                    Arc::new(GoogleCloudTranslate::with_endpoint(
                        &config.endpoint,
                        &config.api_key,
                        config.timeout_secs,
                    ))
                }
            }
        };

        Ok(Self { provider })
    }

    /// Create a service around an existing backend
    pub fn with_provider(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Name of the backend in use
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Test the connection to the backend
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Translate a flat batch of strings
    ///
    /// The result always has the same length and order as `texts`. A string
    /// that keeps failing is resolved through the fallback policy and counted
    /// in `failed_count`; with fallback disabled the last backend error aborts
    /// the batch.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        options: &TranslationOptions,
    ) -> Result<BatchOutcome, TranslationError> {
        let source_language = normalize_language(options.source_language.as_deref());
        let target_language = normalize_language(Some(&options.target_language));

        let mut translations = Vec::with_capacity(texts.len());
        let mut failed_count = 0;

        for text in texts {
            let outcome = self
                .translate_one(text, &source_language, &target_language, options)
                .await?;
            if outcome.used_fallback {
                failed_count += 1;
            }
            translations.push(outcome.text);
        }

        debug!(
            "Translated batch of {} strings ({} fallbacks)",
            texts.len(),
            failed_count
        );

        Ok(BatchOutcome {
            translations,
            failed_count,
        })
    }

    /// Translate one string with retries and fallback
    pub async fn translate_one(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        options: &TranslationOptions,
    ) -> Result<StringOutcome, TranslationError> {
        if text.trim().is_empty() {
            return Ok(StringOutcome {
                text: String::new(),
                used_fallback: false,
            });
        }

        let mut last_error = None;
        for attempt in 0..=options.retries {
            match self
                .provider
                .translate(text, source_language, target_language)
                .await
            {
                Ok(translated) => {
                    return Ok(StringOutcome {
                        text: translated,
                        used_fallback: false,
                    });
                }
                Err(e) => {
                    warn!(
                        "Translation attempt {}/{} failed: {}",
                        attempt + 1,
                        options.retries + 1,
                        e
                    );
                    last_error = Some(e);
                }
            }

            if attempt < options.retries {
                tokio::time::sleep(retry_delay(options.retry_backoff, attempt)).await;
            }
        }

        match options.fallback.apply(text) {
            Some(fallback) => {
                warn!("Falling back to source text for: {}", text);
                Ok(StringOutcome {
                    text: fallback,
                    used_fallback: true,
                })
            }
            None => {
                let error = last_error
                    .unwrap_or_else(|| ProviderError::TranslationNotFound(text.to_string()));
                Err(TranslationError::Provider(error))
            }
        }
    }
}
