/*!
 * Translation backends.
 *
 * This module contains client implementations for the machine translation
 * services a document can be sent to:
 * - `google`: Google Translate, either the public web endpoint or the Cloud v2 API
 * - `mock`: Deterministic in-memory backend for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Language code sent to a backend when the source should be detected
pub const AUTO_DETECT: &str = "auto";

/// Common trait for all translation backends
///
/// A backend translates one string at a time. Retries, backoff and fallback
/// live in the translation service, so a single call makes a single attempt.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate `text` from `source_language` (or `auto`) to `target_language`
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the backend
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Human-readable backend name for logs
    fn name(&self) -> &str;
}

pub mod google;
pub mod mock;
