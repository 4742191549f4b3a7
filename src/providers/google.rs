/*!
 * Google Translate clients.
 *
 * Two flavours share the same `Provider` contract:
 * - `GoogleTranslate`: the public web endpoint used by the browser widget, no key
 * - `GoogleCloudTranslate`: the Cloud Translation v2 REST API, key required
 */

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, AUTO_DETECT};

/// Default public web endpoint
pub const DEFAULT_WEB_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Default Cloud Translation v2 endpoint
pub const DEFAULT_CLOUD_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_default()
}

fn map_send_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::AuthenticationError(body)
        }
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(body),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message: body,
        },
    }
}

/// Google Translate through the public web endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    endpoint: String,
    client: Client,
}

impl GoogleTranslate {
    /// Create a client for the default endpoint
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_endpoint(DEFAULT_WEB_ENDPOINT, timeout_secs)
    }

    /// Create a client for a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: build_client(timeout_secs),
        }
    }

    fn request_url(&self, text: &str, source: &str, target: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))
    }
}

/// Extract the translation from a web endpoint response
///
/// The body is a nested JSON array whose first element lists one
/// `[translated, original, ...]` entry per sentence.
pub fn parse_web_response(body: &str, original: &str) -> Result<String, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Invalid JSON: {}", e)))?;

    let sentences = value
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ProviderError::ParseError("Missing sentence array".to_string()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(|t| t.as_str()))
        .collect();

    if translated.trim().is_empty() {
        return Err(ProviderError::TranslationNotFound(original.to_string()));
    }
    Ok(translated)
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = self.request_url(text, source_language, target_language)?;

        let response = self.client.get(url).send().await.map_err(map_send_error)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(map_status_error(status, body));
        }

        parse_web_response(&body, text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let translated = self.translate("Hello", "en", "fr").await?;
        debug!("Google web endpoint reachable, test translation: {}", translated);
        Ok(())
    }

    fn name(&self) -> &str {
        "Google Translate (web)"
    }
}

/// Request body for the Cloud Translation v2 API
#[derive(Debug, Serialize)]
struct CloudRequest<'a> {
    q: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    target: &'a str,
    format: &'a str,
}

/// Response body of the Cloud Translation v2 API
#[derive(Debug, Deserialize)]
pub struct CloudResponse {
    pub data: CloudData,
}

#[derive(Debug, Deserialize)]
pub struct CloudData {
    pub translations: Vec<CloudTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudTranslation {
    pub translated_text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

/// Google Cloud Translation v2 client
#[derive(Debug, Clone)]
pub struct GoogleCloudTranslate {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl GoogleCloudTranslate {
    /// Create a client for the default endpoint
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self::with_endpoint(DEFAULT_CLOUD_ENDPOINT, api_key, timeout_secs)
    }

    /// Create a client for a custom endpoint
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client: build_client(timeout_secs),
        }
    }
}

#[async_trait]
impl Provider for GoogleCloudTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = Url::parse_with_params(&self.endpoint, &[("key", self.api_key.as_str())])
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))?;

        let body = CloudRequest {
            q: vec![text],
            source: (source_language != AUTO_DETECT).then_some(source_language),
            target: target_language,
            format: "text",
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, body));
        }

        let parsed: CloudResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::TranslationNotFound(text.to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello", "en", "fr").await.map(|_| ())
    }

    fn name(&self) -> &str {
        "Google Cloud Translation"
    }
}
