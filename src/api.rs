use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::TranslationError;
use crate::models::{TranslationRequest, TranslationResponse, TranslationResult, Translations};

pub const TRANSLATE_PATH: &str = "/api/v1/translate";

/// Anything that can turn a validated request into per-language results.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Exactly one call per invocation. Errors are already display-ready.
    async fn send(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslationError>;
}

pub struct TranslationClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct RawTranslationResponse {
    translations: Option<IndexMap<String, Value>>,
}

impl TranslationClient {
    pub fn new(base_url: &str) -> Self {
        TranslationClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forwards its input as-is; validation belongs to the caller.
    pub async fn translate(
        &self,
        text: &str,
        target_languages: &[String],
    ) -> Result<TranslationResponse, TranslationError> {
        let request = TranslationRequest::new(text, target_languages.to_vec());
        self.send(&request).await
    }
}

#[async_trait]
impl TranslationBackend for TranslationClient {
    async fn send(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslationError> {
        let url = format!("{}{}", self.base_url, TRANSLATE_PATH);
        debug!("[Translate] Sending request to {}: {:?}", url, request);

        let response = match self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!("[Translate] HTTP request failed: {}", e);
                return Err(TranslationError::generic());
            }
        };

        let status = response.status();

        // Read as text first so a non-JSON error body still gets logged
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                error!("[Translate] Failed to read response body ({}): {}", status, e);
                return Err(TranslationError::generic());
            }
        };

        if !status.is_success() {
            error!("[Translate] Server returned {}: {}", status, body);
            let detail = extract_detail(&body);
            return Err(TranslationError::from_detail(detail.as_deref()));
        }

        debug!("[Translate] Response body: {}", body);
        parse_translations(&body)
    }
}

/// `detail` from an error body, when it is a non-empty string.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.is_empty())
        .map(|d| d.to_string())
}

fn parse_translations(body: &str) -> Result<TranslationResponse, TranslationError> {
    let raw: RawTranslationResponse = serde_json::from_str(body).map_err(|e| {
        warn!("[Translate] Unexpected response body: {}", e);
        TranslationError::InvalidResponseShape
    })?;

    let Some(entries) = raw.translations else {
        warn!("[Translate] Response has no translations field");
        return Err(TranslationError::InvalidResponseShape);
    };

    let translations: Translations = entries
        .into_iter()
        .map(|(language, value)| (language, to_result(&value)))
        .collect();

    Ok(TranslationResponse { translations })
}

/// A malformed entry only loses its own content and renders as not available.
fn to_result(value: &Value) -> TranslationResult {
    if !value.is_object() {
        debug!("[Translate] Ignoring non-object translation entry: {}", value);
        return TranslationResult::default();
    }

    let field = |name: &str| value.get(name).and_then(|v| v.as_str()).map(|v| v.to_string());
    TranslationResult {
        text: field("text"),
        error: field("error"),
        source_language: field("source_language"),
    }
}
