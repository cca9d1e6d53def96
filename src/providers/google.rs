/*!
 * Client for the public Google translate web endpoint.
 *
 * The same endpoint the classic unofficial translate libraries use: no
 * API key, nested-array responses, best-effort availability. Retries with
 * exponential backoff on server and network failures; client errors are
 * returned immediately.
 */

use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::BackendError;
use crate::language::Language;
use crate::providers::TranslationBackend;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Google translate web client
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Endpoint URL
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl GoogleTranslate {
    /// Create a client against the default endpoint.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_ENDPOINT, 3, 1000)
    }

    /// Create a client with an explicit endpoint and retry settings.
    pub fn with_config(
        endpoint: impl Into<String>,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
        }
    }

    fn request_url(
        &self,
        text: &str,
        dest: &Language,
        src: &Language,
    ) -> Result<Url, BackendError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| BackendError::RequestFailed(format!("Invalid endpoint: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("dt", "t")
            .append_pair("sl", src.code())
            .append_pair("tl", dest.code())
            .append_pair("q", text);
        Ok(url)
    }

    /// The endpoint answers with nested arrays; every segment under index
    /// zero carries a piece of the translation at its own index zero.
    fn extract_translation(raw: &str) -> Result<String, BackendError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| BackendError::ParseError(e.to_string()))?;
        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| BackendError::ParseError("Missing translation segments".to_string()))?;

        let mut out = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(Value::as_str) {
                out.push_str(part);
            }
        }

        if out.is_empty() {
            return Err(BackendError::ParseError(
                "Empty translation in response".to_string(),
            ));
        }
        Ok(out)
    }
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        dest: &Language,
        src: &Language,
    ) -> Result<String, BackendError> {
        let url = self.request_url(text, dest, src)?;

        let mut attempt = 0;
        let mut last_error = BackendError::RequestFailed("No attempts made".to_string());

        while attempt <= self.max_retries {
            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let raw = response
                            .text()
                            .await
                            .map_err(|e| BackendError::ParseError(e.to_string()))?;
                        return Self::extract_translation(&raw);
                    }

                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());

                    if status.as_u16() == 429 {
                        last_error = BackendError::RateLimitExceeded(message);
                    } else if status.is_server_error() {
                        last_error = BackendError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        };
                    } else {
                        // Client errors do not improve on retry.
                        return Err(BackendError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    }
                    warn!(
                        "Translate API error ({}) - attempt {}/{}",
                        status,
                        attempt + 1,
                        self.max_retries + 1
                    );
                }
                Err(e) => {
                    last_error = BackendError::ConnectionError(e.to_string());
                    warn!(
                        "Translate API network error: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                }
            }

            attempt += 1;
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error)
    }
}
