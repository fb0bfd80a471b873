// crates/learnsync-service/src/providers/openai.rs
//
// OpenAI-compatible embeddings client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use learnsync_core::{EmbeddingProvider, Fingerprint, LearnSyncError};

/// Embeddings client for `{base_url}/embeddings`.
///
/// Retries rate-limit, server and transport errors with exponential backoff,
/// up to `max_retries` times after the first attempt. Every request is bounded
/// by the configured timeout.
#[derive(Clone)]
pub struct OpenAiEmbeddingProvider {
    client: Client,
    endpoint: String,
    dimensions: Option<usize>,
    max_retries: usize,
}

impl std::fmt::Debug for OpenAiEmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbeddingProvider")
            .field("endpoint", &self.endpoint)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl OpenAiEmbeddingProvider {
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
        max_retries: usize,
        dimensions: Option<usize>,
    ) -> Result<Self, LearnSyncError> {
        if api_key.trim().is_empty() {
            return Err(LearnSyncError::Config("missing OpenAI API key".to_string()));
        }

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|e| LearnSyncError::Config(format!("invalid OpenAI API key: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| LearnSyncError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            dimensions,
            max_retries,
        })
    }

    fn should_retry(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    fn is_retryable_error(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect() || err.is_request()
    }

    /// Whether another request may follow `retries_done` retries.
    fn may_retry(&self, retries_done: usize) -> bool {
        retries_done < self.max_retries
    }

    fn retry_backoff(attempt: usize) -> Duration {
        let capped = attempt.min(5) as u32;
        Duration::from_millis(500 * (1 << capped))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str, model: &str) -> Result<Fingerprint, LearnSyncError> {
        let request = EmbeddingRequest {
            model,
            input: text,
            dimensions: self.dimensions,
        };

        let mut attempt = 0usize;
        loop {
            match self.client.post(&self.endpoint).json(&request).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let parsed: EmbeddingResponse = resp.json().await.map_err(|e| {
                            LearnSyncError::EmbeddingProvider(format!(
                                "failed to parse embedding response: {}",
                                e
                            ))
                        })?;
                        let values = parsed
                            .data
                            .into_iter()
                            .next()
                            .map(|entry| entry.embedding)
                            .ok_or_else(|| {
                                LearnSyncError::EmbeddingProvider(
                                    "embedding response contained no data".to_string(),
                                )
                            })?;
                        return Fingerprint::new(values);
                    }

                    let body = resp
                        .text()
                        .await
                        .unwrap_or_else(|_| "<body unavailable>".to_string());
                    if Self::should_retry(status) && self.may_retry(attempt) {
                        attempt += 1;
                        tracing::warn!(
                            "Embedding request failed ({}), retry {}/{}",
                            status,
                            attempt,
                            self.max_retries
                        );
                        tokio::time::sleep(Self::retry_backoff(attempt)).await;
                        continue;
                    }
                    return Err(LearnSyncError::EmbeddingProvider(format!(
                        "embeddings request failed ({}): {}",
                        status, body
                    )));
                }
                Err(err) => {
                    if Self::is_retryable_error(&err) && self.may_retry(attempt) {
                        attempt += 1;
                        tracing::warn!(
                            "Embedding request error: {}, retry {}/{}",
                            err,
                            attempt,
                            self.max_retries
                        );
                        tokio::time::sleep(Self::retry_backoff(attempt)).await;
                        continue;
                    }
                    return Err(LearnSyncError::EmbeddingProvider(err.to_string()));
                }
            }
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}
