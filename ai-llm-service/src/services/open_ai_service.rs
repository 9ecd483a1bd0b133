//! OpenAI-compatible chat-completion client (GitHub Models by default).
//!
//! Minimal, non-streaming client. The configured endpoint is the full
//! chat-completions URL and is called as-is with `POST`.
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Each attempt is bounded by `cfg.timeout_secs`. Transport failures and
//! non-2xx statuses are retried up to `cfg.retry.max_attempts` with doubling
//! backoff; malformed payloads fail immediately.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    completion::{CompletionClient, CompletionRequest},
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Thin client for an OpenAI-compatible chat API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (timeout and default headers). The client
/// holds no per-request state and can be shared behind an `Arc`.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`ProviderErrorKind::InvalidHeader`] if the token is not a valid header value
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| ProviderError::new(&cfg.model, ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                &cfg.model,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(30));

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ProviderError::new(&cfg.model, ProviderErrorKind::InvalidHeader(e.to_string()))
        })?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            max_attempts = cfg.retry.attempts(),
            "OpenAiService initialized"
        );

        Ok(Self { client, cfg })
    }

    /// Performs a chat completion with bounded retries.
    ///
    /// # Errors
    /// - [`AiLlmError::RetriesExhausted`] when every attempt hit a retryable failure
    /// - [`ProviderErrorKind::Decode`] / [`ProviderErrorKind::EmptyChoices`] for malformed payloads
    pub async fn generate(&self, request: CompletionRequest<'_>) -> Result<String, AiLlmError> {
        let body = ChatCompletionRequest::new(&self.cfg, &request);
        let attempts = self.cfg.retry.attempts();
        let started = Instant::now();

        let mut attempt = 0u32;
        loop {
            match self.send_once(&body).await {
                Ok(text) => {
                    info!(
                        model = %self.cfg.model,
                        attempt = attempt + 1,
                        latency_ms = started.elapsed().as_millis(),
                        "chat completion completed"
                    );
                    return Ok(text);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    attempt += 1;
                    if attempt >= attempts {
                        error!(
                            model = %self.cfg.model,
                            attempts,
                            error = %err,
                            "chat completion failed after all attempts"
                        );
                        return Err(AiLlmError::RetriesExhausted {
                            attempts,
                            last: Box::new(err),
                        });
                    }
                    let delay = self.cfg.retry.delay_for(attempt - 1);
                    warn!(
                        model = %self.cfg.model,
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "chat completion attempt failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send_once(&self, body: &ChatCompletionRequest<'_>) -> Result<String, AiLlmError> {
        debug!(
            model = %self.cfg.model,
            prompt_len = body.messages.last().map(|m| m.content.len()).unwrap_or(0),
            "POST {}", self.cfg.endpoint
        );

        let resp = self.client.post(&self.cfg.endpoint).json(body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                &self.cfg.model,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url: self.cfg.endpoint.clone(),
                    snippet: make_snippet(&text),
                }),
            )
            .into());
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                &self.cfg.model,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `choices[0].message.content`"
                )),
            )
        })?;

        out.choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| ProviderError::new(&self.cfg.model, ProviderErrorKind::EmptyChoices).into())
    }
}

impl CompletionClient for OpenAiService {
    fn model(&self) -> &str {
        &self.cfg.model
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, AiLlmError> {
        self.generate(request).await
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for chat completions (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(cfg: &'a LlmModelConfig, req: &CompletionRequest<'a>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if !req.system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: req.system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: req.prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            temperature: req.temperature.or(cfg.temperature),
            max_tokens: req.max_tokens.or(cfg.max_tokens),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;
    use crate::config::retry_policy::RetryPolicy;

    /// Serves `/chat`: the first `failures` calls answer 500, later ones `reply`.
    async fn spawn_stub(failures: usize, reply: Value) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = (hits.clone(), failures, reply);

        let app = Router::new()
            .route(
                "/chat",
                post(
                    |State((hits, failures, reply)): State<(Arc<AtomicUsize>, usize, Value)>| async move {
                        let n = hits.fetch_add(1, Ordering::SeqCst);
                        if n < failures {
                            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "down"})))
                        } else {
                            (StatusCode::OK, Json(reply))
                        }
                    },
                ),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/chat"), hits)
    }

    fn cfg(endpoint: String) -> LlmModelConfig {
        LlmModelConfig {
            model: "gpt-4o-mini".into(),
            endpoint,
            api_key: Some("test-token".into()),
            max_tokens: Some(500),
            temperature: Some(0.3),
            timeout_secs: Some(5),
            retry: RetryPolicy {
                max_attempts: 3,
                base_delay: Duration::from_millis(1),
            },
        }
    }

    fn ok_reply(text: &str) -> Value {
        json!({"choices": [{"message": {"role": "assistant", "content": text}}]})
    }

    #[test]
    fn missing_token_is_rejected() {
        let mut c = cfg("https://example.test/chat".into());
        c.api_key = None;
        let err = OpenAiService::new(c).unwrap_err();
        assert!(err.to_string().contains("missing API token"));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let err = OpenAiService::new(cfg("localhost:1234".into())).unwrap_err();
        assert!(err.to_string().contains("invalid endpoint"));
    }

    #[test]
    fn request_overrides_config_knobs() {
        let c = cfg("https://example.test/chat".into());
        let req = CompletionRequest::new("sys", "hello")
            .with_max_tokens(42)
            .with_temperature(0.0);
        let body = ChatCompletionRequest::new(&c, &req);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["max_tokens"], 42);
        assert_eq!(v["temperature"], 0.0);
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "hello");
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let (url, hits) = spawn_stub(2, ok_reply("summary text")).await;
        let svc = OpenAiService::new(cfg(url)).unwrap();

        let out = svc
            .complete(CompletionRequest::new("sys", "note"))
            .await
            .unwrap();

        assert_eq!(out, "summary text");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_attempt_cap() {
        let (url, hits) = spawn_stub(10, ok_reply("never")).await;
        let svc = OpenAiService::new(cfg(url)).unwrap();

        let err = svc
            .complete(CompletionRequest::new("sys", "note"))
            .await
            .unwrap_err();

        assert!(matches!(err, AiLlmError::RetriesExhausted { attempts: 3, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn malformed_payload_is_not_retried() {
        let (url, hits) = spawn_stub(0, json!({"choices": []})).await;
        let svc = OpenAiService::new(cfg(url)).unwrap();

        let err = svc
            .complete(CompletionRequest::new("sys", "note"))
            .await
            .unwrap_err();

        assert!(err.is_malformed_response());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
