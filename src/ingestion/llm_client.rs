use crate::error::ConceptMapError;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use reqwest::blocking::Client as HttpClient;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://127.0.0.1:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen3";

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Implementations report rate limiting as [`ConceptMapError::TransientService`]
/// and every other failure as [`ConceptMapError::Service`]; retrying is left to
/// [`super::ModelClient`].
pub trait LLMClient: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ConceptMapError>;
}

fn build_http_client(timeout: Duration) -> Result<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .context("unable to initialise the HTTP client for the model service")
}

fn classify_failure(status: StatusCode, body: &str) -> ConceptMapError {
    let lowered = body.to_lowercase();
    let message = format!("status {}: {}", status.as_u16(), truncate(body, 300));
    if status == StatusCode::TOO_MANY_REQUESTS
        || lowered.contains("rate limit")
        || lowered.contains("resource_exhausted")
    {
        ConceptMapError::TransientService(message)
    } else {
        ConceptMapError::Service(message)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

fn send_json<T: Serialize>(
    request: reqwest::blocking::RequestBuilder,
    payload: &T,
) -> Result<String, ConceptMapError> {
    let response = request
        .json(payload)
        .send()
        .map_err(|err| ConceptMapError::Service(format!("HTTP call failed: {}", err)))?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|err| ConceptMapError::Service(format!("unreadable response body: {}", err)))?;
    if !status.is_success() {
        return Err(classify_failure(status, &body));
    }
    Ok(body)
}

pub struct GeminiLLMClient {
    endpoint: String,
    model: String,
    api_key: String,
    http: HttpClient,
}

impl GeminiLLMClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            http: build_http_client(timeout)?,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl LLMClient for GeminiLLMClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ConceptMapError> {
        let payload = GeminiGenerateRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPartOut {
                    text: &request.prompt,
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: request.max_output_tokens,
                temperature: request.temperature,
            },
        };

        let body = send_json(
            self.http
                .post(self.url())
                .header("x-goog-api-key", &self.api_key),
            &payload,
        )?;

        let raw: GeminiGenerateResponse = serde_json::from_str(&body).map_err(|err| {
            ConceptMapError::Service(format!("unreadable Gemini response: {}", err))
        })?;
        raw.into_text()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerateRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPartOut<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPartOut<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPartIn>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartIn {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiGenerateResponse {
    fn into_text(self) -> Result<String, ConceptMapError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(ConceptMapError::Service(
                "Gemini returned no candidates".to_string(),
            ));
        };
        let finish_reason = candidate.finish_reason;
        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(ConceptMapError::Service(format!(
                "Gemini returned an empty candidate (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

pub struct OllamaLLMClient {
    endpoint: String,
    model: String,
    http: HttpClient,
}

impl OllamaLLMClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            http: build_http_client(timeout)?,
        })
    }
}

impl LLMClient for OllamaLLMClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ConceptMapError> {
        let payload = OllamaGenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options: OllamaOptions {
                num_predict: request.max_output_tokens,
                temperature: request.temperature,
            },
        };

        let body = send_json(self.http.post(&self.endpoint), &payload)?;
        let raw: OllamaGenerateResponse = serde_json::from_str(&body).map_err(|err| {
            ConceptMapError::Service(format!("unreadable Ollama response: {}", err))
        })?;
        Ok(raw.response)
    }
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Scripted backend for tests: answers are popped in order and every request
/// is recorded.
#[derive(Clone, Default)]
pub struct MockLLMClient {
    responses: Arc<Mutex<VecDeque<Result<String, ConceptMapError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, text: impl Into<String>) {
        self.responses.lock().push_back(Ok(text.into()));
    }

    pub fn push_error(&self, error: ConceptMapError) {
        self.responses.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.prompt.clone()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }
}

impl LLMClient for MockLLMClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ConceptMapError> {
        self.requests.lock().push(request.clone());
        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(ConceptMapError::Service(
                "no scripted mock response left".to_string(),
            ))
        })
    }
}
