//! Gemini provider using the `generateContent` REST API.
//!
//! Sends prompt + image as a text part followed by an inline-data part in a
//! single user turn. Also exposes the model listing endpoint.

use super::provider::{GenerateRequest, GenerateResponse, GenerativeModel};
use crate::config::GeminiConfig;
use crate::credential::Credential;
use crate::error::{ConfigError, GenerationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Models are listed in pages of this size.
const LIST_PAGE_SIZE: &str = "100";

/// Caller-owned Gemini client.
///
/// Holds the credential, model name and connection pool. Nothing is stored
/// globally, so several clients with different keys can coexist.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    credential: Credential,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(credential: Credential, config: &GeminiConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ConfigError::ValidationError(format!("Cannot build HTTP client: {e}")))?;

        Ok(Self {
            credential,
            model: normalize_model_name(&config.model).to_string(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Model name without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn transport_err(&self, source: reqwest::Error) -> GenerationError {
        GenerationError::Transport {
            model: self.model.clone(),
            source,
        }
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, GenerationError> {
        let resp = request
            .header("x-goog-api-key", self.credential.expose())
            .send()
            .await
            .map_err(|e| self.transport_err(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_err(e))?;

        if !status.is_success() {
            return Err(GenerationError::Remote {
                status: Some(status.as_u16()),
                message: remote_error_message(&body),
            });
        }

        Ok(body)
    }

    /// List every model visible to this key, following pagination.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        let url = format!("{}/models", self.endpoint);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }

            let body = self.send(self.client.get(&url).query(&query)).await?;
            let page: ListModelsResponse = serde_json::from_str(&body)
                .map_err(|source| GenerationError::InvalidResponse { source })?;

            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!("Listed {} models", models.len());
        Ok(models)
    }
}

/// Strip the optional `models/` resource prefix.
fn normalize_model_name(model: &str) -> &str {
    let model = model.trim();
    model.strip_prefix("models/").unwrap_or(model)
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw body.
fn remote_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.trim().to_string())
}

// --- Request types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerateRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text {
                        text: &request.prompt,
                    },
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: &request.image.mime_type,
                            data: &request.image.data,
                        },
                    },
                ],
            }],
            generation_config: WireGenerationConfig {
                max_output_tokens: request.generation.max_output_tokens,
                temperature: request.generation.temperature,
            },
        }
    }
}

// --- Response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

/// A model entry from the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. "models/gemini-1.5-flash"
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether this model can serve image + prompt requests.
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` if it has no text parts.
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    fn block_reason(&self) -> Option<&str> {
        if !self.candidates.is_empty() {
            return None;
        }
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerationError> {
        let start = Instant::now();
        let body = GenerateContentRequest::from_request(request);

        tracing::debug!(
            model = %self.model,
            image_type = %request.image.mime_type,
            "Sending generateContent request"
        );

        let raw = self
            .send(self.client.post(self.generate_url()).json(&body))
            .await?;

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|source| GenerationError::InvalidResponse { source })?;

        if let Some(reason) = parsed.block_reason() {
            return Err(GenerationError::Remote {
                status: None,
                message: format!("prompt blocked: {reason}"),
            });
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        let finish_reason = parsed
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());

        Ok(GenerateResponse {
            text: parsed.first_text(),
            model: parsed
                .model_version
                .clone()
                .unwrap_or_else(|| self.model.clone()),
            finish_reason,
            tokens_used: parsed.usage_metadata.and_then(|u| u.total_token_count),
            latency_ms,
        })
    }
}
