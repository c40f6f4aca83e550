//! Generative model trait and request/response types.
//!
//! `GenerativeModel` is the seam between the assistant and the wire: the
//! Gemini client implements it for real traffic and tests substitute a mock.

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::input::ImageInput;
use async_trait::async_trait;

/// One generation request: a prompt followed by an image, sent as a single
/// multi-part user turn.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Instruction text, sent as the first part
    pub prompt: String,
    /// The image, sent as the second part
    pub image: ImageInput,
    /// Output length and sampling parameters
    pub generation: GenerationConfig,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, image: ImageInput, generation: GenerationConfig) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            generation,
        }
    }
}

/// The response to a single generation request.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Generated text; `None` when the model produced no text parts
    pub text: Option<String>,
    /// Model identifier used
    pub model: String,
    /// Why generation stopped (e.g., "STOP", "MAX_TOKENS", "SAFETY"), if reported
    pub finish_reason: Option<String>,
    /// Number of tokens used (prompt + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all generation backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the assistant holds a `Box<dyn GenerativeModel>`).
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model name for logging (e.g., "gemini-1.5-flash").
    fn name(&self) -> &str;

    /// Submit one request. Implementations must not retry.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerationError>;
}
