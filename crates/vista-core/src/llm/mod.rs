//! Generative model integration.
//!
//! Provides the `GenerativeModel` abstraction and its Gemini implementation.

pub(crate) mod gemini;
pub(crate) mod provider;

pub use gemini::{GeminiClient, ModelInfo};
pub use provider::{GenerateRequest, GenerateResponse, GenerativeModel};
