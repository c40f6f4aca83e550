//! Vista Core - Embeddable visual learning assistant.
//!
//! Vista sends an image plus an instruction to a Gemini vision model and
//! returns the model's text, optionally wrapped in a task-specific record
//! (diagram explanation, quiz, key concepts).
//!
//! # Architecture
//!
//! ```text
//! Image path → Load/Decode → [prompt, image] → generateContent → text → record
//! ```
//!
//! The client is an explicit value owned by the caller; there is no
//! process-wide configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vista_core::{Config, Difficulty, VisualAssistant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let assistant = VisualAssistant::new(None, &config)?;
//!
//!     let quiz = assistant.generate_quiz("./cell.png", Difficulty::Hard).await?;
//!     println!("{}", quiz.quiz_content);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod assistant;
pub mod config;
pub mod credential;
pub mod error;
pub mod input;
pub mod llm;
pub mod prompts;
pub mod types;

// Re-exports for convenient access
pub use assistant::VisualAssistant;
pub use config::Config;
pub use credential::{Credential, API_KEY_ENV};
pub use error::{ConfigError, GenerationError};
pub use input::ImageInput;
pub use llm::{GeminiClient, GenerateRequest, GenerateResponse, GenerativeModel, ModelInfo};
pub use prompts::Difficulty;
pub use types::{DiagramExplanation, KeyConcepts, Quiz, NO_RESPONSE};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
