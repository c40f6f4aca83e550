//! The visual learning assistant.
//!
//! Every public method issues exactly one generation request and returns
//! exactly one result. No retries, no caching, no conversation state.

use std::path::Path;

use crate::config::{Config, GenerationConfig, LimitsConfig};
use crate::credential::Credential;
use crate::error::{ConfigError, GenerationError};
use crate::input::ImageInput;
use crate::llm::{GeminiClient, GenerateRequest, GenerativeModel};
use crate::prompts::{self, Difficulty};
use crate::types::{DiagramExplanation, KeyConcepts, Quiz, NO_RESPONSE};

/// Sends (prompt, image) requests to a generative model and shapes the text
/// it returns.
pub struct VisualAssistant {
    model: Box<dyn GenerativeModel>,
    generation: GenerationConfig,
    limits: LimitsConfig,
}

impl VisualAssistant {
    /// Build an assistant backed by Gemini.
    ///
    /// `api_key` takes precedence; otherwise the key comes from
    /// `config.gemini.api_key` (by default `${GOOGLE_API_KEY}`).
    pub fn new(api_key: Option<&str>, config: &Config) -> Result<Self, ConfigError> {
        let credential = Credential::resolve(api_key, &config.gemini.api_key)?;
        let client = GeminiClient::new(credential, &config.gemini)?;
        tracing::debug!("Initialized assistant with model {}", client.model());
        Ok(Self::with_model(Box::new(client), config))
    }

    /// Build an assistant around any model implementation.
    pub fn with_model(model: Box<dyn GenerativeModel>, config: &Config) -> Self {
        Self {
            model,
            generation: config.generation,
            limits: config.limits.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Analyze an image with a free-form instruction.
    ///
    /// Returns the model's text, or [`NO_RESPONSE`] when it produced none.
    pub async fn analyze_image(
        &self,
        image_path: impl AsRef<Path>,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let path = image_path.as_ref();
        let image = ImageInput::load(path, &self.limits).await?;
        let request = GenerateRequest::new(prompt, image, self.generation);

        let response = self.model.generate(&request).await?;
        match response.text.filter(|t| !t.is_empty()) {
            Some(text) => {
                tracing::info!(
                    "Generated {} chars for {:?} in {}ms ({} tokens)",
                    text.len(),
                    path,
                    response.latency_ms,
                    response
                        .tokens_used
                        .map_or_else(|| "unknown".to_string(), |t| t.to_string())
                );
                Ok(text)
            }
            None => {
                tracing::warn!(
                    "Model {} returned no text for {:?} (finish reason: {})",
                    response.model,
                    path,
                    response.finish_reason.as_deref().unwrap_or("unknown")
                );
                Ok(NO_RESPONSE.to_string())
            }
        }
    }

    /// Explain a diagram or chart.
    pub async fn explain_diagram(
        &self,
        image_path: impl AsRef<Path>,
    ) -> Result<DiagramExplanation, GenerationError> {
        let path = image_path.as_ref();
        let explanation = self.analyze_image(path, prompts::EXPLAIN_DIAGRAM).await?;
        Ok(DiagramExplanation {
            explanation,
            image_path: path.to_path_buf(),
        })
    }

    /// Generate a three-question multiple-choice quiz about an image.
    pub async fn generate_quiz(
        &self,
        image_path: impl AsRef<Path>,
        difficulty: Difficulty,
    ) -> Result<Quiz, GenerationError> {
        let path = image_path.as_ref();
        let quiz_content = self
            .analyze_image(path, &prompts::generate_quiz(difficulty))
            .await?;
        Ok(Quiz {
            quiz_content,
            difficulty,
            image_path: path.to_path_buf(),
        })
    }

    /// Identify the educational concepts in an image.
    ///
    /// The concepts come back as the model's raw text.
    pub async fn identify_key_concepts(
        &self,
        image_path: impl AsRef<Path>,
    ) -> Result<KeyConcepts, GenerationError> {
        let path = image_path.as_ref();
        let concepts = self
            .analyze_image(path, prompts::IDENTIFY_KEY_CONCEPTS)
            .await?;
        Ok(KeyConcepts {
            concepts,
            image_path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerateResponse;
    use async_trait::async_trait;
    use image::{ImageBuffer, Rgb};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// A mock model that records every request it receives.
    ///
    /// Each call to `generate()` invokes the response factory with the current
    /// call index.
    struct MockModel {
        response_fn: Box<dyn Fn(u32) -> Result<GenerateResponse, GenerationError> + Send + Sync>,
        requests: Arc<Mutex<Vec<GenerateRequest>>>,
    }

    impl MockModel {
        fn new(
            response_fn: impl Fn(u32) -> Result<GenerateResponse, GenerationError> + Send + Sync + 'static,
        ) -> (Self, Arc<Mutex<Vec<GenerateRequest>>>) {
            let requests = Arc::new(Mutex::new(Vec::new()));
            let mock = Self {
                response_fn: Box::new(response_fn),
                requests: requests.clone(),
            };
            (mock, requests)
        }

        fn replying(text: Option<&str>) -> (Self, Arc<Mutex<Vec<GenerateRequest>>>) {
            let text = text.map(String::from);
            Self::new(move |_| Ok(response(text.clone())))
        }
    }

    #[async_trait]
    impl GenerativeModel for MockModel {
        fn name(&self) -> &str {
            "mock-vision"
        }

        async fn generate(
            &self,
            request: &GenerateRequest,
        ) -> Result<GenerateResponse, GenerationError> {
            let mut requests = self.requests.lock().unwrap();
            let index = requests.len() as u32;
            requests.push(request.clone());
            (self.response_fn)(index)
        }
    }

    fn response(text: Option<String>) -> GenerateResponse {
        GenerateResponse {
            text,
            model: "mock-vision".to_string(),
            finish_reason: Some("STOP".to_string()),
            tokens_used: Some(42),
            latency_ms: 5,
        }
    }

    fn assistant(mock: MockModel) -> VisualAssistant {
        VisualAssistant::with_model(Box::new(mock), &Config::default())
    }

    fn write_png(dir: &Path) -> PathBuf {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(4, 4, Rgb([10, 200, 30]));
        let path = dir.join("diagram.png");
        img.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_analyze_image_returns_model_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let (mock, requests) = MockModel::replying(Some("A green square."));

        let text = assistant(mock)
            .analyze_image(&path, "What can you tell me about this image?")
            .await
            .unwrap();
        assert_eq!(text, "A green square.");

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "What can you tell me about this image?");
        assert_eq!(requests[0].image.mime_type, "image/png");
        assert_eq!(requests[0].generation.max_output_tokens, 1024);
        assert!((requests[0].generation.temperature - 0.4).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_analyze_image_empty_text_returns_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());

        let (mock, _) = MockModel::replying(None);
        let text = assistant(mock).analyze_image(&path, "Describe").await.unwrap();
        assert_eq!(text, "No response generated from the model.");

        let (mock, _) = MockModel::replying(Some(""));
        let text = assistant(mock).analyze_image(&path, "Describe").await.unwrap();
        assert_eq!(text, NO_RESPONSE);
    }

    #[tokio::test]
    async fn test_analyze_image_missing_file_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jpg");
        let (mock, requests) = MockModel::replying(Some("unused"));

        let err = assistant(mock)
            .analyze_image(&missing, "Describe")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::ImageNotFound(_)));
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_image_rejects_oversized_file_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, vec![0u8; 1024 * 1024 + 1]).unwrap();
        let mut config = Config::default();
        config.limits.max_file_size_mb = 1;
        let (mock, requests) = MockModel::replying(Some("unused"));

        let err = VisualAssistant::with_model(Box::new(mock), &config)
            .analyze_image(&path, "Describe")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::FileTooLarge { max_mb: 1, .. }));
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_image_accepts_wide_panorama() {
        let dir = tempfile::tempdir().unwrap();
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(10_001, 1, Rgb([255, 255, 255]));
        let path = dir.path().join("panorama.png");
        img.save(&path).unwrap();
        let (mock, requests) = MockModel::replying(Some("A thin white line."));

        let text = assistant(mock).analyze_image(&path, "Describe").await.unwrap();
        assert_eq!(text, "A thin white line.");

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!((requests[0].image.width, requests[0].image.height), (10_001, 1));
    }

    #[tokio::test]
    async fn test_analyze_image_propagates_remote_fault() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let (mock, requests) = MockModel::new(|_| {
            Err(GenerationError::Remote {
                status: Some(503),
                message: "overloaded".to_string(),
            })
        });

        let err = assistant(mock).analyze_image(&path, "Describe").await.unwrap_err();
        assert!(matches!(err, GenerationError::Remote { status: Some(503), .. }));
        // No retry
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_explain_diagram_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let (mock, requests) = MockModel::replying(Some("It shows a cycle."));

        let result = assistant(mock).explain_diagram(&path).await.unwrap();
        assert_eq!(result.explanation, "It shows a cycle.");
        assert_eq!(result.image_path, path);
        assert_eq!(requests.lock().unwrap()[0].prompt, prompts::EXPLAIN_DIAGRAM);
    }

    #[tokio::test]
    async fn test_generate_quiz_keeps_difficulty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let (mock, requests) = MockModel::replying(Some("1. What color...?"));

        let quiz = assistant(mock)
            .generate_quiz(&path, Difficulty::Hard)
            .await
            .unwrap();
        assert_eq!(quiz.difficulty, Difficulty::Hard);
        assert_eq!(quiz.difficulty.as_str(), "hard");
        assert_eq!(quiz.image_path, path);
        assert!(requests.lock().unwrap()[0].prompt.contains("hard-level quiz"));
    }

    #[tokio::test]
    async fn test_identify_key_concepts_is_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let (mock, requests) = MockModel::replying(Some("1. Photosynthesis\n2. Chlorophyll"));

        let result = assistant(mock).identify_key_concepts(&path).await.unwrap();
        assert_eq!(result.concepts, "1. Photosynthesis\n2. Chlorophyll");
        assert_eq!(
            requests.lock().unwrap()[0].prompt,
            prompts::IDENTIFY_KEY_CONCEPTS
        );
    }

    #[tokio::test]
    async fn test_each_call_issues_one_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let (mock, requests) = MockModel::new(|i| Ok(response(Some(format!("answer {i}")))));
        let assistant = assistant(mock);

        assistant.explain_diagram(&path).await.unwrap();
        assistant.generate_quiz(&path, Difficulty::Easy).await.unwrap();
        let concepts = assistant.identify_key_concepts(&path).await.unwrap();

        assert_eq!(requests.lock().unwrap().len(), 3);
        assert_eq!(concepts.concepts, "answer 2");
    }

    #[test]
    fn test_new_without_credential_fails() {
        let mut config = Config::default();
        config.gemini.api_key = "${VISTA_TEST_KEY_THAT_IS_NEVER_SET}".to_string();

        let err = VisualAssistant::new(None, &config).err().unwrap();
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn test_new_with_explicit_key() {
        let mut config = Config::default();
        config.gemini.api_key = String::new();

        let assistant = VisualAssistant::new(Some("test-key"), &config).unwrap();
        assert_eq!(assistant.model_name(), "gemini-1.5-flash");
    }
}
