//! Mock inference backend for deterministic testing.
//!
//! Implements the core backend traits with deterministic embeddings and
//! canned generation responses, plus a call log so tests can assert on
//! call counts (e.g. "empty input makes no generation call").

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use synoptic_core::{
    defaults, EmbeddingBackend, Error, GenerationBackend, InferenceBackend, Result, Vector,
};

/// Mock inference backend for testing.
#[derive(Clone)]
pub struct MockInferenceBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    dimension: usize,
    fixed_responses: HashMap<String, String>,
    default_response: String,
    failure_rate: f64,
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            dimension: defaults::EMBED_DIMENSION,
            fixed_responses: HashMap::new(),
            default_response: "Mock response".to_string(),
            failure_rate: 0.0,
        }
    }
}

impl MockInferenceBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        Arc::make_mut(&mut self.config).dimension = dimension;
        self
    }

    /// Set a fixed response for generation requests.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Add a response mapping for specific inputs.
    pub fn with_response_mapping(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(input.into(), output.into());
        self
    }

    /// Set failure rate (0.0 - 1.0) for testing error handling.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get number of embed calls.
    pub fn embed_call_count(&self) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == "embed")
            .count()
    }

    /// Get number of generation calls.
    pub fn generate_call_count(&self) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == "generate")
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        if self.config.failure_rate > 0.0 {
            rand::thread_rng().gen::<f64>() < self.config.failure_rate
        } else {
            false
        }
    }
}

impl Default for MockInferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockInferenceBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.log_call("generate", prompt);

        if self.should_fail() {
            return Err(Error::Inference("Simulated failure".to_string()));
        }

        if let Some(response) = self.config.fixed_responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-gen"
    }
}

#[async_trait]
impl EmbeddingBackend for MockInferenceBackend {
    async fn embed_text(&self, text: &str) -> Result<Vector> {
        self.log_call("embed", text);

        if self.should_fail() {
            return Err(Error::Embedding("Simulated failure".to_string()));
        }

        Ok(Vector::from(MockEmbeddingGenerator::generate(
            text,
            self.config.dimension,
        )))
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn model_name(&self) -> &str {
        "mock-embed"
    }
}

#[async_trait]
impl InferenceBackend for MockInferenceBackend {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Mock embedding generator with deterministic output.
pub struct MockEmbeddingGenerator;

impl MockEmbeddingGenerator {
    /// Generate a deterministic embedding from text.
    ///
    /// Uses character-based hashing for reproducibility. The same text
    /// will always produce the same embedding.
    pub fn generate(text: &str, dimension: usize) -> Vec<f32> {
        let mut vec = vec![0.0; dimension];

        for (i, c) in text.chars().enumerate() {
            let idx = (c as usize + i) % dimension;
            vec[idx] += 0.1;
        }

        Self::normalize(&mut vec);
        vec
    }

    fn normalize(vec: &mut [f32]) {
        let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            vec.iter_mut().for_each(|x| *x /= magnitude);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_embed() {
        let backend = MockInferenceBackend::new().with_dimension(128);

        let embedding = backend.embed_text("test").await.unwrap();
        assert_eq!(embedding.len(), 128);
    }

    #[tokio::test]
    async fn test_mock_backend_default_dimension() {
        let backend = MockInferenceBackend::new();

        let embedding = backend.embed_text("The sky is blue.").await.unwrap();
        assert_eq!(embedding.len(), 768);
        assert_eq!(backend.dimension(), 768);
    }

    #[tokio::test]
    async fn test_mock_backend_deterministic() {
        let backend = MockInferenceBackend::new();

        let e1 = backend.embed_text("quantum computing").await.unwrap();
        let e2 = backend.embed_text("quantum computing").await.unwrap();

        assert_eq!(e1, e2, "Embeddings should be deterministic");
    }

    #[tokio::test]
    async fn test_mock_backend_generate() {
        let backend = MockInferenceBackend::new().with_fixed_response("Custom response");

        let response = backend.generate("test prompt").await.unwrap();
        assert_eq!(response, "Custom response");
    }

    #[tokio::test]
    async fn test_mock_backend_response_mapping() {
        let backend = MockInferenceBackend::new()
            .with_response_mapping("hello", "world")
            .with_response_mapping("foo", "bar");

        assert_eq!(backend.generate("hello").await.unwrap(), "world");
        assert_eq!(backend.generate("foo").await.unwrap(), "bar");
    }

    #[tokio::test]
    async fn test_mock_backend_call_logging() {
        let backend = MockInferenceBackend::new();

        backend.embed_text("text1").await.unwrap();
        backend.embed_text("text2").await.unwrap();
        backend.generate("prompt").await.unwrap();

        assert_eq!(backend.embed_call_count(), 2);
        assert_eq!(backend.generate_call_count(), 1);

        let calls = backend.get_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].input, "text1");
    }

    #[tokio::test]
    async fn test_mock_backend_failure_simulation() {
        let backend = MockInferenceBackend::new().with_failure_rate(1.0);

        assert!(backend.embed_text("test").await.is_err());
        assert!(backend.generate("test").await.is_err());
    }

    #[tokio::test]
    async fn test_clones_share_call_log() {
        let backend = MockInferenceBackend::new();
        let clone = backend.clone();

        clone.generate("prompt").await.unwrap();
        assert_eq!(backend.generate_call_count(), 1);
    }

    #[test]
    fn test_embedding_generator_deterministic() {
        let e1 = MockEmbeddingGenerator::generate("test", 256);
        let e2 = MockEmbeddingGenerator::generate("test", 256);
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_embedding_generator_normalized() {
        let embedding = MockEmbeddingGenerator::generate("test", 128);
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.01, "Should be normalized");
    }
}
