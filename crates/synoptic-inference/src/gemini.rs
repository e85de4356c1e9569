//! Gemini inference backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use synoptic_core::{
    defaults, EmbeddingBackend, Error, GenerationBackend, InferenceBackend, Result, Vector,
};

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_URL: &str = defaults::GEMINI_BASE_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = defaults::GEN_MODEL;

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = defaults::EMBED_MODEL;

/// Default embedding dimension for text-embedding-004.
pub const DEFAULT_DIMENSION: usize = defaults::EMBED_DIMENSION;

/// Gemini inference backend.
///
/// One backend instance covers both generation (topic analysis) and
/// embedding, the same two capabilities the pipeline consumes through
/// the [`GenerationBackend`] and [`EmbeddingBackend`] traits.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    gen_model: String,
    embed_model: String,
    dimension: usize,
    embed_timeout_secs: u64,
    gen_timeout_secs: u64,
}

impl GeminiBackend {
    /// Create a new Gemini backend with default settings.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(
            api_key,
            DEFAULT_GEMINI_URL.to_string(),
            DEFAULT_GEN_MODEL.to_string(),
            DEFAULT_EMBED_MODEL.to_string(),
            DEFAULT_DIMENSION,
        )
    }

    /// Create a new Gemini backend with custom configuration.
    pub fn with_config(
        api_key: &str,
        base_url: String,
        gen_model: String,
        embed_model: String,
        dimension: usize,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("missing Gemini API key".to_string()));
        }

        let gen_timeout = std::env::var("SYNOPTIC_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::GEN_TIMEOUT_SECS);

        let embed_timeout = std::env::var("SYNOPTIC_EMBED_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::EMBED_TIMEOUT_SECS);

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key.trim())
                .map_err(|_| Error::Config("invalid Gemini API key".to_string()))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(gen_timeout))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing Gemini backend: url={}, gen={}, embed={}",
            base_url, gen_model, embed_model
        );

        Ok(Self {
            client,
            base_url,
            gen_model,
            embed_model,
            dimension,
            embed_timeout_secs: embed_timeout,
            gen_timeout_secs: gen_timeout,
        })
    }

    /// Create from environment variables. `GEMINI_API_KEY` is required.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| Error::Config("GEMINI_API_KEY is not set".to_string()))?;
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string());
        let gen_model =
            std::env::var("GEMINI_GEN_MODEL").unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());
        let embed_model = std::env::var("GEMINI_EMBED_MODEL")
            .unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string());
        let dimension = std::env::var("GEMINI_EMBED_DIM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_DIMENSION);

        Self::with_config(&api_key, base_url, gen_model, embed_model, dimension)
    }

    /// Set the generation model to use.
    pub fn set_gen_model(&mut self, model_name: String) {
        info!(
            "Switching generation model from {} to {}",
            self.gen_model, model_name
        );
        self.gen_model = model_name;
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Clone)]
struct ContentPart {
    text: String,
}

#[derive(Serialize, Deserialize, Clone)]
struct Content {
    parts: Vec<ContentPart>,
}

impl Content {
    fn from_text(text: &str) -> Self {
        Self {
            parts: vec![ContentPart {
                text: text.to_string(),
            }],
        }
    }
}

/// Request payload for `models/{model}:generateContent`.
#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Request payload for `models/{model}:embedContent`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest {
    model: String,
    content: Content,
    task_type: String,
    output_dimensionality: usize,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    #[instrument(skip(self, prompt), fields(subsystem = "inference", component = "gemini", op = "generate", model = %self.gen_model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();

        let request = GenerateRequest {
            contents: vec![Content::from_text(prompt)],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.gen_model
            ))
            .timeout(Duration::from_secs(self.gen_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let content = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or_else(|| Error::Inference("Empty response: no candidates".to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = content.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > 30000 {
            warn!(
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation operation"
            );
        }
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.gen_model
    }
}

#[async_trait]
impl EmbeddingBackend for GeminiBackend {
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "gemini", op = "embed_text", model = %self.embed_model))]
    async fn embed_text(&self, text: &str) -> Result<Vector> {
        let start = Instant::now();

        let request = EmbedRequest {
            model: format!("models/{}", self.embed_model),
            content: Content::from_text(text),
            task_type: defaults::EMBED_TASK_TYPE.to_string(),
            output_dimensionality: self.dimension,
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:embedContent",
                self.base_url, self.embed_model
            ))
            .timeout(Duration::from_secs(self.embed_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse response: {}", e)))?;

        let vector = Vector::from(result.embedding.values);
        let elapsed = start.elapsed().as_millis() as u64;

        debug!(
            result_count = vector.len(),
            duration_ms = elapsed,
            "Embedding complete"
        );
        if elapsed > 5000 {
            warn!(duration_ms = elapsed, slow = true, "Slow embedding operation");
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.embed_model
    }
}

#[async_trait]
impl InferenceBackend for GeminiBackend {
    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => {
                if resp.status().is_success() {
                    info!("Gemini health check passed");
                    Ok(true)
                } else {
                    warn!("Gemini health check failed: {}", resp.status());
                    Ok(false)
                }
            }
            Err(e) => {
                warn!("Gemini health check error: {}", e);
                Ok(false)
            }
        }
    }
}
