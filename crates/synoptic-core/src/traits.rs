//! Core traits for synoptic abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability. Each
//! pipeline run receives its backends as injected trait objects; no
//! process-wide client state exists.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ArticleContent, Vector};

// =============================================================================
// CONTENT SOURCE TRAITS
// =============================================================================

/// Source of knowledge-base article content, looked up by exact title.
///
/// Every lookup outcome is data: failures map to [`ArticleContent`]
/// variants rather than errors, because the pipeline carries them
/// downstream as content.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch the plain-text content for one subject title.
    async fn fetch(&self, subject: &str) -> ArticleContent;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Backend for generating text embeddings.
///
/// One sentence per call; the pipeline never batches.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Generate an embedding for the given text.
    async fn embed_text(&self, text: &str) -> Result<Vector>;

    /// Get the expected dimension of embedding vectors.
    fn dimension(&self) -> usize;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Combined inference backend supporting both embedding and generation.
#[async_trait]
pub trait InferenceBackend: EmbeddingBackend + GenerationBackend {
    /// Check if the backend is available and responding.
    async fn health_check(&self) -> Result<bool>;
}
