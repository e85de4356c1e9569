//! # synoptic-inference
//!
//! Gemini inference backend and topic extraction for the synoptic pipeline.
//!
//! This crate provides:
//! - [`GeminiBackend`]: generation + embedding over the Gemini API
//! - [`TopicExtractor`]: one-shot topic distillation with failure absorption
//! - A deterministic mock backend for tests (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use synoptic_inference::{GeminiBackend, TopicExtractor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(GeminiBackend::from_env().unwrap());
//!     let extractor = TopicExtractor::new(backend);
//!     let topics = extractor.extract("Article text...").await;
//!     println!("{:?}", topics);
//! }
//! ```

pub mod gemini;
pub mod topics;

// Mock inference backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use gemini::GeminiBackend;
pub use topics::TopicExtractor;
