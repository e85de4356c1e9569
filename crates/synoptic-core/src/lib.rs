//! # synoptic-core
//!
//! Core types, traits, and abstractions for the synoptic pipeline.
//!
//! This crate provides:
//! - The shared error type and `Result` alias
//! - The pipeline data model (subjects, article content, topics, vectors)
//! - Pluggable backend traits for content fetching, generation, and embedding
//! - Centralized default constants
//! - Structured logging field constants

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

pub use error::{Error, Result};
pub use models::{ArticleContent, SentenceEmbedding, Subject, Topic, TopicList, Vector};
pub use traits::{ArticleSource, EmbeddingBackend, GenerationBackend, InferenceBackend};
