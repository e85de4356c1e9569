//! Data model for the synoptic pipeline.
//!
//! Everything here is plain in-memory data passed forward between the
//! pipeline stages: subjects in, article content, extracted topics, and
//! embedding vectors out. Nothing is persisted.

use serde::{Deserialize, Serialize};

// =============================================================================
// SUBJECT
// =============================================================================

/// One input identifier naming a Wikipedia article to process.
///
/// Read from the designated column of the tabular input, consumed once
/// by the content fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject(pub String);

impl Subject {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Subject {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// ARTICLE CONTENT
// =============================================================================

/// Fetched article text, or a structured failure placeholder.
///
/// All failure variants are recoverable at the pipeline level: they render
/// to human-readable error text (see [`ArticleContent::render`]) and flow
/// downstream as ordinary content in place of the article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleContent {
    /// Full plain-text article body.
    Text(String),
    /// No article exists under the requested title.
    NotFound { subject: String },
    /// The title resolved to a disambiguation page. Carries up to
    /// [`crate::defaults::AMBIGUOUS_CANDIDATES`] alternative titles.
    Ambiguous {
        subject: String,
        candidates: Vec<String>,
    },
    /// Transport-level failure talking to the wiki service.
    NetworkError,
}

impl ArticleContent {
    /// True for any variant other than `Text`.
    pub fn is_failure(&self) -> bool {
        !matches!(self, ArticleContent::Text(_))
    }

    /// The text that flows downstream: the article body for `Text`,
    /// the rendered error message for failure variants.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ArticleContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArticleContent::Text(body) => write!(f, "{}", body),
            ArticleContent::NotFound { subject } => {
                write!(
                    f,
                    "Error: The page '{}' was not found on Wikipedia.",
                    subject
                )
            }
            ArticleContent::Ambiguous {
                subject,
                candidates,
            } => {
                write!(
                    f,
                    "Error: '{}' is ambiguous. Try one of these:\n - {}",
                    subject,
                    candidates.join("\n - ")
                )
            }
            ArticleContent::NetworkError => {
                write!(
                    f,
                    "Error: A network problem occurred. Please check your connection."
                )
            }
        }
    }
}

// =============================================================================
// TOPIC
// =============================================================================

/// One extracted (summary sentence, importance score) pair.
///
/// `importance` is 0–100 with 100 the single most central fact about the
/// subject. Parsed from untrusted model output — use [`Topic::from_json`]
/// to enforce the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub sentence: String,
    pub importance: u8,
}

impl Topic {
    /// Validate a single model-returned JSON object against the topic
    /// schema: `sentence` a non-empty string, `importance` an integer in
    /// [0, 100]. Returns `None` for anything malformed so callers can
    /// drop bad entries individually.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let sentence = value.get("sentence")?.as_str()?.trim();
        if sentence.is_empty() {
            return None;
        }
        let importance = value.get("importance")?.as_u64()?;
        if importance > 100 {
            return None;
        }
        Some(Self {
            sentence: sentence.to_string(),
            importance: importance as u8,
        })
    }
}

/// Ordered topic list for one subject, as returned by the model.
pub type TopicList = Vec<Topic>;

// =============================================================================
// VECTOR / EMBEDDING
// =============================================================================

/// A fixed-dimensionality embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector(Vec<f32>);

impl Vector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f32>> for Vector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// One topic sentence together with its embedding, in pipeline order.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceEmbedding {
    pub sentence: String,
    pub vector: Vector,
}
