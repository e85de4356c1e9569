//! Topic extraction from article text via a generation backend.
//!
//! One generation call per article, no retry. Failures are absorbed at
//! the per-subject level: a service error, a non-JSON response, or empty
//! input all yield `None` and the pipeline moves on to the next subject.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use synoptic_core::{defaults, GenerationBackend, Topic, TopicList};

/// Extracts ranked topic sentences from article text.
pub struct TopicExtractor {
    backend: Arc<dyn GenerationBackend>,
}

impl TopicExtractor {
    /// Create an extractor over the given generation backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Extract topics from `text`.
    ///
    /// Returns `None` when the input is empty/whitespace (no backend
    /// call is made), when the backend errors, or when the response is
    /// not a JSON array. Individually malformed entries inside a valid
    /// array are dropped; valid siblings survive.
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "topic_extractor", op = "extract", model = %self.backend.model_name()))]
    pub async fn extract(&self, text: &str) -> Option<TopicList> {
        if text.trim().is_empty() {
            warn!("Text content is empty, skipping analysis");
            return None;
        }

        let prompt = build_prompt(text);

        let raw = match self.backend.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Topic analysis failed");
                return None;
            }
        };

        match parse_topics(&raw) {
            Ok(topics) => {
                debug!(result_count = topics.len(), "Topic extraction complete");
                Some(topics)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    raw_preview = truncate_chars(&raw, defaults::RESPONSE_PREVIEW),
                    "Topic analysis returned invalid JSON"
                );
                None
            }
        }
    }
}

/// Build the fixed analysis prompt around (at most) the first
/// [`defaults::ANALYSIS_TEXT_LIMIT`] characters of the article text.
fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following Wikipedia article text. Your task is to identify the most important topics and key information.

For each topic you identify, provide two things:
1. 'sentence': A very succinct, single sentence summary. Every single word must be useful; remove all fluff.
2. 'importance': A score from 0 (useless) to 100 (the single most important piece of information) indicating how important the topic is to understanding the overall subject.

Format your entire response as a single valid JSON array of objects. Do not include any text or formatting outside of this JSON array.

Example format:
[
  {{"sentence": "The subject was born in a specific, noteworthy location.", "importance": 85}},
  {{"sentence": "A major discovery or achievement is attributed to the subject.", "importance": 95}}
]

Here is the text to analyze:
---
{}"#,
        truncate_chars(text, defaults::ANALYSIS_TEXT_LIMIT)
    )
}

/// Truncate to the first `limit` characters on a char boundary.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Strip surrounding Markdown code fences (```json / ```) if present.
fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parse a model response into topics, dropping malformed entries
/// individually. Errors only when the response is not a JSON array.
fn parse_topics(raw: &str) -> Result<TopicList, serde_json::Error> {
    let cleaned = strip_code_fences(raw);
    let entries: Vec<serde_json::Value> = serde_json::from_str(cleaned)?;

    let total = entries.len();
    let topics: TopicList = entries.iter().filter_map(Topic::from_json).collect();
    if topics.len() < total {
        debug!(
            dropped = total - topics.len(),
            "Dropped malformed topic entries"
        );
    }
    Ok(topics)
}
