//! Centralized default constants for the synoptic pipeline.
//!
//! **This module is the single source of truth** for all shared default
//! values. The crates reference these constants instead of defining their
//! own magic numbers.

// =============================================================================
// SOURCE INPUT
// =============================================================================

/// Default CSV column holding the subject titles.
pub const SUBJECT_COLUMN: &str = "Page";

/// Default maximum number of subject rows read from the input file.
///
/// Also bounds the embedding loop: at most this many flattened topic
/// sentences are embedded per run.
pub const ROW_LIMIT: usize = 100;

// =============================================================================
// WIKIPEDIA
// =============================================================================

/// Default MediaWiki Action API endpoint (English Wikipedia).
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// User-Agent sent on every wiki request, per MediaWiki API etiquette.
pub const WIKIPEDIA_USER_AGENT: &str =
    concat!("synoptic/", env!("CARGO_PKG_VERSION"), " (topic distillation pipeline)");

/// Maximum candidate titles carried in an ambiguous-lookup result.
pub const AMBIGUOUS_CANDIDATES: usize = 5;

/// Timeout for wiki content requests in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model for topic analysis.
pub const GEN_MODEL: &str = "gemini-2.0-flash";

/// Default embedding model.
pub const EMBED_MODEL: &str = "text-embedding-004";

/// Default embedding vector dimension requested from the embedding model.
pub const EMBED_DIMENSION: usize = 768;

/// Task-type hint sent with every embedding request.
pub const EMBED_TASK_TYPE: &str = "SEMANTIC_SIMILARITY";

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Timeout for embedding requests in seconds.
pub const EMBED_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// TOPIC EXTRACTION
// =============================================================================

/// Characters of article text sent to the generation model. Text past
/// this bound is truncated before the prompt is built.
pub const ANALYSIS_TEXT_LIMIT: usize = 8000;

/// Characters of a raw model response included in failure logs.
pub const RESPONSE_PREVIEW: usize = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_dimension_is_standard() {
        let valid_dims = [384, 768, 1536];
        assert!(
            valid_dims.contains(&EMBED_DIMENSION),
            "EMBED_DIMENSION {} should be a standard embedding dimension",
            EMBED_DIMENSION
        );
    }

    #[test]
    fn limits_are_consistent() {
        const {
            assert!(RESPONSE_PREVIEW < ANALYSIS_TEXT_LIMIT);
            assert!(AMBIGUOUS_CANDIDATES > 0);
            assert!(ROW_LIMIT > 0);
        }
    }

    #[test]
    fn user_agent_names_the_tool() {
        assert!(WIKIPEDIA_USER_AGENT.starts_with("synoptic/"));
    }
}
