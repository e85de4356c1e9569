//! Structured logging field name constants for synoptic.
//!
//! All crates use these constants for consistent structured logging
//! fields, so a single `RUST_LOG` filter can slice a run by subsystem
//! or operation.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Terminal failures that abort the run |
//! | WARN  | Recoverable issue absorbed by the pipeline (failed fetch, bad model JSON) |
//! | INFO  | Lifecycle events, per-stage completions |
//! | DEBUG | Decision points, intermediate values |
//! | TRACE | Per-item iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "wiki", "inference", "pipeline", "source"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "wikipedia", "gemini", "topic_extractor"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "fetch", "extract", "generate", "embed_text"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Subject title being operated on.
pub const SUBJECT: &str = "subject";

/// Model name used for inference.
pub const MODEL: &str = "model";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of topics or embeddings produced by an operation.
pub const RESULT_COUNT: &str = "result_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
