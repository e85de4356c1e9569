//! # synoptic-pipeline
//!
//! Orchestration for the synoptic batch pipeline.
//!
//! One run: load subject titles from CSV, fetch each Wikipedia article,
//! distill each into ranked topic sentences, flatten the per-subject
//! lists, and embed a bounded prefix of the flattened sentences. Results
//! live in memory for the duration of the run; console output is the
//! only persisted artifact.

pub mod pipeline;
pub mod source;

pub use pipeline::{Pipeline, PipelineRun};
pub use source::SubjectReader;
