//! Pipeline orchestrator: fetch → extract → flatten → embed.
//!
//! Strictly sequential, single pass. Error containment follows a fixed
//! policy per stage:
//! - source loading is terminal (`?`),
//! - fetch failures become error text and flow downstream as content,
//! - extraction failures absorb to `None` for that subject,
//! - embedding failures propagate and abort the rest of the run.

use std::sync::Arc;

use tracing::{info, warn};

use synoptic_core::{
    ArticleContent, ArticleSource, EmbeddingBackend, GenerationBackend, Result,
    SentenceEmbedding, Subject, Topic, TopicList,
};
use synoptic_inference::TopicExtractor;

use crate::source::SubjectReader;

/// One pipeline run's backends and bounds, injected at construction.
pub struct Pipeline {
    articles: Arc<dyn ArticleSource>,
    extractor: TopicExtractor,
    embedder: Arc<dyn EmbeddingBackend>,
    row_limit: usize,
}

/// In-memory result of a completed run.
#[derive(Debug)]
pub struct PipelineRun {
    /// Subjects in input order.
    pub subjects: Vec<Subject>,
    /// One entry per subject, same order.
    pub articles: Vec<ArticleContent>,
    /// How many of those fetches failed (and flowed on as error text).
    pub fetch_failures: usize,
    /// Total topics across all subjects (failed extractions count zero).
    pub topic_count: usize,
    /// Ordered embeddings for the first `row_limit` flattened sentences.
    pub embeddings: Vec<SentenceEmbedding>,
}

impl Pipeline {
    /// Create a pipeline over the given backends. `row_limit` bounds the
    /// embedding loop.
    pub fn new(
        articles: Arc<dyn ArticleSource>,
        generator: Arc<dyn GenerationBackend>,
        embedder: Arc<dyn EmbeddingBackend>,
        row_limit: usize,
    ) -> Self {
        Self {
            articles,
            extractor: TopicExtractor::new(generator),
            embedder,
            row_limit,
        }
    }

    /// Run the full pipeline over the subjects in `reader`.
    ///
    /// A source-loading error returns before any fetch is made. An
    /// embedding error aborts mid-loop; embeddings computed up to that
    /// point are dropped with the run.
    pub async fn run(&self, reader: &SubjectReader) -> Result<PipelineRun> {
        let subjects = reader.load()?;
        info!(result_count = subjects.len(), "Pipeline start");

        // Stage 1: fetch, one article per subject, in order. Failures are
        // recorded as their error text, not filtered out — the extractor
        // will see that text as content.
        let mut articles = Vec::with_capacity(subjects.len());
        let mut fetch_failures = 0;
        for subject in &subjects {
            let content = self.articles.fetch(subject.as_str()).await;
            if content.is_failure() {
                fetch_failures += 1;
                warn!(subject = %subject, "Fetch failed; error text flows downstream");
            }
            articles.push(content);
        }
        info!(
            result_count = articles.len(),
            fetch_failures, "Fetch stage complete"
        );

        // Stage 2: extract, in order. `None` marks a failed or skipped
        // extraction for that subject.
        let mut topic_lists: Vec<Option<TopicList>> = Vec::with_capacity(articles.len());
        for content in &articles {
            topic_lists.push(self.extractor.extract(&content.render()).await);
        }

        let topic_count: usize = topic_lists
            .iter()
            .map(|list| list.as_ref().map_or(0, |topics| topics.len()))
            .sum();
        info!(result_count = topic_count, "Topic extraction complete");

        // Stage 3: flatten in subject order, preserving intra-subject order.
        let flattened: Vec<Topic> = topic_lists.into_iter().flatten().flatten().collect();

        // Stage 4: embed a bounded prefix, clamped to what was actually
        // produced. Errors here are not absorbed.
        let embed_count = self.row_limit.min(flattened.len());
        let mut embeddings = Vec::with_capacity(embed_count);
        for topic in flattened.into_iter().take(embed_count) {
            let vector = self.embedder.embed_text(&topic.sentence).await?;
            embeddings.push(SentenceEmbedding {
                sentence: topic.sentence,
                vector,
            });
        }
        info!(result_count = embeddings.len(), "Embedding stage complete");

        Ok(PipelineRun {
            subjects,
            articles,
            fetch_failures,
            topic_count,
            embeddings,
        })
    }
}
