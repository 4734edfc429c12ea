//! Shared retriever over the knowledge corpus.
//!
//! Queries read an `Arc` snapshot of the current index; `rebuild` builds a new
//! index outside the lock and swaps it in, so in-flight queries keep the old
//! corpus and never observe a half-built one.

use std::sync::{Arc, RwLock};

use helpline_types::knowledge::{KnowledgeDocument, KnowledgeMatch};

use super::tfidf::TfIdfIndex;

pub struct SimilarityRetriever {
    index: RwLock<Arc<TfIdfIndex>>,
    min_score: f64,
}

impl SimilarityRetriever {
    /// Retriever with an empty corpus.
    pub fn new(min_score: f64) -> Self {
        Self {
            index: RwLock::new(Arc::new(TfIdfIndex::default())),
            min_score,
        }
    }

    pub fn with_documents(documents: Vec<KnowledgeDocument>, min_score: f64) -> Self {
        let retriever = Self::new(min_score);
        retriever.rebuild(documents);
        retriever
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Replace the corpus. Returns the new document count.
    pub fn rebuild(&self, documents: Vec<KnowledgeDocument>) -> usize {
        let built = Arc::new(TfIdfIndex::build(documents));
        let count = built.len();
        let vocabulary = built.vocabulary_size();
        let mut guard = self.index.write().unwrap_or_else(|e| e.into_inner());
        *guard = built;
        tracing::info!(documents = count, vocabulary, "knowledge index rebuilt");
        count
    }

    /// Current index snapshot.
    pub fn snapshot(&self) -> Arc<TfIdfIndex> {
        self.index
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn document_names(&self) -> Vec<String> {
        self.snapshot()
            .documents()
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }

    /// Best document scoring at least `min_score`, if any.
    pub fn query(&self, text: &str) -> Option<KnowledgeMatch> {
        let index = self.snapshot();
        let (idx, score) = index.best_match(text)?;
        if score < self.min_score {
            tracing::debug!(score, min_score = self.min_score, "best match below threshold");
            return None;
        }
        let doc = &index.documents()[idx];
        tracing::debug!(document = %doc.name, score, "knowledge match");
        Some(KnowledgeMatch {
            name: doc.name.clone(),
            text: doc.text.clone(),
            score,
        })
    }

    /// Text of the best match, or an empty string.
    pub fn search_snippet(&self, text: &str) -> String {
        self.query(text).map(|m| m.text).unwrap_or_default()
    }
}
