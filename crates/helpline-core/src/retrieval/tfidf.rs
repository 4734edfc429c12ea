//! Sparse TF-IDF vectors with cosine scoring.
//!
//! Term weights are raw counts times a smoothed inverse document frequency,
//! `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized, so the
//! dot product of two vectors is their cosine similarity.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use helpline_types::knowledge::KnowledgeDocument;

use super::stop_words::is_stop_word;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Lowercased word tokens of two or more characters, stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

type SparseVector = HashMap<usize, f64>;

/// Immutable index over a fixed corpus.
#[derive(Debug, Default)]
pub struct TfIdfIndex {
    documents: Vec<KnowledgeDocument>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl TfIdfIndex {
    pub fn build(documents: Vec<KnowledgeDocument>) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(&d.text)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(tokenized.len());

        for tokens in &tokenized {
            let mut tf: HashMap<usize, usize> = HashMap::new();
            for token in tokens {
                let next = vocabulary.len();
                let id = *vocabulary.entry(token.clone()).or_insert(next);
                if id == doc_freq.len() {
                    doc_freq.push(0);
                }
                *tf.entry(id).or_insert(0) += 1;
            }
            for id in tf.keys() {
                doc_freq[*id] += 1;
            }
            counts.push(tf);
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|tf| {
                let weighted = tf
                    .into_iter()
                    .map(|(id, c)| (id, c as f64 * idf[id]))
                    .collect();
                normalize(weighted)
            })
            .collect();

        Self {
            documents,
            vocabulary,
            idf,
            vectors,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[KnowledgeDocument] {
        &self.documents
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vectorize a query; terms outside the corpus vocabulary are dropped.
    fn vectorize(&self, text: &str) -> SparseVector {
        let mut tf: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&id) = self.vocabulary.get(&token) {
                *tf.entry(id).or_insert(0.0) += 1.0;
            }
        }
        let weighted = tf
            .into_iter()
            .map(|(id, c)| (id, c * self.idf[id]))
            .collect();
        normalize(weighted)
    }

    /// Cosine similarity of `query` against every document, in corpus order.
    pub fn score_all(&self, query: &str) -> Vec<f64> {
        let q = self.vectorize(query);
        self.vectors.iter().map(|d| dot(&q, d)).collect()
    }

    /// Highest-scoring document index and its score. Ties go to the earliest
    /// document. `None` only for an empty corpus.
    pub fn best_match(&self, query: &str) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, score) in self.score_all(query).into_iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }
        best
    }
}

fn normalize(mut v: SparseVector) -> SparseVector {
    let norm = v.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in v.values_mut() {
            *w /= norm;
        }
    }
    v
}

fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(id, w)| large.get(id).map(|x| w * x))
        .sum()
}
