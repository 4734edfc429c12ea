//! Knowledge-base retrieval: TF-IDF index plus a swappable retriever.

pub mod retriever;
pub mod stop_words;
pub mod tfidf;

pub use retriever::SimilarityRetriever;
pub use tfidf::TfIdfIndex;
