//! mawile - internal linking recommendations from page embeddings
//!
//! Pick one page of a site as the anchor and rank every other page by the
//! cosine similarity of its content embedding.

pub mod config;
pub mod dataset;
pub mod error;
pub mod paths;
pub mod recommend;
pub mod similarity;

// Re-export commonly used types
pub use dataset::{Dataset, PageRecord};
pub use error::{RecommendError, SimilarityError};
pub use recommend::{recommend, recommend_report, FilterCriteria, ScoredCandidate};
pub use similarity::{cosine_similarity, similarity_all};
