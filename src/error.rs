//! Error types for similarity scoring and recommendation queries

use thiserror::Error;

/// Failures of a single cosine similarity computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    /// One of the vectors has no components
    #[error("Cannot compare empty vectors")]
    EmptyVector,

    /// Vectors differ in length
    #[error("Vectors must have same dimension: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// One of the vectors has zero magnitude, so the angle is undefined
    #[error("Vector has zero magnitude")]
    DegenerateVector,

    /// Arithmetic overflowed or an input carried NaN/infinity
    #[error("Similarity is not a finite number")]
    NonFinite,
}

/// Failures of a recommendation query
///
/// All variants are local to one query: the dataset is never modified and
/// nothing is retried.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// No record carries the reference URL
    #[error("Reference page not found: {0}")]
    ReferenceNotFound(String),

    /// Several records share the reference URL
    #[error("Reference URL {url} matches {count} pages; URLs must be unique")]
    AmbiguousReference { url: String, count: usize },

    /// Criteria out of range or otherwise unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Exclude pattern is not a valid regular expression
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reference or candidate embedding has zero magnitude
    #[error("Embedding for {url} has zero magnitude; cosine similarity is undefined")]
    DegenerateVector { url: String },

    /// Any other scoring failure for a specific record
    #[error("Failed to score {url}: {source}")]
    Similarity {
        url: String,
        #[source]
        source: SimilarityError,
    },

    /// Records violate the dataset invariants
    #[error("Invalid dataset: {0}")]
    Dataset(String),
}

impl RecommendError {
    /// Attach the record URL to a similarity failure
    pub fn from_similarity(url: impl Into<String>, err: SimilarityError) -> Self {
        let url = url.into();
        match err {
            SimilarityError::DegenerateVector => Self::DegenerateVector { url },
            source => Self::Similarity { url, source },
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }
}

/// Result type for recommendation queries
pub type RecommendResult<T> = Result<T, RecommendError>;
