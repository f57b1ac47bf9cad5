//! Internal linking recommendations
//!
//! Ranks every page of a [`Dataset`] against one reference page:
//!
//! 1. Resolve the reference URL to exactly one record
//! 2. Score every record with cosine similarity, scaled to 0-100 and
//!    rounded to two decimals
//! 3. Keep records at or above the threshold, never the reference itself
//! 4. Drop URLs matching the exclude pattern (literal or regex)
//! 5. Sort by score descending, then URL ascending
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): query types and entry points
//! - Internal implementation: the pipeline lives in internal.rs
//!
//! # Example
//!
//! ```
//! use mawile::dataset::{Dataset, PageRecord};
//! use mawile::recommend::{recommend, FilterCriteria};
//!
//! let dataset = Dataset::new(vec![
//!     PageRecord::new("/a", "Page A", vec![1.0, 0.0]),
//!     PageRecord::new("/b", "Page B", vec![1.0, 0.0]),
//!     PageRecord::new("/c", "Page C", vec![0.0, 1.0]),
//! ])
//! .unwrap();
//!
//! let ranked = recommend(&dataset, "/a", &FilterCriteria::new(50.0)).unwrap();
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0].url, "/b");
//! assert_eq!(ranked[0].similarity_score, 100.0);
//! ```

mod criteria;
mod internal;

pub use criteria::{DegeneratePolicy, FilterCriteria, UrlExclusion, MAX_THRESHOLD, MIN_THRESHOLD};

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::RecommendResult;

/// One ranked page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub url: String,
    pub title: String,
    /// Cosine similarity on a 0-100 scale, rounded to two decimals
    pub similarity_score: f64,
}

/// Ranked results plus the reference they were computed against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub reference_url: String,
    pub reference_title: String,
    pub candidates: Vec<ScoredCandidate>,
    /// URLs dropped by [`DegeneratePolicy::Skip`], in dataset order
    pub skipped: Vec<String>,
}

/// Rank pages similar to `reference_url`
///
/// Reads the dataset only; safe to call repeatedly and concurrently with
/// different criteria.
///
/// # Errors
/// - [`RecommendError::Configuration`](crate::error::RecommendError::Configuration) for invalid criteria
/// - [`RecommendError::Pattern`](crate::error::RecommendError::Pattern) for an invalid regex
/// - [`RecommendError::ReferenceNotFound`](crate::error::RecommendError::ReferenceNotFound) /
///   [`RecommendError::AmbiguousReference`](crate::error::RecommendError::AmbiguousReference)
/// - [`RecommendError::DegenerateVector`](crate::error::RecommendError::DegenerateVector) for a
///   zero-magnitude reference, or candidate under [`DegeneratePolicy::Reject`]
pub fn recommend(
    dataset: &Dataset,
    reference_url: &str,
    criteria: &FilterCriteria,
) -> RecommendResult<Vec<ScoredCandidate>> {
    recommend_report(dataset, reference_url, criteria).map(|report| report.candidates)
}

/// Like [`recommend`], but also returns the reference title and skipped URLs
pub fn recommend_report(
    dataset: &Dataset,
    reference_url: &str,
    criteria: &FilterCriteria,
) -> RecommendResult<Recommendations> {
    internal::run(dataset, reference_url, criteria)
}
