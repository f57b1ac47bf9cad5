//! Page records and the read-only dataset they are ranked from

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, RecommendResult};

/// One page of the site
///
/// Titles are expected to be normalized already (separators and brand
/// suffixes stripped). Any extra columns end up in `metadata` and pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(alias = "URL", alias = "Url")]
    pub url: String,

    #[serde(alias = "Title")]
    pub title: String,

    pub embedding: Vec<f32>,

    #[serde(flatten, default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            embedding,
            metadata: serde_json::Map::new(),
        }
    }

    /// Attach a pass-through metadata column
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Ordered collection of pages sharing one embedding dimensionality
///
/// Constructed once and treated as read-only by every query. URL uniqueness
/// is checked when a reference is resolved, so a dataset with duplicate URLs
/// can still be inspected with [`Dataset::duplicate_urls`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PageRecord>,
    dimension: Option<usize>,
}

impl Dataset {
    /// Build a dataset, validating embeddings
    ///
    /// # Errors
    /// [`RecommendError::Dataset`] if an embedding is empty, holds a
    /// non-finite component, or differs in length from the first record.
    pub fn new(records: Vec<PageRecord>) -> RecommendResult<Self> {
        let mut dimension = None;

        for (row, record) in records.iter().enumerate() {
            if record.embedding.is_empty() {
                return Err(RecommendError::dataset(format!(
                    "row {} ({}) has an empty embedding",
                    row, record.url
                )));
            }

            if let Some(position) = record.embedding.iter().position(|x| !x.is_finite()) {
                return Err(RecommendError::dataset(format!(
                    "row {} ({}) has a non-finite embedding value at index {}",
                    row, record.url, position
                )));
            }

            match dimension {
                None => dimension = Some(record.embedding.len()),
                Some(expected) if expected != record.embedding.len() => {
                    return Err(RecommendError::dataset(format!(
                        "row {} ({}) has {} dimensions, expected {}",
                        row,
                        record.url,
                        record.embedding.len(),
                        expected
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Self { records, dimension })
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimensionality, `None` for an empty dataset
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Resolve a reference URL to exactly one record
    ///
    /// # Errors
    /// - [`RecommendError::ReferenceNotFound`] if no record has the URL
    /// - [`RecommendError::AmbiguousReference`] if several records share it
    pub fn resolve(&self, url: &str) -> RecommendResult<&PageRecord> {
        let mut matches = self.records.iter().filter(|r| r.url == url);

        let first = matches
            .next()
            .ok_or_else(|| RecommendError::ReferenceNotFound(url.to_string()))?;

        let extra = matches.count();
        if extra > 0 {
            return Err(RecommendError::AmbiguousReference {
                url: url.to_string(),
                count: extra + 1,
            });
        }

        Ok(first)
    }

    /// URLs that appear more than once, with their counts, sorted by URL
    pub fn duplicate_urls(&self) -> Vec<(&str, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.url.as_str()).or_default() += 1;
        }

        counts.into_iter().filter(|(_, count)| *count > 1).collect()
    }
}
