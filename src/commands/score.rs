//! Score command - raw similarity of every page to a reference page
//!
//! No threshold, exclusion, or sorting: one row per page in dataset order,
//! the reference page included.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use mawile::similarity::{similarity_all, to_percent_score};

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    url: &'a str,
    similarity: f64,
    similarity_score: f64,
}

/// Execute score command
pub fn execute(dataset_path: &Path, url: &str, json: bool) -> Result<()> {
    let dataset = super::dataset::load(dataset_path)?;
    let reference = dataset.resolve(url)?;

    let candidates: Vec<(&str, &[f32])> = dataset
        .records()
        .iter()
        .map(|record| (record.url.as_str(), record.embedding.as_slice()))
        .collect();

    let scored = similarity_all(&reference.embedding, &candidates)
        .with_context(|| format!("Failed to score pages against {}", url))?;

    let rows: Vec<ScoreRow> = scored
        .into_iter()
        .map(|(url, similarity)| ScoreRow {
            url,
            similarity,
            similarity_score: to_percent_score(similarity),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Reference: {}\n", reference.url);
    for row in &rows {
        println!("{:>7.2}  {:>9.6}  {}", row.similarity_score, row.similarity, row.url);
    }

    Ok(())
}
