//! Dataset file loading for the CLI
//!
//! Files hold already-prepared page records: a JSON array, or JSON Lines
//! when the extension is `.jsonl`. Embeddings must already be numeric arrays.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use mawile::dataset::{Dataset, PageRecord};

/// Read and validate a dataset file
pub fn load(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {:?}", path))?;

    let records = if is_json_lines(path) {
        parse_json_lines(&content).with_context(|| format!("Failed to parse dataset: {:?}", path))?
    } else {
        serde_json::from_str::<Vec<PageRecord>>(&content)
            .with_context(|| format!("Failed to parse dataset: {:?}", path))?
    };

    let dataset = Dataset::new(records).with_context(|| format!("Invalid dataset: {:?}", path))?;

    debug!(
        path = %path.display(),
        pages = dataset.len(),
        dimension = ?dataset.dimension(),
        "Loaded dataset"
    );

    Ok(dataset)
}

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
}

fn parse_json_lines(content: &str) -> Result<Vec<PageRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid record on line {}", number + 1))
        })
        .collect()
}
