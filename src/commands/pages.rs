//! Pages command - list dataset pages so a reference can be picked

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Execute pages command
pub fn execute(dataset_path: &Path, json: bool) -> Result<()> {
    let dataset = super::dataset::load(dataset_path)?;
    let duplicates = dataset.duplicate_urls();

    if json {
        let result = serde_json::json!({
            "count": dataset.len(),
            "dimension": dataset.dimension(),
            "duplicates": duplicates
                .iter()
                .map(|(url, count)| serde_json::json!({ "url": url, "count": count }))
                .collect::<Vec<_>>(),
            "pages": dataset
                .records()
                .iter()
                .map(|r| serde_json::json!({ "url": r.url, "title": r.title }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match dataset.dimension() {
        Some(dimension) => println!("{} pages, {} dimensions\n", dataset.len(), dimension),
        None => {
            println!("Dataset is empty.");
            return Ok(());
        }
    }

    for record in dataset.records() {
        println!("{}  {}", record.url, record.title.dimmed());
    }

    if !duplicates.is_empty() {
        println!(
            "\n{} Duplicate URLs cannot be used as a reference:",
            "⚠️ ".yellow()
        );
        for (url, count) in &duplicates {
            println!("   {} ({} pages)", url, count);
        }
    }

    Ok(())
}
