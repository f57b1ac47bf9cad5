//! Recommend command - rank internal linking candidates for one page

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use mawile::config::{Config, OutputFormat};
use mawile::recommend::{recommend_report, DegeneratePolicy, FilterCriteria, Recommendations};

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Dataset file (JSON array or .jsonl)
    dataset: PathBuf,

    /// URL of the reference page
    #[arg(short, long)]
    url: String,

    /// Minimum similarity score, 0-100 (inclusive)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Exclude URLs containing this text (or matching it, with --regex)
    #[arg(short, long)]
    exclude: Option<String>,

    /// Treat --exclude as a regular expression
    #[arg(long)]
    regex: bool,

    /// Drop pages with all-zero embeddings instead of failing
    #[arg(long)]
    skip_degenerate: bool,

    /// Show at most this many pages
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output results as JSON
    #[arg(short, long)]
    json: bool,

    /// Config file (defaults to .mawile/config.toml, then ~/.mawile/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Execute recommend command
pub fn execute(args: RecommendArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let criteria = build_criteria(&args, &config);
    let json = args.json || config.output.format == OutputFormat::Json;

    let dataset = super::dataset::load(&args.dataset)?;
    let report = recommend_report(&dataset, &args.url, &criteria)
        .with_context(|| format!("Failed to rank pages similar to {}", args.url))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Explicit config file, or the project/user lookup
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(&std::env::current_dir()?),
    }
}

/// Config values, overridden by whatever flags were given
fn build_criteria(args: &RecommendArgs, config: &Config) -> FilterCriteria {
    let mut criteria = config.criteria();

    if let Some(threshold) = args.threshold {
        criteria.threshold = threshold;
    }
    if let Some(exclude) = &args.exclude {
        criteria.exclude_pattern = Some(exclude.clone());
    }
    if args.regex {
        criteria.use_regex = true;
    }
    if args.skip_degenerate {
        criteria.on_degenerate = DegeneratePolicy::Skip;
    }
    if args.limit.is_some() {
        criteria.limit = args.limit;
    }

    criteria
}

fn print_report(report: &Recommendations) {
    println!(
        "{} {}",
        "Pages similar to:".bold(),
        report.reference_title.bold()
    );
    println!("{}\n", report.reference_url.dimmed());

    if !report.skipped.is_empty() {
        println!(
            "{} {} page(s) with zero-magnitude embeddings skipped",
            "⚠️ ".yellow(),
            report.skipped.len()
        );
        for url in &report.skipped {
            println!("   {}", url.dimmed());
        }
        println!();
    }

    if report.candidates.is_empty() {
        println!("No pages above the similarity threshold.");
        return;
    }

    let url_width = report
        .candidates
        .iter()
        .map(|c| c.url.chars().count())
        .max()
        .unwrap_or(0)
        .max("URL".len());

    println!(
        "{:<url_width$}  {:>7}  {}",
        "URL".bold(),
        "Score".bold(),
        "Title".bold(),
        url_width = url_width
    );
    println!("{}", "─".repeat(url_width + 20));

    for candidate in &report.candidates {
        println!(
            "{:<url_width$}  {:>7.2}  {}",
            candidate.url,
            candidate.similarity_score,
            candidate.title,
            url_width = url_width
        );
    }

    println!("\n{} pages", report.candidates.len());
}
