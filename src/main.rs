use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding the log filter (EnvFilter syntax)
const LOG_ENV_VAR: &str = "MAWILE_LOG";

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Internal linking recommendations from page embeddings", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides MAWILE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank pages similar to a reference page
    Recommend {
        #[command(flatten)]
        args: commands::recommend::RecommendArgs,
    },

    /// Show raw similarity scores for every page, in dataset order
    Score {
        /// Dataset file (JSON array or .jsonl)
        dataset: PathBuf,

        /// URL of the reference page
        #[arg(short, long)]
        url: String,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the pages of a dataset to pick a reference from
    Pages {
        /// Dataset file (JSON array or .jsonl)
        dataset: PathBuf,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Recommend { args } => {
            commands::recommend::execute(args)?;
        }
        Commands::Score { dataset, url, json } => {
            commands::score::execute(&dataset, &url, json)?;
        }
        Commands::Pages { dataset, json } => {
            commands::pages::execute(&dataset, json)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
