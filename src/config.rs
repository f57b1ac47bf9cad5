//! User and project configuration
//!
//! Supplies defaults for the recommend filters and output format. Every
//! field is optional; command-line flags override whatever is loaded here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths;
use crate::recommend::{DegeneratePolicy, FilterCriteria};

/// Configuration (from .mawile/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recommend: RecommendConfig,
    pub output: OutputConfig,
}

/// `[recommend]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    pub threshold: f64,
    pub exclude: String,
    pub regex: bool,
    pub on_degenerate: DegeneratePolicy,
    pub limit: Option<usize>,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            exclude: String::new(),
            regex: false,
            on_degenerate: DegeneratePolicy::Reject,
            limit: None,
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Config {
    /// Load configuration for a project
    ///
    /// Uses `{root}/.mawile/config.toml` if present, else
    /// `~/.mawile/config.toml`, else built-in defaults. Nothing is created.
    pub fn load(root: &Path) -> Result<Self> {
        match Self::locate(root) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {:?}", path))
    }

    /// First existing config file for `root`, project before user
    pub fn locate(root: &Path) -> Option<PathBuf> {
        [paths::project_config_path(root), paths::user_config_path()]
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Filter criteria described by the `[recommend]` section
    pub fn criteria(&self) -> FilterCriteria {
        let section = &self.recommend;
        FilterCriteria {
            threshold: section.threshold,
            exclude_pattern: (!section.exclude.is_empty()).then(|| section.exclude.clone()),
            use_regex: section.regex,
            on_degenerate: section.on_degenerate,
            limit: section.limit,
        }
    }
}
