//! Single source of truth for mawile filesystem layout.
//!
//! This module defines WHERE configuration lives. It has no I/O and no
//! validation.
//!
//! ```text
//! ~/.mawile/
//! └── config.toml              # User config
//!
//! project/.mawile/
//! └── config.toml              # Project config (wins over user config)
//! ```

use std::path::{Path, PathBuf};

/// Name of the per-user and per-project directory
pub const DIR_NAME: &str = ".mawile";

/// Config file name inside [`DIR_NAME`]
pub const CONFIG_FILE: &str = "config.toml";

// =============================================================================
// User Level (~/.mawile/)
// =============================================================================

/// User's mawile home directory: `~/.mawile/`
pub fn mawile_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DIR_NAME)
}

/// User config file: `~/.mawile/config.toml`
pub fn user_config_path() -> PathBuf {
    mawile_home().join(CONFIG_FILE)
}

// =============================================================================
// Project Level (project/.mawile/)
// =============================================================================

/// Project config file: `{root}/.mawile/config.toml`
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use mawile::paths;
///
/// let config = paths::project_config_path(Path::new("/home/user/site"));
/// assert_eq!(config, Path::new("/home/user/site/.mawile/config.toml"));
/// ```
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(DIR_NAME).join(CONFIG_FILE)
}
