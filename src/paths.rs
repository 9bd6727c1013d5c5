//! Path resolution for the mct config file
//!
//! The config lives at `~/.config/mct/config.yaml` by default, overridable
//! for dotfiles setups.
//!
//! # Path Resolution Priority
//!
//! 1. `MCT_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/mct` (if set)
//! 3. Default: `~/.config/mct`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "MCT_CONFIG_DIR";

/// File name of the config document inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Get the mct config directory path
pub fn config_dir() -> Result<PathBuf> {
    // 1. Check environment variable override
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    // 2. Check XDG_CONFIG_HOME
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("mct");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    // 3. Default: ~/.config/mct
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("mct");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Get the default config file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
