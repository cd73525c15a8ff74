use crate::error::{GateError, Result};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Runtime directory constants
// ---------------------------------------------------------------------------

pub const CLAUDE_DIR: &str = ".claude";
pub const DOCS_DIR: &str = ".claude/docs";
pub const SETTINGS_FILE: &str = ".claude/settings.json";
pub const CONFIG_FILE: &str = ".claude/turnguard.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(GateError::HomeNotFound)
}

/// The agent runtime directory (`~/.claude`).
pub fn claude_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(CLAUDE_DIR))
}

/// Where installed documentation symlinks live (`~/.claude/docs`).
pub fn docs_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(DOCS_DIR))
}

/// The runtime settings file that registers hooks (`~/.claude/settings.json`).
pub fn settings_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(SETTINGS_FILE))
}

/// The gate's own config file (`~/.claude/turnguard.yaml`). Optional.
pub fn config_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(CONFIG_FILE))
}
