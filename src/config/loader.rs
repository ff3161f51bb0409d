use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path, must exist)
/// 2. `$GH_REPORT_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/gh-report/config.toml`
/// 4. `~/.config/gh-report/config.toml`
///
/// When nothing is found the built-in defaults are used.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match find_global_config() {
            Some(path) => path,
            None => {
                tracing::debug!("config: no file found, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };
    load_file(&path)
}

fn load_file(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    tracing::debug!("config: loaded {}", path.display());
    Ok(config)
}

fn find_global_config() -> Option<PathBuf> {
    // $GH_REPORT_CONFIG
    if let Ok(path) = std::env::var("GH_REPORT_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/gh-report/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("gh-report/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/gh-report/config.toml
    if let Some(home) = home_dir() {
        let p = home.join(".config/gh-report/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
