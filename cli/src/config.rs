use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Base URL every request hangs off, search included
    pub base_url: Option<String>,
}

pub fn load(config_path: &Path) -> eyre::Result<Config> {
    let content = std::fs::read_to_string(config_path).map_err(|e| {
        eyre::eyre!("config path '{}' could not be read: {e}", config_path.display())
    })?;

    let config: Config = toml::from_str(&content)?;

    Ok(config)
}

/// Flag or environment first, then the config file, then the default.
pub fn resolve_base_url(explicit: Option<&str>, config_path: Option<&Path>) -> eyre::Result<String> {
    if let Some(url) = explicit {
        return Ok(url.to_string());
    }
    let from_file = match config_path {
        Some(path) => load(path)?.base_url,
        None => None,
    };
    Ok(from_file.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
}
