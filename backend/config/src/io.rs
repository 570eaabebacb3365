//! Config file location and loading.

use crate::schema::ChronoForgeConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the ChronoForge config directory.
/// Priority: `CHRONOFORGE_CONFIG_DIR` env > `~/.chronoforge/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHRONOFORGE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".chronoforge"),
        None => PathBuf::from(".chronoforge"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<ChronoForgeConfig> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Config file does not exist; using defaults");
            return Ok(ChronoForgeConfig::default());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read config file: {}", path.display()))
        }
    };

    let config = parse_config(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse YAML text. An empty document is the default config.
pub fn parse_config(raw: &str) -> Result<ChronoForgeConfig> {
    if raw.trim().is_empty() {
        return Ok(ChronoForgeConfig::default());
    }
    Ok(serde_yaml::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_file_is_default() {
        assert_eq!(parse_config("\n  \n").unwrap(), ChronoForgeConfig::default());
    }

    #[test]
    fn invalid_yaml_is_error() {
        assert!(parse_config("classifier: [unclosed").is_err());
    }

    #[test]
    fn file_name_is_joined() {
        let path = config_file_path(Path::new("/etc/chronoforge"));
        assert_eq!(path, PathBuf::from("/etc/chronoforge/config.yaml"));
    }

    #[tokio::test]
    async fn missing_file_yields_default() {
        let cfg = load_config(Path::new("/nonexistent/chronoforge/config.yaml"))
            .await
            .unwrap();
        assert_eq!(cfg, ChronoForgeConfig::default());
    }
}
