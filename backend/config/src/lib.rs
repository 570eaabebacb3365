//! `chronoforge-config`: ChronoForge runtime configuration.
//!
//! Provides:
//! - Typed config schema (classifier, features, linker, logging, output)
//! - YAML loading from the config directory
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Schema validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{contains_env_var_reference, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use schema::{ChronoForgeConfig, OutputFormat};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, apply env substitution, apply defaults and validate a config file.
///
/// This is the main entry point for loading a config at runtime. The report
/// is logged entry by entry and returned for callers that want to refuse
/// an invalid config.
pub async fn load_and_prepare(path: &Path) -> Result<(ChronoForgeConfig, ValidationReport)> {
    let raw_config = load_config(path).await?;
    prepare(raw_config)
}

/// The synchronous half of [`load_and_prepare`].
pub fn prepare(raw_config: ChronoForgeConfig) -> Result<(ChronoForgeConfig, ValidationReport)> {
    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: ChronoForgeConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_fills_defaults_and_reports() {
        let raw = parse_config("features:\n  window: 0\n").unwrap();
        let (cfg, report) = prepare(raw).unwrap();
        assert_eq!(cfg.window(), Some(0));
        assert_eq!(cfg.classifier_kind(), Some("NB"));
        assert!(!report.is_valid());
    }

    #[tokio::test]
    async fn load_and_prepare_without_file() {
        let (cfg, report) = load_and_prepare(Path::new("/nonexistent/config.yaml"))
            .await
            .unwrap();
        assert_eq!(cfg.output_format(), OutputFormat::Json);
        assert!(report.is_valid());
    }
}
