//! `check-config`: load a config file and print its validation report.

use std::path::Path;

use anyhow::{bail, Result};
use chronoforge_config::{ChronoForgeConfig, ValidationReport};

use crate::terminal_output::{note_error, note_success, note_warn};

pub fn print_report(path: &Path, config: &ChronoForgeConfig, report: &ValidationReport) {
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    if report.is_valid() {
        note_success(&format!(
            "{} is valid (classifier {}, output {})",
            path.display(),
            config.classifier_kind().unwrap_or("NB"),
            config.output_format(),
        ));
    }
}

pub fn run(path: &Path, config: &ChronoForgeConfig, report: &ValidationReport) -> Result<()> {
    print_report(path, config, report);
    if !report.is_valid() {
        bail!("{} config error(s) in {}", report.errors.len(), path.display());
    }
    Ok(())
}
