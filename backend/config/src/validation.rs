//! Config validation: schema checks with user-friendly error messages.

use crate::schema::{ChronoForgeConfig, OutputFormat};
use chronoforge_classifier::ClassifierKind;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ChronoForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_classifier(config, &mut report);
    validate_features(config, &mut report);
    validate_output(config, &mut report);
    report
}

fn validate_classifier(config: &ChronoForgeConfig, report: &mut ValidationReport) {
    if let Some(kind) = config.classifier_kind() {
        if let Err(e) = kind.parse::<ClassifierKind>() {
            report.error("classifier.kind", format!("{e}. Use NB, DT, RF, SVM, or NN"));
        }
    }
    if config.model_path().is_none() {
        report.warn(
            "classifier.modelPath",
            "No model configured; interval words default to Calendar-Interval",
        );
    }
}

fn validate_features(config: &ChronoForgeConfig, report: &mut ValidationReport) {
    if config.window() == Some(0) {
        report.error("features.window", "window must be >= 1");
    }
    if config.template_path().is_some() && config.model_path().is_none() {
        report.warn("features.templatePath", "templatePath is ignored without a modelPath");
    }
}

fn validate_output(config: &ChronoForgeConfig, report: &mut ValidationReport) {
    let Some(format) = config.output.as_ref().and_then(|o| o.format.as_deref()) else {
        return;
    };
    if let Err(message) = format.parse::<OutputFormat>() {
        report.error("output.format", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClassifierConfig, FeaturesConfig, OutputConfig};

    #[test]
    fn empty_config_only_warns_about_model() {
        let report = validate(&ChronoForgeConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "classifier.modelPath");
    }

    #[test]
    fn unknown_kind_is_error() {
        let cfg = ChronoForgeConfig {
            classifier: Some(ClassifierConfig {
                kind: Some("KNN".into()),
                model_path: Some("/m.json".into()),
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "classifier.kind");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn zero_window_and_bad_format_are_errors() {
        let cfg = ChronoForgeConfig {
            features: Some(FeaturesConfig { window: Some(0), template_path: None }),
            output: Some(OutputConfig { format: Some("csv".into()) }),
            ..Default::default()
        };
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["features.window", "output.format"]);
    }
}
