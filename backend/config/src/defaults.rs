//! Config defaults: applies default values to parsed config.

use crate::schema::{
    ChronoForgeConfig, ClassifierConfig, FeaturesConfig, LinkerConfig, LoggingConfig,
    OutputConfig, OutputFormat,
};

/// Default model family when a model path is given without a kind.
pub const DEFAULT_CLASSIFIER_KIND: &str = "NB";

/// Default context window for the classifier features.
pub const DEFAULT_WINDOW: usize = 5;

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: ChronoForgeConfig) -> ChronoForgeConfig {
    let config = apply_classifier_defaults(config);
    let config = apply_feature_defaults(config);
    let config = apply_linker_defaults(config);
    let config = apply_logging_defaults(config);
    apply_output_defaults(config)
}

fn apply_classifier_defaults(mut config: ChronoForgeConfig) -> ChronoForgeConfig {
    let classifier = config.classifier.get_or_insert_with(ClassifierConfig::default);
    if classifier.kind.is_none() {
        classifier.kind = Some(DEFAULT_CLASSIFIER_KIND.to_string());
    }
    config
}

fn apply_feature_defaults(mut config: ChronoForgeConfig) -> ChronoForgeConfig {
    let features = config.features.get_or_insert_with(FeaturesConfig::default);
    if features.window.is_none() {
        features.window = Some(DEFAULT_WINDOW);
    }
    config
}

/// Unanchored Nth entities are kept unless asked otherwise.
fn apply_linker_defaults(mut config: ChronoForgeConfig) -> ChronoForgeConfig {
    let linker = config.linker.get_or_insert_with(LinkerConfig::default);
    if linker.drop_unanchored_nth.is_none() {
        linker.drop_unanchored_nth = Some(false);
    }
    config
}

fn apply_logging_defaults(mut config: ChronoForgeConfig) -> ChronoForgeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}

fn apply_output_defaults(mut config: ChronoForgeConfig) -> ChronoForgeConfig {
    let output = config.output.get_or_insert_with(OutputConfig::default);
    if output.format.is_none() {
        output.format = Some(OutputFormat::default().as_str().to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(ChronoForgeConfig::default());
        assert_eq!(cfg.classifier_kind(), Some(DEFAULT_CLASSIFIER_KIND));
        assert_eq!(cfg.window(), Some(DEFAULT_WINDOW));
        assert_eq!(cfg.log_level(), Some("info"));
        assert_eq!(cfg.output_format(), OutputFormat::Json);
        assert_eq!(cfg.linker.as_ref().unwrap().drop_unanchored_nth, Some(false));
        assert!(cfg.model_path().is_none());
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = ChronoForgeConfig::default();
        cfg.features = Some(FeaturesConfig { window: Some(2), ..Default::default() });
        cfg.classifier = Some(ClassifierConfig { kind: Some("RF".into()), model_path: None });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.window(), Some(2));
        assert_eq!(cfg.classifier_kind(), Some("RF"));
    }

    #[test]
    fn window_matches_classifier_default() {
        assert_eq!(DEFAULT_WINDOW, chronoforge_classifier::DEFAULT_WINDOW);
    }
}
