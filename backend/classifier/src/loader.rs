//! Reading model files and feature templates from disk.
//!
//! A model file is JSON:
//!
//! ```json
//! { "features": ["week", "3", "feat_numeric"], "model": { ... } }
//! ```
//!
//! `features` may be left out when a separate template file (CSV header or
//! JSON array) is given.

use std::path::Path;

use anyhow::Context;
use chronoforge_core::ChronoError;
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};

use crate::adapter::{ClassifierAdapter, PeriodIntervalClassifier};
use crate::features::FeatureTemplate;
use crate::kind::ClassifierKind;
use crate::models::{DecisionTree, LinearSvm, NaiveBayes, NeuralNet, RandomForest, TrainedModel};

#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default)]
    features: Option<Vec<String>>,
    model: serde_json::Value,
}

fn malformed(kind: ClassifierKind, message: impl Into<String>) -> ChronoError {
    ChronoError::MalformedModel { kind: kind.to_string(), message: message.into() }
}

fn decode<T: serde::de::DeserializeOwned>(
    kind: ClassifierKind,
    value: serde_json::Value,
) -> Result<T, ChronoError> {
    serde_json::from_value(value).map_err(|e| malformed(kind, e.to_string()))
}

/// Parse a template from file contents: a JSON array of names, or a CSV
/// whose first row is the header.
pub fn parse_template(raw: &str) -> Result<FeatureTemplate, ChronoError> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') {
        let names: Vec<String> = serde_json::from_str(trimmed)
            .context("feature template is not a JSON array of strings")?;
        return Ok(FeatureTemplate::from_names(names));
    }
    let header = trimmed.lines().next().unwrap_or_default();
    Ok(FeatureTemplate::from_csv_header(header))
}

pub async fn load_template(path: &Path) -> Result<FeatureTemplate, ChronoError> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read feature template: {}", path.display()))?;
    let template = parse_template(&raw)?;
    debug!(path = %path.display(), features = template.len(), "Loaded feature template");
    Ok(template)
}

/// Build an adapter from model-file JSON.
///
/// `fallback` is used only when the file carries no `features` list.
pub fn parse_model(
    kind: ClassifierKind,
    json: &str,
    fallback: Option<FeatureTemplate>,
) -> Result<ClassifierAdapter, ChronoError> {
    let file: ModelFile = serde_json::from_str(json).map_err(|e| malformed(kind, e.to_string()))?;
    let template = match (file.features, fallback) {
        (Some(names), _) => FeatureTemplate::from_names(names),
        (None, Some(template)) => template,
        (None, None) => {
            return Err(malformed(kind, "no feature list in model file and no template given"))
        }
    };
    if template.is_empty() {
        return Err(malformed(kind, "feature template is empty"));
    }

    let width = template.len();
    let model = match kind {
        ClassifierKind::NaiveBayes => {
            let nb: NaiveBayes = decode(kind, file.model)?;
            nb.validate().map_err(|m| malformed(kind, m))?;
            TrainedModel::Named(Box::new(nb))
        }
        ClassifierKind::DecisionTree => {
            let tree: DecisionTree = decode(kind, file.model)?;
            let unknown = tree.split_features().into_iter().find(|f| template.position(f).is_none());
            if let Some(name) = unknown {
                return Err(malformed(kind, format!("tree splits on unknown feature '{name}'")));
            }
            TrainedModel::Named(Box::new(tree))
        }
        ClassifierKind::RandomForest => {
            let forest: RandomForest = decode(kind, file.model)?;
            forest.validate(width).map_err(|m| malformed(kind, m))?;
            TrainedModel::Vector(Box::new(forest))
        }
        ClassifierKind::Svm => {
            let svm: LinearSvm = decode(kind, file.model)?;
            svm.validate(width).map_err(|m| malformed(kind, m))?;
            TrainedModel::Vector(Box::new(svm))
        }
        ClassifierKind::NeuralNet => {
            let net: NeuralNet = decode(kind, file.model)?;
            net.validate(width).map_err(|m| malformed(kind, m))?;
            TrainedModel::Array(Box::new(net))
        }
    };
    Ok(ClassifierAdapter::new(kind, model, template))
}

/// Load a trained classifier of `kind` from `model_path`.
pub async fn load_model(
    kind: ClassifierKind,
    model_path: &Path,
    template_path: Option<&Path>,
) -> Result<Box<dyn PeriodIntervalClassifier>, ChronoError> {
    let raw = fs::read_to_string(model_path)
        .await
        .with_context(|| format!("Failed to read model file: {}", model_path.display()))?;
    let fallback = match template_path {
        Some(path) => Some(load_template(path).await?),
        None => None,
    };
    let adapter = parse_model(kind, &raw, fallback)?;
    info!(
        kind = %kind,
        path = %model_path.display(),
        features = adapter.template().len(),
        "Loaded period/interval classifier"
    );
    Ok(Box::new(adapter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::IntervalClass;

    #[test]
    fn template_from_csv_or_json() {
        let csv = parse_template("week,3,feat_numeric\n0,1,1\n").unwrap();
        assert_eq!(csv.names(), &["week", "3", "feat_numeric"]);
        let json = parse_template(r#"["a", "b"]"#).unwrap();
        assert_eq!(json.len(), 2);
    }

    #[test]
    fn svm_model_round_trip() {
        let json = r#"{
            "features": ["feat_numeric", "this"],
            "model": { "weights": [1.5, -2.0], "bias": -0.5 }
        }"#;
        let adapter = parse_model(ClassifierKind::Svm, json, None).unwrap();
        let mut v = adapter.template().empty_vector();
        v.set("feat_numeric");
        assert_eq!(adapter.classify(&v).unwrap(), IntervalClass::Period);
    }

    #[test]
    fn falls_back_to_template_file() {
        let json = r#"{ "model": { "weights": [1.0], "bias": 0.0 } }"#;
        assert!(matches!(
            parse_model(ClassifierKind::Svm, json, None),
            Err(ChronoError::MalformedModel { .. })
        ));
        let template = FeatureTemplate::from_names(["feat_numeric"]);
        assert!(parse_model(ClassifierKind::Svm, json, Some(template)).is_ok());
    }

    #[test]
    fn dimension_mismatch_is_malformed() {
        let json = r#"{ "features": ["a", "b"], "model": { "weights": [1.0], "bias": 0.0 } }"#;
        let err = parse_model(ClassifierKind::Svm, json, None).unwrap_err();
        assert!(err.to_string().contains("1 weights for 2 features"));
    }

    #[test]
    fn tree_on_unknown_feature_is_malformed() {
        let json = r#"{
            "features": ["a"],
            "model": { "root": {
                "node": "split", "feature": "zzz",
                "present": { "node": "leaf", "class": 1.0 },
                "absent": { "node": "leaf", "class": 0.0 }
            } }
        }"#;
        assert!(parse_model(ClassifierKind::DecisionTree, json, None).is_err());
    }

    #[test]
    fn forest_leaf_outside_binary_is_malformed() {
        let json = r#"{
            "features": ["a"],
            "model": { "trees": [{
                "node": "split", "feature": 0,
                "present": { "node": "leaf", "class": 1 },
                "absent": { "node": "leaf", "class": 2 }
            }] }
        }"#;
        assert!(matches!(
            parse_model(ClassifierKind::RandomForest, json, None),
            Err(ChronoError::MalformedModel { .. })
        ));
    }

    #[tokio::test]
    async fn missing_model_file_is_an_error() {
        let err = load_model(ClassifierKind::NaiveBayes, Path::new("/nonexistent/model.json"), None)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to read model file"));
    }
}
