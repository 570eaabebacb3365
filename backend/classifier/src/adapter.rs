//! One `classify` contract over every model family.

use std::collections::HashMap;

use chronoforge_core::ChronoError;
use serde::{Deserialize, Serialize};

use crate::features::{FeatureTemplate, FeatureVector};
use crate::kind::ClassifierKind;
use crate::models::TrainedModel;

/// The two outcomes of the period-vs-interval decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalClass {
    /// Label 0: anchored or repeating ("this week").
    CalendarInterval,
    /// Label 1: a bare duration ("three weeks").
    Period,
}

impl IntervalClass {
    pub fn label(self) -> u8 {
        match self {
            Self::CalendarInterval => 0,
            Self::Period => 1,
        }
    }

    /// Exactly 0.0 or 1.0; anything else is not a label.
    pub fn from_label(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Self::CalendarInterval)
        } else if value == 1.0 {
            Some(Self::Period)
        } else {
            None
        }
    }
}

/// Decides Period vs Calendar-Interval for one interval word.
pub trait PeriodIntervalClassifier: Send + Sync {
    /// The feature contract vectors must be built against.
    fn template(&self) -> &FeatureTemplate;

    fn classify(&self, features: &FeatureVector) -> Result<IntervalClass, ChronoError>;
}

fn check_schema(template: &FeatureTemplate, features: &FeatureVector) -> Result<(), ChronoError> {
    if features.conforms_to(template) {
        Ok(())
    } else {
        Err(ChronoError::FeatureSchemaMismatch { expected: template.len(), found: features.len() })
    }
}

// ---------------------------------------------------------------------------
// Trained models
// ---------------------------------------------------------------------------

/// A trained model plus the template it was trained on.
#[derive(Debug)]
pub struct ClassifierAdapter {
    kind: ClassifierKind,
    model: TrainedModel,
    template: FeatureTemplate,
}

impl ClassifierAdapter {
    pub fn new(kind: ClassifierKind, model: TrainedModel, template: FeatureTemplate) -> Self {
        Self { kind, model, template }
    }

    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    fn raw_prediction(&self, features: &FeatureVector) -> f64 {
        match &self.model {
            TrainedModel::Named(model) => {
                let named: HashMap<&str, bool> = features.iter().collect();
                model.classify(&named)
            }
            TrainedModel::Vector(model) => {
                model.predict(&[features.as_ints()]).first().copied().unwrap_or(f64::NAN)
            }
            TrainedModel::Array(model) => model
                .predict(&[features.as_floats()])
                .first()
                .map(|score| f64::from(score.round()))
                .unwrap_or(f64::NAN),
        }
    }
}

impl PeriodIntervalClassifier for ClassifierAdapter {
    fn template(&self) -> &FeatureTemplate {
        &self.template
    }

    fn classify(&self, features: &FeatureVector) -> Result<IntervalClass, ChronoError> {
        check_schema(&self.template, features)?;
        let raw = self.raw_prediction(features);
        IntervalClass::from_label(raw).ok_or_else(|| ChronoError::InvalidPrediction {
            kind: self.kind.to_string(),
            value: raw,
        })
    }
}

// ---------------------------------------------------------------------------
// Model-free classifiers
// ---------------------------------------------------------------------------

/// Used when no model is configured: every interval word is a
/// Calendar-Interval unless a lexical rule says otherwise.
#[derive(Debug, Clone, Default)]
pub struct RuleOnly {
    template: FeatureTemplate,
}

impl RuleOnly {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PeriodIntervalClassifier for RuleOnly {
    fn template(&self) -> &FeatureTemplate {
        &self.template
    }

    fn classify(&self, features: &FeatureVector) -> Result<IntervalClass, ChronoError> {
        check_schema(&self.template, features)?;
        Ok(IntervalClass::CalendarInterval)
    }
}

/// Always answers with one configured class.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    class: IntervalClass,
    template: FeatureTemplate,
}

impl FixedClassifier {
    pub fn new(class: IntervalClass) -> Self {
        Self { class, template: FeatureTemplate::default() }
    }

    pub fn with_template(mut self, template: FeatureTemplate) -> Self {
        self.template = template;
        self
    }
}

impl PeriodIntervalClassifier for FixedClassifier {
    fn template(&self) -> &FeatureTemplate {
        &self.template
    }

    fn classify(&self, features: &FeatureVector) -> Result<IntervalClass, ChronoError> {
        check_schema(&self.template, features)?;
        Ok(self.class)
    }
}
