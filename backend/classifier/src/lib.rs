//! `chronoforge-classifier`: decides whether an interval word names a
//! Period ("three weeks") or a Calendar-Interval ("this week").
//!
//! Trained models come in three prediction shapes (named-feature
//! predict-one, integer-row batch predict, float-row score predict);
//! [`ClassifierAdapter`] hides them behind [`PeriodIntervalClassifier`].

pub mod adapter;
pub mod features;
pub mod kind;
pub mod loader;
pub mod models;

pub use adapter::{
    ClassifierAdapter, FixedClassifier, IntervalClass, PeriodIntervalClassifier, RuleOnly,
};
pub use features::{extract_features, FeatureTemplate, FeatureVector, DEFAULT_WINDOW};
pub use kind::ClassifierKind;
pub use loader::{load_model, load_template, parse_model, parse_template};
pub use models::TrainedModel;
