//! Trained model families and the three prediction shapes they expose.
//!
//! Models are plain data deserialized from the model file; none of them know
//! about feature names beyond what they were trained with.

use std::collections::HashMap;

pub mod decision_tree;
pub mod naive_bayes;
pub mod neural_net;
pub mod random_forest;
pub mod svm;

pub use decision_tree::DecisionTree;
pub use naive_bayes::NaiveBayes;
pub use neural_net::NeuralNet;
pub use random_forest::RandomForest;
pub use svm::LinearSvm;

/// Predict-one over a named feature map.
pub trait NamedFeatureModel: Send + Sync {
    fn classify(&self, features: &HashMap<&str, bool>) -> f64;
}

/// Batch predict over integer rows in template order.
pub trait VectorModel: Send + Sync {
    fn predict(&self, rows: &[Vec<i32>]) -> Vec<f64>;
}

/// Batch score over float rows in template order; scores are rounded by the
/// caller.
pub trait ArrayModel: Send + Sync {
    fn predict(&self, rows: &[Vec<f32>]) -> Vec<f32>;
}

/// A loaded model, tagged with the prediction shape it speaks.
pub enum TrainedModel {
    Named(Box<dyn NamedFeatureModel>),
    Vector(Box<dyn VectorModel>),
    Array(Box<dyn ArrayModel>),
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shape = match self {
            Self::Named(_) => "Named",
            Self::Vector(_) => "Vector",
            Self::Array(_) => "Array",
        };
        f.debug_tuple("TrainedModel").field(&shape).finish()
    }
}
