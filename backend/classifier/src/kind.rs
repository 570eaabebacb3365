use std::fmt;
use std::str::FromStr;

use chronoforge_core::ChronoError;
use serde::{Deserialize, Serialize};

/// Family of a trained period/interval model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClassifierKind {
    #[default]
    #[serde(rename = "NB")]
    NaiveBayes,
    #[serde(rename = "DT")]
    DecisionTree,
    #[serde(rename = "RF")]
    RandomForest,
    #[serde(rename = "SVM")]
    Svm,
    #[serde(rename = "NN")]
    NeuralNet,
}

impl ClassifierKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::NaiveBayes => "NB",
            Self::DecisionTree => "DT",
            Self::RandomForest => "RF",
            Self::Svm => "SVM",
            Self::NeuralNet => "NN",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ClassifierKind {
    type Err = ChronoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NB" => Ok(Self::NaiveBayes),
            "DT" => Ok(Self::DecisionTree),
            "RF" => Ok(Self::RandomForest),
            "SVM" => Ok(Self::Svm),
            "NN" => Ok(Self::NeuralNet),
            other => Err(ChronoError::UnknownClassifierKind(other.to_string())),
        }
    }
}
