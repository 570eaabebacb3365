//! ChronoForge runtime configuration schema.
//!
//! Every field is optional so a partial YAML file (or none at all) still
//! deserializes; [`crate::defaults`] fills the gaps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for ChronoForge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronoForgeConfig {
    /// Period/interval model selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierConfig>,

    /// Feature extraction for the classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeaturesConfig>,

    /// Sub-interval linker switches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linker: Option<LinkerConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Rendering of extracted entities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Model family tag: NB, DT, RF, SVM or NN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// JSON model file. Without one the rule-only classifier is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesConfig {
    /// Tokens considered on each side of the target word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,

    /// CSV header or JSON array naming the model's features, for model
    /// files that do not embed them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Linker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_unanchored_nth: Option<bool>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset ("info", "debug", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for the rolling JSON log. Console only when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// json, ann or scate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Rendering of an entity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    /// brat standoff lines
    Ann,
    /// anafora XML
    Scate,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ann => "ann",
            Self::Scate => "scate",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "ann" => Ok(Self::Ann),
            "scate" | "xml" => Ok(Self::Scate),
            other => Err(format!("Unknown output format '{other}'. Use 'json', 'ann', or 'scate'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl ChronoForgeConfig {
    pub fn model_path(&self) -> Option<&PathBuf> {
        self.classifier.as_ref().and_then(|c| c.model_path.as_ref())
    }

    pub fn template_path(&self) -> Option<&PathBuf> {
        self.features.as_ref().and_then(|f| f.template_path.as_ref())
    }

    pub fn classifier_kind(&self) -> Option<&str> {
        self.classifier.as_ref().and_then(|c| c.kind.as_deref())
    }

    pub fn window(&self) -> Option<usize> {
        self.features.as_ref().and_then(|f| f.window)
    }

    pub fn drop_unanchored_nth(&self) -> bool {
        self.linker
            .as_ref()
            .and_then(|l| l.drop_unanchored_nth)
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.logging.as_ref().and_then(|l| l.dir.as_ref())
    }

    /// Configured output format; unparsable values are reported by
    /// validation and read here as the default.
    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }
}
