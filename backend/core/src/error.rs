use thiserror::Error;

/// Top-level error type for the temporal extraction core.
///
/// Extractors never produce these; "not found" is an `Option`. Only the
/// classifier boundary and model loading can fail.
#[derive(Debug, Error)]
pub enum ChronoError {
    #[error("feature schema mismatch: template has {expected} features, vector has {found}")]
    FeatureSchemaMismatch { expected: usize, found: usize },

    #[error("classifier ({kind}) produced a non-binary prediction: {value}")]
    InvalidPrediction { kind: String, value: f64 },

    #[error("unknown classifier kind: {0}")]
    UnknownClassifierKind(String),

    #[error("malformed model ({kind}): {message}")]
    MalformedModel { kind: String, message: String },

    #[error("reference token stream is empty")]
    EmptyTokenStream,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
