//! Feature contract shared by training and inference.
//!
//! A [`FeatureTemplate`] fixes the ordered feature names a model was trained
//! on. Vectors can only be created from a template, so every vector carries
//! exactly the template's key set.

use std::collections::HashMap;
use std::sync::Arc;

use chronoforge_core::numbers::number_from_text;
use chronoforge_core::ReferenceToken;
use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

/// Context window used when the configuration does not override it.
pub const DEFAULT_WINDOW: usize = 5;

pub const FEAT_NUMERIC: &str = "feat_numeric";
pub const FEAT_TEMP_SELF: &str = "feat_temp_self";
pub const FEAT_TEMP_CONTEXT: &str = "feat_temp_context";

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Ordered feature names.
#[derive(Debug, Clone)]
pub struct FeatureTemplate {
    names: Arc<[String]>,
    index: Arc<HashMap<String, usize>>,
}

impl FeatureTemplate {
    /// Build from names; later duplicates are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for name in names {
            let name = name.into();
            if !index.contains_key(&name) {
                index.insert(name.clone(), ordered.len());
                ordered.push(name);
            }
        }
        Self { names: ordered.into(), index: Arc::new(index) }
    }

    /// Build from the header row of a training matrix CSV.
    pub fn from_csv_header(line: &str) -> Self {
        Self::from_names(
            line.trim_end_matches(['\r', '\n'])
                .split(',')
                .map(|s| s.trim().trim_matches('"'))
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// All-false vector over this template.
    pub fn empty_vector(&self) -> FeatureVector {
        FeatureVector { template: self.clone(), values: vec![false; self.len()] }
    }

    fn same_schema(&self, other: &FeatureTemplate) -> bool {
        Arc::ptr_eq(&self.names, &other.names) || self.names == other.names
    }
}

impl Default for FeatureTemplate {
    fn default() -> Self {
        Self::from_names([FEAT_NUMERIC, FEAT_TEMP_CONTEXT, FEAT_TEMP_SELF])
    }
}

/// Boolean feature values aligned to a template.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    template: FeatureTemplate,
    values: Vec<bool>,
}

impl FeatureVector {
    /// Turn a feature on. Names outside the template are ignored.
    pub fn set(&mut self, name: &str) -> bool {
        match self.template.position(name) {
            Some(i) => {
                self.values[i] = true;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.template.position(name).map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.template
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn conforms_to(&self, template: &FeatureTemplate) -> bool {
        self.template.same_schema(template) && self.values.len() == template.len()
    }

    pub fn as_ints(&self) -> Vec<i32> {
        self.values.iter().map(|&v| i32::from(v)).collect()
    }

    pub fn as_floats(&self) -> Vec<f32> {
        self.values.iter().map(|&v| if v { 1.0 } else { 0.0 }).collect()
    }
}

fn is_number(token: &ReferenceToken) -> bool {
    number_from_text(&token.normalized()).is_some()
}

/// Feature vector for the token at `index`.
///
/// - the Snowball stem of the target word
/// - `feat_numeric` when the previous or next token is a number
/// - bag-of-words over `window` tokens either side; numbers contribute their
///   value as the key
/// - `feat_temp_self` / `feat_temp_context` from the tokens' temporal flags
///
/// The context range stops one token short of the end of the stream, which
/// is how the training matrices were built.
pub fn extract_features(
    tokens: &[ReferenceToken],
    index: usize,
    template: &FeatureTemplate,
    window: usize,
) -> FeatureVector {
    let mut features = template.empty_vector();
    let Some(target) = tokens.get(index) else {
        return features;
    };

    let stem = STEMMER.stem(&target.normalized()).into_owned();
    features.set(&stem);

    let before = index.checked_sub(1).map(|i| &tokens[i]);
    let after = tokens.get(index + 1);
    if before.is_some_and(is_number) || after.is_some_and(is_number) {
        features.set(FEAT_NUMERIC);
    }

    let start = index.saturating_sub(window);
    let end = (index + window + 1).min(tokens.len().saturating_sub(1));
    let context = (start..end).filter(|&r| r != index).map(|r| &tokens[r]);

    let mut temporal_context = false;
    for token in context {
        let norm = token.normalized();
        match number_from_text(&norm) {
            Some(n) => features.set(&n.to_string()),
            None => features.set(&norm),
        };
        temporal_context |= token.temporal;
    }

    if target.temporal {
        features.set(FEAT_TEMP_SELF);
    }
    if temporal_context {
        features.set(FEAT_TEMP_CONTEXT);
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<ReferenceToken> {
        let mut offset = 0;
        words
            .iter()
            .map(|w| {
                let t = ReferenceToken::new(*w, offset);
                offset += w.len() + 1;
                t
            })
            .collect()
    }

    #[test]
    fn template_keeps_first_occurrence_order() {
        let t = FeatureTemplate::from_csv_header("week,\"3\",week,feat_numeric\r\n");
        assert_eq!(t.names(), &["week", "3", "feat_numeric"]);
        assert_eq!(t.position("feat_numeric"), Some(2));
    }

    #[test]
    fn vector_never_grows_beyond_template() {
        let template = FeatureTemplate::default();
        let mut v = template.empty_vector();
        assert!(!v.set("unseen"));
        assert!(v.set(FEAT_NUMERIC));
        assert_eq!(v.len(), template.len());
        assert!(v.conforms_to(&template));
        assert!(!v.conforms_to(&FeatureTemplate::from_names(["x"])));
    }

    #[test]
    fn extracts_stem_numeric_and_context() {
        let mut toks = tokens(&["for", "three", "weeks", "after", "surgery", "."]);
        toks[3].temporal = true;
        toks[2].temporal = true;
        let template = FeatureTemplate::from_names([
            "week",
            "3",
            "for",
            "after",
            "surgery",
            FEAT_NUMERIC,
            FEAT_TEMP_SELF,
            FEAT_TEMP_CONTEXT,
        ]);
        let v = extract_features(&toks, 2, &template, DEFAULT_WINDOW);
        assert_eq!(v.get("week"), Some(true));
        assert_eq!(v.get("3"), Some(true));
        assert_eq!(v.get("for"), Some(true));
        assert_eq!(v.get("surgery"), Some(true));
        assert_eq!(v.get(FEAT_NUMERIC), Some(true));
        assert_eq!(v.get(FEAT_TEMP_SELF), Some(true));
        assert_eq!(v.get(FEAT_TEMP_CONTEXT), Some(true));
    }

    #[test]
    fn window_excludes_last_token() {
        let toks = tokens(&["week", "later"]);
        let template = FeatureTemplate::from_names(["later", FEAT_TEMP_CONTEXT]);
        let v = extract_features(&toks, 0, &template, DEFAULT_WINDOW);
        assert_eq!(v.get("later"), Some(false));
    }

    #[test]
    fn out_of_range_index_yields_empty_vector() {
        let v = extract_features(&[], 3, &FeatureTemplate::default(), DEFAULT_WINDOW);
        assert!(v.values().iter().all(|b| !b));
    }
}
