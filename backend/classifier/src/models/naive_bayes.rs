use std::collections::HashMap;

use serde::Deserialize;

use super::NamedFeatureModel;

/// Bernoulli naive Bayes over boolean features.
///
/// `likelihoods[name] = [P(name | calendar), P(name | period)]`. Features the
/// model never saw contribute nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaiveBayes {
    pub log_prior: [f64; 2],
    pub likelihoods: HashMap<String, [f64; 2]>,
}

impl NaiveBayes {
    /// Every likelihood must be a probability strictly inside (0, 1).
    pub fn validate(&self) -> Result<(), String> {
        for (name, probs) in &self.likelihoods {
            if probs.iter().any(|p| !(*p > 0.0 && *p < 1.0)) {
                return Err(format!("likelihood for '{name}' outside (0, 1): {probs:?}"));
            }
        }
        if self.log_prior.iter().any(|p| !p.is_finite()) {
            return Err("log prior is not finite".to_string());
        }
        Ok(())
    }
}

impl NamedFeatureModel for NaiveBayes {
    fn classify(&self, features: &HashMap<&str, bool>) -> f64 {
        let mut scores = self.log_prior;
        for (name, probs) in &self.likelihoods {
            let present = features.get(name.as_str()).copied().unwrap_or(false);
            for (score, p) in scores.iter_mut().zip(probs) {
                *score += if present { p.ln() } else { (1.0 - p).ln() };
            }
        }
        if scores[1] > scores[0] {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> NaiveBayes {
        serde_json::from_value(serde_json::json!({
            "logPrior": [-0.69, -0.69],
            "likelihoods": {
                "feat_numeric": [0.1, 0.9],
                "this": [0.8, 0.1]
            }
        }))
        .unwrap()
    }

    #[test]
    fn numeric_neighbour_favours_period() {
        let m = model();
        let features = HashMap::from([("feat_numeric", true), ("this", false)]);
        assert_eq!(m.classify(&features), 1.0);
    }

    #[test]
    fn this_favours_calendar() {
        let m = model();
        let features = HashMap::from([("feat_numeric", false), ("this", true)]);
        assert_eq!(m.classify(&features), 0.0);
    }

    #[test]
    fn rejects_degenerate_likelihood() {
        let mut m = model();
        m.likelihoods.insert("x".into(), [0.0, 0.5]);
        assert!(m.validate().is_err());
    }
}
