use serde::Deserialize;

use super::VectorModel;

/// Linear decision function `w . x + b`; positive means Period.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearSvm {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LinearSvm {
    pub fn validate(&self, width: usize) -> Result<(), String> {
        if self.weights.len() != width {
            return Err(format!("{} weights for {width} features", self.weights.len()));
        }
        Ok(())
    }

    fn decision(&self, row: &[i32]) -> f64 {
        self.weights
            .iter()
            .zip(row)
            .map(|(w, x)| w * f64::from(*x))
            .sum::<f64>()
            + self.bias
    }
}

impl VectorModel for LinearSvm {
    fn predict(&self, rows: &[Vec<i32>]) -> Vec<f64> {
        rows.iter()
            .map(|row| if self.decision(row) > 0.0 { 1.0 } else { 0.0 })
            .collect()
    }
}
