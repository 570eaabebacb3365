use serde::Deserialize;

use super::ArrayModel;

/// Fully connected layer; `weights[out][in]`.
#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl DenseLayer {
    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect()
    }
}

/// Feed-forward net: ReLU on hidden layers, a single sigmoid output.
#[derive(Debug, Clone, Deserialize)]
pub struct NeuralNet {
    pub layers: Vec<DenseLayer>,
}

impl NeuralNet {
    pub fn validate(&self, width: usize) -> Result<(), String> {
        let mut expected = width;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.len() != layer.bias.len() {
                return Err(format!("layer {i}: {} rows, {} biases", layer.weights.len(), layer.bias.len()));
            }
            if let Some(row) = layer.weights.iter().find(|r| r.len() != expected) {
                return Err(format!("layer {i}: row of {} inputs, expected {expected}", row.len()));
            }
            expected = layer.weights.len();
        }
        match self.layers.last() {
            None => Err("network has no layers".to_string()),
            Some(_) if expected != 1 => Err(format!("output layer has {expected} units, expected 1")),
            Some(_) => Ok(()),
        }
    }

    fn score(&self, row: &[f32]) -> f32 {
        let mut activation = row.to_vec();
        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter().enumerate() {
            activation = layer.forward(&activation);
            if i < last {
                activation.iter_mut().for_each(|a| *a = a.max(0.0));
            }
        }
        let z = activation.first().copied().unwrap_or(0.0);
        1.0 / (1.0 + (-z).exp())
    }
}

impl ArrayModel for NeuralNet {
    fn predict(&self, rows: &[Vec<f32>]) -> Vec<f32> {
        rows.iter().map(|row| self.score(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net() -> NeuralNet {
        NeuralNet {
            layers: vec![
                DenseLayer { weights: vec![vec![4.0, 0.0], vec![0.0, 4.0]], bias: vec![0.0, 0.0] },
                DenseLayer { weights: vec![vec![3.0, -3.0]], bias: vec![0.0] },
            ],
        }
    }

    #[test]
    fn sigmoid_scores() {
        let scores = net().predict(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(scores[0] > 0.9);
        assert!(scores[1] < 0.1);
    }

    #[test]
    fn validates_layer_shapes() {
        assert!(net().validate(2).is_ok());
        assert!(net().validate(3).is_err());
        assert!(NeuralNet { layers: vec![] }.validate(2).is_err());
    }
}
