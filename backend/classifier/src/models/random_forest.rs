use serde::Deserialize;

use super::VectorModel;

/// Tree over feature columns, as exported from a trained forest.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum IndexNode {
    Leaf {
        class: u8,
    },
    Split {
        feature: usize,
        present: Box<IndexNode>,
        absent: Box<IndexNode>,
    },
}

impl IndexNode {
    fn predict(&self, row: &[i32]) -> u8 {
        let mut node = self;
        loop {
            match node {
                IndexNode::Leaf { class } => return *class,
                IndexNode::Split { feature, present, absent } => {
                    node = if row.get(*feature).copied().unwrap_or(0) != 0 {
                        present
                    } else {
                        absent
                    };
                }
            }
        }
    }

    fn max_feature(&self) -> Option<usize> {
        match self {
            IndexNode::Leaf { .. } => None,
            IndexNode::Split { feature, present, absent } => {
                [Some(*feature), present.max_feature(), absent.max_feature()]
                    .into_iter()
                    .flatten()
                    .max()
            }
        }
    }

    /// First leaf whose class is neither 0 nor 1.
    fn non_binary_leaf(&self) -> Option<u8> {
        match self {
            IndexNode::Leaf { class } if *class > 1 => Some(*class),
            IndexNode::Leaf { .. } => None,
            IndexNode::Split { present, absent, .. } => {
                present.non_binary_leaf().or_else(|| absent.non_binary_leaf())
            }
        }
    }
}

/// Majority vote over index-based trees. Ties go to Calendar-Interval.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<IndexNode>,
}

impl RandomForest {
    pub fn validate(&self, width: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        if let Some(class) = self.trees.iter().find_map(IndexNode::non_binary_leaf) {
            return Err(format!("leaf class {class}, expected 0 or 1"));
        }
        match self.trees.iter().filter_map(IndexNode::max_feature).max() {
            Some(max) if max >= width => Err(format!("split on column {max}, template has {width}")),
            _ => Ok(()),
        }
    }
}

impl VectorModel for RandomForest {
    fn predict(&self, rows: &[Vec<i32>]) -> Vec<f64> {
        rows.iter()
            .map(|row| {
                let votes: usize = self.trees.iter().map(|t| usize::from(t.predict(row))).sum();
                if votes * 2 > self.trees.len() {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize) -> IndexNode {
        IndexNode::Split {
            feature,
            present: Box::new(IndexNode::Leaf { class: 1 }),
            absent: Box::new(IndexNode::Leaf { class: 0 }),
        }
    }

    #[test]
    fn majority_vote() {
        let forest = RandomForest { trees: vec![stump(0), stump(1), stump(2)] };
        assert_eq!(forest.predict(&[vec![1, 1, 0], vec![1, 0, 0]]), vec![1.0, 0.0]);
    }

    #[test]
    fn rejects_out_of_range_column() {
        let forest = RandomForest { trees: vec![stump(4)] };
        assert!(forest.validate(3).is_err());
        assert!(forest.validate(5).is_ok());
    }

    #[test]
    fn rejects_non_binary_leaf() {
        let tree = IndexNode::Split {
            feature: 0,
            present: Box::new(IndexNode::Leaf { class: 1 }),
            absent: Box::new(IndexNode::Leaf { class: 2 }),
        };
        let forest = RandomForest { trees: vec![stump(0), tree] };
        assert_eq!(forest.validate(1).unwrap_err(), "leaf class 2, expected 0 or 1");
    }
}
