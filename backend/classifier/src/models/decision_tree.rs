use std::collections::HashMap;

use serde::Deserialize;

use super::NamedFeatureModel;

/// A binary tree splitting on named boolean features.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum TreeNode {
    Leaf {
        class: f64,
    },
    Split {
        feature: String,
        present: Box<TreeNode>,
        absent: Box<TreeNode>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub root: TreeNode,
}

impl DecisionTree {
    /// Names the tree splits on, for checking against the template.
    pub fn split_features(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if let TreeNode::Split { feature, present, absent } = node {
                out.push(feature.as_str());
                stack.push(present);
                stack.push(absent);
            }
        }
        out
    }
}

impl NamedFeatureModel for DecisionTree {
    fn classify(&self, features: &HashMap<&str, bool>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split { feature, present, absent } => {
                    node = if features.get(feature.as_str()).copied().unwrap_or(false) {
                        present
                    } else {
                        absent
                    };
                }
            }
        }
    }
}
