use cardio_app::domain::vitals::{FEATURE_COUNT, FeatureVector};
use serde::Deserialize;

use crate::ModelLoadError;

const LEAF: i64 = -1;

/// One fitted decision tree in flattened node-array form. Node `i` is a leaf
/// when `children_left[i] == -1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights `[negative, positive]`.
    pub value: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn check(&self, index: usize) -> Result<(), ModelLoadError> {
        let invalid = |msg: String| ModelLoadError::Invalid(format!("tree {}: {}", index, msg));
        let n = self.children_left.len();
        if n == 0 {
            return Err(invalid("no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                let [neg, pos] = self.value[node];
                if !(neg >= 0.0 && pos >= 0.0 && neg + pos > 0.0) {
                    return Err(invalid(format!("leaf {} has no class weight", node)));
                }
                continue;
            }
            // Children always follow their parent, so traversal terminates.
            for child in [left, right] {
                if child <= node as i64 || child as usize >= n {
                    return Err(invalid(format!("node {} has bad child {}", node, child)));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= FEATURE_COUNT {
                return Err(invalid(format!(
                    "node {} splits on feature {}",
                    node, feature
                )));
            }
            if self.threshold[node].is_nan() {
                return Err(invalid(format!("node {} has NaN threshold", node)));
            }
        }
        Ok(())
    }

    fn leaf_for(&self, features: &FeatureVector) -> usize {
        let x = features.as_slice();
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    fn positive_probability(&self, features: &FeatureVector) -> f64 {
        let [neg, pos] = self.value[self.leaf_for(features)];
        pos / (neg + pos)
    }
}

impl ForestModel {
    pub(crate) fn check(&self) -> Result<(), ModelLoadError> {
        if self.trees.is_empty() {
            return Err(ModelLoadError::Invalid("forest has no trees".to_string()));
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.check(i))
    }

    pub fn positive_probability(&self, features: &FeatureVector) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.positive_probability(features))
            .sum();
        total / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on age (feature 0) at 55.
    fn stump(low: [f64; 2], high: [f64; 2]) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![55.0, -2.0, -2.0],
            value: vec![[10.0, 10.0], low, high],
        }
    }

    fn with_age(age: f64) -> FeatureVector {
        let mut x = [0.0; FEATURE_COUNT];
        x[0] = age;
        FeatureVector(x)
    }

    #[test]
    fn test_threshold_is_inclusive_on_the_left() {
        let tree = stump([9.0, 1.0], [2.0, 8.0]);
        tree.check(0).unwrap();
        assert!((tree.positive_probability(&with_age(55.0)) - 0.1).abs() < 1e-12);
        assert!((tree.positive_probability(&with_age(55.5)) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = ForestModel {
            trees: vec![stump([1.0, 0.0], [0.0, 1.0]), stump([1.0, 1.0], [1.0, 3.0])],
        };
        forest.check().unwrap();
        assert!((forest.positive_probability(&with_age(30.0)) - 0.25).abs() < 1e-12);
        assert!((forest.positive_probability(&with_age(70.0)) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_backward_child_is_rejected() {
        let mut tree = stump([1.0, 0.0], [0.0, 1.0]);
        tree.children_right[0] = 0;
        assert!(matches!(tree.check(0), Err(ModelLoadError::Invalid(_))));
    }

    #[test]
    fn test_split_feature_out_of_range_is_rejected() {
        let mut tree = stump([1.0, 0.0], [0.0, 1.0]);
        tree.feature[0] = 13;
        assert!(tree.check(0).is_err());
    }
}
