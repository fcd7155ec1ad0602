//! Native random-forest evaluation from a JSON export of scikit-learn `tree_` arrays.
//!
//! Each tree is stored as parallel arrays indexed by node id:
//! `children_left`, `children_right` (-1 at leaves), `feature`, `threshold`
//! and `value` (per-class weights). A sample goes left when `x <= threshold`,
//! with `x` rounded to f32 first as scikit-learn does. The forest probability
//! is the mean of each tree's normalised leaf distribution.
//!
//! Dumping the trained forest from its pickle:
//!
//! ```text
//! rf = joblib.load("cloudburst_rf_model.pkl")
//! trees = [{"children_left": t.children_left.tolist(),
//!           "children_right": t.children_right.tolist(),
//!           "feature": t.feature.tolist(),
//!           "threshold": t.threshold.tolist(),
//!           "value": t.value[:, 0, :].tolist()}
//!          for t in (e.tree_ for e in rf.estimators_)]
//! json.dump({"feature_names": list(rf.feature_names_in_),
//!            "n_features": int(rf.n_features_in_), "trees": trees},
//!           open("cloudburst_rf_model.json", "w"))
//! ```

use super::{checked_probability, Classifier, ModelError};
use crate::features::{FeatureVector, FEATURE_DIM, FEATURE_NAMES};
use serde::Deserialize;

const LEAF: i64 = -1;
const POSITIVE_CLASS: usize = 1;

#[derive(Debug, Clone, Deserialize)]
struct ForestArtifact {
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    n_features: usize,
    trees: Vec<TreeArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
struct TreeArtifact {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        positive: f64,
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_artifact(index: usize, t: TreeArtifact) -> Result<Self, ModelError> {
        let corrupt = |msg: String| ModelError::Corrupt(format!("tree {index}: {msg}"));
        let n = t.children_left.len();
        if n == 0 {
            return Err(corrupt("no nodes".to_string()));
        }
        if [t.children_right.len(), t.feature.len(), t.threshold.len(), t.value.len()]
            .iter()
            .any(|len| *len != n)
        {
            return Err(corrupt("node arrays differ in length".to_string()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (l, r) = (t.children_left[i], t.children_right[i]);
            if l == LEAF && r == LEAF {
                let weights = &t.value[i];
                if weights.len() <= POSITIVE_CLASS {
                    return Err(corrupt(format!("leaf {i} has {} classes", weights.len())));
                }
                let total: f64 = weights.iter().sum();
                if !(total.is_finite() && total > 0.0) || weights.iter().any(|w| *w < 0.0) {
                    return Err(corrupt(format!("leaf {i} has unusable class weights")));
                }
                nodes.push(Node::Leaf {
                    positive: weights[POSITIVE_CLASS] / total,
                });
                continue;
            }
            // Children always follow their parent; this also rules out cycles.
            let child = |c: i64| -> Option<usize> {
                usize::try_from(c).ok().filter(|c| *c > i && *c < n)
            };
            let (Some(left), Some(right)) = (child(l), child(r)) else {
                return Err(corrupt(format!("node {i} has invalid children ({l}, {r})")));
            };
            let feature = usize::try_from(t.feature[i])
                .ok()
                .filter(|f| *f < FEATURE_DIM)
                .ok_or_else(|| corrupt(format!("node {i} splits on feature {}", t.feature[i])))?;
            let threshold = t.threshold[i];
            if threshold.is_nan() {
                return Err(corrupt(format!("node {i} has NaN threshold")));
            }
            nodes.push(Node::Split {
                feature,
                threshold,
                left,
                right,
            });
        }
        Ok(Self { nodes })
    }

    fn leaf_probability(&self, x: &[f64]) -> f64 {
        let mut i = 0;
        loop {
            match &self.nodes[i] {
                Node::Leaf { positive } => return *positive,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let v = x[*feature] as f32 as f64;
                    i = if v <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Random forest held fully in memory
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    trees: Vec<Tree>,
}

impl ForestClassifier {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ForestArtifact =
            serde_json::from_slice(bytes).map_err(|e| ModelError::Corrupt(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: ForestArtifact) -> Result<Self, ModelError> {
        if artifact.n_features != FEATURE_DIM {
            return Err(ModelError::Corrupt(format!(
                "model expects {} features, schema has {FEATURE_DIM}",
                artifact.n_features
            )));
        }
        if let Some(names) = &artifact.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(ModelError::Corrupt(
                    "feature names do not match the input schema".to_string(),
                ));
            }
        }
        if artifact.trees.is_empty() {
            return Err(ModelError::Corrupt("forest has no trees".to_string()));
        }
        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, t)| Tree::from_artifact(i, t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trees })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for ForestClassifier {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = features.as_slice();
        if x.len() != FEATURE_DIM {
            return Err(ModelError::Inference(format!(
                "expected {FEATURE_DIM} features, got {}",
                x.len()
            )));
        }
        let sum: f64 = self.trees.iter().map(|t| t.leaf_probability(x)).sum();
        checked_probability(sum / self.trees.len() as f64)
    }

    fn kind(&self) -> &'static str {
        "forest"
    }
}
