//! ONNX Runtime inference. Input: [1, FEATURE_DIM] f32; output: class-probability tensor.
//! Built with the `onnx` feature; the runtime library is loaded from `ORT_DYLIB_PATH`.
//!
//! Exporting the trained scikit-learn forest (zipmap off, so probabilities come back
//! as a `[1, 2]` tensor named `probabilities`):
//!
//! ```text
//! from skl2onnx import convert_sklearn
//! from skl2onnx.common.data_types import FloatTensorType
//! rf = joblib.load("cloudburst_rf_model.pkl")
//! onx = convert_sklearn(rf, initial_types=[("input", FloatTensorType([None, 34]))],
//!                       options={id(rf): {"zipmap": False}})
//! open("cloudburst_rf_model.onnx", "wb").write(onx.SerializeToString())
//! ```

use super::{checked_probability, Classifier, ModelError};
use crate::features::{FeatureVector, FEATURE_DIM};
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, ValueType};
use std::path::Path;

const PROBABILITY_OUTPUT: &str = "probabilities";

pub struct OnnxClassifier {
    session: Session,
    probability_output: String,
}

impl OnnxClassifier {
    /// Build a session from the artifact. The caller has already checked that the file exists.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level1))
            .and_then(|b| b.with_intra_threads(1))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| ModelError::Corrupt(e.to_string()))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| ModelError::Corrupt("model declares no inputs".to_string()))?;
        if let ValueType::Tensor { dimensions, .. } = &input.input_type {
            // -1 marks a dynamic axis
            if let Some(width) = dimensions.get(1).filter(|w| **w >= 0) {
                if *width as usize != FEATURE_DIM {
                    return Err(ModelError::Corrupt(format!(
                        "model expects {width} features, schema has {FEATURE_DIM}"
                    )));
                }
            }
        }

        let probability_output = session
            .outputs
            .iter()
            .find(|o| o.name == PROBABILITY_OUTPUT)
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::Corrupt("model declares no outputs".to_string()))?;

        tracing::debug!(
            input = %input.name,
            output = %probability_output,
            "ONNX session ready"
        );

        Ok(Self {
            session,
            probability_output,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let inference = |e: ort::Error| ModelError::Inference(e.to_string());

        let arr = Array2::from_shape_vec((1, FEATURE_DIM), features.to_f32())
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let input = Tensor::from_array(arr).map_err(inference)?;
        let outputs = self
            .session
            .run(ort::inputs![input].map_err(inference)?)
            .map_err(inference)?;
        let out = outputs
            .get(self.probability_output.as_str())
            .ok_or_else(|| ModelError::Inference("probability output missing".to_string()))?;
        let (_, probs) = out.try_extract_raw_tensor::<f32>().map_err(inference)?;

        // [1, 2] for a binary classifier; column 1 is the cloudburst class
        let p = match probs {
            [_, positive, ..] => *positive,
            [only] => *only,
            [] => return Err(ModelError::Inference("empty probability tensor".to_string())),
        };
        checked_probability(p as f64)
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
