//! Pre-trained cloudburst classifier: artifact loading, the load-once cache, and the
//! `predict_probability` capability the rest of the crate depends on.

mod cache;
mod forest;
#[cfg(feature = "onnx")]
mod onnx;

pub use cache::ModelCache;
pub use forest::ForestClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

use crate::features::FeatureVector;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Slack allowed on f32 probability outputs before they count as malformed
const PROBABILITY_EPSILON: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),
    #[error("model artifact {} is unreadable: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is corrupt: {0}")]
    Corrupt(String),
    #[error("unsupported model artifact format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("{} needs the '{feature}' build feature", .path.display())]
    BackendDisabled { path: PathBuf, feature: &'static str },
    #[error("classifier invocation failed: {0}")]
    Inference(String),
    #[error("classifier returned an invalid probability: {0}")]
    InvalidOutput(f64),
}

impl ModelError {
    /// Errors that can only arise while loading the artifact
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            ModelError::ArtifactMissing(_)
                | ModelError::Unreadable { .. }
                | ModelError::Corrupt(_)
                | ModelError::UnsupportedFormat(_)
                | ModelError::BackendDisabled { .. }
        )
    }
}

/// Binary classifier over the fixed feature schema
pub trait Classifier: Send + Sync {
    /// Probability of the positive (cloudburst) class, in `[0, 1]`
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Short backend name for logs
    fn kind(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Onnx,
    Forest,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "onnx" => Some(ArtifactFormat::Onnx),
            "json" => Some(ArtifactFormat::Forest),
            _ => None,
        }
    }
}

/// Load the artifact at `path`. Every error returned here is a startup failure.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
    if !path.exists() {
        return Err(ModelError::ArtifactMissing(path.to_path_buf()));
    }
    let format =
        ArtifactFormat::from_path(path).ok_or_else(|| ModelError::UnsupportedFormat(path.to_path_buf()))?;
    let bytes = std::fs::read(path).map_err(|source| ModelError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = format!("{:x}", Sha256::digest(&bytes));

    let classifier: Arc<dyn Classifier> = match format {
        ArtifactFormat::Onnx => load_onnx(path)?,
        ArtifactFormat::Forest => Arc::new(ForestClassifier::from_slice(&bytes)?),
    };
    info!(
        path = %path.display(),
        kind = classifier.kind(),
        sha256 = %digest,
        "classifier artifact loaded"
    );
    Ok(classifier)
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
    Ok(Arc::new(OnnxClassifier::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
    Err(ModelError::BackendDisabled {
        path: path.to_path_buf(),
        feature: "onnx",
    })
}

/// Accept a raw backend probability or reject it as an invocation failure
pub(crate) fn checked_probability(p: f64) -> Result<f64, ModelError> {
    if !p.is_finite() || p < -PROBABILITY_EPSILON || p > 1.0 + PROBABILITY_EPSILON {
        return Err(ModelError::InvalidOutput(p));
    }
    Ok(p.clamp(0.0, 1.0))
}
