//! Cloudburst early warning: weather readings in, risk verdict out.
//!
//! Modular structure:
//! - [`collector`]: Bounded sidebar inputs
//! - [`features`]: Feature vector synthesis from five readings
//! - [`model`]: Classifier artifacts (ONNX, native forest) and the load-once cache
//! - [`risk`]: Threshold decision rule
//! - [`session`]: Analyze action and page state
//! - [`page`]: Terminal rendering
//! - [`logging`]: Structured logging

pub mod config;
pub mod collector;
pub mod features;
pub mod model;
pub mod risk;
pub mod session;
pub mod page;
pub mod logging;

pub use config::AppConfig;
pub use collector::{Field, InputError, WeatherInputs};
pub use features::{FeatureSynthesizer, FeatureVector};
pub use model::{Classifier, ModelCache, ModelError};
pub use risk::{RiskAssessment, RiskEngine, Verdict};
pub use session::{Session, SessionState};
pub use logging::StructuredLogger;
