//! One user's page session: current sidebar inputs and the outcome of the last "analyze".
//!
//! States: `Idle` until the first analysis, then `Result` or `Error` depending on whether
//! the classifier call succeeded. Each analysis is independent; an error never poisons
//! later attempts.

use crate::collector::{Field, InputError, WeatherInputs};
use crate::features::FeatureSynthesizer;
use crate::model::{checked_probability, Classifier, ModelError};
use crate::risk::{RiskAssessment, RiskEngine};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Synthesize features for `inputs`, invoke the classifier once and apply the decision rule.
pub fn analyze(
    inputs: &WeatherInputs,
    synthesizer: &FeatureSynthesizer,
    classifier: &dyn Classifier,
    engine: &RiskEngine,
) -> Result<RiskAssessment, ModelError> {
    let features = synthesizer.synthesize(inputs);
    let probability = checked_probability(classifier.predict_probability(&features)?)?;
    Ok(engine.assess(probability))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub inputs: WeatherInputs,
    pub assessment: RiskAssessment,
    pub assessed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Result(Analysis),
    /// Invocation failure, shown in place of the result
    Error(String),
}

pub struct Session {
    classifier: Arc<dyn Classifier>,
    synthesizer: FeatureSynthesizer,
    engine: RiskEngine,
    inputs: WeatherInputs,
    state: SessionState,
}

impl Session {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            synthesizer: FeatureSynthesizer::default(),
            engine: RiskEngine::new(),
            inputs: WeatherInputs::default(),
            state: SessionState::Idle,
        }
    }

    pub fn inputs(&self) -> &WeatherInputs {
        &self.inputs
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    pub fn set_input(&mut self, field: Field, value: f64) -> Result<(), InputError> {
        self.inputs.set(field, value)
    }

    /// Replace all inputs; rejected as a whole if any reading is out of bounds
    pub fn set_inputs(&mut self, inputs: WeatherInputs) -> Result<(), InputError> {
        inputs.validate()?;
        self.inputs = inputs;
        Ok(())
    }

    /// Back to the sidebar defaults; the last result stays on screen
    pub fn reset_inputs(&mut self) {
        self.inputs = WeatherInputs::default();
    }

    /// The "analyze" action
    pub fn analyze(&mut self) -> &SessionState {
        self.state = match analyze(
            &self.inputs,
            &self.synthesizer,
            self.classifier.as_ref(),
            &self.engine,
        ) {
            Ok(assessment) => {
                info!(
                    probability = assessment.probability,
                    verdict = assessment.verdict.as_str(),
                    "analysis complete"
                );
                SessionState::Result(Analysis {
                    inputs: self.inputs,
                    assessment,
                    assessed_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                SessionState::Error(e.to_string())
            }
        };
        &self.state
    }
}
