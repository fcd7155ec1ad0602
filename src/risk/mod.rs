//! Risk decision: probability → verdict.

mod engine;

pub use engine::{format_percentage, RiskAssessment, RiskEngine, Verdict, ALERT_THRESHOLD};
