//! Turns a classifier probability into a verdict against the fixed alert threshold.

use serde::{Deserialize, Serialize};

/// Alert cutoff, tuned offline. Not configurable at runtime.
pub const ALERT_THRESHOLD: f64 = 0.09;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Alert,
    Safe,
}

impl Verdict {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= ALERT_THRESHOLD {
            Verdict::Alert
        } else {
            Verdict::Safe
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Alert => "alert",
            Verdict::Safe => "safe",
        }
    }
}

/// Probability rendered the way the page shows it, e.g. `"50.0%"`
pub fn format_percentage(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Result of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub verdict: Verdict,
    pub probability: f64,
}

impl RiskAssessment {
    pub fn percentage(&self) -> String {
        format_percentage(self.probability)
    }

    /// Risk meter position on a 0–100 scale (truncated)
    pub fn gauge(&self) -> u8 {
        (self.probability * 100.0).clamp(0.0, 100.0) as u8
    }

    pub fn is_alert(&self) -> bool {
        self.verdict == Verdict::Alert
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskEngine;

impl RiskEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, probability: f64) -> RiskAssessment {
        RiskAssessment {
            verdict: Verdict::from_probability(probability),
            probability,
        }
    }

    pub fn threshold(&self) -> f64 {
        ALERT_THRESHOLD
    }

    /// Threshold label for the risk meter, e.g. `"Threshold: 9.0%"`
    pub fn threshold_label(&self) -> String {
        format!("Threshold: {}", format_percentage(ALERT_THRESHOLD))
    }
}
