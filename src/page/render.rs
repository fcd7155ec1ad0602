use crate::collector::{Field, FieldGroup, WeatherInputs};
use crate::config::RegionConfig;
use crate::model::ModelError;
use crate::risk::{RiskAssessment, RiskEngine};
use crate::session::{Session, SessionState};
use std::io::{self, Write};
use std::path::Path;

/// Character width of the risk meter bar
pub const METER_WIDTH: usize = 20;

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Fixed text shown when the classifier artifact cannot be loaded
pub fn startup_failure_message(model_path: &Path) -> String {
    let name = model_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| model_path.display().to_string());
    format!("Model file not found! Please ensure '{name}' is in the same folder.")
}

/// `[#####...............]` for a 0–100 gauge
pub fn progress_bar(gauge: u8) -> String {
    let filled = (gauge.min(100) as usize * METER_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(METER_WIDTH - filled))
}

pub struct Page<'a> {
    region: &'a RegionConfig,
}

impl<'a> Page<'a> {
    pub fn new(region: &'a RegionConfig) -> Self {
        Self { region }
    }

    pub fn render_header(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "⛈  Himachal Cloudburst Early Warning System")?;
        writeln!(w, "AI-Powered Disaster Prediction (Pilot Project)")?;
        writeln!(w)?;
        writeln!(
            w,
            "This system uses a Random Forest Classifier to predict the probability of a"
        )?;
        writeln!(w, "cloudburst event based on 5 key weather indicators.")?;
        writeln!(w, "  * Target Region: {}", self.region.target)?;
        writeln!(w, "  * Data Source: {}", self.region.data_source)?;
        Ok(())
    }

    pub fn render_sidebar(&self, w: &mut impl Write, inputs: &WeatherInputs) -> io::Result<()> {
        writeln!(w, "{RULE}")?;
        writeln!(w, "Input Weather Conditions")?;
        for group in FieldGroup::ALL {
            writeln!(w, "  {}", group.heading())?;
            for field in Field::ALL.into_iter().filter(|f| f.group() == group) {
                let spec = field.spec();
                writeln!(
                    w,
                    "    {:<28} {:>8}   [{} .. {}]  ({})",
                    spec.label,
                    spec.display(inputs.get(field)),
                    spec.display(spec.min),
                    spec.display(spec.max),
                    spec.key,
                )?;
                if let Some(help) = spec.help {
                    writeln!(w, "      {help}")?;
                }
            }
        }
        Ok(())
    }

    pub fn render_assessment(
        &self,
        w: &mut impl Write,
        assessment: &RiskAssessment,
        engine: &RiskEngine,
    ) -> io::Result<()> {
        let pct = assessment.percentage();
        writeln!(w, "{RULE}")?;
        writeln!(w, "Analysis Result")?;
        if assessment.is_alert() {
            writeln!(w, "  🚨 CRITICAL ALERT: CLOUDBURST LIKELY")?;
            writeln!(
                w,
                "  The model detected a high probability ({pct}) of extreme precipitation."
            )?;
            writeln!(
                w,
                "  ⚠  Recommendation: Issue early warning to {}.",
                self.region.authority
            )?;
        } else {
            writeln!(w, "  ✅ SAFE: No Cloudburst Detected")?;
            writeln!(w, "  Risk level is low ({pct}). Conditions appear normal.")?;
        }
        writeln!(w)?;
        writeln!(w, "Risk Meter")?;
        writeln!(w, "  Probability: {pct}  ({})", engine.threshold_label())?;
        let gauge = assessment.gauge();
        writeln!(w, "  {} {gauge}/100", progress_bar(gauge))?;
        Ok(())
    }

    /// Result region for the session's current state; nothing while idle
    pub fn render_state(&self, w: &mut impl Write, session: &Session) -> io::Result<()> {
        match session.state() {
            SessionState::Idle => Ok(()),
            SessionState::Result(analysis) => {
                self.render_assessment(w, &analysis.assessment, session.engine())?;
                writeln!(
                    w,
                    "  Assessed at {}",
                    analysis.assessed_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            SessionState::Error(message) => {
                writeln!(w, "{RULE}")?;
                writeln!(w, "Analysis failed: {message}")?;
                writeln!(w, "Adjust the inputs and analyze again.")
            }
        }
    }

    pub fn render(&self, w: &mut impl Write, session: &Session) -> io::Result<()> {
        self.render_header(w)?;
        self.render_sidebar(w, session.inputs())?;
        self.render_state(w, session)
    }

    /// Halting screen: only the title and the fixed message, no input fields
    pub fn render_startup_failure(
        &self,
        w: &mut impl Write,
        model_path: &Path,
        error: &ModelError,
    ) -> io::Result<()> {
        writeln!(w, "⛈  Himachal Cloudburst Early Warning System")?;
        writeln!(w, "{RULE}")?;
        writeln!(w, "ERROR: {}", startup_failure_message(model_path))?;
        writeln!(w, "  ({error})")?;
        Ok(())
    }
}
