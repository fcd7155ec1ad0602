//! Integration test: config defaults, input bounds, feature synthesis, decision rule,
//! native forest artifact, session states, page rendering and the interactive prompt.

use cloudburst_warning::{
    collector::{Field, InputError, WeatherInputs},
    config::AppConfig,
    features::{rolling_mean_3, FeatureSynthesizer, FeatureVector, FEATURE_DIM, FEATURE_NAMES},
    logging::StructuredLogger,
    model::{load_classifier, Classifier, ModelCache, ModelError},
    page::{run_prompt, Page},
    risk::{RiskEngine, Verdict, ALERT_THRESHOLD},
    session::{analyze, Session, SessionState},
};
use std::path::Path;
use std::sync::Arc;

/// Classifier that always returns the same probability
struct Fixed(f64);

impl Classifier for Fixed {
    fn predict_probability(&self, _: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
    fn kind(&self) -> &'static str {
        "fixed"
    }
}

/// Classifier whose invocation always fails
struct Broken;

impl Classifier for Broken {
    fn predict_probability(&self, _: &FeatureVector) -> Result<f64, ModelError> {
        Err(ModelError::Inference("input tensor rejected".into()))
    }
    fn kind(&self) -> &'static str {
        "broken"
    }
}

fn inputs(rain_today: f64, rain_yesterday: f64, dew_today: f64, dew_yesterday: f64) -> WeatherInputs {
    WeatherInputs {
        year: 2023,
        rainfall_today: rain_today,
        rainfall_yesterday: rain_yesterday,
        dew_point_today: dew_today,
        dew_point_yesterday: dew_yesterday,
    }
}

/// One stump on today's rainfall: <= 20mm → 5% cloudburst, else 50%
fn write_forest(dir: &Path) -> std::path::PathBuf {
    let doc = serde_json::json!({
        "feature_names": FEATURE_NAMES.to_vec(),
        "n_features": FEATURE_DIM,
        "trees": [{
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [2, -2, -2],
            "threshold": [20.0, -2.0, -2.0],
            "value": [[30.0, 10.0], [19.0, 1.0], [10.0, 10.0]]
        }]
    });
    let path = dir.join("cloudburst_rf_model.json");
    std::fs::write(&path, doc.to_string()).unwrap();
    path
}

#[test]
fn config_load_default() {
    let c = AppConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.model_path, Path::new("cloudburst_rf_model.json"));
    assert_eq!(c.log.level, "info");
    assert!(c.region.authority.contains("Mandi"));
}

#[test]
fn config_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"model_path":"models/rf.json","log":{"json":true}}"#).unwrap();
    let c = AppConfig::load(&path);
    assert_eq!(c.model_path, Path::new("models/rf.json"));
    assert!(c.log.json);
    assert_eq!(c.log.level, "info");
}

#[test]
fn collector_defaults_and_bounds() {
    let d = WeatherInputs::default();
    assert_eq!(d, inputs(13.21, 8.73, 17.61, 16.77));
    assert!(d.validate().is_ok());

    let mut w = d;
    let err = w.set(Field::RainfallToday, 600.0).unwrap_err();
    assert!(matches!(err, InputError::OutOfRange { max, .. } if max == 500.0));
    assert_eq!(w.rainfall_today, 13.21);

    assert!(w.set_from_str(Field::DewPointToday, "-5.5").is_ok());
    assert_eq!(w.dew_point_today, -5.5);
    assert!(matches!(
        w.set_from_str(Field::Year, "next year"),
        Err(InputError::Unparsable { .. })
    ));

    let wild = WeatherInputs {
        year: 1990,
        rainfall_today: -3.0,
        dew_point_yesterday: 80.0,
        ..d
    };
    assert!(matches!(
        wild.validate(),
        Err(InputError::OutOfRange { field: "Year", .. })
    ));
}

#[test]
fn synthesizer_emits_full_finite_schema() {
    let s = FeatureSynthesizer::default();
    for (rt, ry, dt, dy) in [(0.0, 0.0, -20.0, -20.0), (500.0, 500.0, 40.0, 40.0), (13.21, 8.73, 17.61, 16.77)] {
        let fv = s.synthesize(&inputs(rt, ry, dt, dy));
        assert_eq!(fv.len(), FEATURE_DIM);
        let named: Vec<_> = fv.named().collect();
        assert_eq!(named.len(), FEATURE_DIM);
        assert!(named.iter().all(|(_, v)| v.is_finite()));
        assert_eq!(named[0].0, "YEAR");
        assert_eq!(named[FEATURE_DIM - 1].0, "WS10M_roll_avg_5");
    }
}

#[test]
fn rainfall_rolling_average_weights_yesterday_twice() {
    let s = FeatureSynthesizer::default();
    for (a, b) in [(0.0, 0.0), (100.0, 3.0), (1.5, 250.0), (13.21, 8.73)] {
        let fv = s.synthesize(&inputs(a, b, 17.61, 16.77));
        let roll = fv.get("PRECTOTCORR_roll_avg_3").unwrap();
        assert!((roll - (a + 2.0 * b) / 3.0).abs() < 1e-9);
        assert_eq!(fv.get("PRECTOTCORR_roll_avg_5"), Some(roll));
    }
    assert_eq!(rolling_mean_3(3.0, 6.0, 9.0), 6.0);
}

#[test]
fn scenario_rainfall_rolling_average() {
    let fv = FeatureSynthesizer::default().synthesize(&WeatherInputs::default());
    let roll = fv.get("PRECTOTCORR_roll_avg_3").unwrap();
    assert!((roll - 10.223).abs() < 1e-3, "{roll}");
}

#[test]
fn scenario_dew_point_rolling_average() {
    let fv = FeatureSynthesizer::default().synthesize(&WeatherInputs::default());
    let roll = fv.get("T2MDEW_roll_avg_3").unwrap();
    assert!((roll - 17.05).abs() < 1e-9, "{roll}");
    assert_eq!(fv.get("T2MDEW_roll_avg_5"), Some(roll));
}

#[test]
fn synthesizer_is_idempotent() {
    let s = FeatureSynthesizer::default();
    let i = inputs(42.0, 7.5, 12.0, 11.0);
    assert_eq!(s.synthesize(&i), s.synthesize(&i));
}

#[test]
fn threshold_boundary() {
    let engine = RiskEngine::new();
    assert_eq!(engine.threshold(), ALERT_THRESHOLD);
    assert_eq!(engine.assess(0.09).verdict, Verdict::Alert);
    assert_eq!(engine.assess(0.089999).verdict, Verdict::Safe);
    assert_eq!(engine.threshold_label(), "Threshold: 9.0%");
}

#[test]
fn scenario_high_probability_alerts() {
    let a = analyze(
        &WeatherInputs::default(),
        &FeatureSynthesizer::default(),
        &Fixed(0.50),
        &RiskEngine::new(),
    )
    .unwrap();
    assert_eq!(a.verdict, Verdict::Alert);
    assert_eq!(a.percentage(), "50.0%");
    assert_eq!(a.gauge(), 50);
}

#[test]
fn scenario_low_probability_is_safe() {
    let a = RiskEngine::new().assess(0.05);
    assert_eq!(a.verdict, Verdict::Safe);
    assert_eq!(a.percentage(), "5.0%");
    assert_eq!(a.gauge(), 5);
}

#[test]
fn scenario_missing_artifact_halts() {
    let cache = ModelCache::new();
    let path = Path::new("nonexistent/cloudburst_rf_model.onnx");
    let err = cache.get_or_load(path).err().unwrap();
    assert!(matches!(err, ModelError::ArtifactMissing(_)));
    assert!(err.is_startup());
    assert!(!cache.is_loaded());

    let config = AppConfig::default();
    let mut out = Vec::new();
    Page::new(&config.region)
        .render_startup_failure(&mut out, path, &err)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(
        "Model file not found! Please ensure 'cloudburst_rf_model.onnx' is in the same folder."
    ));
    for field in Field::ALL {
        assert!(!text.contains(field.spec().label), "{}", field.spec().label);
    }
    assert!(!text.contains("Analysis Result"));
}

#[test]
fn corrupt_forest_is_startup_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, b"{ not json").unwrap();
    let err = load_classifier(&path).err().unwrap();
    assert!(matches!(err, ModelError::Corrupt(_)));
    assert!(err.is_startup());
}

#[test]
fn forest_artifact_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_forest(dir.path());

    let cache = ModelCache::new();
    let first = cache.get_or_load(&path).unwrap();
    assert_eq!(first.kind(), "forest");
    // Later loads hit the cache even if the file is gone
    std::fs::remove_file(&path).unwrap();
    let second = cache.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let mut session = Session::new(second);
    assert_eq!(session.state(), &SessionState::Idle);

    session.set_input(Field::RainfallToday, 10.0).unwrap();
    match session.analyze() {
        SessionState::Result(a) => {
            assert_eq!(a.assessment.verdict, Verdict::Safe);
            assert_eq!(a.assessment.percentage(), "5.0%");
            assert_eq!(a.inputs.rainfall_today, 10.0);
        }
        other => panic!("unexpected state {other:?}"),
    }

    session.set_input(Field::RainfallToday, 120.0).unwrap();
    match session.analyze() {
        SessionState::Result(a) => {
            assert_eq!(a.assessment.verdict, Verdict::Alert);
            assert_eq!(a.assessment.percentage(), "50.0%");
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn invocation_failure_is_recoverable() {
    let mut session = Session::new(Arc::new(Broken));
    match session.analyze() {
        SessionState::Error(msg) => assert!(msg.contains("input tensor rejected")),
        other => panic!("unexpected state {other:?}"),
    }

    let config = AppConfig::default();
    let mut out = Vec::new();
    Page::new(&config.region).render(&mut out, &session).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Analysis failed"));
    assert!(text.contains("Today's Rainfall (mm)"));

    let mut session = Session::new(Arc::new(Fixed(0.2)));
    assert!(matches!(session.analyze(), SessionState::Result(_)));
}

#[test]
fn out_of_range_probability_is_not_a_verdict() {
    let err = analyze(
        &WeatherInputs::default(),
        &FeatureSynthesizer::default(),
        &Fixed(1.7),
        &RiskEngine::new(),
    );
    assert!(err.is_err());
}

#[test]
fn page_renders_alert_panel() {
    let mut session = Session::new(Arc::new(Fixed(0.5)));
    session.analyze();
    let config = AppConfig::default();
    let mut out = Vec::new();
    Page::new(&config.region).render(&mut out, &session).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("CRITICAL ALERT: CLOUDBURST LIKELY"));
    assert!(text.contains("(50.0%)"));
    assert!(text.contains("Issue early warning to Mandi & Kullu administration."));
    assert!(text.contains("Threshold: 9.0%"));
    assert!(text.contains("50/100"));
}

#[test]
fn page_renders_safe_panel() {
    let mut session = Session::new(Arc::new(Fixed(0.05)));
    session.analyze();
    let config = AppConfig::default();
    let mut out = Vec::new();
    Page::new(&config.region).render(&mut out, &session).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("SAFE: No Cloudburst Detected"));
    assert!(text.contains("Risk level is low (5.0%). Conditions appear normal."));
    assert!(!text.contains("CRITICAL ALERT"));
}

#[test]
fn idle_page_has_no_result() {
    let session = Session::new(Arc::new(Fixed(0.5)));
    let config = AppConfig::default();
    let mut out = Vec::new();
    Page::new(&config.region).render(&mut out, &session).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("1. Temporal Data"));
    assert!(text.contains("Cloudbursts are showing an increasing trend"));
    assert!(!text.contains("Analysis Result"));
}

#[test]
fn set_inputs_rejects_as_a_whole() {
    let mut session = Session::new(Arc::new(Fixed(0.5)));
    let bad = WeatherInputs {
        rainfall_yesterday: 501.0,
        ..WeatherInputs::default()
    };
    assert!(session.set_inputs(bad).is_err());
    assert_eq!(session.inputs(), &WeatherInputs::default());
}

/// Run the prompt over `script` and return everything it printed
fn prompt(session: &mut Session, script: &str) -> String {
    let config = AppConfig::default();
    let mut out = Vec::new();
    run_prompt(&Page::new(&config.region), session, &mut script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn prompt_rejects_out_of_range_reading() {
    let mut session = Session::new(Arc::new(Fixed(0.5)));
    let text = prompt(&mut session, "rainfall_today 600\nyear 1999\ndew_point_today warm\nquit\n");
    assert!(text.contains("rejected: Today's Rainfall (mm) must be between 0 and 500 (got 600)"));
    assert!(text.contains("rejected: Year must be between 2000 and 2030"));
    assert!(text.contains("rejected: Dew Point Temp (°C): cannot parse 'warm' as a number"));
    assert_eq!(session.inputs(), &WeatherInputs::default());
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn prompt_sets_reading_then_analyzes() {
    let mut session = Session::new(Arc::new(Fixed(0.05)));
    let text = prompt(&mut session, "rainfall_today 42.5\n\n");
    assert!(text.contains("Today's Rainfall (mm) = 42.50"));
    assert!(text.contains("SAFE: No Cloudburst Detected"));
    assert_eq!(session.inputs().rainfall_today, 42.5);
    assert!(matches!(session.state(), SessionState::Result(_)));
}

#[test]
fn prompt_stops_on_quit_or_end_of_input() {
    let mut session = Session::new(Arc::new(Fixed(0.5)));
    let text = prompt(&mut session, "quit\nanalyze\n");
    assert!(!text.contains("Analysis Result"));
    assert_eq!(session.state(), &SessionState::Idle);

    let text = prompt(&mut session, "");
    assert!(text.contains("1. Temporal Data"));
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn prompt_reset_and_unknown_commands() {
    let mut session = Session::new(Arc::new(Fixed(0.5)));
    let text = prompt(&mut session, "dew_point_today 30\nreset\nhumidity 80\n");
    assert!(text.contains("unknown command 'humidity'"));
    assert_eq!(session.inputs(), &WeatherInputs::default());
}

#[test]
fn logger_init_is_repeatable() {
    StructuredLogger::init(true, "debug");
    StructuredLogger::init(false, "info");
}
