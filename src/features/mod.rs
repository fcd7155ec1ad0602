//! Feature synthesis: five readings expanded into the classifier's fixed input schema.

mod climatology;
mod synth;

pub use climatology::Climatology;
pub use synth::{rolling_mean_3, FeatureSynthesizer};

use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

/// Number of columns the classifier was trained on
pub const FEATURE_DIM: usize = 34;

/// Column names in the artifact's input order
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "YEAR",
    "DOY",
    "PRECTOTCORR",
    "T2M",
    "T2MDEW",
    "RH2M",
    "WS10M",
    "PS",
    "elevation",
    "PRECTOTCORR_lag_1",
    "PRECTOTCORR_lag_2",
    "PRECTOTCORR_lag_3",
    "T2M_lag_1",
    "T2M_lag_2",
    "T2M_lag_3",
    "T2MDEW_lag_1",
    "T2MDEW_lag_2",
    "T2MDEW_lag_3",
    "RH2M_lag_1",
    "RH2M_lag_2",
    "RH2M_lag_3",
    "WS10M_lag_1",
    "WS10M_lag_2",
    "WS10M_lag_3",
    "PRECTOTCORR_roll_avg_3",
    "PRECTOTCORR_roll_avg_5",
    "T2M_roll_avg_3",
    "T2M_roll_avg_5",
    "T2MDEW_roll_avg_3",
    "T2MDEW_roll_avg_5",
    "RH2M_roll_avg_3",
    "RH2M_roll_avg_5",
    "WS10M_roll_avg_3",
    "WS10M_roll_avg_5",
];

/// One request's model input. Built fresh per analysis and dropped after the classifier call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIM],
}

impl FeatureVector {
    pub(crate) fn from_columns(values: [f64; FEATURE_DIM]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        FEATURE_DIM
    }

    /// Values in column order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// `(name, value)` pairs in column order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// Narrowed to f32 for runtimes that take float tensors
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_DIM))?;
        for (name, value) in self.named() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
