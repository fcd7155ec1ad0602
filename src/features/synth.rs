//! Readings → feature vector: persistence-filled lags, 3-point rolling means, climatology for the rest.

use super::{Climatology, FeatureVector};
use crate::collector::WeatherInputs;

/// Arithmetic mean of exactly three terms
pub fn rolling_mean_3(current: f64, lag_1: f64, lag_2: f64) -> f64 {
    (current + lag_1 + lag_2) / 3.0
}

/// Pure, deterministic expansion of [`WeatherInputs`] into a [`FeatureVector`].
///
/// Days two and three back are unknown; they are filled with yesterday's value rather
/// than a long-run average so a building storm is not diluted. The 5-point rolling
/// average has no extra history to draw on and repeats the 3-point one.
#[derive(Debug, Clone, Default)]
pub struct FeatureSynthesizer {
    climatology: Climatology,
}

impl FeatureSynthesizer {
    pub fn new(climatology: Climatology) -> Self {
        Self { climatology }
    }

    pub fn synthesize(&self, inputs: &WeatherInputs) -> FeatureVector {
        let c = &self.climatology;

        let rain = inputs.rainfall_today;
        let rain_lag_1 = inputs.rainfall_yesterday;
        let rain_lag_2 = rain_lag_1;
        let rain_lag_3 = rain_lag_1;

        let dew = inputs.dew_point_today;
        let dew_lag_1 = inputs.dew_point_yesterday;
        let dew_lag_2 = dew_lag_1;
        let dew_lag_3 = dew_lag_1;

        let rain_roll_3 = rolling_mean_3(rain, rain_lag_1, rain_lag_2);
        let dew_roll_3 = rolling_mean_3(dew, dew_lag_1, dew_lag_2);

        let t = c.temperature;
        let rh = c.humidity;
        let ws = c.wind_speed;

        FeatureVector::from_columns([
            inputs.year as f64,
            c.day_of_year,
            rain,
            t,
            dew,
            rh,
            ws,
            c.surface_pressure,
            c.elevation,
            // lags
            rain_lag_1,
            rain_lag_2,
            rain_lag_3,
            t,
            t,
            t,
            dew_lag_1,
            dew_lag_2,
            dew_lag_3,
            rh,
            rh,
            rh,
            ws,
            ws,
            ws,
            // rolling averages (3, 5)
            rain_roll_3,
            rain_roll_3,
            t,
            t,
            dew_roll_3,
            dew_roll_3,
            rh,
            rh,
            ws,
            ws,
        ])
    }
}
