//! Input collection: the five bounded weather readings entered by the user.

mod fields;

pub use fields::{Field, FieldGroup, FieldSpec};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field}: cannot parse '{raw}' as a number")]
    Unparsable { field: &'static str, raw: String },
}

/// One set of readings as collected from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherInputs {
    pub year: i32,
    /// Today's rainfall (mm)
    pub rainfall_today: f64,
    /// Yesterday's rainfall (mm)
    pub rainfall_yesterday: f64,
    /// Today's dew point (°C)
    pub dew_point_today: f64,
    /// Yesterday's dew point (°C)
    pub dew_point_yesterday: f64,
}

impl Default for WeatherInputs {
    fn default() -> Self {
        Self {
            year: Field::Year.spec().default as i32,
            rainfall_today: Field::RainfallToday.spec().default,
            rainfall_yesterday: Field::RainfallYesterday.spec().default,
            dew_point_today: Field::DewPointToday.spec().default,
            dew_point_yesterday: Field::DewPointYesterday.spec().default,
        }
    }
}

impl WeatherInputs {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Year => self.year as f64,
            Field::RainfallToday => self.rainfall_today,
            Field::RainfallYesterday => self.rainfall_yesterday,
            Field::DewPointToday => self.dew_point_today,
            Field::DewPointYesterday => self.dew_point_yesterday,
        }
    }

    /// Set a field after bound enforcement. The stored value is untouched on error.
    pub fn set(&mut self, field: Field, value: f64) -> Result<(), InputError> {
        let value = field.spec().check(value)?;
        match field {
            Field::Year => self.year = value.round() as i32,
            Field::RainfallToday => self.rainfall_today = value,
            Field::RainfallYesterday => self.rainfall_yesterday = value,
            Field::DewPointToday => self.dew_point_today = value,
            Field::DewPointYesterday => self.dew_point_yesterday = value,
        }
        Ok(())
    }

    /// Parse user text for a field, then set it
    pub fn set_from_str(&mut self, field: Field, raw: &str) -> Result<(), InputError> {
        let value = field.spec().parse(raw)?;
        self.set(field, value)
    }

    /// Reject the whole set if any reading is outside its bounds
    pub fn validate(&self) -> Result<(), InputError> {
        for field in Field::ALL {
            field.spec().check(self.get(field))?;
        }
        Ok(())
    }
}
