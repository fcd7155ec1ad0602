//! Static bounds table for the sidebar fields.

use super::InputError;

/// Sidebar section a field is rendered under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Temporal,
    Rainfall,
    Moisture,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 3] = [FieldGroup::Temporal, FieldGroup::Rainfall, FieldGroup::Moisture];

    pub fn heading(self) -> &'static str {
        match self {
            FieldGroup::Temporal => "1. Temporal Data",
            FieldGroup::Rainfall => "2. Rainfall Metrics",
            FieldGroup::Moisture => "3. Moisture Metrics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    RainfallToday,
    RainfallYesterday,
    DewPointToday,
    DewPointYesterday,
}

/// `[min, max, default]` plus the presentation attached to one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub integer: bool,
    pub help: Option<&'static str>,
}

const YEAR: FieldSpec = FieldSpec {
    key: "year",
    label: "Year",
    min: 2000.0,
    max: 2030.0,
    default: 2023.0,
    integer: true,
    help: Some("Cloudbursts are showing an increasing trend in recent years."),
};

const RAINFALL_TODAY: FieldSpec = FieldSpec {
    key: "rainfall_today",
    label: "Today's Rainfall (mm)",
    min: 0.0,
    max: 500.0,
    default: 13.21,
    integer: false,
    help: None,
};

const RAINFALL_YESTERDAY: FieldSpec = FieldSpec {
    key: "rainfall_yesterday",
    label: "Yesterday's Rainfall (mm)",
    min: 0.0,
    max: 500.0,
    default: 8.73,
    integer: false,
    help: None,
};

const DEW_POINT_TODAY: FieldSpec = FieldSpec {
    key: "dew_point_today",
    label: "Dew Point Temp (°C)",
    min: -20.0,
    max: 40.0,
    default: 17.61,
    integer: false,
    help: Some("Higher Dew Point = More moisture in the air."),
};

const DEW_POINT_YESTERDAY: FieldSpec = FieldSpec {
    key: "dew_point_yesterday",
    label: "Yesterday's Dew Point (°C)",
    min: -20.0,
    max: 40.0,
    default: 16.77,
    integer: false,
    help: None,
};

impl Field {
    /// Sidebar order
    pub const ALL: [Field; 5] = [
        Field::Year,
        Field::RainfallToday,
        Field::RainfallYesterday,
        Field::DewPointToday,
        Field::DewPointYesterday,
    ];

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            Field::Year => &YEAR,
            Field::RainfallToday => &RAINFALL_TODAY,
            Field::RainfallYesterday => &RAINFALL_YESTERDAY,
            Field::DewPointToday => &DEW_POINT_TODAY,
            Field::DewPointYesterday => &DEW_POINT_YESTERDAY,
        }
    }

    pub fn group(self) -> FieldGroup {
        match self {
            Field::Year => FieldGroup::Temporal,
            Field::RainfallToday | Field::RainfallYesterday => FieldGroup::Rainfall,
            Field::DewPointToday | Field::DewPointYesterday => FieldGroup::Moisture,
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.spec().key == key)
    }
}

impl FieldSpec {
    /// Enforce bounds. Returns the value unchanged when accepted.
    pub fn check(&self, value: f64) -> Result<f64, InputError> {
        if !value.is_finite() {
            return Err(InputError::NotFinite { field: self.label });
        }
        if value < self.min || value > self.max {
            return Err(InputError::OutOfRange {
                field: self.label,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    /// Parse and bound-check user text. Integer fields refuse fractional input.
    pub fn parse(&self, raw: &str) -> Result<f64, InputError> {
        let trimmed = raw.trim();
        let unparsable = || InputError::Unparsable {
            field: self.label,
            raw: trimmed.to_string(),
        };
        let value = if self.integer {
            trimmed.parse::<i64>().map_err(|_| unparsable())? as f64
        } else {
            trimmed.parse::<f64>().map_err(|_| unparsable())?
        };
        self.check(value)
    }

    /// Value as shown in the sidebar
    pub fn display(&self, value: f64) -> String {
        if self.integer {
            format!("{}", value as i64)
        } else {
            format!("{:.2}", value)
        }
    }
}
