//! Regional climatological averages for the readings the sidebar does not collect.

/// Mandi & Kullu monsoon-season averages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climatology {
    /// Day of year (early July)
    pub day_of_year: f64,
    /// 2 m air temperature (°C)
    pub temperature: f64,
    /// 2 m relative humidity (%); high to match storm context
    pub humidity: f64,
    /// 10 m wind speed (m/s)
    pub wind_speed: f64,
    /// Surface pressure (kPa)
    pub surface_pressure: f64,
    /// Station elevation (m)
    pub elevation: f64,
}

impl Climatology {
    pub const MANDI_KULLU: Climatology = Climatology {
        day_of_year: 183.0,
        temperature: 11.9,
        humidity: 85.0,
        wind_speed: 2.3,
        surface_pressure: 77.8,
        elevation: 1419.9,
    };
}

impl Default for Climatology {
    fn default() -> Self {
        Self::MANDI_KULLU
    }
}
