use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("coordinate is missing")]
    Missing,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse the string pair the API sends for farms and connectors.
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self, GeoError> {
        let lat = parse_component(latitude)?;
        let lon = parse_component(longitude)?;
        Self::new(lat, lon)
    }
}

fn parse_component(raw: Option<&str>) -> Result<f64, GeoError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(GeoError::Missing)?;
    // Some farms were entered with a decimal comma.
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| GeoError::NotANumber(raw.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeoError::NotANumber(raw.to_string()))
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}
