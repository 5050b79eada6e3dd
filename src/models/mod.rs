//! Wire types for the Spherag API.
//!
//! Every struct here deserializes the camelCase JSON the server sends. The
//! server is loose about nulls and about numbers arriving as strings, so the
//! helpers at the bottom of this module normalise those before the typed
//! fields see them.

mod atlas;
mod connector;
mod geo;
mod page;
mod system;

pub use atlas::{Atlas, AtlasStatus, AtlasType, BatteryLevel, Connectors, EnergyMode};
pub use connector::{
    ActuatorMode, ActuatorState, ActuatorStatus, Connector, ConnectorKind, DigitalInputPayload,
    DigitalInputStatus, FlowmeterPayload, Measurement, Price, PumpPayload, Readout,
    SensorPayload, SensorReading, ValvePayload, NOT_AVAILABLE,
};
pub use geo::{GeoError, GeoLocation};
pub use page::{Page, PageFetch};
pub use system::System;

use serde::{Deserialize, Deserializer};

/// Deserialize a value that may be an explicit `null` as its default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Deserialize a coordinate that may arrive as a string, a number or null.
pub(crate) fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct CoordinateVisitor;

    impl<'de> Visitor<'de> for CoordinateVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(CoordinateVisitor)
}

/// Parse the date formats the API uses (RFC 3339, or a naive timestamp taken as UTC).
pub(crate) fn parse_api_date(raw: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    use chrono::{DateTime, NaiveDateTime, Utc};

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Coords {
        #[serde(default, deserialize_with = "deserialize_coordinate")]
        lat: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_coordinate_accepts_strings_numbers_and_null() {
        let c: Coords = serde_json::from_str(r#"{"lat": "40.41", "tags": null}"#).unwrap();
        assert_eq!(c.lat.as_deref(), Some("40.41"));
        assert!(c.tags.is_empty());

        let c: Coords = serde_json::from_str(r#"{"lat": -3.5}"#).unwrap();
        assert_eq!(c.lat.as_deref(), Some("-3.5"));

        let c: Coords = serde_json::from_str(r#"{"lat": null}"#).unwrap();
        assert!(c.lat.is_none());

        let c: Coords = serde_json::from_str(r#"{"lat": "  "}"#).unwrap();
        assert!(c.lat.is_none());
    }

    #[test]
    fn test_parse_api_date() {
        assert!(parse_api_date("2025-03-01T10:00:00Z").is_some());
        assert!(parse_api_date("2025-03-01T10:00:00.123").is_some());
        assert!(parse_api_date("2025-03-01 10:00:00").is_some());
        assert!(parse_api_date("yesterday").is_none());
    }
}
