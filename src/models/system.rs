//! Farm records ("systems" on the wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::GeoLocation;
use super::{deserialize_coordinate, null_as_default, parse_api_date};

/// A farm as returned by `GET /System/List`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// IANA zone, e.g. `Europe/Madrid`.
    #[serde(default, rename = "timeZone")]
    pub timezone: Option<String>,

    /// Windows-style zone name.
    #[serde(default)]
    pub time_zone_standard: Option<String>,

    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub latitude: Option<String>,

    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub longitude: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// Local-only flag; toggling it never calls the API.
    #[serde(default, rename = "favourite", deserialize_with = "null_as_default")]
    pub favorite: bool,

    #[serde(default)]
    pub measuring_system_type_id: Option<i64>,

    #[serde(default)]
    pub currency_type_id: Option<i64>,

    #[serde(default)]
    pub currency_symbol: Option<String>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default, rename = "type")]
    pub system_type: Option<i64>,
}

impl System {
    /// Parsed farm location, if both coordinates are usable.
    pub fn geolocation(&self) -> Option<GeoLocation> {
        GeoLocation::parse(self.latitude.as_deref(), self.longitude.as_deref()).ok()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_date.as_deref().and_then(parse_api_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_deserialization() {
        let json = r#"{
            "id": 42,
            "measuringSystemTypeId": 1,
            "timeZone": "Europe/Madrid",
            "latitude": "37.3891",
            "longitude": "-5.9845",
            "name": "Finca El Olivar",
            "timeZoneStandard": "Romance Standard Time",
            "description": "Olive grove",
            "image": "https://cdn.example.com/farm.png",
            "country": "ES",
            "favourite": true,
            "currencyTypeId": 2,
            "currencySymbol": "€",
            "createdDate": "2023-05-10T08:30:00",
            "type": 0
        }"#;

        let system: System = serde_json::from_str(json).unwrap();
        assert_eq!(system.id, 42);
        assert_eq!(system.name, "Finca El Olivar");
        assert_eq!(system.timezone.as_deref(), Some("Europe/Madrid"));
        assert!(system.favorite);
        assert_eq!(system.system_type, Some(0));
        assert!(system.created_at().is_some());
        let geo = system.geolocation().unwrap();
        assert_eq!(geo.latitude, 37.3891);
    }

    #[test]
    fn test_system_minimal_and_nulls() {
        let json = r#"{"id": 7, "name": null, "favourite": null, "latitude": ""}"#;
        let system: System = serde_json::from_str(json).unwrap();
        assert_eq!(system.name, "");
        assert!(!system.favorite);
        assert!(system.geolocation().is_none());
    }
}
