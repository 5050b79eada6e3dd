//! Connectors: the sensor and actuator channels wired to an atlas.
//!
//! The API sends every connector with the same flat shape: shared fields plus
//! one nullable object per capability (`pump`, `valve`, `flowmeter`, ...), of
//! which only the one matching `type` is meaningful. [`Connector`] decodes
//! that shape through [`RawConnector`] into a tagged [`ConnectorKind`], so a
//! pump can never carry valve data. An unknown `type` becomes
//! [`ConnectorKind::Unknown`] instead of failing the whole device.

use std::fmt;

use serde::Deserialize;

use super::geo::GeoLocation;
use super::{deserialize_coordinate, null_as_default};

/// Placeholder for values the server did not send.
pub const NOT_AVAILABLE: &str = "N/A";

/// A value with its unit, e.g. `{value: 12.5, symbol: "m³/h"}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Measurement {
    pub value: Option<f64>,
    pub unit_type_id: Option<i64>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub unit_type_group_id: Option<i64>,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.value, self.symbol.as_deref().filter(|s| !s.is_empty())) {
            (Some(value), Some(symbol)) => write!(f, "{} {}", format_number(value), symbol),
            (Some(value), None) => write!(f, "{}", format_number(value)),
            (None, _) => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Energy price attached to a pump.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Price {
    pub value: Option<f64>,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub number: Option<i64>,
    pub symbol: Option<String>,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => match self.symbol.as_deref().or(self.code.as_deref()) {
                Some(unit) => write!(f, "{} {}", format_number(value), unit),
                None => f.write_str(&format_number(value)),
            },
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Operating mode of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorMode {
    Manual,
    Automatic,
    Unknown(i64),
}

impl From<i64> for ActuatorMode {
    fn from(code: i64) -> Self {
        match code {
            0 => ActuatorMode::Manual,
            1 => ActuatorMode::Automatic,
            other => ActuatorMode::Unknown(other),
        }
    }
}

impl fmt::Display for ActuatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorMode::Manual => f.write_str("Manual"),
            ActuatorMode::Automatic => f.write_str("Automatic"),
            ActuatorMode::Unknown(code) => write!(f, "Mode {}", code),
        }
    }
}

/// On/off state of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorStatus {
    Off,
    On,
    Unknown(i64),
}

impl From<i64> for ActuatorStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => ActuatorStatus::Off,
            1 => ActuatorStatus::On,
            other => ActuatorStatus::Unknown(other),
        }
    }
}

impl fmt::Display for ActuatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorStatus::Off => f.write_str("Off"),
            ActuatorStatus::On => f.write_str("On"),
            ActuatorStatus::Unknown(code) => write!(f, "Status {}", code),
        }
    }
}

/// Contact state of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitalInputStatus {
    Open,
    Closed,
    Unknown(i64),
}

impl From<i64> for DigitalInputStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => DigitalInputStatus::Open,
            1 => DigitalInputStatus::Closed,
            other => DigitalInputStatus::Unknown(other),
        }
    }
}

impl fmt::Display for DigitalInputStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigitalInputStatus::Open => f.write_str("Open"),
            DigitalInputStatus::Closed => f.write_str("Closed"),
            DigitalInputStatus::Unknown(code) => write!(f, "Status {}", code),
        }
    }
}

/// Mode and status, the whole payload of mixers and fertilizer dosers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActuatorState {
    pub mode: Option<i64>,
    pub status: Option<i64>,
}

impl ActuatorState {
    pub fn mode(&self) -> Option<ActuatorMode> {
        self.mode.map(ActuatorMode::from)
    }

    pub fn status(&self) -> Option<ActuatorStatus> {
        self.status.map(ActuatorStatus::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PumpPayload {
    pub power: Option<Measurement>,
    pub nominal_flow: Option<Measurement>,
    pub price: Option<Price>,
    pub mode: Option<i64>,
    pub status: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValvePayload {
    pub is_master: Option<bool>,
    pub nominal_flow: Option<Measurement>,
    pub mode: Option<i64>,
    pub status: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowmeterPayload {
    pub pulse: Option<Measurement>,
    pub offset: Option<Measurement>,
    pub accumulated24: Option<Measurement>,
    pub nominal_flow: Option<Measurement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigitalInputPayload {
    pub status: Option<i64>,
    pub is_normally_open: Option<bool>,
    pub digital_input_type: Option<i64>,
}

/// One reading of a generic sensor. Values come as numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorReading {
    pub value: Option<serde_json::Value>,
    pub unit: Option<String>,
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.value {
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(v) => format_number(v),
                None => n.to_string(),
            },
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::Bool(b)) => b.to_string(),
            _ => return f.write_str(NOT_AVAILABLE),
        };
        match self.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => write!(f, "{} {}", value, unit),
            None => f.write_str(&value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<SensorReading>,
    pub initial_depth: Option<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub sensor_custom_channels: Vec<serde_json::Value>,
}

/// Capability of a connector with its payload. The payload is `None` when
/// the server sent the type code without data.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorKind {
    Valve(Option<ValvePayload>),
    Pump(Option<PumpPayload>),
    Fertilizer(Option<ActuatorState>),
    Mixer(Option<ActuatorState>),
    Flowmeter(Option<FlowmeterPayload>),
    DigitalInput(Option<DigitalInputPayload>),
    Sensor(Option<SensorPayload>),
    Unknown { code: i64 },
}

impl ConnectorKind {
    /// Wire type code.
    pub fn code(&self) -> i64 {
        match self {
            ConnectorKind::Valve(_) => 0,
            ConnectorKind::Pump(_) => 1,
            ConnectorKind::Fertilizer(_) => 2,
            ConnectorKind::Mixer(_) => 3,
            ConnectorKind::Flowmeter(_) => 4,
            ConnectorKind::DigitalInput(_) => 5,
            ConnectorKind::Sensor(_) => 6,
            ConnectorKind::Unknown { code } => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectorKind::Valve(_) => "Valve",
            ConnectorKind::Pump(_) => "Pump",
            ConnectorKind::Fertilizer(_) => "Fertilizer doser",
            ConnectorKind::Mixer(_) => "Mixer",
            ConnectorKind::Flowmeter(_) => "Flowmeter",
            ConnectorKind::DigitalInput(_) => "Digital input",
            ConnectorKind::Sensor(_) => "Sensor",
            ConnectorKind::Unknown { .. } => "Unknown",
        }
    }
}

/// A single labelled line of connector data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub label: String,
    pub value: String,
}

impl Readout {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A connector with its decoded capability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawConnector")]
pub struct Connector {
    pub id: i64,
    pub atlas_id: Option<i64>,
    pub connector_number: i64,
    pub name: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub sensor_type_id: Option<i64>,
    pub kind: ConnectorKind,
}

impl Connector {
    pub fn geolocation(&self) -> Option<GeoLocation> {
        GeoLocation::parse(self.latitude.as_deref(), self.longitude.as_deref()).ok()
    }

    /// Human-readable lines for this connector's payload. Missing payloads
    /// and missing values show as `N/A`.
    pub fn readouts(&self) -> Vec<Readout> {
        fn opt<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
        }
        fn yes_no(value: Option<bool>) -> String {
            opt(value.map(|b| if b { "Yes" } else { "No" }))
        }

        match &self.kind {
            ConnectorKind::Valve(payload) => {
                let p = payload.clone().unwrap_or_default();
                vec![
                    Readout::new("Master", yes_no(p.is_master)),
                    Readout::new("Nominal flow", opt(p.nominal_flow)),
                    Readout::new("Mode", opt(p.mode.map(ActuatorMode::from))),
                    Readout::new("Status", opt(p.status.map(ActuatorStatus::from))),
                ]
            }
            ConnectorKind::Pump(payload) => {
                let p = payload.clone().unwrap_or_default();
                vec![
                    Readout::new("Power", opt(p.power)),
                    Readout::new("Nominal flow", opt(p.nominal_flow)),
                    Readout::new("Price", opt(p.price)),
                    Readout::new("Mode", opt(p.mode.map(ActuatorMode::from))),
                    Readout::new("Status", opt(p.status.map(ActuatorStatus::from))),
                ]
            }
            ConnectorKind::Fertilizer(payload) | ConnectorKind::Mixer(payload) => {
                let p = payload.clone().unwrap_or_default();
                vec![
                    Readout::new("Mode", opt(p.mode())),
                    Readout::new("Status", opt(p.status())),
                ]
            }
            ConnectorKind::Flowmeter(payload) => {
                let p = payload.clone().unwrap_or_default();
                vec![
                    Readout::new("Pulse", opt(p.pulse)),
                    Readout::new("Offset", opt(p.offset)),
                    Readout::new("Accumulated 24h", opt(p.accumulated24)),
                    Readout::new("Nominal flow", opt(p.nominal_flow)),
                ]
            }
            ConnectorKind::DigitalInput(payload) => {
                let p = payload.clone().unwrap_or_default();
                vec![
                    Readout::new("Status", opt(p.status.map(DigitalInputStatus::from))),
                    Readout::new("Normally open", yes_no(p.is_normally_open)),
                    Readout::new("Input type", opt(p.digital_input_type)),
                ]
            }
            ConnectorKind::Sensor(payload) => match payload {
                Some(p) if !p.values.is_empty() => p
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, reading)| Readout::new(format!("Reading {}", i + 1), reading.to_string()))
                    .collect(),
                _ => vec![Readout::new("Readings", NOT_AVAILABLE)],
            },
            ConnectorKind::Unknown { code } => {
                vec![Readout::new("Type", format!("Unknown ({})", code))]
            }
        }
    }
}

/// The flat wire shape of a connector.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConnector {
    id: i64,
    atlas_id: Option<i64>,
    connector_number: i64,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(rename = "type")]
    type_code: Option<i64>,
    #[serde(deserialize_with = "deserialize_coordinate")]
    latitude: Option<String>,
    #[serde(deserialize_with = "deserialize_coordinate")]
    longitude: Option<String>,
    sensor_type_id: Option<i64>,
    valve: Option<ValvePayload>,
    pump: Option<PumpPayload>,
    fertilizer: Option<ActuatorState>,
    mixer: Option<ActuatorState>,
    flowmeter: Option<FlowmeterPayload>,
    digital_input: Option<DigitalInputPayload>,
    sensor: Option<SensorPayload>,
}

impl From<RawConnector> for Connector {
    fn from(raw: RawConnector) -> Self {
        let kind = match raw.type_code {
            Some(0) => ConnectorKind::Valve(raw.valve),
            Some(1) => ConnectorKind::Pump(raw.pump),
            Some(2) => ConnectorKind::Fertilizer(raw.fertilizer),
            Some(3) => ConnectorKind::Mixer(raw.mixer),
            Some(4) => ConnectorKind::Flowmeter(raw.flowmeter),
            Some(5) => ConnectorKind::DigitalInput(raw.digital_input),
            Some(6) => ConnectorKind::Sensor(raw.sensor),
            Some(code) => ConnectorKind::Unknown { code },
            None => ConnectorKind::Unknown { code: -1 },
        };
        Connector {
            id: raw.id,
            atlas_id: raw.atlas_id,
            connector_number: raw.connector_number,
            name: raw.name,
            latitude: raw.latitude,
            longitude: raw.longitude,
            sensor_type_id: raw.sensor_type_id,
            kind,
        }
    }
}

/// Drop trailing zeros: `12.50` → `12.5`, `3.0` → `3`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
