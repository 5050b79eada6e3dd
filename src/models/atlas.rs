//! Atlas devices and their status codes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::connector::{Connector, NOT_AVAILABLE};
use super::geo::GeoLocation;
use super::{deserialize_coordinate, null_as_default, parse_api_date};

/// Communication/power state reported by an atlas (codes 1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum AtlasStatus {
    Sleeping,
    SleepingNoCommunication,
    SleepingNoBattery,
    SleepingLowBattery,
    SleepingLowSignal,
    SleepingLowBatteryAndSignal,
    RealTime,
    RealTimeNoCommunication,
    RealTimeNoBattery,
    RealTimeLowBattery,
    RealTimeLowSignal,
    RealTimeLowBatteryAndSignal,
    Unknown(i64),
}

impl From<i64> for AtlasStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => AtlasStatus::Sleeping,
            2 => AtlasStatus::SleepingNoCommunication,
            3 => AtlasStatus::SleepingNoBattery,
            4 => AtlasStatus::SleepingLowBattery,
            5 => AtlasStatus::SleepingLowSignal,
            6 => AtlasStatus::SleepingLowBatteryAndSignal,
            7 => AtlasStatus::RealTime,
            8 => AtlasStatus::RealTimeNoCommunication,
            9 => AtlasStatus::RealTimeNoBattery,
            10 => AtlasStatus::RealTimeLowBattery,
            11 => AtlasStatus::RealTimeLowSignal,
            12 => AtlasStatus::RealTimeLowBatteryAndSignal,
            other => AtlasStatus::Unknown(other),
        }
    }
}

impl AtlasStatus {
    pub fn code(&self) -> i64 {
        match self {
            AtlasStatus::Sleeping => 1,
            AtlasStatus::SleepingNoCommunication => 2,
            AtlasStatus::SleepingNoBattery => 3,
            AtlasStatus::SleepingLowBattery => 4,
            AtlasStatus::SleepingLowSignal => 5,
            AtlasStatus::SleepingLowBatteryAndSignal => 6,
            AtlasStatus::RealTime => 7,
            AtlasStatus::RealTimeNoCommunication => 8,
            AtlasStatus::RealTimeNoBattery => 9,
            AtlasStatus::RealTimeLowBattery => 10,
            AtlasStatus::RealTimeLowSignal => 11,
            AtlasStatus::RealTimeLowBatteryAndSignal => 12,
            AtlasStatus::Unknown(code) => *code,
        }
    }

    pub fn label(&self) -> String {
        let label = match self {
            AtlasStatus::Sleeping => "Sleeping",
            AtlasStatus::SleepingNoCommunication => "Sleeping, no communication",
            AtlasStatus::SleepingNoBattery => "Sleeping, no battery",
            AtlasStatus::SleepingLowBattery => "Sleeping, low battery",
            AtlasStatus::SleepingLowSignal => "Sleeping, low signal",
            AtlasStatus::SleepingLowBatteryAndSignal => "Sleeping, low battery and signal",
            AtlasStatus::RealTime => "Real time",
            AtlasStatus::RealTimeNoCommunication => "Real time, no communication",
            AtlasStatus::RealTimeNoBattery => "Real time, no battery",
            AtlasStatus::RealTimeLowBattery => "Real time, low battery",
            AtlasStatus::RealTimeLowSignal => "Real time, low signal",
            AtlasStatus::RealTimeLowBatteryAndSignal => "Real time, low battery and signal",
            AtlasStatus::Unknown(code) => return format!("Unknown status ({})", code),
        };
        label.to_string()
    }

    /// Status colour as `#rrggbb`.
    pub fn colour_hex(&self) -> &'static str {
        match self.code() {
            1..=3 => "#b7bec6",
            4..=6 => "#fcb900",
            7 => "#00d082",
            8 => "#fcb900",
            9 => "#ff0000",
            10 | 11 => "#ff6600",
            12 => "#ff0000",
            _ => "#b7bec6",
        }
    }

    /// Status colour as an RGB triple.
    pub fn colour_rgb(&self) -> (u8, u8, u8) {
        let hex = &self.colour_hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    pub fn is_real_time(&self) -> bool {
        (7..=12).contains(&self.code())
    }
}

impl fmt::Display for AtlasStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Product family of an atlas (codes 0..=19).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum AtlasType {
    HumiditySensor,
    FlowMeter,
    IrrigationController,
    WeatherStation,
    Pump,
    Valve,
    PressureMeter,
    StorageTank,
    Filter,
    LevelMeter,
    LevelController,
    AlarmSystem,
    PhController,
    TemperatureSensor,
    ConductivityMeter,
    PressureValve,
    WaterAnalyzer,
    VentilationSystem,
    LeakDetector,
    AutomatedController,
    Unknown(i64),
}

const ATLAS_TYPES: [(AtlasType, &str); 20] = [
    (AtlasType::HumiditySensor, "Humidity sensor"),
    (AtlasType::FlowMeter, "Flow meter"),
    (AtlasType::IrrigationController, "Irrigation controller"),
    (AtlasType::WeatherStation, "Weather station"),
    (AtlasType::Pump, "Pump"),
    (AtlasType::Valve, "Valve"),
    (AtlasType::PressureMeter, "Pressure meter"),
    (AtlasType::StorageTank, "Storage tank"),
    (AtlasType::Filter, "Filter"),
    (AtlasType::LevelMeter, "Level meter"),
    (AtlasType::LevelController, "Level controller"),
    (AtlasType::AlarmSystem, "Alarm system"),
    (AtlasType::PhController, "pH controller"),
    (AtlasType::TemperatureSensor, "Temperature sensor"),
    (AtlasType::ConductivityMeter, "Conductivity meter"),
    (AtlasType::PressureValve, "Pressure valve"),
    (AtlasType::WaterAnalyzer, "Water analyzer"),
    (AtlasType::VentilationSystem, "Ventilation system"),
    (AtlasType::LeakDetector, "Leak detector"),
    (AtlasType::AutomatedController, "Automated controller"),
];

impl From<i64> for AtlasType {
    fn from(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|i| ATLAS_TYPES.get(i))
            .map(|(kind, _)| *kind)
            .unwrap_or(AtlasType::Unknown(code))
    }
}

impl AtlasType {
    pub fn code(&self) -> i64 {
        match self {
            AtlasType::Unknown(code) => *code,
            known => ATLAS_TYPES
                .iter()
                .position(|(kind, _)| kind == known)
                .map_or(-1, |i| i as i64),
        }
    }

    pub fn label(&self) -> String {
        match self {
            AtlasType::Unknown(code) => format!("Unknown type ({})", code),
            known => ATLAS_TYPES
                .iter()
                .find(|(kind, _)| kind == known)
                .map_or_else(String::new, |(_, label)| label.to_string()),
        }
    }
}

impl fmt::Display for AtlasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Power profile of an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum EnergyMode {
    RealTime,
    Eco,
    Sleep,
    Unknown(i64),
}

impl From<i64> for EnergyMode {
    fn from(code: i64) -> Self {
        match code {
            0 => EnergyMode::RealTime,
            1 => EnergyMode::Eco,
            2 => EnergyMode::Sleep,
            other => EnergyMode::Unknown(other),
        }
    }
}

impl fmt::Display for EnergyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyMode::RealTime => f.write_str("Real time"),
            EnergyMode::Eco => f.write_str("Eco"),
            EnergyMode::Sleep => f.write_str("Sleep"),
            EnergyMode::Unknown(code) => write!(f, "Mode {}", code),
        }
    }
}

/// Coarse battery indicator derived from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BatteryLevel {
    Empty,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl BatteryLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage <= 0.0 {
            BatteryLevel::Empty
        } else if percentage <= 25.0 {
            BatteryLevel::Quarter
        } else if percentage <= 50.0 {
            BatteryLevel::Half
        } else if percentage <= 75.0 {
            BatteryLevel::ThreeQuarters
        } else {
            BatteryLevel::Full
        }
    }

    /// Five-cell gauge for terminal output.
    pub fn gauge(&self) -> &'static str {
        match self {
            BatteryLevel::Empty => "[    ]",
            BatteryLevel::Quarter => "[▮   ]",
            BatteryLevel::Half => "[▮▮  ]",
            BatteryLevel::ThreeQuarters => "[▮▮▮ ]",
            BatteryLevel::Full => "[▮▮▮▮]",
        }
    }
}

/// Connectors grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Connectors {
    #[serde(deserialize_with = "null_as_default")]
    pub input: Vec<Connector>,
    #[serde(deserialize_with = "null_as_default")]
    pub output: Vec<Connector>,
    #[serde(deserialize_with = "null_as_default")]
    pub sensor: Vec<Connector>,
}

impl Connectors {
    /// All groups in display order, paired with their title.
    pub fn groups(&self) -> [(&'static str, &[Connector]); 3] {
        [
            ("Inputs", self.input.as_slice()),
            ("Outputs", self.output.as_slice()),
            ("Sensors", self.sensor.as_slice()),
        ]
    }

    pub fn len(&self) -> usize {
        self.input.len() + self.output.len() + self.sensor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.input.iter().chain(&self.output).chain(&self.sensor)
    }
}

/// A monitored device, keyed by IMEI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atlas {
    pub imei: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, rename = "type")]
    pub atlas_type: Option<AtlasType>,

    #[serde(default)]
    pub product_type_name: Option<String>,

    #[serde(default)]
    pub system_id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub latitude: Option<String>,

    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub longitude: Option<String>,

    #[serde(default)]
    pub battery_percentage: Option<f64>,

    #[serde(default)]
    pub signal_percentage: Option<f64>,

    #[serde(default)]
    pub expired_date: Option<String>,

    #[serde(default)]
    pub atlas_status: Option<AtlasStatus>,

    #[serde(default)]
    pub energy_mode: Option<EnergyMode>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub connectors: Connectors,
}

impl Atlas {
    pub fn battery_level(&self) -> Option<BatteryLevel> {
        self.battery_percentage.map(BatteryLevel::from_percentage)
    }

    /// Licence expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expired_date.as_deref().and_then(parse_api_date)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }

    pub fn geolocation(&self) -> Option<GeoLocation> {
        GeoLocation::parse(self.latitude.as_deref(), self.longitude.as_deref()).ok()
    }

    /// `[▮▮▮ ] 70%`, or `N/A` without a reading.
    pub fn battery_display(&self) -> String {
        match (self.battery_level(), self.battery_percentage) {
            (Some(level), Some(pct)) => format!("{} {:.0}%", level.gauge(), pct),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn signal_display(&self) -> String {
        self.signal_percentage
            .map_or_else(|| NOT_AVAILABLE.to_string(), |pct| format!("{:.0}%", pct))
    }

    pub fn status_label(&self) -> String {
        self.atlas_status
            .map_or_else(|| NOT_AVAILABLE.to_string(), |status| status.label())
    }

    /// Where a map of this device should be centred: the first connector of
    /// the first non-empty group (inputs, then outputs, then sensors), if that
    /// connector has a usable location.
    pub fn map_center(&self) -> Option<GeoLocation> {
        self.connectors
            .groups()
            .into_iter()
            .find_map(|(_, group)| group.first())
            .and_then(Connector::geolocation)
    }
}
