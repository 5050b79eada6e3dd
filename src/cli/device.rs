//! `device <imei>`: one atlas with its connector readouts.

use chrono::{DateTime, Utc};

use super::session::require_session;
use super::CliContext;
use crate::cli_output::{field_line, icons, print_header, print_line, print_section};
use crate::error::SpheragResult;
use crate::models::{Atlas, Connector, GeoLocation, NOT_AVAILABLE};
use crate::traits::{CredentialsProvider, HttpClient};

/// Labelled summary fields for the top of the report.
pub fn detail_fields(atlas: &Atlas, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
    let kind = match (&atlas.atlas_type, &atlas.product_type_name) {
        (_, Some(product)) if !product.is_empty() => product.clone(),
        (Some(kind), _) => kind.label(),
        _ => NOT_AVAILABLE.to_string(),
    };
    let expires = match atlas.expires_at() {
        Some(at) if atlas.is_expired(now) => format!("{} (expired)", at.format("%Y-%m-%d")),
        Some(at) => at.format("%Y-%m-%d").to_string(),
        None => NOT_AVAILABLE.to_string(),
    };
    let location = |geo: Option<GeoLocation>| {
        geo.map_or_else(|| NOT_AVAILABLE.to_string(), |g| g.to_string())
    };

    vec![
        ("IMEI", atlas.imei.clone()),
        ("Name", atlas.name.clone()),
        ("Type", kind),
        ("Status", atlas.status_label()),
        (
            "Energy mode",
            atlas
                .energy_mode
                .map_or_else(|| NOT_AVAILABLE.to_string(), |mode| mode.to_string()),
        ),
        ("Battery", atlas.battery_display()),
        ("Signal", atlas.signal_display()),
        ("Expires", expires),
        ("Location", location(atlas.geolocation())),
        ("Map centre", location(atlas.map_center())),
    ]
}

/// `#1 Pump · Main pump` followed by its readouts and coordinates.
pub fn connector_lines(connector: &Connector) -> Vec<String> {
    let mut lines = vec![format!(
        "#{} {} · {}",
        connector.connector_number,
        connector.kind.label(),
        connector.name
    )];
    lines.extend(
        connector
            .readouts()
            .iter()
            .map(|readout| field_line(&readout.label, &readout.value)),
    );
    let coordinates = connector
        .geolocation()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |geo| geo.to_string());
    lines.push(field_line("Coordinates", &coordinates));
    lines
}

pub fn print_device(atlas: &Atlas, now: DateTime<Utc>) {
    print_header(&format!("DEVICE {}", atlas.imei));
    for (label, value) in detail_fields(atlas, now) {
        println!("{}", field_line(label, &value));
    }
    for (title, connectors) in atlas.connectors.groups() {
        if connectors.is_empty() {
            continue;
        }
        print_section(title);
        for connector in connectors {
            for line in connector_lines(connector) {
                println!("{}", line);
            }
        }
    }
    if atlas.connectors.is_empty() {
        println!();
        print_line(icons::WARNING, "No connectors reported");
    }
}

pub async fn run_device<C, P>(ctx: &CliContext<C, P>, imei: &str) -> SpheragResult<()>
where
    C: HttpClient + 'static,
    P: CredentialsProvider,
{
    require_session(ctx)?;
    match ctx.api.get_atlas(imei).await? {
        Some(atlas) => print_device(&atlas, Utc::now()),
        None => print_line(icons::WARNING, &format!("No data for device {}", imei)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn atlas() -> Atlas {
        serde_json::from_value(json!({
            "imei": "8600",
            "name": "Sector 4",
            "type": 2,
            "batteryPercentage": 30,
            "signalPercentage": 71,
            "expiredDate": "2024-06-30T00:00:00",
            "atlasStatus": 10,
            "energyMode": 0,
            "connectors": {
                "output": [{
                    "id": 1, "connectorNumber": 2, "name": "Valve A", "type": 0,
                    "latitude": "37.5", "longitude": "-5.25",
                    "valve": {"isMaster": true, "mode": 0, "status": 1}
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_detail_fields() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let fields = detail_fields(&atlas(), now);
        let get = |name: &str| {
            fields
                .iter()
                .find(|(label, _)| *label == name)
                .map(|(_, value)| value.clone())
                .unwrap()
        };

        assert_eq!(get("Status"), "Real time, low battery");
        assert_eq!(get("Battery"), "[▮▮  ] 30%");
        assert_eq!(get("Expires"), "2024-06-30 (expired)");
        assert_eq!(get("Location"), "N/A");
        assert_eq!(get("Map centre"), "37.50000, -5.25000");
    }

    #[test]
    fn test_connector_lines() {
        let atlas = atlas();
        let lines = connector_lines(&atlas.connectors.output[0]);
        assert_eq!(lines[0], "#2 Valve · Valve A");
        assert!(lines.iter().any(|l| l.contains("Master:") && l.ends_with("Yes")));
        assert!(lines.iter().any(|l| l.contains("Status:") && l.ends_with("On")));
        assert_eq!(lines.last().unwrap(), &field_line("Coordinates", "37.50000, -5.25000"));
    }
}
