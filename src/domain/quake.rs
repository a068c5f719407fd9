//! Earthquake observations extracted from feed features

use crate::domain::geojson::{Feature, Geometry};
use crate::domain::magnitude::Magnitude;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

pub const UNKNOWN_PLACE: &str = "Unknown location";

/// Popup timestamp format, e.g. `Tue Nov 14 2023 22:13:20 UTC`
const POPUP_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Why a feature could not become an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAPoint,
    MissingMagnitude,
    InvalidMagnitude,
    MissingTime,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotAPoint => "not_a_point",
            SkipReason::MissingMagnitude => "missing_magnitude",
            SkipReason::InvalidMagnitude => "invalid_magnitude",
            SkipReason::MissingTime => "missing_time",
        }
    }
}

/// One earthquake from the live feed. Lives for a single render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Earthquake {
    pub id: Option<String>,
    pub magnitude: Magnitude,
    pub place: String,
    /// Milliseconds since the Unix epoch
    pub time_ms: i64,
    pub location: LatLon,
    pub depth_km: Option<f64>,
}

impl Earthquake {
    pub fn from_feature(feature: &Feature) -> Result<Self, SkipReason> {
        let coords = match &feature.geometry {
            Some(Geometry::Point { coordinates }) if coordinates.len() >= 2 => coordinates,
            _ => return Err(SkipReason::NotAPoint),
        };

        let mag = feature.property("mag").ok_or(SkipReason::MissingMagnitude)?;
        let magnitude = mag
            .as_f64()
            .and_then(|m| Magnitude::new(m).ok())
            .ok_or(SkipReason::InvalidMagnitude)?;

        let time_ms = feature.property("time").and_then(Value::as_i64).ok_or(SkipReason::MissingTime)?;

        let place = feature
            .property("place")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_PLACE)
            .to_string();

        let id = feature.id.as_ref().and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(Self {
            id,
            magnitude,
            place,
            time_ms,
            location: LatLon { lat: coords[1], lon: coords[0] },
            depth_km: coords.get(2).copied(),
        })
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time_ms).single()
    }

    /// Human-readable timestamp for the popup
    pub fn time_display(&self) -> String {
        match self.time() {
            Some(t) => t.format(POPUP_TIME_FORMAT).to_string(),
            None => format!("{} ms", self.time_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_feature() {
        let f = feature(json!({
            "type": "Feature",
            "id": "ci40573160",
            "properties": {"mag": 4.2, "place": "10km N of Testville", "time": 1_700_000_000_000i64},
            "geometry": {"type": "Point", "coordinates": [-117.5, 35.2, 8.1]}
        }));

        let quake = Earthquake::from_feature(&f).unwrap();
        assert_eq!(quake.id.as_deref(), Some("ci40573160"));
        assert_eq!(quake.magnitude.value(), 4.2);
        assert_eq!(quake.place, "10km N of Testville");
        assert_eq!(quake.location, LatLon { lat: 35.2, lon: -117.5 });
        assert_eq!(quake.depth_km, Some(8.1));
        assert_eq!(quake.time_display(), "Tue Nov 14 2023 22:13:20 UTC");
    }

    #[test]
    fn test_missing_place_uses_placeholder() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {"mag": 1.1, "place": null, "time": 0},
            "geometry": {"type": "Point", "coordinates": [10.0, 20.0]}
        }));
        let quake = Earthquake::from_feature(&f).unwrap();
        assert_eq!(quake.place, UNKNOWN_PLACE);
        assert_eq!(quake.depth_km, None);
        assert_eq!(quake.time_display(), "Thu Jan 01 1970 00:00:00 UTC");
    }

    #[test]
    fn test_skip_reasons() {
        let null_mag = feature(json!({
            "type": "Feature",
            "properties": {"mag": null, "time": 1},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
        }));
        assert_eq!(Earthquake::from_feature(&null_mag), Err(SkipReason::MissingMagnitude));

        let text_mag = feature(json!({
            "type": "Feature",
            "properties": {"mag": "big", "time": 1},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
        }));
        assert_eq!(Earthquake::from_feature(&text_mag), Err(SkipReason::InvalidMagnitude));

        let no_time = feature(json!({
            "type": "Feature",
            "properties": {"mag": 2.0},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
        }));
        assert_eq!(Earthquake::from_feature(&no_time), Err(SkipReason::MissingTime));

        let line = feature(json!({
            "type": "Feature",
            "properties": {"mag": 2.0, "time": 1},
            "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
        }));
        assert_eq!(Earthquake::from_feature(&line), Err(SkipReason::NotAPoint));
        assert_eq!(SkipReason::NotAPoint.as_str(), "not_a_point");
    }

    #[test]
    fn test_negative_magnitude_is_kept() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {"mag": -0.4, "place": "Borrego Springs", "time": 1},
            "geometry": {"type": "Point", "coordinates": [-116.3, 33.2, 4.0]}
        }));
        let quake = Earthquake::from_feature(&f).unwrap();
        assert!(quake.magnitude.radius().is_degenerate());
    }
}
