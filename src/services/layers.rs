//! Overlay layer construction
//!
//! - Earthquakes: one circle marker per observation, sized and colored by magnitude
//! - Fault lines: plate boundaries passed through with a fixed stroke style

use crate::domain::geojson::FeatureCollection;
use crate::domain::html::escape_html;
use crate::domain::quake::{Earthquake, SkipReason};
use serde::Serialize;
use tracing::debug;

pub const EARTHQUAKES_OVERLAY: &str = "Earthquakes";
pub const FAULT_LINES_OVERLAY: &str = "FaultLines";

const FAULT_LINE_COLOR: &str = "orange";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    pub lat: f64,
    pub lon: f64,
    /// Radius in meters
    pub radius: f64,
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub popup: String,
}

impl CircleMarker {
    pub fn from_quake(quake: &Earthquake) -> Self {
        let color = quake.magnitude.color();
        Self {
            lat: quake.location.lat,
            lon: quake.location.lon,
            radius: quake.magnitude.radius().meters(),
            color,
            fill_color: color,
            fill_opacity: 1.0,
            popup: popup_html(quake),
        }
    }
}

/// Popup body: place as heading, timestamp below a rule
pub fn popup_html(quake: &Earthquake) -> String {
    format!("<h3>{}</h3><hr><p>{}</p>", escape_html(&quake.place), quake.time_display())
}

/// Per-layer counts from building the earthquake layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuakeLayerStats {
    pub drawn: usize,
    pub skipped: usize,
    pub degenerate: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeLayer {
    pub name: &'static str,
    pub markers: Vec<CircleMarker>,
    #[serde(skip)]
    pub stats: QuakeLayerStats,
}

impl EarthquakeLayer {
    pub fn build(collection: &FeatureCollection) -> Self {
        let mut stats = QuakeLayerStats::default();
        let mut markers = Vec::with_capacity(collection.len());

        for feature in &collection.features {
            let quake = match Earthquake::from_feature(feature) {
                Ok(q) => q,
                Err(reason) => {
                    log_skipped(feature.id.as_ref(), reason);
                    stats.skipped += 1;
                    continue;
                }
            };

            if quake.magnitude.radius().is_degenerate() {
                debug!(
                    id = ?quake.id,
                    magnitude = %quake.magnitude,
                    "quake_marker_degenerate_radius"
                );
                stats.degenerate += 1;
                continue;
            }

            markers.push(CircleMarker::from_quake(&quake));
        }

        stats.drawn = markers.len();
        Self { name: EARTHQUAKES_OVERLAY, markers, stats }
    }
}

fn log_skipped(id: Option<&serde_json::Value>, reason: SkipReason) {
    debug!(id = ?id, reason = reason.as_str(), "quake_feature_skipped");
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: &'static str,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultLineLayer {
    pub name: &'static str,
    pub style: PathStyle,
    pub data: FeatureCollection,
}

impl FaultLineLayer {
    pub fn build(collection: FeatureCollection) -> Self {
        Self {
            name: FAULT_LINES_OVERLAY,
            style: PathStyle { color: FAULT_LINE_COLOR, fill_opacity: 0.0 },
            data: collection,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.data.len()
    }
}
