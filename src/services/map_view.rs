//! Map view assembly - base tiles, overlays, layer control and legend

use crate::domain::legend::Legend;
use crate::infra::config::Config;
use crate::services::layers::{EarthquakeLayer, FaultLineLayer};
use serde::Serialize;

const TILE_MAX_ZOOM: u8 = 18;

const TILE_ATTRIBUTION: &str = "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, Imagery \u{a9} <a href=\"https://www.mapbox.com/\">Mapbox</a>";

/// Base maps as (control label, tileset id). The first one is shown on load.
const BASE_MAPS: [(&str, &str); 3] = [
    ("Outdoor Map", "mapbox.outdoors"),
    ("Greyscale Map", "mapbox.light"),
    ("Satellite Map", "mapbox.satellite"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: &'static str,
    pub id: &'static str,
    pub url_template: String,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlays {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earthquakes: Option<EarthquakeLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_lines: Option<FaultLineLayer>,
}

impl Overlays {
    /// Names of overlays present, in control order
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(2);
        if let Some(layer) = &self.earthquakes {
            names.push(layer.name);
        }
        if let Some(layer) = &self.fault_lines {
            names.push(layer.name);
        }
        names
    }
}

/// Everything the page needs to draw the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub container_id: String,
    pub title: String,
    pub center: [f64; 2],
    pub zoom: u8,
    pub base_layers: Vec<TileLayer>,
    pub overlays: Overlays,
    /// Layers displayed on load: first base layer, then every present overlay
    pub initial_layers: Vec<&'static str>,
    pub layer_control: LayerControl,
    pub legend: Legend,
}

impl MapView {
    pub fn assemble(
        config: &Config,
        earthquakes: Option<EarthquakeLayer>,
        fault_lines: Option<FaultLineLayer>,
    ) -> Self {
        let base_layers: Vec<TileLayer> = BASE_MAPS
            .iter()
            .map(|&(name, id)| TileLayer {
                name,
                id,
                url_template: config.tile_url().to_string(),
                attribution: TILE_ATTRIBUTION,
                max_zoom: TILE_MAX_ZOOM,
                access_token: config.access_token().to_string(),
            })
            .collect();

        let overlays = Overlays { earthquakes, fault_lines };

        let mut initial_layers = Vec::with_capacity(3);
        if let Some(first) = base_layers.first() {
            initial_layers.push(first.name);
        }
        initial_layers.extend(overlays.names());

        Self {
            container_id: config.container_id().to_string(),
            title: config.title().to_string(),
            center: config.center(),
            zoom: config.zoom(),
            base_layers,
            overlays,
            initial_layers,
            layer_control: LayerControl { collapsed: false },
            legend: Legend::magnitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_without_overlays() {
        let config = Config::default().with_access_token("pk.abc");
        let view = MapView::assemble(&config, None, None);

        let names: Vec<&str> = view.base_layers.iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Outdoor Map", "Greyscale Map", "Satellite Map"]);
        assert_eq!(view.initial_layers, vec!["Outdoor Map"]);
        assert!(view.overlays.names().is_empty());
        assert_eq!(view.container_id, "map");
        assert_eq!(view.center, [37.09, -95.71]);
        assert_eq!(view.zoom, 4);
        assert!(!view.layer_control.collapsed);
        assert_eq!(view.legend.position, "bottomright");
    }

    #[test]
    fn test_base_layers_share_token_and_template() {
        let config = Config::default().with_access_token("pk.abc");
        let view = MapView::assemble(&config, None, None);
        let ids: Vec<&str> = view.base_layers.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["mapbox.outdoors", "mapbox.light", "mapbox.satellite"]);
        for layer in &view.base_layers {
            assert_eq!(layer.max_zoom, 18);
            assert_eq!(layer.access_token, "pk.abc");
            assert_eq!(layer.url_template, config.tile_url());
        }
    }

    #[test]
    fn test_absent_overlays_not_serialized() {
        let view = MapView::assemble(&Config::default(), None, None);
        let value = serde_json::to_value(&view).unwrap();
        assert!(value["overlays"].as_object().unwrap().is_empty());
    }
}
