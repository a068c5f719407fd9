//! Standalone HTML page for a rendered map
//!
//! The map view is embedded as JSON and turned into Leaflet layers by a small
//! fixed script, so the page needs nothing but the Leaflet CDN and tile server.

use crate::domain::html::escape_html;
use crate::services::map_view::MapView;

const PAGE_STYLE: &str = r#"html, body { height: 100%; margin: 0; }
.map-container { width: 100%; height: 100%; }
.legend { background: #fff; padding: 6px 8px; line-height: 18px; color: #555; border-radius: 5px; box-shadow: 0 0 15px rgba(0, 0, 0, 0.2); }
.legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.9; }"#;

const PAGE_SCRIPT: &str = r#"(function () {
  var view = JSON.parse(document.getElementById("map-view").textContent);
  var layers = {};
  var baseMaps = {};
  view.base_layers.forEach(function (b) {
    layers[b.name] = L.tileLayer(b.url_template, {
      attribution: b.attribution, maxZoom: b.max_zoom, id: b.id, accessToken: b.access_token
    });
    baseMaps[b.name] = layers[b.name];
  });
  var overlayMaps = {};
  var quakes = view.overlays.earthquakes;
  if (quakes) {
    layers[quakes.name] = L.layerGroup(quakes.markers.map(function (m) {
      return L.circle([m.lat, m.lon], {
        radius: m.radius, color: m.color, fillColor: m.fill_color, fillOpacity: m.fill_opacity
      }).bindPopup(m.popup);
    }));
    overlayMaps[quakes.name] = layers[quakes.name];
  }
  var faults = view.overlays.fault_lines;
  if (faults) {
    layers[faults.name] = L.geoJSON(faults.data, {
      style: function () { return { color: faults.style.color, fillOpacity: faults.style.fill_opacity }; }
    });
    overlayMaps[faults.name] = layers[faults.name];
  }
  var map = L.map(view.container_id, {
    center: view.center, zoom: view.zoom,
    layers: view.initial_layers.map(function (n) { return layers[n]; })
  });
  L.control.layers(baseMaps, overlayMaps, { collapsed: view.layer_control.collapsed }).addTo(map);
  var legend = L.control({ position: view.legend.position });
  legend.onAdd = function () {
    var div = L.DomUtil.create("div", "info legend");
    div.innerHTML = document.getElementById("map-legend").innerHTML;
    return div;
  };
  legend.addTo(map);
})();"#;

/// Serialize the view for embedding inside a `<script>` element
fn embed_json(view: &MapView) -> serde_json::Result<String> {
    Ok(serde_json::to_string(view)?.replace("</", "<\\/"))
}

/// Render the complete HTML document
pub fn render_page(view: &MapView, leaflet_url: &str) -> serde_json::Result<String> {
    let json = embed_json(view)?;
    let leaflet_url = leaflet_url.trim_end_matches('/');
    let container = escape_html(&view.container_id);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{leaflet}/leaflet.css">
<style>
{style}
</style>
</head>
<body>
<div id="{container}" class="map-container"></div>
<template id="map-legend">{legend}</template>
<script type="application/json" id="map-view">{json}</script>
<script src="{leaflet}/leaflet.js"></script>
<script>
{script}
</script>
</body>
</html>
"#,
        title = escape_html(&view.title),
        leaflet = escape_html(leaflet_url),
        style = PAGE_STYLE,
        container = container,
        legend = view.legend.to_html(),
        json = json,
        script = PAGE_SCRIPT,
    ))
}
