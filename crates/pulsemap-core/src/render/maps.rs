use std::fs;
use std::path::Path;

use serde_json::json;

use crate::error::Result;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_HEAT_JS: &str = "https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js";

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>__TITLE__</title>
<link rel="stylesheet" href="__LEAFLET_CSS__" />
<script src="__LEAFLET_JS__"></script>
__EXTRA_SCRIPTS__
<style>html, body, #map { height: 100%; width: 100%; margin: 0; padding: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView(__CENTER__, __ZOOM__);
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
__LAYERS__
</script>
</body>
</html>
"#;

const HEAT_LAYER: &str = r#"var points = __POINTS__;
L.heatLayer(points, { radius: 25, blur: 15 }).addTo(map);"#;

/// Hotspots are drawn as red dots rather than marker pins.
const CLUSTER_LAYERS: &str = r#"var pickups = __POINTS__;
pickups.forEach(function (p) {
  L.circleMarker(p, { radius: 3, color: "blue", fill: true }).addTo(map);
});
var hotspotIcon = L.divIcon({
  className: "hotspot-icon",
  html: '<div style="width:14px;height:14px;border-radius:7px;background:red;border:2px solid white;"></div>',
  iconSize: [18, 18]
});
var hotspots = __CENTERS__;
hotspots.forEach(function (c) {
  L.marker(c, { icon: hotspotIcon }).bindPopup("Hotspot").addTo(map);
});"#;

/// Initial viewport of a rendered map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
}

/// Standalone Leaflet page with a density heat layer over `points` (lat, lon).
pub fn render_heatmap(path: &Path, view: MapView, points: &[[f64; 2]]) -> Result<()> {
    let layers = HEAT_LAYER.replace("__POINTS__", &serde_json::to_string(points)?);
    let html = leaflet_document("Pickup heatmap", view, &[LEAFLET_HEAT_JS], &layers);
    fs::write(path, html)?;
    Ok(())
}

/// Standalone Leaflet page with a circle marker per pickup and a red "Hotspot"
/// marker per cluster center.
pub fn render_cluster_map(
    path: &Path,
    view: MapView,
    points: &[[f64; 2]],
    centers: &[[f64; 2]],
) -> Result<()> {
    let layers = CLUSTER_LAYERS
        .replace("__POINTS__", &serde_json::to_string(points)?)
        .replace("__CENTERS__", &serde_json::to_string(centers)?);
    let html = leaflet_document("Pickup hotspots", view, &[], &layers);
    fs::write(path, html)?;
    Ok(())
}

fn leaflet_document(
    title: &str,
    view: MapView,
    extra_scripts: &[&str],
    layers: &str,
) -> String {
    let scripts: Vec<String> = extra_scripts
        .iter()
        .map(|src| format!(r#"<script src="{src}"></script>"#))
        .collect();

    DOCUMENT_TEMPLATE
        .replace("__TITLE__", title)
        .replace("__LEAFLET_CSS__", LEAFLET_CSS)
        .replace("__LEAFLET_JS__", LEAFLET_JS)
        .replace("__EXTRA_SCRIPTS__", &scripts.join("\n"))
        .replace("__CENTER__", &json!(view.center).to_string())
        .replace("__ZOOM__", &view.zoom.to_string())
        .replace("__LAYERS__", layers)
}
