//! Leaflet map rendering.
//!
//! The renderer only sees `(latitude, longitude, icon)` triples and returns a
//! self-contained HTML fragment (a container `div` plus the script that draws
//! the tiles and markers) ready to be embedded in a page.

use pokemap_core::view::MapMarker;
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
  "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Default map centre: Moscow.
pub const MOSCOW_CENTER: (f64, f64) = (55.751244, 37.618423);

/// The shape handed to the map script; nothing else about a marker leaks into
/// the page.
#[derive(Serialize)]
struct Pin<'a> {
  lat:  f64,
  lon:  f64,
  icon: &'a str,
}

/// Renders marker lists as Leaflet maps.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafletMap {
  /// `(latitude, longitude)` the map opens on.
  pub center:    (f64, f64),
  pub zoom:      u8,
  /// Icon edge length in pixels.
  pub icon_size: u32,
}

impl Default for LeafletMap {
  fn default() -> Self {
    Self { center: MOSCOW_CENTER, zoom: 12, icon_size: 50 }
  }
}

impl LeafletMap {
  pub fn render(&self, markers: &[MapMarker]) -> Result<String, serde_json::Error> {
    let pins: Vec<Pin<'_>> = markers
      .iter()
      .map(|m| Pin {
        lat:  m.latitude,
        lon:  m.longitude,
        icon: &m.icon_image_url,
      })
      .collect();

    // `</` inside the JSON would end the script element early.
    let pins_json = serde_json::to_string(&pins)?.replace("</", "<\\/");
    let tile_json = serde_json::to_string(TILE_URL)?;
    let attribution_json = serde_json::to_string(TILE_ATTRIBUTION)?;
    let (lat, lon) = self.center;
    let zoom = self.zoom;
    let size = self.icon_size;

    Ok(format!(
      r#"<link rel="stylesheet" href="{LEAFLET_CSS}"/>
<script src="{LEAFLET_JS}"></script>
<div id="map" style="width: 100%; height: 100%; min-height: 500px;"></div>
<script>
(function () {{
  var map = L.map("map").setView([{lat}, {lon}], {zoom});
  L.tileLayer({tile_json}, {{ attribution: {attribution_json} }}).addTo(map);
  {pins_json}.forEach(function (pin) {{
    L.marker([pin.lat, pin.lon], {{
      icon: L.icon({{ iconUrl: pin.icon, iconSize: [{size}, {size}] }})
    }}).addTo(map);
  }});
}})();
</script>"#
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn marker(lat: f64, lon: f64, icon: &str) -> MapMarker {
    MapMarker {
      species_id:     1,
      latitude:       lat,
      longitude:      lon,
      icon_image_url: icon.into(),
    }
  }

  #[test]
  fn renders_center_zoom_and_pins() {
    let html = LeafletMap::default()
      .render(&[marker(55.7, 37.6, "http://h/media/a.png")])
      .unwrap();
    assert!(html.contains("setView([55.751244, 37.618423], 12)"), "{html}");
    assert!(html.contains(r#"{"lat":55.7,"lon":37.6,"icon":"http://h/media/a.png"}"#));
    assert!(html.contains("iconSize: [50, 50]"));
  }

  #[test]
  fn empty_marker_list_still_draws_map() {
    let html = LeafletMap::default().render(&[]).unwrap();
    assert!(html.contains("[].forEach"));
    assert!(html.contains(r#"<div id="map""#));
  }

  #[test]
  fn icon_urls_cannot_close_the_script() {
    let html = LeafletMap::default()
      .render(&[marker(0.0, 0.0, "x</script><script>alert(1)")])
      .unwrap();
    assert!(!html.contains("x</script>"));
    assert!(html.contains(r"x<\/script>"));
  }
}
