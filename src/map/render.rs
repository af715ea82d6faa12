//! Map construction
//!
//! Builds the structured [`RiskMap`] for one prediction and persists its
//! rendered document through the [`MapStore`].

use serde::Serialize;

use super::html::escape_html;
use super::regions::HighRiskRegion;
use super::store::{MapStore, MapStoreError};
use crate::constants::{
    MAP_ZOOM, MARKER_ICON, MARKER_POPUP_MAX_WIDTH, OVERLAY_FILL_OPACITY, OVERLAY_RADIUS_M,
};
use crate::model::RiskLabel;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Marker color, keyed on the predicted label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconColor {
    Red,
    Orange,
    Green,
}

impl IconColor {
    /// Total over the open label set: anything that is not "High" or
    /// "Medium" gets the low-risk styling.
    pub fn for_label(label: &RiskLabel) -> Self {
        match label.as_str() {
            "High" => IconColor::Red,
            "Medium" => IconColor::Orange,
            _ => IconColor::Green,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconColor::Red => "red",
            IconColor::Orange => "orange",
            IconColor::Green => "green",
        }
    }
}

/// Tile provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basemap {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
    pub subdomains: &'static str,
    pub max_zoom: u8,
}

/// "CartoDB dark_matter"
pub const DARK_MATTER: Basemap = Basemap {
    name: "CartoDB dark_matter",
    url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
    subdomains: "abcd",
    max_zoom: 20,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Markup shown inside the popup (already escaped)
    pub html: String,
    pub max_width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub location: [f64; 2],
    pub popup: Popup,
    pub color: IconColor,
    pub glyph: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleOverlay {
    pub region: &'static str,
    pub location: [f64; 2],
    /// Meters
    pub radius: f64,
    pub color: &'static str,
    pub fill: bool,
    pub fill_opacity: f64,
    pub popup: Popup,
}

/// Everything needed to draw one prediction
#[derive(Debug, Clone, PartialEq)]
pub struct RiskMap {
    pub center: [f64; 2],
    pub zoom: u8,
    pub basemap: Basemap,
    pub marker: Marker,
    pub overlays: Vec<CircleOverlay>,
}

/// In-memory artifact of a render
#[derive(Debug, Clone)]
pub struct MapArtifact {
    pub map: RiskMap,
    pub html: String,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Pure construction of the map for one prediction
pub fn build_map(
    latitude: f64,
    longitude: f64,
    label: &RiskLabel,
    damage_scale: u32,
    regions: &[HighRiskRegion],
) -> RiskMap {
    let marker = Marker {
        location: [latitude, longitude],
        popup: Popup {
            html: format!(
                "<b>Risk Level:</b> {}<br><b>Damage Scale:</b> {}",
                escape_html(label.as_str()),
                damage_scale
            ),
            max_width: Some(MARKER_POPUP_MAX_WIDTH),
        },
        color: IconColor::for_label(label),
        glyph: MARKER_ICON,
    };

    let overlays = regions
        .iter()
        .map(|region| CircleOverlay {
            region: region.name,
            location: [region.latitude, region.longitude],
            radius: OVERLAY_RADIUS_M,
            color: "red",
            fill: true,
            fill_opacity: OVERLAY_FILL_OPACITY,
            popup: Popup {
                html: format!("High Risk Area: {}", escape_html(region.name)),
                max_width: None,
            },
        })
        .collect();

    RiskMap {
        center: [latitude, longitude],
        zoom: MAP_ZOOM,
        basemap: DARK_MATTER,
        marker,
        overlays,
    }
}

/// Renders maps and keeps the single persisted snapshot current
#[derive(Debug, Clone)]
pub struct MapRenderer {
    store: MapStore,
}

impl MapRenderer {
    pub fn new(store: MapStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MapStore {
        &self.store
    }

    /// Build, render and persist (overwriting the previous snapshot)
    pub fn render(
        &self,
        latitude: f64,
        longitude: f64,
        label: &RiskLabel,
        damage_scale: u32,
        regions: &[HighRiskRegion],
    ) -> Result<MapArtifact, MapStoreError> {
        let map = build_map(latitude, longitude, label, damage_scale, regions);
        let html = map.to_html();

        self.store.save(&html)?;

        Ok(MapArtifact { map, html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HIGH_RISK_REGIONS;

    #[test]
    fn test_icon_color_rule() {
        assert_eq!(IconColor::for_label(&"High".into()), IconColor::Red);
        assert_eq!(IconColor::for_label(&"Medium".into()), IconColor::Orange);
        assert_eq!(IconColor::for_label(&"Low".into()), IconColor::Green);
        assert_eq!(IconColor::for_label(&"Unknown".into()), IconColor::Green);
        assert_eq!(IconColor::for_label(&"".into()), IconColor::Green);
        // Case sensitive
        assert_eq!(IconColor::for_label(&"high".into()), IconColor::Green);
    }

    #[test]
    fn test_high_label_marker() {
        let map = build_map(22.5, 78.9, &"High".into(), 200, &HIGH_RISK_REGIONS);

        assert_eq!(map.center, [22.5, 78.9]);
        assert_eq!(map.zoom, 6);
        assert_eq!(map.basemap.name, "CartoDB dark_matter");
        assert_eq!(map.marker.location, [22.5, 78.9]);
        assert_eq!(map.marker.color, IconColor::Red);
        assert_eq!(map.marker.glyph, "info-sign");
        assert_eq!(
            map.marker.popup.html,
            "<b>Risk Level:</b> High<br><b>Damage Scale:</b> 200"
        );
        assert_eq!(map.marker.popup.max_width, Some(250));
    }

    #[test]
    fn test_overlays_are_static() {
        let a = build_map(5.0, 65.0, &"Low".into(), 0, &HIGH_RISK_REGIONS);
        let b = build_map(40.0, 100.0, &"High".into(), 20000, &HIGH_RISK_REGIONS);

        assert_eq!(a.overlays.len(), 5);
        assert_eq!(a.overlays, b.overlays);

        let names: Vec<&str> = a.overlays.iter().map(|o| o.region).collect();
        assert_eq!(names, vec!["Bihar", "Assam", "Odisha", "Uttarakhand", "Tamil Nadu"]);

        for overlay in &a.overlays {
            assert_eq!(overlay.radius, 50_000.0);
            assert_eq!(overlay.color, "red");
            assert!(overlay.fill);
            assert_eq!(overlay.fill_opacity, 0.3);
            assert_eq!(overlay.popup.html, format!("High Risk Area: {}", overlay.region));
        }
    }

    #[test]
    fn test_label_is_escaped_in_popup() {
        let map = build_map(22.5, 78.9, &"<script>".into(), 1, &HIGH_RISK_REGIONS);
        assert!(map.marker.popup.html.contains("&lt;script&gt;"));
        assert_eq!(map.marker.color, IconColor::Green);
    }

    #[test]
    fn test_render_persists_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MapRenderer::new(MapStore::new(dir.path().join("map.html")));

        let first = renderer.render(22.5, 78.9, &"High".into(), 200, &HIGH_RISK_REGIONS).unwrap();
        assert_eq!(renderer.store().load().unwrap(), first.html);

        let second = renderer.render(30.0, 80.0, &"Low".into(), 5, &HIGH_RISK_REGIONS).unwrap();
        assert_ne!(first.html, second.html);
        assert_eq!(renderer.store().load().unwrap(), second.html);
    }

    #[test]
    fn test_render_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MapRenderer::new(MapStore::new(dir.path().join("missing").join("map.html")));
        let err = renderer
            .render(22.5, 78.9, &"High".into(), 200, &HIGH_RISK_REGIONS)
            .unwrap_err();
        assert!(matches!(err, MapStoreError::Io { .. }));
    }
}
