//! Self-contained Leaflet document for a [`RiskMap`]

use std::fmt::Write;

use serde_json::json;

use super::render::RiskMap;

const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js";
const GLYPHICONS_CSS: &str = "https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css";
const AWESOME_MARKERS_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css";
const AWESOME_MARKERS_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js";

const MAP_ELEMENT_ID: &str = "risk_map";

/// Minimal escaping for text placed into markup
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// JSON is valid JS, but `</` must not close the surrounding script tag
fn js(value: serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

impl RiskMap {
    /// Render the map as a standalone HTML document
    pub fn to_html(&self) -> String {
        let mut script = String::new();

        // write! into a String cannot fail
        let _ = writeln!(
            script,
            "var map = L.map({}, {});",
            js(json!(MAP_ELEMENT_ID)),
            js(json!({ "center": self.center, "zoom": self.zoom }))
        );

        let _ = writeln!(
            script,
            "L.tileLayer({}, {}).addTo(map);",
            js(json!(self.basemap.url)),
            js(json!({
                "attribution": self.basemap.attribution,
                "subdomains": self.basemap.subdomains,
                "maxZoom": self.basemap.max_zoom,
            }))
        );

        let marker = &self.marker;
        let _ = writeln!(
            script,
            "L.marker({}, {{icon: L.AwesomeMarkers.icon({})}}).addTo(map).bindPopup({}, {});",
            js(json!(marker.location)),
            js(json!({
                "icon": marker.glyph,
                "prefix": "glyphicon",
                "markerColor": marker.color.as_str(),
                "iconColor": "white",
            })),
            js(json!(marker.popup.html)),
            js(json!({ "maxWidth": marker.popup.max_width })),
        );

        for overlay in &self.overlays {
            let _ = writeln!(
                script,
                "L.circle({}, {}).addTo(map).bindPopup({});",
                js(json!(overlay.location)),
                js(json!({
                    "radius": overlay.radius,
                    "color": overlay.color,
                    "fill": overlay.fill,
                    "fillOpacity": overlay.fill_opacity,
                })),
                js(json!(overlay.popup.html)),
            );
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta http-equiv="content-type" content="text/html; charset=UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
<link rel="stylesheet" href="{leaflet_css}" />
<link rel="stylesheet" href="{glyphicons_css}" />
<link rel="stylesheet" href="{awesome_css}" />
<script src="{leaflet_js}"></script>
<script src="{awesome_js}"></script>
<style>
html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
#{id} {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}
</style>
</head>
<body>
<div id="{id}"></div>
<script>
{script}</script>
</body>
</html>
"#,
            leaflet_css = LEAFLET_CSS,
            glyphicons_css = GLYPHICONS_CSS,
            awesome_css = AWESOME_MARKERS_CSS,
            leaflet_js = LEAFLET_JS,
            awesome_js = AWESOME_MARKERS_JS,
            id = MAP_ELEMENT_ID,
            script = script,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{build_map, HIGH_RISK_REGIONS};

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("Tamil Nadu"), "Tamil Nadu");
    }

    #[test]
    fn test_document_contents() {
        let html = build_map(22.5, 78.9, &"High".into(), 200, &HIGH_RISK_REGIONS).to_html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("dark_all"));
        assert!(html.contains(r#""markerColor":"red""#));
        assert!(html.contains(r#""icon":"info-sign""#));
        assert!(html.contains(r"Damage Scale:<\/b> 200"));
        assert!(html.contains(r#""maxWidth":250"#));
        assert_eq!(html.matches("L.circle(").count(), 5);
        assert_eq!(html.matches("L.marker(").count(), 1);
        assert!(html.contains("High Risk Area: Uttarakhand"));
        assert!(html.contains(r#""fillOpacity":0.3"#));
    }

    #[test]
    fn test_script_close_is_neutralized() {
        let html = build_map(22.5, 78.9, &"</script>".into(), 1, &HIGH_RISK_REGIONS).to_html();
        assert_eq!(html.matches("</script>").count(), 3);
    }
}
