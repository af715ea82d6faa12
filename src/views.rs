//! HTML pages for the interactive form

use std::fmt::Write;

use crate::constants::{APP_NAME, FULL_MAP_HEIGHT};
use crate::controller::{FullMapView, Outcome, Submission};
use crate::features::RegionInput;
use crate::map::html::escape_html;

/// Banner shown above the form
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
    Warning(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Success(t) => ("success", t),
            Notice::Error(t) => ("error", t),
            Notice::Warning(t) => ("warning", t),
        };
        format!(r#"<div class="notice {}">{}</div>"#, class, escape_html(text))
    }
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem 2rem; background: #fafafa; color: #222; }
form { display: grid; grid-template-columns: 1fr 1fr; gap: 0.75rem 2rem; }
label { display: flex; flex-direction: column; font-size: 0.9rem; }
input { padding: 0.35rem; font-size: 1rem; }
button { grid-column: span 2; padding: 0.6rem; font-size: 1rem; cursor: pointer; }
.notice { padding: 0.75rem 1rem; margin: 1rem 0; border-radius: 4px; }
.success { background: #e6f4ea; color: #1e4620; }
.error { background: #fdecea; color: #611a15; }
.warning { background: #fff4e5; color: #663c00; }
iframe { width: 100%; border: 0; }
"#;

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8" />
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>Disaster-Prone Area Classification App</h1>
<p>Predict the <b>risk level</b> of a region based on disaster and demographic data.</p>
{body}
</body>
</html>
"#,
        title = APP_NAME,
        style = STYLE,
        body = body,
    )
}

struct Field {
    name: &'static str,
    label: &'static str,
    min: &'static str,
    max: &'static str,
    step: &'static str,
    value: fn(&RegionInput) -> String,
}

// Two columns, filled row by row
const FIELDS: [Field; 7] = [
    Field {
        name: "disaster_score",
        label: "Disaster History Score (0-10)",
        min: "0",
        max: "10",
        step: "1",
        value: |input| input.disaster_score.to_string(),
    },
    Field {
        name: "urbanization_level",
        label: "Urbanization Level (0.0-1.0)",
        min: "0",
        max: "1",
        step: "0.05",
        value: |input| input.urbanization_level.to_string(),
    },
    Field {
        name: "population_density",
        label: "Population Density (people/km²)",
        min: "0",
        max: "20000",
        step: "100",
        value: |input| input.population_density.to_string(),
    },
    Field {
        name: "houses_affected",
        label: "Houses Affected",
        min: "0",
        max: "10000",
        step: "10",
        value: |input| input.houses_affected.to_string(),
    },
    Field {
        name: "latitude",
        label: "Latitude",
        min: "5",
        max: "40",
        step: "0.1",
        value: |input| input.latitude.to_string(),
    },
    Field {
        name: "human_deaths",
        label: "Human Deaths",
        min: "0",
        max: "1000",
        step: "1",
        value: |input| input.human_deaths.to_string(),
    },
    Field {
        name: "longitude",
        label: "Longitude",
        min: "65",
        max: "100",
        step: "0.1",
        value: |input| input.longitude.to_string(),
    },
];

fn form(input: &RegionInput) -> String {
    let mut html = String::from("<h2>Enter Region Data</h2>\n<form method=\"post\" action=\"/predict\">\n");
    for field in &FIELDS {
        let _ = writeln!(
            html,
            r#"<label>{label}<input type="number" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required /></label>"#,
            label = field.label,
            name = field.name,
            min = field.min,
            max = field.max,
            step = field.step,
            value = (field.value)(input),
        );
    }
    html.push_str("<button type=\"submit\">Predict Risk</button>\n</form>\n");
    html
}

fn embedded(document: &str, height: u32, scrolling: bool) -> String {
    format!(
        r#"<iframe srcdoc="{}" height="{}" scrolling="{}"></iframe>"#,
        escape_html(document),
        height,
        if scrolling { "yes" } else { "no" }
    )
}

/// Idle state: the form, optionally with a banner
pub fn form_page(input: &RegionInput, notice: Option<&Notice>) -> String {
    let mut body = String::new();
    if let Some(notice) = notice {
        body.push_str(&notice.render());
    }
    body.push_str(&form(input));
    layout(&body)
}

/// Result of one submission: banner, live map, then the full-map view
pub fn result_page(submission: &Submission) -> String {
    let mut body = form(&submission.input);

    match &submission.outcome {
        Outcome::Succeeded { result, map } => {
            body.push_str(
                &Notice::Success(format!("Predicted Risk Level: `{}`", result.label)).render(),
            );
            body.push_str("<h2>Visualize Location on Risk Map</h2>\n");
            body.push_str(&embedded(&map.html, 500, false));
        }
        Outcome::Failed { message, .. } => {
            body.push_str(&Notice::Error(format!("Prediction failed: {}", message)).render());
        }
    }

    body.push_str("\n<h3>View Full Risk Map</h3>\n");
    match &submission.full_map {
        FullMapView::Loaded(html) => body.push_str(&embedded(html, FULL_MAP_HEIGHT, true)),
        FullMapView::Missing { warning } => body.push_str(&Notice::Warning(warning.clone()).render()),
    }

    layout(&body)
}

/// Session halted at startup; nothing else is offered
pub fn halted_page(reason: &str) -> String {
    layout(&Notice::Error(reason.to_string()).render())
}
