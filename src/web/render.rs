//! Server-side HTML for the form page.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::form::{FieldKind, FieldSpec, InputRecord, Section, FIELDS};
use crate::risk::RiskAssessment;

/// What to show under the form after a submission.
pub enum Banner {
    Error(String),
    Result(RiskAssessment),
}

const STYLE: &str = "body{font-family:sans-serif;max-width:1100px;margin:2rem auto;padding:0 1rem}\
h1,.lead{text-align:center}\
.grid{display:grid;grid-template-columns:repeat(4,1fr);gap:.75rem 1.5rem}\
.grid.two{grid-template-columns:repeat(2,1fr)}\
label{display:flex;flex-direction:column;font-size:.9rem;gap:.25rem}\
details{margin:1rem 0}\
.error{background:#fde8e8;color:#8a1c1c;padding:.75rem;border-radius:4px}\
.success{background:#e6f6ea;color:#1d6b33;padding:.75rem;border-radius:4px}\
progress{width:100%;height:1.25rem}";

/// Current form values as display strings.
pub fn display_values(record: &InputRecord) -> BTreeMap<String, String> {
    record
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn field(out: &mut String, spec: &FieldSpec, value: Option<&str>) {
    let name = spec.name;
    let _ = write!(out, "<label>{}", escape(spec.label));
    match spec.kind {
        FieldKind::Choice(options) => {
            let _ = write!(out, "<select name=\"{name}\">");
            for opt in options {
                let selected = if value == Some(*opt) { " selected" } else { "" };
                let opt = escape(opt);
                let _ = write!(out, "<option value=\"{opt}\"{selected}>{opt}</option>");
            }
            out.push_str("</select>");
        }
        FieldKind::Integer { min, max } => {
            let _ = write!(
                out,
                "<input type=\"number\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{}\">",
                escape(value.unwrap_or_default())
            );
        }
        FieldKind::Float { min, max } => {
            let _ = write!(
                out,
                "<input type=\"number\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"0.1\" value=\"{}\">",
                escape(value.unwrap_or_default())
            );
        }
    }
    out.push_str("</label>");
}

fn grid<'a>(
    out: &mut String,
    class: &str,
    specs: impl Iterator<Item = &'a FieldSpec>,
    values: &BTreeMap<String, String>,
) {
    let _ = write!(out, "<div class=\"{class}\">");
    for spec in specs {
        field(out, spec, values.get(spec.name).map(String::as_str));
    }
    out.push_str("</div>");
}

fn banner(out: &mut String, banner: &Banner) {
    match banner {
        Banner::Error(msg) => {
            let _ = write!(out, "<p class=\"error\" role=\"alert\">{}</p>", escape(msg));
        }
        Banner::Result(a) => {
            let _ = write!(
                out,
                "<p class=\"success\">Risk Score: <b>{:.2}</b></p>\
                 <h3>Risk Level: <b>{}</b></h3>\
                 <progress value=\"{pct}\" max=\"100\">{pct}%</progress>",
                a.probability,
                a.level.label().to_uppercase(),
                pct = a.score_percent()
            );
        }
    }
}

/// Full page: header, both form sections, and the banner if any.
pub fn page(values: &BTreeMap<String, String>, result: Option<&Banner>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>CVDs Risk Predictor</title><style>{STYLE}</style></head><body>\
         <h1>CVDs Risk Predictor</h1>\
         <p class=\"lead\">Fill out the following health information to estimate your heart attack risk.</p>\
         <form method=\"post\" action=\"/predict\">"
    );

    grid(
        &mut out,
        "grid",
        FIELDS.iter().filter(|f| f.section == Section::Mandatory),
        values,
    );
    grid(
        &mut out,
        "grid",
        FIELDS
            .iter()
            .filter(|f| f.section == Section::Optional && !f.collapsed),
        values,
    );
    out.push_str("<details><summary>Show Optional Fields</summary>");
    grid(&mut out, "grid two", FIELDS.iter().filter(|f| f.collapsed), values);
    out.push_str("</details><button type=\"submit\">Predict Risk</button></form>");

    if let Some(b) = result {
        banner(&mut out, b);
    }
    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::HealthRecord;
    use crate::risk::RiskAssessment;

    fn defaults() -> BTreeMap<String, String> {
        display_values(&InputRecord::from(HealthRecord::default()))
    }

    #[test]
    fn page_renders_every_field() {
        let html = page(&defaults(), None);
        for spec in FIELDS {
            assert!(html.contains(&format!("name=\"{}\"", spec.name)), "{}", spec.name);
        }
        assert!(html.contains("<option value=\"Male\" selected>"));
        assert!(html.contains("name=\"SystolicBP\" min=\"80\" max=\"250\" step=\"1\" value=\"120\""));
    }

    #[test]
    fn result_banner_shows_score_level_and_progress() {
        let b = Banner::Result(RiskAssessment::new("r".into(), 0.4271, 0));
        let html = page(&defaults(), Some(&b));
        assert!(html.contains("Risk Score: <b>0.43</b>"));
        assert!(html.contains("Risk Level: <b>MEDIUM</b>"));
        assert!(html.contains("<progress value=\"42\" max=\"100\">"));
    }

    #[test]
    fn error_banner_is_escaped() {
        let b = Banner::Error("<script>".into());
        let html = page(&defaults(), Some(&b));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<p class=\"error\" role=\"alert\"><script>"));
    }
}
