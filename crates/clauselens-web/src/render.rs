//! HTML rendering for the contract review pages.
//!
//! Pages are plain server-rendered HTML; every piece of model or user text
//! passes through [`escape`].

use clauselens_analyzer::{AnalysisReport, RunOutcome, INVALID_OUTPUT_MESSAGE, MAPPING_SECTIONS};
use serde_json::Value;
use std::fmt::Write;

/// Name of the downloadable report
pub const REPORT_FILENAME: &str = "contract_analysis.json";

/// Message shown when neither a file nor text was submitted
pub const MISSING_INPUT_MESSAGE: &str = "Please upload or paste contract text.";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; min-height: 12rem; }
dl { margin: 0.5rem 0; } dt { font-weight: 600; } dd { margin: 0 0 0.5rem 1rem; }
.risk { padding: 0.75rem 1rem; border-radius: 0.4rem; margin: 0.5rem 0; }
.alert { background: #fde8e8; color: #8a1c1c; }
.warning { background: #fff4db; color: #7a5200; }
.success { background: #e6f6ea; color: #1d5f2e; }
.empty { color: #777; }
pre { background: #f4f4f4; padding: 1rem; overflow-x: auto; }
"#;

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Wrap a body in the page shell
pub fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>ClauseLens AI - Contract Review</title>\n<style>{}</style>\n</head>\n\
         <body>\n<h1>ClauseLens AI - Contract Review</h1>\n{}\n</body>\n</html>\n",
        STYLE, body
    )
}

/// The upload form
pub fn form() -> String {
    concat!(
        r#"<form method="post" action="/analyze" enctype="multipart/form-data">"#,
        "\n<p><label>Upload Contract PDF<br>",
        r#"<input type="file" name="file" accept="application/pdf,.pdf"></label></p>"#,
        "\n<p><label>Or Paste Contract Text<br>",
        r#"<textarea name="contract_text"></textarea></label></p>"#,
        "\n<p><button type=\"submit\">Analyze Contract</button></p>\n</form>",
    )
    .to_string()
}

/// Render the page body for a finished run
pub fn outcome(outcome: &RunOutcome) -> Result<String, serde_json::Error> {
    let body = match outcome {
        RunOutcome::MissingInput => error_box(MISSING_INPUT_MESSAGE),
        RunOutcome::ApiError(message) => error_box(message),
        RunOutcome::InvalidOutput(raw) => invalid_output(raw),
        RunOutcome::Rendered(report) => report_body(report)?,
    };
    Ok(format!("{}\n<hr>\n{}", body, form()))
}

/// Error banner
pub fn error_box(message: &str) -> String {
    format!("<div class=\"risk alert\">{}</div>", escape(message))
}

fn invalid_output(raw: &str) -> String {
    format!(
        "{}\n<p>Raw Output:</p>\n<pre><code>{}</code></pre>",
        error_box(INVALID_OUTPUT_MESSAGE),
        escape(raw)
    )
}

/// Render every section of a decoded report plus the download control
pub fn report_body(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    let mut html = String::new();

    for (key, title) in MAPPING_SECTIONS {
        let _ = write!(
            html,
            "<section id=\"{}\">\n<h2>{}</h2>\n{}\n</section>\n",
            key,
            title,
            value(&report.section(key))
        );
    }

    html.push_str("<section id=\"risk_flags\">\n<h2>Risk Flags</h2>\n");
    for flag in report.risk_flags() {
        let _ = write!(
            html,
            "<div class=\"risk {}\"><strong>{}</strong>: {}",
            flag.treatment().as_str(),
            escape(flag.category),
            escape(flag.explanation.unwrap_or(""))
        );
        if let Some(excerpt) = flag.excerpt {
            let _ = write!(html, "<blockquote>{}</blockquote>", escape(excerpt));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    let _ = write!(
        html,
        "<section id=\"plain_english_summary\">\n\
         <h2>Plain English Summary</h2>\n<p>{}</p>\n</section>\n",
        escape(report.plain_english_summary())
    );

    html.push_str(&download_form(&report.to_pretty_json()?));
    Ok(html)
}

/// A form that posts the report back for download
fn download_form(pretty_json: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/download\">\n\
         <textarea name=\"report\" hidden>{}</textarea>\n\
         <button type=\"submit\">Download Full JSON Report ({})</button>\n</form>",
        escape(pretty_json),
        REPORT_FILENAME
    )
}

/// Render an arbitrary JSON value
pub fn value(value: &Value) -> String {
    match value {
        Value::Object(entries) if entries.is_empty() => {
            "<p class=\"empty\">Not provided</p>".to_string()
        }
        Value::Object(entries) => {
            let mut html = String::from("<dl>");
            for (key, item) in entries {
                let _ = write!(html, "<dt>{}</dt><dd>{}</dd>", escape(key), self::value(item));
            }
            html.push_str("</dl>");
            html
        }
        Value::Array(items) if items.is_empty() => {
            "<p class=\"empty\">Not provided</p>".to_string()
        }
        Value::Array(items) => {
            let mut html = String::from("<ul>");
            for item in items {
                let _ = write!(html, "<li>{}</li>", self::value(item));
            }
            html.push_str("</ul>");
            html
        }
        Value::String(text) => escape(text),
        Value::Null => "<span class=\"empty\">null</span>".to_string(),
        other => escape(&other.to_string()),
    }
}
