//! HTML fragments for tables, the test environment and the device under test.
//!
//! All functions are pure and escape every piece of report text; the UI
//! injects the result with `dangerous_inner_html`.

use serde_json::{Map, Value};

use crate::detail::TableDef;
use crate::status::TestStatus;

const MUTED_TROUBLES_KEY: &str = "muted troubles";
const DUT_PLACEHOLDER: &str =
    r#"<p class="placeholder">No device under test information available.</p>"#;

pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Plain-text rendering of a JSON cell: strings unquoted, null empty.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn cell_class(text: &str) -> &'static str {
    match TestStatus::parse(text) {
        TestStatus::Pass => "cell cell--pass",
        TestStatus::Fail => "cell cell--fail",
        TestStatus::Error => "cell cell--error",
        _ => "cell",
    }
}

pub fn table_html(table: &TableDef) -> String {
    let row_header = table.row_header.as_deref().unwrap_or_default();
    let has_row_header = !row_header.is_empty();
    let mut out = String::from(r#"<table class="report-table">"#);

    if let Some(columns) = table.column_header.as_deref().filter(|c| !c.is_empty()) {
        out.push_str("<thead><tr>");
        if has_row_header {
            out.push_str("<th></th>");
        }
        for column in columns {
            out.push_str(&format!("<th>{}</th>", html_escape(&scalar_text(column))));
        }
        out.push_str("</tr></thead>");
    }

    out.push_str("<tbody>");
    for (i, row) in table.data.iter().enumerate() {
        out.push_str("<tr>");
        if has_row_header {
            let label = row_header.get(i).map(scalar_text).unwrap_or_default();
            out.push_str(&format!(
                r#"<th scope="row">{}</th>"#,
                html_escape(&label)
            ));
        }
        for cell in row {
            let text = scalar_text(cell);
            out.push_str(&format!(
                r#"<td class="{}">{}</td>"#,
                cell_class(&text),
                html_escape(&text)
            ));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

pub fn env_html(env: &Map<String, Value>) -> String {
    let mut out = String::from(r#"<table class="env-table"><tbody>"#);
    for (key, value) in env {
        let rendered = if key.eq_ignore_ascii_case(MUTED_TROUBLES_KEY) {
            muted_troubles_html(value)
        } else {
            value_html(value)
        };
        out.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>",
            html_escape(key),
            rendered
        ));
    }
    out.push_str("</tbody></table>");
    out
}

fn muted_troubles_html(value: &Value) -> String {
    let Some(entry) = value.as_object() else {
        return value_html(value);
    };
    let shared_comment = entry.get("comment").map(scalar_text).unwrap_or_default();
    let codes = entry
        .get("DTC")
        .or_else(|| entry.get("dtc"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut out = String::from(
        r#"<table class="dtc-table"><thead><tr><th>DTC</th><th>Comment</th></tr></thead><tbody>"#,
    );
    if codes.is_empty() {
        out.push_str(&format!(
            r#"<tr><td class="placeholder">none</td><td>{}</td></tr>"#,
            html_escape(&shared_comment)
        ));
    }
    for code in &codes {
        let label = parse_dtc(code)
            .map(format_dtc_code)
            .unwrap_or_else(|| scalar_text(code));
        let comment = code
            .get("comment")
            .map(scalar_text)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| shared_comment.clone());
        out.push_str(&format!(
            "<tr><td class=\"mono\">{}</td><td>{}</td></tr>",
            html_escape(&label),
            html_escape(&comment)
        ));
    }
    out.push_str("</tbody></table>");
    out
}

/// `0x` followed by six uppercase hex digits.
pub fn format_dtc_code(code: u64) -> String {
    format!("0x{code:06X}")
}

/// Accepts integers, `0x` hex strings, decimal strings, bare hex strings and
/// objects carrying the code under `DTC`.
pub fn parse_dtc(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(text) => {
            let text = text.trim().replace('_', "");
            let lower = text.to_ascii_lowercase();
            if let Some(hex) = lower.strip_prefix("0x") {
                u64::from_str_radix(hex, 16).ok()
            } else {
                lower
                    .parse::<u64>()
                    .ok()
                    .or_else(|| u64::from_str_radix(&lower, 16).ok())
            }
        }
        Value::Object(map) => ["DTC", "dtc", "code"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(parse_dtc),
        _ => None,
    }
}

pub fn dut_html(dut: &Value) -> String {
    let empty = match dut {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    };
    if empty {
        return DUT_PLACEHOLDER.to_string();
    }
    value_html(dut)
}

fn value_html(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut out = String::from(r#"<table class="nested-table"><tbody>"#);
            for (key, inner) in map {
                out.push_str(&format!(
                    "<tr><th>{}</th><td>{}</td></tr>",
                    html_escape(key),
                    value_html(inner)
                ));
            }
            out.push_str("</tbody></table>");
            out
        }
        Value::Array(items) if items.iter().all(is_scalar) => {
            let joined = items.iter().map(scalar_text).collect::<Vec<_>>().join(", ");
            html_escape(&format!("[{joined}]"))
        }
        Value::Array(items) => {
            let mut out = String::from(r#"<table class="nested-table"><tbody>"#);
            for (i, inner) in items.iter().enumerate() {
                out.push_str(&format!(
                    "<tr><th>{i}</th><td>{}</td></tr>",
                    value_html(inner)
                ));
            }
            out.push_str("</tbody></table>");
            out
        }
        scalar => html_escape(&scalar_text(scalar)),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dtc_codes_are_six_uppercase_hex_digits() {
        assert_eq!(format_dtc_code(4660), "0x001234");
        assert_eq!(parse_dtc(&json!(4660)).map(format_dtc_code).unwrap(), "0x001234");
        assert_eq!(parse_dtc(&json!("0xc1_0a00")), Some(0xC10A00));
        assert_eq!(parse_dtc(&json!("4660")), Some(4660));
        assert_eq!(parse_dtc(&json!("f0f0f")), Some(0xF0F0F));
        assert_eq!(parse_dtc(&json!({"DTC": "0x9a", "status": "0x2f"})), Some(0x9A));
        assert_eq!(parse_dtc(&json!(true)), None);
    }

    #[test]
    fn table_with_both_headers_gets_corner_cell() {
        let table: TableDef = serde_json::from_value(json!({
            "name": "Results",
            "data": [["1", "PASS"], ["<2>", null]],
            "column_header": ["Value", "Result"],
            "row_header": ["first", "second"]
        }))
        .unwrap();
        let html = table_html(&table);
        assert!(html.starts_with(r#"<table class="report-table"><thead><tr><th></th><th>Value</th>"#));
        assert!(html.contains(r#"<th scope="row">second</th><td class="cell">&lt;2&gt;</td><td class="cell"></td>"#));
        assert!(html.contains(r#"<td class="cell cell--pass">PASS</td>"#));
    }

    #[test]
    fn table_without_headers_is_body_only() {
        let table: TableDef = serde_json::from_value(json!({"name": "t", "data": [[1, 2.5]]})).unwrap();
        assert_eq!(
            table_html(&table),
            r#"<table class="report-table"><tbody><tr><td class="cell">1</td><td class="cell">2.5</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn env_renders_muted_troubles_as_nested_dtc_table() {
        let env = json!({
            "bench": "HIL-3",
            "muted troubles": {"DTC": [4660, "0xABCDEF"], "comment": "known issue"}
        });
        let html = env_html(env.as_object().unwrap());
        assert!(html.contains("<tr><th>bench</th><td>HIL-3</td></tr>"));
        assert!(html.contains(r#"<table class="dtc-table">"#));
        assert!(html.contains(r#"<td class="mono">0x001234</td><td>known issue</td>"#));
        assert!(html.contains(r#"<td class="mono">0xABCDEF</td>"#));
    }

    #[test]
    fn dut_renders_nested_structures() {
        assert_eq!(dut_html(&json!({})), DUT_PLACEHOLDER);
        assert_eq!(dut_html(&Value::Null), DUT_PLACEHOLDER);

        let html = dut_html(&json!({
            "ecu": {"name": "BCM", "sw": ["1.2", "1.3"]},
            "slots": [{"id": 1}]
        }));
        assert!(html.contains("<tr><th>sw</th><td>[1.2, 1.3]</td></tr>"));
        assert!(html.contains("<tr><th>0</th><td><table class=\"nested-table\"><tbody><tr><th>id</th><td>1</td></tr>"));
    }
}
