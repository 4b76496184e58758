use dioxus::prelude::*;
use report_types::html::table_html;
use report_types::TableDef;

/// Pre-escaped HTML produced by `report_types::html`.
#[component]
pub fn HtmlBlock(html: String, class: String) -> Element {
    rsx! {
        div {
            class: "{class}",
            dangerous_inner_html: "{html}",
        }
    }
}

#[component]
pub fn TableBody(table: TableDef) -> Element {
    let html = table_html(&table);

    rsx! {
        div {
            class: "step-body table-body",
            if !table.name.is_empty() {
                div { class: "table-caption", "{table.name}" }
            }
            HtmlBlock { html, class: "table-scroll".to_string() }
        }
    }
}
