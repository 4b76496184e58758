use dioxus::prelude::*;
use report_types::chart::{format_readout, plot_model, PlotArea};
use report_types::{ReportSession, XMode};

use crate::interop::element_rect;

const DEFAULT_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 280.0;
/// Drags shorter than this are treated as clicks.
const MIN_DRAG_PX: f64 = 4.0;

fn pointer_x(container_id: &str, evt: &MouseEvent) -> Option<f64> {
    element_rect(container_id).map(|rect| evt.client_coordinates().x - rect.left)
}

fn drag_fractions(area: PlotArea, start: f64, end: f64) -> (f64, f64) {
    let fraction = |px: f64| ((px - area.left) / area.width).clamp(0.0, 1.0);
    (fraction(start), fraction(end))
}

#[component]
pub fn ChartPanel(mut session: Signal<ReportSession>, index: usize) -> Element {
    let container_id = use_signal(|| format!("report-chart-{}", uuid::Uuid::new_v4()));
    let mut width = use_signal(|| DEFAULT_WIDTH);
    let mut drag = use_signal(|| None::<(f64, f64)>);
    let cid = container_id();

    // Measure the container once it is in the DOM and record the initial window
    use_effect(move || {
        let id = container_id();
        if let Some(rect) = element_rect(&id).filter(|rect| rect.width > 0.0) {
            width.set(rect.width);
        }
        if session.write().mount_chart(index) {
            dioxus_logger::tracing::debug!("Chart {} mounted in {}", index, id);
        }
    });

    let (chart, state, stats) = {
        let guard = session.read();
        let Some(chart) = guard.detail().and_then(|d| d.chart(index)).cloned() else {
            return rsx! {};
        };
        let state = guard.chart_state(index).cloned().unwrap_or_default();
        let stats = if guard.active_chart() == Some(index) {
            guard.window_stats()
        } else {
            None
        };
        (chart, state, stats)
    };

    let w = width();
    let model = plot_model(&chart, &state, w, CHART_HEIGHT);
    let area = model.area;
    let readout = state.readout(&chart);
    let view_box = format!("0 0 {w} {CHART_HEIGHT}");

    let left = area.left.to_string();
    let right = area.right().to_string();
    let top = area.top.to_string();
    let bottom = area.bottom().to_string();

    let series_elements: Vec<Element> = model
        .paths
        .iter()
        .filter(|path| !path.d.is_empty())
        .map(|path| {
            let d = path.d.clone();
            let color = path.color.clone();
            rsx! {
                path { d: "{d}", fill: "none", stroke: "{color}", stroke_width: "1.5" }
            }
        })
        .collect();

    let x_tick_elements: Vec<Element> = model
        .x_ticks
        .iter()
        .map(|tick| {
            let x = format!("{:.1}", tick.pos);
            let label_y = (area.bottom() + 14.0).to_string();
            let tick_end = (area.bottom() + 4.0).to_string();
            let label_lines: Vec<(usize, String)> =
                tick.label.split('\n').map(str::to_string).enumerate().collect();
            rsx! {
                line { x1: "{x}", y1: "{bottom}", x2: "{x}", y2: "{tick_end}", stroke: "#64748b", stroke_width: "1" }
                text {
                    x: "{x}",
                    y: "{label_y}",
                    fill: "#94a3b8",
                    font_size: "11",
                    text_anchor: "middle",
                    for (i, label_line) in label_lines {
                        tspan { x: "{x}", dy: if i == 0 { "0" } else { "1.2em" }, "{label_line}" }
                    }
                }
            }
        })
        .collect();

    let y_tick_elements: Vec<Element> = model
        .y_ticks
        .iter()
        .map(|tick| {
            let y = format!("{:.1}", tick.pos);
            let label_x = (area.left - 6.0).to_string();
            let label_y = format!("{:.1}", tick.pos + 4.0);
            let label = tick.label.clone();
            rsx! {
                line { x1: "{left}", y1: "{y}", x2: "{right}", y2: "{y}", stroke: "#1e293b", stroke_width: "1" }
                text { x: "{label_x}", y: "{label_y}", fill: "#94a3b8", font_size: "11", text_anchor: "end", "{label}" }
            }
        })
        .collect();

    let cursor_line = model.cursor_px.map(|px| format!("{px:.1}"));
    let selection = drag().map(|(start, end)| {
        let x = start.min(end).clamp(area.left, area.right());
        let span = (start.max(end).clamp(area.left, area.right()) - x).max(0.0);
        (format!("{x:.1}"), format!("{span:.1}"))
    });
    let plot_height = area.height.to_string();

    let x_label = if chart.xlabel.is_empty() {
        match chart.x_mode {
            XMode::Datetime => "time".to_string(),
            XMode::Number => "x".to_string(),
        }
    } else {
        chart.xlabel.clone()
    };
    let legend: Vec<(usize, String, String, String, bool)> = chart
        .signals
        .iter()
        .enumerate()
        .map(|(i, signal)| {
            (
                i,
                signal.name.clone(),
                chart.color(i).to_string(),
                readout.values.get(i).cloned().unwrap_or_default(),
                state.is_visible(i),
            )
        })
        .collect();
    let stats_text = stats.map(|s| {
        format!(
            "{}: min {} / max {} / avg {} over {} samples",
            s.signal,
            format_readout(Some(s.min)),
            format_readout(Some(s.max)),
            format_readout(Some(s.avg)),
            s.count
        )
    });

    let id_for_move = cid.clone();
    let id_for_down = cid.clone();

    rsx! {
        div {
            class: "step-body chart-body",
            if !chart.name.is_empty() {
                div { class: "chart-title", "{chart.name}" }
            }
            div {
                id: "{cid}",
                class: "chart-host",
                onmousemove: move |evt: MouseEvent| {
                    let Some(px) = pointer_x(&id_for_move, &evt) else {
                        return;
                    };
                    if let Some((start, _)) = drag() {
                        drag.set(Some((start, px)));
                    }
                    match area.fraction_at(px) {
                        Some(fraction) => session.write().set_cursor(index, fraction),
                        None => session.write().clear_cursor(index),
                    }
                },
                onmousedown: move |evt: MouseEvent| {
                    if let Some(px) = pointer_x(&id_for_down, &evt).filter(|px| area.fraction_at(*px).is_some()) {
                        drag.set(Some((px, px)));
                    }
                },
                onmouseup: move |_| {
                    let current = drag();
                    drag.set(None);
                    if let Some((start, end)) = current.filter(|(start, end)| (end - start).abs() >= MIN_DRAG_PX) {
                        let (from, to) = drag_fractions(area, start, end);
                        session.write().zoom(index, from, to);
                    }
                },
                onmouseleave: move |_| {
                    drag.set(None);
                    session.write().clear_cursor(index);
                },
                ondoubleclick: move |_| session.write().reset_zoom(index),

                svg {
                    width: "{w}",
                    height: "{CHART_HEIGHT}",
                    view_box: "{view_box}",
                    for elem in y_tick_elements { {elem} }
                    // Axes
                    line { x1: "{left}", y1: "{top}", x2: "{left}", y2: "{bottom}", stroke: "#64748b", stroke_width: "1" }
                    line { x1: "{left}", y1: "{bottom}", x2: "{right}", y2: "{bottom}", stroke: "#64748b", stroke_width: "1" }
                    for elem in x_tick_elements { {elem} }
                    for elem in series_elements { {elem} }
                    if let Some(x) = cursor_line {
                        line { x1: "{x}", y1: "{top}", x2: "{x}", y2: "{bottom}", stroke: "#e2e8f0", stroke_width: "1", stroke_dasharray: "3 3" }
                    }
                    if let Some((x, span)) = selection {
                        rect { x: "{x}", y: "{top}", width: "{span}", height: "{plot_height}", fill: "#3b82f6", fill_opacity: "0.15" }
                    }
                }
            }

            div {
                class: "chart-readout",
                span { class: "readout-x", "{x_label}: {readout.x}" }
                for (i, name, color, value, visible) in legend {
                    button {
                        key: "{i}",
                        class: if visible { "readout-entry" } else { "readout-entry readout-entry--hidden" },
                        onclick: move |_| session.write().toggle_signal(index, i),
                        span { class: "readout-swatch", style: "background: {color};" }
                        span { class: "readout-name", "{name}" }
                        span { class: "readout-value mono", "{value}" }
                    }
                }
            }

            if let Some(text) = stats_text {
                div { class: "chart-stats", "{text}" }
            }
            if !chart.ylabel.is_empty() {
                div { class: "chart-ylabel", "{chart.ylabel}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_fractions_are_clamped_to_the_plot() {
        let area = PlotArea::new(400.0, 200.0);
        let (from, to) = drag_fractions(area, area.left - 20.0, area.left + area.width / 2.0);
        assert_eq!(from, 0.0);
        assert!((to - 0.5).abs() < 1e-9);
    }
}
