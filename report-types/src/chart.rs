//! Chart geometry, zoom/cursor state and windowed statistics.
//!
//! Everything here is pure so the SVG component only has to turn a
//! [`PlotModel`] into elements.

use std::collections::BTreeSet;

use chrono::DateTime;
use serde_json::Value;

use crate::html::scalar_text;

pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#64748b",
];

pub const PLACEHOLDER: &str = "--";
const TICK_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XMode {
    #[default]
    Number,
    /// x values are epoch seconds, labelled in UTC.
    Datetime,
}

impl XMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "datetime" | "date" | "time" => Self::Datetime,
            _ => Self::Number,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartDef {
    pub name: String,
    pub legend: Vec<String>,
    /// Non-numeric entries are NaN and never plotted.
    pub x: Vec<f64>,
    pub signals: Vec<Signal>,
    pub xlabel: String,
    pub ylabel: String,
    pub colors: Vec<String>,
    pub x_mode: XMode,
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn x_value(value: &Value) -> f64 {
    if let Some(v) = number(value) {
        return v;
    }
    value
        .as_str()
        .and_then(|text| DateTime::parse_from_rfc3339(text.trim()).ok())
        .map(|dt| dt.timestamp_millis() as f64 / 1000.0)
        .unwrap_or(f64::NAN)
}

fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(scalar_text).collect())
        .unwrap_or_default()
}

impl ChartDef {
    /// Lenient conversion: missing pieces become empty, never an error.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).map(scalar_text).unwrap_or_default();
        let legend = strings(value.get("legend"));
        let x: Vec<f64> = value
            .get("x")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(x_value).collect())
            .unwrap_or_default();

        let series = |items: &Vec<Value>| -> Vec<Option<f64>> {
            let mut values: Vec<Option<f64>> = items.iter().map(number).collect();
            values.resize(x.len(), None);
            values
        };

        let signals = match value.get("y") {
            Some(Value::Array(items)) => vec![Signal {
                name: "value".to_string(),
                values: series(items),
            }],
            Some(Value::Object(map)) => {
                let mut ordered: Vec<&String> =
                    legend.iter().filter(|name| map.contains_key(*name)).collect();
                ordered.extend(map.keys().filter(|key| !legend.contains(*key)));
                ordered
                    .into_iter()
                    .filter_map(|name| {
                        let items = map.get(name)?.as_array()?;
                        Some(Signal {
                            name: name.clone(),
                            values: series(items),
                        })
                    })
                    .collect()
            }
            _ => {
                tracing::warn!(chart = %text("name"), "chart has no usable y data");
                Vec::new()
            }
        };

        let x_mode = value
            .get("xMode")
            .or_else(|| value.get("x_mode"))
            .and_then(Value::as_str)
            .map(XMode::parse)
            .unwrap_or_default();

        Self {
            name: text("name"),
            legend,
            x,
            signals,
            xlabel: text("xlabel"),
            ylabel: text("ylabel"),
            colors: strings(value.get("colors")),
            x_mode,
        }
    }

    pub fn color(&self, index: usize) -> &str {
        self.colors
            .get(index)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(PALETTE[index % PALETTE.len()])
    }

    /// Smallest and largest finite x.
    pub fn full_range(&self) -> Option<ViewWindow> {
        let mut finite = self.x.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(ViewWindow { min, max })
    }
}

/// One plotted line. Hidden signals keep their slot with all-null data.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub color: String,
    pub visible: bool,
    pub values: Vec<Option<f64>>,
}

pub fn build_series(chart: &ChartDef, hidden: &BTreeSet<usize>) -> Vec<SeriesSpec> {
    chart
        .signals
        .iter()
        .enumerate()
        .map(|(i, signal)| {
            let visible = !hidden.contains(&i);
            SeriesSpec {
                label: signal.name.clone(),
                color: chart.color(i).to_string(),
                visible,
                values: if visible {
                    signal.values.clone()
                } else {
                    vec![None; signal.values.len()]
                },
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub min: f64,
    pub max: f64,
}

impl ViewWindow {
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// x value at a fraction (0..=1) of the window.
    pub fn at(&self, fraction: f64) -> f64 {
        self.min + fraction.clamp(0.0, 1.0) * self.span()
    }
}

/// Index of the in-window sample whose x is closest to `target`.
pub fn nearest_index(x: &[f64], window: ViewWindow, target: f64) -> Option<usize> {
    x.iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite() && window.contains(**v))
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(i, _)| i)
}

/// Per-chart interaction state, kept by the session until the test is left.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartInteraction {
    pub window: Option<ViewWindow>,
    pub hidden: BTreeSet<usize>,
    /// Sample under the pointer; `None` once the pointer leaves the plot.
    pub cursor: Option<usize>,
}

impl ChartInteraction {
    /// Record the initial window once. Returns whether it was set now.
    pub fn ensure_window(&mut self, chart: &ChartDef) -> bool {
        if self.window.is_some() {
            return false;
        }
        self.window = chart.full_range();
        self.window.is_some()
    }

    pub fn toggle_signal(&mut self, index: usize) {
        if !self.hidden.remove(&index) {
            self.hidden.insert(index);
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        !self.hidden.contains(&index)
    }

    /// Move the cursor to the sample nearest `fraction` of the plot width.
    pub fn set_cursor(&mut self, chart: &ChartDef, fraction: f64) {
        self.cursor = self
            .window
            .and_then(|window| nearest_index(&chart.x, window, window.at(fraction)));
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Narrow the window to the range between two fractions of the plot
    /// width. A zero-width drag leaves the window alone.
    pub fn zoom(&mut self, from: f64, to: f64) -> bool {
        let Some(window) = self.window else {
            return false;
        };
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let next = ViewWindow {
            min: window.at(lo),
            max: window.at(hi),
        };
        if next.span() <= f64::EPSILON * window.span().abs().max(1.0) {
            return false;
        }
        self.window = Some(next);
        self.cursor = None;
        true
    }

    pub fn reset_zoom(&mut self, chart: &ChartDef) {
        self.window = chart.full_range();
        self.cursor = None;
    }

    pub fn readout(&self, chart: &ChartDef) -> Readout {
        let x = self
            .cursor
            .and_then(|i| chart.x.get(i).copied())
            .filter(|v| v.is_finite())
            .map(|v| format_cursor_x(v, chart.x_mode))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let values = chart
            .signals
            .iter()
            .enumerate()
            .map(|(i, signal)| match self.cursor {
                Some(cursor) if self.is_visible(i) => {
                    format_readout(signal.values.get(cursor).copied().flatten())
                }
                _ => PLACEHOLDER.to_string(),
            })
            .collect();

        Readout { x, values }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub x: String,
    /// One entry per signal, in signal order.
    pub values: Vec<String>,
}

/// Up to three fractional digits with trailing zeros trimmed.
pub fn format_readout(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Axis label: `HH:MM:SS\nYYYY-MM-DD` in datetime mode, two decimals otherwise.
pub fn format_tick(value: f64, mode: XMode) -> String {
    match mode {
        XMode::Number => format!("{value:.2}"),
        XMode::Datetime => utc(value)
            .map(|dt| dt.format("%H:%M:%S\n%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("{value:.2}")),
    }
}

fn format_cursor_x(value: f64, mode: XMode) -> String {
    match mode {
        XMode::Number => format_readout(Some(value)),
        XMode::Datetime => utc(value)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| format_readout(Some(value))),
    }
}

fn utc(seconds: f64) -> Option<DateTime<chrono::Utc>> {
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Drawing area inside the SVG viewport, leaving room for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    const MARGIN_LEFT: f64 = 56.0;
    const MARGIN_RIGHT: f64 = 16.0;
    const MARGIN_TOP: f64 = 12.0;
    const MARGIN_BOTTOM: f64 = 44.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: Self::MARGIN_LEFT,
            top: Self::MARGIN_TOP,
            width: (width - Self::MARGIN_LEFT - Self::MARGIN_RIGHT).max(1.0),
            height: (height - Self::MARGIN_TOP - Self::MARGIN_BOTTOM).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Fraction of the plot width under a viewport x, or `None` outside it.
    pub fn fraction_at(&self, px: f64) -> Option<f64> {
        (px >= self.left && px <= self.right()).then(|| (px - self.left) / self.width)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis.
    pub pos: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPath {
    pub color: String,
    /// SVG path data; empty for hidden or fully null signals.
    pub d: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotModel {
    pub area: PlotArea,
    pub paths: Vec<PlotPath>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// Pixel x of the cursor sample, if any.
    pub cursor_px: Option<f64>,
}

/// y range over visible, in-window samples, padded by 5%.
fn y_range(chart: &ChartDef, series: &[SeriesSpec], window: ViewWindow) -> (f64, f64) {
    let mut values = series
        .iter()
        .filter(|s| s.visible)
        .flat_map(|s| {
            s.values
                .iter()
                .zip(&chart.x)
                .filter(|(_, x)| window.contains(**x))
                .filter_map(|(v, _)| *v)
        })
        .filter(|v| v.is_finite());

    let Some(first) = values.next() else {
        return (0.0, 1.0);
    };
    let (lo, hi) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

pub fn plot_model(chart: &ChartDef, state: &ChartInteraction, width: f64, height: f64) -> PlotModel {
    let area = PlotArea::new(width, height);
    let series = build_series(chart, &state.hidden);
    let window = state
        .window
        .or_else(|| chart.full_range())
        .unwrap_or(ViewWindow { min: 0.0, max: 1.0 });
    let (y_min, y_max) = y_range(chart, &series, window);

    let px = |x: f64| {
        if window.span() > 0.0 {
            area.left + (x - window.min) / window.span() * area.width
        } else {
            area.left + area.width / 2.0
        }
    };
    let py = |y: f64| area.bottom() - (y - y_min) / (y_max - y_min) * area.height;

    let paths = series
        .iter()
        .map(|spec| {
            let mut d = String::new();
            let mut pen_down = false;
            for (value, x) in spec.values.iter().zip(&chart.x) {
                match value {
                    Some(y) if x.is_finite() && window.contains(*x) => {
                        let cmd = if pen_down { 'L' } else { 'M' };
                        if !d.is_empty() {
                            d.push(' ');
                        }
                        d.push_str(&format!("{cmd}{:.1},{:.1}", px(*x), py(*y)));
                        pen_down = true;
                    }
                    _ => pen_down = false,
                }
            }
            PlotPath {
                color: spec.color.clone(),
                d,
            }
        })
        .collect();

    let steps = (TICK_COUNT - 1) as f64;
    let x_ticks = (0..TICK_COUNT)
        .map(|i| {
            let value = window.at(i as f64 / steps);
            Tick {
                pos: px(value),
                label: format_tick(value, chart.x_mode),
            }
        })
        .collect();
    let y_ticks = (0..TICK_COUNT)
        .map(|i| {
            let value = y_min + (y_max - y_min) * i as f64 / steps;
            Tick {
                pos: py(value),
                label: format!("{value:.2}"),
            }
        })
        .collect();

    let cursor_px = state
        .cursor
        .and_then(|i| chart.x.get(i).copied())
        .filter(|x| x.is_finite() && window.contains(*x))
        .map(px);

    PlotModel {
        area,
        paths,
        x_ticks,
        y_ticks,
        cursor_px,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowStats {
    pub chart: String,
    pub signal: String,
    pub window: ViewWindow,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

/// Statistics of the first visible signal over the samples inside the view
/// window. `None` without a window or without a qualifying value.
pub fn window_stats(chart: &ChartDef, state: &ChartInteraction) -> Option<WindowStats> {
    let window = state.window?;
    let (_, signal) = chart
        .signals
        .iter()
        .enumerate()
        .find(|(i, _)| state.is_visible(*i))?;

    let values: Vec<f64> = signal
        .values
        .iter()
        .zip(&chart.x)
        .filter(|(_, x)| x.is_finite() && window.contains(**x))
        .filter_map(|(v, _)| *v)
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return None;
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    Some(WindowStats {
        chart: chart.name.clone(),
        signal: signal.name.clone(),
        window,
        min,
        max,
        avg,
        count: values.len(),
    })
}
