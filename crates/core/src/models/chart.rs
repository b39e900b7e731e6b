use serde::{Deserialize, Serialize};

use super::point::{Channel, ParserTier};

/// How points are laid out horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// All points squeezed into the screen width.
    Fit,
    /// Scrollable, roughly fixed spacing per day.
    Day,
}

impl DisplayMode {
    /// Fit small datasets to the screen, scroll larger ones.
    pub fn for_point_count(point_count: usize, fit_threshold: usize) -> Self {
        if point_count > fit_threshold {
            DisplayMode::Day
        } else {
            DisplayMode::Fit
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Fit => write!(f, "Fit"),
            DisplayMode::Day => write!(f, "Day"),
        }
    }
}

/// Quantized description of the Y range.
///
/// Invariants: `min < max`, `step > 0`, `max == min + step * sections`,
/// `labels.len() == sections + 1` (labels run from `max` down to `min`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub sections: u32,
    pub labels: Vec<String>,
}

/// Caller-supplied axis fields. Each present field wins over the computed default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub sections: Option<u32>,
    pub labels: Option<Vec<String>>,
}

impl AxisOverride {
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.step.is_none()
            && self.sections.is_none()
            && self.labels.is_none()
    }
}

/// Horizontal geometry for point placement, in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpec {
    pub spacing: f64,
    pub initial_spacing: f64,
    pub end_spacing: f64,
}

/// One render-ready point for the chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Channel value minus the axis minimum, so the baseline is the axis floor.
    pub value: f64,

    /// Month/day x label; empty when thinned out.
    pub label: String,

    /// Absolute value with locale grouping, for the tooltip.
    pub data_point_text: String,
}

/// Everything the chart widget needs for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub channel: Channel,
    pub mode: DisplayMode,
    pub tier: ParserTier,
    pub points: Vec<ChartPoint>,
    pub axis: AxisSpec,
    pub spacing: LayoutSpec,
}

impl ChartData {
    /// True when the widget should show its "no data" state.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-render display parameters chosen by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// `None` picks a mode from the point count.
    pub mode: Option<DisplayMode>,
    pub axis_override: Option<AxisOverride>,
    /// Horizontal zoom; `None` means 1.
    pub spacing_multiplier: Option<f64>,
}

impl RenderRequest {
    pub fn with_mode(mode: DisplayMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }
}
