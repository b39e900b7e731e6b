use serde_json::Value;

use crate::models::chart::{ChartData, ChartPoint, DisplayMode, LayoutSpec, RenderRequest};
use crate::models::format::{month_day_label, NumberFormat};
use crate::models::point::{Channel, ChannelSeries};
use crate::models::settings::ChartSettings;
use crate::parsers::registry::ParserRegistry;
use crate::services::axis_service::AxisService;
use crate::services::layout_service::LayoutService;
use crate::services::series_service::SeriesService;

/// Fractional digits shown in tooltips.
const TOOLTIP_DECIMALS: u32 = 2;

/// Generates render-ready chart data from raw rate records.
///
/// The core computes all the numbers; the widget only draws:
/// - channel series (with parser fallback)
/// - Y axis bounds, step, and labels
/// - horizontal spacing for the display mode
/// - per-point shifted values, x labels, and tooltip texts
pub struct ChartService {
    series_service: SeriesService,
    axis_service: AxisService,
    layout_service: LayoutService,
    format: NumberFormat,
    fit_threshold: usize,
    first_label_padding: usize,
    min_label_width: f64,
}

impl ChartService {
    pub fn new(settings: &ChartSettings) -> Self {
        let format = NumberFormat::from_tag(&settings.locale);
        Self {
            series_service: SeriesService::new(
                settings.date_policy,
                ParserRegistry::new_with_defaults(),
            ),
            axis_service: AxisService::new(format, settings.default_sections),
            layout_service: LayoutService::new(settings.screen_width),
            format,
            fit_threshold: settings.fit_threshold,
            first_label_padding: settings.first_label_padding,
            min_label_width: settings.min_label_width,
        }
    }

    pub fn series_service(&self) -> &SeriesService {
        &self.series_service
    }

    pub fn axis_service(&self) -> &AxisService {
        &self.axis_service
    }

    pub fn layout_service(&self) -> &LayoutService {
        &self.layout_service
    }

    pub fn set_screen_width(&mut self, screen_width: f64) {
        self.layout_service.set_screen_width(screen_width);
    }

    /// Full pipeline for one channel: normalize, fall back, lay out.
    ///
    /// An empty `points` list in the result is the "no data" state.
    pub fn render(&self, records: &[Value], channel: Channel, request: &RenderRequest) -> ChartData {
        let series = self.series_service.build_with_fallback(records, channel);
        self.render_series(&series, request)
    }

    /// Lay out an already-built channel series.
    pub fn render_series(&self, series: &ChannelSeries, request: &RenderRequest) -> ChartData {
        let values = series.values();
        let mode = request
            .mode
            .unwrap_or_else(|| DisplayMode::for_point_count(values.len(), self.fit_threshold));
        let axis = self
            .axis_service
            .compute_axis(&values, request.axis_override.as_ref());
        let spacing = self
            .layout_service
            .compute_layout(values.len(), mode, request.spacing_multiplier);

        let stride = self.label_stride(mode, &spacing);
        let points = series
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let label = if i == 0 {
                    format!("{}{}", " ".repeat(self.first_label_padding), month_day_label(&p.date))
                } else if i % stride == 0 {
                    month_day_label(&p.date)
                } else {
                    String::new()
                };
                ChartPoint {
                    value: p.value - axis.min,
                    label,
                    data_point_text: self.format.format(p.value, TOOLTIP_DECIMALS),
                }
            })
            .collect();

        ChartData {
            channel: series.channel,
            mode,
            tier: series.tier,
            points,
            axis,
            spacing,
        }
    }

    /// Every n-th point keeps its x label when fit-mode spacing is too
    /// narrow for one label per point.
    fn label_stride(&self, mode: DisplayMode, spacing: &LayoutSpec) -> usize {
        if mode != DisplayMode::Fit || spacing.spacing >= self.min_label_width {
            return 1;
        }
        ((self.min_label_width / spacing.spacing).ceil() as usize).max(1)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(&ChartSettings::default())
    }
}
