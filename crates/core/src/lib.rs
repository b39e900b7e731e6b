pub mod errors;
pub mod models;
pub mod parsers;
pub mod services;

use models::{
    chart::{ChartData, DisplayMode, LayoutSpec, RenderRequest},
    format::NumberFormat,
    point::{Channel, ChannelSeries, NormalizedPoint},
    settings::ChartSettings,
};
use serde_json::Value;
use services::{axis_service::MAX_SECTIONS, chart_service::ChartService, payload};

use errors::CoreError;

/// Main entry point for the rate chart core library.
/// Holds the chart settings and the services derived from them.
///
/// Every call recomputes from scratch; nothing is cached between renders.
#[must_use]
pub struct RateChart {
    settings: ChartSettings,
    chart_service: ChartService,
}

impl std::fmt::Debug for RateChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateChart")
            .field("settings", &self.settings)
            .finish()
    }
}

impl RateChart {
    /// Create a chart engine with validated settings.
    pub fn new(settings: ChartSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    /// Create a chart engine with default settings.
    pub fn with_defaults() -> Self {
        Self::build(ChartSettings::default())
    }

    /// Create a chart engine from a JSON settings object.
    pub fn from_settings_json(json: &str) -> Result<Self, CoreError> {
        let settings = ChartSettings::from_json(json)?;
        Ok(Self::build(settings))
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Update the screen width (e.g. on rotation).
    pub fn set_screen_width(&mut self, screen_width: f64) -> Result<(), CoreError> {
        let mut settings = self.settings.clone();
        settings.screen_width = screen_width;
        settings.validate()?;
        self.settings = settings;
        self.chart_service.set_screen_width(screen_width);
        Ok(())
    }

    /// Switch the locale used for label grouping.
    pub fn set_locale(&mut self, locale: impl Into<String>) -> Result<(), CoreError> {
        let mut settings = self.settings.clone();
        settings.locale = locale.into();
        settings.validate()?;
        *self = Self::build(settings);
        Ok(())
    }

    /// Formatter for the configured locale.
    #[must_use]
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::from_tag(&self.settings.locale)
    }

    // ── Normalization ───────────────────────────────────────────────

    /// Normalize raw records with the strict parser: sorted by date,
    /// records without a date or without any rate removed.
    #[must_use]
    pub fn normalize(&self, records: &[Value]) -> Vec<NormalizedPoint> {
        self.chart_service.series_service().normalize(records)
    }

    /// One channel's positive values, with the lax parser as fallback.
    #[must_use]
    pub fn series(&self, records: &[Value], channel: Channel) -> ChannelSeries {
        self.chart_service
            .series_service()
            .build_with_fallback(records, channel)
    }

    // ── Layout ──────────────────────────────────────────────────────

    /// Horizontal spacing for `point_count` points in `mode`.
    pub fn layout(
        &self,
        point_count: usize,
        mode: DisplayMode,
        spacing_multiplier: Option<f64>,
    ) -> Result<LayoutSpec, CoreError> {
        validate_multiplier(spacing_multiplier)?;
        Ok(self
            .chart_service
            .layout_service()
            .compute_layout(point_count, mode, spacing_multiplier))
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Render-ready chart data for one channel.
    ///
    /// Malformed records never fail the call; an empty `points` list is the
    /// "no data" state. Only an inconsistent request is an error.
    pub fn render(
        &self,
        records: &[Value],
        channel: Channel,
        request: &RenderRequest,
    ) -> Result<ChartData, CoreError> {
        validate_request(request)?;
        Ok(self.chart_service.render(records, channel, request))
    }

    /// Decode a JSON payload (bare array or known envelope) and render it.
    pub fn render_json(
        &self,
        json: &str,
        channel: Channel,
        request: &RenderRequest,
    ) -> Result<ChartData, CoreError> {
        let document = payload::parse_payload(json)?;
        let records = payload::extract_records(&document)?;
        self.render(records, channel, request)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: ChartSettings) -> Self {
        let chart_service = ChartService::new(&settings);
        Self {
            settings,
            chart_service,
        }
    }
}

impl Default for RateChart {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn validate_multiplier(spacing_multiplier: Option<f64>) -> Result<(), CoreError> {
    match spacing_multiplier {
        Some(m) if !m.is_finite() || m <= 0.0 => Err(CoreError::ValidationError(format!(
            "spacing multiplier must be a positive number, got {m}"
        ))),
        _ => Ok(()),
    }
}

fn validate_request(request: &RenderRequest) -> Result<(), CoreError> {
    validate_multiplier(request.spacing_multiplier)?;
    if let Some(o) = &request.axis_override {
        if let (Some(min), Some(max)) = (o.min, o.max) {
            if min >= max {
                return Err(CoreError::ValidationError(format!(
                    "axis override min ({min}) must be below max ({max})"
                )));
            }
        }
        if let Some(step) = o.step {
            if !step.is_finite() || step <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "axis override step must be a positive number, got {step}"
                )));
            }
        }
        if let Some(sections) = o.sections {
            if sections == 0 || sections > MAX_SECTIONS {
                return Err(CoreError::ValidationError(format!(
                    "axis override sections must be between 1 and {MAX_SECTIONS}, got {sections}"
                )));
            }
        }
    }
    Ok(())
}
