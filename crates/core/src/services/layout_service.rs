use crate::models::chart::{DisplayMode, LayoutSpec};

// ── Day (scrollable) mode ───────────────────────────────────────────
const DAY_VISIBLE_POINTS: usize = 10;
const DAY_MIN_SPACING: f64 = 28.0;
const DAY_MAX_SPACING: f64 = 64.0;
const DAY_MIN_EDGE: f64 = 16.0;
const DAY_MAX_EDGE: f64 = 24.0;

// ── Fit (fixed-width) mode ──────────────────────────────────────────
/// Horizontal room taken by the y axis and chart margins.
const FIT_HORIZONTAL_INSET: f64 = 40.0;
const FIT_MIN_SPACING: f64 = 12.0;
const FIT_MAX_SPACING: f64 = 44.0;
const FIT_INITIAL_RATIO: f64 = 0.75;
const FIT_MIN_INITIAL: f64 = 22.0;
const FIT_MAX_INITIAL: f64 = 30.0;
const FIT_END_RATIO: f64 = 0.9;
const FIT_MIN_END: f64 = 24.0;
const FIT_MAX_END: f64 = 34.0;

/// Computes horizontal point spacing for the chart widget.
///
/// Every value is clamped between a fixed floor and a multiplier-scaled
/// ceiling, so labels stay legible at any density and screen width.
pub struct LayoutService {
    screen_width: f64,
}

impl LayoutService {
    pub fn new(screen_width: f64) -> Self {
        Self { screen_width }
    }

    pub fn screen_width(&self) -> f64 {
        self.screen_width
    }

    pub fn set_screen_width(&mut self, screen_width: f64) {
        self.screen_width = screen_width;
    }

    pub fn compute_layout(
        &self,
        point_count: usize,
        mode: DisplayMode,
        spacing_multiplier: Option<f64>,
    ) -> LayoutSpec {
        let m = effective_multiplier(spacing_multiplier);
        match mode {
            DisplayMode::Day => self.day_layout(point_count, m),
            DisplayMode::Fit => self.fit_layout(point_count, m),
        }
    }

    fn day_layout(&self, point_count: usize, m: f64) -> LayoutSpec {
        let visible = point_count.clamp(1, DAY_VISIBLE_POINTS) as f64;
        let base = bounded(self.screen_width / visible, DAY_MIN_SPACING, DAY_MAX_SPACING);
        let spacing = bounded(base * m, DAY_MIN_SPACING, DAY_MAX_SPACING * m);
        let edge = bounded(spacing / 2.0, DAY_MIN_EDGE, DAY_MAX_EDGE * m);
        LayoutSpec {
            spacing,
            initial_spacing: edge,
            end_spacing: edge,
        }
    }

    fn fit_layout(&self, point_count: usize, m: f64) -> LayoutSpec {
        let gaps = point_count.saturating_sub(1).max(1) as f64;
        let spacing = bounded(
            (self.screen_width - FIT_HORIZONTAL_INSET) / gaps,
            FIT_MIN_SPACING,
            FIT_MAX_SPACING * m,
        );
        LayoutSpec {
            spacing,
            initial_spacing: bounded(spacing * FIT_INITIAL_RATIO, FIT_MIN_INITIAL, FIT_MAX_INITIAL * m),
            end_spacing: bounded(spacing * FIT_END_RATIO, FIT_MIN_END, FIT_MAX_END * m),
        }
    }
}

impl Default for LayoutService {
    fn default() -> Self {
        Self::new(360.0)
    }
}

/// Non-finite or non-positive multipliers mean "no zoom".
pub fn effective_multiplier(spacing_multiplier: Option<f64>) -> f64 {
    spacing_multiplier
        .filter(|m| m.is_finite() && *m > 0.0)
        .unwrap_or(1.0)
}

/// Clamp where the floor wins if a scaled ceiling drops below it.
/// Unlike `f64::clamp`, never panics on `hi < lo`.
fn bounded(value: f64, lo: f64, hi: f64) -> f64 {
    let value = if value.is_finite() { value } else { lo };
    value.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_wins_over_low_ceiling() {
        assert_eq!(bounded(5.0, 22.0, 15.0), 22.0);
    }

    #[test]
    fn nan_maps_to_floor() {
        assert_eq!(bounded(f64::NAN, 12.0, 44.0), 12.0);
    }
}
