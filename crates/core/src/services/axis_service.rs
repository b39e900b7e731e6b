use crate::models::chart::{AxisOverride, AxisSpec};
use crate::models::format::NumberFormat;

/// Padding added above and below the data, as a share of the data range.
const PADDING_RATIO: f64 = 0.1;
const MIN_PADDING: f64 = 1.0;
const MIN_STEP: f64 = 1.0;
/// Upper bound on sections, whether configured, supplied, or derived from a step.
pub const MAX_SECTIONS: u32 = 50;
/// Collapsed ranges are widened by at least this many ulps of the bound.
const COLLAPSE_WIDEN_ULPS: f64 = 8.0;
/// Fractional digits kept in axis labels.
const LABEL_DECIMALS: u32 = 2;

/// Derives the Y axis (bounds, step, labels) from channel values.
pub struct AxisService {
    format: NumberFormat,
    default_sections: u32,
}

impl AxisService {
    pub fn new(format: NumberFormat, default_sections: u32) -> Self {
        Self {
            format,
            default_sections: default_sections.clamp(1, MAX_SECTIONS),
        }
    }

    /// Axis for `values`, with any caller-supplied fields taking precedence.
    ///
    /// Always returns `min < max` and `step > 0`, with `max` landing exactly
    /// on `min + step * sections`.
    pub fn compute_axis(&self, values: &[f64], overrides: Option<&AxisOverride>) -> AxisSpec {
        let base = self.default_axis(values);
        match overrides.filter(|o| !o.is_empty()) {
            Some(o) => self.merge_override(base, o),
            None => base,
        }
    }

    /// Padded, floored/ceiled bounds split into the default section count.
    /// Every finite input value lies within `[min, max]`.
    pub fn default_axis(&self, values: &[f64]) -> AxisSpec {
        let (raw_min, raw_max) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .unwrap_or((0.0, 0.0));

        let padding = ((raw_max - raw_min) * PADDING_RATIO).max(MIN_PADDING);
        let mut min = (raw_min - padding).floor();
        let mut max = (raw_max + padding).ceil();
        if min >= max {
            let widen = (min.abs().max(max.abs()) * f64::EPSILON * COLLAPSE_WIDEN_ULPS).max(1.0);
            min -= widen;
            max += widen;
        }

        // Ceil so `min + step * sections` never lands below the padded max.
        let sections = self.default_sections;
        let step = ((max - min) / f64::from(sections)).ceil().max(MIN_STEP);
        self.spec(min, step, sections)
    }

    fn merge_override(&self, base: AxisSpec, o: &AxisOverride) -> AxisSpec {
        let base_range = base.max - base.min;
        let user_min = o.min.filter(|v| v.is_finite());
        let user_max = o.max.filter(|v| v.is_finite());
        let user_step = o.step.filter(|v| v.is_finite() && *v > 0.0);
        let user_sections = o.sections.filter(|s| *s > 0).map(|s| s.min(MAX_SECTIONS));

        let mut min = user_min.unwrap_or(base.min);
        let mut max = user_max.unwrap_or(base.max);
        if min >= max {
            if user_min.is_none() {
                min = max - base_range;
            } else {
                max = min + base_range;
            }
        }
        let range = max - min;

        let mut step = match user_step {
            Some(step) => step,
            None if user_min.is_some() || user_max.is_some() => {
                let sections = user_sections.unwrap_or(self.default_sections);
                (range / f64::from(sections)).ceil().max(MIN_STEP)
            }
            None => base.step,
        };

        let sections = match user_sections {
            Some(sections) => {
                // Grow the step until the sections cover the range.
                if step * f64::from(sections) < range {
                    step = if user_step.is_some() {
                        range / f64::from(sections)
                    } else {
                        (range / f64::from(sections)).ceil().max(MIN_STEP)
                    };
                }
                sections
            }
            None if user_step.is_some() => {
                let needed = (range / step).ceil().max(1.0);
                if needed > f64::from(MAX_SECTIONS) {
                    step = range / f64::from(MAX_SECTIONS);
                    MAX_SECTIONS
                } else {
                    needed as u32
                }
            }
            None => base.sections,
        };

        let mut spec = self.spec(min, step, sections);
        if let Some(labels) = &o.labels {
            if labels.len() == spec.labels.len() {
                spec.labels = labels.clone();
            } else {
                tracing::warn!(
                    supplied = labels.len(),
                    expected = spec.labels.len(),
                    "Ignoring axis labels that do not match the section count"
                );
            }
        }
        spec
    }

    fn spec(&self, min: f64, step: f64, sections: u32) -> AxisSpec {
        let max = min + step * f64::from(sections);
        AxisSpec {
            min,
            max,
            step,
            sections,
            labels: self.labels(max, step, sections),
        }
    }

    /// `sections + 1` labels from `max` down to `min`.
    fn labels(&self, max: f64, step: f64, sections: u32) -> Vec<String> {
        (0..=sections)
            .map(|i| self.format.format(max - step * f64::from(i), LABEL_DECIMALS))
            .collect()
    }
}

impl Default for AxisService {
    fn default() -> Self {
        Self::new(NumberFormat::default(), 6)
    }
}
