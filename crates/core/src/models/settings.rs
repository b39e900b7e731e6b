use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::services::axis_service::MAX_SECTIONS;

/// What to do with a date string that cannot be normalized to `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatePolicy {
    /// Keep the trimmed raw string so the record is not lost.
    /// Such dates sort lexicographically among canonical ones.
    #[default]
    Lenient,
    /// Drop the record.
    Strict,
}

/// Chart configuration supplied by the host app.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Logical width of the screen the chart is drawn on, in px.
    pub screen_width: f64,

    /// Locale tag used for grouping separators in labels (e.g. "en", "ko", "de").
    pub locale: String,

    pub date_policy: DatePolicy,

    /// Datasets with more points than this are shown in scrollable day mode
    /// when the caller does not pick a mode.
    pub fit_threshold: usize,

    /// Number of spaces prepended to the first x label.
    pub first_label_padding: usize,

    /// Narrowest horizontal room an x label needs before labels get thinned, in px.
    pub min_label_width: f64,

    /// Y axis section count when not overridden.
    pub default_sections: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            screen_width: 360.0,
            locale: "en".to_string(),
            date_policy: DatePolicy::Lenient,
            fit_threshold: 31,
            first_label_padding: 2,
            min_label_width: 36.0,
            default_sections: 6,
        }
    }
}

impl ChartSettings {
    /// Parse settings from a JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: ChartSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.screen_width.is_finite() || self.screen_width <= 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "screen_width must be a positive number, got {}",
                self.screen_width
            )));
        }
        if !self.min_label_width.is_finite() || self.min_label_width < 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "min_label_width must be a non-negative number, got {}",
                self.min_label_width
            )));
        }
        if self.default_sections == 0 || self.default_sections > MAX_SECTIONS {
            return Err(CoreError::InvalidSettings(format!(
                "default_sections must be between 1 and {MAX_SECTIONS}, got {}",
                self.default_sections
            )));
        }
        if self.locale.trim().is_empty() {
            return Err(CoreError::InvalidSettings("locale must not be empty".into()));
        }
        Ok(())
    }
}
