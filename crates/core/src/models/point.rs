use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One of the four tracked currency rates in a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// US dollar
    Usd,
    /// Euro
    Eur,
    /// Japanese yen (usually quoted per 100)
    Jpy,
    /// Chinese yuan (onshore CNY or offshore CNH)
    Cny,
}

impl Channel {
    /// All channels in payload order.
    pub const ALL: [Channel; 4] = [Channel::Usd, Channel::Eur, Channel::Jpy, Channel::Cny];

    /// ISO 4217 code of the channel's currency.
    pub fn code(&self) -> &'static str {
        match self {
            Channel::Usd => "USD",
            Channel::Eur => "EUR",
            Channel::Jpy => "JPY",
            Channel::Cny => "CNY",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Channel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Channel::Usd),
            "EUR" => Ok(Channel::Eur),
            "JPY" => Ok(Channel::Jpy),
            "CNY" | "CNH" => Ok(Channel::Cny),
            other => Err(CoreError::ValidationError(format!(
                "Unknown currency channel: {other}"
            ))),
        }
    }
}

/// A date string used for ordering and display.
///
/// Normally `YYYY-MM-DD`, so lexicographic order equals chronological order.
/// Under the lenient date policy it may hold an opaque trimmed string that
/// could not be normalized; `is_canonical()` tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalDate(String);

impl CanonicalDate {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the string has the `YYYY-MM-DD` shape.
    pub fn is_canonical(&self) -> bool {
        is_canonical_shape(&self.0)
    }

    /// Calendar date, when the string is canonical and a real day.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        if !self.is_canonical() {
            return None;
        }
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl std::fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `YYYY-MM-DD`: four digits, dash, two digits, dash, two digits.
pub(crate) fn is_canonical_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

/// One normalized observation. At least one channel is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub date: CanonicalDate,
    pub usd_rate: Option<f64>,
    pub eur_rate: Option<f64>,
    pub jpy_rate: Option<f64>,
    pub cny_rate: Option<f64>,
}

impl NormalizedPoint {
    /// Value of a single channel.
    pub fn rate(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Usd => self.usd_rate,
            Channel::Eur => self.eur_rate,
            Channel::Jpy => self.jpy_rate,
            Channel::Cny => self.cny_rate,
        }
    }

    pub fn has_any_rate(&self) -> bool {
        Channel::ALL.iter().any(|c| self.rate(*c).is_some())
    }
}

/// A `(date, value)` pair of a filtered channel. `value` is finite and > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: CanonicalDate,
    pub value: f64,
}

/// Which parser tier produced a channel's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParserTier {
    /// Separator-aware strict parsing succeeded
    Strict,
    /// Strict parsing was empty; the last-resort token scan produced data
    Lax,
    /// Neither tier produced a usable value
    Empty,
}

/// The filtered series of one channel plus what the fallback learned on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSeries {
    pub channel: Channel,

    pub tier: ParserTier,

    /// Points with a finite, positive value for `channel`, sorted by date.
    pub points: Vec<SeriesPoint>,

    /// The best normalized series any tier produced, unfiltered.
    /// Lets callers inspect the other channels when `points` is empty.
    pub normalized: Vec<NormalizedPoint>,
}

impl ChannelSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}
