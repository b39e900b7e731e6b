use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::models::point::{is_canonical_shape, CanonicalDate};
use crate::models::settings::DatePolicy;

use super::fields::resolve;
use super::traits::MAX_NESTING_DEPTH;

const YEAR_KEYS: &[&str] = &["year", "yyyy", "yr", "y"];
const MONTH_KEYS: &[&str] = &["month", "mm", "mon", "m"];
/// JavaScript-style months, 0 = January.
const ZERO_BASED_MONTH_KEYS: &[&str] = &["monthIndex", "month_index", "month0"];
/// `date` last: only used when it holds a plain day-of-month number.
const DAY_KEYS: &[&str] = &["day", "dd", "dayOfMonth", "day_of_month", "d", "date"];
const NESTED_DATE_KEYS: &[&str] = &["date", "value"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y. %m. %d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Epoch values below this are seconds, at or above it milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

/// Converts heterogeneous date encodings into `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer {
    policy: DatePolicy,
}

impl DateNormalizer {
    pub fn new(policy: DatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DatePolicy {
        self.policy
    }

    /// Normalize a raw date value. `None` means the record has no usable date.
    pub fn normalize(&self, raw: &Value) -> Option<CanonicalDate> {
        self.normalize_at_depth(raw, 0)
    }

    fn normalize_at_depth(&self, raw: &Value, depth: usize) -> Option<CanonicalDate> {
        if depth > MAX_NESTING_DEPTH {
            return None;
        }
        match raw {
            Value::String(s) => self.normalize_str(s),
            Value::Number(_) => raw.as_f64().and_then(date_from_number).map(CanonicalDate::from_naive),
            Value::Array(items) => date_from_triple(items),
            Value::Object(map) => self.normalize_object(map, depth),
            Value::Null | Value::Bool(_) => None,
        }
    }

    fn normalize_str(&self, s: &str) -> Option<CanonicalDate> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        if is_canonical_shape(trimmed) {
            return Some(CanonicalDate::new(trimmed));
        }
        if let Some(date) = parse_date_str(trimmed) {
            return Some(CanonicalDate::from_naive(date));
        }
        match self.policy {
            DatePolicy::Lenient => {
                tracing::debug!("Keeping un-normalizable date string as-is: {trimmed:?}");
                Some(CanonicalDate::new(trimmed))
            }
            DatePolicy::Strict => None,
        }
    }

    fn normalize_object(&self, map: &Map<String, Value>, depth: usize) -> Option<CanonicalDate> {
        date_from_parts(map)
            .map(CanonicalDate::from_naive)
            .or_else(|| {
                resolve(map, NESTED_DATE_KEYS)
                    .and_then(|nested| self.normalize_at_depth(nested, depth + 1))
            })
    }
}

/// Generic date-string parsing: compact digits, RFC 3339, then known layouts.
fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return match s.len() {
            8 => NaiveDate::parse_from_str(s, "%Y%m%d").ok(),
            10 | 13 => s.parse::<f64>().ok().and_then(date_from_epoch),
            _ => None,
        };
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    let s = s.trim_end_matches('.');
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// 8-digit integers are read as `YYYYMMDD`, anything else as an epoch.
fn date_from_number(n: f64) -> Option<NaiveDate> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && (10_000_101.0..=99_991_231.0).contains(&n) {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}", n as u64), "%Y%m%d") {
            return Some(date);
        }
    }
    date_from_epoch(n)
}

fn date_from_epoch(n: f64) -> Option<NaiveDate> {
    let millis = if n.abs() < EPOCH_MILLIS_THRESHOLD { n * 1000.0 } else { n };
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
}

/// `[year, month, day]`, formatted directly with zero padding.
fn date_from_triple(items: &[Value]) -> Option<CanonicalDate> {
    let [year, month, day] = items else {
        return None;
    };
    let year = whole_number(year)?;
    let month = whole_number(month)?;
    let day = whole_number(day)?;
    if year > 9999 {
        return None;
    }
    Some(CanonicalDate::new(format!("{year:04}-{month:02}-{day:02}")))
}

/// Non-negative integral JSON number.
fn whole_number(v: &Value) -> Option<u64> {
    let n = v.as_f64()?;
    (n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64).then_some(n as u64)
}

/// Integer from a JSON number or a numeric string.
fn integer_field(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `{year, month, day}`-shaped objects, including zero-based months.
fn date_from_parts(map: &Map<String, Value>) -> Option<NaiveDate> {
    let year = resolve(map, YEAR_KEYS).and_then(integer_field)?;
    let month = match resolve(map, MONTH_KEYS).and_then(integer_field) {
        Some(m) => m,
        None => resolve(map, ZERO_BASED_MONTH_KEYS).and_then(integer_field)? + 1,
    };
    let day = resolve(map, DAY_KEYS).and_then(integer_field)?;
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_digits_are_ymd() {
        assert_eq!(parse_date_str("20240301"), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn slash_layout() {
        assert_eq!(parse_date_str("2024/03/01"), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn epoch_seconds_and_millis_agree() {
        assert_eq!(date_from_epoch(1_709_251_200.0), date_from_epoch(1_709_251_200_000.0));
    }

    #[test]
    fn triple_requires_three_whole_numbers() {
        assert!(date_from_triple(&[Value::from(2024), Value::from(3)]).is_none());
        assert!(date_from_triple(&[Value::from(2024), Value::from(3.5), Value::from(1)]).is_none());
    }
}
