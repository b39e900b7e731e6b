use serde_json::{Map, Value};

use crate::models::point::ParserTier;

use super::fields::{resolve, NESTED_VALUE_KEYS};

/// Objects nested deeper than this are not inspected.
pub const MAX_NESTING_DEPTH: usize = 4;

/// Trait abstraction for value-parsing strategies.
///
/// The series builder is parameterized by a `ValueParser`, so the fallback
/// tier is just the same build run with a laxer implementation.
/// Parsers never fail: anything unusable is `None`.
pub trait ValueParser: Send + Sync {
    /// Human-readable name of this parser (for logs).
    fn name(&self) -> &str;

    /// Which fallback tier this parser represents.
    fn tier(&self) -> ParserTier;

    /// Parse a raw payload scalar (or nested object) into a finite number.
    fn parse(&self, raw: &Value) -> Option<f64> {
        self.parse_at_depth(raw, 0)
    }

    /// Recursive entry point; implementations stop past `MAX_NESTING_DEPTH`.
    fn parse_at_depth(&self, raw: &Value, depth: usize) -> Option<f64>;
}

/// A JSON number as `f64`, if finite.
pub(crate) fn finite_number(raw: &Value) -> Option<f64> {
    raw.as_f64().filter(|v| v.is_finite())
}

/// Try the generic nested value keys of an object in order; first hit wins.
pub(crate) fn parse_nested<P: ValueParser + ?Sized>(
    parser: &P,
    map: &Map<String, Value>,
    depth: usize,
) -> Option<f64> {
    if depth >= MAX_NESTING_DEPTH {
        return None;
    }
    NESTED_VALUE_KEYS.iter().find_map(|key| {
        resolve(map, &[*key]).and_then(|nested| parser.parse_at_depth(nested, depth + 1))
    })
}
