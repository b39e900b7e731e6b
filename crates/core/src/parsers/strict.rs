use serde_json::Value;

use crate::models::point::ParserTier;

use super::tokens::{grouped_tokens, interpret_grouped};
use super::traits::{finite_number, parse_nested, ValueParser, MAX_NESTING_DEPTH};

/// Separator-aware parser used on the first pass.
///
/// - JSON numbers pass through when finite.
/// - Strings are scanned for grouped numeric tokens; each token's decimal
///   separator is disambiguated, and the token with the greatest magnitude
///   wins (stray indices or codes are usually small).
/// - Objects are searched through the generic nested value keys.
pub struct StrictValueParser;

impl StrictValueParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a formatted string such as `"1.234,56"` or `"₩1,350.25"`.
    pub fn parse_str(s: &str) -> Option<f64> {
        grouped_tokens(s)
            .into_iter()
            .filter_map(interpret_grouped)
            .fold(None, |best: Option<f64>, v| match best {
                Some(b) if b.abs() >= v.abs() => Some(b),
                _ => Some(v),
            })
    }
}

impl Default for StrictValueParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueParser for StrictValueParser {
    fn name(&self) -> &str {
        "strict"
    }

    fn tier(&self) -> ParserTier {
        ParserTier::Strict
    }

    fn parse_at_depth(&self, raw: &Value, depth: usize) -> Option<f64> {
        if depth > MAX_NESTING_DEPTH {
            return None;
        }
        match raw {
            Value::Number(_) => finite_number(raw),
            Value::String(s) => Self::parse_str(s),
            Value::Object(map) => parse_nested(self, map, depth),
            Value::Null | Value::Bool(_) | Value::Array(_) => None,
        }
    }
}
