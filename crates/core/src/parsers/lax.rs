use serde_json::Value;

use crate::models::point::ParserTier;

use super::tokens::plain_tokens;
use super::traits::{finite_number, parse_nested, ValueParser, MAX_NESTING_DEPTH};

/// Last-resort parser for the fallback tier.
///
/// Strings: commas dropped, last plain numeric token wins.
/// Objects: nested value keys first, then any field in payload order.
/// Arrays: last element that parses.
pub struct LaxValueParser;

impl LaxValueParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(s: &str) -> Option<f64> {
        plain_tokens(s).last().copied()
    }
}

impl Default for LaxValueParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueParser for LaxValueParser {
    fn name(&self) -> &str {
        "lax"
    }

    fn tier(&self) -> ParserTier {
        ParserTier::Lax
    }

    fn parse_at_depth(&self, raw: &Value, depth: usize) -> Option<f64> {
        if depth > MAX_NESTING_DEPTH {
            return None;
        }
        match raw {
            Value::Number(_) => finite_number(raw),
            Value::String(s) => Self::parse_str(s),
            Value::Object(map) => parse_nested(self, map, depth).or_else(|| {
                map.values()
                    .find_map(|nested| self.parse_at_depth(nested, depth + 1))
            }),
            Value::Array(items) => items
                .iter()
                .rev()
                .find_map(|item| self.parse_at_depth(item, depth + 1)),
            Value::Null | Value::Bool(_) => None,
        }
    }
}
