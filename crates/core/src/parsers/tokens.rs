//! Numeric token scanning for human-formatted rate strings
//! (`"₩1,350.25"`, `"1.234,56 EUR"`, `"USD 1350"`).

use std::sync::LazyLock;

use regex::Regex;

/// Signed numeric tokens: an optional `-`/`+` directly before a digit, then
/// digits and `,`/`.` separators, always ending on a digit.
static RE_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?[0-9][0-9.,]*[0-9]|[-+]?[0-9]").expect("valid regex"));

/// Plain `-?digits(.digits)?` runs for the last-resort scan.
static RE_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+(?:\.[0-9]+)?").expect("valid regex"));

pub(crate) fn grouped_tokens(s: &str) -> Vec<&str> {
    RE_GROUPED.find_iter(s).map(|m| m.as_str()).collect()
}

/// Interpret one grouped token, deciding which separator is the decimal point.
///
/// - both `,` and `.`: the one occurring last is decimal, the other grouping
/// - only `,`: decimal when it occurs once with 1-3 trailing digits
/// - only `.`: grouping when it occurs more than once or has 0 or >3 trailing digits
pub(crate) fn interpret_grouped(token: &str) -> Option<f64> {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let normalized = match (digits.rfind(','), digits.rfind('.')) {
        (Some(comma), Some(dot)) => {
            let (decimal, grouping) = if comma > dot { (',', '.') } else { ('.', ',') };
            if digits.matches(decimal).count() > 1 {
                return None;
            }
            digits
                .chars()
                .filter(|c| *c != grouping)
                .map(|c| if c == decimal { '.' } else { c })
                .collect::<String>()
        }
        (Some(comma), None) => {
            let trailing = digits.len() - comma - 1;
            if digits.matches(',').count() == 1 && (1..=3).contains(&trailing) {
                digits.replace(',', ".")
            } else {
                digits.replace(',', "")
            }
        }
        (None, Some(dot)) => {
            let trailing = digits.len() - dot - 1;
            if digits.matches('.').count() == 1 && (1..=3).contains(&trailing) {
                digits.to_string()
            } else {
                digits.replace('.', "")
            }
        }
        (None, None) => digits.to_string(),
    };

    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Plain tokens for the last-resort scan: commas are dropped, then
/// numeric runs are taken with no separator heuristics.
pub(crate) fn plain_tokens(s: &str) -> Vec<f64> {
    let cleaned = s.replace(',', "");
    RE_PLAIN
        .find_iter(&cleaned)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}
