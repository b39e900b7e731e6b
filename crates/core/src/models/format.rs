use num_format::{Locale, ToFormattedString};

use super::point::CanonicalDate;

/// Locale-aware number formatting for axis labels and tooltips.
///
/// Integer digits are grouped with the locale's separator (`1,350` vs `1.350`);
/// up to `max_decimals` fractional digits are kept, trailing zeros dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    locale: Locale,
}

impl NumberFormat {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Map a user-provided locale tag to a `num_format::Locale`.
    ///
    /// Common short tags are matched case-insensitively; anything else is
    /// tried as a CLDR name and falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        let locale = match tag.trim().to_lowercase().replace('_', "-").as_str() {
            "en" | "us" | "en-us" => Locale::en,
            "ko" | "kr" | "ko-kr" | "korean" => Locale::ko,
            "ja" | "jp" | "ja-jp" => Locale::ja,
            "zh" | "cn" | "zh-cn" => Locale::zh,
            "de" | "de-de" | "german" => Locale::de,
            "fr" | "fr-fr" => Locale::fr,
            "es" | "es-es" => Locale::es,
            "it" | "it-it" => Locale::it,
            "pt" | "pt-pt" | "pt-br" => Locale::pt,
            "nl" | "nl-nl" => Locale::nl,
            _ => Locale::from_name(tag.trim()).unwrap_or(Locale::en),
        };
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format(&self, value: f64, max_decimals: u32) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let max_decimals = max_decimals.min(6);
        let factor = 10u64.pow(max_decimals);
        let scaled = (value.abs() * factor as f64).round();
        if scaled >= u64::MAX as f64 {
            return value.to_string();
        }
        let scaled = scaled as u64;
        let int_part = scaled / factor;
        let frac_part = scaled % factor;

        let mut out = String::new();
        if value < 0.0 && scaled != 0 {
            out.push_str(self.locale.minus_sign());
        }
        out.push_str(&int_part.to_formatted_string(&self.locale));
        if frac_part != 0 {
            let digits = format!("{:0width$}", frac_part, width = max_decimals as usize);
            out.push_str(self.locale.decimal());
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(Locale::en)
    }
}

/// Short month/day label (`3/1`) for a canonical date.
/// Dates that are not canonical are shown as-is.
pub fn month_day_label(date: &CanonicalDate) -> String {
    use chrono::Datelike;

    match date.to_naive() {
        Some(d) => format!("{}/{}", d.month(), d.day()),
        None => date.as_str().to_string(),
    }
}
