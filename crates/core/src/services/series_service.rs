use serde_json::Value;

use crate::models::point::{Channel, ChannelSeries, NormalizedPoint, ParserTier, SeriesPoint};
use crate::models::settings::DatePolicy;
use crate::parsers::date::DateNormalizer;
use crate::parsers::fields::{channel_aliases, resolve, DATE_ALIASES};
use crate::parsers::registry::ParserRegistry;
use crate::parsers::traits::ValueParser;

/// Turns raw backend records into sorted, normalized rate series.
///
/// Pure and deterministic: no I/O, input records are never mutated.
pub struct SeriesService {
    dates: DateNormalizer,
    registry: ParserRegistry,
}

impl SeriesService {
    pub fn new(policy: DatePolicy, registry: ParserRegistry) -> Self {
        Self {
            dates: DateNormalizer::new(policy),
            registry,
        }
    }

    pub fn date_policy(&self) -> DatePolicy {
        self.dates.policy()
    }

    /// Normalize `records` with one value parser.
    ///
    /// 1. Resolve and normalize the date; records without one are dropped.
    /// 2. Resolve and parse all four channels; records with none are dropped.
    /// 3. Stable-sort the survivors by date.
    pub fn build(&self, records: &[Value], parser: &dyn ValueParser) -> Vec<NormalizedPoint> {
        let mut points = Vec::with_capacity(records.len());
        let mut not_objects = 0usize;
        let mut missing_date = 0usize;
        let mut missing_rates = 0usize;

        for record in records {
            let Some(map) = record.as_object() else {
                not_objects += 1;
                continue;
            };
            let Some(date) = resolve(map, DATE_ALIASES).and_then(|raw| self.dates.normalize(raw))
            else {
                missing_date += 1;
                continue;
            };

            let rate = |channel: Channel| {
                resolve(map, channel_aliases(channel)).and_then(|raw| parser.parse(raw))
            };
            let point = NormalizedPoint {
                date,
                usd_rate: rate(Channel::Usd),
                eur_rate: rate(Channel::Eur),
                jpy_rate: rate(Channel::Jpy),
                cny_rate: rate(Channel::Cny),
            };
            if !point.has_any_rate() {
                missing_rates += 1;
                continue;
            }
            points.push(point);
        }

        // `sort_by` is stable: equal dates keep input order.
        points.sort_by(|a, b| a.date.cmp(&b.date));

        let dropped = not_objects + missing_date + missing_rates;
        if dropped > 0 {
            tracing::debug!(
                parser = parser.name(),
                kept = points.len(),
                not_objects,
                missing_date,
                missing_rates,
                "Dropped unusable records"
            );
        }
        points
    }

    /// Normalize with the primary parser only.
    pub fn normalize(&self, records: &[Value]) -> Vec<NormalizedPoint> {
        match self.registry.primary() {
            Some(parser) => self.build(records, parser),
            None => Vec::new(),
        }
    }

    /// Build one channel's series, falling back through the parser tiers.
    ///
    /// Each registered parser is tried in order; the first that yields at
    /// least one finite, positive value for `channel` wins. When none does,
    /// the result is empty (tier `Empty`) but still carries the largest
    /// normalized series any tier produced.
    pub fn build_with_fallback(&self, records: &[Value], channel: Channel) -> ChannelSeries {
        let mut best: Vec<NormalizedPoint> = Vec::new();

        for parser in self.registry.parsers() {
            let normalized = self.build(records, parser);
            let points = filter_channel(&normalized, channel);

            if !points.is_empty() {
                if parser.tier() != ParserTier::Strict {
                    tracing::info!(
                        parser = parser.name(),
                        points = points.len(),
                        "Fallback parser recovered {channel} series"
                    );
                }
                return ChannelSeries {
                    channel,
                    tier: parser.tier(),
                    points,
                    normalized,
                };
            }

            tracing::debug!(parser = parser.name(), "No usable {channel} values");
            if normalized.len() > best.len() {
                best = normalized;
            }
        }

        tracing::warn!(records = records.len(), "No {channel} data after all parser tiers");
        ChannelSeries {
            channel,
            tier: ParserTier::Empty,
            points: Vec::new(),
            normalized: best,
        }
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new(DatePolicy::default(), ParserRegistry::new_with_defaults())
    }
}

/// Keep points whose `channel` value is finite and strictly positive.
/// Rates are never zero or negative, so anything else is noise.
pub fn filter_channel(points: &[NormalizedPoint], channel: Channel) -> Vec<SeriesPoint> {
    points
        .iter()
        .filter_map(|p| {
            p.rate(channel)
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|value| SeriesPoint {
                    date: p.date.clone(),
                    value,
                })
        })
        .collect()
}
