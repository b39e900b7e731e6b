use serde_json::{Map, Value};

use crate::models::point::Channel;

/// One observation as delivered by the backend: an untyped JSON object.
pub type RawRecord = Map<String, Value>;

// ── Alias lists ─────────────────────────────────────────────────────
//
// Lookup is case-insensitive, so each list only carries spellings that
// differ in more than letter case.

pub const DATE_ALIASES: &[&str] = &[
    "date",
    "baseDate",
    "base_date",
    "tradeDate",
    "trade_date",
    "searchDate",
    "search_date",
    "recordDate",
    "record_date",
    "day",
    "dt",
    "time",
    "timestamp",
    "createdAt",
    "created_at",
];

pub const USD_ALIASES: &[&str] = &[
    "usdRate",
    "usd_rate",
    "usd",
    "usdKrw",
    "usd_krw",
    "dollar",
    "dollarRate",
    "dollar_rate",
];

pub const EUR_ALIASES: &[&str] = &[
    "eurRate",
    "eur_rate",
    "eur",
    "eurKrw",
    "eur_krw",
    "euro",
    "euroRate",
    "euro_rate",
];

pub const JPY_ALIASES: &[&str] = &[
    "jpyRate",
    "jpy_rate",
    "jpy",
    "jpy100",
    "jpy_100",
    "jpy(100)",
    "jpyKrw",
    "jpy_krw",
    "yen",
    "yenRate",
    "yen_rate",
];

pub const CNY_ALIASES: &[&str] = &[
    "cnyRate",
    "cny_rate",
    "cny",
    "cnhRate",
    "cnh_rate",
    "cnh",
    "cnyKrw",
    "cny_krw",
    "yuan",
    "yuanRate",
    "yuan_rate",
];

/// Generic keys under which a nested object may carry its number.
/// `deal_bas_r` / `dealBasR` are the bank exchange-rate API's base rate.
pub const NESTED_VALUE_KEYS: &[&str] = &[
    "value",
    "rate",
    "amount",
    "avg",
    "average",
    "deal_bas_r",
    "dealBasR",
];

/// The alias list for one currency channel.
pub fn channel_aliases(channel: Channel) -> &'static [&'static str] {
    match channel {
        Channel::Usd => USD_ALIASES,
        Channel::Eur => EUR_ALIASES,
        Channel::Jpy => JPY_ALIASES,
        Channel::Cny => CNY_ALIASES,
    }
}

/// Find the raw value of a logical field.
///
/// Exact key lookup over all aliases first, then a case-insensitive scan.
/// Presence is what counts: a key mapped to `null` still matches and its
/// `null` is returned for the parser to reject.
pub fn resolve<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .find_map(|alias| record.get(*alias))
        .or_else(|| {
            aliases.iter().find_map(|alias| {
                record
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(alias))
                    .map(|(_, value)| value)
            })
        })
}
