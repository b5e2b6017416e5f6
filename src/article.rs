//! Article records as published in `articles/articles.json`.
//!
//! The listing treats articles as read-only input. Only `date` is interpreted
//! (for ordering and display); every other field is carried through verbatim.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Read time shown on a card when the record carries none.
pub const DEFAULT_READ_TIME: &str = "5 мин";

/// One blog article.
///
/// `id` accepts either a JSON string or a JSON number; it is stored as text
/// since it only ever ends up inside a detail link. A record with a missing
/// title or category still loads, with the field left empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub category: String,
    /// Raw date value. Unparseable values are kept; they sort as oldest.
    #[serde(default, deserialize_with = "date_from_any")]
    pub date: String,
    #[serde(rename = "readTime", default)]
    pub read_time: Option<String>,
    /// Name of the detail body file (`<id>.html`), unused by the listing.
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Publication instant, if `date` parses.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }

    /// Unix timestamp used as the sort key. `None` orders before every date.
    pub fn timestamp(&self) -> Option<i64> {
        self.published().map(|dt| dt.timestamp())
    }

    /// Calendar date as written in the record (offset preserved for RFC 3339).
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        calendar_date(&self.date)
    }

    pub fn read_time_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.read_time.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => default,
        }
    }
}

/// Parse an article date.
///
/// Accepts `YYYY-MM-DD` (taken as midnight UTC), RFC 3339 timestamps and
/// date-times without an offset (taken as UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|dt| dt.and_utc())
}

fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

/// Strings are kept as written. Numbers are epoch milliseconds and are
/// stored as RFC 3339; anything else becomes an empty (unparseable) date.
fn date_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Number(serde_json::Number),
        Other(IgnoredAny),
    }

    Ok(match RawDate::deserialize(deserializer)? {
        RawDate::Text(s) => s,
        RawDate::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|ms| ms as i64))
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| n.to_string()),
        RawDate::Other(_) => String::new(),
    })
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
