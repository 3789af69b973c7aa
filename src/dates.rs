//! Publication timestamp normalization.
//!
//! Providers disagree on timestamp formats: NewsAPI and the Guardian send
//! ISO-8601, feeds send RFC 2822, and a few sources send bare dates. Everything
//! is reduced to a timezone-naive [`NaiveDateTime`] by dropping the offset, so
//! `2025-09-25T03:00:00+02:00` becomes `2025-09-25 03:00:00`.
//!
//! Unparseable input is not an error. Callers get `None` and decide what it
//! means: the scorer skips its recency check, the batch sort treats the
//! article as the oldest possible.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISO_NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const ISO_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const FALLBACK_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";
const FALLBACK_LOCALE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse a published-timestamp string of unknown format.
///
/// Tried in order: ISO-8601 (with `Z`, an offset, or none), RFC 2822, then
/// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` and `Dow Mon DD HH:MM:SS +ZZZZ YYYY`.
/// The first successful parse wins.
pub fn parse_published(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    parse_iso(s)
        .or_else(|| parse_rfc2822(s))
        .or_else(|| parse_fallback(s))
}

/// Sort key for recency ordering; unparseable timestamps sort as the oldest.
pub fn sort_key(raw: &str) -> NaiveDateTime {
    parse_published(raw).unwrap_or(NaiveDateTime::MIN)
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, ISO_OFFSET_FORMAT) {
        return Some(dt.naive_local());
    }
    ISO_NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn parse_rfc2822(s: &str) -> Option<NaiveDateTime> {
    if !s.contains(',') {
        return None;
    }
    DateTime::parse_from_rfc2822(s).ok().map(|dt| dt.naive_local())
}

fn parse_fallback(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, FALLBACK_DATETIME_FORMAT) {
        return Some(dt);
    }
    if let Some(dt) = NaiveDate::parse_from_str(s, FALLBACK_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(dt);
    }
    DateTime::parse_from_str(s, FALLBACK_LOCALE_FORMAT)
        .ok()
        .map(|dt| dt.naive_local())
}
