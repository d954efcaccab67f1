//! The shape-specific parse tiers.
//!
//! Each tier inspects the input and either claims it (returning the
//! extracted events, possibly none) or passes with `None` so the next
//! tier in the chain can try. Tiers never error.

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::model::SearchEvent;
use crate::search_url::SearchUrlMatcher;

use super::ParseStats;

/// JSON field holding the history entry array in a Takeout export.
pub const BROWSER_HISTORY_FIELD: &str = "Browser_History";

/// Timestamp fields tried, in priority order, by the generic-array tier.
/// All carry millisecond values.
const ARRAY_TIMESTAMP_FIELDS: [&str; 3] = ["lastVisitTime", "timestamp", "time"];

/// First embedded HTTP/HTTPS URL on a line, terminated by whitespace or
/// a comma (so CSV fields do not bleed into the URL).
static LINE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s,]+").expect("pattern compiles"));

/// The input handed to each tier.
#[derive(Debug)]
pub struct TierInput<'a> {
    /// The raw file content.
    pub raw: &'a str,
    /// The content parsed as JSON, when it is valid JSON.
    pub json: Option<&'a Value>,
}

/// Shared state for a parse run.
#[derive(Debug)]
pub struct TierContext<'a> {
    /// Matcher deciding which URLs are search URLs.
    pub matcher: &'a SearchUrlMatcher,
    /// Fallback timestamp for entries with no usable time value.
    pub now: DateTime<Utc>,
    /// Running statistics, updated as entries are scanned.
    pub stats: &'a mut ParseStats,
}

/// One candidate input-shape-specific parsing strategy.
pub trait ParseTier: fmt::Debug {
    /// Short name used in statistics and logging.
    fn name(&self) -> &'static str;

    /// Attempt to parse the input.
    ///
    /// Returns `None` when the input is not this tier's shape, or
    /// `Some(events)` when the tier claims it (an empty vector is a
    /// valid claim: right shape, no recognized searches).
    fn parse(&self, input: &TierInput<'_>, ctx: &mut TierContext<'_>) -> Option<Vec<SearchEvent>>;
}

/// Tier for Chrome Takeout exports: a JSON object with a
/// `Browser_History` entry array.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeoutTier;

impl ParseTier for TakeoutTier {
    fn name(&self) -> &'static str {
        "takeout"
    }

    fn parse(&self, input: &TierInput<'_>, ctx: &mut TierContext<'_>) -> Option<Vec<SearchEvent>> {
        let entries = input
            .json?
            .as_object()?
            .get(BROWSER_HISTORY_FIELD)?
            .as_array()?;

        let mut events = Vec::new();
        for entry in entries {
            ctx.stats.entries_scanned += 1;
            match takeout_event(entry, ctx) {
                Some(event) => events.push(event),
                None => ctx.stats.entries_skipped += 1,
            }
        }
        Some(events)
    }
}

fn takeout_event(entry: &Value, ctx: &TierContext<'_>) -> Option<SearchEvent> {
    let url = entry.get("url")?.as_str()?;
    if !ctx.matcher.is_search_url(url) {
        return None;
    }
    let query = ctx.matcher.extract_query(url)?;

    // Takeout records microsecond precision; older exports carry a plain
    // millisecond timestamp instead.
    let timestamp = entry
        .get("time_usec")
        .and_then(value_as_i64)
        .map(|usec| usec / 1000)
        .or_else(|| entry.get("timestamp").and_then(value_as_i64))
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(|| {
            debug!(%query, "No usable timestamp on entry, using parse time");
            ctx.now
        });

    Some(SearchEvent {
        query,
        source_url: url.to_string(),
        timestamp,
        title: entry.get("title").and_then(Value::as_str).map(str::to_string),
    })
}

/// Tier for generic JSON-array exports (browser extensions, other
/// history tools).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayTier;

impl ParseTier for JsonArrayTier {
    fn name(&self) -> &'static str {
        "json-array"
    }

    fn parse(&self, input: &TierInput<'_>, ctx: &mut TierContext<'_>) -> Option<Vec<SearchEvent>> {
        let entries = input.json?.as_array()?;

        let mut events = Vec::new();
        for entry in entries {
            ctx.stats.entries_scanned += 1;
            match array_event(entry, ctx) {
                Some(event) => events.push(event),
                None => ctx.stats.entries_skipped += 1,
            }
        }
        Some(events)
    }
}

fn array_event(entry: &Value, ctx: &TierContext<'_>) -> Option<SearchEvent> {
    let url = entry.get("url")?.as_str()?;
    if !ctx.matcher.is_search_url(url) {
        return None;
    }
    let query = ctx.matcher.extract_query(url)?;

    let timestamp = ARRAY_TIMESTAMP_FIELDS
        .iter()
        .find_map(|field| entry.get(*field).and_then(value_as_i64))
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(|| {
            debug!(%query, "No usable timestamp on entry, using parse time");
            ctx.now
        });

    Some(SearchEvent {
        query,
        source_url: url.to_string(),
        timestamp,
        title: entry.get("title").and_then(Value::as_str).map(str::to_string),
    })
}

/// Tier for unstructured text/CSV content: scans each line for the first
/// embedded URL. No temporal information is recoverable from this
/// format, so events get the parse-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextTier;

impl ParseTier for PlainTextTier {
    fn name(&self) -> &'static str {
        "text"
    }

    fn parse(&self, input: &TierInput<'_>, ctx: &mut TierContext<'_>) -> Option<Vec<SearchEvent>> {
        // Only applies when the content is not valid JSON.
        if input.json.is_some() {
            return None;
        }

        let mut events = Vec::new();
        for line in input.raw.lines() {
            ctx.stats.entries_scanned += 1;
            match text_event(line, ctx) {
                Some(event) => events.push(event),
                None => ctx.stats.entries_skipped += 1,
            }
        }
        Some(events)
    }
}

fn text_event(line: &str, ctx: &TierContext<'_>) -> Option<SearchEvent> {
    let url = LINE_URL.find(line)?.as_str();
    if !ctx.matcher.is_search_url(url) {
        return None;
    }
    let query = ctx.matcher.extract_query(url)?;

    let title = line
        .split_once(',')
        .map(|(before, _)| before)
        .filter(|before| !before.is_empty())
        .map(str::to_string);

    Some(SearchEvent {
        query,
        source_url: url.to_string(),
        timestamp: ctx.now,
        title,
    })
}

/// Read a numeric JSON value as i64, accepting integers, floats, and
/// numeric strings (Takeout serializes `time_usec` both ways).
fn value_as_i64(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(f) = value.as_f64() {
        return Some(f as i64);
    }
    value.as_str()?.trim().parse::<i64>().ok()
}
