//! Data model for search history analytics.
//!
//! Strongly-typed structures for the extracted search events and the
//! derived statistical summary. All types are immutable after
//! construction and serialize to JSON for report output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weekday labels in the fixed Sunday-first order used by the day histogram.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One observed search action extracted from a history entry.
///
/// The `query` is always non-empty after decoding; entries with no
/// extractable query are dropped during parsing, never retained with an
/// empty query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    /// The decoded query text.
    pub query: String,
    /// The original URL the query was extracted from.
    pub source_url: String,
    /// When the search occurred. Falls back to the parse-time clock when
    /// the source record carries no usable time value.
    pub timestamp: DateTime<Utc>,
    /// Page title associated with the history entry, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A distinct query with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCount {
    /// The exact query text.
    pub query: String,
    /// Number of events with this query.
    pub count: usize,
}

/// Aggregate for one topical category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category label from the fixed taxonomy, or "Other".
    pub category: String,
    /// Number of events categorized under this label.
    pub count: usize,
    /// Share of total events, 0-100.
    pub percentage: f64,
}

/// Event count for one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Number of events whose local timestamp falls in this hour.
    pub count: usize,
}

/// Event count for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    /// Weekday name, Sunday-first ordering.
    pub day: String,
    /// Number of events on this weekday.
    pub count: usize,
}

/// Inclusive timestamp range covered by the analyzed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest event timestamp.
    pub start: DateTime<Utc>,
    /// Latest event timestamp.
    pub end: DateTime<Utc>,
}

/// The complete statistical summary produced by the aggregator.
///
/// All sequences are fully materialized: the hour histogram always has 24
/// entries, the day histogram always has 7, and the underlying event list
/// is carried so downstream consumers can re-sort and re-slice it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Total number of search events.
    pub total_searches: usize,
    /// Number of distinct query strings (case-sensitive).
    pub unique_queries: usize,
    /// Min/max timestamp across all events.
    pub date_range: DateRange,
    /// Top queries ranked by descending count.
    pub top_searches: Vec<QueryCount>,
    /// Per-category tallies, sorted descending by count.
    pub categories: Vec<CategoryCount>,
    /// 24-slot hour-of-day histogram, zero-filled.
    pub time_distribution: Vec<HourCount>,
    /// 7-slot weekday histogram, Sunday-first, zero-filled.
    pub day_distribution: Vec<DayCount>,
    /// The full underlying event list.
    pub searches: Vec<SearchEvent>,
}

impl AnalyticsSummary {
    /// The hour of day with the most events.
    #[must_use]
    pub fn busiest_hour(&self) -> Option<&HourCount> {
        self.time_distribution.iter().max_by_key(|h| h.count)
    }

    /// The weekday with the most events.
    #[must_use]
    pub fn busiest_day(&self) -> Option<&DayCount> {
        self.day_distribution.iter().max_by_key(|d| d.count)
    }

    /// The dominant category, if any events were categorized.
    #[must_use]
    pub fn top_category(&self) -> Option<&CategoryCount> {
        self.categories.first()
    }
}
