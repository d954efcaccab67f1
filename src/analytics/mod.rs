//! Statistical aggregation over extracted search events.
//!
//! The [`Aggregator`] turns an event list into the complete
//! [`AnalyticsSummary`]: frequency rankings, category percentages,
//! zero-filled hour and weekday histograms, and the covered date range.
//! It is pure over its input; the only failure is an empty event list.
//!
//! # Example
//!
//! ```rust
//! use search_wrapped::analytics::Aggregator;
//! use search_wrapped::categorize::CategoryTable;
//! # use search_wrapped::model::SearchEvent;
//! # use chrono::{TimeZone, Utc};
//!
//! let aggregator = Aggregator::new(CategoryTable::default_taxonomy());
//! # let events = vec![SearchEvent {
//! #     query: "rust".into(),
//! #     source_url: "https://google.com/search?q=rust".into(),
//! #     timestamp: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap(),
//! #     title: None,
//! # }];
//! let summary = aggregator.aggregate(events)?;
//! assert_eq!(summary.total_searches, 1);
//! # Ok::<(), search_wrapped::WrappedError>(())
//! ```

use chrono::{Datelike, FixedOffset, Offset, Timelike, Utc};
use indexmap::IndexMap;
use tracing::instrument;

use crate::categorize::CategoryTable;
use crate::error::{Result, WrappedError};
use crate::model::{
    AnalyticsSummary, CategoryCount, DateRange, DayCount, HourCount, QueryCount, SearchEvent,
    DAY_NAMES,
};

/// Default number of ranked queries carried in the summary.
pub const DEFAULT_TOP_N: usize = 20;

/// Aggregator for search events.
#[derive(Debug, Clone)]
pub struct Aggregator {
    table: CategoryTable,
    top_n: usize,
    offset: FixedOffset,
}

impl Aggregator {
    /// Create an aggregator with the given category table, the default
    /// top-N, and UTC hour/day bucketing.
    #[must_use]
    pub fn new(table: CategoryTable) -> Self {
        Self {
            table,
            top_n: DEFAULT_TOP_N,
            offset: Utc.fix(),
        }
    }

    /// Set how many ranked queries the summary carries.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the UTC offset used to bucket timestamps into local hours and
    /// weekdays. The CLI passes the host's local offset; tests pass a
    /// fixed one.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Compute the full statistical summary.
    ///
    /// # Errors
    ///
    /// Returns [`WrappedError::NoSearchesFound`] when `events` is empty.
    /// This is the subsystem's one validation failure; no partial or
    /// zeroed summary is ever returned.
    #[instrument(skip_all, fields(events = events.len()))]
    pub fn aggregate(&self, events: Vec<SearchEvent>) -> Result<AnalyticsSummary> {
        if events.is_empty() {
            return Err(WrappedError::NoSearchesFound);
        }
        let total = events.len();

        // Exact, case-sensitive query frequencies. Insertion order is kept
        // only for determinism of iteration; ranking order is explicit.
        let mut query_counts: IndexMap<String, usize> = IndexMap::new();
        for event in &events {
            *query_counts.entry(event.query.clone()).or_insert(0) += 1;
        }
        let unique_queries = query_counts.len();

        let mut top_searches: Vec<QueryCount> = query_counts
            .iter()
            .map(|(query, count)| QueryCount {
                query: query.clone(),
                count: *count,
            })
            .collect();
        // Equal counts rank lexicographically so the ordering is stable
        // across runs and inputs.
        top_searches.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.query.cmp(&b.query)));
        top_searches.truncate(self.top_n);

        let mut category_counts: IndexMap<String, usize> = IndexMap::new();
        for event in &events {
            let label = self.table.categorize(&event.query);
            *category_counts.entry(label.to_string()).or_insert(0) += 1;
        }
        let mut categories: Vec<CategoryCount> = category_counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category,
                count,
                percentage: (count as f64 / total as f64) * 100.0,
            })
            .collect();
        categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));

        let mut hours = [0usize; 24];
        let mut days = [0usize; 7];
        let mut start = events[0].timestamp;
        let mut end = events[0].timestamp;
        for event in &events {
            let local = event.timestamp.with_timezone(&self.offset);
            hours[local.hour() as usize] += 1;
            days[local.weekday().num_days_from_sunday() as usize] += 1;

            if event.timestamp < start {
                start = event.timestamp;
            }
            if event.timestamp > end {
                end = event.timestamp;
            }
        }

        let time_distribution: Vec<HourCount> = (0..24)
            .map(|hour| HourCount {
                hour,
                count: hours[hour as usize],
            })
            .collect();
        let day_distribution: Vec<DayCount> = DAY_NAMES
            .iter()
            .zip(days)
            .map(|(day, count)| DayCount {
                day: (*day).to_string(),
                count,
            })
            .collect();

        Ok(AnalyticsSummary {
            total_searches: total,
            unique_queries,
            date_range: DateRange { start, end },
            top_searches,
            categories,
            time_distribution,
            day_distribution,
            searches: events,
        })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(CategoryTable::default_taxonomy())
    }
}
