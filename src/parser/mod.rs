//! Tiered parsing of exported history files into search events.
//!
//! Export formats are heterogeneous: a Chrome Takeout JSON object, a
//! generic JSON array from other tools, or loosely structured text/CSV.
//! Parsing runs an explicit ordered chain of shape-specific tiers; each
//! tier either claims the input or passes, and total failure yields an
//! empty event list rather than an error. The aggregator is responsible
//! for rejecting an empty result.
//!
//! # Example
//!
//! ```rust
//! use search_wrapped::parser::HistoryParser;
//!
//! let raw = r#"[{"url":"https://www.google.com/search?q=rust","lastVisitTime":1700000000000}]"#;
//! let mut parser = HistoryParser::new();
//! let events = parser.parse(raw);
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].query, "rust");
//! ```

mod tiers;

pub use tiers::{JsonArrayTier, ParseTier, PlainTextTier, TakeoutTier, TierContext, TierInput};

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::SearchEvent;
use crate::search_url::SearchUrlMatcher;
use crate::util::read_file_capped;

/// Default maximum input file size in bytes (500 MB).
///
/// Matches the upload cap of the original export flow. Use
/// [`HistoryParser::with_max_file_size`] with `0` for unlimited.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Time source used for the missing-timestamp fallback.
///
/// Injected rather than read from the global wall clock so the fallback
/// is deterministic under test.
pub trait Clock: fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Statistics about the most recent parse.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// History entries (or text lines) examined.
    pub entries_scanned: usize,
    /// Search events successfully extracted.
    pub events_extracted: usize,
    /// Entries skipped (no URL, not a search URL, or no usable query).
    pub entries_skipped: usize,
    /// Name of the tier that claimed the input, if any.
    pub tier: Option<&'static str>,
}

impl ParseStats {
    /// Share of scanned entries that produced an event, as a percentage.
    #[must_use]
    pub fn extraction_rate(&self) -> f64 {
        if self.entries_scanned == 0 {
            return 0.0;
        }
        (self.events_extracted as f64 / self.entries_scanned as f64) * 100.0
    }
}

/// Parser for exported history files.
#[derive(Debug)]
pub struct HistoryParser {
    matcher: SearchUrlMatcher,
    clock: Box<dyn Clock>,
    tiers: Vec<Box<dyn ParseTier>>,
    max_file_size: u64,
    stats: ParseStats,
}

impl HistoryParser {
    /// Create a parser with the default matcher, system clock, and tier
    /// chain.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Create a parser with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            matcher: SearchUrlMatcher::new(),
            clock,
            tiers: default_tiers(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            stats: ParseStats::default(),
        }
    }

    /// Replace the search-URL matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: SearchUrlMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Set the maximum input file size in bytes (0 = unlimited).
    #[must_use]
    pub fn with_max_file_size(mut self, max_bytes: u64) -> Self {
        self.max_file_size = max_bytes;
        self
    }

    /// Statistics from the most recent parse.
    #[must_use]
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Parse a history file from a path.
    ///
    /// File-level problems (missing file, permissions, size cap) are
    /// errors; content-level problems are not, see [`Self::parse`].
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<SearchEvent>> {
        let raw = read_file_capped(path.as_ref(), self.max_file_size)?;
        Ok(self.parse(&raw))
    }

    /// Parse raw history content into search events.
    ///
    /// Runs the tier chain in order and returns the first tier's events.
    /// Never fails: unrecognized or malformed content degrades tier by
    /// tier down to an empty list.
    #[instrument(skip_all, fields(bytes = raw.len()))]
    pub fn parse(&mut self, raw: &str) -> Vec<SearchEvent> {
        self.stats = ParseStats::default();

        let json: Option<Value> = serde_json::from_str(raw).ok();
        let input = TierInput {
            raw,
            json: json.as_ref(),
        };
        let now = self.clock.now();

        let Self {
            matcher,
            tiers,
            stats,
            ..
        } = self;
        let mut ctx = TierContext {
            matcher: &*matcher,
            now,
            stats,
        };

        for tier in tiers.iter() {
            if let Some(events) = tier.parse(&input, &mut ctx) {
                ctx.stats.tier = Some(tier.name());
                ctx.stats.events_extracted = events.len();
                debug!(
                    tier = tier.name(),
                    scanned = ctx.stats.entries_scanned,
                    extracted = events.len(),
                    "Parse complete"
                );
                return events;
            }
        }

        debug!("No tier claimed the input");
        Vec::new()
    }
}

impl Default for HistoryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard tier chain, in priority order.
fn default_tiers() -> Vec<Box<dyn ParseTier>> {
    vec![
        Box::new(TakeoutTier),
        Box::new(JsonArrayTier),
        Box::new(PlainTextTier),
    ]
}
