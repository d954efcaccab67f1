//! Integration tests for search-wrapped.
//!
//! These tests exercise the full parse-then-aggregate pipeline over
//! fixture files covering every supported export shape, plus the
//! conversations-export path.

use std::path::PathBuf;

use chrono::{TimeZone, Utc};

use search_wrapped::analytics::Aggregator;
use search_wrapped::categorize::CategoryTable;
use search_wrapped::error::WrappedError;
use search_wrapped::model::SearchEvent;
use search_wrapped::parser::{FixedClock, HistoryParser};
use search_wrapped::prompts::{parse_conversations, PromptAnalyzer};

/// Get the path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Read a fixture file's content.
fn read_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// A parser whose missing-timestamp fallback is pinned to a fixed instant.
fn pinned_parser(secs: i64) -> HistoryParser {
    let now = Utc.timestamp_opt(secs, 0).single().expect("valid timestamp");
    HistoryParser::with_clock(Box::new(FixedClock(now)))
}

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_takeout_fixture() {
        let mut parser = pinned_parser(0);
        let events = parser.parse(&read_fixture("takeout_history.json"));

        assert_eq!(events.len(), 4);
        assert_eq!(parser.stats().tier, Some("takeout"));
        assert_eq!(parser.stats().entries_scanned, 5);
        assert_eq!(parser.stats().entries_skipped, 1);

        // URL-encoded queries come out decoded.
        assert_eq!(events[0].query, "rust lifetimes");
        assert_eq!(events[2].query, "best pizza recipe");

        // time_usec microseconds land as the right instant.
        assert_eq!(events[0].timestamp.timestamp(), 1_709_453_700);
        // A string-typed time_usec decodes the same as a numeric one.
        assert_eq!(events[3].timestamp.timestamp(), 1_709_586_500);

        assert_eq!(
            events[0].title.as_deref(),
            Some("rust lifetimes - Google Search")
        );
    }

    #[test]
    fn test_extension_fixture() {
        let mut parser = pinned_parser(0);
        let events = parser.parse(&read_fixture("extension_history.json"));

        assert_eq!(events.len(), 3);
        assert_eq!(parser.stats().tier, Some("json-array"));
        // The non-search github entry and the empty-query entry are skipped.
        assert_eq!(parser.stats().entries_skipped, 2);

        assert_eq!(events[0].query, "chrono timezone");
        assert_eq!(events[0].timestamp.timestamp(), 1_709_453_700);
        assert_eq!(events[1].query, "flight berlin");
        assert_eq!(events[2].query, "netflix series");
    }

    #[test]
    fn test_csv_fixture_falls_back_to_clock() {
        let mut parser = pinned_parser(1_709_999_999);
        let events = parser.parse(&read_fixture("history.csv"));

        assert_eq!(events.len(), 3);
        assert_eq!(parser.stats().tier, Some("text"));

        // No temporal information is recoverable from plain text.
        for event in &events {
            assert_eq!(event.timestamp.timestamp(), 1_709_999_999);
        }

        assert_eq!(events[0].query, "rust lifetimes");
        assert_eq!(
            events[0].title.as_deref(),
            Some("rust lifetimes - Google Search")
        );
        // The last line is a bare URL with no preceding comma field.
        assert_eq!(events[2].query, "weather forecast");
        assert_eq!(events[2].title, None);
    }

    #[test]
    fn test_no_search_urls_yields_empty() {
        let mut parser = pinned_parser(0);
        let events = parser.parse(&read_fixture("no_searches.json"));
        assert!(events.is_empty());
    }

    #[test]
    fn test_garbage_input_yields_empty_not_panic() {
        let mut parser = pinned_parser(0);
        assert!(parser.parse("%PDF-1.4 binary garbage \u{0}\u{1}").is_empty());
        assert!(parser.parse("{\"truncated\": [").is_empty());
    }
}

mod extraction {
    use rstest::rstest;
    use search_wrapped::search_url::SearchUrlMatcher;

    #[rstest]
    #[case("https://www.google.com/search?q=hello%20world", Some("hello world"))]
    #[case("https://google.com/search?q=rust+lifetimes", Some("rust lifetimes"))]
    #[case("https://www.google.co.uk/search?q=tea", Some("tea"))]
    #[case("https://www.google.com/search?q=", None)]
    #[case("https://www.google.com/search", None)]
    #[case("not a url", None)]
    fn test_query_extraction(#[case] url: &str, #[case] expected: Option<&str>) {
        let matcher = SearchUrlMatcher::new();
        assert_eq!(matcher.extract_query(url).as_deref(), expected);
    }
}

mod pipeline {
    use super::*;
    use pretty_assertions::assert_eq;

    fn aggregator() -> Aggregator {
        Aggregator::new(CategoryTable::default_taxonomy())
    }

    #[test]
    fn test_structured_export_counts() {
        // Two searches for cats, one for dogs, all in the same hour.
        let raw = r#"{
            "Browser_History": [
                {"url": "https://www.google.com/search?q=cats", "time_usec": 1709453700000000},
                {"url": "https://www.google.com/search?q=cats", "time_usec": 1709453760000000},
                {"url": "https://www.google.com/search?q=dogs", "time_usec": 1709453820000000}
            ]
        }"#;

        let events = pinned_parser(0).parse(raw);
        let summary = aggregator().aggregate(events).unwrap();

        assert_eq!(summary.total_searches, 3);
        assert_eq!(summary.unique_queries, 2);
        assert_eq!(summary.top_searches.len(), 2);
        assert_eq!(summary.top_searches[0].query, "cats");
        assert_eq!(summary.top_searches[0].count, 2);
        assert_eq!(summary.top_searches[1].query, "dogs");
        assert_eq!(summary.top_searches[1].count, 1);
    }

    #[test]
    fn test_non_search_input_is_rejected_at_aggregation() {
        let raw = r#"[{"url": "https://example.com/not-a-search", "timestamp": 1709453700000}]"#;

        let events = pinned_parser(0).parse(raw);
        assert!(events.is_empty());

        let err = aggregator().aggregate(events).unwrap_err();
        assert!(matches!(err, WrappedError::NoSearchesFound));
        assert_eq!(
            err.to_string(),
            "No Google searches found in the history file"
        );
    }

    #[test]
    fn test_recipe_query_categorized_as_food() {
        let raw = r#"[{"url": "https://www.google.com/search?q=best%20pizza%20recipe", "timestamp": 1709453700000}]"#;

        let events = pinned_parser(0).parse(raw);
        let summary = aggregator().aggregate(events).unwrap();

        assert_eq!(summary.categories[0].category, "Food & Cooking");
        assert_eq!(summary.categories[0].count, 1);
    }

    #[test]
    fn test_url_decoding_end_to_end() {
        let raw = r#"[{"url": "https://google.com/search?q=hello%20world", "timestamp": 1709453700000}]"#;

        let events = pinned_parser(0).parse(raw);
        assert_eq!(events[0].query, "hello world");
    }

    #[test]
    fn test_hour_histogram_buckets() {
        // Hours 3, 3, and 15 UTC.
        let raw = r#"[
            {"url": "https://google.com/search?q=a", "timestamp": 1709434800000},
            {"url": "https://google.com/search?q=b", "timestamp": 1709435100000},
            {"url": "https://google.com/search?q=c", "timestamp": 1709478000000}
        ]"#;

        let events = pinned_parser(0).parse(raw);
        let summary = aggregator().aggregate(events).unwrap();

        assert_eq!(summary.time_distribution[3].count, 2);
        assert_eq!(summary.time_distribution[15].count, 1);
        let rest: usize = summary
            .time_distribution
            .iter()
            .filter(|h| h.hour != 3 && h.hour != 15)
            .map(|h| h.count)
            .sum();
        assert_eq!(rest, 0);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let raw = read_fixture("takeout_history.json");

        let events_a = pinned_parser(7).parse(&raw);
        let events_b = pinned_parser(7).parse(&raw);
        let summary_a = aggregator().aggregate(events_a).unwrap();
        let summary_b = aggregator().aggregate(events_b).unwrap();

        assert_eq!(summary_a, summary_b);
    }

    #[test]
    fn test_summary_invariants_hold() {
        let events = pinned_parser(0).parse(&read_fixture("takeout_history.json"));
        let total = events.len();
        let summary = aggregator().aggregate(events).unwrap();

        // Zero-fill: exactly 24 hour buckets and 7 day buckets, in order.
        assert_eq!(summary.time_distribution.len(), 24);
        for (hour, bucket) in summary.time_distribution.iter().enumerate() {
            assert_eq!(bucket.hour as usize, hour);
        }
        assert_eq!(summary.day_distribution.len(), 7);

        // Count conservation across every breakdown.
        let by_category: usize = summary.categories.iter().map(|c| c.count).sum();
        let by_hour: usize = summary.time_distribution.iter().map(|h| h.count).sum();
        let by_day: usize = summary.day_distribution.iter().map(|d| d.count).sum();
        assert_eq!(by_category, total);
        assert_eq!(by_hour, total);
        assert_eq!(by_day, total);

        // Percentages sum to 100 within floating-point tolerance.
        let percentage_sum: f64 = summary.categories.iter().map(|c| c.percentage).sum();
        assert!((percentage_sum - 100.0).abs() < 1e-9);

        // The full event list is carried for downstream re-sorting.
        assert_eq!(summary.searches.len(), total);
    }

    #[test]
    fn test_takeout_fixture_weekday_buckets() {
        // Fixture events land on Sunday (2) and Monday (2).
        let events = pinned_parser(0).parse(&read_fixture("takeout_history.json"));
        let summary = aggregator().aggregate(events).unwrap();

        assert_eq!(summary.day_distribution[0].day, "Sunday");
        assert_eq!(summary.day_distribution[0].count, 2);
        assert_eq!(summary.day_distribution[1].day, "Monday");
        assert_eq!(summary.day_distribution[1].count, 2);
    }

    #[test]
    fn test_events_survive_into_summary() {
        let events = pinned_parser(0).parse(&read_fixture("extension_history.json"));
        let expected: Vec<SearchEvent> = events.clone();

        let summary = aggregator().aggregate(events).unwrap();
        assert_eq!(summary.searches, expected);
    }
}

mod prompts {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_conversations_fixture_extraction() {
        let prompts = parse_conversations(&read_fixture("conversations.json")).unwrap();

        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[0].text, "explain rust lifetimes with an example");
        assert_eq!(prompts[0].timestamp.timestamp(), 1_709_453_700);
        assert_eq!(prompts[2].text, "suggest an easy pasta recipe for dinner");
    }

    #[test]
    fn test_conversations_fixture_report() {
        let prompts = parse_conversations(&read_fixture("conversations.json")).unwrap();
        let report = PromptAnalyzer::new(CategoryTable::default_taxonomy())
            .analyze(&prompts)
            .unwrap();

        assert_eq!(report.target_year, 2024);
        assert_eq!(report.total_prompts, 3);

        // March is the only active month.
        assert_eq!(report.months.len(), 12);
        assert_eq!(report.months[2].count, 3);
        let other_months: usize = report
            .months
            .iter()
            .filter(|m| m.month != 3)
            .map(|m| m.count)
            .sum();
        assert_eq!(other_months, 0);

        // Two prompts at 08:xx, one at 21:xx.
        assert_eq!(report.hours[8].count, 2);
        assert_eq!(report.hours[21].count, 1);
        assert_eq!(report.chronotype, "Early Bird");

        // Heatmap totals match the prompt count.
        let grid: usize = report
            .heatmap
            .iter()
            .map(|row| row.counts.iter().sum::<usize>())
            .sum();
        assert_eq!(grid, 3);
    }

    #[test]
    fn test_empty_export_is_rejected() {
        let prompts = parse_conversations("[]").unwrap();
        assert!(prompts.is_empty());

        let err = PromptAnalyzer::new(CategoryTable::default_taxonomy())
            .analyze(&prompts)
            .unwrap_err();
        assert!(matches!(err, WrappedError::NoPromptsFound));
    }
}
