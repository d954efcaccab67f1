//! Analytics for ChatGPT conversation exports.
//!
//! Parses a `conversations.json` from a ChatGPT data export, extracts
//! the user's prompts, and computes the year-in-review report: totals,
//! top prompts, keyword rankings, monthly/hourly distributions, a
//! weekday-by-hour heatmap, an early-bird/night-owl classification, the
//! dominant topic, and an MBTI-style personality type.
//!
//! Unlike browser-history parsing, this format is exact: invalid JSON is
//! an error rather than a fallthrough, since there is no alternate shape
//! to degrade to.

mod mbti;
pub mod text;

pub use mbti::{infer_mbti, DEFAULT_TYPE};

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::categorize::CategoryTable;
use crate::error::{Result, WrappedError};
use crate::model::{HourCount, DAY_NAMES};

/// Default number of ranked prompts carried in the report.
pub const DEFAULT_TOP_PROMPTS: usize = 5;

/// Default number of ranked keywords carried in the report.
pub const DEFAULT_TOP_KEYWORDS: usize = 8;

/// One user prompt extracted from a conversations export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEvent {
    /// The raw prompt text.
    pub text: String,
    /// When the prompt was sent.
    pub timestamp: DateTime<Utc>,
}

/// A keyword with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    /// The normalized keyword.
    pub keyword: String,
    /// Number of occurrences across all prompts.
    pub count: usize,
}

/// Prompt count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    /// Month number, 1-12.
    pub month: u32,
    /// Number of prompts in this month.
    pub count: usize,
}

/// One weekday row of the day-by-hour heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapRow {
    /// Weekday name, Sunday-first ordering.
    pub day: String,
    /// 24 hourly counts for this weekday.
    pub counts: Vec<usize>,
}

/// The year-in-review report for a conversations export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptReport {
    /// Prompts sent during the target year.
    pub total_prompts: usize,
    /// The year the report covers.
    pub target_year: i32,
    /// Dominant topic label.
    pub top_topic: String,
    /// Share of prompts under the dominant topic, rounded to whole percent.
    pub top_topic_percentage: u32,
    /// Most frequent prompts, ranked.
    pub top_prompts: Vec<String>,
    /// Most frequent keywords, ranked.
    pub top_keywords: Vec<KeywordCount>,
    /// Number of distinct keywords.
    pub unique_keywords: usize,
    /// 12-slot month distribution, zero-filled.
    pub months: Vec<MonthCount>,
    /// 24-slot hour distribution, zero-filled.
    pub hours: Vec<HourCount>,
    /// Weekday-by-hour heatmap, Sunday-first, zero-filled.
    pub heatmap: Vec<HeatmapRow>,
    /// "Early Bird" or "Night Owl".
    pub chronotype: String,
    /// MBTI-style personality type.
    pub mbti: String,
}

/// Parse a `conversations.json` export into prompt events.
///
/// Supports both observed export shapes: an array of conversation
/// objects each holding a `mapping` node table, and an array of plain
/// message arrays. Prompts without usable text or a timestamp are
/// skipped.
///
/// # Errors
///
/// Returns a parse error when the content is not a JSON array.
#[instrument(skip_all, fields(bytes = raw.len()))]
pub fn parse_conversations(raw: &str) -> Result<Vec<PromptEvent>> {
    let data: Value = serde_json::from_str(raw)
        .map_err(|e| WrappedError::parse_with_source("conversations export", e))?;
    let conversations = data.as_array().ok_or_else(|| {
        WrappedError::parse("conversations export", "expected a top-level JSON array")
    })?;

    let mut prompts = Vec::new();
    for conversation in conversations {
        match conversation {
            Value::Array(messages) => collect_flat_messages(messages, &mut prompts),
            Value::Object(_) => collect_mapping_messages(conversation, &mut prompts),
            _ => {}
        }
    }
    Ok(prompts)
}

/// Messages given directly as an array of role/content objects.
fn collect_flat_messages(messages: &[Value], out: &mut Vec<PromptEvent>) {
    for item in messages {
        let Some(message) = item.as_object() else {
            continue;
        };
        if message.get("role").and_then(Value::as_str) != Some("user") {
            continue;
        }
        let text = message
            .get("content")
            .and_then(Value::as_str)
            .or_else(|| message.get("text").and_then(Value::as_str));
        let Some(text) = text else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        let secs = message
            .get("create_time")
            .and_then(Value::as_f64)
            .or_else(|| message.get("timestamp").and_then(Value::as_f64));
        let Some(timestamp) = secs.filter(|s| *s > 0.0).and_then(epoch_secs) else {
            continue;
        };
        out.push(PromptEvent {
            text: text.to_string(),
            timestamp,
        });
    }
}

/// The standard export shape: a conversation object with a `mapping`
/// table of message nodes.
fn collect_mapping_messages(conversation: &Value, out: &mut Vec<PromptEvent>) {
    let Some(mapping) = conversation.get("mapping").and_then(Value::as_object) else {
        return;
    };

    for node in mapping.values() {
        let Some(message) = node.get("message").and_then(Value::as_object) else {
            continue;
        };
        let role = message
            .get("author")
            .and_then(|author| author.get("role"))
            .and_then(Value::as_str);
        if role != Some("user") {
            continue;
        }
        let Some(content) = message.get("content").and_then(Value::as_object) else {
            continue;
        };
        let secs = message.get("create_time").and_then(Value::as_f64);
        let Some(timestamp) = secs.filter(|s| *s > 0.0).and_then(epoch_secs) else {
            continue;
        };
        let Some(parts) = content.get("parts").and_then(Value::as_array) else {
            continue;
        };
        for part in parts {
            if let Some(text) = part.as_str() {
                if !text.trim().is_empty() {
                    out.push(PromptEvent {
                        text: text.to_string(),
                        timestamp,
                    });
                }
            }
        }
    }
}

fn epoch_secs(secs: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((secs * 1000.0) as i64)
}

/// Analyzer for extracted prompt events.
#[derive(Debug, Clone)]
pub struct PromptAnalyzer {
    table: CategoryTable,
    offset: FixedOffset,
    year: Option<i32>,
    top_prompts: usize,
    top_keywords: usize,
}

impl PromptAnalyzer {
    /// Create an analyzer with the given topic table, UTC bucketing, and
    /// the most recent year in the data as the target.
    #[must_use]
    pub fn new(table: CategoryTable) -> Self {
        Self {
            table,
            offset: Utc.fix(),
            year: None,
            top_prompts: DEFAULT_TOP_PROMPTS,
            top_keywords: DEFAULT_TOP_KEYWORDS,
        }
    }

    /// Set the UTC offset used for year/month/hour bucketing.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Pin the report to a specific year instead of the most recent one
    /// present in the data.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set how many ranked prompts the report carries.
    #[must_use]
    pub fn with_top_prompts(mut self, n: usize) -> Self {
        self.top_prompts = n;
        self
    }

    /// Set how many ranked keywords the report carries.
    #[must_use]
    pub fn with_top_keywords(mut self, n: usize) -> Self {
        self.top_keywords = n;
        self
    }

    /// Compute the year-in-review report.
    ///
    /// # Errors
    ///
    /// Returns [`WrappedError::NoPromptsFound`] when no prompts exist, or
    /// when none fall in the target year.
    #[instrument(skip_all, fields(prompts = prompts.len()))]
    pub fn analyze(&self, prompts: &[PromptEvent]) -> Result<PromptReport> {
        if prompts.is_empty() {
            return Err(WrappedError::NoPromptsFound);
        }

        let target_year = self.year.unwrap_or_else(|| {
            prompts
                .iter()
                .map(|p| p.timestamp.with_timezone(&self.offset).year())
                .max()
                .unwrap_or(0)
        });
        let yearly: Vec<&PromptEvent> = prompts
            .iter()
            .filter(|p| p.timestamp.with_timezone(&self.offset).year() == target_year)
            .collect();
        if yearly.is_empty() {
            return Err(WrappedError::NoPromptsFound);
        }
        let total = yearly.len();

        let mut keyword_counts: IndexMap<String, usize> = IndexMap::new();
        for prompt in &yearly {
            for token in text::normalize(&prompt.text).split_whitespace() {
                *keyword_counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }
        let unique_keywords = keyword_counts.len();
        let mut top_keywords: Vec<KeywordCount> = keyword_counts
            .iter()
            .map(|(keyword, count)| KeywordCount {
                keyword: keyword.clone(),
                count: *count,
            })
            .collect();
        top_keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
        top_keywords.truncate(self.top_keywords);

        let mut prompt_counts: IndexMap<&str, usize> = IndexMap::new();
        for prompt in &yearly {
            *prompt_counts.entry(prompt.text.as_str()).or_insert(0) += 1;
        }
        let mut ranked_prompts: Vec<(&str, usize)> = prompt_counts.into_iter().collect();
        ranked_prompts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let top_prompts: Vec<String> = ranked_prompts
            .into_iter()
            .take(self.top_prompts)
            .map(|(text, _)| text.to_string())
            .collect();

        let mut months = [0usize; 12];
        let mut hours = [0usize; 24];
        let mut heatmap = [[0usize; 24]; 7];
        for prompt in &yearly {
            let local = prompt.timestamp.with_timezone(&self.offset);
            months[(local.month() - 1) as usize] += 1;
            hours[local.hour() as usize] += 1;
            heatmap[local.weekday().num_days_from_sunday() as usize][local.hour() as usize] += 1;
        }

        let morning: usize = (5..=11).map(|h: usize| hours[h]).sum();
        let night: usize = (21..=23).chain(0..=4).map(|h: usize| hours[h]).sum();
        let chronotype = if morning >= night {
            "Early Bird"
        } else {
            "Night Owl"
        };

        let mut topic_counts: IndexMap<String, usize> = IndexMap::new();
        for prompt in &yearly {
            let label = self.table.categorize(&prompt.text);
            *topic_counts.entry(label.to_string()).or_insert(0) += 1;
        }
        let mut topics: Vec<(String, usize)> = topic_counts.into_iter().collect();
        topics.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let (top_topic, topic_count) = topics.swap_remove(0);
        let top_topic_percentage = ((topic_count as f64 / total as f64) * 100.0).round() as u32;

        let mbti = infer_mbti(&keyword_counts);

        Ok(PromptReport {
            total_prompts: total,
            target_year,
            top_topic,
            top_topic_percentage,
            top_prompts,
            top_keywords,
            unique_keywords,
            months: (1..=12)
                .map(|month| MonthCount {
                    month,
                    count: months[(month - 1) as usize],
                })
                .collect(),
            hours: (0..24)
                .map(|hour| HourCount {
                    hour,
                    count: hours[hour as usize],
                })
                .collect(),
            heatmap: DAY_NAMES
                .iter()
                .zip(heatmap)
                .map(|(day, counts)| HeatmapRow {
                    day: (*day).to_string(),
                    counts: counts.to_vec(),
                })
                .collect(),
            chronotype: chronotype.to_string(),
            mbti,
        })
    }
}

impl Default for PromptAnalyzer {
    fn default() -> Self {
        Self::new(CategoryTable::default_taxonomy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn prompt(text: &str, y: i32, mo: u32, d: u32, h: u32) -> PromptEvent {
        PromptEvent {
            text: text.to_string(),
            timestamp: Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_parse_mapping_shape() {
        let raw = r#"[
            {
                "title": "rust help",
                "mapping": {
                    "node-1": {"message": {"author": {"role": "user"}, "content": {"content_type": "text", "parts": ["how do lifetimes work"]}, "create_time": 1700000000.5}},
                    "node-2": {"message": {"author": {"role": "assistant"}, "content": {"content_type": "text", "parts": ["they work like this"]}, "create_time": 1700000010.0}},
                    "node-3": {"message": null},
                    "node-4": {"message": {"author": {"role": "user"}, "content": {"content_type": "text", "parts": ["", "second question"]}, "create_time": 1700000020.0}}
                }
            }
        ]"#;

        let prompts = parse_conversations(raw).unwrap();

        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].text, "how do lifetimes work");
        assert_eq!(prompts[0].timestamp.timestamp(), 1_700_000_000);
        assert_eq!(prompts[1].text, "second question");
    }

    #[test]
    fn test_parse_flat_array_shape() {
        let raw = r#"[
            [
                {"role": "user", "content": "first prompt", "create_time": 1700000000},
                {"role": "assistant", "content": "an answer", "create_time": 1700000001},
                {"role": "user", "text": "second prompt", "timestamp": 1700000002}
            ]
        ]"#;

        let prompts = parse_conversations(raw).unwrap();

        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].text, "first prompt");
        assert_eq!(prompts[1].text, "second prompt");
    }

    #[test]
    fn test_prompts_without_timestamp_are_skipped() {
        let raw = r#"[[{"role": "user", "content": "no clock"}]]"#;
        let prompts = parse_conversations(raw).unwrap();
        assert!(prompts.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_conversations("not json").is_err());
        assert!(parse_conversations(r#"{"mapping": {}}"#).is_err());
    }

    #[test]
    fn test_analyze_rejects_empty() {
        let analyzer = PromptAnalyzer::default();
        let err = analyzer.analyze(&[]).unwrap_err();
        assert!(matches!(err, WrappedError::NoPromptsFound));
    }

    #[test]
    fn test_target_year_defaults_to_most_recent() {
        let prompts = vec![
            prompt("old question", 2023, 5, 1, 10),
            prompt("new question", 2024, 5, 1, 10),
            prompt("another new one", 2024, 6, 1, 10),
        ];

        let report = PromptAnalyzer::default().analyze(&prompts).unwrap();

        assert_eq!(report.target_year, 2024);
        assert_eq!(report.total_prompts, 2);
    }

    #[test]
    fn test_pinned_year_with_no_data_is_rejected() {
        let prompts = vec![prompt("question", 2024, 5, 1, 10)];
        let err = PromptAnalyzer::default()
            .with_year(2020)
            .analyze(&prompts)
            .unwrap_err();
        assert!(matches!(err, WrappedError::NoPromptsFound));
    }

    #[test]
    fn test_month_and_hour_distributions_are_zero_filled() {
        let prompts = vec![
            prompt("a", 2024, 3, 1, 9),
            prompt("b", 2024, 3, 2, 9),
            prompt("c", 2024, 11, 5, 22),
        ];

        let report = PromptAnalyzer::default().analyze(&prompts).unwrap();

        assert_eq!(report.months.len(), 12);
        assert_eq!(report.months[2].count, 2);
        assert_eq!(report.months[10].count, 1);
        assert_eq!(report.hours.len(), 24);
        assert_eq!(report.hours[9].count, 2);
        assert_eq!(report.hours[22].count, 1);
    }

    #[test]
    fn test_heatmap_dimensions_and_placement() {
        // 2024-03-03 was a Sunday.
        let prompts = vec![prompt("sunday morning", 2024, 3, 3, 8)];
        let report = PromptAnalyzer::default().analyze(&prompts).unwrap();

        assert_eq!(report.heatmap.len(), 7);
        assert_eq!(report.heatmap[0].day, "Sunday");
        assert!(report.heatmap.iter().all(|row| row.counts.len() == 24));
        assert_eq!(report.heatmap[0].counts[8], 1);

        let grid_total: usize = report
            .heatmap
            .iter()
            .map(|row| row.counts.iter().sum::<usize>())
            .sum();
        assert_eq!(grid_total, report.total_prompts);
    }

    #[test]
    fn test_chronotype_classification() {
        let early = vec![
            prompt("a", 2024, 1, 1, 6),
            prompt("b", 2024, 1, 2, 8),
            prompt("c", 2024, 1, 3, 23),
        ];
        let report = PromptAnalyzer::default().analyze(&early).unwrap();
        assert_eq!(report.chronotype, "Early Bird");

        let late = vec![
            prompt("a", 2024, 1, 1, 23),
            prompt("b", 2024, 1, 2, 2),
            prompt("c", 2024, 1, 3, 9),
        ];
        let report = PromptAnalyzer::default().analyze(&late).unwrap();
        assert_eq!(report.chronotype, "Night Owl");
    }

    #[test]
    fn test_keyword_ranking_and_uniqueness() {
        let prompts = vec![
            prompt("rust lifetimes explained", 2024, 1, 1, 10),
            prompt("rust borrow checker", 2024, 1, 2, 10),
            prompt("the rust book", 2024, 1, 3, 10),
        ];

        let report = PromptAnalyzer::default().analyze(&prompts).unwrap();

        assert_eq!(report.top_keywords[0].keyword, "rust");
        assert_eq!(report.top_keywords[0].count, 3);
        // rust, lifetimes, explained, borrow, checker, book
        assert_eq!(report.unique_keywords, 6);
    }

    #[test]
    fn test_top_prompts_ranked_by_repetition() {
        let prompts = vec![
            prompt("same question", 2024, 1, 1, 10),
            prompt("same question", 2024, 1, 2, 10),
            prompt("one-off question", 2024, 1, 3, 10),
        ];

        let report = PromptAnalyzer::default().analyze(&prompts).unwrap();

        assert_eq!(report.top_prompts[0], "same question");
        assert_eq!(report.top_prompts.len(), 2);
    }

    #[test]
    fn test_top_topic_via_categorizer() {
        let prompts = vec![
            prompt("python code review", 2024, 1, 1, 10),
            prompt("javascript api design", 2024, 1, 2, 10),
            prompt("weather forecast", 2024, 1, 3, 10),
        ];

        let report = PromptAnalyzer::default().analyze(&prompts).unwrap();

        assert_eq!(report.top_topic, "Technology");
        assert_eq!(report.top_topic_percentage, 67);
    }

    #[test]
    fn test_report_serializes() {
        let prompts = vec![prompt("hello world program", 2024, 1, 1, 10)];
        let report = PromptAnalyzer::default().analyze(&prompts).unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let back: PromptReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
