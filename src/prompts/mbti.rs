//! Keyword-based personality type inference.
//!
//! Scores each MBTI axis by comparing keyword frequencies against two
//! small opposing word sets. A simple heuristic, not psychometrics; the
//! output feeds the year-in-review presentation.

use indexmap::IndexMap;

/// Type returned when no keywords are available to score.
pub const DEFAULT_TYPE: &str = "INTP";

// E vs I: social/people words vs technical/analysis words.
const E_WORDS: [&str; 7] = [
    "people",
    "social",
    "team",
    "communicate",
    "party",
    "friends",
    "share",
];
const I_WORDS: [&str; 7] = [
    "analyze",
    "think",
    "code",
    "algorithm",
    "study",
    "research",
    "alone",
];

// N vs S: abstract/future vs concrete/present.
const N_WORDS: [&str; 7] = [
    "future",
    "innovation",
    "theory",
    "concept",
    "imagine",
    "possibility",
    "idea",
];
const S_WORDS: [&str; 7] = [
    "practical",
    "detail",
    "fact",
    "current",
    "real",
    "specific",
    "actual",
];

// T vs F: logic/analysis vs emotion/values.
const T_WORDS: [&str; 7] = [
    "logic",
    "analyze",
    "reason",
    "objective",
    "efficient",
    "system",
    "solve",
];
const F_WORDS: [&str; 7] = [
    "feel", "value", "empathy", "harmony", "personal", "care", "emotion",
];

// J vs P: structured/planned vs flexible/spontaneous.
const J_WORDS: [&str; 7] = [
    "plan",
    "schedule",
    "organize",
    "structure",
    "deadline",
    "complete",
    "finish",
];
const P_WORDS: [&str; 7] = [
    "explore",
    "flexible",
    "spontaneous",
    "adapt",
    "open",
    "option",
    "discover",
];

/// Infer an MBTI-style type from keyword frequencies.
///
/// Each axis resolves to the letter whose word set scores strictly
/// higher; ties fall to the I/S/F/P side. An input with no keywords at
/// all short-circuits to [`DEFAULT_TYPE`].
#[must_use]
pub fn infer_mbti(keyword_counts: &IndexMap<String, usize>) -> String {
    let total: usize = keyword_counts.values().sum();
    if total == 0 {
        return DEFAULT_TYPE.to_string();
    }

    let score = |words: &[&str]| -> usize {
        words
            .iter()
            .map(|word| keyword_counts.get(*word).copied().unwrap_or(0))
            .sum()
    };

    let ei = if score(&E_WORDS) > score(&I_WORDS) { 'E' } else { 'I' };
    let ns = if score(&N_WORDS) > score(&S_WORDS) { 'N' } else { 'S' };
    let tf = if score(&T_WORDS) > score(&F_WORDS) { 'T' } else { 'F' };
    let jp = if score(&J_WORDS) > score(&P_WORDS) { 'J' } else { 'P' };

    format!("{ei}{ns}{tf}{jp}")
}
