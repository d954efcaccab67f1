//! search-wrapped: year-in-review analytics for exported search history.
//!
//! This crate ingests a user's exported browsing/search history (a
//! browser-history export or a ChatGPT data export) and produces a
//! normalized statistical summary: totals, top queries and keywords,
//! categorized topics, temporal distributions, and a derived
//! personality type.
//!
//! # Quick Start
//!
//! ```rust
//! use search_wrapped::analytics::Aggregator;
//! use search_wrapped::categorize::CategoryTable;
//! use search_wrapped::parser::HistoryParser;
//!
//! fn main() -> search_wrapped::Result<()> {
//!     let raw = r#"[{"url":"https://www.google.com/search?q=rust","lastVisitTime":1700000000000}]"#;
//!
//!     let mut parser = HistoryParser::new();
//!     let events = parser.parse(raw);
//!
//!     let aggregator = Aggregator::new(CategoryTable::default_taxonomy());
//!     let summary = aggregator.aggregate(events)?;
//!
//!     println!("{} searches, top: {:?}", summary.total_searches, summary.top_searches);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`search_url`]: Recognizing search-engine query URLs and extracting queries
//! - [`categorize`]: Keyword-based topical categorization
//! - [`parser`]: Tiered parsing of heterogeneous history export formats
//! - [`analytics`]: Statistical aggregation into the summary
//! - [`prompts`]: ChatGPT conversations-export analytics
//! - [`model`]: Core data structures
//! - [`cli`]: Command-line interface
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//!
//! The parse-then-aggregate pipeline is synchronous, single-pass, and
//! pure: parsing degrades tier by tier instead of failing, and the only
//! raised error is aggregation over an empty event list.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analytics;
pub mod categorize;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompts;
pub mod search_url;
pub mod util;

// Re-export commonly used types at the crate root
pub use error::{Result, WrappedError};
pub use model::{AnalyticsSummary, SearchEvent};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {

    pub use crate::analytics::Aggregator;
    pub use crate::categorize::CategoryTable;
    pub use crate::error::{Result, WrappedError};
    pub use crate::model::{AnalyticsSummary, SearchEvent};
    pub use crate::parser::HistoryParser;
    pub use crate::prompts::{parse_conversations, PromptAnalyzer, PromptReport};
}
