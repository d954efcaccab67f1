//! Recognition of search-engine query URLs and query extraction.
//!
//! A [`SearchUrlMatcher`] decides whether a URL is a recognized
//! search-results URL and, if so, pulls out the decoded query string.
//! Both operations are pure and never fail: a malformed URL is simply
//! "not a query URL".

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// The query parameter carrying the search terms.
pub const QUERY_PARAM: &str = "q";

/// Host+path patterns that identify a search-results URL, covering the
/// bare domain, country-code TLD variants, and the `www.` prefix.
static DEFAULT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"google\.com/search").expect("pattern compiles"),
        Regex::new(r"google\.[a-z.]+/search").expect("pattern compiles"),
        Regex::new(r"www\.google\.[a-z.]+/search").expect("pattern compiles"),
    ]
});

/// Matcher for recognized search-engine query URLs.
#[derive(Debug, Clone)]
pub struct SearchUrlMatcher {
    patterns: Vec<Regex>,
}

impl SearchUrlMatcher {
    /// Create a matcher with the default search-engine pattern set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.clone(),
        }
    }

    /// Create a matcher with a custom pattern set.
    #[must_use]
    pub fn with_patterns(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Check whether a URL matches one of the recognized search-results
    /// patterns.
    #[must_use]
    pub fn is_search_url(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(url))
    }

    /// Extract the decoded query string from a search URL.
    ///
    /// Returns `None` when the URL is malformed, when the query parameter
    /// is absent, or when it is present but empty. An empty parameter is
    /// treated as "no usable query" so that extracted queries are always
    /// non-empty.
    #[must_use]
    pub fn extract_query(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let query = parsed
            .query_pairs()
            .find(|(key, _)| key == QUERY_PARAM)
            .map(|(_, value)| value.into_owned())?;

        if query.is_empty() {
            None
        } else {
            Some(query)
        }
    }
}

impl Default for SearchUrlMatcher {
    fn default() -> Self {
        Self::new()
    }
}
