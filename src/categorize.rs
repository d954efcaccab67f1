//! Keyword-based query categorization.
//!
//! A [`CategoryTable`] is an explicit ordered list of (label, keywords)
//! rules. A query resolves to the first rule, in declaration order, with
//! any keyword appearing as a substring of the lowercased query. The
//! declaration order is a tie-break policy: a query matching keywords
//! from two categories always resolves to whichever is declared first.

/// Sentinel category for queries matching no rule.
pub const OTHER_CATEGORY: &str = "Other";

/// One categorization rule: a label and the keyword substrings that map
/// a query to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// The category label.
    pub label: String,
    /// Lowercase keyword substrings, any of which selects this category.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Create a rule from string-like parts.
    #[must_use]
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// Ordered categorization table.
///
/// Passed to consumers at construction time rather than living in global
/// state, so alternate taxonomies can be substituted in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// Create a table from an ordered rule list.
    #[must_use]
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The default ten-category taxonomy.
    #[must_use]
    pub fn default_taxonomy() -> Self {
        Self::new(vec![
            CategoryRule::new(
                "Technology",
                &[
                    "software",
                    "programming",
                    "code",
                    "tech",
                    "computer",
                    "app",
                    "javascript",
                    "python",
                    "react",
                    "api",
                    "github",
                    "development",
                    "developer",
                    "html",
                    "css",
                    "database",
                    "server",
                    "cloud",
                    "ai",
                    "machine learning",
                    "algorithm",
                ],
            ),
            CategoryRule::new(
                "News & Current Events",
                &[
                    "news",
                    "breaking",
                    "today",
                    "current",
                    "latest",
                    "politics",
                    "election",
                    "government",
                    "world",
                    "country",
                ],
            ),
            CategoryRule::new(
                "Shopping",
                &[
                    "buy", "purchase", "price", "shop", "store", "sale", "deal", "amazon",
                    "order", "product",
                ],
            ),
            CategoryRule::new(
                "Entertainment",
                &[
                    "movie",
                    "music",
                    "game",
                    "video",
                    "netflix",
                    "youtube",
                    "watch",
                    "play",
                    "song",
                    "album",
                    "streaming",
                    "tv show",
                    "series",
                ],
            ),
            CategoryRule::new(
                "Health & Fitness",
                &[
                    "health",
                    "medical",
                    "doctor",
                    "symptom",
                    "fitness",
                    "exercise",
                    "workout",
                    "nutrition",
                    "diet",
                    "wellness",
                ],
            ),
            CategoryRule::new(
                "Education",
                &[
                    "learn",
                    "tutorial",
                    "course",
                    "how to",
                    "guide",
                    "education",
                    "study",
                    "university",
                    "college",
                    "school",
                ],
            ),
            CategoryRule::new(
                "Travel",
                &[
                    "travel",
                    "flight",
                    "hotel",
                    "vacation",
                    "trip",
                    "destination",
                    "booking",
                    "tourism",
                ],
            ),
            CategoryRule::new(
                "Food & Cooking",
                &[
                    "recipe",
                    "food",
                    "restaurant",
                    "cooking",
                    "meal",
                    "cuisine",
                    "dish",
                ],
            ),
            CategoryRule::new(
                "Sports",
                &[
                    "sports",
                    "football",
                    "basketball",
                    "soccer",
                    "baseball",
                    "game",
                    "team",
                    "player",
                    "match",
                ],
            ),
            CategoryRule::new(
                "Weather",
                &[
                    "weather",
                    "forecast",
                    "temperature",
                    "rain",
                    "snow",
                    "climate",
                ],
            ),
        ])
    }

    /// Categorize a query.
    ///
    /// Returns the label of the first rule with a matching keyword, or
    /// [`OTHER_CATEGORY`] when nothing matches. Matching is
    /// case-insensitive on the query side; keywords are stored lowercase.
    #[must_use]
    pub fn categorize(&self, query: &str) -> &str {
        let lowered = query.to_lowercase();
        for rule in &self.rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword.as_str()))
            {
                return &rule.label;
            }
        }
        OTHER_CATEGORY
    }

    /// The rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::default_taxonomy()
    }
}
