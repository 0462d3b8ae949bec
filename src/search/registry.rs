//! Static catalogs of documentation pages.
//!
//! Entry order is significant: it is the discovery order used to break ties
//! between equally scored search results.

use url::Url;

/// A documentation page keyed by a short topic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub key: &'static str,
    /// Path relative to the documentation base URL, always ending in `.html`.
    pub page: &'static str,
    pub description: &'static str,
}

impl RegistryEntry {
    const fn new(key: &'static str, page: &'static str, description: &'static str) -> Self {
        Self {
            key,
            page,
            description,
        }
    }

    /// Absolute page URL under `base`, or the bare page path if joining fails.
    pub fn url(&self, base: &Url) -> String {
        base.join(self.page)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| self.page.to_string())
    }
}

/// The two static catalogs searched alongside the dynamic function index.
#[derive(Debug, Clone, Copy)]
pub struct Registries<'a> {
    pub syntax_topics: &'a [RegistryEntry],
    pub function_categories: &'a [RegistryEntry],
}

impl Registries<'static> {
    pub fn builtin() -> Self {
        Self {
            syntax_topics: SYNTAX_TOPICS,
            function_categories: FUNCTION_CATEGORIES,
        }
    }
}

impl<'a> Registries<'a> {
    /// True when `page` is one of the category pages.
    pub fn is_category_page(&self, page: &str) -> bool {
        self.function_categories.iter().any(|c| c.page == page)
    }
}

/// Exact key match, then a partial match in either direction, in registry order.
pub fn resolve_key<'a>(entries: &'a [RegistryEntry], query: &str) -> Option<&'a RegistryEntry> {
    let query = query.trim().to_lowercase();
    entries.iter().find(|e| e.key == query).or_else(|| {
        entries
            .iter()
            .find(|e| e.key.contains(query.as_str()) || query.contains(e.key))
    })
}

/// Like [`resolve_key`], but an entry also matches when its description
/// contains the query. Key and description are checked entry by entry, so an
/// earlier description hit wins over a later key hit.
pub fn resolve_topic<'a>(entries: &'a [RegistryEntry], query: &str) -> Option<&'a RegistryEntry> {
    let query = query.trim().to_lowercase();
    entries.iter().find(|e| e.key == query).or_else(|| {
        entries.iter().find(|e| {
            e.key.contains(query.as_str())
                || query.contains(e.key)
                || e.description.to_lowercase().contains(query.as_str())
        })
    })
}

/// Keys in alphabetical order, for "available topics" listings.
pub fn sorted_keys(entries: &[RegistryEntry]) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = entries.iter().map(|e| e.key).collect();
    keys.sort_unstable();
    keys
}

pub static SYNTAX_TOPICS: &[RegistryEntry] = &[
    RegistryEntry::new(
        "comments",
        "syntax-comments.html",
        "Single-line and multi-line comment syntax",
    ),
    RegistryEntry::new(
        "filters",
        "syntax-filters.html",
        "Query filters and field-based filtering",
    ),
    RegistryEntry::new(
        "operators",
        "syntax-operators.html",
        "Logical and comparison operators",
    ),
    RegistryEntry::new(
        "fields",
        "syntax-fields.html",
        "Field creation, assignment, and manipulation",
    ),
    RegistryEntry::new(
        "user-input",
        "syntax-fields-user-input.html",
        "User-configurable parameters in queries",
    ),
    RegistryEntry::new(
        "conditional",
        "syntax-conditional.html",
        "Conditional evaluation with case/match statements",
    ),
    RegistryEntry::new("array", "syntax-array.html", "Array processing and indexing"),
    RegistryEntry::new(
        "expressions",
        "syntax-expressions.html",
        "Expression syntax and evaluation",
    ),
    RegistryEntry::new(
        "user-functions",
        "syntax-function-user.html",
        "User-defined functions",
    ),
    RegistryEntry::new(
        "function-calls",
        "syntax-function.html",
        "Function call syntax",
    ),
    RegistryEntry::new("time", "syntax-time.html", "Time-related syntax overview"),
    RegistryEntry::new(
        "timezones",
        "syntax-time-timezones.html",
        "Timezone handling in queries",
    ),
    RegistryEntry::new(
        "relative-time",
        "syntax-time-relative.html",
        "Relative time expressions",
    ),
    RegistryEntry::new(
        "macros",
        "syntax-macros.html",
        "Query macros and reusable components",
    ),
    RegistryEntry::new("regex", "syntax-regex.html", "Regular expression overview"),
    RegistryEntry::new(
        "regex-syntax",
        "syntax-regex-syntax.html",
        "Regular expression syntax reference",
    ),
    RegistryEntry::new(
        "regex-flags",
        "syntax-regex-flags.html",
        "Regular expression flags and modifiers",
    ),
    RegistryEntry::new(
        "regex-engines",
        "syntax-regex-engines.html",
        "Regular expression engine options",
    ),
];

pub static FUNCTION_CATEGORIES: &[RegistryEntry] = &[
    RegistryEntry::new(
        "aggregate",
        "functions-aggregate.html",
        "Aggregation functions (count, sum, avg, etc.)",
    ),
    RegistryEntry::new(
        "array",
        "functions-array.html",
        "Array manipulation functions",
    ),
    RegistryEntry::new(
        "comparison",
        "functions-comparison.html",
        "Comparison and equality functions",
    ),
    RegistryEntry::new(
        "conditional",
        "functions-condition.html",
        "Conditional logic functions",
    ),
    RegistryEntry::new(
        "data-manipulation",
        "functions-data-manipulation.html",
        "Data transformation functions",
    ),
    RegistryEntry::new("event", "functions-event.html", "Event information functions"),
    RegistryEntry::new("filter", "functions-filter.html", "Filtering functions"),
    RegistryEntry::new(
        "formatting",
        "functions-formatting.html",
        "Output formatting functions",
    ),
    RegistryEntry::new(
        "geolocation",
        "functions-geolocation.html",
        "Geographic and IP location functions",
    ),
    RegistryEntry::new(
        "hash",
        "functions-hash-functions.html",
        "Hashing functions (MD5, SHA, etc.)",
    ),
    RegistryEntry::new(
        "join",
        "functions-join-functions.html",
        "Data joining functions",
    ),
    RegistryEntry::new("math", "functions-math.html", "Mathematical functions"),
    RegistryEntry::new(
        "network",
        "functions-network-location.html",
        "Network and location functions",
    ),
    RegistryEntry::new("parsing", "functions-parsing.html", "Data parsing functions"),
    RegistryEntry::new(
        "regex",
        "functions-regular-expression.html",
        "Regular expression functions",
    ),
    RegistryEntry::new(
        "security",
        "functions-security.html",
        "Security-related functions",
    ),
    RegistryEntry::new(
        "statistics",
        "functions-statistics.html",
        "Statistical functions",
    ),
    RegistryEntry::new(
        "string",
        "functions-string.html",
        "String manipulation functions",
    ),
    RegistryEntry::new(
        "time-date",
        "functions-time-date.html",
        "Time and date functions",
    ),
    RegistryEntry::new(
        "widget",
        "functions-widget.html",
        "Dashboard widget functions",
    ),
];
