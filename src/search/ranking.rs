use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::search::{
    index::IndexEntry,
    registry::{Registries, RegistryEntry},
};

const KEY_WEIGHT: u32 = 3;
const DESCRIPTION_WEIGHT: u32 = 1;
const INDEX_NAME_WEIGHT: u32 = 5;
const INDEX_HREF_WEIGHT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Syntax,
    FunctionCategory,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub kind: CandidateKind,
    pub name: String,
    pub description: String,
    pub url: String,
    pub score: u32,
}

/// A search hit as returned to callers; the score only drives ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub kind: CandidateKind,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<SearchCandidate> for RankedResult {
    fn from(candidate: SearchCandidate) -> Self {
        Self {
            kind: candidate.kind,
            name: candidate.name,
            description: candidate.description,
            url: candidate.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<RankedResult>,
    /// Matching candidates before deduplication and the limit.
    pub total_found: usize,
    pub source: String,
}

fn query_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// +3 per word found in the key, +1 per word found in the description.
pub fn score_registry_entry(entry: &RegistryEntry, words: &[String]) -> u32 {
    let description = entry.description.to_lowercase();
    words
        .iter()
        .map(|word| {
            let mut score = 0;
            if entry.key.contains(word.as_str()) {
                score += KEY_WEIGHT;
            }
            if description.contains(word.as_str()) {
                score += DESCRIPTION_WEIGHT;
            }
            score
        })
        .sum()
}

/// +5 per word found in the display name, +2 per word found in the href.
pub fn score_index_entry(entry: &IndexEntry, words: &[String]) -> u32 {
    let name = entry.name.to_lowercase();
    let href = entry.href.to_lowercase();
    words
        .iter()
        .map(|word| {
            let mut score = 0;
            if name.contains(word.as_str()) {
                score += INDEX_NAME_WEIGHT;
            }
            if href.contains(word.as_str()) {
                score += INDEX_HREF_WEIGHT;
            }
            score
        })
        .sum()
}

/// Scores every candidate source against `query` in discovery order: syntax
/// topics, function categories, then index entries. Zero scores are dropped.
pub fn collect_candidates(
    query: &str,
    base_url: &Url,
    registries: &Registries<'_>,
    index: Option<&[IndexEntry]>,
) -> Vec<SearchCandidate> {
    let words = query_words(query);
    let mut candidates = Vec::new();

    let static_sources = [
        (CandidateKind::Syntax, registries.syntax_topics),
        (CandidateKind::FunctionCategory, registries.function_categories),
    ];
    for (kind, entries) in static_sources {
        for entry in entries {
            let score = score_registry_entry(entry, &words);
            if score > 0 {
                candidates.push(SearchCandidate {
                    kind,
                    name: entry.key.to_string(),
                    description: entry.description.to_string(),
                    url: entry.url(base_url),
                    score,
                });
            }
        }
    }

    for entry in index.unwrap_or_default() {
        let score = score_index_entry(entry, &words);
        if score > 0 {
            candidates.push(SearchCandidate {
                kind: CandidateKind::Function,
                name: entry.name.clone(),
                description: format!("LogScale function: {}", entry.name),
                url: base_url
                    .join(&entry.href)
                    .map(|url| url.to_string())
                    .unwrap_or_else(|_| entry.href.clone()),
                score,
            });
        }
    }

    candidates
}

/// Orders candidates by descending score (ties keep discovery order), drops
/// repeated URLs keeping the first, and caps the list at `limit`.
pub fn rank_candidates(mut candidates: Vec<SearchCandidate>, limit: usize) -> Vec<RankedResult> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.url.clone()))
        .take(limit)
        .map(RankedResult::from)
        .collect()
}

/// Answers a free-text documentation search across the static registries and
/// an optional, already fetched function index.
pub fn rank(
    query: &str,
    limit: usize,
    base_url: &Url,
    registries: &Registries<'_>,
    index: Option<&[IndexEntry]>,
) -> SearchResponse {
    let candidates = collect_candidates(query, base_url, registries, index);
    let total_found = candidates.len();
    let results = rank_candidates(candidates, limit);
    debug!(query, total_found, returned = results.len(), "ranked search candidates");

    SearchResponse {
        query: query.to_string(),
        results,
        total_found,
        source: base_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::registry::FUNCTION_CATEGORIES;
    use proptest::prelude::*;

    fn base() -> Url {
        Url::parse("https://library.humio.com/data-analysis/").unwrap()
    }

    fn entry(name: &str, href: &str) -> IndexEntry {
        IndexEntry {
            name: name.to_string(),
            href: href.to_string(),
        }
    }

    #[test]
    fn test_aggregate_matches_category() {
        let registries = Registries::builtin();
        let candidates = collect_candidates("aggregate", &base(), &registries, None);

        let aggregate = candidates
            .iter()
            .find(|c| c.kind == CandidateKind::FunctionCategory && c.name == "aggregate")
            .unwrap();
        assert!(aggregate.score >= 3);
        assert_eq!(
            aggregate.url,
            "https://library.humio.com/data-analysis/functions-aggregate.html"
        );

        let response = rank("aggregate", 10, &base(), &registries, None);
        assert_eq!(response.results[0].name, "aggregate");
        assert_eq!(response.results[0].kind, CandidateKind::FunctionCategory);
    }

    #[test]
    fn test_registry_scoring_weights() {
        let words = vec!["regular".to_string(), "flags".to_string()];
        let flags = RegistryEntry {
            key: "regex-flags",
            page: "syntax-regex-flags.html",
            description: "Regular expression flags and modifiers",
        };
        // "regular": description only (+1); "flags": key and description (+3 +1)
        assert_eq!(score_registry_entry(&flags, &words), 5);
    }

    #[test]
    fn test_index_scoring_weights() {
        let words = vec!["split".to_string()];
        assert_eq!(score_index_entry(&entry("splitString()", "functions-splitstring.html"), &words), 7);
        assert_eq!(score_index_entry(&entry("tokenize()", "functions-split-token.html"), &words), 2);
        assert_eq!(score_index_entry(&entry("count()", "functions-count.html"), &words), 0);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let registries = Registries::builtin();
        // "array" is both a syntax topic and a category with identical scores
        let response = rank("array", 10, &base(), &registries, None);
        let kinds: Vec<CandidateKind> = response.results.iter().map(|r| r.kind).collect();
        assert_eq!(kinds[0], CandidateKind::Syntax);
        assert_eq!(kinds[1], CandidateKind::FunctionCategory);
    }

    #[test]
    fn test_static_entry_wins_tie_with_index_entry() {
        let categories = [RegistryEntry {
            key: "string",
            page: "functions-string.html",
            description: "String manipulation functions",
        }];
        let registries = Registries {
            syntax_topics: &[],
            function_categories: &categories,
        };
        // category: "string" in key and description (+3 +1)
        // index entry: "string" and "trim" in href only (+2 +2)
        let index = vec![entry("strip()", "functions-string-trim.html")];

        let response = rank("string trim", 10, &base(), &registries, Some(&index));

        let names: Vec<&str> = response.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["string", "strip()"]);
        assert_eq!(response.results[1].kind, CandidateKind::Function);
    }

    #[test]
    fn test_duplicate_urls_removed_but_counted() {
        let registries = Registries::builtin();
        let index = vec![
            entry("regex()", "functions-regex.html"),
            entry("regex()", "functions-regex.html"),
        ];
        let response = rank("regex", 20, &base(), &registries, Some(&index));

        let regex_fn: Vec<_> = response
            .results
            .iter()
            .filter(|r| r.kind == CandidateKind::Function)
            .collect();
        assert_eq!(regex_fn.len(), 1);
        assert_eq!(response.total_found, response.results.len() + 1);
        // name +5 and href +2 beat every static match
        assert_eq!(response.results[0].kind, CandidateKind::Function);
    }

    #[test]
    fn test_limit_caps_results() {
        let registries = Registries::builtin();
        let response = rank("functions", 3, &base(), &registries, None);
        assert_eq!(response.results.len(), 3);
        assert!(response.total_found > 3);
        assert_eq!(response.source, base().to_string());
    }

    #[test]
    fn test_empty_query_finds_nothing() {
        let response = rank("   ", 10, &base(), &Registries::builtin(), None);
        assert!(response.results.is_empty());
        assert_eq!(response.total_found, 0);
    }

    #[test]
    fn test_custom_registries() {
        let registries = Registries {
            syntax_topics: &[],
            function_categories: &FUNCTION_CATEGORIES[..1],
        };
        let response = rank("count", 10, &base(), &registries, None);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].name, "aggregate");
    }

    proptest! {
        #[test]
        fn results_unique_and_sorted(
            query in "[a-z]{1,6}( [a-z]{1,6}){0,2}",
            names in proptest::collection::vec("[a-z]{1,8}", 0..20),
            limit in 0usize..15,
        ) {
            let registries = Registries::builtin();
            let index: Vec<IndexEntry> = names
                .iter()
                .map(|n| entry(&format!("{n}()"), &format!("functions-{n}.html")))
                .collect();

            let candidates = collect_candidates(&query, &base(), &registries, Some(&index));
            let response = rank(&query, limit, &base(), &registries, Some(&index));

            prop_assert!(response.results.len() <= limit);
            prop_assert_eq!(response.total_found, candidates.len());

            let mut urls = HashSet::new();
            for result in &response.results {
                prop_assert!(urls.insert(result.url.clone()));
            }

            let score_of = |url: &str| {
                candidates
                    .iter()
                    .filter(|c| c.url == url)
                    .map(|c| c.score)
                    .max()
                    .unwrap_or(0)
            };
            for pair in response.results.windows(2) {
                prop_assert!(score_of(&pair[0].url) >= score_of(&pair[1].url));
            }
        }
    }
}
