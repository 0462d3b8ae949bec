//! LogScale (Humio) query language documentation.
//!
//! Syntax topics and function categories come from the static registries;
//! function pages and the function index are fetched on demand from the
//! configured documentation root.

use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    config::Config,
    extractor::{ExtractedContent, HtmlMarkdown, extract_from_document},
    fetcher::{FetchError, PageSource},
    providers::Lookup,
    search::{
        CandidateKind, Registries, SearchResponse, parse_category_functions, parse_function_index,
        rank, registry::sorted_keys, resolve_key, resolve_topic,
    },
};

const FUNCTION_INDEX_PAGE: &str = "functions.html";
const DOCS_SOURCE: &str = "logscale_docs";
const FETCH_DISABLED: &str = "Documentation fetching is disabled (RTFD_FETCH)";
const CATEGORY_HINT: &str = "Use category parameter to list functions in a specific category";
const SUGGESTION_SEARCH_LIMIT: usize = 5;
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxDoc {
    pub topic: String,
    pub description: String,
    #[serde(flatten)]
    pub extracted: ExtractedContent,
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDoc {
    pub function: String,
    /// First highlighted code sample on the page, usually the call signature.
    pub signature: String,
    #[serde(flatten)]
    pub extracted: ExtractedContent,
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOverview {
    pub categories: Vec<CategorySummary>,
    pub total_categories: usize,
    pub source: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFunctions {
    pub category: String,
    pub description: String,
    pub functions: Vec<FunctionLink>,
    pub count: usize,
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FunctionListing {
    Categories(CategoryOverview),
    Category(CategoryFunctions),
}

pub struct LogscaleProvider<S> {
    config: Config,
    pages: S,
    registries: Registries<'static>,
}

impl<S: PageSource> LogscaleProvider<S> {
    pub fn new(config: Config, pages: S) -> Self {
        Self {
            config,
            pages,
            registries: Registries::builtin(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn source_label(&self) -> String {
        self.config.base_url().to_string()
    }

    async fn fetch_page(&self, page: &str) -> Result<(Url, String), FetchError> {
        let url = self.config.base_url().join(page)?;
        let html = self.pages.fetch_html(&url).await?;
        Ok((url, html))
    }

    /// Ranks syntax topics, function categories and, when the function index
    /// can be fetched, individual functions against `query`.
    #[instrument(skip_all, fields(query = %query))]
    pub async fn search_docs(&self, query: &str, limit: usize) -> SearchResponse {
        let index = match self.fetch_page(FUNCTION_INDEX_PAGE).await {
            Ok((_, html)) => Some(parse_function_index(&html, &self.registries)),
            Err(err) => {
                warn!(error = %err, "function index unavailable, searching registries only");
                None
            }
        };

        rank(
            query,
            limit,
            self.config.base_url(),
            &self.registries,
            index.as_deref(),
        )
    }

    /// Without a category, lists every category. With one, lists the
    /// functions linked from that category's page.
    #[instrument(skip_all, fields(category = ?category))]
    pub async fn list_functions(&self, category: Option<&str>) -> Lookup<FunctionListing> {
        let Some(category) = category else {
            return Lookup::Found(FunctionListing::Categories(self.category_overview()));
        };

        let categories = self.registries.function_categories;
        let Some(entry) = resolve_key(categories, category) else {
            let available = sorted_keys(categories);
            return Lookup::NotFound {
                query: category.to_string(),
                error: format!("Category not found. Available: {}", available.join(", ")),
                available: available.into_iter().map(str::to_string).collect(),
                suggestions: Vec::new(),
                source: self.source_label(),
            };
        };

        match self.fetch_page(entry.page).await {
            Ok((url, html)) => {
                let functions: Vec<FunctionLink> =
                    parse_category_functions(&html, &self.registries)
                        .into_iter()
                        .map(|f| FunctionLink {
                            url: url.join(&f.href).map(|u| u.to_string()).unwrap_or(f.href),
                            name: f.name,
                        })
                        .collect();
                debug!(category = entry.key, count = functions.len(), "listed category");

                Lookup::Found(FunctionListing::Category(CategoryFunctions {
                    category: entry.key.to_string(),
                    description: entry.description.to_string(),
                    count: functions.len(),
                    functions,
                    url: url.to_string(),
                    source: DOCS_SOURCE.to_string(),
                }))
            }
            Err(err) => {
                warn!(error = %err, category = entry.key, "category page fetch failed");
                Lookup::failed(
                    category,
                    format!("Failed to fetch category: {err}"),
                    &self.source_label(),
                )
            }
        }
    }

    fn category_overview(&self) -> CategoryOverview {
        let mut categories: Vec<CategorySummary> = self
            .registries
            .function_categories
            .iter()
            .map(|c| CategorySummary {
                name: c.key.to_string(),
                description: c.description.to_string(),
                url: c.url(self.config.base_url()),
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        CategoryOverview {
            total_categories: categories.len(),
            categories,
            source: self.source_label(),
            hint: CATEGORY_HINT.to_string(),
        }
    }

    /// Fetches and extracts the page for a syntax topic.
    #[instrument(skip_all, fields(topic = %topic))]
    pub async fn fetch_syntax_docs(&self, topic: &str, max_bytes: usize) -> Lookup<SyntaxDoc> {
        if !self.config.fetch_enabled() {
            return Lookup::failed(topic, FETCH_DISABLED, &self.source_label());
        }

        let topics = self.registries.syntax_topics;
        let Some(entry) = resolve_topic(topics, topic) else {
            let available = sorted_keys(topics);
            return Lookup::NotFound {
                query: topic.to_string(),
                error: format!("Topic not found. Available topics: {}", available.join(", ")),
                available: available.into_iter().map(str::to_string).collect(),
                suggestions: Vec::new(),
                source: self.source_label(),
            };
        };

        match self.fetch_page(entry.page).await {
            Ok((url, html)) => {
                let document = Html::parse_document(&html);
                let extracted = extract_from_document(&document, &url, max_bytes, &HtmlMarkdown);
                Lookup::Found(SyntaxDoc {
                    topic: entry.key.to_string(),
                    description: entry.description.to_string(),
                    extracted,
                    url: url.to_string(),
                    source: DOCS_SOURCE.to_string(),
                })
            }
            Err(err) => {
                warn!(error = %err, page = entry.page, "syntax page fetch failed");
                Lookup::failed(topic, describe_fetch_error(&err), &self.source_label())
            }
        }
    }

    /// Fetches and extracts a function's reference page. A missing page is
    /// answered with close matches from the function index when there are any.
    #[instrument(skip_all, fields(function = %name))]
    pub async fn fetch_function_docs(&self, name: &str, max_bytes: usize) -> Lookup<FunctionDoc> {
        if !self.config.fetch_enabled() {
            return Lookup::failed(name, FETCH_DISABLED, &self.source_label());
        }

        let page = format!("functions-{}.html", function_slug(name));
        match self.fetch_page(&page).await {
            Ok((url, html)) => {
                let document = Html::parse_document(&html);
                let signature = signature_of(&document);
                let extracted = extract_from_document(&document, &url, max_bytes, &HtmlMarkdown);
                Lookup::Found(FunctionDoc {
                    function: name.to_string(),
                    signature,
                    extracted,
                    url: url.to_string(),
                    source: DOCS_SOURCE.to_string(),
                })
            }
            Err(err) if err.is_not_found() => self.function_not_found(name).await,
            Err(err) => {
                warn!(error = %err, page = %page, "function page fetch failed");
                Lookup::failed(name, describe_fetch_error(&err), &self.source_label())
            }
        }
    }

    async fn function_not_found(&self, name: &str) -> Lookup<FunctionDoc> {
        let suggestions: Vec<_> = self
            .search_docs(name, SUGGESTION_SEARCH_LIMIT)
            .await
            .results
            .into_iter()
            .filter(|r| r.kind == CandidateKind::Function)
            .take(MAX_SUGGESTIONS)
            .collect();

        let error = if suggestions.is_empty() {
            "Function not found".to_string()
        } else {
            let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
            format!("Function not found. Did you mean: {}?", names.join(", "))
        };
        debug!(suggestions = suggestions.len(), "function page missing");

        Lookup::NotFound {
            query: name.to_string(),
            error,
            available: Vec::new(),
            suggestions,
            source: self.source_label(),
        }
    }
}

/// Page slug for a function name: `array:append()` becomes `array-append`.
pub fn function_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(':', "-")
        .replace("()", "")
        .replace(' ', "-")
}

fn signature_of(document: &Html) -> String {
    let Ok(selector) = Selector::parse("code.code-highlight") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|code| code.text().map(str::trim).collect())
        .unwrap_or_default()
}

fn describe_fetch_error(err: &FetchError) -> String {
    match err.status() {
        Some(status) => format!("HTTP error {}", status.as_u16()),
        None => format!("Failed to fetch docs: {err}"),
    }
}
