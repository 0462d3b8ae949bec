use scraper::Html;
use std::fs;
use url::Url;

use crate::extractor::{
    EXTRACTION_PLACEHOLDER, HtmlMarkdown, extract_content, extract_from_document,
};

const BUDGET: usize = 20_480;

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn base(url: &str) -> Url {
    Url::parse(url).unwrap()
}

#[test]
fn test_extract_function_page() {
    let html = fixture("function_page.html");
    let url = base("https://library.humio.com/data-analysis/functions-regex.html");

    let result = extract_content(&html, &url, BUDGET);
    let content = &result.content;

    assert!(content.starts_with("## regex()"));
    assert!(content.contains("## Parameters"));
    assert!(content.contains("| regex | string | The regular expression pattern |"));
    assert!(content.contains("```\nregex(\"error.*timeout\")\n```"));
    assert!(content.contains(
        "[regular expression syntax](https://library.humio.com/data-analysis/syntax-regex.html)"
    ));

    // chrome and navigation lists are gone
    assert!(!content.contains("Copyright"));
    assert!(!content.contains("Share on social media"));
    assert!(!content.contains("analytics"));
    assert!(!content.contains("functions-count.html"));
    assert!(!content.contains("functions-replace.html"));

    assert_eq!(result.size_bytes, content.len());
    assert!(!result.truncated);
}

#[test]
fn test_extract_main_article() {
    let html = fixture("main_article.html");
    let url = base("https://library.humio.com/data-analysis/syntax-filters.html");

    let result = extract_content(&html, &url, BUDGET);
    let content = &result.content;

    assert!(content.starts_with("## Query Filters"));
    assert!(content.contains("## Free-text filters"));
    assert!(content.contains("```logscale\n\"connection refused\" | error\n```"));
    assert!(content.contains("**field = value**\n: Exact match on a field."));
    assert!(!content.contains("Home"));
    assert!(!content.contains("On this page"));

    let free_text = content.find("## Free-text filters").unwrap();
    let field = content.find("## Field filters").unwrap();
    assert!(free_text < field);
}

#[test]
fn test_unstructured_page_converted_whole() {
    let html = fixture("unstructured.html");
    let url = base("https://example.com/plain.html");

    let result = extract_content(&html, &url, BUDGET);

    assert!(result.content.contains("loose inline text"));
    assert!(result.content.contains("ünïcödé"));
    assert!(!result.truncated);
}

#[test]
fn test_unstructured_page_truncated_on_char_boundary() {
    let html = format!(
        "<html><body><div>{}</div></body></html>",
        "ü".repeat(300)
    );
    let url = base("https://example.com/");

    let result = extract_content(&html, &url, 101);

    assert_eq!(result.content, "ü".repeat(50));
    assert_eq!(result.size_bytes, 100);
    assert!(result.truncated);
}

#[test]
fn test_sectioned_page_respects_budget() {
    let paragraph = "word ".repeat(100);
    let html = format!(
        "<html><body><main><h1>Title</h1><p>{paragraph}</p><h2>One</h2><p>{paragraph}</p><h2>Two</h2><p>{paragraph}</p></main></body></html>"
    );
    let url = base("https://example.com/");

    let full = extract_content(&html, &url, BUDGET);
    assert!(!full.truncated);

    let limited = extract_content(&html, &url, full.size_bytes - 1);
    assert!(limited.truncated);
    assert!(limited.size_bytes < full.size_bytes);
    assert!(full.content.starts_with(&limited.content));
    assert!(limited.content.contains("## One"));
    assert!(!limited.content.contains("## Two"));
}

#[test]
fn test_chrome_only_page_yields_empty_content() {
    let html = fixture("empty.html");
    let url = base("https://example.com/empty");

    let result = extract_content(&html, &url, BUDGET);

    assert_eq!(result.content, "");
    assert_eq!(result.size_bytes, 0);
    assert!(!result.truncated);
}

#[test]
fn test_missing_body_yields_placeholder() {
    let document = Html::parse_fragment("<p>orphan paragraph</p>");
    let url = base("https://example.com/");

    let result = extract_from_document(&document, &url, BUDGET, &HtmlMarkdown);

    assert_eq!(result.content, EXTRACTION_PLACEHOLDER);
    assert_eq!(result.size_bytes, EXTRACTION_PLACEHOLDER.len());
}

#[test]
fn test_noisy_body_class_yields_placeholder() {
    let html = r#"<html><body class="has-sidebar"><main><p>Still here</p></main></body></html>"#;
    let url = base("https://example.com/");

    let result = extract_content(html, &url, BUDGET);

    assert_eq!(result.content, EXTRACTION_PLACEHOLDER);
    assert!(!result.truncated);

    let html = r#"<html id="page-header-layout"><body><p>Still here</p></body></html>"#;
    assert_eq!(extract_content(html, &url, BUDGET).content, EXTRACTION_PLACEHOLDER);
}

#[test]
fn test_repeated_runs_are_identical_and_side_effect_free() {
    let document = Html::parse_document(&fixture("function_page.html"));
    let url = base("https://library.humio.com/data-analysis/functions-regex.html");

    let first = extract_from_document(&document, &url, BUDGET, &HtmlMarkdown);
    let second = extract_from_document(&document, &url, BUDGET, &HtmlMarkdown);

    assert_eq!(first, second);
    assert!(document.html().contains("Copyright LogScale"));
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";
    let url = base("https://example.com/broken");

    let result = extract_content(html, &url, BUDGET);

    assert!(result.content.contains("Unclosed tags"));
    assert!(result.content.contains("More content"));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_exceeds_budget(html in ".{0,400}", budget in 0usize..200) {
            let url = Url::parse("https://example.com/").unwrap();
            let result = extract_content(&html, &url, budget);
            prop_assert!(result.size_bytes <= budget || result.content == EXTRACTION_PLACEHOLDER);
            prop_assert_eq!(result.size_bytes, result.content.len());
        }
    }
}
