use scraper::{Html, Selector};

use crate::{extractor::tree::ContentNode, search::registry::Registries};

/// A function link discovered on an index or category page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    /// Relative page path as written in the link.
    pub href: String,
}

/// Collects function links (`functions-*.html`) from a listing page, skipping
/// links to category pages and links without text. When the link text is the
/// href itself, the name is derived from the page slug.
pub fn parse_function_index(html: &str, registries: &Registries<'_>) -> Vec<IndexEntry> {
    function_links(html, registries)
        .into_iter()
        .map(|(text, href)| {
            let name = if text == href {
                slug_name(&href).to_string()
            } else {
                text
            };
            IndexEntry { name, href }
        })
        .collect()
}

/// Function links on a category page, deduplicated by name. Links whose text
/// is just the href are dropped.
pub fn parse_category_functions(html: &str, registries: &Registries<'_>) -> Vec<IndexEntry> {
    let mut entries: Vec<IndexEntry> = Vec::new();
    for (text, href) in function_links(html, registries) {
        if text == href || entries.iter().any(|e| e.name == text) {
            continue;
        }
        entries.push(IndexEntry { name: text, href });
    }
    entries
}

fn function_links(html: &str, registries: &Registries<'_>) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            if !is_function_page(href) || registries.is_category_page(href) {
                return None;
            }
            let text = link.stripped_text();
            if text.is_empty() {
                return None;
            }
            Some((text, href.to_string()))
        })
        .collect()
}

fn is_function_page(href: &str) -> bool {
    href.starts_with("functions-") && href.ends_with(".html")
}

fn slug_name(href: &str) -> &str {
    let without_prefix = href.strip_prefix("functions-").unwrap_or(href);
    without_prefix.strip_suffix(".html").unwrap_or(without_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
    <html><body>
      <h1>Query Functions</h1>
      <ul>
        <li><a href="functions-aggregate.html">Aggregate</a></li>
        <li><a href="functions-regex.html">regex()</a></li>
        <li><a href="functions-split.html">split()</a></li>
        <li><a href="functions-array-append.html">functions-array-append.html</a></li>
        <li><a href="functions-empty.html">   </a></li>
        <li><a href="syntax-regex.html">Regex syntax</a></li>
        <li><a href="functions-regex.html">regex()</a></li>
      </ul>
    </body></html>"#;

    #[test]
    fn test_index_skips_categories_and_blank_links() {
        let entries = parse_function_index(INDEX, &Registries::builtin());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["regex()", "split()", "array-append", "regex()"]);
        assert_eq!(entries[0].href, "functions-regex.html");
    }

    #[test]
    fn test_category_listing_dedups_and_drops_bare_hrefs() {
        let entries = parse_category_functions(INDEX, &Registries::builtin());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["regex()", "split()"]);
    }

    #[test]
    fn test_link_text_split_across_nodes_is_joined() {
        let html = r#"<ul>
          <li><a href="functions-regex.html">
            <code>regex</code>
            ()
          </a></li>
          <li><a href="functions-regex.html"><code>regex</code>()</a></li>
        </ul>"#;

        let index = parse_function_index(html, &Registries::builtin());
        assert_eq!(index[0].name, "regex()");
        assert_eq!(index[1].name, "regex()");

        let category = parse_category_functions(html, &Registries::builtin());
        assert_eq!(category.len(), 1);
        assert_eq!(category[0].name, "regex()");
    }

    #[test]
    fn test_page_without_links() {
        assert!(parse_function_index("<p>no links</p>", &Registries::builtin()).is_empty());
    }
}
