use std::collections::HashSet;

use tracing::debug;
use url::Url;

use crate::extractor::{
    cleaner::is_within, markdown::MarkdownConverter, reject::is_navigation_list,
    tree::ContentNode,
};

/// Elements visited, in document order, when assembling content.
const CONTENT_TAGS: [&str; 13] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "table", "pre", "code", "ul", "ol", "dl",
];

/// Below this many characters the structural walk is assumed to have missed
/// content, and the whole region is converted instead.
const MIN_ASSEMBLED_CHARS: usize = 200;

/// Builds markdown for a content region: a title line from the first
/// `h1`/`h2`, then each content element converted on its own.
pub fn assemble_markdown<N, C>(region: N, base_url: &Url, converter: &C) -> String
where
    N: ContentNode,
    C: MarkdownConverter + ?Sized,
{
    let mut parts = Vec::new();

    let title = region.find_first(&["h1", "h2"]);
    if let Some(title) = title {
        let text = title.stripped_text();
        if !text.is_empty() {
            parts.push(format!("## {text}"));
        }
    }

    let mut emitted: HashSet<N::Id> = HashSet::new();
    if let Some(title) = title {
        emitted.insert(title.id());
    }

    for el in region.descendant_elems() {
        if !CONTENT_TAGS.iter().any(|t| el.is_tag(t)) {
            continue;
        }
        if emitted.iter().any(|id| is_within(el, *id)) {
            continue;
        }
        if el.stripped_text().is_empty() {
            continue;
        }
        if is_navigation_list(el) {
            debug!(tag = el.tag(), "skipping navigation list");
            continue;
        }

        let markdown = converter.convert(&el.outer_html(), base_url);
        if markdown.trim().is_empty() {
            continue;
        }
        parts.push(markdown);
        emitted.insert(el.id());
    }

    let assembled = parts.join("\n\n");
    if assembled.chars().count() < MIN_ASSEMBLED_CHARS {
        debug!(
            chars = assembled.chars().count(),
            "structural walk too thin, converting whole region"
        );
        return converter.convert(&region.outer_html(), base_url);
    }
    assembled
}
