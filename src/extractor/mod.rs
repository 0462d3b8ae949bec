pub mod assemble;
pub mod budget;
pub mod cleaner;
pub mod markdown;
pub mod model;
pub mod reader;
pub mod reject;
pub mod sections;
pub mod tree;

#[cfg(test)]
mod tests;

pub use markdown::{HtmlMarkdown, MarkdownConverter};
pub use model::{EXTRACTION_PLACEHOLDER, ExtractedContent, Section};

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::extractor::{cleaner::WorkingCopy, reader::locate_region};

/// Extracts the primary documentation content of an HTML page as markdown,
/// bounded to `max_bytes`.
pub fn extract_content(html: &str, base_url: &Url, max_bytes: usize) -> ExtractedContent {
    let document = Html::parse_document(html);
    extract_from_document(&document, base_url, max_bytes, &HtmlMarkdown)
}

/// Runs the pipeline on an already parsed page. The document is left as-is;
/// all cleanup happens on a working copy.
pub fn extract_from_document<C>(
    document: &Html,
    base_url: &Url,
    max_bytes: usize,
    converter: &C,
) -> ExtractedContent
where
    C: MarkdownConverter + ?Sized,
{
    // 1. Strip page chrome from a disposable copy
    let mut copy = WorkingCopy::of(document);
    copy.strip_noise();

    // 2. Find the content region
    let Some(region) = copy.root().and_then(locate_region) else {
        debug!(url = %base_url, "no content region found");
        return ExtractedContent::placeholder();
    };
    debug!(url = %base_url, strategy = ?region.strategy, "located content region");

    // 3. Convert the region to markdown
    let markdown = assemble::assemble_markdown(region.node, base_url, converter);

    // 4. Fit to the byte budget, section by section when possible
    let sections = sections::extract_sections(&markdown);
    budget::fit_to_budget(&markdown, &sections, max_bytes)
}
