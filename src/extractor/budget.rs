use tracing::debug;

use crate::extractor::model::{ExtractedContent, Section};

/// Fits whole sections into `max_bytes`, in document order.
///
/// A section is either included entirely or not at all; accumulation stops at
/// the first section that would overflow the budget.
pub fn prioritize_sections(sections: &[Section<'_>], max_bytes: usize) -> ExtractedContent {
    let mut content = String::new();
    let mut included = 0;

    for section in sections {
        if content.len() + section.byte_len() > max_bytes {
            break;
        }
        content.push_str(section.text);
        included += 1;
    }

    let truncated = included < sections.len();
    debug!(
        included,
        total = sections.len(),
        bytes = content.len(),
        "selected sections within budget"
    );
    ExtractedContent::new(content, truncated)
}

/// Cuts `text` to at most `max_bytes` without splitting a UTF-8 sequence.
pub fn truncate_utf8(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Applies the byte budget to assembled markdown: section-wise when the text
/// has headings, raw UTF-8-safe truncation otherwise.
pub fn fit_to_budget(markdown: &str, sections: &[Section<'_>], max_bytes: usize) -> ExtractedContent {
    if !sections.is_empty() {
        return prioritize_sections(sections, max_bytes);
    }
    let fitted = truncate_utf8(markdown, max_bytes);
    ExtractedContent::new(fitted.to_string(), fitted.len() < markdown.len())
}
