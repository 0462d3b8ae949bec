use serde::{Deserialize, Serialize};

/// Text returned when no content region can be found on a page.
pub const EXTRACTION_PLACEHOLDER: &str = "Unable to extract content from page";

/// Bounded documentation text produced by the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub content: String,
    pub size_bytes: usize,
    pub truncated: bool,
}

impl ExtractedContent {
    pub fn new(content: String, truncated: bool) -> Self {
        Self {
            size_bytes: content.len(),
            content,
            truncated,
        }
    }

    pub fn placeholder() -> Self {
        Self::new(EXTRACTION_PLACEHOLDER.to_string(), false)
    }
}

/// A heading-delimited slice of assembled markdown.
///
/// `text` is the exact source span the section covers, from its heading line
/// up to the next heading, so consecutive sections concatenate back into the
/// original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading text without `#` markers; empty for leading text.
    pub heading: &'a str,
    /// Heading depth, 0 for leading text.
    pub level: usize,
    pub body: &'a str,
    pub text: &'a str,
}

impl Section<'_> {
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }
}
