use std::hash::Hash;

use scraper::ElementRef;

/// Read-only view of an element in a parsed document.
///
/// The cleaner, reader and assembler only talk to the document through this
/// trait, so the concrete HTML parser stays swappable.
pub trait ContentNode: Copy {
    type Id: Copy + Eq + Hash;

    fn id(&self) -> Self::Id;

    /// Lowercase tag name.
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    fn parent_elem(&self) -> Option<Self>;

    fn child_elems(&self) -> Vec<Self>;

    /// All element descendants in document order, excluding `self`.
    fn descendant_elems(&self) -> Vec<Self>;

    /// Text nodes with surrounding whitespace stripped, concatenated.
    fn stripped_text(&self) -> String;

    fn outer_html(&self) -> String;

    fn is_tag(&self, name: &str) -> bool {
        self.tag().eq_ignore_ascii_case(name)
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Visible text length in characters.
    fn text_len(&self) -> usize {
        self.stripped_text().chars().count()
    }

    fn find_first(&self, tags: &[&str]) -> Option<Self> {
        self.descendant_elems()
            .into_iter()
            .find(|el| tags.iter().any(|t| el.is_tag(t)))
    }
}

impl<'a> ContentNode for ElementRef<'a> {
    type Id = ego_tree::NodeId;

    fn id(&self) -> Self::Id {
        // Goes through the underlying tree node; `self.id()` would recurse.
        (**self).id()
    }

    fn tag(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn parent_elem(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn child_elems(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn descendant_elems(&self) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn stripped_text(&self) -> String {
        self.text().map(str::trim).collect()
    }

    fn outer_html(&self) -> String {
        self.html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_stripped_text_drops_surrounding_whitespace() {
        let doc = Html::parse_fragment("<div>\n  Hello <b> world </b>\n</div>");
        let div = doc
            .select(&Selector::parse("div").unwrap())
            .next()
            .unwrap();
        assert_eq!(div.stripped_text(), "Helloworld");
        assert_eq!(div.text_len(), 10);
    }

    #[test]
    fn test_has_class_matches_whole_tokens() {
        let doc = Html::parse_fragment(r#"<div class="doc-content wide"></div>"#);
        let div = doc
            .select(&Selector::parse("div").unwrap())
            .next()
            .unwrap();
        assert!(div.has_class("doc-content"));
        assert!(div.has_class("wide"));
        assert!(!div.has_class("content"));
    }

    #[test]
    fn test_find_first_uses_document_order() {
        let doc = Html::parse_document(
            "<html><body><div><h2>Second level</h2></div><h1>Top</h1></body></html>",
        );
        let body = doc
            .select(&Selector::parse("body").unwrap())
            .next()
            .unwrap();
        let heading = body.find_first(&["h1", "h2"]).unwrap();
        assert_eq!(heading.tag(), "h2");
    }
}
