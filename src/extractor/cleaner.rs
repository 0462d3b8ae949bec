use scraper::{ElementRef, Html};
use tracing::debug;

use crate::extractor::tree::ContentNode;

/// Tags dropped outright, whatever their attributes.
const STRUCTURAL_TAGS: [&str; 7] = [
    "nav", "aside", "footer", "header", "script", "style", "noscript",
];

/// Substrings that mark an element as chrome when found in its class or id.
const NOISE_PATTERNS: [&str; 12] = [
    "nav",
    "sidebar",
    "menu",
    "breadcrumb",
    "toc",
    "footer",
    "header",
    "skip",
    "social",
    "share",
    "cookie",
    "banner",
];

/// A disposable copy of a parsed page. Destructive cleanup happens here, the
/// source `Html` is never touched.
pub struct WorkingCopy {
    html: Html,
}

impl WorkingCopy {
    pub fn of(document: &Html) -> Self {
        Self {
            html: document.clone(),
        }
    }

    /// The root element, or `None` once the noise filter has detached it.
    pub fn root(&self) -> Option<ElementRef<'_>> {
        self.html.tree.root().children().find_map(ElementRef::wrap)
    }

    pub fn strip_noise(&mut self) {
        let removable = noise_elements(self.html.root_element());
        debug!(removed = removable.len(), "stripping page chrome");
        for id in removable {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

/// Collects every element the noise filter would remove, in two passes:
/// structural tags first, then class/id pattern matches on what remains,
/// `root` included.
pub fn noise_elements<N: ContentNode>(root: N) -> Vec<N::Id> {
    let mut structural = Vec::new();
    let mut removed = Vec::new();

    for el in root.descendant_elems() {
        if structural.iter().any(|id| is_within(el, *id)) {
            continue;
        }
        if STRUCTURAL_TAGS.iter().any(|t| el.is_tag(t)) {
            structural.push(el.id());
        }
    }

    for el in std::iter::once(root).chain(root.descendant_elems()) {
        if structural.iter().chain(removed.iter()).any(|id| is_within(el, *id)) {
            continue;
        }
        if matches_noise_pattern(el.attr("class")) || matches_noise_pattern(el.attr("id")) {
            removed.push(el.id());
        }
    }

    structural.extend(removed);
    structural
}

fn matches_noise_pattern(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.to_lowercase();
    NOISE_PATTERNS.iter().any(|p| value.contains(p))
}

/// True when `el` is the node `id` or sits beneath it.
pub(crate) fn is_within<N: ContentNode>(el: N, id: N::Id) -> bool {
    let mut current = Some(el);
    while let Some(node) = current {
        if node.id() == id {
            return true;
        }
        current = node.parent_elem();
    }
    false
}
