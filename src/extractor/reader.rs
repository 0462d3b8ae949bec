use crate::extractor::tree::ContentNode;

/// Class names that mark a documentation content container, in priority order.
const CONTENT_CLASSES: [&str; 4] = ["content", "doc-content", "documentation", "page-content"];

/// An ancestor of the first heading must carry more visible text than this to
/// count as the content region.
const MIN_HEADING_CONTAINER_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStrategy {
    SemanticTag,
    ContentClass,
    HeadingAncestor,
    Body,
}

#[derive(Debug, Clone, Copy)]
pub struct Region<N> {
    pub node: N,
    pub strategy: RegionStrategy,
}

/// Finds the element most likely to hold the page's primary content.
///
/// Explicit markup wins over heuristics: `main`/`article`, then a known content
/// class, then the nearest sizeable ancestor of the first `h1`/`h2`, then
/// `body`. Returns `None` when the document has no body at all.
pub fn locate_region<N: ContentNode>(root: N) -> Option<Region<N>> {
    let elements = root.descendant_elems();

    for tag in ["main", "article"] {
        if let Some(node) = elements.iter().find(|el| el.is_tag(tag)) {
            return Some(Region {
                node: *node,
                strategy: RegionStrategy::SemanticTag,
            });
        }
    }

    for class_name in CONTENT_CLASSES {
        if let Some(node) = elements
            .iter()
            .find(|el| el.is_tag("div") && el.has_class(class_name))
        {
            return Some(Region {
                node: *node,
                strategy: RegionStrategy::ContentClass,
            });
        }
    }

    if let Some(node) = heading_container(&elements) {
        return Some(Region {
            node,
            strategy: RegionStrategy::HeadingAncestor,
        });
    }

    let body = if root.is_tag("body") {
        Some(root)
    } else {
        elements.iter().find(|el| el.is_tag("body")).copied()
    };
    body.map(|node| Region {
        node,
        strategy: RegionStrategy::Body,
    })
}

fn heading_container<N: ContentNode>(elements: &[N]) -> Option<N> {
    let heading = elements.iter().find(|el| el.is_tag("h1") || el.is_tag("h2"))?;

    let mut parent = heading.parent_elem();
    while let Some(node) = parent {
        if node.is_tag("body") || node.is_tag("html") {
            break;
        }
        if node.text_len() > MIN_HEADING_CONTAINER_CHARS {
            return Some(node);
        }
        parent = node.parent_elem();
    }
    None
}
