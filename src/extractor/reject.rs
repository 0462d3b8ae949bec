use crate::extractor::tree::ContentNode;

const MAX_NAV_LINK_RATIO: f64 = 0.8;
const MAX_NAV_ITEM_CHARS: f64 = 50.0;

/// Classifies an `ul`/`ol` as navigation: mostly linked items that are short.
///
/// Lists without items, and anything that is not a list, are never navigation.
pub fn is_navigation_list<N: ContentNode>(list: N) -> bool {
    if !(list.is_tag("ul") || list.is_tag("ol")) {
        return false;
    }

    let items: Vec<N> = list
        .descendant_elems()
        .into_iter()
        .filter(|el| el.is_tag("li"))
        .collect();
    if items.is_empty() {
        return false;
    }

    let linked = items.iter().filter(|li| li.find_first(&["a"]).is_some()).count();
    let total_chars: usize = items.iter().map(|li| li.text_len()).sum();

    let link_ratio = linked as f64 / items.len() as f64;
    let avg_chars = total_chars as f64 / items.len() as f64;

    link_ratio > MAX_NAV_LINK_RATIO && avg_chars < MAX_NAV_ITEM_CHARS
}
