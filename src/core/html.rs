// src/core/html.rs
use scraper::{ ElementRef, Node };

/// Text of each direct child node of `el`, trimmed, empties dropped.
///
/// A text child contributes its own text; an element child contributes all of
/// its descendant text as one fragment. Comments and other nodes contribute
/// nothing.
pub fn direct_fragments(el: ElementRef<'_>) -> Vec<String> {
    el.children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(text.trim().to_string()),
            Node::Element(_) => ElementRef::wrap(child)
                .map(|inner| inner.text().collect::<String>().trim().to_string()),
            _ => None,
        })
        .filter(|frag| !frag.is_empty())
        .collect()
}
