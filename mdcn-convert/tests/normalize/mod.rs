//! Normalization tests (HTML fragment → regional convention)
//!
//! These tests verify the structural guarantees of the normalizer by
//! re-parsing its output and counting elements, rather than matching
//! serialized strings.

use markup5ever_rcdom::{Handle, RcDom};
use mdcn_convert::dom;
use mdcn_convert::markdown;
use mdcn_convert::normalize::normalize_fragment;
use proptest::prelude::*;

/// Parse normalized output and count elements with the given tag.
fn count_elements(html: &str, tag: &str) -> usize {
    let tree = dom::load_fragment(html);
    let body = dom::body(&tree).unwrap();
    dom::query_all(&body, |n| dom::is_element(n, tag)).len()
}

/// Parse normalized output and collect elements with the given tag. The
/// tree is returned alongside the handles to keep ancestors alive.
fn elements(html: &str, tag: &str) -> (RcDom, Vec<Handle>) {
    let tree = dom::load_fragment(html);
    let body = dom::body(&tree).unwrap();
    let found = dom::query_all(&body, |n| dom::is_element(n, tag));
    (tree, found)
}

fn normalize_markdown(source: &str) -> String {
    normalize_fragment(&markdown::to_html_fragment(source)).unwrap()
}

#[test]
fn headings_leave_no_heading_elements() {
    let html = normalize_markdown("# One\n\n## Two\n\n###### Six\n");
    for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        assert_eq!(count_elements(&html, tag), 0, "{tag} survived normalization");
    }
    let (_tree, bold) = elements(&html, "strong");
    assert_eq!(bold.len(), 3);
    assert_eq!(dom::text_content(&bold[0]), "One");
    assert_eq!(dom::text_content(&bold[1]), "Two");
    assert_eq!(dom::text_content(&bold[2]), "Six");
}

#[test]
fn heading_inline_formatting_is_lost() {
    let html = normalize_markdown("# Plain *styled* [link](https://example.com)\n");
    let (_tree, bold) = elements(&html, "strong");
    assert_eq!(bold.len(), 1);
    assert_eq!(dom::text_content(&bold[0]), "Plain styled link");
    assert_eq!(count_elements(&html, "em"), 0);
    assert_eq!(count_elements(&html, "a"), 0);
}

#[test]
fn top_level_paragraphs_are_unwrapped() {
    let html = normalize_markdown("First paragraph.\n\nSecond paragraph.\n");
    assert_eq!(count_elements(&html, "p"), 0);
    let (_tree, spans) = elements(&html, "span");
    assert_eq!(spans.len(), 2);
    let style = dom::attribute(&spans[0], "style").unwrap();
    assert!(style.contains("display: block"));
    assert!(style.contains("text-indent: 2em"));
}

#[test]
fn paragraph_inline_markup_is_preserved() {
    let html = normalize_markdown("Some **bold** and `code` text.\n");
    assert_eq!(count_elements(&html, "strong"), 1);
    assert_eq!(count_elements(&html, "code"), 1);
}

#[test]
fn blockquote_paragraphs_keep_their_parent() {
    let html = normalize_markdown("> quoted words\n");
    let (_tree, paragraphs) = elements(&html, "p");
    assert_eq!(paragraphs.len(), 1);
    let parent = dom::parent_of(&paragraphs[0]).unwrap();
    assert!(dom::is_element(&parent, "blockquote"));
}

#[test]
fn list_item_paragraphs_keep_their_parent() {
    // A blank line between items makes comrak emit a loose list with
    // paragraph-wrapped items.
    let html = normalize_markdown("- first\n\n- second\n");
    let (_tree, paragraphs) = elements(&html, "p");
    assert_eq!(paragraphs.len(), 2);
    for paragraph in &paragraphs {
        let parent = dom::parent_of(paragraph).unwrap();
        assert!(dom::is_element(&parent, "li"));
    }
}

#[test]
fn unordered_lists_become_ordered_everywhere() {
    let html = normalize_markdown("- a\n- b\n  - b1\n  - b2\n- c\n");
    assert_eq!(count_elements(&html, "ul"), 0);
    assert_eq!(count_elements(&html, "ol"), 2);
    assert_eq!(count_elements(&html, "li"), 5);
}

#[test]
fn list_item_text_is_preserved() {
    let html = normalize_markdown("- alpha\n- beta\n");
    let (_tree, items) = elements(&html, "li");
    assert_eq!(items.len(), 2);
    assert_eq!(dom::text_content(&items[0]).trim(), "alpha");
    assert_eq!(dom::text_content(&items[1]).trim(), "beta");
}

#[test]
fn normalization_is_idempotent() {
    let once = normalize_markdown("# Title\n\nText here.\n\n- a\n- b\n\n> quote\n");
    let twice = normalize_fragment(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn empty_input_normalizes_to_empty_output() {
    assert_eq!(normalize_fragment("").unwrap(), "");
}

proptest! {
    /// Unordered lists vanish at every nesting depth, and the item count
    /// survives the conversion. Guards the single-pass traversal pitfall:
    /// a forward walk that never revisits substituted subtrees can strand
    /// deeply nested lists.
    #[test]
    fn nested_lists_reach_a_fixed_point(depth in 1usize..6) {
        let mut source = String::new();
        for level in 0..depth {
            source.push_str(&"  ".repeat(level));
            source.push_str(&format!("- item{level}\n"));
        }
        let html = normalize_markdown(&source);
        prop_assert_eq!(count_elements(&html, "ul"), 0);
        prop_assert_eq!(count_elements(&html, "ol"), depth);
        prop_assert_eq!(count_elements(&html, "li"), depth);
        for level in 0..depth {
            let needle = format!("item{}", level);
            prop_assert!(html.contains(&needle));
        }
    }
}
