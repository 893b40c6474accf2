//! DOM normalization (generic HTML → regional document convention)
//!
//! This is the heart of the crate: a fixed sequence of structural rewrites
//! that turns the Markdown parser's output into the mainland-Chinese office
//! document shape. The passes run in a fixed order — list conversion must
//! not run before paragraph unwrapping has seen (and skipped) the
//! paragraphs living inside list items.
//!
//! 1. Heading flattening: `h1`..`h6` become `<strong>` text, in place.
//! 2. Paragraph unwrapping: top-level `<p>` becomes an indented block
//!    `<span>`; paragraphs inside `<li>`/`<blockquote>` are left alone.
//! 3. List conversion: `<ul>` becomes `<ol>`, repeated until none remain
//!    at any nesting depth.
//! 4. The body's children are serialized back to an HTML string.
//!
//! Every call parses its own tree and discards it; nothing here is shared
//! across conversions.

use crate::dom;
use crate::error::ConvertError;
use markup5ever_rcdom::Handle;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Inline style given to the block containers that replace paragraphs.
const BLOCK_SPAN_STYLE: &str = "display: block; text-indent: 2em";

/// Apply the full normalization sequence to an HTML fragment.
pub fn normalize_fragment(fragment: &str) -> Result<String, ConvertError> {
    let tree = dom::load_fragment(fragment);
    let body = dom::body(&tree)?;
    flatten_headings(&body)?;
    unwrap_paragraphs(&body)?;
    convert_unordered_lists(&body)?;
    dom::serialize_children(&body)
}

/// Replace every heading with a `<strong>` element carrying the heading's
/// plain text. Inline formatting inside headings is intentionally lost,
/// and no line break is introduced in its place.
fn flatten_headings(body: &Handle) -> Result<(), ConvertError> {
    for heading in dom::query_all(body, |n| dom::is_any_element(n, HEADING_TAGS)) {
        let text = dom::text_content(&heading);
        let bold = dom::create_element("strong", &[]);
        dom::append_child(&bold, dom::create_text(&text));
        dom::replace_node(&heading, bold)?;
    }
    Ok(())
}

/// Replace every top-level paragraph with a block-styled `<span>` carrying
/// the paragraph's children. Paragraphs whose immediate parent is a list
/// item or a blockquote keep their semantic grouping and are skipped.
fn unwrap_paragraphs(body: &Handle) -> Result<(), ConvertError> {
    for paragraph in dom::query_all(body, |n| dom::is_element(n, "p")) {
        if let Some(parent) = dom::parent_of(&paragraph) {
            if dom::is_element(&parent, "li") || dom::is_element(&parent, "blockquote") {
                continue;
            }
        }
        let block = dom::create_element("span", &[("style", BLOCK_SPAN_STYLE)]);
        dom::move_children(&paragraph, &block);
        dom::replace_node(&paragraph, block)?;
    }
    Ok(())
}

/// Replace every unordered list with an ordered list carrying the same
/// children. Moving children preserves node identity, so lists nested
/// inside converted lists stay reachable; the loop re-scans until the
/// tree holds no `<ul>` at any depth.
fn convert_unordered_lists(body: &Handle) -> Result<(), ConvertError> {
    loop {
        let lists = dom::query_all(body, |n| dom::is_element(n, "ul"));
        if lists.is_empty() {
            return Ok(());
        }
        for list in lists {
            let ordered = dom::create_element("ol", &[]);
            dom::move_children(&list, &ordered);
            dom::replace_node(&list, ordered)?;
        }
    }
}
