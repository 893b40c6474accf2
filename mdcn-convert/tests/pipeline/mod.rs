//! End-to-end pipeline tests (Markdown → styled HTML → DOCX)

use mdcn_convert::dom;
use mdcn_convert::{
    markdown_to_all, markdown_to_docx, markdown_to_html, markdown_to_html_with_options,
    ConversionOptions,
};

fn body_of(html: &str) -> (markup5ever_rcdom::RcDom, markup5ever_rcdom::Handle) {
    let tree = dom::load_fragment(html);
    let body = dom::body(&tree).unwrap();
    (tree, body)
}

#[test]
fn end_to_end_scenario_matches_the_convention() {
    let html = markdown_to_html("# Title\n\nSome text.\n\n- a\n- b").unwrap();
    let (_tree, body) = body_of(&html);

    // No heading elements anywhere.
    for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        assert!(dom::query_all(&body, |n| dom::is_element(n, tag)).is_empty());
    }

    // The heading text survived as bold inline content.
    let bold = dom::query_all(&body, |n| dom::is_element(n, "strong"));
    assert_eq!(bold.len(), 1);
    assert_eq!(dom::text_content(&bold[0]), "Title");

    // The paragraph became a block-level span, not a <p>.
    let spans = dom::query_all(&body, |n| dom::is_element(n, "span"));
    assert!(spans
        .iter()
        .any(|s| dom::text_content(s).contains("Some text.")));
    assert!(dom::query_all(&body, |n| dom::is_element(n, "p")).is_empty());

    // The unordered list became an ordered list with both items.
    assert!(dom::query_all(&body, |n| dom::is_element(n, "ul")).is_empty());
    let lists = dom::query_all(&body, |n| dom::is_element(n, "ol"));
    assert_eq!(lists.len(), 1);
    let items = dom::query_all(&lists[0], |n| dom::is_element(n, "li"));
    assert_eq!(items.len(), 2);
    assert_eq!(dom::text_content(&items[0]).trim(), "a");
    assert_eq!(dom::text_content(&items[1]).trim(), "b");
}

#[test]
fn blockquote_paragraphs_survive_the_whole_pipeline() {
    let html = markdown_to_html("> a quoted paragraph\n").unwrap();
    let (_tree, body) = body_of(&html);
    let paragraphs = dom::query_all(&body, |n| dom::is_element(n, "p"));
    assert_eq!(paragraphs.len(), 1);
    let parent = dom::parent_of(&paragraphs[0]).unwrap();
    assert!(dom::is_element(&parent, "blockquote"));
}

#[test]
fn paragraphs_outside_lists_and_quotes_never_survive() {
    let markdown = "Intro.\n\n> quote\n\n- first\n\n- second\n\nOutro.\n";
    let html = markdown_to_html(markdown).unwrap();
    let (_tree, body) = body_of(&html);
    for paragraph in dom::query_all(&body, |n| dom::is_element(n, "p")) {
        let parent = dom::parent_of(&paragraph).unwrap();
        assert!(
            dom::is_element(&parent, "li") || dom::is_element(&parent, "blockquote"),
            "paragraph survived outside li/blockquote"
        );
    }
}

#[test]
fn styled_output_is_self_contained() {
    let html = markdown_to_html("Some text.\n").unwrap();
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<title>转换文档</title>"));
    assert!(html.contains("SimSun"));
    assert!(!html.contains("<link"));
}

#[test]
fn title_option_reaches_the_document() {
    let options = ConversionOptions {
        title: "报告".to_string(),
        ..Default::default()
    };
    let html = markdown_to_html_with_options("text\n", &options).unwrap();
    assert!(html.contains("<title>报告</title>"));
}

#[test]
fn all_returns_the_exact_html_the_docx_came_from() {
    let markdown = "# Title\n\nSome text.\n\n- a\n- b\n";
    let options = ConversionOptions::default();
    let artifacts = markdown_to_all(markdown, &options).unwrap();
    let html = markdown_to_html_with_options(markdown, &options).unwrap();
    assert_eq!(artifacts.html, html);
    assert!(artifacts.docx.starts_with(b"PK"));
}

#[test]
fn docx_is_produced_for_rich_documents() {
    let markdown = "\
# Heading

Opening paragraph with **bold** and *italic* and `code`.

- one
- two
  - nested

> a quote

```
let x = 1;
let y = 2;
```

| a | b |
|---|---|
| 1 | 2 |
";
    let bytes = markdown_to_docx(markdown, &ConversionOptions::default()).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(bytes.len() > 1000);
}

#[test]
fn repeated_conversions_are_independent() {
    let first = markdown_to_html("# A\n").unwrap();
    let second = markdown_to_html("# A\n").unwrap();
    assert_eq!(first, second);
}
