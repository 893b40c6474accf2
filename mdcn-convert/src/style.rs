//! Style injection (normalized fragment → self-contained HTML document)
//!
//! Wraps the normalized fragment in a minimal document shell, embeds the
//! reset stylesheet plus the SimSun base rule, then inlines every CSS rule
//! onto the matching elements' `style` attributes so the output renders
//! identically in consumers that ignore stylesheets (the Word importer
//! being the one that matters). The reset CSS is compiled into the binary;
//! nothing is read from disk at conversion time.

use crate::error::ConvertError;
use css_inline::CSSInliner;
use url::Url;

const MINIRESET_CSS: &str = include_str!("../assets/minireset.css");

/// Base typography for the regional convention: a serif CJK font and a
/// fixed line height.
const BODY_CSS: &str = "body { font-family: SimSun, serif; line-height: 22pt; }";

/// Wrap a fragment in a complete document shell and inline all CSS.
///
/// `base_url` resolves relative references during inlining; command-line
/// callers pass the input file's directory as a `file://` URL, in-memory
/// callers pass `None`.
pub fn apply(fragment: &str, title: &str, base_url: Option<Url>) -> Result<String, ConvertError> {
    let document = build_document(fragment, title);
    inline_styles(&document, base_url)
}

/// Wrap the normalized fragment in a document shell with the embedded
/// stylesheet. The output still carries a `<style>` tag; [`inline_styles`]
/// folds it away.
pub fn build_document(fragment: &str, title: &str) -> String {
    let escaped_title = html_escape(title);
    format!(
        r#"<html>
  <head>
    <meta charset="UTF-8">
    <title>{escaped_title}</title>
    <style>
{MINIRESET_CSS}
{BODY_CSS}
    </style>
  </head>
  <body>{fragment}</body>
</html>"#
    )
}

/// Inline every stylesheet rule onto matching elements' `style` attributes.
pub fn inline_styles(html: &str, base_url: Option<Url>) -> Result<String, ConvertError> {
    let inliner = CSSInliner::options()
        .base_url(base_url)
        .load_remote_stylesheets(false)
        .build();
    inliner
        .inline(html)
        .map_err(|e| ConvertError::StyleInliningError(e.to_string()))
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
