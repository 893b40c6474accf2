//! Markdown parsing (Markdown → HTML fragment)
//!
//! The Markdown stage is delegated entirely to `comrak`; this module only
//! pins the parser configuration. The resulting fragment is a forest of
//! HTML nodes, not a full document — the normalizer supplies the shell.

use comrak::ComrakOptions;

/// Render a Markdown source string to an HTML fragment.
pub fn to_html_fragment(source: &str) -> String {
    comrak::markdown_to_html(source, &parser_options())
}

fn parser_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options.extension.shortcodes = true;
    // Raw HTML embedded in the Markdown passes through to the fragment.
    options.render.unsafe_ = true;
    options
}
