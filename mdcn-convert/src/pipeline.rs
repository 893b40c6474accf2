//! Pipeline orchestration (Markdown → HTML → DOCX)
//!
//! Sequences the stages: Markdown parsing, DOM normalization, style
//! injection and, for the Word outputs, DOCX serialization. Each function
//! is a pure transformation of its input and options — persistence and
//! logging belong to the callers (the CLI, or whatever embeds the crate).
//!
//! `markdown_to_all` derives the Word document from the very HTML string it
//! returns, so the two artifacts can never drift apart.

use crate::docx;
use crate::error::ConvertError;
use crate::markdown;
use crate::normalize;
use crate::style;
use url::Url;

/// Title used for the HTML document when the caller does not override it.
pub const DEFAULT_TITLE: &str = "转换文档";

/// Regional-convention page margins, twentieths of a point (1 inch each).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Margins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 1440,
            right: 1440,
            bottom: 1440,
            left: 1440,
        }
    }
}

/// Options for a conversion run. The defaults are the regional convention:
/// SimSun at 12pt (24 half-points), 1-inch margins, page numbers on.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    /// Title of the generated HTML document.
    pub title: String,
    /// Page margins in twentieths of a point.
    pub margin: Margins,
    /// Font family applied document-wide (ascii, hi-ansi and east-asia).
    pub font: String,
    /// Default font size in half-points.
    pub font_size: usize,
    /// Whether the Word document carries page numbers in its footer.
    pub page_number: bool,
    /// Base URL for resolving relative references while inlining CSS.
    pub base_url: Option<Url>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            margin: Margins::default(),
            font: "SimSun".to_string(),
            font_size: 24,
            page_number: true,
            base_url: None,
        }
    }
}

/// Both artifacts of one conversion, produced from a single parse.
#[derive(Debug, Clone)]
pub struct ConversionArtifacts {
    /// The binary Word document.
    pub docx: Vec<u8>,
    /// The exact HTML document the Word output was derived from.
    pub html: String,
}

/// Convert Markdown to the final self-contained HTML document, using the
/// default regional options.
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    markdown_to_html_with_options(markdown, &ConversionOptions::default())
}

/// Convert Markdown to the final self-contained HTML document.
pub fn markdown_to_html_with_options(
    markdown: &str,
    options: &ConversionOptions,
) -> Result<String, ConvertError> {
    let fragment = markdown::to_html_fragment(markdown);
    let normalized = normalize::normalize_fragment(&fragment)?;
    style::apply(&normalized, &options.title, options.base_url.clone())
}

/// Convert Markdown to a binary Word document.
pub fn markdown_to_docx(
    markdown: &str,
    options: &ConversionOptions,
) -> Result<Vec<u8>, ConvertError> {
    Ok(markdown_to_all(markdown, options)?.docx)
}

/// Convert Markdown to both artifacts from one parse.
pub fn markdown_to_all(
    markdown: &str,
    options: &ConversionOptions,
) -> Result<ConversionArtifacts, ConvertError> {
    let html = markdown_to_html_with_options(markdown, options)?;
    let docx = docx::from_html(&html, options)?;
    Ok(ConversionArtifacts { docx, html })
}
