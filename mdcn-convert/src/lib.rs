//! Markdown → mainland-Chinese styled HTML and Word documents
//!
//!     This crate converts Markdown source into a DOCX document and an
//!     intermediate HTML representation styled to the mainland-Chinese
//!     office convention: headings as bold inline text, paragraphs as
//!     indented block spans, unordered lists normalized to ordered lists,
//!     SimSun typography, 1-inch margins, all CSS inlined.
//!
//!     This is a pure lib, that is, it powers the mdcn CLI but is shell
//!     agnostic: no code here reads files, writes files or prints. The
//!     entry adapters own the I/O.
//!
//! Architecture
//!
//!     The pipeline is a straight line, each stage a pure function of its
//!     input and the conversion options:
//!
//!     Markdown text → comrak → HTML fragment → normalizer → normalized
//!     fragment → style injector → final HTML document → (optionally)
//!     DOCX serializer → binary document
//!
//!     The file structure:
//!     .
//!     ├── error.rs       # ConvertError
//!     ├── markdown.rs    # Markdown parser collaborator (comrak)
//!     ├── dom.rs         # HTML tree capability layer (html5ever + rcdom)
//!     ├── normalize.rs   # The structural rewrites (the core)
//!     ├── style.rs       # Document shell + CSS inlining
//!     ├── docx.rs        # DOCX serializer adapter (docx-rs)
//!     ├── pipeline.rs    # Orchestration and options
//!     └── lib.rs
//!
//! Library Choices
//!
//!     Everything that is not the normalization itself is offloaded to
//!     specialized crates: comrak parses Markdown (tables, strikethrough,
//!     task lists, autolinks and emoji shortcodes enabled), html5ever and
//!     markup5ever_rcdom carry the mutable tree, css-inline folds the
//!     embedded stylesheet into style attributes, and docx-rs emits the
//!     WordprocessingML package. We never hand-roll a parser or an OOXML
//!     writer here; the value of the crate is the sequence of tree
//!     rewrites in normalize.rs, and that is where the tests concentrate.
//!
//! Conversion Semantics
//!
//!     The transform is deliberately lossy: heading hierarchy is discarded
//!     (every heading becomes bold text in place), paragraphs lose their
//!     element identity outside list items and blockquotes, and unordered
//!     lists lose their bullet style. Running the normalizer on its own
//!     output changes nothing — there is nothing left for it to rewrite.

pub mod docx;
pub mod dom;
pub mod error;
pub mod markdown;
pub mod normalize;
pub mod pipeline;
pub mod style;

pub use error::ConvertError;
pub use pipeline::{
    markdown_to_all, markdown_to_docx, markdown_to_html, markdown_to_html_with_options,
    ConversionArtifacts, ConversionOptions, Margins, DEFAULT_TITLE,
};
