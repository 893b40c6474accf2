//! DOCX export built on top of the styled HTML document.
//!
//! The implementation walks the pipeline's final HTML tree into a flat
//! block/segment model, then hands that model to the external
//! WordprocessingML builder. By the time this module runs, the normalizer
//! has already removed headings, top-level paragraphs and unordered lists,
//! so the walker only has to understand the regional-convention shapes:
//! block spans, ordered lists, blockquotes, code blocks and tables.
//!
//! Images are not embedded in the Word output; they survive only in the
//! HTML artifact.

use crate::dom;
use crate::error::ConvertError;
use crate::pipeline::ConversionOptions;
use docx_rs::{
    AbstractNumbering, BreakType, Docx, Footer, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, PageMargin, PageNum, Paragraph, Run, RunFonts,
    SpecialIndentType, Start, Table, TableCell, TableRow,
};
use markup5ever_rcdom::{Handle, NodeData};
use std::io::Cursor;

const LIST_NUMBERING_ID: usize = 1;
const MAX_LIST_DEPTH: usize = 6;
const QUOTE_INDENT_TWIPS: i32 = 720;
const MONOSPACE_FONT: &str = "Courier New";

/// Character formatting accumulated while descending inline markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunStyle {
    bold: bool,
    italic: bool,
    strike: bool,
    code: bool,
    underline: bool,
}

#[derive(Debug, Clone)]
enum Segment {
    Text { text: String, style: RunStyle },
    Break,
}

#[derive(Debug, Clone)]
enum Block {
    Paragraph {
        segments: Vec<Segment>,
        first_line_indent: bool,
    },
    ListItem {
        segments: Vec<Segment>,
        level: usize,
    },
    Quote {
        segments: Vec<Segment>,
    },
    Code {
        text: String,
    },
    Table {
        rows: Vec<Vec<Vec<Segment>>>,
    },
}

/// Convert a final (normalized, inlined) HTML document to DOCX bytes.
pub fn from_html(html: &str, options: &ConversionOptions) -> Result<Vec<u8>, ConvertError> {
    let tree = dom::load_fragment(html);
    let body = dom::body(&tree)?;
    let blocks = collect_blocks(&body);
    build_document(&blocks, options)
}

fn collect_blocks(body: &Handle) -> Vec<Block> {
    let mut collector = BlockCollector::default();
    collector.walk_container(body);
    collector.finish()
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<Block>,
    /// Loose inline content waiting for the next block boundary.
    pending: Vec<Segment>,
}

impl BlockCollector {
    fn walk_container(&mut self, node: &Handle) {
        for child in node.children.borrow().iter() {
            self.walk_node(child);
        }
    }

    fn walk_node(&mut self, node: &Handle) {
        match &node.data {
            NodeData::Text { contents } => {
                let text = contents.borrow().replace('\n', " ");
                if !text.trim().is_empty() {
                    self.pending.push(Segment::Text {
                        text,
                        style: RunStyle::default(),
                    });
                }
            }
            NodeData::Element { .. } => self.walk_element(node),
            _ => {}
        }
    }

    fn walk_element(&mut self, node: &Handle) {
        let name = dom::element_name(node).unwrap_or_default();
        match name.as_str() {
            "span" if is_block_span(node) => {
                self.flush();
                self.blocks.push(Block::Paragraph {
                    segments: inline_segments(node),
                    first_line_indent: has_text_indent(node),
                });
            }
            "p" | "div" => {
                self.flush();
                self.blocks.push(Block::Paragraph {
                    segments: inline_segments(node),
                    first_line_indent: false,
                });
            }
            "ol" | "ul" => {
                self.flush();
                self.walk_list(node, 0);
            }
            "blockquote" => {
                self.flush();
                for child in node.children.borrow().iter() {
                    if dom::is_element(child, "p") {
                        self.blocks.push(Block::Quote {
                            segments: inline_segments(child),
                        });
                    } else {
                        self.walk_node(child);
                    }
                }
                self.flush();
            }
            "pre" => {
                self.flush();
                let text = dom::text_content(node);
                self.blocks.push(Block::Code {
                    text: text.trim_end_matches('\n').to_string(),
                });
            }
            "table" => {
                self.flush();
                self.walk_table(node);
            }
            "img" | "hr" => {
                self.flush();
            }
            _ => append_inline(node, RunStyle::default(), &mut self.pending),
        }
    }

    /// Ordered lists only: the normalizer has already converted every `ul`.
    /// The `ul` arm above keeps the walker total over raw caller HTML.
    fn walk_list(&mut self, list: &Handle, level: usize) {
        for item in list.children.borrow().iter() {
            if !dom::is_element(item, "li") {
                continue;
            }
            let mut segments = Vec::new();
            let mut nested = Vec::new();
            for child in item.children.borrow().iter() {
                if dom::is_element(child, "ol") || dom::is_element(child, "ul") {
                    nested.push(child.clone());
                } else {
                    append_inline(child, RunStyle::default(), &mut segments);
                }
            }
            if !segments.is_empty() {
                self.blocks.push(Block::ListItem { segments, level });
            }
            for sublist in nested {
                self.walk_list(&sublist, level + 1);
            }
        }
    }

    fn walk_table(&mut self, table: &Handle) {
        let mut rows = Vec::new();
        for row in dom::query_all(table, |n| dom::is_element(n, "tr")) {
            let mut cells = Vec::new();
            for cell in row.children.borrow().iter() {
                if dom::is_element(cell, "th") || dom::is_element(cell, "td") {
                    cells.push(inline_segments(cell));
                }
            }
            if !cells.is_empty() {
                rows.push(cells);
            }
        }
        if !rows.is_empty() {
            self.blocks.push(Block::Table { rows });
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let segments = std::mem::take(&mut self.pending);
        self.blocks.push(Block::Paragraph {
            segments,
            first_line_indent: false,
        });
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

fn inline_segments(node: &Handle) -> Vec<Segment> {
    let mut segments = Vec::new();
    for child in node.children.borrow().iter() {
        append_inline(child, RunStyle::default(), &mut segments);
    }
    segments
}

fn append_inline(node: &Handle, style: RunStyle, out: &mut Vec<Segment>) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow().replace('\n', " ");
            if !text.is_empty() {
                out.push(Segment::Text { text, style });
            }
        }
        NodeData::Element { name, .. } => {
            let mut inherited = style;
            match &*name.local {
                "strong" | "b" => inherited.bold = true,
                "em" | "i" => inherited.italic = true,
                "del" | "s" | "strike" => inherited.strike = true,
                "code" => inherited.code = true,
                "a" | "u" => inherited.underline = true,
                "br" => {
                    out.push(Segment::Break);
                    return;
                }
                "img" => return,
                "input" => {
                    // Task-list checkboxes render as their bracket form.
                    let mark = if dom::attribute(node, "checked").is_some() {
                        "[x] "
                    } else {
                        "[ ] "
                    };
                    out.push(Segment::Text {
                        text: mark.to_string(),
                        style,
                    });
                    return;
                }
                _ => {}
            }
            for child in node.children.borrow().iter() {
                append_inline(child, inherited, out);
            }
        }
        _ => {}
    }
}

fn is_block_span(node: &Handle) -> bool {
    dom::is_element(node, "span")
        && dom::attribute(node, "style")
            .map(|style| style.replace(' ', "").contains("display:block"))
            .unwrap_or(false)
}

fn has_text_indent(node: &Handle) -> bool {
    dom::attribute(node, "style")
        .map(|style| style.replace(' ', "").contains("text-indent"))
        .unwrap_or(false)
}

fn build_document(blocks: &[Block], options: &ConversionOptions) -> Result<Vec<u8>, ConvertError> {
    let margin = &options.margin;
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(margin.top)
                .right(margin.right)
                .bottom(margin.bottom)
                .left(margin.left),
        )
        .default_fonts(
            RunFonts::new()
                .ascii(&options.font)
                .hi_ansi(&options.font)
                .east_asia(&options.font),
        )
        .default_size(options.font_size);

    if blocks.iter().any(|b| matches!(b, Block::ListItem { .. })) {
        docx = docx
            .add_abstract_numbering(decimal_numbering())
            .add_numbering(Numbering::new(LIST_NUMBERING_ID, LIST_NUMBERING_ID));
    }

    if options.page_number {
        docx = docx.footer(Footer::new().add_paragraph(Paragraph::new().add_page_num(PageNum::new())));
    }

    for block in blocks {
        docx = match block {
            Block::Paragraph {
                segments,
                first_line_indent,
            } => docx.add_paragraph(paragraph_from(segments, *first_line_indent, options)),
            Block::ListItem { segments, level } => {
                let depth = (*level).min(MAX_LIST_DEPTH - 1);
                docx.add_paragraph(
                    paragraph_from(segments, false, options)
                        .numbering(NumberingId::new(LIST_NUMBERING_ID), IndentLevel::new(depth)),
                )
            }
            Block::Quote { segments } => docx.add_paragraph(
                paragraph_from(segments, false, options).indent(
                    Some(QUOTE_INDENT_TWIPS),
                    None,
                    None,
                    None,
                ),
            ),
            Block::Code { text } => docx.add_paragraph(code_paragraph(text)),
            Block::Table { rows } => docx.add_table(table_from(rows, options)),
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ConvertError::SerializationError(format!("DOCX packing failed: {e}")))?;
    Ok(buffer.into_inner())
}

fn decimal_numbering() -> AbstractNumbering {
    let mut numbering = AbstractNumbering::new(LIST_NUMBERING_ID);
    for level in 0..MAX_LIST_DEPTH {
        numbering = numbering.add_level(
            Level::new(
                level,
                Start::new(1),
                NumberFormat::new("decimal"),
                LevelText::new(format!("%{}.", level + 1)),
                LevelJc::new("left"),
            )
            .indent(
                Some(((level + 1) * 420) as i32),
                Some(SpecialIndentType::Hanging(420)),
                None,
                None,
            ),
        );
    }
    numbering
}

fn paragraph_from(
    segments: &[Segment],
    first_line_indent: bool,
    options: &ConversionOptions,
) -> Paragraph {
    let mut paragraph = Paragraph::new();
    for segment in segments {
        paragraph = match segment {
            Segment::Text { text, style } => {
                paragraph.add_run(styled_run(text, *style, options))
            }
            Segment::Break => paragraph.add_run(Run::new().add_break(BreakType::TextWrapping)),
        };
    }
    if first_line_indent {
        // 2em at the document font size: half-points * 20 twips.
        let indent = (options.font_size * 20) as i32;
        paragraph = paragraph.indent(None, Some(SpecialIndentType::FirstLine(indent)), None, None);
    }
    paragraph
}

fn styled_run(text: &str, style: RunStyle, options: &ConversionOptions) -> Run {
    let mut run = Run::new().add_text(text);
    if style.bold {
        run = run.bold();
    }
    if style.italic {
        run = run.italic();
    }
    if style.strike {
        run = run.strike();
    }
    if style.underline {
        run = run.underline("single");
    }
    if style.code {
        run = run.fonts(
            RunFonts::new()
                .ascii(MONOSPACE_FONT)
                .hi_ansi(MONOSPACE_FONT)
                .east_asia(&options.font),
        );
    }
    run
}

fn code_paragraph(text: &str) -> Paragraph {
    let mut run = Run::new().fonts(RunFonts::new().ascii(MONOSPACE_FONT).hi_ansi(MONOSPACE_FONT));
    for (index, line) in text.lines().enumerate() {
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new().add_run(run)
}

fn table_from(rows: &[Vec<Vec<Segment>>], options: &ConversionOptions) -> Table {
    let table_rows = rows
        .iter()
        .map(|cells| {
            TableRow::new(
                cells
                    .iter()
                    .map(|segments| {
                        TableCell::new().add_paragraph(paragraph_from(segments, false, options))
                    })
                    .collect(),
            )
        })
        .collect();
    Table::new(table_rows)
}
