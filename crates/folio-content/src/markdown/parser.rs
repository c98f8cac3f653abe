//! Markdown → block model conversion using `pulldown-cmark`.
//!
//! The parser walks the `pulldown-cmark` event stream once, keeping a stack
//! of open containers (quotes, lists, list items) and at most one open leaf
//! (paragraph, heading, code block, table). Inline formatting is flattened:
//! emphasis markers disappear, links keep their text, images keep their alt
//! text, inline code keeps its content.
//!
//! # Example
//!
//! ```rust
//! use folio_content::markdown::parser::parse_blocks;
//! use folio_content::Block;
//!
//! let blocks = parse_blocks("## Setup\n\nRun **this** first.");
//! assert_eq!(
//!     blocks,
//!     vec![
//!         Block::Heading { level: 2, text: "Setup".into() },
//!         Block::Paragraph("Run this first.".into()),
//!     ]
//! );
//! ```

use folio_core::Result;
use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::document::{Block, ColumnAlign, Document, Table};
use crate::markdown::frontmatter::extract_frontmatter;

/// Parse a full Markdown document, including optional YAML frontmatter.
pub fn parse_document(source: &str) -> Result<Document> {
    let frontmatter = extract_frontmatter(source)?;
    Ok(Document {
        meta: frontmatter.meta(),
        blocks: parse_blocks(frontmatter.body()),
    })
}

/// Parse Markdown (without frontmatter) into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.handle(event);
    }
    builder.finish()
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

// ============================================================================
// Builder
// ============================================================================

/// An open container that collects child blocks.
enum Frame {
    Root(Vec<Block>),
    Quote(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Item(Vec<Block>),
}

/// An open leaf block collecting text.
enum Leaf {
    Paragraph(String),
    Heading { level: u8, text: String },
    Code { language: Option<String>, text: String },
    Html(String),
    Table(TableState),
}

#[derive(Default)]
struct TableState {
    table: Table,
    row: Vec<String>,
    cell: String,
}

struct BlockBuilder {
    stack: Vec<Frame>,
    leaf: Option<Leaf>,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Root(Vec::new())],
            leaf: None,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) | Event::Code(text) | Event::InlineHtml(text) => {
                self.push_text(&text)
            }
            Event::InlineMath(text) | Event::DisplayMath(text) => self.push_text(&text),
            Event::Html(text) => match &mut self.leaf {
                Some(Leaf::Html(buf)) => buf.push_str(&text),
                _ => self.push_text(&text),
            },
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => {
                self.close_leaf();
                self.push_block(Block::Rule);
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " })
            }
            Event::FootnoteReference(label) => self.push_text(&format!("[{label}]")),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.close_leaf();
                self.leaf = Some(Leaf::Paragraph(String::new()));
            }
            Tag::Heading { level, .. } => {
                self.close_leaf();
                self.leaf = Some(Leaf::Heading {
                    level: heading_depth(level),
                    text: String::new(),
                });
            }
            Tag::CodeBlock(kind) => {
                self.close_leaf();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.leaf = Some(Leaf::Code {
                    language,
                    text: String::new(),
                });
            }
            Tag::HtmlBlock => {
                self.close_leaf();
                self.leaf = Some(Leaf::Html(String::new()));
            }
            Tag::Table(alignments) => {
                self.close_leaf();
                let table = Table {
                    alignments: alignments.into_iter().map(column_align).collect(),
                    ..Table::default()
                };
                self.leaf = Some(Leaf::Table(TableState {
                    table,
                    ..TableState::default()
                }));
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(Leaf::Table(state)) = &mut self.leaf {
                    state.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(Leaf::Table(state)) = &mut self.leaf {
                    state.cell.clear();
                }
            }
            Tag::BlockQuote(_) => {
                self.close_leaf();
                self.stack.push(Frame::Quote(Vec::new()));
            }
            Tag::List(start) => {
                self.close_leaf();
                self.stack.push(Frame::List {
                    start,
                    items: Vec::new(),
                });
            }
            Tag::Item => {
                self.close_leaf();
                self.stack.push(Frame::Item(Vec::new()));
            }
            // Inline containers: their text flows into the current leaf.
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::Table => self.close_leaf(),
            TagEnd::TableHead => {
                if let Some(Leaf::Table(state)) = &mut self.leaf {
                    state.table.header = std::mem::take(&mut state.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(Leaf::Table(state)) = &mut self.leaf {
                    let row = std::mem::take(&mut state.row);
                    state.table.rows.push(row);
                }
            }
            TagEnd::TableCell => {
                if let Some(Leaf::Table(state)) = &mut self.leaf {
                    let cell = std::mem::take(&mut state.cell);
                    state.row.push(cell.trim().to_string());
                }
            }
            TagEnd::BlockQuote(_) => {
                self.close_leaf();
                if let Some(Frame::Quote(blocks)) = self.pop_frame() {
                    self.push_block(Block::Quote(blocks));
                }
            }
            TagEnd::List(_) => {
                self.close_leaf();
                if let Some(Frame::List { start, items }) = self.pop_frame() {
                    self.push_block(Block::List { start, items });
                }
            }
            TagEnd::Item => {
                self.close_leaf();
                if let Some(Frame::Item(blocks)) = self.pop_frame() {
                    self.attach_item(blocks);
                }
            }
            _ => {}
        }
    }

    /// Append inline text to the open leaf, opening an implicit paragraph
    /// for tight list items whose text is not wrapped in a paragraph.
    fn push_text(&mut self, text: &str) {
        match &mut self.leaf {
            Some(Leaf::Paragraph(buf))
            | Some(Leaf::Heading { text: buf, .. })
            | Some(Leaf::Code { text: buf, .. })
            | Some(Leaf::Html(buf)) => buf.push_str(text),
            Some(Leaf::Table(state)) => state.cell.push_str(text),
            None => self.leaf = Some(Leaf::Paragraph(text.to_string())),
        }
    }

    fn close_leaf(&mut self) {
        let Some(leaf) = self.leaf.take() else {
            return;
        };
        let block = match leaf {
            Leaf::Paragraph(text) => {
                let text = tidy_inline(&text);
                if text.is_empty() {
                    return;
                }
                Block::Paragraph(text)
            }
            Leaf::Heading { level, text } => Block::Heading {
                level,
                text: tidy_inline(&text),
            },
            Leaf::Code { language, text } => Block::CodeBlock {
                language,
                text: strip_trailing_newline(text),
            },
            Leaf::Html(text) => Block::CodeBlock {
                language: Some("html".to_string()),
                text: strip_trailing_newline(text),
            },
            Leaf::Table(state) => Block::Table(state.table),
        };
        self.push_block(block);
    }

    fn pop_frame(&mut self) -> Option<Frame> {
        // The root frame is never popped.
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(Frame::Root(blocks)) | Some(Frame::Quote(blocks)) | Some(Frame::Item(blocks)) => {
                blocks.push(block)
            }
            Some(Frame::List { items, .. }) => items.push(vec![block]),
            None => self.stack.push(Frame::Root(vec![block])),
        }
    }

    fn attach_item(&mut self, blocks: Vec<Block>) {
        if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
            items.push(blocks);
            return;
        }
        for block in blocks {
            self.push_block(block);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_leaf();
        // Unwind anything left open by truncated input.
        while self.stack.len() > 1 {
            match self.pop_frame() {
                Some(Frame::Quote(blocks)) => self.push_block(Block::Quote(blocks)),
                Some(Frame::List { start, items }) => self.push_block(Block::List { start, items }),
                Some(Frame::Item(blocks)) => self.attach_item(blocks),
                Some(Frame::Root(blocks)) => {
                    for block in blocks {
                        self.push_block(block);
                    }
                }
                None => break,
            }
        }
        match self.stack.pop() {
            Some(Frame::Root(blocks)) => blocks,
            _ => Vec::new(),
        }
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn column_align(alignment: Alignment) -> ColumnAlign {
    match alignment {
        Alignment::None => ColumnAlign::None,
        Alignment::Left => ColumnAlign::Left,
        Alignment::Center => ColumnAlign::Center,
        Alignment::Right => ColumnAlign::Right,
    }
}

/// Trim each line of inline text, keeping hard breaks.
fn tidy_inline(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn para(s: &str) -> Block {
        Block::Paragraph(s.to_string())
    }

    // ------------------------------------------------------------------------
    // Headings and paragraphs
    // ------------------------------------------------------------------------

    #[test]
    fn test_heading_levels() {
        let blocks = parse_blocks("# One\n## Two\n### Three\n#### Four");
        let levels: Vec<u8> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading { level, .. } => *level,
                _ => 0,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_heading_strips_inline_formatting() {
        let blocks = parse_blocks("# Using `Result` **well**");
        assert_eq!(
            blocks,
            vec![Block::Heading {
                level: 1,
                text: "Using Result well".into()
            }]
        );
    }

    #[test]
    fn test_paragraph_soft_and_hard_breaks() {
        let blocks = parse_blocks("first\nsecond  \nthird");
        assert_eq!(blocks, vec![para("first second\nthird")]);
    }

    #[test]
    fn test_links_keep_text_images_keep_alt() {
        let blocks = parse_blocks("See [docs](https://example.com) and ![logo](a.png).");
        assert_eq!(blocks, vec![para("See docs and logo.")]);
    }

    #[test]
    fn test_cjk_paragraph() {
        let blocks = parse_blocks("# 顧客旅程\n\n這是一段中文。");
        assert_eq!(blocks[1], para("這是一段中文。"));
    }

    // ------------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------------

    #[test]
    fn test_tight_bullet_list() {
        let blocks = parse_blocks("- one\n- two\n* three");
        // `*` after `-` starts a new list
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Block::List {
                start: None,
                items: vec![vec![para("one")], vec![para("two")]],
            }
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let blocks = parse_blocks("3. three\n4. four");
        match &blocks[0] {
            Block::List { start, items } => {
                assert_eq!(*start, Some(3));
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_list() {
        let blocks = parse_blocks("- parent\n  - child\n- sibling");
        assert_eq!(
            blocks,
            vec![Block::List {
                start: None,
                items: vec![
                    vec![
                        para("parent"),
                        Block::List {
                            start: None,
                            items: vec![vec![para("child")]],
                        }
                    ],
                    vec![para("sibling")],
                ],
            }]
        );
    }

    #[test]
    fn test_task_list_markers() {
        let blocks = parse_blocks("- [x] done\n- [ ] todo");
        assert_eq!(
            blocks,
            vec![Block::List {
                start: None,
                items: vec![vec![para("[x] done")], vec![para("[ ] todo")]],
            }]
        );
    }

    // ------------------------------------------------------------------------
    // Code, quotes, rules, html
    // ------------------------------------------------------------------------

    #[test]
    fn test_fenced_code_block_verbatim() {
        let blocks = parse_blocks("```rust title\nfn main() {\n    **not bold**\n}\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: Some("rust".into()),
                text: "fn main() {\n    **not bold**\n}".into(),
            }]
        );
    }

    #[test]
    fn test_indented_code_block() {
        let blocks = parse_blocks("text\n\n    indented\n");
        assert_eq!(
            blocks[1],
            Block::CodeBlock {
                language: None,
                text: "indented".into()
            }
        );
    }

    #[test]
    fn test_quote_and_rule() {
        let blocks = parse_blocks("> quoted\n\n---\n\nafter");
        assert_eq!(
            blocks,
            vec![Block::Quote(vec![para("quoted")]), Block::Rule, para("after")]
        );
    }

    #[test]
    fn test_html_block_kept_verbatim() {
        let blocks = parse_blocks("<div>\nhi\n</div>\n");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: Some("html".into()),
                text: "<div>\nhi\n</div>".into(),
            }]
        );
    }

    // ------------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------------

    #[test]
    fn test_pipe_table() {
        let blocks = parse_blocks("| Name | Qty |\n|:-----|----:|\n| apple | 3 |\n| pear | 10 |");
        assert_eq!(
            blocks,
            vec![Block::Table(Table {
                alignments: vec![ColumnAlign::Left, ColumnAlign::Right],
                header: vec!["Name".into(), "Qty".into()],
                rows: vec![
                    vec!["apple".into(), "3".into()],
                    vec!["pear".into(), "10".into()],
                ],
            })]
        );
    }

    #[test]
    fn test_table_cells_strip_formatting() {
        let blocks = parse_blocks("| **A** | `b` |\n|---|---|\n| [c](x) | d |");
        match &blocks[0] {
            Block::Table(t) => {
                assert_eq!(t.header, vec!["A", "b"]);
                assert_eq!(t.rows[0], vec!["c", "d"]);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    // ------------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_document_with_frontmatter() {
        let doc = parse_document("---\ntitle: STP Analysis\n---\n# Segments\n").unwrap();
        assert_eq!(doc.meta.title.as_deref(), Some("STP Analysis"));
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: 1,
                text: "Segments".into()
            }]
        );
    }

    #[test]
    fn test_leading_rule_and_setext_heading_are_kept() {
        let doc = parse_document("---\nIntro paragraph\n---\n\nBody").unwrap();
        assert_eq!(doc.meta.title, None);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Rule,
                Block::Heading {
                    level: 2,
                    text: "Intro paragraph".into()
                },
                para("Body"),
            ]
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_document("").unwrap();
        assert!(doc.blocks.is_empty());
        assert!(parse_blocks("   \n\n  ").is_empty());
    }
}
