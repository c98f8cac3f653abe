//! Page layout: turns a [`Document`] into positioned draw operations.
//!
//! Layout is a single top-to-bottom pass. Every line reserves its leading
//! from a cursor that starts at the top margin. When a line no longer fits
//! above the bottom margin a new page is started. Nothing is ever moved
//! back, so the result depends only on the document, the styles and the
//! font metrics.
//!
//! Body text is wrapped with the body font's advances. Code blocks, tables
//! and raw HTML are laid out on a monospace grid so that columns stay
//! aligned even when individual cells are drawn from the Unicode font.

pub mod wrap;

use folio_content::{Block, Document};

use crate::Result;
use crate::font::builtin::COURIER_ADVANCE;
use crate::font::{FontRole, FontSet};
use crate::style::{PageSetup, StyleSheet, TextStyle};

pub use wrap::{GridCell, expand_tabs, grid_rows, wrap_text};

/// Baseline position inside a line box, as a fraction of the leading.
const BASELINE_RATIO: f32 = 0.8;

/// Gap between a list marker and the item text.
const MARKER_GAP: f32 = 3.0;

/// A positioned drawing instruction, in PDF user space (origin bottom left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Draw `text` with its baseline starting at (`x`, `y`).
    Text {
        /// Left edge.
        x: f32,
        /// Baseline.
        y: f32,
        /// Which font to draw with.
        role: FontRole,
        /// Font size in points.
        size: f32,
        /// Text, already checked against the font.
        text: String,
    },
    /// Horizontal line from `x1` to `x2` at height `y`.
    Rule {
        /// Start.
        x1: f32,
        /// End.
        x2: f32,
        /// Height.
        y: f32,
        /// Stroke width.
        width: f32,
    },
}

/// Draw operations for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Operations in drawing order.
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Whether nothing is drawn on this page.
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    /// Concatenated text of the page, one line per text operation.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rule { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lay `doc` out into pages. Always returns at least one page.
///
/// Fails with [`Error::UnsupportedGlyph`](crate::Error::UnsupportedGlyph)
/// when the text contains a character the fonts cannot show and the
/// missing-glyph policy is `error`.
pub fn layout(
    doc: &Document,
    setup: &PageSetup,
    styles: &StyleSheet,
    fonts: &FontSet,
) -> Result<Vec<Page>> {
    let mut layouter = Layouter::new(setup, styles, fonts);
    layouter.blocks(&doc.blocks, 0.0, false)?;
    Ok(layouter.finish())
}

/// A list marker waiting for the first line of its item.
struct Marker {
    text: String,
    x: f32,
    size: f32,
}

struct Layouter<'a> {
    setup: &'a PageSetup,
    styles: &'a StyleSheet,
    fonts: &'a FontSet,
    pages: Vec<Page>,
    page: Page,
    cursor: f32,
    fresh: bool,
    marker: Option<Marker>,
}

impl<'a> Layouter<'a> {
    fn new(setup: &'a PageSetup, styles: &'a StyleSheet, fonts: &'a FontSet) -> Self {
        Self {
            setup,
            styles,
            fonts,
            pages: Vec::new(),
            page: Page::default(),
            cursor: setup.top(),
            fresh: true,
            marker: None,
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if let Some(marker) = self.marker.take() {
            let leading = self.styles.body.leading;
            self.place_marker_line(marker, leading);
        }
        self.pages.push(self.page);
        log::debug!("Laid out {} page(s)", self.pages.len());
        self.pages
    }

    // ------------------------------------------------------------------------
    // Vertical flow
    // ------------------------------------------------------------------------

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.page);
        self.pages.push(page);
        self.cursor = self.setup.top();
        self.fresh = true;
    }

    /// Reserve a line box and return its baseline. A pending list marker
    /// is drawn on that baseline.
    fn line(&mut self, leading: f32) -> f32 {
        if !self.fresh && self.cursor - leading < self.setup.bottom() {
            self.new_page();
        }
        let baseline = self.cursor - leading * BASELINE_RATIO;
        self.cursor -= leading;
        self.fresh = false;

        if let Some(marker) = self.marker.take() {
            self.page.ops.push(DrawOp::Text {
                x: marker.x,
                y: baseline,
                role: FontRole::Body,
                size: marker.size,
                text: marker.text,
            });
        }
        baseline
    }

    /// Vertical space after a block. Dropped at the top of a page.
    fn gap(&mut self, space: f32) {
        if !self.fresh {
            self.cursor -= space;
        }
    }

    fn place_marker_line(&mut self, marker: Marker, leading: f32) {
        self.marker = Some(marker);
        self.line(leading);
    }

    fn set_marker(&mut self, marker: Marker) {
        // An item that starts with a nested list gets its own line first.
        if let Some(pending) = self.marker.take() {
            let leading = self.styles.body.leading;
            self.place_marker_line(pending, leading);
        }
        self.marker = Some(marker);
    }

    fn text(&mut self, x: f32, y: f32, role: FontRole, size: f32, text: String) {
        self.page.ops.push(DrawOp::Text {
            x,
            y,
            role,
            size,
            text,
        });
    }

    // ------------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------------

    fn blocks(&mut self, blocks: &[Block], indent: f32, tight: bool) -> Result<()> {
        for block in blocks {
            self.block(block, indent, tight)?;
        }
        Ok(())
    }

    fn block(&mut self, block: &Block, indent: f32, tight: bool) -> Result<()> {
        match block {
            Block::Heading { level, text } => {
                let style = self.styles.heading(*level);
                self.paragraph(text, style, indent)?;
                self.gap(style.space_after);
            }
            Block::Paragraph(text) => {
                let style = self.styles.body;
                self.paragraph(text, style, indent)?;
                if !tight {
                    self.gap(style.space_after);
                }
            }
            Block::List { start, items } => {
                self.list(*start, items, indent)?;
                if !tight {
                    self.gap(self.styles.list_space_after);
                }
            }
            Block::CodeBlock { text, .. } => {
                let lines: Vec<String> = text.lines().map(str::to_string).collect();
                self.preformatted(&lines, indent)?;
                self.gap(self.styles.code.space_after);
            }
            Block::Table(table) => {
                self.preformatted(&table.to_preformatted(), indent)?;
                self.gap(self.styles.code.space_after);
            }
            Block::Quote(inner) => {
                self.blocks(inner, indent + self.styles.indent, tight)?;
            }
            Block::Rule => self.rule(indent),
        }
        Ok(())
    }

    fn paragraph(&mut self, text: &str, style: TextStyle, indent: f32) -> Result<()> {
        let text = self.fonts.prepare_body(text)?;
        let x = self.setup.left() + indent;
        let max_width = self.setup.frame_width() - indent;
        let fonts = self.fonts;
        let advance = |c: char| f32::from(fonts.advance(FontRole::Body, c)) * style.size / 1000.0;

        for source_line in text.split('\n') {
            for line in wrap_text(source_line, max_width, advance) {
                let y = self.line(style.leading);
                self.text(x, y, FontRole::Body, style.size, line);
            }
        }
        Ok(())
    }

    fn list(&mut self, start: Option<u64>, items: &[Vec<Block>], indent: f32) -> Result<()> {
        let size = self.styles.body.size;
        let markers: Vec<String> = (0..items.len() as u64)
            .map(|i| match start {
                Some(n) => format!("{}.", n.saturating_add(i)),
                None => self.bullet().to_string(),
            })
            .collect();
        let marker_width = markers
            .iter()
            .map(|m| self.fonts.text_width(FontRole::Body, m, size))
            .fold(0.0f32, f32::max);
        let content_indent = indent + self.styles.indent.max(marker_width + MARKER_GAP);

        for (item, marker) in items.iter().zip(markers) {
            self.set_marker(Marker {
                text: marker,
                x: self.setup.left() + indent,
                size,
            });
            self.blocks(item, content_indent, true)?;
            if let Some(marker) = self.marker.take() {
                self.place_marker_line(marker, self.styles.body.leading);
            }
        }
        Ok(())
    }

    fn bullet(&self) -> &'static str {
        if self.fonts.has_glyph(FontRole::Body, '•') {
            "•"
        } else {
            "-"
        }
    }

    fn preformatted(&mut self, lines: &[String], indent: f32) -> Result<()> {
        let style = self.styles.code;
        let cell = style.size * f32::from(COURIER_ADVANCE) / 1000.0;
        let x0 = self.setup.left() + indent;
        let columns = ((self.setup.frame_width() - indent) / cell).floor().max(0.0) as usize;

        for line in lines {
            for row in grid_rows(&expand_tabs(line), columns) {
                let y = self.line(style.leading);
                for run in self.runs(&row)? {
                    self.text(
                        x0 + run.column as f32 * cell,
                        y,
                        run.role,
                        style.size,
                        run.text,
                    );
                }
            }
        }
        Ok(())
    }

    /// Group a grid row into drawable runs. Consecutive one-column Courier
    /// cells share a run, since Courier advances exactly one cell per
    /// character. Every other cell is drawn on its own at its grid column.
    fn runs(&self, row: &[GridCell]) -> Result<Vec<Run>> {
        let mut runs: Vec<Run> = Vec::new();
        let mut extend = false;

        for cell in row {
            let (role, ch) = self.fonts.mono_cell(cell.ch)?;
            let single = role == FontRole::Mono && cell.width == 1 && ch == cell.ch;
            match runs.last_mut() {
                Some(run) if extend && single => run.text.push(ch),
                _ => runs.push(Run {
                    column: cell.column,
                    role,
                    text: ch.to_string(),
                }),
            }
            extend = single;
        }

        runs.retain(|run| !run.text.trim().is_empty());
        for run in &mut runs {
            let trimmed = run.text.trim_end().len();
            run.text.truncate(trimmed);
        }
        Ok(runs)
    }

    fn rule(&mut self, indent: f32) {
        let leading = self.styles.body.leading;
        let y = self.line(leading) + self.styles.body.size * 0.3;
        self.page.ops.push(DrawOp::Rule {
            x1: self.setup.left() + indent,
            x2: self.setup.left() + self.setup.frame_width(),
            y,
            width: self.styles.rule_width,
        });
    }
}

struct Run {
    column: usize,
    role: FontRole,
    text: String,
}
