//! The block model produced by the Markdown parser.
//!
//! Inline formatting is flattened to plain text; only block structure
//! survives. Tables keep their cells so they can be laid out as a
//! fixed-width grid.

use serde::Deserialize;

use crate::width::display_width;

/// Document metadata taken from YAML frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    /// Document title.
    pub title: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Short description of the document.
    pub subject: Option<String>,
    /// Keywords.
    pub keywords: Vec<String>,
}

/// A parsed Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Frontmatter metadata (defaults when absent or unusable).
    pub meta: DocumentMeta,
    /// Top-level blocks in source order.
    pub blocks: Vec<Block>,
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX or setext heading, `level` in `1..=6`.
    Heading {
        /// Heading depth.
        level: u8,
        /// Heading text.
        text: String,
    },
    /// Paragraph text. Hard line breaks are kept as `\n`.
    Paragraph(String),
    /// Bulleted (`start == None`) or numbered list.
    List {
        /// First number of an ordered list.
        start: Option<u64>,
        /// Each item is a sequence of blocks.
        items: Vec<Vec<Block>>,
    },
    /// Verbatim code.
    CodeBlock {
        /// Info-string language, if any.
        language: Option<String>,
        /// Code text without the trailing newline.
        text: String,
    },
    /// Pipe table.
    Table(Table),
    /// Block quote.
    Quote(Vec<Block>),
    /// Thematic break.
    Rule,
}

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnAlign {
    /// No alignment marker; rendered left aligned.
    #[default]
    None,
    /// `:---`
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

/// A pipe table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Per-column alignment from the delimiter row.
    pub alignments: Vec<ColumnAlign>,
    /// Header cells.
    pub header: Vec<String>,
    /// Body rows.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns, the widest of header, body rows, and alignments.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain([self.header.len(), self.alignments.len()])
            .max()
            .unwrap_or(0)
    }

    /// Display width of each column.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for row in std::iter::once(&self.header).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }
        widths
    }

    /// Render the table as monospaced lines.
    ///
    /// Every cell is padded to its column width so that the `|` separators
    /// line up on a monospace grid:
    ///
    /// ```
    /// use folio_content::{ColumnAlign, Table};
    ///
    /// let table = Table {
    ///     alignments: vec![ColumnAlign::Left, ColumnAlign::Right],
    ///     header: vec!["Name".into(), "Qty".into()],
    ///     rows: vec![vec!["apple".into(), "3".into()]],
    /// };
    /// assert_eq!(
    ///     table.to_preformatted(),
    ///     vec!["Name  | Qty", "------+----", "apple |   3"],
    /// );
    /// ```
    pub fn to_preformatted(&self) -> Vec<String> {
        let widths = self.column_widths();
        if widths.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.format_row(&self.header, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &self.rows {
            lines.push(self.format_row(row, &widths));
        }
        lines
    }

    fn format_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let align = self.alignments.get(i).copied().unwrap_or_default();
                pad_cell(cell, *width, align)
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }
}

fn pad_cell(cell: &str, width: usize, align: ColumnAlign) -> String {
    let gap = width.saturating_sub(display_width(cell));
    let (left, right) = match align {
        ColumnAlign::None | ColumnAlign::Left => (0, gap),
        ColumnAlign::Right => (gap, 0),
        ColumnAlign::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{cell}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]], alignments: Vec<ColumnAlign>) -> Table {
        Table {
            alignments,
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    // ------------------------------------------------------------------------
    // to_preformatted tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_preformatted_left_aligned() {
        let t = table(&["a", "bb"], &[&["ccc", "d"]], vec![]);
        assert_eq!(t.to_preformatted(), vec!["a   | bb", "----+---", "ccc | d"]);
    }

    #[test]
    fn test_preformatted_center() {
        let t = table(&["title"], &[&["x"]], vec![ColumnAlign::Center]);
        assert_eq!(t.to_preformatted(), vec!["title", "-----", "  x"]);

        let t = table(&["title", "z"], &[&["x", "z"]], vec![ColumnAlign::Center]);
        assert_eq!(t.to_preformatted()[2], "  x   | z");
    }

    #[test]
    fn test_preformatted_short_rows_padded() {
        let t = table(&["a", "b", "c"], &[&["1"]], vec![]);
        let lines = t.to_preformatted();
        assert_eq!(lines[2], "1 |   |");
        assert_eq!(lines[1], "--+---+--");
    }

    #[test]
    fn test_preformatted_wide_characters_align() {
        let t = table(&["名前", "n"], &[&["ab", "1"]], vec![]);
        let lines = t.to_preformatted();
        assert_eq!(lines[0], "名前 | n");
        assert_eq!(lines[2], "ab   | 1");
        assert_eq!(display_width(&lines[0]), display_width("ab   | 1"));
    }

    #[test]
    fn test_preformatted_empty_table() {
        assert!(Table::default().to_preformatted().is_empty());
    }

    #[test]
    fn test_column_count_uses_widest_row() {
        let t = table(&["a"], &[&["1", "2", "3"]], vec![]);
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.column_widths(), vec![1, 1, 1]);
    }
}
