//! Line breaking for proportional and monospaced text.

use folio_content::{char_width, is_wide};

/// Tab stops in monospaced text, in columns.
pub const TAB_WIDTH: usize = 4;

/// One character placed on a monospace grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Zero-based column of the cell's left edge.
    pub column: usize,
    /// Columns occupied (0, 1 or 2).
    pub width: usize,
    /// The character.
    pub ch: char,
}

enum Token<'a> {
    Space,
    Word(&'a str),
}

/// Split text into whitespace and breakable units. Runs of non-space
/// characters form a word, except East Asian wide characters, which are
/// units of their own so a line may break between any two of them.
fn tokens(text: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() || is_wide(c) {
            if let Some(start) = word_start.take() {
                out.push(Token::Word(&text[start..i]));
            }
            if c.is_whitespace() {
                out.push(Token::Space);
            } else {
                out.push(Token::Word(&text[i..i + c.len_utf8()]));
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        out.push(Token::Word(&text[start..]));
    }
    out
}

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// `advance` gives the width of one character. Whitespace runs collapse to
/// a single space and never start or end a line. A word wider than the
/// whole line is broken between characters. Returns no lines for text
/// that is empty or all whitespace.
pub fn wrap_text<F>(text: &str, max_width: f32, advance: F) -> Vec<String>
where
    F: Fn(char) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0.0f32;
    let mut pending_space = false;

    for token in tokens(text) {
        let word = match token {
            Token::Space => {
                pending_space = !line.is_empty();
                continue;
            }
            Token::Word(word) => word,
        };

        let word_width: f32 = word.chars().map(&advance).sum();
        let space_width = if pending_space { advance(' ') } else { 0.0 };
        if !line.is_empty() && width + space_width + word_width > max_width {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
        } else if pending_space {
            line.push(' ');
            width += space_width;
        }
        pending_space = false;

        if line.is_empty() && word_width > max_width {
            for c in word.chars() {
                let w = advance(c);
                if !line.is_empty() && width + w > max_width {
                    lines.push(std::mem::take(&mut line));
                    width = 0.0;
                }
                line.push(c);
                width += w;
            }
        } else {
            line.push_str(word);
            width += word_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Replace tabs with spaces up to the next multiple of [`TAB_WIDTH`].
pub fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(c);
            column += char_width(c);
        }
    }
    out
}

/// Place the characters of one monospaced line on a grid of `columns`
/// columns, continuing on a new row when a character would cross the right
/// edge. Trailing whitespace is dropped. An empty line yields one empty row.
pub fn grid_rows(line: &str, columns: usize) -> Vec<Vec<GridCell>> {
    let columns = columns.max(2);
    let mut rows = vec![Vec::new()];
    let mut column = 0;

    for ch in line.trim_end().chars() {
        let width = char_width(ch);
        if column > 0 && column + width > columns {
            rows.push(Vec::new());
            column = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(GridCell { column, width, ch });
        }
        column += width;
    }
    rows
}
