//! Page geometry and text styles.
//!
//! Sizes are in PDF points (1/72 inch). The defaults reproduce an A4 page
//! with 18 mm margins, 11 pt body text, and 9 pt code.

use serde::{Deserialize, Serialize};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.28;

/// A4 height in points.
pub const A4_HEIGHT: f32 = 841.89;

/// Page size and margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// Margin on all four sides, in millimetres.
    pub margin_mm: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_mm: 18.0,
        }
    }
}

impl PageSetup {
    /// Margin in points.
    pub fn margin(&self) -> f32 {
        self.margin_mm * PT_PER_MM
    }

    /// Left edge of the text frame.
    pub fn left(&self) -> f32 {
        self.margin()
    }

    /// Top edge of the text frame (PDF coordinates grow upwards).
    pub fn top(&self) -> f32 {
        self.height - self.margin()
    }

    /// Bottom edge of the text frame.
    pub fn bottom(&self) -> f32 {
        self.margin()
    }

    /// Width of the text frame.
    pub fn frame_width(&self) -> f32 {
        (self.width - 2.0 * self.margin()).max(0.0)
    }
}

/// Size, line height, and trailing space of one kind of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size.
    pub size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    /// Space after the block.
    pub space_after: f32,
}

impl TextStyle {
    const fn new(size: f32, leading: f32, space_after: f32) -> Self {
        Self {
            size,
            leading,
            space_after,
        }
    }
}

/// Styles for every block kind.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    /// Paragraphs and list items.
    pub body: TextStyle,
    /// Level 1 headings.
    pub h1: TextStyle,
    /// Level 2 headings.
    pub h2: TextStyle,
    /// Level 3 and deeper headings.
    pub h3: TextStyle,
    /// Code blocks and tables.
    pub code: TextStyle,
    /// Space after a list.
    pub list_space_after: f32,
    /// Indent per list nesting level and for block quotes.
    pub indent: f32,
    /// Stroke width of thematic breaks.
    pub rule_width: f32,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            body: TextStyle::new(11.0, 15.0, 6.0),
            h1: TextStyle::new(18.0, 22.0, 8.0),
            h2: TextStyle::new(16.0, 20.0, 6.0),
            h3: TextStyle::new(14.0, 18.0, 4.0),
            code: TextStyle::new(9.0, 12.0, 6.0),
            list_space_after: 4.0,
            indent: 12.0,
            rule_width: 0.5,
        }
    }
}

impl StyleSheet {
    /// Style for a heading of `level`.
    pub fn heading(&self, level: u8) -> TextStyle {
        match level {
            1 => self.h1,
            2 => self.h2,
            _ => self.h3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_frame() {
        let setup = PageSetup::default();
        assert!((setup.margin() - 51.02).abs() < 0.01);
        assert!((setup.frame_width() - (595.28 - 102.05)).abs() < 0.01);
        assert!(setup.top() > setup.bottom());
    }

    #[test]
    fn test_heading_styles() {
        let styles = StyleSheet::default();
        assert_eq!(styles.heading(1).size, 18.0);
        assert_eq!(styles.heading(2).size, 16.0);
        assert_eq!(styles.heading(3).size, 14.0);
        assert_eq!(styles.heading(6), styles.h3);
    }

    #[test]
    fn test_oversized_margin_clamps_frame() {
        let setup = PageSetup {
            margin_mm: 500.0,
            ..PageSetup::default()
        };
        assert_eq!(setup.frame_width(), 0.0);
    }
}
