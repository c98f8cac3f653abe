//! Fonts: built-in Type 1 faces, embedded Unicode faces, and resolution.
//!
//! A [`FontSet`] holds the two fonts a document is drawn with:
//!
//! - the **body** font, an embedded TrueType/OpenType face when one is
//!   available (needed for CJK text), otherwise built-in Helvetica;
//! - the **mono** font, always built-in Courier. Monospaced lines fall back
//!   to the body font, cell by cell, for characters Courier cannot show.
//!
//! Characters that no active font can show are handled by
//! [`MissingGlyph`]: either the conversion fails with
//! [`Error::UnsupportedGlyph`], or the character is replaced by `?`.

pub mod builtin;
pub mod embedded;
pub mod resolve;

use serde::{Deserialize, Serialize};

pub use builtin::BuiltinFont;
pub use embedded::{EmbeddedFont, Glyph, Outlines};
pub use resolve::FontConfig;

use crate::{Error, Result};

/// Character drawn in place of one the fonts cannot show.
pub const REPLACEMENT_CHAR: char = '?';

/// Which of the document's two PDF fonts a piece of text is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontRole {
    /// Body font (headings, paragraphs, lists).
    Body,
    /// Courier (code, tables).
    Mono,
}

/// What to do with a character no active font can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingGlyph {
    /// Fail the conversion.
    #[default]
    Error,
    /// Draw `?` instead and log a warning.
    Replace,
}

/// The body font: built-in or embedded.
#[derive(Debug, Clone)]
pub enum BodyFont {
    /// A standard 14 font addressed through WinAnsiEncoding.
    Builtin(BuiltinFont),
    /// An embedded Unicode font.
    Embedded(EmbeddedFont),
}

/// Fonts used to draw one or more documents.
#[derive(Debug, Clone)]
pub struct FontSet {
    body: BodyFont,
    mono: BuiltinFont,
    missing_glyph: MissingGlyph,
}

impl Default for FontSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontSet {
    /// Helvetica body with Courier mono, no embedding.
    pub fn builtin() -> Self {
        Self {
            body: BodyFont::Builtin(BuiltinFont::Helvetica),
            mono: BuiltinFont::Courier,
            missing_glyph: MissingGlyph::Error,
        }
    }

    /// Use `font` for body text.
    pub fn with_embedded(font: EmbeddedFont) -> Self {
        Self {
            body: BodyFont::Embedded(font),
            ..Self::builtin()
        }
    }

    /// Set the missing-glyph policy.
    pub fn with_missing_glyph(mut self, policy: MissingGlyph) -> Self {
        self.missing_glyph = policy;
        self
    }

    /// The body font.
    pub fn body(&self) -> &BodyFont {
        &self.body
    }

    /// The mono font.
    pub fn mono(&self) -> BuiltinFont {
        self.mono
    }

    /// Whether the body font is an embedded Unicode font.
    pub fn is_unicode(&self) -> bool {
        matches!(self.body, BodyFont::Embedded(_))
    }

    /// Name of the font playing `role`.
    pub fn name(&self, role: FontRole) -> &str {
        match (role, &self.body) {
            (FontRole::Mono, _) => self.mono.base_font(),
            (FontRole::Body, BodyFont::Builtin(font)) => font.base_font(),
            (FontRole::Body, BodyFont::Embedded(font)) => font.name(),
        }
    }

    /// Whether the font playing `role` can show `c` by itself.
    pub fn has_glyph(&self, role: FontRole, c: char) -> bool {
        match (role, &self.body) {
            (FontRole::Mono, _) => self.mono.has_glyph(c),
            (FontRole::Body, BodyFont::Builtin(font)) => font.has_glyph(c),
            (FontRole::Body, BodyFont::Embedded(font)) => font.has_glyph(c),
        }
    }

    /// Advance of `c` in 1/1000 em, 0 when the font lacks it.
    pub fn advance(&self, role: FontRole, c: char) -> u16 {
        match (role, &self.body) {
            (FontRole::Mono, _) => self.mono.advance(c).unwrap_or(0),
            (FontRole::Body, BodyFont::Builtin(font)) => font.advance(c).unwrap_or(0),
            (FontRole::Body, BodyFont::Embedded(font)) => {
                font.glyph(c).map(|g| g.advance).unwrap_or(0)
            }
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(&self, role: FontRole, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.advance(role, c))).sum();
        units as f32 * size / 1000.0
    }

    /// Validate body text, applying the missing-glyph policy.
    ///
    /// Tabs become spaces. Returns the text to draw, or
    /// [`Error::UnsupportedGlyph`] for the first character the body font
    /// cannot show.
    pub fn prepare_body(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            let c = if c == '\t' { ' ' } else { c };
            if self.has_glyph(FontRole::Body, c) {
                out.push(c);
            } else {
                out.push(self.missing(FontRole::Body, c)?);
            }
        }
        Ok(out)
    }

    /// Font for one cell of a monospaced line: Courier when it can show
    /// `c`, the body font when only it can, otherwise the missing-glyph
    /// policy decides.
    pub fn mono_cell(&self, c: char) -> Result<(FontRole, char)> {
        if self.mono.has_glyph(c) {
            Ok((FontRole::Mono, c))
        } else if self.is_unicode() && self.has_glyph(FontRole::Body, c) {
            Ok((FontRole::Body, c))
        } else {
            self.missing(FontRole::Body, c)
                .map(|replacement| (FontRole::Mono, replacement))
        }
    }

    fn missing(&self, role: FontRole, c: char) -> Result<char> {
        match self.missing_glyph {
            MissingGlyph::Error => Err(Error::UnsupportedGlyph {
                ch: c,
                font: self.name(role).to_string(),
            }),
            MissingGlyph::Replace => {
                log::warn!(
                    "Font {} has no glyph for {c:?} (U+{:04X}); drawing {REPLACEMENT_CHAR:?}",
                    self.name(role),
                    c as u32
                );
                Ok(REPLACEMENT_CHAR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let fonts = FontSet::builtin();
        assert_eq!(fonts.name(FontRole::Body), "Helvetica");
        assert_eq!(fonts.name(FontRole::Mono), "Courier");
        assert!(!fonts.is_unicode());
    }

    #[test]
    fn test_text_width() {
        let fonts = FontSet::builtin();
        // "Hi" = 722 + 222
        let w = fonts.text_width(FontRole::Body, "Hi", 10.0);
        assert!((w - 9.44).abs() < 1e-4);
        let w = fonts.text_width(FontRole::Mono, "abc", 10.0);
        assert!((w - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_prepare_body_rejects_cjk_without_unicode_font() {
        let fonts = FontSet::builtin();
        let err = fonts.prepare_body("價值主張").unwrap_err();
        match err {
            Error::UnsupportedGlyph { ch, font } => {
                assert_eq!(ch, '價');
                assert_eq!(font, "Helvetica");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_prepare_body_replace_policy() {
        let fonts = FontSet::builtin().with_missing_glyph(MissingGlyph::Replace);
        assert_eq!(fonts.prepare_body("a中\tb").unwrap(), "a? b");
    }

    #[test]
    fn test_mono_cell_builtin() {
        let fonts = FontSet::builtin();
        assert_eq!(fonts.mono_cell('x').unwrap(), (FontRole::Mono, 'x'));
        assert!(fonts.mono_cell('表').is_err());

        let lenient = FontSet::builtin().with_missing_glyph(MissingGlyph::Replace);
        assert_eq!(lenient.mono_cell('表').unwrap(), (FontRole::Mono, '?'));
    }

    #[test]
    fn test_missing_glyph_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: MissingGlyph,
        }
        let w: Wrapper = toml::from_str("policy = \"replace\"").unwrap();
        assert_eq!(w.policy, MissingGlyph::Replace);
    }
}
