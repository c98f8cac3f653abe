//! The two standard Type 1 fonts Folio uses without embedding.
//!
//! Both are addressed through `WinAnsiEncoding`, so only characters with a
//! WinAnsi code can be shown. Widths are in 1/1000 em, taken from the Adobe
//! core font metrics.

/// A standard 14 font that every PDF reader provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    /// Proportional sans serif, the body fallback.
    Helvetica,
    /// Fixed pitch, used for code and tables.
    Courier,
}

/// Advance width of every Courier glyph.
pub const COURIER_ADVANCE: u16 = 600;

/// Helvetica widths for U+0020..=U+007E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

impl BuiltinFont {
    /// PostScript name used as `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::Courier => "Courier",
        }
    }

    /// Whether the font can show `c`.
    pub fn has_glyph(self, c: char) -> bool {
        winansi_byte(c).is_some()
    }

    /// Advance width of `c` in 1/1000 em, or `None` when not encodable.
    pub fn advance(self, c: char) -> Option<u16> {
        let byte = winansi_byte(c)?;
        Some(match self {
            BuiltinFont::Courier => COURIER_ADVANCE,
            BuiltinFont::Helvetica => helvetica_advance(byte),
        })
    }

    /// Encode `text` as WinAnsi bytes. Characters without a code are
    /// skipped; callers validate with [`has_glyph`](Self::has_glyph) first.
    pub fn encode(self, text: &str) -> Vec<u8> {
        text.chars().filter_map(winansi_byte).collect()
    }
}

fn helvetica_advance(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => HELVETICA_ASCII[(byte - 0x20) as usize],
        0xA0 => 278,
        0x91 | 0x92 | 0x82 => 222,
        0x93 | 0x94 | 0x84 => 333,
        0x95 => 350,
        0x85 | 0x89 | 0x97 | 0x8C | 0x9C => 1000,
        0xA9 | 0xAE => 737,
        0xB7 => 278,
        // Latin-1 letters and remaining symbols are close to the digit width.
        _ => 556,
    }
}

/// WinAnsiEncoding code for `c`.
pub fn winansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => Some(match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => return None,
        }),
    }
}
