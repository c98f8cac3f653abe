//! TrueType / OpenType fonts embedded into the PDF.
//!
//! A font is parsed once with `ttf-parser`. Its Unicode cmap and horizontal
//! advances are copied into owned tables so layout never has to reparse the
//! file. Faces taken from a collection (`.ttc`) are re-packed into a
//! standalone sfnt, because a PDF font stream holds exactly one face.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ttf_parser::{Face, RawFace, Tag};

use crate::{Error, Result};

/// Outline technology of an embedded font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlines {
    /// `glyf` outlines, embedded as `FontFile2` under a `CIDFontType2`.
    TrueType,
    /// `CFF ` outlines, embedded as `FontFile3/OpenType` under a `CIDFontType0`.
    Cff,
}

/// Font-wide metrics in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Units per em.
    pub units_per_em: u16,
    /// Typographic ascender.
    pub ascent: i16,
    /// Typographic descender (negative).
    pub descent: i16,
    /// Height of capital letters.
    pub cap_height: i16,
    /// `[x_min, y_min, x_max, y_max]` over all glyphs.
    pub bbox: [i16; 4],
}

/// Glyph id and advance for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Glyph id, used directly as the CID under Identity-H.
    pub id: u16,
    /// Horizontal advance in 1/1000 em.
    pub advance: u16,
}

/// A parsed font ready for layout and embedding.
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    name: String,
    path: PathBuf,
    outlines: Outlines,
    metrics: FontMetrics,
    program: Vec<u8>,
    cmap: HashMap<char, u16>,
    advances: Vec<u16>,
}

/// Tables carried over when re-packing a collection face, in tag order.
const REPACK_TABLES: [&[u8; 4]; 23] = [
    b"BASE", b"CFF ", b"GDEF", b"GPOS", b"GSUB", b"OS/2", b"VORG", b"cmap", b"cvt ", b"fpgm",
    b"gasp", b"glyf", b"head", b"hhea", b"hmtx", b"kern", b"loca", b"maxp", b"name", b"post",
    b"prep", b"vhea", b"vmtx",
];

impl EmbeddedFont {
    /// Load face `index` from the font file at `path`.
    pub fn load(path: &Path, index: u32) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| Error::from(folio_core::Error::io_with_path(e, path)))?;
        Self::from_bytes(data, index, path)
    }

    /// Parse face `index` from in-memory font data. `path` is only used
    /// for naming and error messages.
    pub fn from_bytes(data: Vec<u8>, index: u32, path: &Path) -> Result<Self> {
        let collection_size = ttf_parser::fonts_in_collection(&data);
        if let Some(count) = collection_size {
            if index >= count {
                return Err(Error::font(
                    path,
                    format!("collection has {count} faces, face {index} requested"),
                ));
            }
        } else if index != 0 {
            return Err(Error::font(
                path,
                format!("not a font collection, face {index} requested"),
            ));
        }

        let face = Face::parse(&data, index).map_err(|e| Error::font(path, e.to_string()))?;
        let raw = RawFace::parse(&data, index).map_err(|e| Error::font(path, e.to_string()))?;

        let outlines = if raw.table(Tag::from_bytes(b"glyf")).is_some() {
            Outlines::TrueType
        } else if raw.table(Tag::from_bytes(b"CFF ")).is_some() {
            Outlines::Cff
        } else {
            return Err(Error::font(
                path,
                "unsupported outline format (need glyf or CFF outlines)",
            ));
        };

        let units_per_em = face.units_per_em();
        let bbox = face.global_bounding_box();
        let metrics = FontMetrics {
            units_per_em,
            ascent: face.ascender(),
            descent: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
        };

        let scale = |units: u16| -> u16 {
            let scaled = u32::from(units) * 1000 / u32::from(units_per_em.max(1));
            u16::try_from(scaled).unwrap_or(u16::MAX)
        };
        let advances = (0..face.number_of_glyphs())
            .map(|gid| scale(face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0)))
            .collect();

        let cmap = unicode_cmap(&face);
        if cmap.is_empty() {
            return Err(Error::font(path, "font has no Unicode character map"));
        }

        let name = postscript_name(&face).unwrap_or_else(|| fallback_name(path));

        let program = match collection_size {
            Some(_) => repack_face(&raw, outlines).map_err(|m| Error::font(path, m))?,
            None => data,
        };

        log::debug!(
            "Loaded font {name} from {} ({} mapped chars, {:?} outlines, {} bytes)",
            path.display(),
            cmap.len(),
            outlines,
            program.len()
        );

        Ok(Self {
            name,
            path: path.to_path_buf(),
            outlines,
            metrics,
            program,
            cmap,
            advances,
        })
    }

    /// PostScript name, sanitized for use as a PDF name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the font was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Outline technology.
    pub fn outlines(&self) -> Outlines {
        self.outlines
    }

    /// Font-wide metrics.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// The standalone sfnt bytes to embed.
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// Glyph for `c`, if the font maps it.
    pub fn glyph(&self, c: char) -> Option<Glyph> {
        let id = *self.cmap.get(&c)?;
        Some(Glyph {
            id,
            advance: self.advances.get(usize::from(id)).copied().unwrap_or(0),
        })
    }

    /// Whether the font maps `c` to a real glyph.
    pub fn has_glyph(&self, c: char) -> bool {
        self.cmap.contains_key(&c)
    }

    /// Convert a value in font units to 1/1000 em.
    pub fn to_thousandths(&self, units: i16) -> i64 {
        i64::from(units) * 1000 / i64::from(self.metrics.units_per_em.max(1))
    }
}

/// Collect every Unicode mapping, first subtable wins.
fn unicode_cmap(face: &Face<'_>) -> HashMap<char, u16> {
    let mut map = HashMap::new();
    let Some(cmap) = face.tables().cmap else {
        return map;
    };
    for subtable in cmap.subtables {
        if !subtable.is_unicode() {
            continue;
        }
        subtable.codepoints(|cp| {
            let (Some(c), Some(gid)) = (char::from_u32(cp), subtable.glyph_index(cp)) else {
                return;
            };
            if gid.0 != 0 {
                map.entry(c).or_insert(gid.0);
            }
        });
    }
    map
}

fn postscript_name(face: &Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
        .find_map(|n| n.to_string())
        .map(|s| sanitize_name(&s))
        .filter(|s| !s.is_empty())
}

fn fallback_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = sanitize_name(&stem);
    if name.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        name
    }
}

/// Keep only characters that are safe inside a PDF name.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
        .collect()
}

/// Build a standalone sfnt containing one face's tables.
fn repack_face(raw: &RawFace<'_>, outlines: Outlines) -> std::result::Result<Vec<u8>, String> {
    let tables: Vec<(&[u8; 4], &[u8])> = REPACK_TABLES
        .iter()
        .filter_map(|tag| raw.table(Tag::from_bytes(tag)).map(|data| (*tag, data)))
        .collect();

    let num_tables =
        u16::try_from(tables.len()).map_err(|_| "too many tables to re-pack".to_string())?;
    if num_tables == 0 {
        return Err("face has no tables".to_string());
    }
    let entry_selector = num_tables.ilog2() as u16;
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = num_tables * 16 - search_range;

    let mut out = Vec::new();
    match outlines {
        Outlines::Cff => out.extend_from_slice(b"OTTO"),
        Outlines::TrueType => out.extend_from_slice(&0x0001_0000u32.to_be_bytes()),
    }
    for value in [num_tables, search_range, entry_selector, range_shift] {
        out.extend_from_slice(&value.to_be_bytes());
    }

    let mut offset = 12 + 16 * u32::from(num_tables);
    for (tag, data) in &tables {
        let length = u32::try_from(data.len()).map_err(|_| "table too large".to_string())?;
        out.extend_from_slice(*tag);
        out.extend_from_slice(&table_checksum(data).to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&length.to_be_bytes());
        offset += padded_len(length);
    }
    for (_, data) in &tables {
        out.extend_from_slice(data);
        out.resize(out.len() + (padded_len(data.len() as u32) as usize - data.len()), 0);
    }
    Ok(out)
}

fn padded_len(len: u32) -> u32 {
    (len + 3) & !3
}

fn table_checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Noto Sans CJK/TC"), "NotoSansCJKTC");
        assert_eq!(sanitize_name("MicrosoftJhengHei-Regular"), "MicrosoftJhengHei-Regular");
        assert_eq!(sanitize_name("中文"), "");
    }

    #[test]
    fn test_fallback_name_from_path() {
        assert_eq!(fallback_name(Path::new("fonts/msjh.ttc")), "msjh");
        assert_eq!(fallback_name(Path::new("fonts/字型.ttf")), "EmbeddedFont");
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 4);
        assert_eq!(padded_len(4), 4);
        assert_eq!(padded_len(5), 8);
    }

    #[test]
    fn test_table_checksum_pads_with_zeros() {
        assert_eq!(table_checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
        assert_eq!(table_checksum(&[1]), 0x0100_0000);
        assert_eq!(table_checksum(&[0xff, 0xff, 0xff, 0xff, 0, 0, 0, 2]), 1);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = EmbeddedFont::from_bytes(b"not a font".to_vec(), 0, Path::new("x.ttf"))
            .unwrap_err();
        assert!(matches!(err, Error::Font { .. }));
        assert!(err.to_string().contains("x.ttf"));
    }

    #[test]
    fn test_face_index_on_single_font_is_rejected() {
        let err =
            EmbeddedFont::from_bytes(b"\0\x01\0\0".to_vec(), 2, Path::new("x.ttf")).unwrap_err();
        assert!(err.to_string().contains("not a font collection"));
    }

    #[test]
    fn test_missing_file() {
        let err = EmbeddedFont::load(Path::new("/definitely/not/here.ttf"), 0).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.ttf"));
    }
}
