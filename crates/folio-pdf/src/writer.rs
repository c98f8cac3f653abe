//! PDF serialization.
//!
//! The object graph is built with `lopdf`:
//!
//! ```text
//! Catalog ─▶ Pages (MediaBox, Resources) ─▶ Page ─▶ Contents
//!                        │
//!                        ├─ /F1  body font (Type1 Helvetica or Type0 Identity-H)
//!                        └─ /F2  Courier
//! ```
//!
//! Only fonts that are actually drawn with are added. Nothing time or
//! randomness dependent is written (no dates, no `/ID`), so the same input
//! always produces the same bytes.

use std::collections::BTreeMap;
use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};

use crate::Result;
use crate::font::embedded::Outlines;
use crate::font::{BodyFont, BuiltinFont, EmbeddedFont, FontRole, FontSet};
use crate::layout::{DrawOp, Page};
use crate::style::PageSetup;

/// PDF version written in the header.
pub const PDF_VERSION: &str = "1.7";

/// Entries per `beginbfchar` section; the CMap format caps it at 100.
const BFCHAR_CHUNK: usize = 100;

/// Document information dictionary contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfMetadata {
    /// `/Title`.
    pub title: Option<String>,
    /// `/Author`.
    pub author: Option<String>,
    /// `/Subject`.
    pub subject: Option<String>,
    /// `/Keywords`, joined with `", "`.
    pub keywords: Vec<String>,
    /// `/Producer`.
    pub producer: Option<String>,
}

impl PdfMetadata {
    /// Metadata with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    fn to_dictionary(&self) -> Dictionary {
        let mut info = Dictionary::new();
        let entries = [
            ("Title", self.title.clone()),
            ("Author", self.author.clone()),
            ("Subject", self.subject.clone()),
            (
                "Keywords",
                (!self.keywords.is_empty()).then(|| self.keywords.join(", ")),
            ),
            ("Producer", self.producer.clone()),
        ];
        for (key, value) in entries {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                info.set(key, text_string(&value));
            }
        }
        info
    }
}

/// Encode a PDF text string: literal for ASCII, UTF-16BE with a byte order
/// mark for anything else.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        Object::string_literal(value)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in value.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

/// Write `pages` as a complete PDF file to `out`.
pub fn write_pdf<W: Write>(
    pages: &[Page],
    setup: &PageSetup,
    fonts: &FontSet,
    meta: &PdfMetadata,
    compress: bool,
    out: &mut W,
) -> Result<()> {
    let mut doc = lopdf::Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut used = UsedFonts::default();
    let mut page_ids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, fonts, &mut used);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let mut font_dict = Dictionary::new();
    if used.body {
        let id = match fonts.body() {
            BodyFont::Builtin(font) => doc.add_object(builtin_font(*font)),
            BodyFont::Embedded(font) => add_embedded_font(&mut doc, font, &used.glyphs),
        };
        font_dict.set(resource_name(FontRole::Body), id);
    }
    if used.mono {
        let id = doc.add_object(builtin_font(fonts.mono()));
        font_dict.set(resource_name(FontRole::Mono), id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

    let count = i64::try_from(page_ids.len()).unwrap_or(i64::MAX);
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        round(setup.width).into(),
        round(setup.height).into(),
    ];
    let kids: Vec<Object> = page_ids.into_iter().map(Object::Reference).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info = meta.to_dictionary();
    if !info.is_empty() {
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);
    }

    if compress {
        doc.compress();
    }
    doc.save_to(out)?;
    Ok(())
}

/// Which fonts were drawn with, and which glyphs of the embedded font.
#[derive(Default)]
struct UsedFonts {
    body: bool,
    mono: bool,
    /// Glyph id to (advance, first character mapped to it).
    glyphs: BTreeMap<u16, (u16, char)>,
}

fn resource_name(role: FontRole) -> &'static str {
    match role {
        FontRole::Body => "F1",
        FontRole::Mono => "F2",
    }
}

fn page_content(page: &Page, fonts: &FontSet, used: &mut UsedFonts) -> Content {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                role,
                size,
                text,
            } => {
                let bytes = encode_text(*role, text, fonts, used);
                if bytes.is_empty() {
                    continue;
                }
                let format = match (role, fonts.body()) {
                    (FontRole::Body, BodyFont::Embedded(_)) => StringFormat::Hexadecimal,
                    _ => StringFormat::Literal,
                };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(resource_name(*role).into()), round(*size).into()],
                ));
                operations.push(Operation::new("Td", vec![round(*x).into(), round(*y).into()]));
                operations.push(Operation::new("Tj", vec![Object::String(bytes, format)]));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule { x1, x2, y, width } => {
                operations.push(Operation::new("w", vec![round(*width).into()]));
                operations.push(Operation::new("m", vec![round(*x1).into(), round(*y).into()]));
                operations.push(Operation::new("l", vec![round(*x2).into(), round(*y).into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }
    Content { operations }
}

/// Bytes for a `Tj` string: WinAnsi codes for built-in fonts, big-endian
/// glyph ids for the embedded font.
fn encode_text(role: FontRole, text: &str, fonts: &FontSet, used: &mut UsedFonts) -> Vec<u8> {
    match (role, fonts.body()) {
        (FontRole::Mono, _) => {
            used.mono = true;
            fonts.mono().encode(text)
        }
        (FontRole::Body, BodyFont::Builtin(font)) => {
            used.body = true;
            font.encode(text)
        }
        (FontRole::Body, BodyFont::Embedded(font)) => {
            used.body = true;
            let mut bytes = Vec::with_capacity(text.len() * 2);
            for c in text.chars() {
                if let Some(glyph) = font.glyph(c) {
                    used.glyphs.entry(glyph.id).or_insert((glyph.advance, c));
                    bytes.extend_from_slice(&glyph.id.to_be_bytes());
                }
            }
            bytes
        }
    }
}

fn builtin_font(font: BuiltinFont) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Add the Type0 font, its descendant CID font, descriptor, program and
/// ToUnicode CMap. Returns the Type0 font's id.
fn add_embedded_font(
    doc: &mut lopdf::Document,
    font: &EmbeddedFont,
    glyphs: &BTreeMap<u16, (u16, char)>,
) -> ObjectId {
    let metrics = font.metrics();
    let name = font.name();

    let (file_key, program) = match font.outlines() {
        Outlines::TrueType => (
            "FontFile2",
            Stream::new(
                dictionary! { "Length1" => font.program().len() as i64 },
                font.program().to_vec(),
            ),
        ),
        Outlines::Cff => (
            "FontFile3",
            Stream::new(
                dictionary! { "Subtype" => "OpenType" },
                font.program().to_vec(),
            ),
        ),
    };
    let program_id = doc.add_object(program);

    let bbox: Vec<Object> = metrics
        .bbox
        .iter()
        .map(|v| Object::Integer(font.to_thousandths(*v)))
        .collect();
    let mut descriptor = dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => name,
        "Flags" => 4,
        "FontBBox" => bbox,
        "ItalicAngle" => 0,
        "Ascent" => font.to_thousandths(metrics.ascent),
        "Descent" => font.to_thousandths(metrics.descent),
        "CapHeight" => font.to_thousandths(metrics.cap_height),
        "StemV" => 80,
    };
    descriptor.set(file_key, program_id);
    let descriptor_id = doc.add_object(descriptor);

    let subtype = match font.outlines() {
        Outlines::TrueType => "CIDFontType2",
        Outlines::Cff => "CIDFontType0",
    };
    let mut cid_font = dictionary! {
        "Type" => "Font",
        "Subtype" => subtype,
        "BaseFont" => name,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000,
        "W" => width_array(glyphs),
    };
    if font.outlines() == Outlines::TrueType {
        cid_font.set("CIDToGIDMap", "Identity");
    }
    let cid_font_id = doc.add_object(cid_font);

    let to_unicode_id = doc.add_object(Stream::new(Dictionary::new(), to_unicode_cmap(glyphs)));

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => name,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    })
}

/// `/W` array grouping consecutive glyph ids: `[first [w1 w2 ...] ...]`.
fn width_array(glyphs: &BTreeMap<u16, (u16, char)>) -> Vec<Object> {
    let mut array = Vec::new();
    let mut run: Vec<Object> = Vec::new();
    let mut run_start: Option<u16> = None;
    let mut previous: Option<u16> = None;

    for (&gid, &(advance, _)) in glyphs {
        let continues = previous.is_some_and(|p| u32::from(p) + 1 == u32::from(gid));
        if !continues {
            if let Some(start) = run_start {
                array.push(Object::Integer(i64::from(start)));
                array.push(Object::Array(std::mem::take(&mut run)));
            }
            run_start = Some(gid);
        }
        run.push(Object::Integer(i64::from(advance)));
        previous = Some(gid);
    }
    if let Some(start) = run_start {
        array.push(Object::Integer(i64::from(start)));
        array.push(Object::Array(run));
    }
    array
}

/// ToUnicode CMap mapping each used glyph id back to its character.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, (u16, char)>) -> Vec<u8> {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &(_, c))| (gid, c)).collect();
    for chunk in entries.chunks(BFCHAR_CHUNK) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, c) in chunk {
            let mut units = [0u16; 2];
            let hex: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{u:04X}"))
                .collect();
            cmap.push_str(&format!("<{gid:04X}> <{hex}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap.into_bytes()
}

/// Round to two decimals so coordinates print compactly and stably.
fn round(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
