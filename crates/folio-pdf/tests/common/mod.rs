//! Common test utilities: a tiny TrueType font built in memory.
//!
//! The font has empty outlines but real `cmap`, `hmtx` and `loca` tables,
//! which is all layout and embedding look at. Units per em is 1000, so
//! advances below are also the PDF widths.

#![allow(dead_code)]

/// Characters the test font maps, with their glyph id and advance.
pub const GLYPHS: [(char, u16, u16); 7] = [
    (' ', 1, 250),
    ('A', 2, 600),
    ('B', 3, 600),
    ('C', 4, 600),
    ('中', 5, 1000),
    ('文', 6, 1000),
    ('表', 7, 1000),
];

/// Glyph count including `.notdef`.
pub const NUM_GLYPHS: u16 = 8;

/// A standalone TrueType font.
pub fn tiny_truetype() -> Vec<u8> {
    sfnt(0)
}

/// A TrueType collection holding `faces` copies of the test font.
pub fn tiny_collection(faces: u32) -> Vec<u8> {
    let header_len = 12 + 4 * faces;
    let face_len = sfnt(0).len() as u32;

    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&faces.to_be_bytes());
    for i in 0..faces {
        out.extend_from_slice(&(header_len + i * face_len).to_be_bytes());
    }
    for i in 0..faces {
        out.extend_from_slice(&sfnt(header_len + i * face_len));
    }
    out
}

/// Build the sfnt as if it started at byte `base` of the file, since table
/// offsets in a collection are relative to the start of the file.
fn sfnt(base: u32) -> Vec<u8> {
    let tables: [(&[u8; 4], Vec<u8>); 7] = [
        (b"cmap", cmap()),
        (b"glyf", vec![0; 4]),
        (b"head", head()),
        (b"hhea", hhea()),
        (b"hmtx", hmtx()),
        (b"loca", vec![0; 2 * (usize::from(NUM_GLYPHS) + 1)]),
        (b"maxp", maxp()),
    ];

    let num_tables = tables.len() as u16;
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for value in [num_tables, 64, 2, num_tables * 16 - 64] {
        out.extend_from_slice(&value.to_be_bytes());
    }

    let mut offset = base + 12 + 16 * u32::from(num_tables);
    for (tag, data) in &tables {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += (data.len() as u32 + 3) & !3;
    }
    for (_, data) in &tables {
        out.extend_from_slice(data);
        while out.len() % 4 != 0 {
            out.push(0);
        }
    }
    out
}

fn head() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&1u16.to_be_bytes()); // major
    t.extend_from_slice(&0u16.to_be_bytes()); // minor
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // revision
    t.extend_from_slice(&0u32.to_be_bytes()); // checksum adjustment
    t.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    t.extend_from_slice(&0u16.to_be_bytes()); // flags
    t.extend_from_slice(&1000u16.to_be_bytes()); // units per em
    t.extend_from_slice(&[0; 16]); // created, modified
    for v in [0i16, -200, 1000, 800] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&0u16.to_be_bytes()); // mac style
    t.extend_from_slice(&8u16.to_be_bytes()); // lowest ppem
    t.extend_from_slice(&2i16.to_be_bytes()); // direction hint
    t.extend_from_slice(&0i16.to_be_bytes()); // short loca
    t.extend_from_slice(&0i16.to_be_bytes()); // glyph data format
    t
}

fn hhea() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for v in [800i16, -200, 0] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&1000u16.to_be_bytes()); // advance width max
    for v in [0i16, 0, 1000, 1, 0, 0, 0, 0, 0, 0, 0] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&NUM_GLYPHS.to_be_bytes());
    t
}

fn maxp() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    t.extend_from_slice(&NUM_GLYPHS.to_be_bytes());
    t
}

fn hmtx() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&500u16.to_be_bytes());
    t.extend_from_slice(&0i16.to_be_bytes());
    for (_, _, advance) in GLYPHS {
        t.extend_from_slice(&advance.to_be_bytes());
        t.extend_from_slice(&0i16.to_be_bytes());
    }
    t
}

/// Format 12 subtable under (Windows, UCS-4), one group per character.
fn cmap() -> Vec<u8> {
    let groups = GLYPHS.len() as u32;
    let mut t = Vec::new();
    t.extend_from_slice(&0u16.to_be_bytes()); // version
    t.extend_from_slice(&1u16.to_be_bytes()); // subtables
    t.extend_from_slice(&3u16.to_be_bytes()); // platform
    t.extend_from_slice(&10u16.to_be_bytes()); // encoding
    t.extend_from_slice(&12u32.to_be_bytes()); // offset

    t.extend_from_slice(&12u16.to_be_bytes());
    t.extend_from_slice(&0u16.to_be_bytes());
    t.extend_from_slice(&(16 + 12 * groups).to_be_bytes());
    t.extend_from_slice(&0u32.to_be_bytes()); // language
    t.extend_from_slice(&groups.to_be_bytes());
    for (c, gid, _) in GLYPHS {
        t.extend_from_slice(&(c as u32).to_be_bytes());
        t.extend_from_slice(&(c as u32).to_be_bytes());
        t.extend_from_slice(&u32::from(gid).to_be_bytes());
    }
    t
}
