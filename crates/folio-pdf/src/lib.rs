//! Font handling, page layout, and PDF writing.
//!
//! The rendering pipeline is:
//!
//! ```text
//! Document ──▶ layout ──▶ Vec<Page> ──▶ write_pdf ──▶ bytes
//!               │                         │
//!               └──── FontSet (metrics) ──┘ (embedding)
//! ```
//!
//! # Modules
//!
//! - [`font`]: Built-in Type 1 fonts, embedded TrueType/OpenType fonts, font resolution
//! - [`style`]: Page geometry and text styles
//! - [`layout`]: Line wrapping and pagination into draw operations
//! - [`writer`]: PDF serialization with `lopdf`
//! - [`convert`]: One-shot Markdown file → PDF file conversion

pub mod convert;
pub mod error;
pub mod font;
pub mod layout;
pub mod style;
pub mod writer;

pub use convert::{ConversionReport, Converter, RenderedPdf};
pub use error::{Error, Result};
pub use font::{FontConfig, FontRole, FontSet, MissingGlyph};
pub use layout::{DrawOp, Page, layout};
pub use style::{PageSetup, StyleSheet, TextStyle};
pub use writer::{PdfMetadata, write_pdf};
