//! Markdown parsing, frontmatter extraction, and table layout.
//!
//! This crate turns Markdown source into a small block model that the PDF
//! renderer can lay out. It knows nothing about fonts or pages.
//!
//! # Modules
//!
//! - [`document`]: The block model ([`Document`], [`Block`], [`Table`])
//! - [`markdown`]: Markdown parsing and frontmatter extraction
//!   - [`markdown::frontmatter`]: YAML frontmatter extraction
//!   - [`markdown::parser`]: Markdown → [`Block`] conversion
//! - [`width`]: Monospace display width of characters
//!
//! # Example
//!
//! ```rust
//! use folio_content::{parse_document, Block};
//!
//! let doc = parse_document("---\ntitle: Guide\n---\n# Intro\n\nHello.").unwrap();
//! assert_eq!(doc.meta.title.as_deref(), Some("Guide"));
//! assert_eq!(doc.blocks[0], Block::Heading { level: 1, text: "Intro".into() });
//! ```

pub mod document;
pub mod markdown;
pub mod width;

// Re-export commonly used types
pub use document::{Block, ColumnAlign, Document, DocumentMeta, Table};
pub use markdown::{
    FrontmatterResult, extract_frontmatter, parse_blocks, parse_document, strip_frontmatter,
};
pub use width::{char_width, display_width, is_wide};
