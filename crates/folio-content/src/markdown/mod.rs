//! Markdown parsing and frontmatter extraction.
//!
//! - [`frontmatter`]: YAML frontmatter extraction
//! - [`parser`]: Markdown → block model conversion
//!
//! # Example
//!
//! ```rust
//! use folio_content::markdown::{extract_frontmatter, parse_blocks};
//!
//! let content = "---\ntitle: Hello\n---\n\n- one\n- two\n";
//! let fm = extract_frontmatter(content).unwrap();
//! assert_eq!(fm.get_str("title"), Some("Hello"));
//!
//! let blocks = parse_blocks(fm.body());
//! assert_eq!(blocks.len(), 1);
//! ```

pub mod frontmatter;
pub mod parser;

pub use frontmatter::{FrontmatterResult, extract_frontmatter, strip_frontmatter};
pub use parser::{parse_blocks, parse_document};
