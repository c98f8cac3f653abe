//! One-shot conversion of a Markdown file into a PDF file.

use std::path::{Path, PathBuf};

use folio_content::{Document, parse_document};
use folio_core::{ensure_dir, read_markdown};

use crate::font::FontSet;
use crate::layout::layout;
use crate::style::{PageSetup, StyleSheet};
use crate::writer::{PdfMetadata, write_pdf};
use crate::{Error, Result};

/// A rendered PDF held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPdf {
    /// The complete file.
    pub bytes: Vec<u8>,
    /// Number of pages.
    pub pages: usize,
}

/// Outcome of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Markdown source.
    pub input: PathBuf,
    /// PDF written.
    pub output: PathBuf,
    /// Number of pages.
    pub pages: usize,
    /// Size of the PDF in bytes.
    pub bytes: usize,
}

/// Converts Markdown to PDF with a fixed set of fonts and styles.
///
/// The font set is resolved once and reused for every document.
///
/// ```no_run
/// use std::path::Path;
/// use folio_pdf::{Converter, FontSet};
///
/// let converter = Converter::new(FontSet::builtin());
/// let report = converter
///     .convert_file(Path::new("docs/readme.md"), Path::new("dist/pdf/readme.pdf"))
///     .unwrap();
/// println!("{} pages", report.pages);
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    fonts: FontSet,
    setup: PageSetup,
    styles: StyleSheet,
    compress: bool,
}

impl Converter {
    /// A converter with A4 pages, default styles, and compression on.
    pub fn new(fonts: FontSet) -> Self {
        Self {
            fonts,
            setup: PageSetup::default(),
            styles: StyleSheet::default(),
            compress: true,
        }
    }

    /// Use `setup` for page size and margins.
    pub fn with_setup(mut self, setup: PageSetup) -> Self {
        self.setup = setup;
        self
    }

    /// Use `styles` for text sizes and spacing.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// The fonts documents are drawn with.
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Render Markdown `source` into PDF bytes. `fallback_title` is used
    /// when the frontmatter has no `title`.
    pub fn render(&self, source: &str, fallback_title: &str) -> Result<RenderedPdf> {
        let doc = parse_document(source)?;
        self.render_document(&doc, fallback_title)
    }

    /// Render an already parsed document.
    pub fn render_document(&self, doc: &Document, fallback_title: &str) -> Result<RenderedPdf> {
        let pages = layout(doc, &self.setup, &self.styles, &self.fonts)?;
        let meta = metadata(doc, fallback_title);

        let mut bytes = Vec::new();
        write_pdf(
            &pages,
            &self.setup,
            &self.fonts,
            &meta,
            self.compress,
            &mut bytes,
        )?;
        Ok(RenderedPdf {
            bytes,
            pages: pages.len(),
        })
    }

    /// Convert the Markdown file `input` into the PDF file `output`,
    /// creating the output's parent directory if needed.
    ///
    /// Errors carry `input` as context.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        self.convert_file_inner(input, output)
            .map_err(|e| e.in_file(input))
    }

    fn convert_file_inner(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let source = read_markdown(input)?;
        let title = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let rendered = self.render(&source, &title)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        std::fs::write(output, &rendered.bytes)
            .map_err(|e| Error::from(folio_core::Error::io_with_path(e, output)))?;

        log::debug!(
            "Wrote {} ({} pages, {} bytes)",
            output.display(),
            rendered.pages,
            rendered.bytes.len()
        );
        Ok(ConversionReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            pages: rendered.pages,
            bytes: rendered.bytes.len(),
        })
    }
}

fn metadata(doc: &Document, fallback_title: &str) -> PdfMetadata {
    let title = doc
        .meta
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| fallback_title.to_string());
    PdfMetadata {
        title: Some(title),
        author: doc.meta.author.clone(),
        subject: doc.meta.subject.clone(),
        keywords: doc.meta.keywords.clone(),
        producer: Some(format!("Folio {}", env!("CARGO_PKG_VERSION"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_metadata_prefers_frontmatter_title() {
        let doc = parse_document("---\ntitle: Policy\nauthor: Ops\n---\n# Body").unwrap();
        let meta = metadata(&doc, "file-stem");
        assert_eq!(meta.title.as_deref(), Some("Policy"));
        assert_eq!(meta.author.as_deref(), Some("Ops"));
        assert!(meta.producer.unwrap().starts_with("Folio "));
    }

    #[test]
    fn test_metadata_falls_back_to_stem() {
        let doc = parse_document("# Body").unwrap();
        assert_eq!(metadata(&doc, "guide").title.as_deref(), Some("guide"));
    }

    #[test]
    fn test_render_counts_pages() {
        let converter = Converter::new(FontSet::builtin());
        let rendered = converter.render("# Hi\n\nThere.", "hi").unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF-"));
        assert_eq!(rendered.pages, 1);
    }

    #[test]
    fn test_convert_file_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("note.md");
        std::fs::write(&input, "# Note\n\nBody text.").unwrap();
        let output = dir.path().join("out/nested/note.pdf");

        let report = Converter::new(FontSet::builtin())
            .convert_file(&input, &output)
            .unwrap();
        assert!(output.is_file());
        assert_eq!(report.output, output);
        assert_eq!(report.bytes as u64, std::fs::metadata(&output).unwrap().len());
    }

    #[test]
    fn test_convert_missing_input_names_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent.md");
        let err = Converter::new(FontSet::builtin())
            .convert_file(&input, &dir.path().join("absent.pdf"))
            .unwrap_err();
        assert!(err.to_string().contains("absent.md"));
        assert!(matches!(err.root(), Error::Core(_)));
    }

    #[test]
    fn test_convert_unsupported_glyph_names_file_and_char() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("zh.md");
        std::fs::write(&input, "# 價值主張").unwrap();
        let output = dir.path().join("zh.pdf");
        let err = Converter::new(FontSet::builtin())
            .convert_file(&input, &output)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("zh.md"));
        assert!(msg.contains("U+50F9"));
        assert!(!output.exists());
    }
}
