//! YAML frontmatter extraction from markdown files.
//!
//! Frontmatter is metadata at the start of a markdown file, delimited by `---`:
//!
//! ```markdown
//! ---
//! title: Quarterly Review
//! author: Platform Team
//! keywords:
//!   - planning
//!   - roadmap
//! ---
//!
//! # Document Content
//! ```
//!
//! Folio reads `title`, `author`, `subject` and `keywords` into the PDF
//! document information dictionary. Everything else is ignored.

use folio_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::document::DocumentMeta;

/// Result of frontmatter extraction.
///
/// Contains the parsed YAML value (if present) and the body content
/// after the frontmatter.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    /// Parsed YAML frontmatter, if present and valid.
    value: Option<Value>,
    /// Body content after the frontmatter delimiter.
    body: &'a str,
    /// Whether frontmatter delimiters were found (even if parsing failed).
    had_delimiters: bool,
}

impl<'a> FrontmatterResult<'a> {
    fn with_frontmatter(value: Value, body: &'a str) -> Self {
        Self {
            value: Some(value),
            body,
            had_delimiters: true,
        }
    }

    fn without_frontmatter(body: &'a str) -> Self {
        Self {
            value: None,
            body,
            had_delimiters: false,
        }
    }

    fn with_invalid_frontmatter(body: &'a str) -> Self {
        Self {
            value: None,
            body,
            had_delimiters: true,
        }
    }

    /// Check if valid frontmatter was found and parsed.
    pub fn has_frontmatter(&self) -> bool {
        self.value.is_some()
    }

    /// Check if frontmatter delimiters were present (even if parsing failed).
    pub fn had_delimiters(&self) -> bool {
        self.had_delimiters
    }

    /// Get the raw YAML value, if present.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Get the body content (everything after frontmatter).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Deserialize the frontmatter into a specific type.
    ///
    /// Returns `None` if no frontmatter was found.
    /// Returns `Err` if deserialization fails.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.value {
            Some(Value::Null) | None => Ok(None),
            Some(value) => {
                let parsed: T = serde_yaml::from_value(value.clone())
                    .map_err(|e| Error::parse(format!("Failed to deserialize frontmatter: {e}")))?;
                Ok(Some(parsed))
            }
        }
    }

    /// Document metadata, falling back to defaults when the frontmatter
    /// is missing or has unexpected field types.
    pub fn meta(&self) -> DocumentMeta {
        match self.deserialize::<DocumentMeta>() {
            Ok(meta) => meta.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring frontmatter metadata: {e}");
                DocumentMeta::default()
            }
        }
    }

    /// Get a string field from the frontmatter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.value.as_ref()?.get(key)?.as_str()
    }
}

/// Extract YAML frontmatter from markdown content.
///
/// Parses content whose first line is `---`, followed by YAML, followed by
/// a `---` line. Returns the parsed YAML value and the remaining body.
///
/// # Behavior
///
/// - If no frontmatter delimiters found: returns body as-is, `has_frontmatter() == false`
/// - If delimiters found but YAML is invalid: logs warning, returns the whole content as body
/// - If the YAML is a scalar or sequence: the block is Markdown (a rule and a
///   setext heading), returns the whole content as body
/// - If the YAML is a mapping or empty: returns parsed YAML and body
///
/// # Example
///
/// ```rust
/// use folio_content::markdown::extract_frontmatter;
///
/// let content = "---\ntitle: Test\n---\n\n# Heading";
/// let result = extract_frontmatter(content).unwrap();
/// assert!(result.has_frontmatter());
/// assert_eq!(result.get_str("title"), Some("Test"));
/// assert_eq!(result.body().trim(), "# Heading");
///
/// let content = "# Just Markdown";
/// let result = extract_frontmatter(content).unwrap();
/// assert!(!result.has_frontmatter());
/// assert_eq!(result.body(), "# Just Markdown");
/// ```
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult<'_>> {
    let Some(first_newline) = content.find('\n') else {
        return Ok(FrontmatterResult::without_frontmatter(content));
    };

    // The opening line must be exactly `---`; `----` is a thematic break.
    if content[..first_newline].trim_end() != "---" {
        return Ok(FrontmatterResult::without_frontmatter(content));
    }
    let after_first_delimiter = &content[first_newline + 1..];

    let (yaml_content, body_after_closing) =
        if let Some(rest) = after_first_delimiter.strip_prefix("---") {
            ("", rest)
        } else if let Some(closing_pos) = after_first_delimiter.find("\n---") {
            (
                &after_first_delimiter[..closing_pos],
                &after_first_delimiter[closing_pos + 4..],
            )
        } else {
            log::warn!("Frontmatter opening delimiter found but no closing delimiter");
            return Ok(FrontmatterResult::without_frontmatter(content));
        };

    let body = body_after_closing
        .strip_prefix("\r\n")
        .or_else(|| body_after_closing.strip_prefix('\n'))
        .unwrap_or(body_after_closing);

    match serde_yaml::from_str::<Value>(yaml_content) {
        Ok(value @ (Value::Mapping(_) | Value::Null)) => {
            Ok(FrontmatterResult::with_frontmatter(value, body))
        }
        Ok(_) => {
            log::debug!("Leading `---` block is not a YAML mapping; treating it as Markdown");
            Ok(FrontmatterResult::without_frontmatter(content))
        }
        Err(e) => {
            log::warn!("Failed to parse frontmatter YAML, rendering it as Markdown: {e}");
            Ok(FrontmatterResult::with_invalid_frontmatter(content))
        }
    }
}

/// Strip frontmatter from content, returning only the body.
///
/// ```rust
/// use folio_content::markdown::strip_frontmatter;
///
/// let content = "---\ntitle: Test\n---\n\n# Heading";
/// assert_eq!(strip_frontmatter(content).trim(), "# Heading");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    extract_frontmatter(content)
        .map(|r| r.body())
        .unwrap_or(content)
}

// ============================================================================
// Tests
// ============================================================================
