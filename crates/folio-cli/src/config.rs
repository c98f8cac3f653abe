//! Configuration file handling.
//!
//! The file is TOML. Its location is resolved in this order:
//!
//! 1. `--config <file>` (or `$FOLIO_CONFIG`)
//! 2. `./folio.toml`, when it exists
//! 3. `<platform config dir>/folio/config.toml`
//!
//! A missing file means defaults, except when it was named explicitly.

use std::path::{Path, PathBuf};

use folio_core::{Error, Result, expand_tilde};
use folio_pdf::{FontConfig, PageSetup};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cli::ConvertArgs;

/// Loading, locating, and serializing a project's configuration.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Name used for the config directory and the local file.
    fn project_name() -> &'static str;

    /// `<platform config dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// `./<project>.toml`.
    fn local_config_path() -> PathBuf {
        PathBuf::from(format!("{}.toml", Self::project_name()))
    }

    /// The file that would be read for `explicit`.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }
        let local = Self::local_config_path();
        if local.is_file() {
            return Some(local);
        }
        Self::default_config_path()
    }

    /// Load the configuration, falling back to defaults when no file exists.
    fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.is_file() => Self::load_from(&path),
            Some(path) if explicit.is_some() => Err(Error::not_found("config file", path)),
            _ => Ok(Self::default()),
        }
    }

    /// Parse the file at `path`.
    fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

/// Complete Folio configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Where Markdown is read from.
    pub input: InputConfig,
    /// Where PDFs are written.
    pub output: OutputConfig,
    /// Body font selection.
    pub font: FontConfig,
    /// Page geometry.
    pub page: PageConfig,
}

/// `[input]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory holding the Markdown files.
    pub dir: String,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: "docs".to_string(),
            recursive: false,
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory PDFs are written to.
    pub dir: String,
    /// Flate-compress PDF streams.
    pub compress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "dist/pdf".to_string(),
            compress: true,
        }
    }
}

/// `[page]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Margin on every side, in millimetres.
    pub margin_mm: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            margin_mm: PageSetup::default().margin_mm,
        }
    }
}

impl ConfigManager for FolioConfig {
    fn project_name() -> &'static str {
        "folio"
    }
}

impl FolioConfig {
    /// Apply command-line overrides.
    pub fn apply_args(&mut self, args: &ConvertArgs) {
        if let Some(input) = &args.input {
            self.input.dir = input.to_string_lossy().into_owned();
        }
        if let Some(output) = &args.output {
            self.output.dir = output.to_string_lossy().into_owned();
        }
        if let Some(font) = &args.font {
            self.font.path = Some(font.clone());
        }
        if let Some(index) = args.font_index {
            self.font.index = index;
        }
        self.font.require_unicode |= args.require_unicode;
        self.input.recursive |= args.recursive;
        if args.no_compress {
            self.output.compress = false;
        }
    }

    /// Input directory with `~` expanded.
    pub fn input_dir(&self) -> PathBuf {
        expand_tilde(&self.input.dir)
    }

    /// Output directory with `~` expanded.
    pub fn output_dir(&self) -> PathBuf {
        expand_tilde(&self.output.dir)
    }

    /// Page geometry for the converter.
    pub fn page_setup(&self) -> PageSetup {
        PageSetup {
            margin_mm: self.page.margin_mm,
            ..PageSetup::default()
        }
    }
}
