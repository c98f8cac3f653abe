//! Locating the body font.
//!
//! Resolution order:
//!
//! 1. An explicit `path` must exist and parse; anything else is an error.
//! 2. Otherwise every candidate file name is tried in every search
//!    directory, in order. Candidates that exist but fail to parse are
//!    skipped with a warning.
//! 3. If nothing is found, built-in Helvetica is used, unless
//!    `require_unicode` is set, in which case resolution fails and lists
//!    every path that was checked.

use std::path::PathBuf;

use folio_core::expand_tilde;
use serde::{Deserialize, Serialize};

use super::{EmbeddedFont, FontSet, MissingGlyph};
use crate::{Error, Result};

/// Font selection settings (`[font]` in the configuration file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Explicit font file. Disables the candidate search.
    pub path: Option<String>,
    /// Face index inside a `.ttc` collection.
    pub index: u32,
    /// Directories searched for candidate files, in order.
    pub search_dirs: Vec<String>,
    /// Candidate font file names, in order of preference.
    pub candidates: Vec<String>,
    /// Fail instead of falling back to Helvetica when no font is found.
    pub require_unicode: bool,
    /// What to do with characters the fonts cannot show.
    pub missing_glyph: MissingGlyph,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            index: 0,
            search_dirs: vec![
                "C:/Windows/Fonts".to_string(),
                "fonts".to_string(),
                ".".to_string(),
            ],
            candidates: vec![
                "msjh.ttc".to_string(),
                "msjh.ttf".to_string(),
                "NotoSansCJK-Regular.ttc".to_string(),
                "NotoSansTC-Regular.otf".to_string(),
            ],
            require_unicode: false,
            missing_glyph: MissingGlyph::Error,
        }
    }
}

impl FontConfig {
    /// Every `search_dir/candidate` combination, in search order.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        self.candidates
            .iter()
            .flat_map(|file| {
                self.search_dirs
                    .iter()
                    .map(move |dir| expand_tilde(dir).join(file))
            })
            .collect()
    }
}

impl FontSet {
    /// Build the font set described by `config`.
    pub fn resolve(config: &FontConfig) -> Result<Self> {
        let fonts = match &config.path {
            Some(path) => {
                let path = expand_tilde(path);
                if !path.is_file() {
                    return Err(Error::FontNotFound {
                        searched: vec![path],
                    });
                }
                FontSet::with_embedded(EmbeddedFont::load(&path, config.index)?)
            }
            None => match search(config)? {
                Some(font) => FontSet::with_embedded(font),
                None => FontSet::builtin(),
            },
        };

        match fonts.body() {
            super::BodyFont::Embedded(font) => {
                log::info!("Using font {} ({})", font.name(), font.path().display())
            }
            super::BodyFont::Builtin(font) => log::warn!(
                "No Unicode font found; falling back to {}, which cannot show CJK text",
                font.base_font()
            ),
        }

        Ok(fonts.with_missing_glyph(config.missing_glyph))
    }
}

fn search(config: &FontConfig) -> Result<Option<EmbeddedFont>> {
    let searched = config.candidate_paths();
    for path in &searched {
        if !path.is_file() {
            continue;
        }
        match EmbeddedFont::load(path, config.index) {
            Ok(font) => return Ok(Some(font)),
            Err(e) => log::warn!("Skipping font candidate {}: {e}", path.display()),
        }
    }

    if config.require_unicode {
        Err(Error::FontNotFound { searched })
    } else {
        Ok(None)
    }
}
