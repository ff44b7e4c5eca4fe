//! Catalog of user-installed fonts.
//!
//! Fonts are plain TTF/OTF files in one directory. The catalog only tracks
//! paths and names; glyph loading and rendering belong to the host.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use serde::{Deserialize, Serialize};

use crate::error::FontError;
use crate::observable::Observable;
use crate::settings::KeyboardSettings;
use crate::types::FontStyle;

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontData {
    /// File stem, unique within the font directory.
    pub id: String,
    /// File name including extension.
    pub name: String,
    pub path: PathBuf,
}

impl FontData {
    fn from_path(path: PathBuf) -> Self {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { id, name, path }
    }
}

/// A resolved font ready to be attached to committed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typeface {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    /// Style the font file provides natively.
    pub style: FontStyle,
}

impl Typeface {
    fn from_font(font: FontData) -> Self {
        let style = style_from_name(&font.name);
        Self {
            id: font.id,
            name: font.name,
            path: font.path,
            style,
        }
    }
}

/// Guess the native style from the file name, e.g. `Inter-BoldItalic.ttf`.
fn style_from_name(name: &str) -> FontStyle {
    let lower = name.to_lowercase();
    let mut style = FontStyle::empty();
    if lower.contains("bold") {
        style |= FontStyle::BOLD;
    }
    if lower.contains("italic") || lower.contains("oblique") {
        style |= FontStyle::ITALIC;
    }
    style
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.as_str()))
}

/// `name`, or `stem_N.ext` with the first free N.
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (name, ""),
    };
    (1u32..)
        .map(|n| dir.join(format!("{stem}_{n}.{ext}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// What the font settings screen and the selector observe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontCatalogState {
    /// Installed fonts, sorted by name.
    pub fonts: Vec<FontData>,
    /// Last add/remove/refresh failure, shown until dismissed.
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct FontCatalog {
    dir: PathBuf,
    state: Observable<FontCatalogState>,
}

impl FontCatalog {
    /// Create a catalog over `dir`. Nothing is read until [`FontCatalog::refresh`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            state: Observable::default(),
        }
    }

    /// Catalog over the configured `font_dir`, or `fallback_dir` when the
    /// settings leave it unset.
    pub fn from_settings(settings: &KeyboardSettings, fallback_dir: impl Into<PathBuf>) -> Self {
        match &settings.font_dir {
            Some(dir) => Self::new(dir.clone()),
            None => Self::new(fallback_dir),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn fonts(&self) -> Vec<FontData> {
        self.state.with(|s| s.fonts.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn clear_error(&self) {
        self.state.update(|s| FontCatalogState {
            error: None,
            ..s.clone()
        });
    }

    pub fn subscribe(&self) -> Receiver<FontCatalogState> {
        self.state.subscribe()
    }

    /// Rescan the font directory, creating it if needed.
    pub fn refresh(&self) -> Result<usize, FontError> {
        let result = self.scan();
        let fonts = self.recorded(result)?;
        let count = fonts.len();
        self.state.update(|s| FontCatalogState {
            fonts,
            ..s.clone()
        });
        log::debug!("font catalog: {} fonts in {}", count, self.dir.display());
        Ok(count)
    }

    fn scan(&self) -> Result<Vec<FontData>, FontError> {
        fs::create_dir_all(&self.dir).map_err(FontError::io("open"))?;
        let mut fonts = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(FontError::io("list"))? {
            let path = entry.map_err(FontError::io("list"))?.path();
            if path.is_file() && is_font_file(&path) {
                fonts.push(FontData::from_path(path));
            }
        }
        fonts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(fonts)
    }

    /// Copy a TTF/OTF file into the catalog.
    ///
    /// A clashing file name gets a numeric suffix rather than overwriting.
    pub fn add_font(&self, source: &Path) -> Result<FontData, FontError> {
        let result = self.copy_in(source);
        let font = self.recorded(result)?;
        self.state.update(|s| {
            let mut fonts = s.fonts.clone();
            fonts.push(font.clone());
            fonts.sort_by(|a, b| a.name.cmp(&b.name));
            FontCatalogState {
                fonts,
                error: None,
            }
        });
        log::info!("Installed font {} at {}", font.name, font.path.display());
        Ok(font)
    }

    fn copy_in(&self, source: &Path) -> Result<FontData, FontError> {
        let name = source
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_font_file(source) {
            return Err(FontError::UnsupportedFormat(name));
        }
        fs::create_dir_all(&self.dir).map_err(FontError::io("save"))?;
        let target = unique_path(&self.dir, &name);
        fs::copy(source, &target).map_err(FontError::io("save"))?;
        Ok(FontData::from_path(target))
    }

    /// Delete an installed font and its file.
    pub fn remove_font(&self, id: &str) -> Result<(), FontError> {
        let result = self.delete_file(id);
        self.recorded(result)?;
        self.state.update(|s| FontCatalogState {
            fonts: s.fonts.iter().filter(|f| f.id != id).cloned().collect(),
            error: None,
        });
        log::info!("Removed font {}", id);
        Ok(())
    }

    fn delete_file(&self, id: &str) -> Result<(), FontError> {
        let font = self
            .find(id)
            .ok_or_else(|| FontError::NotFound(id.to_string()))?;
        if font.path.exists() {
            fs::remove_file(&font.path).map_err(FontError::io("remove"))?;
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<FontData> {
        self.state
            .with(|s| s.fonts.iter().find(|f| f.id == id).cloned())
    }

    /// Resolve a font for rendering. The file is checked at call time since
    /// the list may be stale.
    pub fn load_font(&self, id: &str) -> Result<Typeface, FontError> {
        let font = self
            .find(id)
            .ok_or_else(|| FontError::NotFound(id.to_string()))?;
        if !font.path.is_file() {
            return Err(FontError::MissingFile(font.path));
        }
        Ok(Typeface::from_font(font))
    }

    fn recorded<T>(&self, result: Result<T, FontError>) -> Result<T, FontError> {
        if let Err(e) = &result {
            log::error!("Font catalog operation failed: {}", e);
            let message = e.to_string();
            self.state.update(|s| FontCatalogState {
                error: Some(message),
                ..s.clone()
            });
        }
        result
    }
}
