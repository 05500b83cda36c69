use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use once_cell::sync::OnceCell;

use crate::foundation::error::{CardError, CardResult};

/// Family name written into every text node of the vector markup.
pub const FONT_FAMILY: &str = "Inter";

/// Default regular-weight font file name.
pub const REGULAR_FONT_FILE: &str = "Inter-Regular.ttf";

/// Default bold-weight font file name.
pub const BOLD_FONT_FILE: &str = "Inter-Bold.ttf";

/// The two font faces used for card text. Clones share the underlying bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct FontSet {
    /// Weight 400 face.
    pub regular: Arc<[u8]>,
    /// Weight 700 face.
    pub bold: Arc<[u8]>,
}

impl FontSet {
    pub fn new(regular: Vec<u8>, bold: Vec<u8>) -> Self {
        Self {
            regular: regular.into(),
            bold: bold.into(),
        }
    }

    /// Face bytes for a CSS-style numeric weight.
    pub fn for_weight(&self, weight: u16) -> &[u8] {
        if weight >= 600 {
            &self.bold
        } else {
            &self.regular
        }
    }
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("regular_len", &self.regular.len())
            .field("bold_len", &self.bold.len())
            .finish()
    }
}

/// Source of the font pair. Called at most once per [`FontCache`].
pub trait FontLoader: Send + Sync {
    fn load(&self) -> CardResult<FontSet>;
}

/// Reads the two faces from files in a directory.
#[derive(Clone, Debug)]
pub struct DirFontLoader {
    dir: PathBuf,
    regular: String,
    bold: String,
}

impl DirFontLoader {
    /// Loader for the default `Inter-Regular.ttf` / `Inter-Bold.ttf` pair.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_files(dir, REGULAR_FONT_FILE, BOLD_FONT_FILE)
    }

    pub fn with_files(
        dir: impl Into<PathBuf>,
        regular: impl Into<String>,
        bold: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            regular: regular.into(),
            bold: bold.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_face(&self, file: &str) -> CardResult<Vec<u8>> {
        let path = self.dir.join(file);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read font file '{}'", path.display()))
            .map_err(|e| CardError::font(format!("{e:#}")))?;
        if bytes.is_empty() {
            return Err(CardError::font(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(bytes)
    }
}

impl FontLoader for DirFontLoader {
    fn load(&self) -> CardResult<FontSet> {
        let regular = self.read_face(&self.regular)?;
        let bold = self.read_face(&self.bold)?;
        tracing::info!(
            dir = %self.dir.display(),
            regular_bytes = regular.len(),
            bold_bytes = bold.len(),
            "loaded card fonts"
        );
        Ok(FontSet::new(regular, bold))
    }
}

/// Load-once holder of the card fonts.
///
/// The first successful [`FontCache::get_fonts`] call runs the loader; concurrent first callers
/// block until that load finishes. A failed load leaves the cache empty and returns
/// [`CardError::Font`].
pub struct FontCache {
    loader: Box<dyn FontLoader>,
    fonts: OnceCell<FontSet>,
}

static GLOBAL: OnceCell<Arc<FontCache>> = OnceCell::new();

impl FontCache {
    pub fn new(loader: impl FontLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            fonts: OnceCell::new(),
        }
    }

    /// Cache backed by [`DirFontLoader`].
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirFontLoader::new(dir))
    }

    /// Process-wide cache. The loader passed by the first caller wins; later loaders are dropped.
    pub fn global(loader: impl FontLoader + 'static) -> Arc<FontCache> {
        if let Some(cache) = GLOBAL.get() {
            tracing::debug!("font cache already installed; ignoring loader");
            return Arc::clone(cache);
        }
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(FontCache::new(loader))))
    }

    /// Return the font pair, loading it on first use.
    pub fn get_fonts(&self) -> CardResult<FontSet> {
        self.fonts
            .get_or_try_init(|| self.loader.load())
            .cloned()
    }

    /// Whether a load has completed.
    pub fn is_loaded(&self) -> bool {
        self.fonts.get().is_some()
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
