use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    assets::{
        fonts::{BOLD_FONT_FILE, DirFontLoader, REGULAR_FONT_FILE},
        resolve::AssetResolver,
    },
    catalog::store::MarkdownCatalog,
    foundation::error::{CardError, CardResult},
    render::orchestrator::DEFAULT_SCALE,
};

/// Where cards read their inputs from and write their outputs to.
///
/// Every field has a default matching the site layout, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CardConfig {
    /// Root that cover art references such as `/covers/x.jpg` resolve against.
    pub asset_root: PathBuf,
    pub font_dir: PathBuf,
    pub regular_font: String,
    pub bold_font: String,
    /// Directory of `*.md` song entries.
    pub content_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Raster width multiplier over the canvas width.
    pub scale: f32,
    /// Worker threads for catalog builds; `None` uses one per core.
    pub threads: Option<usize>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("public"),
            font_dir: PathBuf::from("public/fonts"),
            regular_font: REGULAR_FONT_FILE.to_string(),
            bold_font: BOLD_FONT_FILE.to_string(),
            content_dir: PathBuf::from("src/content/songs"),
            out_dir: PathBuf::from("dist"),
            scale: DEFAULT_SCALE,
            threads: None,
        }
    }
}

impl CardConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> CardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> CardResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| CardError::validation(format!("invalid config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CardResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CardError::validation(format!(
                "scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if self.threads == Some(0) {
            return Err(CardError::validation("threads must be >= 1 when set"));
        }
        if self.regular_font.trim().is_empty() || self.bold_font.trim().is_empty() {
            return Err(CardError::validation("font file names must be non-empty"));
        }
        Ok(())
    }

    pub fn font_loader(&self) -> DirFontLoader {
        DirFontLoader::with_files(&self.font_dir, &self.regular_font, &self.bold_font)
    }

    pub fn asset_resolver(&self) -> AssetResolver {
        AssetResolver::new(&self.asset_root)
    }

    pub fn catalog(&self) -> MarkdownCatalog {
        MarkdownCatalog::new(&self.content_dir)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
