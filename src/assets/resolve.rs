use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use base64::Engine as _;

use crate::foundation::error::{CardError, CardResult};

/// Cover art resolved for a single render.
///
/// `Absent` is the normal outcome for records without art, or whose file is missing or unreadable;
/// composers draw the placeholder panel for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineAsset {
    /// No usable image.
    Absent,
    /// Image bytes embedded as base64 data.
    Embedded(EmbeddedImage),
}

impl InlineAsset {
    /// Return the embedded image, if any.
    pub fn embedded(&self) -> Option<&EmbeddedImage> {
        match self {
            Self::Absent => None,
            Self::Embedded(img) => Some(img),
        }
    }

    /// Whether no image is available.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Self-contained image source: MIME type plus base64 payload.
#[derive(Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    mime_type: String,
    base64: Arc<str>,
    byte_len: usize,
}

impl EmbeddedImage {
    /// Encode raw file bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64: base64::engine::general_purpose::STANDARD.encode(bytes).into(),
            byte_len: bytes.len(),
        }
    }

    /// MIME type derived from the source extension.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 (standard alphabet, padded) payload.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Size of the decoded payload in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// `data:` URL usable as an image `href`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

impl fmt::Debug for EmbeddedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedImage")
            .field("mime_type", &self.mime_type)
            .field("byte_len", &self.byte_len)
            .finish()
    }
}

impl serde::Serialize for EmbeddedImage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct as _;

        let mut s = serializer.serialize_struct("EmbeddedImage", 2)?;
        s.serialize_field("mimeType", &self.mime_type)?;
        s.serialize_field("bytes", &self.byte_len)?;
        s.end()
    }
}

/// Maps catalog asset references onto files under a fixed root and embeds them inline.
///
/// Nothing is cached: every call re-reads the file.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving references.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an optional reference such as `/covers/nightfall.jpg`.
    ///
    /// Never fails: missing, unreadable or rejected references yield [`InlineAsset::Absent`].
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, path: Option<&str>) -> InlineAsset {
        let Some(source) = path else {
            return InlineAsset::Absent;
        };

        let norm = match normalize_asset_path(source) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(source, error = %e, "rejecting cover art reference");
                return InlineAsset::Absent;
            }
        };

        let full = self.root.join(Path::new(&norm));
        if !full.is_file() {
            tracing::warn!(path = %full.display(), "cover art not found, using placeholder");
            return InlineAsset::Absent;
        }

        match self.read_embedded(&full) {
            Ok(img) => {
                tracing::debug!(
                    path = %full.display(),
                    mime = img.mime_type(),
                    bytes = img.byte_len(),
                    "embedded cover art"
                );
                InlineAsset::Embedded(img)
            }
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "cover art unreadable, using placeholder");
                InlineAsset::Absent
            }
        }
    }

    fn read_embedded(&self, full: &Path) -> CardResult<EmbeddedImage> {
        let bytes = std::fs::read(full).map_err(|e| {
            CardError::asset(format!("read asset bytes from '{}': {e}", full.display()))
        })?;
        Ok(EmbeddedImage::from_bytes(mime_for_path(full), &bytes))
    }
}

/// MIME type for an image path: `jpg` maps to `image/jpeg`, any other extension to `image/<ext>`.
///
/// Paths without an extension fall back to `application/octet-stream`.
pub fn mime_for_path(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") => "image/jpeg".to_string(),
        Some(ext) if !ext.is_empty() => format!("image/{ext}"),
        _ => "application/octet-stream".to_string(),
    }
}

/// Normalize a catalog asset reference relative to the asset root.
///
/// A single leading separator is stripped (`/x` and `x` name the same file), `\` is treated as
/// `/`, `.` segments are dropped. `..` segments and drive or scheme prefixes (`C:`) are rejected.
pub fn normalize_asset_path(source: &str) -> CardResult<String> {
    let s = source.replace('\\', "/");
    let s = s.strip_prefix('/').unwrap_or(&s);
    if s.is_empty() {
        return Err(CardError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CardError::validation("asset paths must not contain '..'"));
        }
        if part.contains(':') {
            return Err(CardError::validation(format!(
                "asset path segment '{part}' must not contain ':'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CardError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
