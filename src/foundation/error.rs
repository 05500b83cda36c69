/// Convenience result type used across songcard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by the card pipeline.
///
/// A missing cover image is not represented here: it resolves to
/// [`InlineAsset::Absent`](crate::InlineAsset::Absent) and renders the placeholder panel.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid caller-provided data (variant names, config values, asset paths).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or encoding a binary asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// Font files missing or unusable. Fatal for the process.
    #[error("font resource error: {0}")]
    Font(String),

    /// Failures while laying out a node tree into vector markup.
    #[error("layout error: {0}")]
    Layout(String),

    /// Failures while parsing vector markup or producing raster bytes.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors while enumerating or parsing catalog entries.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`CardError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CardError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`CardError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`CardError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
