//! songcard renders social-share cards for a song catalog.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: the record's cover art reference becomes an embedded image or
//!    [`InlineAsset::Absent`] ([`AssetResolver`]).
//! 2. **Compose**: record + cover become a styled [`Node`] tree for one [`Variant`].
//! 3. **Layout**: the tree is laid out with flexbox rules and emitted as SVG
//!    ([`SvgLayoutEngine`]).
//! 4. **Rasterize**: the SVG is rendered at 2x the canvas width and encoded as PNG
//!    ([`ResvgRasterizer`]).
//!
//! [`Renderer`] runs steps 3-4 against the process-wide [`FontCache`]; [`build_catalog`] runs
//! the whole pipeline for every entry of a [`Catalog`] in every variant.
//!
//! Composition is pure and layout/rasterization use only the two cached font blobs, so the same
//! record always produces the same bytes.
#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod config;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod template;

pub use assets::fonts::{
    BOLD_FONT_FILE, DirFontLoader, FONT_FAMILY, FontCache, FontLoader, FontSet, REGULAR_FONT_FILE,
};
pub use assets::resolve::{
    AssetResolver, EmbeddedImage, InlineAsset, mime_for_path, normalize_asset_path,
};
pub use catalog::model::{CatalogEntry, MetadataRecord, SongFrontmatter};
pub use catalog::store::{Catalog, MarkdownCatalog, parse_song, split_frontmatter};
pub use config::CardConfig;
pub use foundation::core::{Canvas, Edges, Length, Rgb8};
pub use foundation::error::{CardError, CardResult};
pub use layout::engine::{LayoutEngine, SvgLayoutEngine};
pub use render::orchestrator::{DEFAULT_SCALE, Renderer};
pub use render::pipeline::{
    BuildReport, CONTENT_TYPE_PNG, build_catalog, compose_card, render_card,
    render_card_blocking,
};
pub use render::raster::{MAX_RASTER_DIM, Rasterizer, ResvgRasterizer};
pub use template::node::{Node, NodeKind};
pub use template::style::{BRAND_LABEL, FOOTER_URL, PLACEHOLDER_GLYPH, Style, palette};
pub use template::variant::Variant;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
