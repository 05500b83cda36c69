use std::{io::Cursor, sync::Arc};

use crate::{
    assets::fonts::FontSet,
    foundation::error::{CardError, CardResult},
};

/// Largest accepted raster side, in pixels.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Turns vector markup into encoded raster bytes fitted to a target pixel width.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, svg: &str, target_width: u32, fonts: &FontSet) -> CardResult<Vec<u8>>;
}

/// `usvg` + `resvg` rasterizer producing PNG.
///
/// Text is resolved only against the supplied font blobs; system fonts are never consulted, so the
/// same markup rasterizes identically on every host.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResvgRasterizer;

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for ResvgRasterizer {
    #[tracing::instrument(level = "debug", skip(self, svg, fonts), fields(bytes = svg.len()))]
    fn rasterize(&self, svg: &str, target_width: u32, fonts: &FontSet) -> CardResult<Vec<u8>> {
        if target_width == 0 || target_width > MAX_RASTER_DIM {
            return Err(CardError::raster(format!(
                "target width must be in 1..={MAX_RASTER_DIM}, got {target_width}"
            )));
        }

        let opts = usvg::Options {
            fontdb: build_fontdb(fonts),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| CardError::raster(format!("parse vector markup: {e}")))?;

        let (width, height, scale) = raster_size(tree.size(), target_width)?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| CardError::raster("failed to allocate raster pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let png = encode_png(&pixmap)?;
        tracing::debug!(width, height, png_bytes = png.len(), "rasterized");
        Ok(png)
    }
}

/// Output size and uniform scale that fit `size` to `target_width`.
pub(crate) fn raster_size(size: usvg::Size, target_width: u32) -> CardResult<(u32, u32, f32)> {
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(CardError::raster("vector markup has invalid width/height"));
    }

    let scale = target_width as f32 / w;
    let height = (h * scale).round().max(1.0);
    if height > MAX_RASTER_DIM as f32 {
        return Err(CardError::raster(format!(
            "raster size too large: {target_width}x{height} (max {MAX_RASTER_DIM}x{MAX_RASTER_DIM})"
        )));
    }
    Ok((target_width, height as u32, scale))
}

fn build_fontdb(fonts: &FontSet) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(fonts.regular.to_vec());
    db.load_font_data(fonts.bold.to_vec());

    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());
    match family {
        Some(family) => db.set_sans_serif_family(family),
        None => tracing::warn!("no usable font faces in font bytes; text will not be drawn"),
    }

    Arc::new(db)
}

/// Family, weight and style query against the blob-only database. Unknown family names land on
/// the sans-serif slot, which is the regular blob's family; anything else gets the first face.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

/// Straight-alpha RGBA PNG from a premultiplied pixmap.
fn encode_png(pixmap: &resvg::tiny_skia::Pixmap) -> CardResult<Vec<u8>> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let img = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .ok_or_else(|| CardError::raster("pixel buffer does not match raster size"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| CardError::raster(format!("encode png: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
