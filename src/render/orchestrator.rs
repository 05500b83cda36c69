use std::sync::Arc;

use crate::{
    assets::fonts::FontCache,
    foundation::{
        core::Canvas,
        error::{CardError, CardResult},
    },
    layout::engine::{LayoutEngine, SvgLayoutEngine},
    render::raster::{MAX_RASTER_DIM, Rasterizer, ResvgRasterizer},
    template::node::Node,
};

/// Supersampling factor applied to the canvas width when rasterizing.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Runs layout then rasterization for one node tree.
///
/// Cloning is cheap: engines and the font cache are shared. Each call is independent, so one
/// `Renderer` can serve any number of concurrent renders.
pub struct Renderer<L = SvgLayoutEngine, R = ResvgRasterizer> {
    layout: Arc<L>,
    raster: Arc<R>,
    fonts: Arc<FontCache>,
    scale: f32,
}

impl Renderer {
    pub fn new(fonts: Arc<FontCache>) -> Self {
        Self::with_engines(fonts, SvgLayoutEngine, ResvgRasterizer)
    }
}

impl<L, R> Clone for Renderer<L, R> {
    fn clone(&self) -> Self {
        Self {
            layout: Arc::clone(&self.layout),
            raster: Arc::clone(&self.raster),
            fonts: Arc::clone(&self.fonts),
            scale: self.scale,
        }
    }
}

impl<L, R> Renderer<L, R>
where
    L: LayoutEngine + 'static,
    R: Rasterizer + 'static,
{
    pub fn with_engines(fonts: Arc<FontCache>, layout: L, raster: R) -> Self {
        Self {
            layout: Arc::new(layout),
            raster: Arc::new(raster),
            fonts,
            scale: DEFAULT_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> CardResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CardError::validation(format!(
                "render scale must be finite and > 0, got {scale}"
            )));
        }
        self.scale = scale;
        Ok(self)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn fonts(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Raster width for `canvas` at the configured scale.
    pub fn target_width(&self, canvas: Canvas) -> CardResult<u32> {
        let w = (canvas.width as f32 * self.scale).round();
        if w < 1.0 || w > MAX_RASTER_DIM as f32 {
            return Err(CardError::validation(format!(
                "scaled width {w} for canvas {canvas} is outside 1..={MAX_RASTER_DIM}"
            )));
        }
        Ok(w as u32)
    }

    /// The intermediate vector markup for `tree`.
    pub fn vector_markup(&self, tree: &Node, canvas: Canvas) -> CardResult<String> {
        canvas.validate()?;
        let fonts = self.fonts.get_fonts()?;
        self.layout.layout(tree, canvas, &fonts)
    }

    /// Layout then rasterize on the calling thread.
    #[tracing::instrument(skip(self, tree), fields(canvas = %canvas, scale = self.scale))]
    pub fn render_blocking(&self, tree: &Node, canvas: Canvas) -> CardResult<Vec<u8>> {
        canvas.validate()?;
        let target_width = self.target_width(canvas)?;
        let fonts = self.fonts.get_fonts()?;

        let svg = self.layout.layout(tree, canvas, &fonts)?;
        let png = self.raster.rasterize(&svg, target_width, &fonts)?;
        tracing::debug!(svg_bytes = svg.len(), png_bytes = png.len(), "card rendered");
        Ok(png)
    }

    /// Same bytes as [`Renderer::render_blocking`], computed on the blocking pool so async callers
    /// are never stalled by shaping or rasterization.
    pub async fn render(&self, tree: Node, canvas: Canvas) -> CardResult<Vec<u8>> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.render_blocking(&tree, canvas))
            .await
            .map_err(|e| CardError::Other(anyhow::anyhow!("render task failed: {e}")))?
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/orchestrator.rs"]
mod tests;
