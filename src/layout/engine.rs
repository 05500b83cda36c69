use crate::{
    assets::fonts::{FONT_FAMILY, FontSet},
    foundation::{
        core::{Canvas, Rgb8},
        error::{CardError, CardResult},
    },
    layout::{
        flex::{BoxRect, FlexTree},
        svg::{Anchor, SvgDocument, TextPaint},
        text::{TextMeasurer, TextSpec},
    },
    template::{
        node::Node,
        style::{ObjectFit, Style, TextAlign},
    },
};

/// Turns a node tree into vector markup of exactly `canvas` size.
pub trait LayoutEngine: Send + Sync {
    fn layout(&self, tree: &Node, canvas: Canvas, fonts: &FontSet) -> CardResult<String>;
}

/// Slack given to the paint-time line break so that a box rounded down by the layout pass
/// does not wrap its last word.
const WRAP_TOLERANCE_PX: f32 = 1.0;

/// Flexbox layout via taffy, text shaping via parley, SVG out.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgLayoutEngine;

impl SvgLayoutEngine {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutEngine for SvgLayoutEngine {
    #[tracing::instrument(level = "debug", skip(self, tree, fonts), fields(canvas = %canvas))]
    fn layout(&self, tree: &Node, canvas: Canvas, fonts: &FontSet) -> CardResult<String> {
        canvas.validate()?;
        let mut measurer = TextMeasurer::new(fonts)?;

        let mut flex = FlexTree::build(tree, canvas)?;
        flex.compute(canvas, &mut measurer)?;
        tracing::debug!(
            family = measurer.regular_family(),
            texts = flex.text_count(),
            "layout solved"
        );

        let mut doc = SvgDocument::new();
        flex.walk(tree, &mut |node, rect, text| {
            paint_node(&mut doc, &mut measurer, node, rect, text)
        })?;
        Ok(doc.finish(canvas))
    }
}

fn paint_node(
    doc: &mut SvgDocument,
    measurer: &mut TextMeasurer,
    node: &Node,
    rect: BoxRect,
    text: Option<&TextSpec>,
) -> CardResult<()> {
    let style = node.style();
    if let Some(bg) = style.background {
        doc.rect(rect, bg, style.border_radius);
    }

    match node {
        Node::Container { .. } => {}
        Node::Image { src, .. } => {
            doc.image(
                rect,
                src,
                style.object_fit.unwrap_or(ObjectFit::Contain),
                style.border_radius,
            );
        }
        Node::Text { .. } => {
            let spec = text.ok_or_else(|| CardError::layout("text node without typography"))?;
            paint_text(doc, measurer, style, spec, rect);
        }
    }
    Ok(())
}

fn paint_text(
    doc: &mut SvgDocument,
    measurer: &mut TextMeasurer,
    style: &Style,
    spec: &TextSpec,
    rect: BoxRect,
) {
    let pad = style.padding.unwrap_or_default();
    let content_w = (rect.w - pad.left - pad.right).max(0.0);
    let shaped = measurer.shape(spec, Some(content_w + WRAP_TOLERANCE_PX));

    let paint = TextPaint {
        family: style.font_family.unwrap_or(FONT_FAMILY),
        size_px: spec.size_px,
        weight: spec.weight,
        italic: spec.italic,
        letter_spacing_px: spec.letter_spacing_px,
        color: style.color.unwrap_or(Rgb8::new(0, 0, 0)),
    };
    let (x, anchor) = match spec.align {
        TextAlign::Start => (rect.x + pad.left, Anchor::Start),
        TextAlign::Center => (rect.x + pad.left + content_w / 2.0, Anchor::Middle),
    };

    for (i, line) in shaped.lines.iter().enumerate() {
        if line.text.is_empty() {
            continue;
        }
        // Half-leading above and below the glyph box, as in CSS.
        let top = rect.y + pad.top + i as f32 * spec.line_height_px;
        let baseline = top + (spec.line_height_px - (line.ascent + line.descent)) / 2.0 + line.ascent;
        doc.text_line(x, baseline, anchor, &line.text, &paint);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
