use std::borrow::Cow;

use crate::{
    assets::fonts::FontSet,
    foundation::error::{CardError, CardResult},
    template::style::{FontStyle, FontWeight, Style, TextAlign, TextTransform},
};

/// CSS `line-height: normal` approximation used when a node sets none.
pub(crate) const NORMAL_LINE_HEIGHT: f32 = 1.2;

const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Resolved typography of one text leaf.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TextSpec {
    /// Text after `text-transform`.
    pub(crate) text: String,
    pub(crate) size_px: f32,
    pub(crate) weight: u16,
    pub(crate) italic: bool,
    pub(crate) letter_spacing_px: f32,
    pub(crate) line_height_px: f32,
    pub(crate) align: TextAlign,
    pub(crate) max_width_px: Option<f32>,
    /// Lines kept after breaking; the rest is cut and ellipsized.
    pub(crate) max_lines: Option<usize>,
}

impl TextSpec {
    pub(crate) fn from_style(style: &Style, text: &str) -> CardResult<Self> {
        let size_px = style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::layout("font size must be finite and > 0"));
        }

        let text = match style.text_transform {
            Some(TextTransform::Uppercase) => text.to_uppercase(),
            Some(TextTransform::None) | None => text.to_string(),
        };

        let max_width_px = match style.max_width {
            Some(crate::foundation::core::Length::Px(w)) => Some(w),
            _ => None,
        };

        Ok(Self {
            text,
            size_px,
            weight: style.font_weight.unwrap_or(FontWeight::Regular).numeric(),
            italic: style.font_style == Some(FontStyle::Italic),
            letter_spacing_px: style.letter_spacing_px(),
            line_height_px: size_px * style.line_height.unwrap_or(NORMAL_LINE_HEIGHT),
            align: style.text_align.unwrap_or(TextAlign::Start),
            max_width_px,
            max_lines: style.max_lines.map(|n| n.max(1) as usize),
        })
    }
}

/// One broken line of text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShapedLine {
    pub(crate) text: String,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ShapedText {
    pub(crate) lines: Vec<ShapedLine>,
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Lines were dropped by `max_lines`.
    pub(crate) truncated: bool,
}

/// Parley-backed line breaking and measurement over the card font pair.
pub(crate) struct TextMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    regular_family: String,
    bold_family: String,
}

impl TextMeasurer {
    pub(crate) fn new(fonts: &FontSet) -> CardResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular_family = register_family(&mut font_ctx, &fonts.regular)?;
        let bold_family = register_family(&mut font_ctx, &fonts.bold)?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular_family,
            bold_family,
        })
    }

    /// Family name parley resolved for the regular face.
    pub(crate) fn regular_family(&self) -> &str {
        &self.regular_family
    }

    /// Break `spec` into lines no wider than `max_width` (unbounded when `None`).
    pub(crate) fn shape(&mut self, spec: &TextSpec, max_width: Option<f32>) -> ShapedText {
        let max_width = match (max_width, spec.max_width_px) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        let family = if spec.weight >= 600 {
            self.bold_family.clone()
        } else {
            self.regular_family.clone()
        };

        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut self.font_ctx, &spec.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(spec.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(spec.weight)),
        ));
        if spec.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
        if spec.letter_spacing_px != 0.0 {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(
                spec.letter_spacing_px,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(&spec.text);
        layout.break_all_lines(max_width);

        let len = spec.text.len();
        let mut out = ShapedText::default();
        for line in layout.lines() {
            if spec.max_lines.is_some_and(|max| out.lines.len() >= max) {
                out.truncated = true;
                break;
            }
            let m = line.metrics();
            // Empty input still yields one line whose range ends past the text.
            let range = line.text_range();
            let text = spec
                .text
                .get(range.start.min(len)..range.end.min(len))
                .unwrap_or("")
                .trim_end()
                .to_string();
            out.width = out.width.max(m.advance);
            out.lines.push(ShapedLine {
                text,
                ascent: m.ascent,
                descent: m.descent,
            });
        }
        if out.truncated {
            ellipsize(&mut out.lines);
        }
        out.height = out.lines.len() as f32 * spec.line_height_px;
        out
    }
}

/// Drop the last word of the final kept line and mark the cut with an ellipsis.
fn ellipsize(lines: &mut [ShapedLine]) {
    let Some(last) = lines.last_mut() else {
        return;
    };
    if let Some(cut) = last.text.rfind(' ') {
        last.text.truncate(cut);
    }
    let kept = last.text.trim_end().len();
    last.text.truncate(kept);
    last.text.push('\u{2026}');
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> CardResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CardError::font("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| CardError::font("registered font family has no name"))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
