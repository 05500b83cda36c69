//! Box-model style properties and the fixed card palette.

use serde::Serialize;

use crate::foundation::core::{Edges, Length, Rgb8};

/// Brand label shown on every card.
pub const BRAND_LABEL: &str = "Real Don Music";

/// Footer shown at the bottom of the portrait card.
pub const FOOTER_URL: &str = "lyrics.realdonmusic.com";

/// Glyph drawn in the placeholder panel when no cover art is available.
pub const PLACEHOLDER_GLYPH: &str = "\u{266B}";

/// Fixed card palette.
pub mod palette {
    use crate::foundation::core::Rgb8;

    /// Card background.
    pub const BACKGROUND: Rgb8 = Rgb8::hex(0x020303);
    /// Placeholder panel fill.
    pub const PANEL: Rgb8 = Rgb8::hex(0x0e1010);
    /// Brand accent (label and placeholder glyph).
    pub const ACCENT: Rgb8 = Rgb8::hex(0xf4ba0b);
    /// Title text.
    pub const TEXT_PRIMARY: Rgb8 = Rgb8::hex(0xffffff);
    /// Album text.
    pub const TEXT_SECONDARY: Rgb8 = Rgb8::hex(0x888888);
    /// Excerpt text.
    pub const TEXT_EXCERPT: Rgb8 = Rgb8::hex(0xcccccc);
    /// Footer text.
    pub const TEXT_MUTED: Rgb8 = Rgb8::hex(0x555555);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlexDirection {
    Row,
    Column,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    pub fn numeric(self) -> u16 {
        match self {
            Self::Regular => 400,
            Self::Bold => 700,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextTransform {
    None,
    Uppercase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Start,
    Center,
}

/// How an image fills its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectFit {
    /// Scale to fit inside the box, never cropping.
    Contain,
    /// Scale to cover the box, cropping overflow.
    Cover,
}

/// Layout, typography and color properties of a node. Unset properties use engine defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<FlexDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_grow: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_shrink: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb8>,
    /// Extra spacing between characters, in multiples of the font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing_em: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<TextTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Line clamp; overflowing text ends in an ellipsis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typography starting point: the card family at the given size.
    pub fn text(size_px: f32) -> Self {
        Self {
            font_family: Some(crate::assets::fonts::FONT_FAMILY),
            font_size: Some(size_px),
            font_weight: Some(FontWeight::Regular),
            ..Self::default()
        }
    }

    pub fn row(mut self) -> Self {
        self.flex_direction = Some(FlexDirection::Row);
        self
    }

    pub fn column(mut self) -> Self {
        self.flex_direction = Some(FlexDirection::Column);
        self
    }

    pub fn align_items(mut self, a: Align) -> Self {
        self.align_items = Some(a);
        self
    }

    pub fn justify_content(mut self, a: Align) -> Self {
        self.justify_content = Some(a);
        self
    }

    /// Center children on both axes.
    pub fn centered(self) -> Self {
        self.align_items(Align::Center).justify_content(Align::Center)
    }

    pub fn grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }

    pub fn no_shrink(mut self) -> Self {
        self.flex_shrink = Some(0.0);
        self
    }

    pub fn size(mut self, width: Length, height: Length) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn square_px(self, side: f32) -> Self {
        self.size(Length::Px(side), Length::Px(side))
    }

    pub fn fill_parent(self) -> Self {
        self.size(Length::FULL, Length::FULL)
    }

    pub fn max_width_px(mut self, v: f32) -> Self {
        self.max_width = Some(Length::Px(v));
        self
    }

    pub fn padding(mut self, e: Edges) -> Self {
        self.padding = Some(e);
        self
    }

    pub fn margin(mut self, e: Edges) -> Self {
        self.margin = Some(e);
        self
    }

    pub fn background(mut self, c: Rgb8) -> Self {
        self.background = Some(c);
        self
    }

    pub fn radius(mut self, px: f32) -> Self {
        self.border_radius = Some(px);
        self
    }

    pub fn fit(mut self, f: ObjectFit) -> Self {
        self.object_fit = Some(f);
        self
    }

    pub fn color(mut self, c: Rgb8) -> Self {
        self.color = Some(c);
        self
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = Some(FontWeight::Bold);
        self
    }

    pub fn italic(mut self) -> Self {
        self.font_style = Some(FontStyle::Italic);
        self
    }

    pub fn letter_spacing(mut self, em: f32) -> Self {
        self.letter_spacing_em = Some(em);
        self
    }

    pub fn line_height(mut self, factor: f32) -> Self {
        self.line_height = Some(factor);
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.text_transform = Some(TextTransform::Uppercase);
        self
    }

    pub fn text_center(mut self) -> Self {
        self.text_align = Some(TextAlign::Center);
        self
    }

    pub fn max_lines(mut self, n: u32) -> Self {
        self.max_lines = Some(n);
        self
    }

    /// Letter spacing resolved to pixels.
    pub fn letter_spacing_px(&self) -> f32 {
        self.letter_spacing_em.unwrap_or(0.0) * self.font_size.unwrap_or(0.0)
    }
}
