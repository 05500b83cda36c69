//! Minimal SVG document writer for laid-out cards.

use crate::{
    assets::resolve::EmbeddedImage,
    foundation::core::{Canvas, Rgb8},
    layout::flex::BoxRect,
    template::style::ObjectFit,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
}

/// Paint attributes shared by every line of one text leaf.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextPaint<'a> {
    pub(crate) family: &'a str,
    pub(crate) size_px: f32,
    pub(crate) weight: u16,
    pub(crate) italic: bool,
    pub(crate) letter_spacing_px: f32,
    pub(crate) color: Rgb8,
}

/// Elements are emitted in paint order. Clip ids are sequential, so identical input always
/// yields identical markup.
#[derive(Debug, Default)]
pub(crate) struct SvgDocument {
    defs: String,
    body: String,
    next_clip: u32,
}

impl SvgDocument {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn rect(&mut self, r: BoxRect, fill: Rgb8, radius: Option<f32>) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{} fill="{fill}"/>"#,
            num(r.x),
            num(r.y),
            num(r.w),
            num(r.h),
            radius_attr(radius),
        ));
    }

    pub(crate) fn text_line(&mut self, x: f32, baseline: f32, anchor: Anchor, text: &str, p: &TextPaint<'_>) {
        let mut attrs = format!(
            r#"x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}""#,
            num(x),
            num(baseline),
            escape_xml(p.family),
            num(p.size_px),
            p.weight,
        );
        if p.italic {
            attrs.push_str(r#" font-style="italic""#);
        }
        if p.letter_spacing_px != 0.0 {
            attrs.push_str(&format!(r#" letter-spacing="{}""#, num(p.letter_spacing_px)));
        }
        if anchor == Anchor::Middle {
            attrs.push_str(r#" text-anchor="middle""#);
        }
        self.body.push_str(&format!(
            r#"<text {attrs} fill="{}" xml:space="preserve">{}</text>"#,
            p.color,
            escape_xml(text),
        ));
    }

    /// Cover-fitted and rounded images are clipped to their box.
    pub(crate) fn image(&mut self, r: BoxRect, src: &EmbeddedImage, fit: ObjectFit, radius: Option<f32>) {
        let aspect = match fit {
            ObjectFit::Contain => "xMidYMid meet",
            ObjectFit::Cover => "xMidYMid slice",
        };
        let clip = if fit == ObjectFit::Cover || radius.is_some() {
            let id = self.push_clip(r, radius);
            format!(r#" clip-path="url(#{id})""#)
        } else {
            String::new()
        };
        self.body.push_str(&format!(
            r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="{aspect}"{clip} xlink:href="{}"/>"#,
            num(r.x),
            num(r.y),
            num(r.w),
            num(r.h),
            src.data_url(),
        ));
    }

    fn push_clip(&mut self, r: BoxRect, radius: Option<f32>) -> String {
        let id = format!("clip{}", self.next_clip);
        self.next_clip += 1;
        self.defs.push_str(&format!(
            r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"{}/></clipPath>"#,
            num(r.x),
            num(r.y),
            num(r.w),
            num(r.h),
            radius_attr(radius),
        ));
        id
    }

    pub(crate) fn finish(self, canvas: Canvas) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height,
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            out.push_str(&self.defs);
            out.push_str("</defs>");
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }
}

fn radius_attr(radius: Option<f32>) -> String {
    match radius {
        Some(rx) if rx > 0.0 => format!(r#" rx="{}""#, num(rx)),
        _ => String::new(),
    }
}

/// Coordinates rounded to 1/100 px.
pub(crate) fn num(v: f32) -> String {
    let v = (v * 100.0).round() / 100.0;
    if v == 0.0 { "0".to_string() } else { v.to_string() }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/svg.rs"]
mod tests;
