//! 1080x1350 share card: one centered column with a footer pinned to the bottom.

use crate::{
    assets::resolve::InlineAsset,
    catalog::model::MetadataRecord,
    foundation::core::Edges,
    template::{
        node::Node,
        style::{
            Align, BRAND_LABEL, FOOTER_URL, ObjectFit, PLACEHOLDER_GLYPH, Style, palette,
        },
    },
};

const ART_SIDE: f32 = 860.0;
const ART_RADIUS: f32 = 20.0;
const TITLE_MAX_LINES: u32 = 2;
const EXCERPT_MAX_LINES: u32 = 3;

pub fn share(record: &MetadataRecord, cover: &InlineAsset) -> Node {
    let mut children = vec![Node::text(
        Style::text(22.0)
            .bold()
            .color(palette::ACCENT)
            .letter_spacing(0.16)
            .uppercase()
            .margin(Edges::bottom(36.0)),
        BRAND_LABEL,
    )];

    // No shrink guard on the art: long text takes its height so the footer stays on the canvas.
    children.push(match cover.embedded() {
        Some(img) => Node::image(
            Style::new()
                .square_px(ART_SIDE)
                .radius(ART_RADIUS)
                .fit(ObjectFit::Cover),
            img.clone(),
        ),
        None => Node::container(
            Style::new()
                .square_px(ART_SIDE)
                .radius(ART_RADIUS)
                .background(palette::PANEL)
                .centered(),
            vec![Node::text(
                Style::text(160.0).color(palette::ACCENT),
                PLACEHOLDER_GLYPH,
            )],
        ),
    });

    children.push(Node::text(
        Style::text(52.0)
            .bold()
            .color(palette::TEXT_PRIMARY)
            .text_center()
            .line_height(1.2)
            .max_lines(TITLE_MAX_LINES)
            .margin(Edges::top(36.0)),
        record.title.as_str(),
    ));

    if let Some(album) = &record.album {
        children.push(Node::text(
            Style::text(26.0)
                .color(palette::TEXT_SECONDARY)
                .text_center()
                .margin(Edges::top(10.0)),
            album.as_str(),
        ));
    }

    if let Some(excerpt) = &record.featured_excerpt {
        children.push(Node::text(
            Style::text(26.0)
                .italic()
                .color(palette::TEXT_EXCERPT)
                .text_center()
                .line_height(1.5)
                .max_width_px(ART_SIDE)
                .max_lines(EXCERPT_MAX_LINES)
                .margin(Edges::top(24.0)),
            format!("\u{201C}{excerpt}\u{201D}"),
        ));
    }

    children.push(Node::container(Style::new().grow(1.0), Vec::new()));

    children.push(Node::text(
        Style::text(20.0)
            .color(palette::TEXT_MUTED)
            .letter_spacing(0.04),
        FOOTER_URL,
    ));

    Node::container(
        Style::new()
            .column()
            .align_items(Align::Center)
            .fill_parent()
            .background(palette::BACKGROUND)
            .padding(Edges::all(48.0)),
        children,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/template/portrait.rs"]
mod tests;
