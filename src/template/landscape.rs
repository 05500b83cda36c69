//! 1200x630 cards: square cover panel on the left, text stack on the right.

use crate::{
    assets::resolve::InlineAsset,
    catalog::model::MetadataRecord,
    foundation::core::Edges,
    template::{
        node::Node,
        style::{Align, BRAND_LABEL, ObjectFit, PLACEHOLDER_GLYPH, Style, palette},
    },
};

const PANEL_SIDE: f32 = 630.0;

/// Cover contained in the square, album optional.
pub fn compact(record: &MetadataRecord, cover: &InlineAsset) -> Node {
    let mut stack = vec![brand(), title(record, 56.0)];
    if let Some(album) = &record.album {
        stack.push(album_line(album));
    }

    frame(cover_panel(cover, ObjectFit::Contain), stack)
}

const TITLE_MAX_LINES: u32 = 3;
const EXCERPT_MAX_LINES: u32 = 5;

/// Cover cropped to fill the square, album and quoted excerpt optional.
pub fn detailed(record: &MetadataRecord, cover: &InlineAsset) -> Node {
    let mut stack = vec![brand(), title(record, 52.0)];
    if let Some(album) = &record.album {
        stack.push(album_line(album));
    }
    if let Some(excerpt) = &record.featured_excerpt {
        stack.push(Node::text(
            Style::text(24.0)
                .italic()
                .color(palette::TEXT_EXCERPT)
                .line_height(1.5)
                .max_lines(EXCERPT_MAX_LINES)
                .margin(Edges::top(24.0)),
            format!("\u{201C}{excerpt}\u{201D}"),
        ));
    }

    frame(cover_panel(cover, ObjectFit::Cover), stack)
}

fn frame(left: Node, stack: Vec<Node>) -> Node {
    let right = Node::container(
        Style::new()
            .column()
            .justify_content(Align::Center)
            .padding(Edges::symmetric(48.0, 56.0))
            .grow(1.0),
        stack,
    );

    Node::container(
        Style::new()
            .row()
            .fill_parent()
            .background(palette::BACKGROUND),
        vec![left, right],
    )
}

fn cover_panel(cover: &InlineAsset, fit: ObjectFit) -> Node {
    match cover.embedded() {
        Some(img) => Node::image(
            Style::new().square_px(PANEL_SIDE).fit(fit).no_shrink(),
            img.clone(),
        ),
        None => Node::container(
            Style::new()
                .square_px(PANEL_SIDE)
                .background(palette::PANEL)
                .centered()
                .no_shrink(),
            vec![Node::text(
                Style::text(120.0).color(palette::ACCENT),
                PLACEHOLDER_GLYPH,
            )],
        ),
    }
}

fn brand() -> Node {
    Node::text(
        Style::text(20.0)
            .bold()
            .color(palette::ACCENT)
            .letter_spacing(0.14)
            .uppercase()
            .margin(Edges::bottom(20.0)),
        BRAND_LABEL,
    )
}

fn title(record: &MetadataRecord, size: f32) -> Node {
    Node::text(
        Style::text(size)
            .bold()
            .color(palette::TEXT_PRIMARY)
            .line_height(1.15)
            .max_lines(TITLE_MAX_LINES),
        record.title.as_str(),
    )
}

fn album_line(album: &str) -> Node {
    Node::text(
        Style::text(22.0)
            .color(palette::TEXT_SECONDARY)
            .margin(Edges::top(20.0)),
        album,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/template/landscape.rs"]
mod tests;
