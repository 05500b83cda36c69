use super::*;
use crate::{assets::resolve::EmbeddedImage, template::node::NodeKind};

fn cover() -> InlineAsset {
    InlineAsset::Embedded(EmbeddedImage::from_bytes("image/png", &[0x89, b'P', b'N', b'G']))
}

fn texts(tree: &Node) -> Vec<&str> {
    tree.children()
        .iter()
        .filter_map(Node::text_content)
        .collect()
}

#[test]
fn full_record_orders_children_top_to_bottom() {
    let record = MetadataRecord::new("Nightfall")
        .with_album("Echoes")
        .with_excerpt("hold on");
    let tree = share(&record, &cover());

    let kinds: Vec<NodeKind> = tree.children().iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        [
            NodeKind::Text,
            NodeKind::Image,
            NodeKind::Text,
            NodeKind::Text,
            NodeKind::Text,
            NodeKind::Container,
            NodeKind::Text,
        ]
    );
    assert_eq!(
        texts(&tree),
        [
            BRAND_LABEL,
            "Nightfall",
            "Echoes",
            "\u{201C}hold on\u{201D}",
            FOOTER_URL
        ]
    );

    let art = &tree.children()[1];
    assert_eq!(art.style().border_radius, Some(ART_RADIUS));
    assert_eq!(art.style().object_fit, Some(ObjectFit::Cover));
}

#[test]
fn spacer_grows_and_footer_is_last() {
    let tree = share(&MetadataRecord::new("A"), &cover());
    let n = tree.children().len();
    let spacer = &tree.children()[n - 2];
    assert_eq!(spacer.style().flex_grow, Some(1.0));
    assert!(spacer.children().is_empty());
    assert_eq!(tree.children()[n - 1].text_content(), Some(FOOTER_URL));
}

#[test]
fn optional_fields_remove_nodes() {
    let full = share(
        &MetadataRecord::new("A").with_album("B").with_excerpt("C"),
        &cover(),
    );
    let bare = share(&MetadataRecord::new("A"), &cover());
    assert_eq!(full.children().len(), bare.children().len() + 2);
}

#[test]
fn missing_cover_uses_placeholder_not_image() {
    let tree = share(&MetadataRecord::new("A"), &InlineAsset::Absent);
    assert_eq!(tree.count_kind(NodeKind::Image), 0);
    assert!(
        tree.iter()
            .any(|n| n.text_content() == Some(PLACEHOLDER_GLYPH))
    );
}

#[test]
fn excerpt_is_width_constrained() {
    let tree = share(&MetadataRecord::new("A").with_excerpt("C"), &cover());
    let excerpt = tree
        .iter()
        .find(|n| n.text_content() == Some("\u{201C}C\u{201D}"))
        .unwrap();
    assert_eq!(
        excerpt.style().max_width,
        Some(crate::foundation::core::Length::Px(860.0))
    );
}

#[test]
fn each_optional_field_removes_exactly_one_node() {
    let full = MetadataRecord::new("A").with_album("B").with_excerpt("C");
    let full_len = share(&full, &cover()).children().len();

    let mut no_album = full.clone();
    no_album.album = None;
    let tree = share(&no_album, &cover());
    assert_eq!(tree.children().len(), full_len - 1);
    assert!(!texts(&tree).contains(&"B"));

    let mut no_excerpt = full.clone();
    no_excerpt.featured_excerpt = None;
    let tree = share(&no_excerpt, &cover());
    assert_eq!(tree.children().len(), full_len - 1);
    assert!(!texts(&tree).contains(&"\u{201C}C\u{201D}"));
}

#[test]
fn art_yields_height_to_long_text() {
    for asset in [cover(), InlineAsset::Absent] {
        let tree = share(&MetadataRecord::new("A").with_excerpt("C"), &asset);
        let art = &tree.children()[1];
        assert_eq!(art.style().flex_shrink, None);

        let clamped: Vec<Option<u32>> = tree
            .children()
            .iter()
            .filter(|n| matches!(n.text_content(), Some("A") | Some("\u{201C}C\u{201D}")))
            .map(|n| n.style().max_lines)
            .collect();
        assert_eq!(clamped, [Some(TITLE_MAX_LINES), Some(EXCERPT_MAX_LINES)]);
    }
}
