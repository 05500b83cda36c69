use super::*;
use crate::template::node::NodeKind;

#[test]
fn canvases_match_fixed_sizes() {
    assert_eq!(Variant::LandscapeCompact.canvas(), Canvas::new(1200, 630));
    assert_eq!(Variant::LandscapeDetailed.canvas(), Canvas::new(1200, 630));
    assert_eq!(Variant::PortraitShare.canvas(), Canvas::new(1080, 1350));
}

#[test]
fn parse_accepts_names_and_route_aliases() {
    for v in Variant::ALL {
        assert_eq!(v.name().parse::<Variant>().unwrap(), v);
        assert_eq!(v.route_prefix().parse::<Variant>().unwrap(), v);
    }
}

#[test]
fn parse_unknown_variant_fails_loudly() {
    let err = "square".parse::<Variant>().unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
    assert!(err.to_string().contains("landscape-compact"));
}

#[test]
fn artifact_paths_are_keyed_by_variant_and_id() {
    assert_eq!(
        Variant::LandscapeCompact.artifact_path("nightfall"),
        "og/nightfall.png"
    );
    assert_eq!(
        Variant::LandscapeDetailed.artifact_path("echoes/nightfall"),
        "og-detailed/echoes/nightfall.png"
    );
    assert_eq!(
        Variant::PortraitShare.artifact_path("nightfall"),
        "share/nightfall.png"
    );
}

#[test]
fn compose_is_deterministic_and_never_embeds_images_without_cover() {
    let record = MetadataRecord::new("Untitled").with_excerpt("hold on");
    for v in Variant::ALL {
        let a = v.compose(&record, &InlineAsset::Absent);
        let b = v.compose(&record, &InlineAsset::Absent);
        assert_eq!(a, b);
        assert_eq!(a.count_kind(NodeKind::Image), 0);
    }
}

#[test]
fn tree_serializes_with_kind_tags() {
    let tree = Variant::LandscapeCompact.compose(&MetadataRecord::new("A"), &InlineAsset::Absent);
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["kind"], "container");
    assert_eq!(json["children"][1]["children"][1]["text"], "A");
    assert_eq!(json["style"]["background"], "#020303");
}
