use std::sync::Arc;

use super::*;
use crate::{
    assets::fonts::{FontCache, FontLoader, FontSet},
    catalog::model::SongFrontmatter,
    foundation::core::Canvas,
    template::node::NodeKind,
    test_support::temp_dir,
};

struct FakeFonts;

impl FontLoader for FakeFonts {
    fn load(&self) -> CardResult<FontSet> {
        Ok(FontSet::new(vec![1], vec![2]))
    }
}

/// Markup names the canvas and how many images the tree embeds.
struct DescribeLayout;

impl LayoutEngine for DescribeLayout {
    fn layout(&self, tree: &Node, canvas: Canvas, _fonts: &FontSet) -> CardResult<String> {
        Ok(format!("{canvas} images={}", tree.count_kind(NodeKind::Image)))
    }
}

struct EchoRaster;

impl Rasterizer for EchoRaster {
    fn rasterize(&self, svg: &str, target_width: u32, _fonts: &FontSet) -> CardResult<Vec<u8>> {
        Ok(format!("{svg} w={target_width}").into_bytes())
    }
}

struct FailOnTitle(&'static str);

impl LayoutEngine for FailOnTitle {
    fn layout(&self, tree: &Node, _canvas: Canvas, _fonts: &FontSet) -> CardResult<String> {
        if tree.iter().any(|n| n.text_content() == Some(self.0)) {
            return Err(CardError::layout("refusing title"));
        }
        Ok(String::new())
    }
}

fn renderer() -> Renderer<DescribeLayout, EchoRaster> {
    Renderer::with_engines(Arc::new(FontCache::new(FakeFonts)), DescribeLayout, EchoRaster)
}

fn entry(id: &str, title: &str, cover: Option<&str>) -> CatalogEntry {
    CatalogEntry::from_song(
        id,
        SongFrontmatter {
            title: title.to_string(),
            cover_art: cover.map(str::to_string),
            ..SongFrontmatter::default()
        },
    )
}

fn assets_with_cover() -> AssetResolver {
    let root = temp_dir("pipeline_assets");
    std::fs::create_dir_all(root.join("covers")).unwrap();
    std::fs::write(root.join("covers/nightfall.jpg"), [0xff, 0xd8, 0xff]).unwrap();
    AssetResolver::new(root)
}

#[test]
fn compose_card_embeds_existing_cover_only() {
    let resolver = assets_with_cover();
    let with = MetadataRecord::new("A").with_cover_art("/covers/nightfall.jpg");
    let missing = MetadataRecord::new("A").with_cover_art("/covers/missing.jpg");

    for v in Variant::ALL {
        assert_eq!(compose_card(&resolver, &with, v).count_kind(NodeKind::Image), 1);
        assert_eq!(compose_card(&resolver, &missing, v).count_kind(NodeKind::Image), 0);
    }
}

#[test]
fn build_writes_every_variant_for_every_entry() {
    let resolver = assets_with_cover();
    let out = temp_dir("pipeline_out");
    let catalog = vec![
        entry("nightfall", "Nightfall", Some("/covers/nightfall.jpg")),
        entry("echoes/dawn", "Dawn", None),
    ];

    let report = build_catalog(&catalog, &renderer(), &resolver, &out, Some(2)).unwrap();
    assert_eq!(report.rendered, 6);

    let rel: Vec<String> = report
        .artifacts
        .iter()
        .map(|p| {
            p.strip_prefix(&out)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        rel,
        [
            "og/echoes/dawn.png",
            "og-detailed/echoes/dawn.png",
            "share/echoes/dawn.png",
            "og/nightfall.png",
            "og-detailed/nightfall.png",
            "share/nightfall.png",
        ]
    );

    let share = std::fs::read_to_string(out.join("share/nightfall.png")).unwrap();
    assert_eq!(share, "1080x1350 images=1 w=2160");
    let og = std::fs::read_to_string(out.join("og/echoes/dawn.png")).unwrap();
    assert_eq!(og, "1200x630 images=0 w=2400");
}

#[test]
fn build_output_does_not_depend_on_thread_count() {
    let resolver = assets_with_cover();
    let catalog = vec![
        entry("a", "A", Some("/covers/nightfall.jpg")),
        entry("b", "B", None),
        entry("c", "C", None),
    ];

    let one = temp_dir("pipeline_one");
    let many = temp_dir("pipeline_many");
    build_catalog(&catalog, &renderer(), &resolver, &one, Some(1)).unwrap();
    build_catalog(&catalog, &renderer(), &resolver, &many, Some(4)).unwrap();

    for v in Variant::ALL {
        for id in ["a", "b", "c"] {
            let rel = v.artifact_path(id);
            assert_eq!(
                std::fs::read(one.join(&rel)).unwrap(),
                std::fs::read(many.join(&rel)).unwrap()
            );
        }
    }
}

#[test]
fn first_failure_aborts_the_build() {
    let resolver = AssetResolver::new(temp_dir("pipeline_noassets"));
    let out = temp_dir("pipeline_fail");
    let catalog = vec![entry("a", "Fine", None), entry("b", "Broken", None)];
    let r = Renderer::with_engines(
        Arc::new(FontCache::new(FakeFonts)),
        FailOnTitle("Broken"),
        EchoRaster,
    );

    let err = build_catalog(&catalog, &r, &resolver, &out, None).unwrap_err();
    assert!(matches!(err, CardError::Layout(_)));
}

#[test]
fn zero_threads_is_rejected() {
    let resolver = AssetResolver::new(temp_dir("pipeline_zero"));
    let err = build_catalog(
        &Vec::<CatalogEntry>::new(),
        &renderer(),
        &resolver,
        &temp_dir("pipeline_zero_out"),
        Some(0),
    )
    .unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
}

#[test]
fn content_type_is_png() {
    assert_eq!(CONTENT_TYPE_PNG, "image/png");
}

#[tokio::test]
async fn async_card_matches_blocking_card() {
    let resolver = assets_with_cover();
    let record = MetadataRecord::new("Nightfall").with_cover_art("covers/nightfall.jpg");
    let r = renderer();

    let a = render_card(&r, &resolver, record.clone(), Variant::PortraitShare)
        .await
        .unwrap();
    let b = render_card_blocking(&r, &resolver, &record, Variant::PortraitShare).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, b"1080x1350 images=1 w=2160");
}
