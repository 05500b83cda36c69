use super::*;
use crate::test_support::temp_dir;

#[test]
fn empty_object_yields_site_defaults() {
    let cfg = CardConfig::from_json("{}").unwrap();
    assert_eq!(cfg, CardConfig::default());
    assert_eq!(cfg.asset_root, PathBuf::from("public"));
    assert_eq!(cfg.font_dir, PathBuf::from("public/fonts"));
    assert_eq!(cfg.regular_font, "Inter-Regular.ttf");
    assert_eq!(cfg.scale, 2.0);
    assert_eq!(cfg.threads, None);
}

#[test]
fn camel_case_fields_override_defaults() {
    let cfg = CardConfig::from_json(
        r#"{ "assetRoot": "site/public", "outDir": "build/cards", "scale": 1.5, "threads": 3 }"#,
    )
    .unwrap();
    assert_eq!(cfg.asset_root, PathBuf::from("site/public"));
    assert_eq!(cfg.out_dir, PathBuf::from("build/cards"));
    assert_eq!(cfg.scale, 1.5);
    assert_eq!(cfg.threads, Some(3));
    assert_eq!(cfg.content_dir, PathBuf::from("src/content/songs"));
}

#[test]
fn invalid_values_are_validation_errors() {
    for json in [
        r#"{ "scale": 0 }"#,
        r#"{ "scale": -1.0 }"#,
        r#"{ "threads": 0 }"#,
        r#"{ "boldFont": " " }"#,
        r#"{ "scal": 2.0 }"#,
        "not json",
    ] {
        let err = CardConfig::from_json(json).unwrap_err();
        assert!(matches!(err, CardError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn load_reads_file_and_reports_missing_path() {
    let dir = temp_dir("config");
    let path = dir.join("songcard.json");
    std::fs::write(&path, r#"{ "fontDir": "fonts" }"#).unwrap();
    let cfg = CardConfig::load(&path).unwrap();
    assert_eq!(cfg.font_loader().dir(), Path::new("fonts"));

    let err = CardConfig::load(&dir.join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn collaborators_use_configured_roots() {
    let cfg = CardConfig {
        asset_root: PathBuf::from("a"),
        content_dir: PathBuf::from("c"),
        ..CardConfig::default()
    };
    assert_eq!(cfg.asset_resolver().root(), Path::new("a"));
    assert_eq!(cfg.catalog().root(), Path::new("c"));
}
