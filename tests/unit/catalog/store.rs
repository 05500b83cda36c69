use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "songcard_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

const NIGHTFALL: &str = "---\ntitle: Nightfall\nalbum: Echoes\ncoverArt: /covers/nightfall.jpg\ntrack: 3\nwriters:\n  - A. Writer\n---\n\nLyrics here.\n";

#[test]
fn split_frontmatter_handles_crlf_and_bom() {
    let (fm, body) = split_frontmatter("\u{feff}---\r\ntitle: X\r\n---\r\nbody").unwrap();
    assert_eq!(fm, "title: X\r\n");
    assert_eq!(body, "body");

    assert!(split_frontmatter("title: X\n").is_none());
    assert!(split_frontmatter("---\ntitle: X\n").is_none());
}

#[test]
fn parse_song_reads_known_fields() {
    let song = parse_song(NIGHTFALL).unwrap();
    assert_eq!(song.title, "Nightfall");
    assert_eq!(song.track, Some(3));
    assert_eq!(song.writers.as_deref(), Some(&["A. Writer".to_string()][..]));
    let record = song.to_record();
    assert_eq!(record.album.as_deref(), Some("Echoes"));
    assert_eq!(record.featured_excerpt, None);
}

#[test]
fn parse_song_requires_title() {
    let err = parse_song("---\nalbum: Echoes\n---\n").unwrap_err();
    assert!(matches!(err, CardError::Catalog(_)));
}

#[test]
fn markdown_catalog_lists_sorted_nested_ids() {
    let tmp = temp_dir("catalog_list");
    std::fs::create_dir_all(tmp.join("echoes")).unwrap();
    std::fs::write(tmp.join("zeta.md"), "---\ntitle: Zeta\n---\n").unwrap();
    std::fs::write(tmp.join("echoes").join("nightfall.md"), NIGHTFALL).unwrap();
    std::fs::write(tmp.join("notes.txt"), "ignored").unwrap();

    let entries = MarkdownCatalog::new(&tmp).list_entries().unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["echoes/nightfall", "zeta"]);
    assert_eq!(entries[1].record.title, "Zeta");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn markdown_catalog_names_bad_file() {
    let tmp = temp_dir("catalog_bad");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("broken.md"), "no frontmatter").unwrap();

    let err = MarkdownCatalog::new(&tmp).list_entries().unwrap_err();
    assert!(err.to_string().contains("broken.md"));

    std::fs::remove_dir_all(&tmp).ok();
}
