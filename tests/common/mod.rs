#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

const SYSTEM_PAIRS: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
];

pub fn temp_dir(name: &str) -> PathBuf {
    static SEQ: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "songcard_it_{name}_{}_{}",
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A font directory laid out like `public/fonts` (`Inter-Regular.ttf` + `Inter-Bold.ttf`), or
/// `None` when no real TrueType pair is available on this machine.
pub fn font_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("SONGCARD_TEST_FONT_DIR") {
        return Some(PathBuf::from(dir));
    }
    let (regular, bold) = SYSTEM_PAIRS
        .iter()
        .find(|(r, b)| Path::new(r).is_file() && Path::new(b).is_file())?;

    let dir = temp_dir("fonts");
    std::fs::copy(regular, dir.join(songcard::REGULAR_FONT_FILE)).ok()?;
    std::fs::copy(bold, dir.join(songcard::BOLD_FONT_FILE)).ok()?;
    Some(dir)
}

/// Write a solid-color PNG cover.
pub fn write_cover(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

pub fn decode_png(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8()
}

pub fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= tol)
}
