use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

struct CountingLoader {
    calls: Arc<AtomicUsize>,
}

impl FontLoader for CountingLoader {
    fn load(&self) -> CardResult<FontSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(FontSet::new(vec![1, 2, 3], vec![4, 5, 6]))
    }
}

struct FailingLoader {
    calls: Arc<AtomicUsize>,
}

impl FontLoader for FailingLoader {
    fn load(&self) -> CardResult<FontSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CardError::font("missing"))
    }
}

#[test]
fn concurrent_first_access_loads_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = FontCache::new(CountingLoader {
        calls: calls.clone(),
    });

    let results: Vec<FontSet> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| cache.get_fonts().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for fonts in &results {
        assert!(Arc::ptr_eq(&fonts.regular, &results[0].regular));
        assert_eq!(&*fonts.bold, &[4, 5, 6]);
    }

    cache.get_fonts().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.is_loaded());
}

#[test]
fn failed_load_surfaces_font_error_and_stays_empty() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = FontCache::new(FailingLoader {
        calls: calls.clone(),
    });

    let err = cache.get_fonts().unwrap_err();
    assert!(matches!(err, CardError::Font(_)));
    assert!(!cache.is_loaded());
}

#[test]
fn dir_loader_reports_missing_files_as_font_errors() {
    let dir = std::env::temp_dir().join(format!("songcard_no_fonts_{}", std::process::id()));
    let err = DirFontLoader::new(&dir).load().unwrap_err();
    assert!(matches!(err, CardError::Font(_)));
    assert!(err.to_string().contains(REGULAR_FONT_FILE));
}

#[test]
fn dir_loader_reads_both_faces() {
    let dir = std::env::temp_dir().join(format!(
        "songcard_fonts_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("r.ttf"), b"regular").unwrap();
    std::fs::write(dir.join("b.ttf"), b"bold").unwrap();

    let fonts = DirFontLoader::with_files(&dir, "r.ttf", "b.ttf")
        .load()
        .unwrap();
    assert_eq!(&*fonts.regular, b"regular");
    assert_eq!(fonts.for_weight(700), b"bold");
    assert_eq!(fonts.for_weight(400), b"regular");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn global_cache_is_installed_once() {
    let first_calls = Arc::new(AtomicUsize::new(0));
    let later_calls = Arc::new(AtomicUsize::new(0));

    let a = FontCache::global(CountingLoader {
        calls: first_calls.clone(),
    });
    let b = FontCache::global(FailingLoader {
        calls: later_calls.clone(),
    });
    assert!(Arc::ptr_eq(&a, &b));

    assert_eq!(&*b.get_fonts().unwrap().regular, &[1, 2, 3]);
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
}
