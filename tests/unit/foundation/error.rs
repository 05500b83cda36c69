use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CardError::asset("x").to_string().contains("asset error:"));
    assert!(
        CardError::font("x")
            .to_string()
            .contains("font resource error:")
    );
    assert!(CardError::layout("x").to_string().contains("layout error:"));
    assert!(CardError::raster("x").to_string().contains("raster error:"));
    assert!(
        CardError::catalog("x")
            .to_string()
            .contains("catalog error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
