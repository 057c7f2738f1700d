//! DZI descriptor tests.

use wsi_deepzoom::{build_dzi, DeepZoomGenerator, GeneratorOptions, TileFormat};

use super::test_utils::GradientSlide;

#[test]
fn test_descriptor_shape() {
    let xml = build_dzi(46920, 33600, 254, 1, TileFormat::Jpeg);

    // Attribute names and casing are fixed by the DZI format.
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<Image xmlns="http://schemas.microsoft.com/deepzoom/2008""#));
    assert!(xml.contains(r#"TileSize="254""#));
    assert!(xml.contains(r#"Overlap="1""#));
    assert!(xml.contains(r#"Format="jpg""#));
    assert!(xml.contains(r#"<Size Width="46920" Height="33600" />"#));
    assert!(xml.ends_with("</Image>"));
}

#[test]
fn test_generator_descriptor_uses_full_resolution() {
    let generator = DeepZoomGenerator::new(
        GradientSlide::new(1000, 700),
        GeneratorOptions::new().format(TileFormat::Png).quality(0.5),
    )
    .unwrap();

    let xml = generator.dzi();
    // Level-0 size, never a per-level size.
    assert!(xml.contains(r#"<Size Width="1000" Height="700" />"#));
    assert!(xml.contains(r#"Format="png""#));
}

#[test]
fn test_descriptor_tracks_bounds_limiting() {
    let slide = GradientSlide::new(2000, 2000).with_bounds(10, 20, 1500, 1200);
    let generator = DeepZoomGenerator::new(
        slide,
        GeneratorOptions::new().limit_bounds(true),
    )
    .unwrap();

    assert!(generator
        .dzi()
        .contains(r#"<Size Width="1500" Height="1200" />"#));
}
