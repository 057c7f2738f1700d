//! End-to-end tile generation tests.

use wsi_deepzoom::{
    DeepZoomGenerator, GeneratorOptions, PixelBuffer, PixelLayout, RegionError, RegionFetcher,
    SlideMetadata, SourceLevel, TileError, TileFormat,
};

use super::test_utils::{init_tracing, rgb_at, GradientSlide};

/// Stitching all finest-level tiles with their overlap borders trimmed must
/// reconstruct the source image exactly, with every pixel written once.
#[test]
fn test_stitched_tiles_reconstruct_source() {
    init_tracing();

    const WIDTH: u64 = 300;
    const HEIGHT: u64 = 200;
    const TILE: u64 = 64;

    let generator = DeepZoomGenerator::new(
        GradientSlide::new(WIDTH, HEIGHT),
        GeneratorOptions::new()
            .tile_size(TILE as u32)
            .overlap(1)
            .format(TileFormat::Png),
    )
    .unwrap();

    let finest = generator.level_count() - 1;
    assert_eq!(generator.level_dimensions(finest), Some((WIDTH, HEIGHT)));
    let (cols, rows) = generator.level_tiles(finest).unwrap();
    assert_eq!((cols, rows), (5, 4));

    let mut canvas = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    let mut writes = vec![0u32; (WIDTH * HEIGHT) as usize];

    for row in 0..rows {
        for col in 0..cols {
            let tile = generator.tile(finest, col, row).unwrap();
            let decoded = image::load_from_memory(&tile.data).unwrap().to_rgb8();

            let info = generator.tile_info(finest, col, row).unwrap();
            assert_eq!((decoded.width(), decoded.height()), info.output);

            // Trim the overlap border shared with neighboring tiles.
            let trim_left = if col == 0 { 0 } else { 1u32 };
            let trim_top = if row == 0 { 0 } else { 1u32 };
            let trim_right = if col == cols - 1 { 0 } else { 1u32 };
            let trim_bottom = if row == rows - 1 { 0 } else { 1u32 };

            for ty in trim_top..decoded.height() - trim_bottom {
                for tx in trim_left..decoded.width() - trim_right {
                    let x = TILE * col + u64::from(tx - trim_left);
                    let y = TILE * row + u64::from(ty - trim_top);
                    let px = decoded.get_pixel(tx, ty).0;
                    let index = (y * WIDTH + x) as usize;
                    canvas[index * 3..index * 3 + 3].copy_from_slice(&px);
                    writes[index] += 1;
                }
            }
        }
    }

    for y in 0..HEIGHT as i64 {
        for x in 0..WIDTH as i64 {
            let index = (y as u64 * WIDTH + x as u64) as usize;
            assert_eq!(writes[index], 1, "pixel ({x}, {y}) written {} times", writes[index]);
            assert_eq!(
                &canvas[index * 3..index * 3 + 3],
                &rgb_at(x, y),
                "pixel ({x}, {y}) mismatch"
            );
        }
    }
}

#[test]
fn test_bgra_backend_is_normalized() {
    let slide = GradientSlide::with_levels(&[(128, 128, 1.0)], PixelLayout::Bgra8Premultiplied);
    let generator = DeepZoomGenerator::new(
        slide,
        GeneratorOptions::new().format(TileFormat::Png),
    )
    .unwrap();

    let finest = generator.level_count() - 1;
    let tile = generator.tile(finest, 0, 0).unwrap();
    let decoded = image::load_from_memory(&tile.data).unwrap().to_rgb8();

    for (x, y) in [(0i64, 0i64), (17, 42), (127, 127)] {
        assert_eq!(
            decoded.get_pixel(x as u32, y as u32).0,
            rgb_at(x, y),
            "pixel ({x}, {y})"
        );
    }
}

#[test]
fn test_jpeg_tile_embeds_icc_profile() {
    let slide = GradientSlide::new(256, 256).with_icc_profile(vec![0xA5; 2048]);
    let generator = DeepZoomGenerator::new(
        slide,
        GeneratorOptions::new().embed_icc(true),
    )
    .unwrap();

    let finest = generator.level_count() - 1;
    let tile = generator.tile(finest, 0, 0).unwrap();

    assert!(tile.profile_embedded);
    let signature = b"ICC_PROFILE\0";
    assert!(tile
        .data
        .windows(signature.len())
        .any(|w| w == signature));
}

#[test]
fn test_png_tile_embeds_icc_profile() {
    let slide = GradientSlide::new(256, 256).with_icc_profile(vec![0xA5; 2048]);
    let generator = DeepZoomGenerator::new(
        slide,
        GeneratorOptions::new().embed_icc(true).format(TileFormat::Png),
    )
    .unwrap();

    let finest = generator.level_count() - 1;
    let tile = generator.tile(finest, 0, 0).unwrap();
    assert!(tile.profile_embedded);
    // The tile still decodes with the extra metadata in place.
    assert!(image::load_from_memory(&tile.data).is_ok());
}

#[test]
fn test_icc_profile_not_embedded_unless_requested() {
    let slide = GradientSlide::new(256, 256).with_icc_profile(vec![0xA5; 2048]);
    let generator = DeepZoomGenerator::new(slide, GeneratorOptions::new()).unwrap();

    let finest = generator.level_count() - 1;
    let tile = generator.tile(finest, 0, 0).unwrap();

    assert!(!tile.profile_embedded);
    let signature = b"ICC_PROFILE\0";
    assert!(!tile
        .data
        .windows(signature.len())
        .any(|w| w == signature));
    // The profile is still available raw.
    assert!(generator.icc_profile().is_some());
}

#[test]
fn test_oversized_icc_profile_degrades_observably() {
    // 255 chunks of 65519 bytes is the ceiling; one byte more must skip.
    let too_big = 65519 * 255 + 1;
    let slide = GradientSlide::new(64, 64).with_icc_profile(vec![0x00; too_big]);
    let generator = DeepZoomGenerator::new(
        slide,
        GeneratorOptions::new().embed_icc(true),
    )
    .unwrap();

    let finest = generator.level_count() - 1;
    let tile = generator.tile(finest, 0, 0).unwrap();

    assert!(!tile.profile_embedded);
    assert_eq!(&tile.data[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_out_of_range_reported_distinctly_from_read_failure() {
    let generator =
        DeepZoomGenerator::new(GradientSlide::new(1000, 1000), GeneratorOptions::new()).unwrap();

    assert!(matches!(
        generator.tile(10, 4, 2),
        Err(TileError::OutOfRange { level: 10, col: 4, .. })
    ));
    assert!(matches!(
        generator.tile(42, 0, 0),
        Err(TileError::InvalidLevel { .. })
    ));
}

#[test]
fn test_short_read_is_rejected() {
    /// A backend that returns half the requested height.
    struct ShortFetcher {
        metadata: SlideMetadata,
    }

    impl RegionFetcher for ShortFetcher {
        fn metadata(&self) -> &SlideMetadata {
            &self.metadata
        }
        fn pixel_layout(&self) -> PixelLayout {
            PixelLayout::Rgb8
        }
        fn read_region(
            &self,
            _level: usize,
            _x: i64,
            _y: i64,
            width: u64,
            height: u64,
        ) -> Result<PixelBuffer, RegionError> {
            let height = (height / 2).max(1);
            let data = vec![0; (width * height * 3) as usize];
            PixelBuffer::new(width as u32, height as u32, PixelLayout::Rgb8, data)
                .map_err(|e| RegionError::Backend(e.to_string()))
        }
    }

    let generator = DeepZoomGenerator::new(
        ShortFetcher {
            metadata: SlideMetadata {
                levels: vec![SourceLevel {
                    width: 512,
                    height: 512,
                    downsample: 1.0,
                }],
                ..Default::default()
            },
        },
        GeneratorOptions::new(),
    )
    .unwrap();

    let finest = generator.level_count() - 1;
    assert!(matches!(
        generator.tile(finest, 0, 0),
        Err(TileError::Region(RegionError::SizeMismatch { .. }))
    ));
}

#[test]
fn test_failed_read_leaves_generator_usable() {
    /// A backend with a dead stripe: reads touching x >= 256 fail.
    struct StripedFetcher {
        metadata: SlideMetadata,
    }

    impl RegionFetcher for StripedFetcher {
        fn metadata(&self) -> &SlideMetadata {
            &self.metadata
        }
        fn pixel_layout(&self) -> PixelLayout {
            PixelLayout::Rgb8
        }
        fn read_region(
            &self,
            level: usize,
            x: i64,
            y: i64,
            width: u64,
            height: u64,
        ) -> Result<PixelBuffer, RegionError> {
            if x >= 256 {
                return Err(RegionError::Backend("stripe decode failed".to_string()));
            }
            let data = vec![0x7F; (width * height * 3) as usize];
            PixelBuffer::new(width as u32, height as u32, PixelLayout::Rgb8, data)
                .map_err(|e| RegionError::Backend(e.to_string()))
        }
    }

    let generator = DeepZoomGenerator::new(
        StripedFetcher {
            metadata: SlideMetadata {
                levels: vec![SourceLevel {
                    width: 512,
                    height: 512,
                    downsample: 1.0,
                }],
                ..Default::default()
            },
        },
        GeneratorOptions::new().tile_size(254),
    )
    .unwrap();

    let finest = generator.level_count() - 1;
    assert!(generator.tile(finest, 0, 0).is_ok());

    // The last column starts past the dead stripe and fails ...
    assert!(matches!(
        generator.tile(finest, 2, 0),
        Err(TileError::Region(RegionError::Backend(_)))
    ));

    // ... without affecting subsequent requests.
    assert!(generator.tile(finest, 0, 1).is_ok());
}

#[test]
fn test_quality_affects_jpeg_output() {
    let make = |quality: f32| {
        let generator = DeepZoomGenerator::new(
            GradientSlide::new(512, 512),
            GeneratorOptions::new().quality(quality),
        )
        .unwrap();
        let finest = generator.level_count() - 1;
        generator.tile(finest, 0, 0).unwrap().data
    };

    let low = make(0.2);
    let high = make(0.95);
    assert!(!low.is_empty());
    assert!(!high.is_empty());
    assert!(high.len() > low.len());
}
