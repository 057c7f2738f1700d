//! The DeepZoom generator.
//!
//! `DeepZoomGenerator` ties the pieces together: it owns a backend's
//! [`RegionFetcher`], derives the immutable [`PyramidModel`] once at
//! construction, and serves tile requests by resolving the address, reading
//! the source region and encoding the pixels.
//!
//! All calls are synchronous and blocking. The generator is `Sync` exactly
//! when the fetcher is, so a backend that pins reads to one thread
//! restricts the generator the same way at compile time.

use bytes::Bytes;
use image::imageops::FilterType;
use tracing::debug;

use crate::encode::{encode_tile, EncodedTile};
use crate::error::{EncodeError, OpenError, RegionError, TileError};
use crate::manifest::build_dzi;
use crate::options::GeneratorOptions;
use crate::pyramid::{PyramidModel, TileInfo};
use crate::source::{PixelBuffer, PixelLayout, RegionFetcher};

/// DeepZoom tile generator over a pluggable slide backend.
///
/// # Example
///
/// ```ignore
/// use wsi_deepzoom::{DeepZoomGenerator, GeneratorOptions, TileFormat};
///
/// let fetcher = MyBackendFetcher::open("slide.svs")?;
/// let generator = DeepZoomGenerator::new(
///     fetcher,
///     GeneratorOptions::new().format(TileFormat::Jpeg).quality(0.8),
/// )?;
///
/// println!("{}", generator.dzi());
/// let tile = generator.tile(generator.level_count() - 1, 0, 0)?;
/// std::fs::write("0_0.jpg", &tile.data)?;
/// ```
pub struct DeepZoomGenerator<F: RegionFetcher> {
    fetcher: F,
    options: GeneratorOptions,
    model: PyramidModel,
}

impl<F: RegionFetcher> DeepZoomGenerator<F> {
    /// Build a generator over an open slide.
    ///
    /// The pyramid geometry is derived here, once; a failed construction
    /// returns the fetcher's backend handle to the caller by dropping it,
    /// and no half-open generator ever exists.
    pub fn new(fetcher: F, options: GeneratorOptions) -> Result<Self, OpenError> {
        options.validate()?;

        let metadata = fetcher.metadata();
        let bounds = if options.limit_bounds {
            metadata.bounds
        } else {
            None
        };
        let model = PyramidModel::new(metadata, options.tile_size, options.overlap, bounds)?;

        debug!(
            dz_levels = model.level_count(),
            source_levels = model.source_level_count(),
            total_tiles = model.total_tile_count(),
            "deepzoom pyramid ready"
        );

        Ok(Self {
            fetcher,
            options,
            model,
        })
    }

    /// Number of DeepZoom levels.
    pub fn level_count(&self) -> usize {
        self.model.level_count()
    }

    /// Dimensions of a DeepZoom level (coarsest is level 0).
    pub fn level_dimensions(&self, level: usize) -> Option<(u64, u64)> {
        self.model.level_dimensions(level)
    }

    /// Dimensions of every DeepZoom level, coarsest first.
    pub fn all_level_dimensions(&self) -> &[(u64, u64)] {
        self.model.all_level_dimensions()
    }

    /// Tile grid `(cols, rows)` of a DeepZoom level.
    pub fn level_tiles(&self, level: usize) -> Option<(u64, u64)> {
        self.model.level_tiles(level)
    }

    /// Tile grid of every DeepZoom level, coarsest first.
    pub fn all_level_tiles(&self) -> &[(u64, u64)] {
        self.model.all_level_tiles()
    }

    /// Total number of tiles across all levels.
    pub fn tile_count(&self) -> u64 {
        self.model.total_tile_count()
    }

    /// Full-resolution dimensions after bounds limiting.
    pub fn dimensions(&self) -> (u64, u64) {
        let finest = self.model.level_count() - 1;
        self.model
            .level_dimensions(finest)
            .unwrap_or((0, 0))
    }

    /// Microns per pixel at full resolution, if the slide is calibrated.
    pub fn mpp(&self) -> Option<f64> {
        self.fetcher.metadata().mpp
    }

    /// Raw ICC profile bytes, if the slide carries a color profile.
    pub fn icc_profile(&self) -> Option<&Bytes> {
        self.fetcher.metadata().icc_profile.as_ref()
    }

    /// Slide background color as `#rrggbb`, if declared.
    pub fn background_color(&self) -> Option<&str> {
        self.fetcher.metadata().background_color.as_deref()
    }

    /// The immutable pyramid geometry.
    pub fn model(&self) -> &PyramidModel {
        &self.model
    }

    /// The construction options.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// The backend fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve a tile address without touching the backend.
    ///
    /// This is the diagnostic counterpart of [`tile`](Self::tile): it
    /// reports which source level the tile reads, the level-0 location and
    /// the source-region and output sizes.
    pub fn tile_info(&self, level: usize, col: u64, row: u64) -> Result<TileInfo, TileError> {
        self.model.tile_info(level, col, row)
    }

    /// Read a tile's pixels from the backend, unencoded.
    pub fn tile_pixels(&self, level: usize, col: u64, row: u64) -> Result<PixelBuffer, TileError> {
        let info = self.model.tile_info(level, col, row)?;
        let buffer = self.fetcher.read_region(
            info.source_level,
            info.location.0,
            info.location.1,
            info.region.0,
            info.region.1,
        )?;

        if u64::from(buffer.width()) != info.region.0 || u64::from(buffer.height()) != info.region.1
        {
            return Err(TileError::Region(RegionError::SizeMismatch {
                width: info.region.0,
                height: info.region.1,
                actual_width: buffer.width(),
                actual_height: buffer.height(),
            }));
        }
        Ok(buffer)
    }

    /// Read a tile and normalize it to interleaved RGBA bytes.
    ///
    /// Returns `(width, height, bytes)`.
    pub fn tile_rgba(
        &self,
        level: usize,
        col: u64,
        row: u64,
    ) -> Result<(u32, u32, Vec<u8>), TileError> {
        let buffer = self.tile_pixels(level, col, row)?;
        Ok((buffer.width(), buffer.height(), buffer.to_rgba()))
    }

    /// Read and encode a tile using the construction options.
    ///
    /// The encoded tile's dimensions always equal the address's output
    /// size: when the source pyramid forces a residual downsample, the
    /// region read from the backend is resampled here before encoding.
    ///
    /// A region or encode failure affects only this call; the generator
    /// stays usable for other tiles.
    pub fn tile(&self, level: usize, col: u64, row: u64) -> Result<EncodedTile, TileError> {
        let info = self.model.tile_info(level, col, row)?;
        let buffer = self.tile_pixels(level, col, row)?;
        let buffer = resample_to_output(buffer, info.output)?;
        let profile = if self.options.embed_icc {
            self.fetcher.metadata().icc_profile.as_deref()
        } else {
            None
        };
        let encoded = encode_tile(&buffer, &self.options, profile)?;
        Ok(encoded)
    }

    /// The DZI XML descriptor for this pyramid.
    pub fn dzi(&self) -> String {
        let (width, height) = self.dimensions();
        build_dzi(
            width,
            height,
            self.options.tile_size,
            self.options.overlap,
            self.options.format,
        )
    }
}

/// Scale a region buffer down to the tile's output size.
///
/// A no-op for the common case of power-of-two source pyramids, where the
/// region already has the output dimensions.
fn resample_to_output(buffer: PixelBuffer, output: (u32, u32)) -> Result<PixelBuffer, TileError> {
    if (buffer.width(), buffer.height()) == output {
        return Ok(buffer);
    }

    let image = image::RgbImage::from_raw(buffer.width(), buffer.height(), buffer.to_rgb())
        .ok_or_else(|| {
            TileError::Encode(EncodeError::InvalidBuffer {
                message: "region buffer does not match its dimensions".to_string(),
            })
        })?;
    let resized = image::imageops::resize(&image, output.0, output.1, FilterType::Lanczos3);
    PixelBuffer::new(output.0, output.1, PixelLayout::Rgb8, resized.into_raw())
        .map_err(TileError::Encode)
}

// =============================================================================
// Tests
// =============================================================================
