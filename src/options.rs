//! Generator construction options.
//!
//! Options control the virtual pyramid geometry (tile size, overlap, bounds
//! limiting) and the tile encoding (format, quality, ICC embedding). They are
//! fixed at generator construction; changing them means building a new
//! generator.

use crate::error::OpenError;

// =============================================================================
// Default Values
// =============================================================================

/// Default tile edge length in pixels.
///
/// 254 keeps `tile_size + 2 * overlap` at a power of two with the default
/// overlap, which viewers prefer.
pub const DEFAULT_TILE_SIZE: u32 = 254;

/// Default overlap in pixels added to each interior tile edge.
pub const DEFAULT_OVERLAP: u32 = 1;

/// Default encoding quality on the 0.0-1.0 scale.
pub const DEFAULT_QUALITY: f32 = 0.75;

// =============================================================================
// Tile Format
// =============================================================================

/// Output encoding for tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileFormat {
    /// Baseline JPEG
    #[default]
    Jpeg,
    /// 8-bit RGB PNG
    Png,
}

impl TileFormat {
    /// MIME type for HTTP responses.
    pub fn mime_type(self) -> &'static str {
        match self {
            TileFormat::Jpeg => "image/jpeg",
            TileFormat::Png => "image/png",
        }
    }

    /// File extension as used in DZI descriptors and tile paths.
    pub fn extension(self) -> &'static str {
        match self {
            TileFormat::Jpeg => "jpg",
            TileFormat::Png => "png",
        }
    }
}

// =============================================================================
// Generator Options
// =============================================================================

/// Options for building a [`crate::DeepZoomGenerator`].
///
/// # Example
///
/// ```
/// use wsi_deepzoom::{GeneratorOptions, TileFormat};
///
/// let options = GeneratorOptions::new()
///     .tile_size(510)
///     .overlap(1)
///     .format(TileFormat::Png)
///     .quality(0.9);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Tile edge length in pixels (without overlap).
    pub tile_size: u32,

    /// Extra pixels added to each interior tile edge.
    pub overlap: u32,

    /// Crop the pyramid to the backend-declared non-empty region.
    pub limit_bounds: bool,

    /// Output encoding for tiles.
    pub format: TileFormat,

    /// Encoding quality, 0.0-1.0.
    ///
    /// For JPEG this maps directly to the encoder's 0-100 quality scale.
    /// For PNG it maps inversely to the zlib compression level
    /// (`(100 - quality * 100) / 10`, clamped to 0-9).
    pub quality: f32,

    /// Embed the slide's ICC color profile into encoded tiles.
    pub embed_icc: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            overlap: DEFAULT_OVERLAP,
            limit_bounds: false,
            format: TileFormat::default(),
            quality: DEFAULT_QUALITY,
            embed_icc: false,
        }
    }
}

impl GeneratorOptions {
    /// Create options with the defaults (254 px tiles, 1 px overlap, JPEG
    /// at quality 0.75, no bounds limiting, no ICC embedding).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tile edge length in pixels.
    pub fn tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the interior-edge overlap in pixels.
    pub fn overlap(mut self, overlap: u32) -> Self {
        self.overlap = overlap;
        self
    }

    /// Crop the pyramid to the backend-declared non-empty region.
    pub fn limit_bounds(mut self, limit_bounds: bool) -> Self {
        self.limit_bounds = limit_bounds;
        self
    }

    /// Set the tile output format.
    pub fn format(mut self, format: TileFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the encoding quality (clamped to 0.0-1.0 at use).
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Embed the slide's ICC profile into encoded tiles.
    pub fn embed_icc(mut self, embed_icc: bool) -> Self {
        self.embed_icc = embed_icc;
        self
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), OpenError> {
        if self.tile_size == 0 {
            return Err(OpenError::InvalidOptions(
                "tile_size must be greater than 0".to_string(),
            ));
        }
        if self.overlap >= self.tile_size {
            return Err(OpenError::InvalidOptions(format!(
                "overlap ({}) must be smaller than tile_size ({})",
                self.overlap, self.tile_size
            )));
        }
        if !self.quality.is_finite() {
            return Err(OpenError::InvalidOptions(
                "quality must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Quality clamped to 0.0-1.0, as used by the encoders.
    pub fn clamped_quality(&self) -> f32 {
        self.quality.clamp(0.0, 1.0)
    }

    /// JPEG quality on the encoder's 0-100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.clamped_quality() * 100.0) as u8
    }

    /// PNG zlib compression level (0-9), inverse of quality.
    pub fn png_compression(&self) -> u8 {
        ((100 - u32::from(self.jpeg_quality())) / 10).clamp(0, 9) as u8
    }
}

// =============================================================================
// Tests
// =============================================================================
