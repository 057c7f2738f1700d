use thiserror::Error;

/// Errors raised while validating slide geometry at construction time
#[derive(Debug, Clone, Error)]
pub enum GeometryError {
    /// Level 0 has a zero-sized axis
    #[error("degenerate level 0 dimensions: {width}x{height}")]
    DegenerateDimensions { width: u64, height: u64 },

    /// The backend reported no resolution levels
    #[error("source reported no resolution levels")]
    EmptyLevelList,

    /// Level 0 must have downsample 1.0 and factors must not decrease
    #[error("invalid downsample {downsample} at source level {level}")]
    InvalidDownsample { level: usize, downsample: f64 },

    /// Declared bounds do not intersect the slide
    #[error("bounds {width}x{height} at ({x}, {y}) are outside the slide")]
    InvalidBounds { x: i64, y: i64, width: u64, height: u64 },
}

/// Errors raised while opening a slide and building a generator
#[derive(Debug, Clone, Error)]
pub enum OpenError {
    /// The backend could not open or describe the source
    #[error("backend failed to open slide: {0}")]
    Backend(String),

    /// The reported geometry is unusable
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// Construction options are out of range
    #[error("invalid option: {0}")]
    InvalidOptions(String),
}

/// Errors raised by a backend while reading a pixel region.
///
/// A region failure affects only the requesting tile; the generator and its
/// pyramid stay usable for other tiles.
#[derive(Debug, Clone, Error)]
pub enum RegionError {
    /// Backend-specific read or decode failure
    #[error("region read failed: {0}")]
    Backend(String),

    /// The requested region exceeds the source level's extent
    #[error(
        "region {width}x{height} at ({x}, {y}) exceeds level {level} extent"
    )]
    OutOfBounds {
        level: usize,
        x: i64,
        y: i64,
        width: u64,
        height: u64,
    },

    /// The backend returned a buffer whose size does not match the request
    #[error(
        "backend returned a {actual_width}x{actual_height} buffer for a {width}x{height} region"
    )]
    SizeMismatch {
        width: u64,
        height: u64,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Errors raised while encoding a pixel buffer to JPEG or PNG
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    /// The pixel buffer does not match its declared dimensions or layout
    #[error("pixel buffer mismatch: {message}")]
    InvalidBuffer { message: String },

    /// Tile dimensions exceed what the target codec can represent
    #[error("tile {width}x{height} exceeds the {format} size limit")]
    DimensionsTooLarge {
        width: u64,
        height: u64,
        format: &'static str,
    },

    /// The underlying encoder rejected the data
    #[error("{format} encoder error: {message}")]
    Codec {
        format: &'static str,
        message: String,
    },
}

/// Errors raised when requesting a tile from a generator
#[derive(Debug, Clone, Error)]
pub enum TileError {
    /// Tile address outside the valid grid for its level (caller error)
    #[error(
        "tile ({col}, {row}) out of range for level {level}: grid is {cols}x{rows}"
    )]
    OutOfRange {
        level: usize,
        col: u64,
        row: u64,
        cols: u64,
        rows: u64,
    },

    /// Level index outside the pyramid
    #[error("level {level} out of range: pyramid has {levels} levels")]
    InvalidLevel { level: usize, levels: usize },

    /// The backend failed to read the source region for this tile
    #[error("region read failed: {0}")]
    Region(#[from] RegionError),

    /// The encoder rejected the tile's pixel data
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
}
